//! # Balance Ledger
//!
//! The conventional multi-token balance map the registry builds on:
//! `(holder, series) → units`. Unit creation is crate-private — only the
//! registry's mint routine credits new units — while `transfer` is the
//! public holder-to-holder surface.
//!
//! Operator approvals, batch transfers, and receiver hooks are outside
//! this ledger's scope.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, MintgateError, SeriesId};

/// Per-holder, per-series unit balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLedger {
    balances: HashMap<Address, BTreeMap<SeriesId, u64>>,
}

impl BalanceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of `id` held by `holder`.
    pub fn balance_of(&self, holder: Address, id: SeriesId) -> u64 {
        self.balances
            .get(&holder)
            .and_then(|per_series| per_series.get(&id))
            .copied()
            .unwrap_or(0)
    }

    /// Create `amount` new units of `id` for `holder`.
    ///
    /// Crate-private: unit creation happens only through the registry's
    /// mint routine, which enforces the supply ceiling first.
    pub(crate) fn credit(&mut self, holder: Address, id: SeriesId, amount: u64) {
        let entry = self
            .balances
            .entry(holder)
            .or_default()
            .entry(id)
            .or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Move `amount` units of `id` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance` if `from` holds fewer than `amount`.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        id: SeriesId,
        amount: u64,
    ) -> Result<(), MintgateError> {
        let held = self.balance_of(from, id);
        if held < amount {
            return Err(MintgateError::InsufficientBalance {
                holder: from,
                series: id,
                held,
                requested: amount,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        if let Some(per_series) = self.balances.get_mut(&from) {
            if let Some(balance) = per_series.get_mut(&id) {
                *balance -= amount;
            }
        }
        self.credit(to, id, amount);
        Ok(())
    }
}
