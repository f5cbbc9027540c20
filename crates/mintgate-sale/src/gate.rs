//! # AllowanceGate — Phase-Gated, Allowance-Accounted Minting
//!
//! The gate validates every prospective mint against the sale phase, the
//! allow-list commitment (in presale), the per-wallet allowance, and the
//! attached payment, then delegates unit creation to the registry over
//! the trusted-minter call. Its own bookkeeping — the per-wallet minted
//! map and the held balance — is written only after the delegated call
//! succeeds, so a failure anywhere leaves no partial state.
//!
//! ## Security Invariant
//!
//! The per-wallet map counts units *minted*, not units *held*:
//! transferring tokens away never restores allowance. Over-payment is
//! kept, not refunded; it accumulates in the held balance until the
//! owner withdraws. A per-call in-progress flag rejects any re-entered
//! mint before the first one finishes its bookkeeping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mintgate_core::{ensure_owner, Address, MintgateError, PaymentSink, SalePhase, SeriesId, Wei};
use mintgate_crypto::{leaf_hash, verify_membership, AllowListRoot, MembershipProof};
use mintgate_registry::TokenRegistry;

use crate::terms::SaleTerms;

/// Shared handle to the registry the gate mints through.
///
/// Injected at construction and owner-replaceable. A null registry is
/// unrepresentable — the handle always points at a live registry.
pub type RegistryHandle = Rc<RefCell<TokenRegistry>>;

/// Record of one sale-phase transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransitionRecord {
    /// Phase before the transition.
    pub from: SalePhase,
    /// Phase after the transition.
    pub to: SalePhase,
    /// When the owner triggered it.
    pub at: DateTime<Utc>,
}

/// The sale controller in front of the registry.
#[derive(Debug, Clone)]
pub struct AllowanceGate {
    owner: Address,
    /// The gate's own identity — the registry must name it trusted
    /// minter for the delegated path to open.
    address: Address,
    registry: RegistryHandle,
    series_id: SeriesId,
    phase: SalePhase,
    terms: SaleTerms,
    allow_root: AllowListRoot,
    minted: HashMap<Address, u64>,
    held_balance: Wei,
    transitions: Vec<PhaseTransitionRecord>,
    in_flight: bool,
}

impl AllowanceGate {
    /// Create a gate bound to `registry`, selling `series_id`.
    ///
    /// Starts in phase Off with zeroed terms (cap 0 — minting is
    /// impossible until the owner sets terms) and no allow-list
    /// commitment.
    pub fn new(
        owner: Address,
        address: Address,
        registry: RegistryHandle,
        series_id: SeriesId,
    ) -> Self {
        Self {
            owner,
            address,
            registry,
            series_id,
            phase: SalePhase::Off,
            terms: SaleTerms::default(),
            allow_root: AllowListRoot::ZERO,
            minted: HashMap::new(),
            held_balance: Wei::ZERO,
            transitions: Vec::new(),
            in_flight: false,
        }
    }

    // ─── Mint entry points ───────────────────────────────────────────

    /// Mint during the presale phase, gated on a membership proof for
    /// the caller's own address.
    pub fn presale_mint(
        &mut self,
        caller: Address,
        payment: Wei,
        amount: u64,
        proof: &MembershipProof,
    ) -> Result<(), MintgateError> {
        if self.phase != SalePhase::Presale {
            return Err(MintgateError::SaleNotActive {
                required: SalePhase::Presale,
                current: self.phase,
            });
        }
        let leaf = leaf_hash(&caller);
        if !verify_membership(proof, &self.allow_root, &leaf) {
            return Err(MintgateError::NotWhitelisted(caller));
        }
        self.gated_mint(caller, payment, amount)
    }

    /// Mint during the public phase. No membership requirement.
    pub fn public_mint(
        &mut self,
        caller: Address,
        payment: Wei,
        amount: u64,
    ) -> Result<(), MintgateError> {
        if self.phase != SalePhase::Public {
            return Err(MintgateError::SaleNotActive {
                required: SalePhase::Public,
                current: self.phase,
            });
        }
        self.gated_mint(caller, payment, amount)
    }

    /// The guarded shared path. The in-progress flag covers the whole
    /// externally observable mint, including the delegated registry
    /// call, and is cleared on every exit.
    fn gated_mint(
        &mut self,
        caller: Address,
        payment: Wei,
        amount: u64,
    ) -> Result<(), MintgateError> {
        if self.in_flight {
            return Err(MintgateError::ReentrantCall);
        }
        self.in_flight = true;
        let result = self.validate_and_mint(caller, payment, amount);
        self.in_flight = false;
        result
    }

    fn validate_and_mint(
        &mut self,
        caller: Address,
        payment: Wei,
        amount: u64,
    ) -> Result<(), MintgateError> {
        let cap = u64::from(self.terms.max_per_wallet);
        if amount == 0 || amount > cap {
            return Err(MintgateError::InvalidAmount {
                amount,
                min: 1,
                max: cap,
            });
        }

        let minted = self.minted.get(&caller).copied().unwrap_or(0);
        // minted <= cap <= 255 and amount <= cap, so the sum cannot wrap.
        if minted + amount > cap {
            return Err(MintgateError::AllowanceExceeded {
                wallet: caller,
                minted,
                requested: amount,
                cap,
            });
        }

        let required = self.terms.price_per_unit.saturating_mul_units(amount);
        if payment < required {
            return Err(MintgateError::InsufficientPayment {
                attached: payment,
                required,
            });
        }

        // Registry failures (absent series, exhausted supply) propagate
        // unchanged; nothing below runs unless the units were created.
        self.registry
            .borrow_mut()
            .delegated_mint(self.address, caller, self.series_id, amount)?;

        *self.minted.entry(caller).or_insert(0) += amount;
        // The full attached value is kept; over-payment is not refunded.
        self.held_balance = self.held_balance.saturating_add(payment);
        tracing::info!(
            wallet = %caller,
            amount,
            paid = %payment,
            phase = %self.phase,
            "gated mint"
        );
        Ok(())
    }

    // ─── Withdrawal ──────────────────────────────────────────────────

    /// Drain the entire held balance into `sink`. Owner-only.
    ///
    /// If the sink refuses the credit the withdrawal fails and the held
    /// balance is unchanged.
    pub fn withdraw(
        &mut self,
        caller: Address,
        sink: &mut dyn PaymentSink,
    ) -> Result<Wei, MintgateError> {
        ensure_owner(self.owner, caller)?;
        let amount = self.held_balance;
        sink.credit(amount)?;
        self.held_balance = Wei::ZERO;
        tracing::info!(amount = %amount, "balance withdrawn");
        Ok(amount)
    }

    // ─── Admin setters ───────────────────────────────────────────────

    /// Point the gate at a different series. Owner-only.
    pub fn set_series_id(&mut self, caller: Address, id: SeriesId) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        tracing::info!(%id, "series id set");
        self.series_id = id;
        Ok(())
    }

    /// Replace the price/cap pair. Owner-only, no bounds validation —
    /// a zero cap silently makes minting impossible and a zero price
    /// makes it free.
    pub fn set_sale_terms(
        &mut self,
        caller: Address,
        price_per_unit: Wei,
        max_per_wallet: u8,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        tracing::info!(price = %price_per_unit, max_per_wallet, "sale terms set");
        self.terms = SaleTerms::new(price_per_unit, max_per_wallet);
        Ok(())
    }

    /// Move the sale to `phase`. Owner-only; any phase is reachable
    /// from any phase, and switching never resets allowance counters.
    pub fn set_sale_phase(&mut self, caller: Address, phase: SalePhase) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        if phase == self.phase {
            tracing::debug!(phase = %phase, "sale phase unchanged");
            return Ok(());
        }
        tracing::info!(from = %self.phase, to = %phase, "sale phase changed");
        self.transitions.push(PhaseTransitionRecord {
            from: self.phase,
            to: phase,
            at: Utc::now(),
        });
        self.phase = phase;
        Ok(())
    }

    /// Replace the allow-list commitment. Owner-only. Proofs built
    /// against the previous root stop verifying immediately.
    pub fn set_allow_list_commitment(
        &mut self,
        caller: Address,
        root: AllowListRoot,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        tracing::info!(root = %root, "allow-list commitment set");
        self.allow_root = root;
        Ok(())
    }

    /// Rebind the gate to a different registry. Owner-only. The handle
    /// type makes a null registry unrepresentable.
    pub fn set_token_registry(
        &mut self,
        caller: Address,
        registry: RegistryHandle,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        tracing::info!("token registry rebound");
        self.registry = registry;
        Ok(())
    }

    /// Hand the owner capability to `new_owner`. Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        tracing::info!(from = %self.owner, to = %new_owner, "ownership transferred");
        self.owner = new_owner;
        Ok(())
    }

    // ─── Read accessors ──────────────────────────────────────────────

    /// The current sale phase.
    pub fn phase(&self) -> SalePhase {
        self.phase
    }

    /// The terms in force.
    pub fn terms(&self) -> SaleTerms {
        self.terms
    }

    /// The series this gate sells.
    pub fn series_id(&self) -> SeriesId {
        self.series_id
    }

    /// The committed allow-list root.
    pub fn allow_root(&self) -> AllowListRoot {
        self.allow_root
    }

    /// Cumulative units `wallet` has minted through the gate.
    pub fn minted_by(&self, wallet: Address) -> u64 {
        self.minted.get(&wallet).copied().unwrap_or(0)
    }

    /// Payments accumulated and not yet withdrawn.
    pub fn held_balance(&self) -> Wei {
        self.held_balance
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The gate's own identity.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Ordered log of all phase transitions.
    pub fn transitions(&self) -> &[PhaseTransitionRecord] {
        &self.transitions
    }
}
