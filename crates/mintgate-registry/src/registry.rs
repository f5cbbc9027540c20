//! # TokenRegistry — Series Table, Supply Ceilings, Trusted Minting
//!
//! The registry owns the series table and the global supply counter, and
//! is the only component that creates units of value. All mint paths
//! funnel through one private routine so the ceiling check and the
//! counter updates cannot diverge.
//!
//! ## Security Invariant
//!
//! At most one identity — the trusted minter — may mint through the
//! delegated path, and an unset trusted minter disables that path for
//! every caller. The owner's direct mint entry is an intentional bypass
//! for team and reserve allocations; it still honors the supply ceiling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mintgate_core::{ensure_owner, Address, MintgateError, SeriesId};

use crate::ledger::BalanceLedger;
use crate::series::TokenSeries;

/// The multi-series token registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRegistry {
    owner: Address,
    trusted_minter: Option<Address>,
    series: HashMap<SeriesId, TokenSeries>,
    global_supply: u64,
    ledger: BalanceLedger,
}

impl TokenRegistry {
    /// Create a registry owned by `owner`, with no series and no
    /// trusted minter configured.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            trusted_minter: None,
            series: HashMap::new(),
            global_supply: 0,
            ledger: BalanceLedger::new(),
        }
    }

    // ─── Admin operations ────────────────────────────────────────────

    /// Create a new series. Owner-only.
    ///
    /// # Errors
    ///
    /// - `NotOwner` for any other caller.
    /// - `AlreadyExists` if `id` is taken.
    /// - `InvalidAmount` for a zero ceiling — a series with no mintable
    ///   supply is indistinguishable from an absent one.
    pub fn create_series(
        &mut self,
        caller: Address,
        id: SeriesId,
        max_supply: u64,
        resource_uri: String,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        if self.series.contains_key(&id) {
            return Err(MintgateError::AlreadyExists(id));
        }
        if max_supply == 0 {
            return Err(MintgateError::InvalidAmount {
                amount: 0,
                min: 1,
                max: u64::MAX,
            });
        }
        tracing::info!(%id, max_supply, uri = %resource_uri, "series created");
        self.series.insert(id, TokenSeries::new(max_supply, resource_uri));
        Ok(())
    }

    /// Replace an unlocked series' ceiling and resource locator.
    /// Owner-only. Preserves the minted count and the edit flag.
    ///
    /// No further validation: the original performs none, so lowering
    /// the ceiling below the minted supply is accepted as-is (later
    /// mints then fail `SupplyExceeded`).
    pub fn update_series(
        &mut self,
        caller: Address,
        id: SeriesId,
        max_supply: u64,
        resource_uri: String,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        let series = self.series.get_mut(&id).ok_or(MintgateError::NotFound(id))?;
        if !series.editable {
            return Err(MintgateError::Locked(id));
        }
        tracing::info!(%id, max_supply, uri = %resource_uri, "series updated");
        series.max_supply = max_supply;
        series.resource_uri = resource_uri;
        Ok(())
    }

    /// Lock a series against further edits. Owner-only, idempotent.
    pub fn lock_series(&mut self, caller: Address, id: SeriesId) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        let series = self.series.get_mut(&id).ok_or(MintgateError::NotFound(id))?;
        if series.editable {
            tracing::info!(%id, "series locked");
        }
        series.editable = false;
        Ok(())
    }

    /// Configure the single identity allowed to mint through the
    /// delegated path. Owner-only. `None` — or the zero address, which
    /// normalizes to `None` — disables delegated minting entirely.
    pub fn set_trusted_minter(
        &mut self,
        caller: Address,
        minter: Option<Address>,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        let minter = minter.filter(|a| !a.is_zero());
        match minter {
            Some(a) => tracing::info!(minter = %a, "trusted minter set"),
            None => tracing::info!("trusted minter cleared"),
        }
        self.trusted_minter = minter;
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

    // ─── Minting ─────────────────────────────────────────────────────

    /// Mint through the delegated path.
    ///
    /// # Errors
    ///
    /// - `NotAuthorized` unless `caller` equals the configured trusted
    ///   minter; always, for every caller, while none is configured.
    /// - `NotFound` / `SupplyExceeded` from the shared routine.
    pub fn delegated_mint(
        &mut self,
        caller: Address,
        to: Address,
        id: SeriesId,
        amount: u64,
    ) -> Result<(), MintgateError> {
        if self.trusted_minter != Some(caller) {
            return Err(MintgateError::NotAuthorized { caller });
        }
        self.mint_units(to, id, amount)
    }

    /// Mint directly as the owner — the team/reserve bypass. Available
    /// regardless of any sale phase; the supply ceiling still applies.
    pub fn owner_mint(
        &mut self,
        caller: Address,
        to: Address,
        id: SeriesId,
        amount: u64,
    ) -> Result<(), MintgateError> {
        ensure_owner(self.owner, caller)?;
        self.mint_units(to, id, amount)
    }

    /// The single unit-creation routine. Enforces the ceiling, credits
    /// the holder, and moves both counters in one step. No per-wallet
    /// cap here — that is the gate's concern.
    fn mint_units(
        &mut self,
        to: Address,
        id: SeriesId,
        amount: u64,
    ) -> Result<(), MintgateError> {
        let series = self.series.get_mut(&id).ok_or(MintgateError::NotFound(id))?;
        let next = match series.total_supply.checked_add(amount) {
            Some(n) if n <= series.max_supply => n,
            _ => {
                return Err(MintgateError::SupplyExceeded {
                    series: id,
                    requested: amount,
                    total_supply: series.total_supply,
                    max_supply: series.max_supply,
                })
            }
        };
        series.total_supply = next;
        self.global_supply = self.global_supply.saturating_add(amount);
        self.ledger.credit(to, id, amount);
        tracing::debug!(%id, to = %to, amount, total = next, "units minted");
        Ok(())
    }

    // ─── Ledger surface ──────────────────────────────────────────────

    /// Move units between holders. Does not touch minted counters or
    /// any gate allowance — allowance is consumption-based.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        id: SeriesId,
        amount: u64,
    ) -> Result<(), MintgateError> {
        if !self.series.contains_key(&id) {
            return Err(MintgateError::NotFound(id));
        }
        self.ledger.transfer(from, to, id, amount)
    }

    /// Units of `id` held by `holder`.
    pub fn balance_of(&self, holder: Address, id: SeriesId) -> u64 {
        self.ledger.balance_of(holder, id)
    }

    // ─── Read accessors ──────────────────────────────────────────────

    /// The series record under `id`.
    pub fn series(&self, id: SeriesId) -> Result<&TokenSeries, MintgateError> {
        self.series.get(&id).ok_or(MintgateError::NotFound(id))
    }

    /// Cumulative units minted for `id`.
    pub fn total_supply(&self, id: SeriesId) -> Result<u64, MintgateError> {
        Ok(self.series(id)?.total_supply)
    }

    /// The resource locator for `id`, verbatim.
    pub fn resource_uri(&self, id: SeriesId) -> Result<&str, MintgateError> {
        Ok(self.series(id)?.resource_uri.as_str())
    }

    /// Sum of all series' minted units.
    pub fn global_supply(&self) -> u64 {
        self.global_supply
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The configured trusted minter, if any.
    pub fn trusted_minter(&self) -> Option<Address> {
        self.trusted_minter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address([0xaa; 20]);
    const GATE: Address = Address([0xbb; 20]);
    const ID: SeriesId = SeriesId(1);

    fn addr(byte: u8) -> Address {
        Address([byte; 20])
    }

    fn registry_with_series(max_supply: u64) -> TokenRegistry {
        let mut reg = TokenRegistry::new(OWNER);
        reg.create_series(OWNER, ID, max_supply, "ipfs://meta/1".to_string())
            .unwrap();
        reg
    }

    // ── Series lifecycle ─────────────────────────────────────────────

    #[test]
    fn test_create_series() {
        let reg = registry_with_series(50);
        let s = reg.series(ID).unwrap();
        assert_eq!(s.max_supply, 50);
        assert_eq!(s.total_supply, 0);
        assert!(s.editable);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut reg = registry_with_series(50);
        let err = reg
            .create_series(OWNER, ID, 10, String::new())
            .unwrap_err();
        assert!(matches!(err, MintgateError::AlreadyExists(id) if id == ID));
    }

    #[test]
    fn test_create_with_zero_ceiling_fails() {
        let mut reg = TokenRegistry::new(OWNER);
        let err = reg
            .create_series(OWNER, ID, 0, String::new())
            .unwrap_err();
        assert!(matches!(err, MintgateError::InvalidAmount { amount: 0, .. }));
    }

    #[test]
    fn test_update_series_preserves_supply_and_flag() {
        let mut reg = registry_with_series(50);
        reg.owner_mint(OWNER, addr(1), ID, 5).unwrap();
        reg.update_series(OWNER, ID, 80, "ipfs://meta/1-v2".to_string())
            .unwrap();
        let s = reg.series(ID).unwrap();
        assert_eq!(s.max_supply, 80);
        assert_eq!(s.resource_uri, "ipfs://meta/1-v2");
        assert_eq!(s.total_supply, 5);
        assert!(s.editable);
    }

    #[test]
    fn test_update_absent_series_fails_not_found() {
        let mut reg = TokenRegistry::new(OWNER);
        let err = reg
            .update_series(OWNER, SeriesId(9), 10, String::new())
            .unwrap_err();
        assert!(matches!(err, MintgateError::NotFound(id) if id == SeriesId(9)));
    }

    #[test]
    fn test_lock_then_update_fails_locked() {
        let mut reg = registry_with_series(50);
        reg.update_series(OWNER, ID, 60, String::new()).unwrap();
        reg.lock_series(OWNER, ID).unwrap();
        let err = reg.update_series(OWNER, ID, 70, String::new()).unwrap_err();
        assert!(matches!(err, MintgateError::Locked(id) if id == ID));
    }

    #[test]
    fn test_lock_is_idempotent() {
        let mut reg = registry_with_series(50);
        reg.lock_series(OWNER, ID).unwrap();
        reg.lock_series(OWNER, ID).unwrap();
        assert!(!reg.series(ID).unwrap().editable);
    }

    #[test]
    fn test_lock_absent_series_fails_not_found() {
        let mut reg = TokenRegistry::new(OWNER);
        let err = reg.lock_series(OWNER, SeriesId(3)).unwrap_err();
        assert!(matches!(err, MintgateError::NotFound(_)));
    }

    // Documents current behavior: the ceiling may drop below the minted
    // count, after which every further mint fails.
    #[test]
    fn test_update_may_lower_ceiling_below_minted() {
        let mut reg = registry_with_series(50);
        reg.owner_mint(OWNER, addr(1), ID, 30).unwrap();
        reg.update_series(OWNER, ID, 10, String::new()).unwrap();
        assert_eq!(reg.series(ID).unwrap().max_supply, 10);
        let err = reg.owner_mint(OWNER, addr(1), ID, 1).unwrap_err();
        assert!(matches!(err, MintgateError::SupplyExceeded { .. }));
    }

    // ── Owner gating ─────────────────────────────────────────────────

    #[test]
    fn test_admin_operations_reject_non_owner() {
        let mut reg = registry_with_series(50);
        let stranger = addr(0x77);
        assert!(matches!(
            reg.create_series(stranger, SeriesId(2), 10, String::new()),
            Err(MintgateError::NotOwner { .. })
        ));
        assert!(matches!(
            reg.update_series(stranger, ID, 10, String::new()),
            Err(MintgateError::NotOwner { .. })
        ));
        assert!(matches!(
            reg.lock_series(stranger, ID),
            Err(MintgateError::NotOwner { .. })
        ));
        assert!(matches!(
            reg.set_trusted_minter(stranger, Some(GATE)),
            Err(MintgateError::NotOwner { .. })
        ));
        assert!(matches!(
            reg.owner_mint(stranger, addr(1), ID, 1),
            Err(MintgateError::NotOwner { .. })
        ));
    }

    #[test]
    fn test_transfer_ownership() {
        let mut reg = registry_with_series(50);
        let next = addr(0x10);
        reg.transfer_ownership(OWNER, next).unwrap();
        assert_eq!(reg.owner(), next);
        // The old owner lost the capability.
        assert!(matches!(
            reg.lock_series(OWNER, ID),
            Err(MintgateError::NotOwner { .. })
        ));
        reg.lock_series(next, ID).unwrap();
    }

    // ── Trusted-minter gating ────────────────────────────────────────

    #[test]
    fn test_delegated_mint_fails_while_unset() {
        let mut reg = registry_with_series(50);
        for caller in [GATE, OWNER, Address::ZERO] {
            let err = reg.delegated_mint(caller, addr(1), ID, 1).unwrap_err();
            assert!(matches!(err, MintgateError::NotAuthorized { .. }));
        }
    }

    #[test]
    fn test_delegated_mint_only_from_configured_identity() {
        let mut reg = registry_with_series(50);
        reg.set_trusted_minter(OWNER, Some(GATE)).unwrap();
        assert!(matches!(
            reg.delegated_mint(addr(0x55), addr(1), ID, 1),
            Err(MintgateError::NotAuthorized { .. })
        ));
        reg.delegated_mint(GATE, addr(1), ID, 1).unwrap();
        assert_eq!(reg.balance_of(addr(1), ID), 1);
    }

    #[test]
    fn test_zero_address_minter_normalizes_to_unset() {
        let mut reg = registry_with_series(50);
        reg.set_trusted_minter(OWNER, Some(Address::ZERO)).unwrap();
        assert_eq!(reg.trusted_minter(), None);
        // Even a caller claiming the zero identity is rejected.
        assert!(matches!(
            reg.delegated_mint(Address::ZERO, addr(1), ID, 1),
            Err(MintgateError::NotAuthorized { .. })
        ));
    }

    #[test]
    fn test_resetting_minter_restores_delegated_minting() {
        let mut reg = registry_with_series(50);
        reg.set_trusted_minter(OWNER, Some(GATE)).unwrap();
        reg.delegated_mint(GATE, addr(1), ID, 1).unwrap();
        reg.set_trusted_minter(OWNER, None).unwrap();
        assert!(reg.delegated_mint(GATE, addr(1), ID, 1).is_err());
        reg.set_trusted_minter(OWNER, Some(GATE)).unwrap();
        reg.delegated_mint(GATE, addr(1), ID, 1).unwrap();
        assert_eq!(reg.balance_of(addr(1), ID), 2);
    }

    #[test]
    fn test_delegated_mint_absent_series_fails_not_found() {
        let mut reg = TokenRegistry::new(OWNER);
        reg.set_trusted_minter(OWNER, Some(GATE)).unwrap();
        let err = reg.delegated_mint(GATE, addr(1), SeriesId(9), 1).unwrap_err();
        assert!(matches!(err, MintgateError::NotFound(_)));
    }

    // ── Supply ceiling ───────────────────────────────────────────────

    #[test]
    fn test_mint_to_exact_ceiling_succeeds() {
        let mut reg = registry_with_series(50);
        reg.owner_mint(OWNER, addr(1), ID, 50).unwrap();
        assert_eq!(reg.total_supply(ID).unwrap(), 50);
        assert_eq!(reg.series(ID).unwrap().remaining(), 0);
    }

    #[test]
    fn test_one_past_ceiling_fails() {
        let mut reg = registry_with_series(50);
        reg.owner_mint(OWNER, addr(1), ID, 50).unwrap();
        let err = reg.owner_mint(OWNER, addr(1), ID, 1).unwrap_err();
        assert!(matches!(
            err,
            MintgateError::SupplyExceeded {
                requested: 1,
                total_supply: 50,
                max_supply: 50,
                ..
            }
        ));
        assert_eq!(reg.total_supply(ID).unwrap(), 50);
    }

    #[test]
    fn test_oversized_single_mint_fails_cleanly() {
        let mut reg = registry_with_series(50);
        let err = reg.owner_mint(OWNER, addr(1), ID, 51).unwrap_err();
        assert!(matches!(err, MintgateError::SupplyExceeded { .. }));
        assert_eq!(reg.total_supply(ID).unwrap(), 0);
        assert_eq!(reg.balance_of(addr(1), ID), 0);
    }

    #[test]
    fn test_huge_amount_does_not_overflow_the_check() {
        let mut reg = registry_with_series(50);
        reg.owner_mint(OWNER, addr(1), ID, 10).unwrap();
        let err = reg.owner_mint(OWNER, addr(1), ID, u64::MAX).unwrap_err();
        assert!(matches!(err, MintgateError::SupplyExceeded { .. }));
    }

    #[test]
    fn test_no_per_wallet_cap_on_registry_paths() {
        // Unlike the gate, the registry enforces only the ceiling.
        let mut reg = registry_with_series(50);
        reg.owner_mint(OWNER, addr(1), ID, 49).unwrap();
        assert_eq!(reg.balance_of(addr(1), ID), 49);
    }

    // ── Global counter ───────────────────────────────────────────────

    #[test]
    fn test_global_supply_tracks_all_series() {
        let mut reg = registry_with_series(50);
        reg.create_series(OWNER, SeriesId(2), 30, String::new())
            .unwrap();
        reg.owner_mint(OWNER, addr(1), ID, 5).unwrap();
        reg.owner_mint(OWNER, addr(2), SeriesId(2), 7).unwrap();
        assert_eq!(reg.global_supply(), 12);
        assert_eq!(reg.total_supply(ID).unwrap(), 5);
        assert_eq!(reg.total_supply(SeriesId(2)).unwrap(), 7);
    }

    // ── Ledger surface ───────────────────────────────────────────────

    #[test]
    fn test_transfer_between_holders() {
        let mut reg = registry_with_series(50);
        reg.owner_mint(OWNER, addr(1), ID, 10).unwrap();
        reg.transfer(addr(1), addr(2), ID, 4).unwrap();
        assert_eq!(reg.balance_of(addr(1), ID), 6);
        assert_eq!(reg.balance_of(addr(2), ID), 4);
        // Transfers never change supply counters.
        assert_eq!(reg.total_supply(ID).unwrap(), 10);
        assert_eq!(reg.global_supply(), 10);
    }

    #[test]
    fn test_transfer_on_absent_series_fails_not_found() {
        let mut reg = TokenRegistry::new(OWNER);
        let err = reg.transfer(addr(1), addr(2), SeriesId(4), 1).unwrap_err();
        assert!(matches!(err, MintgateError::NotFound(_)));
    }

    // ── Accessors ────────────────────────────────────────────────────

    #[test]
    fn test_resource_uri_verbatim() {
        let reg = registry_with_series(50);
        assert_eq!(reg.resource_uri(ID).unwrap(), "ipfs://meta/1");
        assert!(matches!(
            reg.resource_uri(SeriesId(9)),
            Err(MintgateError::NotFound(_))
        ));
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn test_registry_serde_roundtrip() {
        let mut reg = registry_with_series(50);
        reg.set_trusted_minter(OWNER, Some(GATE)).unwrap();
        reg.owner_mint(OWNER, addr(1), ID, 3).unwrap();
        let json = serde_json::to_string(&reg).unwrap();
        let parsed: TokenRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.owner(), OWNER);
        assert_eq!(parsed.trusted_minter(), Some(GATE));
        assert_eq!(parsed.total_supply(ID).unwrap(), 3);
        assert_eq!(parsed.balance_of(addr(1), ID), 3);
    }
}
