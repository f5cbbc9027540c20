//! # mintgate-registry — The Multi-Series Token Registry
//!
//! Owns per-series token metadata (supply ceiling, cumulative minted,
//! resource locator, edit lock) and performs the actual unit-of-value
//! creation, subject only to the per-series supply ceiling.
//!
//! Two minting entry points exist:
//!
//! - **Delegated** — restricted to the single configured trusted minter
//!   (the sale gate, in the deployed wiring). An unset trusted minter
//!   disables this path entirely.
//! - **Owner** — the owner's direct bypass for team and reserve
//!   allocations, available in every sale phase.
//!
//! Both funnel into one private routine that enforces the ceiling and
//! keeps the per-series and global counters in lockstep.
//!
//! ## Crate Policy
//!
//! - Depends only on `mintgate-core` internally.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Mutations emit `tracing` events; no subscriber is installed here.

pub mod ledger;
pub mod registry;
pub mod series;

pub use ledger::BalanceLedger;
pub use registry::TokenRegistry;
pub use series::TokenSeries;
