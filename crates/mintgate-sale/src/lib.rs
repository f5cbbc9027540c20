//! # mintgate-sale — The Sale Gate
//!
//! The sale controller in front of the registry. It holds the sale-phase
//! state machine, the price and per-wallet cap, and the allow-list
//! commitment, and it is the only component that accounts per-wallet
//! allowances.
//!
//! A mint request passes, in order: phase check, membership proof (in
//! presale), amount range, cumulative allowance, payment — and only then
//! reaches the registry through the delegated trusted-minter call. The
//! registry's own failures (absent series, exhausted supply) surface to
//! the caller unchanged.
//!
//! ## Crate Policy
//!
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Mutations emit `tracing` events; no subscriber is installed here.

pub mod gate;
pub mod terms;

pub use gate::{AllowanceGate, PhaseTransitionRecord, RegistryHandle};
pub use terms::SaleTerms;
