//! # mintgate-core — Foundational Types for the Mintgate Stack
//!
//! This crate is the bedrock of the Mintgate stack. It defines the
//! type-system primitives shared by the registry and the sale gate.
//! Every other crate in the workspace depends on `mintgate-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Address`, `SeriesId`,
//!    `Wei` — all newtypes. No bare byte arrays or integers for
//!    identifiers or money.
//!
//! 2. **One error taxonomy.** `MintgateError` is the single failure enum
//!    for the whole stack. The gate surfaces registry failures as the
//!    very same values — a caller always sees the root cause.
//!
//! 3. **Sentinels are explicit.** `Address::ZERO` is the null identity;
//!    code that treats it as "disabled" says so at the call site.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mintgate-*` crates (this is the leaf of
//!   the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and persistent types
//!   implement `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod payment;
pub mod phase;

// Re-export primary types for ergonomic imports.
pub use error::MintgateError;
pub use identity::{ensure_owner, Address, SeriesId};
pub use payment::{PaymentSink, Wallet, Wei};
pub use phase::SalePhase;
