//! # Error Types — The Shared Failure Taxonomy
//!
//! One `thiserror` enum covers every failure the stack can produce. The
//! registry and the gate return the same type, so a delegated mint that
//! fails inside the registry surfaces to the gate's caller unchanged —
//! no wrapping, no translation, the true root cause.
//!
//! ## Design
//!
//! - Every failure is a synchronous, terminal rejection of the whole
//!   operation; no partial state survives an error.
//! - Variants carry structured context (caller, series, counts, amounts)
//!   rather than preformatted strings.

use thiserror::Error;

use crate::identity::{Address, SeriesId};
use crate::payment::Wei;
use crate::phase::SalePhase;

/// Top-level error type for the Mintgate stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintgateError {
    /// Caller does not hold the owner capability.
    #[error("caller {caller} is not the contract owner")]
    NotOwner {
        /// The rejected caller.
        caller: Address,
    },

    /// Caller is not the configured trusted minter (or none is configured).
    #[error("caller {caller} is not the trusted minter")]
    NotAuthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// Series creation collided with an existing identifier.
    #[error("{0} already exists")]
    AlreadyExists(SeriesId),

    /// No series under this identifier.
    #[error("{0} not found")]
    NotFound(SeriesId),

    /// Series metadata is locked against edits.
    #[error("{0} is locked against edits")]
    Locked(SeriesId),

    /// Amount outside the permitted range for the operation.
    #[error("invalid amount {amount}: allowed range is {min}..={max}")]
    InvalidAmount {
        /// The rejected amount.
        amount: u64,
        /// Smallest permitted amount.
        min: u64,
        /// Largest permitted amount.
        max: u64,
    },

    /// The wallet's cumulative minted total would pass the per-wallet cap.
    #[error("allowance exceeded for {wallet}: {minted} minted + {requested} requested > cap {cap}")]
    AllowanceExceeded {
        /// The wallet whose allowance ran out.
        wallet: Address,
        /// Units already minted through the gate.
        minted: u64,
        /// Units requested in this call.
        requested: u64,
        /// The per-wallet cap in force.
        cap: u64,
    },

    /// Attached payment does not cover the computed price.
    #[error("insufficient payment: attached {attached} < required {required}")]
    InsufficientPayment {
        /// Value attached to the call.
        attached: Wei,
        /// Price computed from amount and unit price.
        required: Wei,
    },

    /// Minting would pass the series supply ceiling.
    #[error("{series}: minting {requested} would exceed max supply ({total_supply} of {max_supply} minted)")]
    SupplyExceeded {
        /// The series whose ceiling was hit.
        series: SeriesId,
        /// Units requested in this call.
        requested: u64,
        /// Units minted so far.
        total_supply: u64,
        /// The immutable-while-locked ceiling.
        max_supply: u64,
    },

    /// The entry point is not usable in the current sale phase.
    #[error("sale not active: requires phase {required}, current phase is {current}")]
    SaleNotActive {
        /// The phase this entry point requires.
        required: SalePhase,
        /// The phase the gate is in.
        current: SalePhase,
    },

    /// No valid membership proof for this wallet against the committed set.
    #[error("{0} is not on the allow list")]
    NotWhitelisted(Address),

    /// Transfer amount exceeds the holder's ledger balance.
    #[error("insufficient balance: {holder} holds {held} of {series}, {requested} requested")]
    InsufficientBalance {
        /// The debited holder.
        holder: Address,
        /// The series being transferred.
        series: SeriesId,
        /// Units held.
        held: u64,
        /// Units requested.
        requested: u64,
    },

    /// A mint entry point was re-entered before the first call finished.
    #[error("reentrant mint rejected")]
    ReentrantCall,

    /// The payment sink refused the credit; the held balance is unchanged.
    #[error("payment transfer failed: {0}")]
    PaymentFailed(String),

    /// Commitment requested over an empty address set.
    #[error("allow list must contain at least one address")]
    EmptyAllowList,

    /// Address failed to parse from hex.
    #[error("malformed address: {0}")]
    MalformedAddress(String),

    /// 32-byte digest failed to parse from hex.
    #[error("malformed digest: {0}")]
    MalformedDigest(String),
}
