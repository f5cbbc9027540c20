//! # Sale Terms
//!
//! The price/cap pair the owner sets for a sale round. Deliberately
//! unvalidated, matching the admin surface it models: a zero cap makes
//! every mint amount invalid, and a zero price makes minting free. Tests
//! document both.

use serde::{Deserialize, Serialize};

use mintgate_core::Wei;

/// Price per unit and per-wallet lifetime cap, set as a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTerms {
    /// Payment required per minted unit.
    pub price_per_unit: Wei,
    /// Cumulative units one wallet may ever mint through the gate.
    pub max_per_wallet: u8,
}

impl SaleTerms {
    /// Create a terms pair.
    pub fn new(price_per_unit: Wei, max_per_wallet: u8) -> Self {
        Self {
            price_per_unit,
            max_per_wallet,
        }
    }
}
