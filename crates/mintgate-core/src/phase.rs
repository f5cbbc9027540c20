//! # Sale Phase
//!
//! The gate's global sale phase. There are no transition restrictions:
//! the owner may move between any two phases at any time, and no phase
//! is terminal. Phase changes never reset per-wallet allowance counters.

use serde::{Deserialize, Serialize};

/// Which mint entry point, if any, is currently usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SalePhase {
    /// No minting through the gate.
    #[default]
    Off,
    /// Allow-listed wallets may mint with a membership proof.
    Presale,
    /// Any wallet may mint.
    Public,
}

impl SalePhase {
    /// Whether either mint entry point is usable.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl std::fmt::Display for SalePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Off => "OFF",
            Self::Presale => "PRESALE",
            Self::Public => "PUBLIC",
        };
        f.write_str(s)
    }
}
