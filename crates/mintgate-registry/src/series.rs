//! # Token Series Metadata
//!
//! One record per series identifier. The supply ceiling and resource
//! locator are editable until the series is locked; the lock is
//! monotonic — once set it is never cleared.

use serde::{Deserialize, Serialize};

/// Metadata and supply accounting for one token series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSeries {
    /// Supply ceiling. Always at least 1 for an existing series.
    pub max_supply: u64,
    /// Cumulative units minted; invariant `total_supply <= max_supply`
    /// under every mint sequence.
    pub total_supply: u64,
    /// Resource locator returned verbatim to metadata viewers.
    pub resource_uri: String,
    /// Whether metadata edits are still permitted. Monotonic true→false.
    pub editable: bool,
}

impl TokenSeries {
    /// Create a fresh series with no units minted.
    pub fn new(max_supply: u64, resource_uri: String) -> Self {
        Self {
            max_supply,
            total_supply: 0,
            resource_uri,
            editable: true,
        }
    }

    /// Units still mintable under the ceiling.
    pub fn remaining(&self) -> u64 {
        self.max_supply.saturating_sub(self.total_supply)
    }
}
