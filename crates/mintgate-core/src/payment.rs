//! # Payment Primitives
//!
//! `Wei` is the unit of attached value, and [`PaymentSink`] is the seam
//! withdrawals push funds through. The stack never refunds over-payment:
//! whatever a caller attaches beyond the computed price stays in the
//! gate's held balance until the owner withdraws it.
//!
//! ## Security Invariant
//!
//! `Wei` arithmetic never wraps silently. Price computation saturates
//! (an astronomically priced request simply becomes unpayable) and
//! balance accumulation saturates at the type's ceiling.

use serde::{Deserialize, Serialize};

use crate::error::MintgateError;

/// A payment amount in the smallest currency unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Wei(pub u128);

impl Wei {
    /// The zero amount.
    pub const ZERO: Wei = Wei(0);

    /// Access the inner value.
    pub fn as_u128(&self) -> u128 {
        self.0
    }

    /// Whether this is the zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply a unit price by a unit count, saturating at the ceiling.
    pub fn saturating_mul_units(self, units: u64) -> Wei {
        Wei(self.0.saturating_mul(u128::from(units)))
    }

    /// Add two amounts, saturating at the ceiling.
    pub fn saturating_add(self, other: Wei) -> Wei {
        Wei(self.0.saturating_add(other.0))
    }
}

impl std::fmt::Display for Wei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

/// Receiver side of a funds transfer.
///
/// `withdraw` on the gate drains its entire held balance into a sink.
/// A sink that returns an error aborts the withdrawal; the gate's
/// balance is left untouched.
pub trait PaymentSink {
    /// Accept a credit of `amount`.
    fn credit(&mut self, amount: Wei) -> Result<(), MintgateError>;
}

/// An in-memory sink that accumulates every credit.
///
/// Suitable for tests and for embedders that only need bookkeeping of
/// withdrawn funds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    balance: Wei,
}

impl Wallet {
    /// Create an empty wallet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total credited so far.
    pub fn balance(&self) -> Wei {
        self.balance
    }
}

impl PaymentSink for Wallet {
    fn credit(&mut self, amount: Wei) -> Result<(), MintgateError> {
        self.balance = self.balance.saturating_add(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_mul_units() {
        assert_eq!(Wei(5).saturating_mul_units(20), Wei(100));
        assert_eq!(Wei(u128::MAX).saturating_mul_units(2), Wei(u128::MAX));
        assert_eq!(Wei(7).saturating_mul_units(0), Wei::ZERO);
    }

    #[test]
    fn test_saturating_add() {
        assert_eq!(Wei(1).saturating_add(Wei(2)), Wei(3));
        assert_eq!(Wei(u128::MAX).saturating_add(Wei(1)), Wei(u128::MAX));
    }

    #[test]
    fn test_wallet_accumulates_credits() {
        let mut w = Wallet::new();
        w.credit(Wei(10)).unwrap();
        w.credit(Wei(5)).unwrap();
        assert_eq!(w.balance(), Wei(15));
    }

    #[test]
    fn test_display() {
        assert_eq!(Wei(42).to_string(), "42 wei");
    }

    #[test]
    fn test_wei_serde_roundtrip() {
        let json = serde_json::to_string(&Wei(123)).unwrap();
        let parsed: Wei = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Wei(123));
    }
}
