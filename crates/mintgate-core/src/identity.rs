//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of the Mintgate stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `SeriesId` where an `Address` is expected.
//!
//! ## Security Invariant
//!
//! The owner capability is a stored `Address` compared for equality at
//! every admin entry point. There is no role hierarchy and no delegation;
//! [`ensure_owner()`] is the entire access-control surface.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MintgateError;

/// A 20-byte wallet or contract identity.
///
/// The all-zero value is the null sentinel: it never identifies a real
/// participant, and components that accept it treat it as "disabled".
///
/// Serializes as a `0x`-prefixed lowercase hex string so addresses can
/// key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The null sentinel identity.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Whether this is the null sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse an address from a hex string, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns `MalformedAddress` unless the input is exactly 40 hex
    /// characters after the optional prefix.
    pub fn from_hex(s: &str) -> Result<Self, MintgateError> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 40 {
            return Err(MintgateError::MalformedAddress(format!(
                "expected 40 hex chars, got {}",
                hex.len()
            )));
        }
        let mut out = [0u8; 20];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|e| MintgateError::MalformedAddress(format!("invalid hex: {e}")))?;
            out[i] = u8::from_str_radix(pair, 16)
                .map_err(|e| MintgateError::MalformedAddress(format!("invalid hex at {i}: {e}")))?;
        }
        Ok(Self(out))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct AddressVisitor;

impl<'de> Visitor<'de> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a 0x-prefixed 40-char hex address")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Address, E> {
        Address::from_hex(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(AddressVisitor)
    }
}

/// Identifier of one token series within the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesId(pub u64);

impl SeriesId {
    /// Access the inner value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "series:{}", self.0)
    }
}

/// Validate that `caller` holds the owner capability.
///
/// Every admin operation in the stack funnels through this check.
pub fn ensure_owner(owner: Address, caller: Address) -> Result<(), MintgateError> {
    if caller != owner {
        return Err(MintgateError::NotOwner { caller });
    }
    Ok(())
}
