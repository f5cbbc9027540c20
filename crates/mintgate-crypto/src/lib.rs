//! # mintgate-crypto — Allow-List Commitment Scheme
//!
//! Provides the cryptographic building block of the presale gate: a
//! static commitment to a set of eligible addresses (a 32-byte root)
//! plus a proof-verification function that answers "is this address in
//! the committed set" without the verifier holding the full set.
//!
//! - **Leaf hashing** — `SHA256(0x00 || address_bytes)`.
//! - **Node hashing** — `SHA256(0x01 || min(a,b) || max(a,b))`, the
//!   sorted-pair rule that makes verification independent of sibling
//!   order.
//! - **Commitment** — [`AllowListTree::commit()`] over a deduplicated,
//!   sorted leaf set, so the same root is reproduced from any input
//!   ordering of the addresses.
//!
//! ## Crate Policy
//!
//! - Depends only on `mintgate-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use
//!   real addresses and real SHA-256.
//! - `unsafe` prohibited.

pub mod allowlist;

pub use allowlist::{
    leaf_hash, node_hash, verify_membership, AllowListRoot, AllowListTree, MembershipProof,
};
