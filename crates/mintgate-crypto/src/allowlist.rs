//! # Allow-List Commitment and Membership Proofs
//!
//! A sorted-pair Merkle tree over a set of addresses. The owner commits
//! the set off-line, stores only the 32-byte root in the gate, and each
//! presale caller carries the sibling path proving its own leaf.
//!
//! ## Algorithm
//!
//! Domain-separated SHA-256:
//! - Leaf: `SHA256(0x00 || address_bytes)` for a 20-byte address.
//! - Node: `SHA256(0x01 || lo || hi)` where `(lo, hi)` is the byte-wise
//!   sorted pair of the two children.
//!
//! Leaves are deduplicated and sorted before pairing, so the commitment
//! is a function of the address *set*, not of any insertion order. An
//! odd node at the end of a level is carried up unpaired.
//!
//! ## Security Invariant
//!
//! [`verify_membership()`] never errors — malformed or mismatched input
//! verifies `false`. Replacing the committed root invalidates every
//! proof built against the old set.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use mintgate_core::{Address, MintgateError};

// ---------------------------------------------------------------------------
// Core hashing (domain-separated SHA-256)
// ---------------------------------------------------------------------------

const LEAF_TAG: u8 = 0x00;
const NODE_TAG: u8 = 0x01;

/// Compute SHA-256 of raw bytes.
fn sha256_raw(b: &[u8]) -> [u8; 32] {
    let hash = Sha256::digest(b);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    out
}

/// Compute the leaf hash for an address: `SHA256(0x00 || address)`.
pub fn leaf_hash(address: &Address) -> [u8; 32] {
    let mut input = Vec::with_capacity(21);
    input.push(LEAF_TAG);
    input.extend_from_slice(address.as_bytes());
    sha256_raw(&input)
}

/// Compute a parent node hash: `SHA256(0x01 || lo || hi)`.
///
/// The children are byte-wise sorted before hashing, so
/// `node_hash(a, b) == node_hash(b, a)`. Verification therefore does not
/// need to know which side each sibling was on.
pub fn node_hash(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut input = Vec::with_capacity(65);
    input.push(NODE_TAG);
    input.extend_from_slice(lo);
    input.extend_from_slice(hi);
    sha256_raw(&input)
}

// ---------------------------------------------------------------------------
// Root commitment
// ---------------------------------------------------------------------------

/// The 32-byte commitment to an allow-list.
///
/// The all-zero value is the unset sentinel; no non-empty address set
/// commits to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowListRoot(pub [u8; 32]);

impl AllowListRoot {
    /// The unset sentinel.
    pub const ZERO: AllowListRoot = AllowListRoot([0u8; 32]);

    /// Whether this is the unset sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Render the root as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a root from a 64-char hex string.
    pub fn from_hex(s: &str) -> Result<Self, MintgateError> {
        let hex = s.trim();
        if hex.len() != 64 {
            return Err(MintgateError::MalformedDigest(format!(
                "expected 64 hex chars, got {}",
                hex.len()
            )));
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|e| MintgateError::MalformedDigest(format!("invalid hex: {e}")))?;
            out[i] = u8::from_str_radix(pair, 16)
                .map_err(|e| MintgateError::MalformedDigest(format!("invalid hex at {i}: {e}")))?;
        }
        Ok(Self(out))
    }
}

impl std::fmt::Display for AllowListRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Membership proof
// ---------------------------------------------------------------------------

/// An ordered sequence of sibling hashes from a leaf up to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// Sibling hashes, leaf level first.
    pub siblings: Vec<[u8; 32]>,
}

impl MembershipProof {
    /// A proof with no siblings (valid only for a single-leaf tree).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of siblings in the path.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Whether the path carries no siblings.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

/// Verify that `leaf` is committed under `root` via `proof`.
///
/// Folds the leaf through the sibling sequence with the sorted-pair node
/// hash and compares the result against the root. Returns `false` for
/// any mismatch — an empty proof matches only the degenerate single-leaf
/// tree whose root *is* the leaf, and a path of zero-filled sentinel
/// hashes reconstructs a root no non-empty address set commits to.
pub fn verify_membership(proof: &MembershipProof, root: &AllowListRoot, leaf: &[u8; 32]) -> bool {
    let mut cur = *leaf;
    for sibling in &proof.siblings {
        cur = node_hash(&cur, sibling);
    }
    cur == root.0
}

// ---------------------------------------------------------------------------
// Tree construction and proof generation
// ---------------------------------------------------------------------------

/// A fully materialized allow-list commitment tree.
///
/// Held by whoever maintains the allow-list (typically off-line tooling);
/// the gate itself stores only the [`AllowListRoot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowListTree {
    /// All levels, leaves first. The last level is the single root.
    levels: Vec<Vec<[u8; 32]>>,
}

impl AllowListTree {
    /// Commit to an address set.
    ///
    /// Leaves are hashed, deduplicated, and sorted, so any ordering (and
    /// any duplication) of the input produces the same tree.
    ///
    /// # Errors
    ///
    /// Returns `EmptyAllowList` for an empty input.
    pub fn commit(addresses: &[Address]) -> Result<Self, MintgateError> {
        if addresses.is_empty() {
            return Err(MintgateError::EmptyAllowList);
        }

        let mut leaves: Vec<[u8; 32]> = addresses.iter().map(leaf_hash).collect();
        leaves.sort_unstable();
        leaves.dedup();

        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let prev = &levels[levels.len() - 1];
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                if pair.len() == 2 {
                    next.push(node_hash(&pair[0], &pair[1]));
                } else {
                    // Odd node: carried up unpaired.
                    next.push(pair[0]);
                }
            }
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// The committed root.
    pub fn root(&self) -> AllowListRoot {
        AllowListRoot(self.levels[self.levels.len() - 1][0])
    }

    /// Number of distinct committed addresses.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Whether this address is in the committed set.
    pub fn contains(&self, address: &Address) -> bool {
        self.levels[0].binary_search(&leaf_hash(address)).is_ok()
    }

    /// Produce the sibling path proving `address` is committed.
    ///
    /// # Errors
    ///
    /// Returns `NotWhitelisted` for an address outside the committed set.
    pub fn prove(&self, address: &Address) -> Result<MembershipProof, MintgateError> {
        let leaf = leaf_hash(address);
        let mut pos = self.levels[0]
            .binary_search(&leaf)
            .map_err(|_| MintgateError::NotWhitelisted(*address))?;

        let mut siblings = Vec::with_capacity(self.levels.len() - 1);
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_pos = pos ^ 1;
            if sibling_pos < level.len() {
                siblings.push(level[sibling_pos]);
            }
            pos /= 2;
        }

        Ok(MembershipProof { siblings })
    }
}
