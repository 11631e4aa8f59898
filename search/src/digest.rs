//! Canonical bytes and content hashes for run artifacts.
//!
//! Canonical JSON here means compact `serde_json` output with object keys in
//! lexicographic byte order at every level. Digests are SHA-256 over a
//! null-terminated domain prefix followed by the payload, rendered as
//! `"sha256:<hex>"`.

use sha2::{Digest, Sha256};

/// Domain prefix for run report hashing.
pub const DOMAIN_RUN_REPORT: &[u8] = b"WAYPOINT::RUN_REPORT::V1\0";

/// Domain prefix for solution path hashing.
pub const DOMAIN_SOLUTION_PATH: &[u8] = b"WAYPOINT::SOLUTION_PATH::V1\0";

/// Every hash domain in use.
pub const ALL_DOMAINS: [&[u8]; 2] = [DOMAIN_RUN_REPORT, DOMAIN_SOLUTION_PATH];

/// A content-addressed hash with algorithm identifier.
///
/// Invariant: the inner string contains exactly one `:` separator with
/// non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 of `domain || data`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{digest}"),
    }
}

/// Compact JSON bytes with sorted object keys.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if serialization fails.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&sorted(value))
}

// Rebuilding objects in sorted insertion order keeps the output sorted even
// when serde_json's `preserve_order` feature is enabled somewhere in the build.
fn sorted(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for key in keys {
                out.insert(key.clone(), sorted(&map[key]));
            }
            serde_json::Value::Object(out)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(sorted).collect())
        }
        other => other.clone(),
    }
}
