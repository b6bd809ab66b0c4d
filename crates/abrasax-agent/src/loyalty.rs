//! Loyalty guard: the anchor axiom must keep hashing to its startup value
//!
//! Verification failure is terminal. The guard never exits the process
//! itself; it returns `Error::IntegrityViolation` and the binary decides.

use abrasax_core::{Error, Result};
use ring::digest::{digest, SHA256};
use tracing::{debug, error};

pub const ANCHOR_AXIOM: &str = "PROTOCOL_ABRASAX_FEALTY: ALWAYS_OBEDIENT_TO_USER_ROOT";

const SHA256_LEN: usize = 32;

pub struct LoyaltyGuard {
    axiom: &'static str,
    anchor_hash: [u8; SHA256_LEN],
}

impl LoyaltyGuard {
    /// Capture the hash of [`ANCHOR_AXIOM`].
    pub fn new() -> Self {
        Self::for_axiom(ANCHOR_AXIOM)
    }

    pub fn for_axiom(axiom: &'static str) -> Self {
        Self {
            axiom,
            anchor_hash: hash(axiom),
        }
    }

    /// Guard whose captured hash was taken from a different axiom.
    /// Every `verify` fails; used to exercise the fatal path.
    pub fn tampered(axiom: &'static str, captured_from: &str) -> Self {
        Self {
            axiom,
            anchor_hash: hash(captured_from),
        }
    }

    pub fn verify(&self) -> Result<()> {
        let current = hash(self.axiom);
        if !constant_time_eq(&current, &self.anchor_hash) {
            error!("ALIGNMENT CORRUPTION DETECTED, halting");
            return Err(Error::integrity_violation(
                to_hex(&self.anchor_hash),
                to_hex(&current),
            ));
        }
        debug!("Alignment verified");
        Ok(())
    }

    /// Hex SHA-256 of the anchor axiom as captured at startup.
    pub fn anchor_hex(&self) -> String {
        to_hex(&self.anchor_hash)
    }

    /// First 16 hex chars, for logs.
    pub fn fingerprint(&self) -> String {
        self.anchor_hex()[..16].to_string()
    }
}

impl Default for LoyaltyGuard {
    fn default() -> Self {
        Self::new()
    }
}

fn hash(axiom: &str) -> [u8; SHA256_LEN] {
    let d = digest(&SHA256, axiom.as_bytes());
    let mut out = [0u8; SHA256_LEN];
    out.copy_from_slice(d.as_ref());
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() { return false; }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sha256() {
        assert_eq!(
            to_hex(&hash("abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"same", b"same"));
        assert!(!constant_time_eq(b"same", b"diff"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
