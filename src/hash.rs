//! Keyed 64-bit hash primitive: SipHash-2-4 plus the [`RuleHash`] identity type.
//!
//! Every rule in the system is identified by a hash of its content. The hash
//! must be identical across platforms and runs for the same input bytes, so
//! rules re-rendered in a new process map onto the same class names. A single
//! fixed key is used throughout the crate so all call sites agree.

use std::fmt;

/// The fixed 256-bit SipHash key, split into two 64-bit halves.
///
/// Changing this constant changes every generated class name.
const KEY: (u64, u64) = (0x2345_6789_1234_5678, 0x4567_8901_3456_7890);

/// A content-derived 64-bit rule identity.
///
/// Displayed as a fixed-width 16-digit lowercase hex string, suitable for
/// embedding in CSS class names (always behind a leading letter prefix,
/// since CSS identifiers cannot start with a digit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleHash(u64);

impl RuleHash {
    /// Hash a byte string with the system-wide key.
    pub fn of(message: &[u8]) -> Self {
        RuleHash(siphash24(KEY.0, KEY.1, message))
    }

    /// The fold seed: the hash of the empty byte string.
    pub fn seed() -> Self {
        RuleHash::of(b"")
    }

    /// Combine two hashes. Commutative and associative, used to fold a hash
    /// over a collection of strings whose keys have been sorted beforehand.
    pub fn xor(self, other: RuleHash) -> RuleHash {
        RuleHash(self.0 ^ other.0)
    }

    /// Fold the hash of `text` into `self` in place.
    pub fn mix(&mut self, text: &str) {
        *self = self.xor(RuleHash::of(text.as_bytes()));
    }
}

impl fmt::Display for RuleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// SipHash-2-4 with explicit little-endian word loads.
fn siphash24(k0: u64, k1: u64, message: &[u8]) -> u64 {
    let mut v0 = k0 ^ 0x736f_6d65_7073_6575;
    let mut v1 = k1 ^ 0x646f_7261_6e64_6f6d;
    let mut v2 = k0 ^ 0x6c79_6765_6e65_7261;
    let mut v3 = k1 ^ 0x7465_6462_7974_6573;

    let mut round = |m: u64| {
        v3 ^= m;
        for _ in 0..2 {
            v0 = v0.wrapping_add(v1);
            v2 = v2.wrapping_add(v3);
            v1 = v1.rotate_left(13);
            v3 = v3.rotate_left(16);
            v1 ^= v0;
            v3 ^= v2;
            v0 = v0.rotate_left(32);
            v2 = v2.wrapping_add(v1);
            v0 = v0.wrapping_add(v3);
            v1 = v1.rotate_left(17);
            v3 = v3.rotate_left(21);
            v1 ^= v2;
            v3 ^= v0;
            v2 = v2.rotate_left(32);
        }
        v0 ^= m;
    };

    let mut chunks = message.chunks_exact(8);
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        round(u64::from_le_bytes(word));
    }

    // Final word: remaining bytes plus the message length in the top byte.
    let mut last = [0u8; 8];
    last[..chunks.remainder().len()].copy_from_slice(chunks.remainder());
    last[7] = message.len() as u8;
    round(u64::from_le_bytes(last));

    v2 ^= 0xff;
    for _ in 0..4 {
        v0 = v0.wrapping_add(v1);
        v2 = v2.wrapping_add(v3);
        v1 = v1.rotate_left(13);
        v3 = v3.rotate_left(16);
        v1 ^= v0;
        v3 ^= v2;
        v0 = v0.rotate_left(32);
        v2 = v2.wrapping_add(v1);
        v0 = v0.wrapping_add(v3);
        v1 = v1.rotate_left(17);
        v3 = v3.rotate_left(21);
        v1 ^= v2;
        v3 ^= v0;
        v2 = v2.rotate_left(32);
    }

    v0 ^ v1 ^ v2 ^ v3
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_vectors() {
        assert_eq!(RuleHash::of(b"").to_string(), "d264375413d09b14");
        assert_eq!(RuleHash::of(b"0").to_string(), "fed578e303052a76");
    }

    #[test]
    fn test_seed_is_hash_of_empty() {
        assert_eq!(RuleHash::seed(), RuleHash::of(b""));
    }

    #[test]
    fn test_xor_fold_vector() {
        // The identity of a single empty keyframe at offset 0.
        let folded = RuleHash::seed().xor(RuleHash::of(b"0"));
        assert_eq!(folded.to_string(), "2cb14fb710d5b162");
    }

    #[test]
    fn test_xor_commutative_and_associative() {
        let a = RuleHash::of(b"color");
        let b = RuleHash::of(b"red");
        let c = RuleHash::of(b":hover");
        assert_eq!(a.xor(b), b.xor(a));
        assert_eq!(a.xor(b).xor(c), a.xor(b.xor(c)));
    }

    #[test]
    fn test_mix_matches_xor() {
        let mut h = RuleHash::seed();
        h.mix("color");
        assert_eq!(h, RuleHash::seed().xor(RuleHash::of(b"color")));
    }

    #[test]
    fn test_deterministic_across_calls() {
        assert_eq!(RuleHash::of(b"fontFamily"), RuleHash::of(b"fontFamily"));
    }

    #[test]
    fn test_hex_is_fixed_width() {
        // Even a hash with leading zero nibbles renders 16 characters.
        for input in [&b""[..], b"0", b"color", b"margin", b"a", b"bc"] {
            assert_eq!(RuleHash::of(input).to_string().len(), 16);
        }
    }

    #[test]
    fn test_distinct_inputs_distinct_hashes() {
        assert_ne!(RuleHash::of(b"color"), RuleHash::of(b"colour"));
        assert_ne!(RuleHash::of(b"a"), RuleHash::of(b"a\0"));
    }

    #[test]
    fn test_long_input_multiple_blocks() {
        // Exercise the 8-byte block loop and the remainder path together.
        let long = "animation-iteration-count:infinite;margin:0 auto";
        let h1 = RuleHash::of(long.as_bytes());
        let h2 = RuleHash::of(long.as_bytes());
        assert_eq!(h1, h2);
        assert_ne!(h1, RuleHash::of(&long.as_bytes()[..long.len() - 1]));
    }
}
