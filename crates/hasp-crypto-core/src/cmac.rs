//! CMAC message authentication (NIST SP 800-38B).
//!
//! This module provides:
//! - [`Cmac::generate`] — a 16-byte tag over an arbitrary-length message
//! - [`Cmac::verify`] — recompute and compare without short-circuiting
//!
//! Two subkeys are derived from the block cipher once at construction: `K1`
//! masks a complete final block, `K2` masks a padded one. The lock protocol
//! uses this engine to turn the device secret and a login challenge into the
//! per-session key.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{xor_in_place, BlockCipher, BLOCK_LEN};
use crate::error::CryptoError;

/// CMAC tag length in bytes (always one full cipher block).
pub const TAG_LEN: usize = BLOCK_LEN;

/// Subkey-derivation constant `Rb` from SP 800-38B §5.3.
const RB: [u8; BLOCK_LEN] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x87];

/// Constant-time byte comparison for authentication tags.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// Uses bitwise OR accumulation to avoid short-circuit timing leaks.
///
/// Note: The early return on length mismatch is acceptable because tag
/// lengths are public information — the constant-time property protects the
/// *tag value*, not its length.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Shift a 16-byte string left by one bit, carrying across byte boundaries.
fn left_shift(block: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let mut out = [0u8; BLOCK_LEN];
    let mut carry = 0u8;
    for (o, b) in out.iter_mut().zip(block.iter()).rev() {
        *o = (b << 1) | carry;
        carry = (b & 0x80) >> 7;
    }
    out
}

/// Derive the next subkey: left shift, folding in `Rb` when the high bit
/// falls off (SP 800-38B §6.1).
fn derive_subkey(block: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let mut subkey = left_shift(block);
    if block[0] & 0x80 != 0 {
        xor_in_place(&mut subkey, &RB);
    }
    subkey
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// CMAC engine: a block cipher plus the two derived subkeys.
///
/// Subkeys are computed once at construction and never mutated, so one
/// instance can be shared read-only across threads. Both subkeys and the
/// underlying schedule are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Cmac {
    cipher: BlockCipher,
    /// Masks a complete final block.
    k1: [u8; BLOCK_LEN],
    /// Masks a padded final block.
    k2: [u8; BLOCK_LEN],
}

impl Cmac {
    /// Build a CMAC engine from a 16-byte key.
    ///
    /// Encrypts the all-zero block to obtain `L`, then derives `K1` from `L`
    /// and `K2` from `K1`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeySize` if the key is not exactly
    /// 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let cipher = BlockCipher::new(key)?;

        let mut l = cipher.encrypt_array(&[0u8; BLOCK_LEN]);
        let k1 = derive_subkey(&l);
        let k2 = derive_subkey(&k1);
        l.zeroize();

        Ok(Self { cipher, k1, k2 })
    }

    /// Compute the 16-byte tag over `message`.
    ///
    /// A non-empty message whose length is an exact block multiple keeps its
    /// final block as-is, masked with `K1`; any other message is padded with
    /// `0x80` then zeros and masked with `K2` (an empty message becomes one
    /// all-padding block). Every byte string has a tag — this cannot fail.
    #[must_use]
    pub fn generate(&self, message: &[u8]) -> [u8; TAG_LEN] {
        // rem < BLOCK_LEN, and the complete-block branch implies
        // message.len() >= BLOCK_LEN, so neither subtraction underflows.
        #[allow(clippy::arithmetic_side_effects)]
        let (chain, tail) = if message.is_empty() || message.len() % BLOCK_LEN != 0 {
            message.split_at(message.len() - message.len() % BLOCK_LEN)
        } else {
            message.split_at(message.len() - BLOCK_LEN)
        };

        let mut last = [0u8; BLOCK_LEN];
        last[..tail.len()].copy_from_slice(tail);
        if tail.len() == BLOCK_LEN {
            xor_in_place(&mut last, &self.k1);
        } else {
            last[tail.len()] = 0x80;
            xor_in_place(&mut last, &self.k2);
        }

        let mut running = [0u8; BLOCK_LEN];
        for block in chain.chunks_exact(BLOCK_LEN) {
            xor_in_place(&mut running, block);
            running = self.cipher.encrypt_array(&running);
        }
        xor_in_place(&mut running, &last);
        last.zeroize();

        self.cipher.encrypt_array(&running)
    }

    /// Recompute the tag for `message` and compare it against `tag`.
    ///
    /// The comparison accumulates XOR differences across every byte position
    /// instead of returning at the first mismatch, so verification time does
    /// not depend on how many tag bytes happen to match.
    #[must_use]
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        let mut expected = self.generate(message);
        let ok = constant_time_eq(&expected, tag);
        expected.zeroize();
        ok
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
