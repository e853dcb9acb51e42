//! CCM authenticated encryption (NIST SP 800-38C).
//!
//! This module provides:
//! - [`Ccm::encrypt`] — plaintext + AAD → (ciphertext, tag)
//! - [`Ccm::decrypt`] — ciphertext + tag + AAD → plaintext, or
//!   [`CryptoError::AuthenticationFailure`]
//!
//! The message-length field is fixed at `L = 2` bytes (13-byte nonce,
//! payloads under 64 KiB) — the layout the lock protocol uses on the wire.
//! CCM runs its own CBC-MAC over a formatted block stream; the framing
//! differs from CMAC's subkey masking, so it drives the block cipher
//! directly rather than reusing [`crate::Cmac`].
//!
//! An engine instance is bound to one nonce for its lifetime. Reusing a
//! (key, nonce) pair across two different messages destroys both
//! confidentiality and authenticity — nonce uniqueness is the caller's
//! contract; the engine does not track it.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{xor_in_place, BlockCipher, BLOCK_LEN};
use crate::cmac::constant_time_eq;
use crate::error::CryptoError;

/// Width of the message-length field in bytes (the CCM parameter `L`).
pub const LENGTH_FIELD_LEN: usize = 2;

/// Nonce length in bytes: `15 - L`.
pub const NONCE_LEN: usize = 15 - LENGTH_FIELD_LEN;

/// Smallest permitted tag length.
pub const MIN_TAG_LEN: usize = 4;

/// Largest permitted tag length (one full block).
pub const MAX_TAG_LEN: usize = BLOCK_LEN;

/// Maximum payload length: `2^(8·L) - 1`.
pub const MAX_PAYLOAD_LEN: usize = (1 << (8 * LENGTH_FIELD_LEN)) - 1;

/// Flags byte shared by all counter blocks: bits 2-0 hold `L - 1`.
const CTR_FLAGS: u8 = (LENGTH_FIELD_LEN - 1) as u8;

/// Associated data below `2^16 - 2^8` bytes uses the plain 2-byte length
/// header; longer AAD switches to the sentinel forms.
const AAD_SHORT_LIMIT: u64 = (1 << 16) - (1 << 8);

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// CCM engine bound to one key, one nonce, and one tag length.
///
/// Derived state is read-only after construction; working buffers are local
/// to each call, so one instance can serve concurrent callers. Nonce and
/// schedule are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Ccm {
    cipher: BlockCipher,
    nonce: [u8; NONCE_LEN],
    mac_len: usize,
}

impl Ccm {
    /// Build a CCM engine from a 16-byte key, a 13-byte nonce, and the tag
    /// length to produce on encryption and require on decryption.
    ///
    /// # Errors
    ///
    /// - `CryptoError::InvalidTagLength` if `mac_len` is odd or outside
    ///   `[4, 16]`
    /// - `CryptoError::InvalidNonceLength` if the nonce is not 13 bytes
    /// - `CryptoError::InvalidKeySize` if the key is not 16 bytes
    pub fn new(key: &[u8], nonce: &[u8], mac_len: usize) -> Result<Self, CryptoError> {
        if !(MIN_TAG_LEN..=MAX_TAG_LEN).contains(&mac_len) || mac_len % 2 != 0 {
            return Err(CryptoError::InvalidTagLength(mac_len));
        }
        if nonce.len() != NONCE_LEN {
            return Err(CryptoError::InvalidNonceLength(nonce.len()));
        }
        let cipher = BlockCipher::new(key)?;

        let mut fixed = [0u8; NONCE_LEN];
        fixed.copy_from_slice(nonce);

        Ok(Self {
            cipher,
            nonce: fixed,
            mac_len,
        })
    }

    /// Encrypt `plaintext`, authenticating it together with `aad`.
    ///
    /// Returns the ciphertext (same length as the plaintext) and the
    /// `mac_len`-byte tag. The AAD is authenticated but travels in the
    /// clear.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::PlaintextTooLong` if the plaintext does not fit
    /// the 2-byte length field (65 536 bytes or more).
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        if plaintext.len() > MAX_PAYLOAD_LEN {
            return Err(CryptoError::PlaintextTooLong(plaintext.len()));
        }

        let mut mac = self.cbc_mac(aad, plaintext);
        let s0 = self.cipher.encrypt_array(&self.counter_block(0));
        let ciphertext = self.ctr_xor(plaintext);

        xor_in_place(&mut mac, &s0);
        let tag = mac[..self.mac_len].to_vec();
        mac.zeroize();

        Ok((ciphertext, tag))
    }

    /// Decrypt `ciphertext` and verify `tag` over the AAD and the recovered
    /// plaintext.
    ///
    /// The plaintext is returned only when the recomputed tag matches the
    /// supplied one; on mismatch the recovered bytes are zeroized and
    /// `AuthenticationFailure` is returned, so callers never observe
    /// unauthenticated data.
    ///
    /// # Errors
    ///
    /// - `CryptoError::InvalidTagLength` if `tag` is not `mac_len` bytes
    /// - `CryptoError::PlaintextTooLong` if the ciphertext exceeds the
    ///   2-byte length field
    /// - `CryptoError::AuthenticationFailure` on tag mismatch
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if tag.len() != self.mac_len {
            return Err(CryptoError::InvalidTagLength(tag.len()));
        }
        if ciphertext.len() > MAX_PAYLOAD_LEN {
            return Err(CryptoError::PlaintextTooLong(ciphertext.len()));
        }

        // Counter mode is its own inverse.
        let mut plaintext = self.ctr_xor(ciphertext);

        let mut mac = self.cbc_mac(aad, &plaintext);
        let s0 = self.cipher.encrypt_array(&self.counter_block(0));
        xor_in_place(&mut mac, &s0);

        let ok = constant_time_eq(&mac[..self.mac_len], tag);
        mac.zeroize();
        if ok {
            Ok(plaintext)
        } else {
            plaintext.zeroize();
            Err(CryptoError::AuthenticationFailure)
        }
    }

    /// Format `B0`, the block that starts the authentication chain:
    /// flags, nonce, big-endian payload length.
    fn format_b0(&self, aad_present: bool, payload_len: u16) -> [u8; BLOCK_LEN] {
        // mac_len is validated to [4, 16] at construction.
        #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
        let tag_bits = ((self.mac_len as u8 - 2) / 2) << 3;

        let mut b0 = [0u8; BLOCK_LEN];
        b0[0] = (u8::from(aad_present) << 6) | tag_bits | CTR_FLAGS;
        b0[1..=NONCE_LEN].copy_from_slice(&self.nonce);
        b0[BLOCK_LEN - LENGTH_FIELD_LEN..].copy_from_slice(&payload_len.to_be_bytes());
        b0
    }

    /// Counter block `A_i`: flags, nonce, big-endian counter.
    fn counter_block(&self, counter: u16) -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        block[0] = CTR_FLAGS;
        block[1..=NONCE_LEN].copy_from_slice(&self.nonce);
        block[BLOCK_LEN - LENGTH_FIELD_LEN..].copy_from_slice(&counter.to_be_bytes());
        block
    }

    /// CBC-MAC over `B0 ∥ formatted(aad) ∥ formatted(payload)`.
    ///
    /// The chain starts at zero; each block is XORed into the running value
    /// and encrypted. No final subkey step — the value after the last block
    /// is the raw MAC.
    fn cbc_mac(&self, aad: &[u8], payload: &[u8]) -> [u8; BLOCK_LEN] {
        // payload.len() is checked against MAX_PAYLOAD_LEN by both callers.
        #[allow(clippy::cast_possible_truncation)]
        let payload_len = payload.len() as u16;

        let mut mac = [0u8; BLOCK_LEN];
        self.absorb(&mut mac, &self.format_b0(!aad.is_empty(), payload_len));

        if !aad.is_empty() {
            let mut framed = aad_length_header(aad.len());
            framed.extend_from_slice(aad);
            self.absorb_padded(&mut mac, &framed);
            framed.zeroize();
        }
        if !payload.is_empty() {
            self.absorb_padded(&mut mac, payload);
        }
        mac
    }

    /// XOR one block into the running MAC value and encrypt.
    fn absorb(&self, mac: &mut [u8; BLOCK_LEN], block: &[u8; BLOCK_LEN]) {
        xor_in_place(mac, block);
        *mac = self.cipher.encrypt_array(mac);
    }

    /// Absorb `data` in 16-byte blocks, zero-padding the final partial one.
    fn absorb_padded(&self, mac: &mut [u8; BLOCK_LEN], data: &[u8]) {
        for chunk in data.chunks(BLOCK_LEN) {
            let mut block = [0u8; BLOCK_LEN];
            block[..chunk.len()].copy_from_slice(chunk);
            self.absorb(mac, &block);
        }
    }

    /// XOR `data` against the keystream from counters 1, 2, ….
    ///
    /// Encryption and decryption are the same operation; a final partial
    /// chunk consumes only the prefix of its keystream block.
    fn ctr_xor(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        for (index, chunk) in data.chunks(BLOCK_LEN).enumerate() {
            // data is at most MAX_PAYLOAD_LEN bytes, so at most 4096 chunks.
            #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
            let counter = index as u16 + 1;
            let keystream = self.cipher.encrypt_array(&self.counter_block(counter));
            out.extend(chunk.iter().zip(keystream).map(|(byte, mask)| byte ^ mask));
        }
        out
    }
}

/// Length header prepended to non-empty associated data (SP 800-38C A.2.2):
/// a plain 2-byte length, or `0xFFFE`/`0xFFFF` sentinel forms with 4- and
/// 8-byte lengths for larger AAD.
// Each arm's magnitude guard makes its narrowing cast lossless.
#[allow(clippy::cast_possible_truncation)]
fn aad_length_header(len: usize) -> Vec<u8> {
    let len = len as u64;
    let mut header = Vec::with_capacity(10);
    if len < AAD_SHORT_LIMIT {
        header.extend_from_slice(&(len as u16).to_be_bytes());
    } else if len <= u64::from(u32::MAX) {
        header.extend_from_slice(&[0xff, 0xfe]);
        header.extend_from_slice(&(len as u32).to_be_bytes());
    } else {
        header.extend_from_slice(&[0xff, 0xff]);
        header.extend_from_slice(&len.to_be_bytes());
    }
    header
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
