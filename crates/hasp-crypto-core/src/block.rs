//! AES-128 single-block encryption engine.
//!
//! This module provides:
//! - [`BlockCipher`] — a 16-byte key expanded once into an immutable
//!   round-key schedule
//! - [`BlockCipher::encrypt_block`] — the forward AES permutation over one
//!   16-byte block
//!
//! Only the forward direction exists: CMAC authenticates and CCM's counter
//! mode decrypts with the same permutation, so the inverse cipher is never
//! needed. Correctness is pinned against the FIPS-197 known-answer vectors.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Cipher block length in bytes (128 bits).
pub const BLOCK_LEN: usize = 16;

/// Key length in bytes (AES-128).
pub const KEY_LEN: usize = 16;

/// Number of encryption rounds for a 128-bit key.
const NUM_ROUNDS: usize = 10;

/// Words in the expanded schedule: 4 × (rounds + 1).
const SCHEDULE_WORDS: usize = 44;

/// The AES substitution box (FIPS-197 figure 7).
static SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Round constants for key expansion, indexed by `word / 4`.
static RCON: [u8; 11] = [
    0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// AES-128 block cipher with a precomputed round-key schedule.
///
/// The schedule is derived once at construction and never mutated, so one
/// instance can be shared read-only across threads. The schedule is zeroized
/// when the cipher is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BlockCipher {
    /// Expanded key schedule: 44 four-byte words (11 round keys).
    schedule: [[u8; 4]; SCHEDULE_WORDS],
}

impl BlockCipher {
    /// Build a cipher from a 16-byte key, expanding the round-key schedule.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeySize` if the key is not exactly
    /// 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeySize(key.len()));
        }

        let mut schedule = [[0u8; 4]; SCHEDULE_WORDS];
        for (word, chunk) in schedule.iter_mut().zip(key.chunks_exact(4)) {
            word.copy_from_slice(chunk);
        }

        // Word indices stay within 4..44 and word / 4 is at most 10.
        #[allow(clippy::arithmetic_side_effects)]
        for i in 4..SCHEDULE_WORDS {
            let mut temp = schedule[i - 1];
            if i % 4 == 0 {
                temp.rotate_left(1);
                for byte in &mut temp {
                    *byte = SBOX[usize::from(*byte)];
                }
                temp[0] ^= RCON[i / 4];
            }
            for (t, prev) in temp.iter_mut().zip(schedule[i - 4]) {
                *t ^= prev;
            }
            schedule[i] = temp;
        }

        Ok(Self { schedule })
    }

    /// Encrypt a single 16-byte block.
    ///
    /// Pure function of the schedule and the input — no state survives the
    /// call, so concurrent callers need no coordination.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidBlockSize` if the input is not exactly
    /// 16 bytes.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<[u8; BLOCK_LEN], CryptoError> {
        if block.len() != BLOCK_LEN {
            return Err(CryptoError::InvalidBlockSize(block.len()));
        }

        let mut state = [0u8; BLOCK_LEN];
        state.copy_from_slice(block);
        Ok(self.encrypt_array(&state))
    }

    /// Encrypt a block whose length is statically known.
    ///
    /// Internal entry point for CMAC and CCM, which only ever operate on
    /// fixed 16-byte buffers.
    pub(crate) fn encrypt_array(&self, block: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
        let mut state = *block;

        self.add_round_key(&mut state, 0);
        for round in 1..NUM_ROUNDS {
            sub_bytes(&mut state);
            shift_rows(&mut state);
            mix_columns(&mut state);
            self.add_round_key(&mut state, round);
        }
        sub_bytes(&mut state);
        shift_rows(&mut state);
        self.add_round_key(&mut state, NUM_ROUNDS);

        state
    }

    /// XOR round key `round` (schedule words `4·round ..`) into the state.
    fn add_round_key(&self, state: &mut [u8; BLOCK_LEN], round: usize) {
        // round is at most NUM_ROUNDS, so 4 * round + 3 < SCHEDULE_WORDS.
        #[allow(clippy::arithmetic_side_effects)]
        let words = &self.schedule[round * 4..];
        for (chunk, word) in state.chunks_exact_mut(4).zip(words) {
            for (byte, key_byte) in chunk.iter_mut().zip(word) {
                *byte ^= key_byte;
            }
        }
    }
}

/// XOR `src` into `dst` byte by byte.
pub(crate) fn xor_in_place(dst: &mut [u8; BLOCK_LEN], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

// ---------------------------------------------------------------------------
// Round transforms
// ---------------------------------------------------------------------------

/// Substitute every state byte through the S-box.
fn sub_bytes(state: &mut [u8; BLOCK_LEN]) {
    for byte in state {
        *byte = SBOX[usize::from(*byte)];
    }
}

/// Rotate row `r` of the 4×4 state left by `r` positions (row 0 is fixed).
///
/// The state is byte-major in 4-byte groups, so row `r` occupies indices
/// `r, r + 4, r + 8, r + 12`.
fn shift_rows(state: &mut [u8; BLOCK_LEN]) {
    // Row 1: rotate left by one.
    let tmp = state[1];
    state[1] = state[5];
    state[5] = state[9];
    state[9] = state[13];
    state[13] = tmp;

    // Row 2: rotate left by two.
    state.swap(2, 10);
    state.swap(6, 14);

    // Row 3: rotate left by three (right by one).
    let tmp = state[15];
    state[15] = state[11];
    state[11] = state[7];
    state[7] = state[3];
    state[3] = tmp;
}

/// Double a field element in GF(2^8), reducing by the AES polynomial 0x11B.
const fn xtime(value: u8) -> u8 {
    if value & 0x80 == 0 {
        value << 1
    } else {
        (value << 1) ^ 0x1b
    }
}

/// Mix one 4-byte column via the fixed GF(2^8) linear transform.
fn mix_single_column(column: &mut [u8]) {
    let all = column[0] ^ column[1] ^ column[2] ^ column[3];
    let first = column[0];
    column[0] ^= all ^ xtime(column[0] ^ column[1]);
    column[1] ^= all ^ xtime(column[1] ^ column[2]);
    column[2] ^= all ^ xtime(column[2] ^ column[3]);
    column[3] ^= all ^ xtime(column[3] ^ first);
}

fn mix_columns(state: &mut [u8; BLOCK_LEN]) {
    for column in state.chunks_exact_mut(4) {
        mix_single_column(column);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
