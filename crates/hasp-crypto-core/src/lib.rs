//! `hasp-crypto-core` — Pure cryptographic primitives for HASP.
//!
//! This crate is the audit target: zero network, zero async, zero transport
//! dependencies. It implements the lock protocol's symmetric stack from
//! scratch — an AES-128 block cipher, CMAC on top of it (NIST SP 800-38B),
//! and CCM authenticated encryption on top of both (NIST SP 800-38C). Keys,
//! nonces, and message bytes come from the caller; byte sequences or a
//! pass/fail verdict go back. How those bytes travel (BLE transport, session
//! establishment, retries) and what they mean is someone else's problem.
//!
//! Engines derive their state (round-key schedule, CMAC subkeys) once at
//! construction and are read-only afterwards, so a constructed engine can be
//! shared across threads. A [`Ccm`] instance is bound to one nonce; never
//! reuse a (key, nonce) pair for two different messages.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod block;
pub mod ccm;
pub mod cmac;
pub mod error;

pub use block::{BlockCipher, BLOCK_LEN, KEY_LEN};
pub use ccm::{Ccm, MAX_PAYLOAD_LEN, MAX_TAG_LEN, MIN_TAG_LEN, NONCE_LEN};
pub use cmac::{Cmac, TAG_LEN};
pub use error::CryptoError;
