//! Cryptographic error types for `hasp-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// Every variant is detected synchronously at the violating call or
/// construction and surfaced immediately — nothing is retried internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Key is not exactly 16 bytes (AES-128).
    #[error("invalid key size: {0} bytes (expected 16)")]
    InvalidKeySize(usize),

    /// Block passed to the cipher is not exactly 16 bytes.
    #[error("invalid block size: {0} bytes (expected 16)")]
    InvalidBlockSize(usize),

    /// Nonce is not exactly 13 bytes.
    #[error("invalid nonce length: {0} bytes (expected 13)")]
    InvalidNonceLength(usize),

    /// MAC length outside `[4, 16]` or odd, or a supplied tag that does not
    /// match the configured length.
    #[error("invalid tag length: {0} bytes (allowed: 4, 6, 8, 10, 12, 14, 16)")]
    InvalidTagLength(usize),

    /// Payload does not fit the 2-byte length field.
    #[error("plaintext too long: {0} bytes (maximum 65535)")]
    PlaintextTooLong(usize),

    /// Authentication tag mismatch — ciphertext, AAD, or tag tampered, or
    /// wrong key. Deliberately carries no detail about how close the match
    /// was.
    #[error("authentication failed: tag mismatch")]
    AuthenticationFailure,
}
