//! NIST SP 800-38A — ECB-AES128 Known-Answer Test vectors (F.1.1).
//!
//! Single-block encryptions under the standard key
//! `2b7e151628aed2a6abf7158809cf4f3c`; each block of the reference message
//! is one independent ECB invocation.

use hex_literal::hex;

use hasp_crypto_core::BlockCipher;

/// SP 800-38A F.1.1 key.
const KEY: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");

fn assert_block(plaintext: &[u8; 16], expected: &[u8; 16]) {
    let cipher = BlockCipher::new(&KEY).expect("key should be valid");
    let ciphertext = cipher
        .encrypt_block(plaintext)
        .expect("block should be valid");
    assert_eq!(&ciphertext, expected, "SP 800-38A ciphertext mismatch");
}

#[test]
fn sp800_38a_ecb_block_1() {
    assert_block(
        &hex!("6bc1bee22e409f96e93d7e117393172a"),
        &hex!("3ad77bb40d7a3660a89ecaf32466ef97"),
    );
}

#[test]
fn sp800_38a_ecb_block_2() {
    assert_block(
        &hex!("ae2d8a571e03ac9c9eb76fac45af8e51"),
        &hex!("f5d3d58503b9699de785895a96fdbaaf"),
    );
}

#[test]
fn sp800_38a_ecb_block_3() {
    assert_block(
        &hex!("30c81c46a35ce411e5fbc1191a0a52ef"),
        &hex!("43b1cd7f598ece23881b00e3ed030688"),
    );
}

#[test]
fn sp800_38a_ecb_block_4() {
    assert_block(
        &hex!("f69f2445df4f9b17ad2b417be66c3710"),
        &hex!("7b0c785e27e8ad3f8223207104725dd4"),
    );
}
