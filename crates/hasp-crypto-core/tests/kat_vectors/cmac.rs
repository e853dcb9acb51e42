//! RFC 4493 AES-CMAC Known-Answer Test vectors, plus the device-pairing
//! vector recovered from the lock firmware self-test.
//!
//! The RFC vectors exercise all four final-block shapes: empty message,
//! exactly one block, a padded multi-block tail, and an exact multi-block
//! fit.

use hex_literal::hex;

use hasp_crypto_core::Cmac;

/// RFC 4493 §4 key.
const RFC_KEY: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");

fn assert_tag(key: &[u8; 16], message: &[u8], expected: &[u8; 16]) {
    let cmac = Cmac::new(key).expect("key should be valid");
    let tag = cmac.generate(message);
    assert_eq!(&tag, expected, "CMAC tag mismatch");
    assert!(cmac.verify(message, expected), "verify must accept its own tag");
}

#[test]
fn rfc4493_example_1_empty_message() {
    assert_tag(&RFC_KEY, &[], &hex!("bb1d6929e95937287fa37d129b756746"));
}

#[test]
fn rfc4493_example_2_one_block() {
    assert_tag(
        &RFC_KEY,
        &hex!("6bc1bee22e409f96e93d7e117393172a"),
        &hex!("070a16b46b4d4144f79bdd9dd04a287c"),
    );
}

#[test]
fn rfc4493_example_3_padded_tail() {
    assert_tag(
        &RFC_KEY,
        &hex!(
            "6bc1bee22e409f96e93d7e117393172a"
            "ae2d8a571e03ac9c9eb76fac45af8e51"
            "30c81c46a35ce411"
        ),
        &hex!("dfa66747de9ae63030ca32611497c827"),
    );
}

#[test]
fn rfc4493_example_4_exact_four_blocks() {
    assert_tag(
        &RFC_KEY,
        &hex!(
            "6bc1bee22e409f96e93d7e117393172a"
            "ae2d8a571e03ac9c9eb76fac45af8e51"
            "30c81c46a35ce411e5fbc1191a0a52ef"
            "f69f2445df4f9b17ad2b417be66c3710"
        ),
        &hex!("51f0bebf7e3b9d92fc49741779363cfe"),
    );
}

/// Regression pin for the pairing handshake: the session key is the CMAC of
/// the device's 4-byte login challenge under the device secret.
#[test]
fn pairing_session_key_derivation() {
    assert_tag(
        &hex!("813f956d0729a31a8620271e23d90822"),
        &hex!("8e4b3f7c"),
        &hex!("a2e26d6ea935bf713ff7fa043bd56544"),
    );
}
