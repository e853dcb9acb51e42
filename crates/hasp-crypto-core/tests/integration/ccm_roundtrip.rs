//! Integration tests for CCM encrypt→decrypt at realistic payload sizes,
//! including both edges of the 2-byte length field.

use hasp_crypto_core::{Ccm, CryptoError, MAX_PAYLOAD_LEN};

/// Integration key — 16 bytes of 0xDD.
const INT_KEY: [u8; 16] = [0xDD; 16];

/// Integration nonce — 13 bytes of 0x07.
const INT_NONCE: [u8; 13] = [0x07; 13];

fn roundtrip(payload_len: usize, fill: u8) {
    let ccm = Ccm::new(&INT_KEY, &INT_NONCE, 8).expect("parameters should be valid");
    let plaintext = vec![fill; payload_len];
    let (ciphertext, tag) = ccm
        .encrypt(&plaintext, b"frame-header")
        .expect("encrypt should succeed");
    let recovered = ccm
        .decrypt(&ciphertext, &tag, b"frame-header")
        .expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn roundtrip_1kb_payload() {
    roundtrip(1024, 0x42);
}

#[test]
fn roundtrip_4kb_payload() {
    roundtrip(4096, 0x55);
}

#[test]
fn roundtrip_around_block_boundary() {
    for payload_len in 15..=17 {
        roundtrip(payload_len, 0x77);
    }
}

#[test]
fn roundtrip_single_byte_payload() {
    roundtrip(1, 0x99);
}

#[test]
fn roundtrip_at_maximum_payload() {
    // 65 535 bytes: the largest value the 2-byte length field can encode.
    roundtrip(MAX_PAYLOAD_LEN, 0x24);
}

#[test]
fn one_past_maximum_payload_is_rejected() {
    let ccm = Ccm::new(&INT_KEY, &INT_NONCE, 8).expect("parameters should be valid");
    let plaintext = vec![0u8; MAX_PAYLOAD_LEN + 1];
    assert_eq!(
        ccm.encrypt(&plaintext, &[]).err(),
        Some(CryptoError::PlaintextTooLong(MAX_PAYLOAD_LEN + 1))
    );
}

#[test]
fn engine_is_shareable_across_threads() {
    let ccm = Ccm::new(&INT_KEY, &INT_NONCE, 8).expect("parameters should be valid");

    std::thread::scope(|scope| {
        for worker in 0u8..4 {
            let ccm = &ccm;
            scope.spawn(move || {
                let plaintext = vec![worker; 256];
                let (ciphertext, tag) = ccm
                    .encrypt(&plaintext, &[worker])
                    .expect("encrypt should succeed");
                let recovered = ccm
                    .decrypt(&ciphertext, &tag, &[worker])
                    .expect("decrypt should succeed");
                assert_eq!(recovered, plaintext);
            });
        }
    });
}
