//! Cross-cutting round trips: every block cipher through every mode of
//! operation, with padding where the mode needs it.

use cryptex_crypto::aes::Aes;
use cryptex_crypto::blowfish::Blowfish;
use cryptex_crypto::cipher::BlockCipher;
use cryptex_crypto::des::Des;
use cryptex_crypto::modes::{Cbc, Cfb, Ctr, Ecb, Gcm, Ofb};
use cryptex_crypto::padding::Scheme;
use cryptex_crypto::rc5::Rc5;
use cryptex_crypto::sm4::Sm4;
use cryptex_crypto::twofish::Twofish;

/// Drive one cipher through all unauthenticated modes.
fn exercise_modes<C: BlockCipher>(cipher: &C, label: &str) {
    let block_size = cipher.block_size();
    let iv: Vec<u8> = (1..=block_size as u8).collect();
    let message: Vec<u8> = (0..97u8).map(|i| i.wrapping_mul(59)).collect();

    // Block-aligned modes, with a padding scheme in front.
    let ecb = Ecb::new(cipher);
    let padded = Scheme::Pkcs7.pad(&message, block_size).unwrap();
    let ct = ecb.encrypt(&padded).unwrap();
    let recovered = Scheme::Pkcs7.unpad(&ecb.decrypt(&ct).unwrap()).unwrap();
    assert_eq!(recovered, message, "{label} / ecb+pkcs7");

    let cbc = Cbc::new(cipher, &iv).unwrap();
    let padded = Scheme::Iso7816.pad(&message, block_size).unwrap();
    let ct = cbc.encrypt(&padded).unwrap();
    let recovered = Scheme::Iso7816.unpad(&cbc.decrypt(&ct).unwrap()).unwrap();
    assert_eq!(recovered, message, "{label} / cbc+iso7816");

    // Streaming modes take the message as-is.
    let cfb = Cfb::new(cipher, &iv).unwrap();
    let ct = cfb.encrypt(&message).unwrap();
    assert_eq!(ct.len(), message.len(), "{label} / cfb length");
    assert_eq!(cfb.decrypt(&ct).unwrap(), message, "{label} / cfb");

    let cfb1 = Cfb::new(cipher, &iv).unwrap().with_segment_size(1).unwrap();
    let ct = cfb1.encrypt(&message).unwrap();
    assert_eq!(cfb1.decrypt(&ct).unwrap(), message, "{label} / cfb-1");

    let ofb = Ofb::new(cipher, &iv).unwrap();
    let ct = ofb.encrypt(&message).unwrap();
    assert_eq!(ct.len(), message.len(), "{label} / ofb length");
    assert_eq!(ofb.decrypt(&ct).unwrap(), message, "{label} / ofb");

    let ctr = Ctr::new(cipher, &iv).unwrap();
    let ct = ctr.encrypt(&message).unwrap();
    assert_eq!(ct.len(), message.len(), "{label} / ctr length");
    assert_eq!(ctr.decrypt(&ct).unwrap(), message, "{label} / ctr");
}

#[test]
fn aes_all_modes() {
    exercise_modes(&Aes::new(&[0x11; 16]).unwrap(), "aes-128");
    exercise_modes(&Aes::new(&[0x22; 24]).unwrap(), "aes-192");
    exercise_modes(&Aes::new(&[0x33; 32]).unwrap(), "aes-256");
}

#[test]
fn des_all_modes() {
    exercise_modes(&Des::new(b"a des ky").unwrap(), "des");
}

#[test]
fn sm4_all_modes() {
    exercise_modes(&Sm4::new(&[0x44; 16]).unwrap(), "sm4");
}

#[test]
fn blowfish_all_modes() {
    exercise_modes(&Blowfish::new(b"blowfish secret").unwrap(), "blowfish");
}

#[test]
fn twofish_all_modes() {
    exercise_modes(&Twofish::new(&[0x55; 32]).unwrap(), "twofish");
}

#[test]
fn rc5_all_modes() {
    exercise_modes(&Rc5::new(&[0x66; 16]).unwrap(), "rc5");
    exercise_modes(&Rc5::with_params(&[0x77; 8], 20, 32).unwrap(), "rc5-32/20/8");
}

fn seal_and_open<C: BlockCipher>(cipher: &C, label: &str) -> Vec<u8> {
    let nonce = [0x42u8; 12];
    let aad = b"bound but not encrypted";
    let message = b"the same aead construction over three different ciphers";

    let gcm = Gcm::new(cipher).unwrap();
    let sealed = gcm.seal(&nonce, message, aad).unwrap();
    assert_eq!(
        gcm.open(&nonce, &sealed, aad).unwrap(),
        message,
        "{label} / gcm"
    );
    sealed
}

#[test]
fn gcm_over_every_128_bit_cipher() {
    let aes = seal_and_open(&Aes::new(&[0x11; 16]).unwrap(), "aes");
    let sm4 = seal_and_open(&Sm4::new(&[0x22; 16]).unwrap(), "sm4");
    let twofish = seal_and_open(&Twofish::new(&[0x33; 16]).unwrap(), "twofish");

    // The underlying cipher matters.
    assert_ne!(aes, sm4);
    assert_ne!(sm4, twofish);
}

#[test]
fn gcm_rejects_64_bit_block_ciphers() {
    for result in [
        Gcm::new(&Des::new(&[0u8; 8]).unwrap()).err(),
        Gcm::new(&Blowfish::new(&[0u8; 8]).unwrap()).err(),
        Gcm::new(&Rc5::new(&[0u8; 16]).unwrap()).err(),
    ] {
        assert!(result.is_some());
    }
}

#[test]
fn every_padding_scheme_through_cbc() {
    let cipher = Sm4::new(&[0x12; 16]).unwrap();
    let cbc = Cbc::new(&cipher, &[0x34; 16]).unwrap();
    let message = b"padding schemes are interchangeable in front of cbc";

    for scheme in [
        Scheme::Pkcs7,
        Scheme::Iso7816,
        Scheme::AnsiX923,
        Scheme::Iso10126,
        Scheme::Tbc,
        Scheme::M1,
    ] {
        let padded = scheme.pad(message, cipher.block_size()).unwrap();
        let ct = cbc.encrypt(&padded).unwrap();
        let recovered = scheme.unpad(&cbc.decrypt(&ct).unwrap()).unwrap();
        assert_eq!(recovered, message, "{scheme:?}");
    }
}

#[test]
fn same_key_different_modes_disagree() {
    let cipher = Aes::new(&[0x99; 16]).unwrap();
    let iv = [0xaa; 16];
    let message: Vec<u8> = (1..=32u8).collect();

    let cbc = Cbc::new(&cipher, &iv).unwrap().encrypt(&message).unwrap();
    let cfb = Cfb::new(&cipher, &iv).unwrap().encrypt(&message).unwrap();
    let ofb = Ofb::new(&cipher, &iv).unwrap().encrypt(&message).unwrap();
    let ctr = Ctr::new(&cipher, &iv).unwrap().encrypt(&message).unwrap();

    assert_ne!(cbc, cfb);
    assert_ne!(cfb, ctr);
    assert_ne!(ofb, ctr);
    // CFB and OFB share their first keystream block but diverge after it.
    assert_eq!(cfb[..16], ofb[..16]);
    assert_ne!(cfb[16..], ofb[16..]);
}
