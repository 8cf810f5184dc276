//! RC4 stream cipher.
//!
//! Unlike the block ciphers, an [`Rc4`] instance is stateful: every call
//! to [`encrypt`](Rc4::encrypt) or [`decrypt`](Rc4::decrypt) advances the
//! keystream, so decryption requires a fresh instance (or a
//! [`reset`](Rc4::reset)) keyed identically and fed the same sequence of
//! lengths. Encryption and decryption are the same XOR operation.
//!
//! RC4 is broken for real-world use (keystream biases); it is included as
//! the classic example of a permutation-based stream cipher.

use cryptex_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum key length in bytes.
pub const RC4_MIN_KEY_SIZE: usize = 1;

/// Maximum key length in bytes.
pub const RC4_MAX_KEY_SIZE: usize = 256;

/// RC4 keystream state: the 256-byte permutation and the two indices.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Rc4 {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    /// Create an RC4 cipher from a 1..=256-byte key.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if !(RC4_MIN_KEY_SIZE..=RC4_MAX_KEY_SIZE).contains(&key.len()) {
            return Err(CryptoError::InvalidKeySize(key.len()));
        }
        let mut cipher = Self {
            state: [0; 256],
            i: 0,
            j: 0,
        };
        cipher.schedule(key);
        Ok(cipher)
    }

    /// Key-scheduling algorithm: start from the identity permutation and
    /// shuffle it with the key repeated cyclically.
    fn schedule(&mut self, key: &[u8]) {
        for (i, slot) in self.state.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut j: u8 = 0;
        for i in 0..256 {
            j = j
                .wrapping_add(self.state[i])
                .wrapping_add(key[i % key.len()]);
            self.state.swap(i, j as usize);
        }
        self.i = 0;
        self.j = 0;
    }

    /// XOR the next keystream bytes into `data`, advancing the state.
    fn process(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        for byte in out.iter_mut() {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.state[self.i as usize]);
            self.state.swap(self.i as usize, self.j as usize);
            let t = self.state[self.i as usize].wrapping_add(self.state[self.j as usize]);
            *byte ^= self.state[t as usize];
        }
        out
    }

    /// Encrypt data against the current keystream position.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Vec<u8> {
        self.process(plaintext)
    }

    /// Decrypt data against the current keystream position (identical to
    /// encryption).
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Vec<u8> {
        self.process(ciphertext)
    }

    /// Re-key the cipher, restarting the keystream.
    pub fn reset(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        if !(RC4_MIN_KEY_SIZE..=RC4_MAX_KEY_SIZE).contains(&key.len()) {
            return Err(CryptoError::InvalidKeySize(key.len()));
        }
        self.schedule(key);
        Ok(())
    }
}
