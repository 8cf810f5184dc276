//! Blowfish block cipher.
//!
//! A 64-bit-block Feistel cipher with a key-dependent P-array and four
//! key-dependent S-boxes, all seeded from the hexadecimal fraction digits
//! of π and then rewritten by repeatedly encrypting the all-zero block.

mod pi;

use std::sync::OnceLock;

use cryptex_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::BlockCipher;

/// Blowfish block size in bytes (64 bits).
pub const BLOWFISH_BLOCK_SIZE: usize = 8;

/// Minimum key length in bytes.
pub const BLOWFISH_MIN_KEY_SIZE: usize = 4;

/// Maximum key length in bytes.
pub const BLOWFISH_MAX_KEY_SIZE: usize = 56;

const ROUNDS: usize = 16;

/// The π-seeded initial P-array and S-boxes, computed once.
struct InitTables {
    p: [u32; 18],
    s: [[u32; 256]; 4],
}

fn init_tables() -> &'static InitTables {
    static TABLES: OnceLock<InitTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let words = pi::pi_fraction_words(18 + 4 * 256);
        let mut p = [0u32; 18];
        p.copy_from_slice(&words[..18]);
        let mut s = [[0u32; 256]; 4];
        for (i, sbox) in s.iter_mut().enumerate() {
            sbox.copy_from_slice(&words[18 + 256 * i..18 + 256 * (i + 1)]);
        }
        InitTables { p, s }
    })
}

/// A Blowfish key schedule: 18 P-words and four 256-entry S-boxes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blowfish {
    p: [u32; 18],
    s: [[u32; 256]; 4],
}

impl Blowfish {
    /// Create a Blowfish cipher from a 4..=56-byte key.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if !(BLOWFISH_MIN_KEY_SIZE..=BLOWFISH_MAX_KEY_SIZE).contains(&key.len()) {
            return Err(CryptoError::InvalidKeySize(key.len()));
        }

        let init = init_tables();
        let mut cipher = Self {
            p: init.p,
            s: init.s,
        };
        cipher.expand_key(key);
        Ok(cipher)
    }

    /// XOR the key into the P-array, then rewrite the P-array and every
    /// S-box entry by chaining encryptions of the zero block.
    fn expand_key(&mut self, key: &[u8]) {
        let mut j = 0;
        for p in self.p.iter_mut() {
            let mut word = 0u32;
            for _ in 0..4 {
                word = (word << 8) | u32::from(key[j % key.len()]);
                j += 1;
            }
            *p ^= word;
        }

        let (mut left, mut right) = (0u32, 0u32);
        for i in (0..18).step_by(2) {
            (left, right) = self.encrypt_words(left, right);
            self.p[i] = left;
            self.p[i + 1] = right;
        }
        for sbox in 0..4 {
            for i in (0..256).step_by(2) {
                (left, right) = self.encrypt_words(left, right);
                self.s[sbox][i] = left;
                self.s[sbox][i + 1] = right;
            }
        }
    }

    /// F(x) = ((S0[a] + S1[b]) ^ S2[c]) + S3[d] over the bytes of x.
    fn feistel(&self, x: u32) -> u32 {
        let [a, b, c, d] = x.to_be_bytes();
        let mixed = self.s[0][a as usize].wrapping_add(self.s[1][b as usize]) ^ self.s[2][c as usize];
        mixed.wrapping_add(self.s[3][d as usize])
    }

    fn encrypt_words(&self, mut left: u32, mut right: u32) -> (u32, u32) {
        for i in 0..ROUNDS {
            left ^= self.p[i];
            right ^= self.feistel(left);
            std::mem::swap(&mut left, &mut right);
        }
        std::mem::swap(&mut left, &mut right);
        right ^= self.p[16];
        left ^= self.p[17];
        (left, right)
    }

    fn decrypt_words(&self, mut left: u32, mut right: u32) -> (u32, u32) {
        for i in (2..18).rev() {
            left ^= self.p[i];
            right ^= self.feistel(left);
            std::mem::swap(&mut left, &mut right);
        }
        std::mem::swap(&mut left, &mut right);
        right ^= self.p[1];
        left ^= self.p[0];
        (left, right)
    }
}

impl BlockCipher for Blowfish {
    fn block_size(&self) -> usize {
        BLOWFISH_BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != BLOWFISH_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize(block.len()));
        }
        let left = u32::from_be_bytes(block[..4].try_into().unwrap());
        let right = u32::from_be_bytes(block[4..].try_into().unwrap());
        let (left, right) = self.encrypt_words(left, right);
        block[..4].copy_from_slice(&left.to_be_bytes());
        block[4..].copy_from_slice(&right.to_be_bytes());
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != BLOWFISH_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize(block.len()));
        }
        let left = u32::from_be_bytes(block[..4].try_into().unwrap());
        let right = u32::from_be_bytes(block[4..].try_into().unwrap());
        let (left, right) = self.decrypt_words(left, right);
        block[..4].copy_from_slice(&left.to_be_bytes());
        block[4..].copy_from_slice(&right.to_be_bytes());
        Ok(())
    }
}
