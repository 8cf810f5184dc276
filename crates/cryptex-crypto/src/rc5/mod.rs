//! RC5 block cipher (RC5-32/r/b).
//!
//! A parameterized cipher with data-dependent rotations. Only the 32-bit
//! word size is implemented (64-bit block); rounds and key length range
//! over 1..=255. `new` gives the conventional RC5-32/12/16 instance.
//!
//! Unusually for this toolkit, the two words of a block are packed
//! little-endian, following Rivest's specification.

use cryptex_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::BlockCipher;

/// RC5-32 block size in bytes (two 32-bit words).
pub const RC5_BLOCK_SIZE: usize = 8;

/// Default number of rounds.
pub const RC5_DEFAULT_ROUNDS: usize = 12;

/// Default key length in bytes.
pub const RC5_DEFAULT_KEY_SIZE: usize = 16;

// Magic constants for w = 32: Odd((e-2)·2^32) and Odd((φ-1)·2^32).
const P32: u32 = 0xb7e1_5163;
const Q32: u32 = 0x9e37_79b9;

/// An RC5 subkey table.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Rc5 {
    rounds: usize,
    subkeys: Vec<u32>,
}

impl Rc5 {
    /// Create the conventional RC5-32/12/16 instance.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        Self::with_params(key, RC5_DEFAULT_ROUNDS, 32)
    }

    /// Create an RC5 instance with explicit rounds and word size.
    ///
    /// Only `word_size == 32` is supported; rounds and key length must be
    /// in 1..=255.
    pub fn with_params(key: &[u8], rounds: usize, word_size: usize) -> Result<Self, CryptoError> {
        if key.is_empty() || key.len() > 255 {
            return Err(CryptoError::InvalidKeySize(key.len()));
        }
        if !(1..=255).contains(&rounds) {
            return Err(CryptoError::InvalidRounds);
        }
        if word_size != 32 {
            return Err(CryptoError::InvalidWordSize);
        }

        let mut cipher = Self {
            rounds,
            subkeys: vec![0u32; 2 * (rounds + 1)],
        };
        cipher.expand_key(key);
        Ok(cipher)
    }

    /// Rivest's key schedule: seed S from P and Q, load the key into the
    /// word array L little-endian, then mix for 3·max(|S|, |L|) steps with
    /// data-dependent rotations.
    fn expand_key(&mut self, key: &[u8]) {
        self.subkeys[0] = P32;
        for i in 1..self.subkeys.len() {
            self.subkeys[i] = self.subkeys[i - 1].wrapping_add(Q32);
        }

        let mut l = vec![0u32; key.len().div_ceil(4)];
        for (i, &byte) in key.iter().enumerate() {
            l[i / 4] |= u32::from(byte) << ((i % 4) * 8);
        }

        let (mut a, mut b) = (0u32, 0u32);
        let (mut i, mut j) = (0usize, 0usize);
        for _ in 0..3 * self.subkeys.len().max(l.len()) {
            a = self.subkeys[i].wrapping_add(a).wrapping_add(b).rotate_left(3);
            self.subkeys[i] = a;
            i = (i + 1) % self.subkeys.len();

            let shift = a.wrapping_add(b);
            b = l[j].wrapping_add(a).wrapping_add(b).rotate_left(shift % 32);
            l[j] = b;
            j = (j + 1) % l.len();
        }

        l.zeroize();
    }
}

impl BlockCipher for Rc5 {
    fn block_size(&self) -> usize {
        RC5_BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != RC5_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize(block.len()));
        }

        let mut a = u32::from_le_bytes(block[..4].try_into().unwrap());
        let mut b = u32::from_le_bytes(block[4..].try_into().unwrap());

        a = a.wrapping_add(self.subkeys[0]);
        b = b.wrapping_add(self.subkeys[1]);
        for i in 1..=self.rounds {
            a = (a ^ b).rotate_left(b % 32).wrapping_add(self.subkeys[2 * i]);
            b = (b ^ a).rotate_left(a % 32).wrapping_add(self.subkeys[2 * i + 1]);
        }

        block[..4].copy_from_slice(&a.to_le_bytes());
        block[4..].copy_from_slice(&b.to_le_bytes());
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != RC5_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize(block.len()));
        }

        let mut a = u32::from_le_bytes(block[..4].try_into().unwrap());
        let mut b = u32::from_le_bytes(block[4..].try_into().unwrap());

        for i in (1..=self.rounds).rev() {
            b = b
                .wrapping_sub(self.subkeys[2 * i + 1])
                .rotate_right(a % 32)
                ^ a;
            a = b ^ a.wrapping_sub(self.subkeys[2 * i]).rotate_right(b % 32);
        }
        b = b.wrapping_sub(self.subkeys[1]);
        a = a.wrapping_sub(self.subkeys[0]);

        block[..4].copy_from_slice(&a.to_le_bytes());
        block[4..].copy_from_slice(&b.to_le_bytes());
        Ok(())
    }
}
