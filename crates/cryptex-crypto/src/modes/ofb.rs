//! OFB (Output Feedback) mode.

use cryptex_types::CryptoError;

use crate::cipher::BlockCipher;

/// OFB mode adapter: the keystream is the iterated encryption of the IV,
/// independent of the data, so encryption and decryption are identical.
pub struct Ofb<'c, C: BlockCipher> {
    cipher: &'c C,
    iv: Vec<u8>,
}

impl<'c, C: BlockCipher> Ofb<'c, C> {
    /// Create an OFB adapter; the IV length must equal the block size.
    pub fn new(cipher: &'c C, iv: &[u8]) -> Result<Self, CryptoError> {
        if iv.len() != cipher.block_size() {
            return Err(CryptoError::InvalidIv);
        }
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
        })
    }

    /// Encrypt data of any length.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let block_size = self.cipher.block_size();
        let mut out = plaintext.to_vec();
        let mut register = self.iv.clone();

        for chunk in out.chunks_mut(block_size) {
            self.cipher.encrypt_block(&mut register)?;
            for (byte, &pad) in chunk.iter_mut().zip(register.iter()) {
                *byte ^= pad;
            }
        }
        Ok(out)
    }

    /// Decrypt data of any length (identical to encryption).
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.encrypt(ciphertext)
    }

    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }
}
