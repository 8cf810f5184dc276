//! ECB (Electronic Codebook) mode.
//!
//! Transforms every block independently, so equal plaintext blocks yield
//! equal ciphertext blocks. Provides no semantic security; exposed for
//! study only.

use cryptex_types::CryptoError;

use crate::cipher::BlockCipher;

/// ECB mode adapter over a borrowed block cipher.
pub struct Ecb<'c, C: BlockCipher> {
    cipher: &'c C,
}

impl<'c, C: BlockCipher> Ecb<'c, C> {
    pub fn new(cipher: &'c C) -> Self {
        Self { cipher }
    }

    /// Encrypt block-aligned data.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if plaintext.len() % self.cipher.block_size() != 0 {
            return Err(CryptoError::InvalidDataSize);
        }
        let mut out = plaintext.to_vec();
        for block in out.chunks_mut(self.cipher.block_size()) {
            self.cipher.encrypt_block(block)?;
        }
        Ok(out)
    }

    /// Decrypt block-aligned data.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() % self.cipher.block_size() != 0 {
            return Err(CryptoError::InvalidDataSize);
        }
        let mut out = ciphertext.to_vec();
        for block in out.chunks_mut(self.cipher.block_size()) {
            self.cipher.decrypt_block(block)?;
        }
        Ok(out)
    }

    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }
}
