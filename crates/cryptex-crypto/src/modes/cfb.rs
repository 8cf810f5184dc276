//! CFB (Cipher Feedback) mode with configurable segment size.

use cryptex_types::CryptoError;

use crate::cipher::BlockCipher;

/// CFB mode adapter.
///
/// The feedback register starts at the IV; each segment of `segment_size`
/// bytes is XORed with the leading bytes of the encrypted register, and
/// the register then shifts left to absorb the ciphertext segment. The
/// segment size defaults to the block size and can be reduced with
/// [`with_segment_size`](Cfb::with_segment_size).
pub struct Cfb<'c, C: BlockCipher> {
    cipher: &'c C,
    iv: Vec<u8>,
    segment_size: usize,
}

impl<'c, C: BlockCipher> Cfb<'c, C> {
    /// Create a CFB adapter; the IV length must equal the block size.
    pub fn new(cipher: &'c C, iv: &[u8]) -> Result<Self, CryptoError> {
        if iv.len() != cipher.block_size() {
            return Err(CryptoError::InvalidIv);
        }
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
            segment_size: cipher.block_size(),
        })
    }

    /// Set the segment size (1..=block size).
    pub fn with_segment_size(mut self, segment_size: usize) -> Result<Self, CryptoError> {
        if segment_size == 0 || segment_size > self.cipher.block_size() {
            return Err(CryptoError::InvalidBlockSize(segment_size));
        }
        self.segment_size = segment_size;
        Ok(self)
    }

    /// Encrypt data of any length.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.crypt(plaintext, true)
    }

    /// Decrypt data of any length.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.crypt(ciphertext, false)
    }

    fn crypt(&self, data: &[u8], encrypting: bool) -> Result<Vec<u8>, CryptoError> {
        let block_size = self.cipher.block_size();
        let segment = self.segment_size;

        let mut out = vec![0u8; data.len()];
        let mut register = self.iv.clone();

        let mut offset = 0;
        while offset < data.len() {
            let mut keystream = register.clone();
            self.cipher.encrypt_block(&mut keystream)?;

            let n = segment.min(data.len() - offset);
            for i in 0..n {
                out[offset + i] = data[offset + i] ^ keystream[i];
            }

            // The register absorbs the ciphertext segment, observed on
            // decrypt and just produced on encrypt.
            let feedback_range = offset..offset + n;
            let feedback: &[u8] = if encrypting {
                &out[feedback_range]
            } else {
                &data[feedback_range]
            };
            if segment < block_size {
                register.copy_within(segment.., 0);
                register[block_size - segment..block_size - segment + n]
                    .copy_from_slice(feedback);
            } else {
                register[..n].copy_from_slice(feedback);
            }

            offset += n;
        }
        Ok(out)
    }

    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }
}
