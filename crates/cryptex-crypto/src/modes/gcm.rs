//! GCM (Galois/Counter Mode) authenticated encryption, NIST SP 800-38D.
//!
//! Combines CTR-mode encryption with the GHASH universal hash to provide
//! authenticated encryption with associated data. Only usable through
//! [`seal`](Gcm::seal) and [`open`](Gcm::open); the plain
//! `encrypt`/`decrypt` entry points refuse to run, since GCM without its
//! tag is just CTR with extra steps.

use cryptex_types::CryptoError;
use subtle::ConstantTimeEq;

use super::ctr::Ctr;
use super::ghash::Ghash;
use crate::cipher::BlockCipher;
use crate::util::increment;

/// GCM nonce size in bytes. Only the 96-bit nonce construction is
/// supported; other lengths are rejected with `InvalidNonce`.
pub const GCM_NONCE_SIZE: usize = 12;

/// Default authentication tag size in bytes.
pub const GCM_DEFAULT_TAG_SIZE: usize = 16;

const GCM_BLOCK_SIZE: usize = 16;

/// GCM adapter over a borrowed 128-bit block cipher.
pub struct Gcm<'c, C: BlockCipher> {
    cipher: &'c C,
    ghash: Ghash,
    tag_size: usize,
}

impl<'c, C: BlockCipher> Gcm<'c, C> {
    /// Create a GCM adapter with the default 16-byte tag.
    pub fn new(cipher: &'c C) -> Result<Self, CryptoError> {
        Self::with_tag_size(cipher, GCM_DEFAULT_TAG_SIZE)
    }

    /// Create a GCM adapter with a 4..=16-byte tag.
    pub fn with_tag_size(cipher: &'c C, tag_size: usize) -> Result<Self, CryptoError> {
        if !(4..=16).contains(&tag_size) {
            return Err(CryptoError::InvalidTagSize);
        }
        if cipher.block_size() != GCM_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize(cipher.block_size()));
        }

        // H = E_K(0^128), the GHASH subkey.
        let mut h = [0u8; GCM_BLOCK_SIZE];
        cipher.encrypt_block(&mut h)?;

        Ok(Self {
            cipher,
            ghash: Ghash::new(&h),
            tag_size,
        })
    }

    /// Encrypt and authenticate `plaintext` with optional associated
    /// data, returning `ciphertext ‖ tag`.
    pub fn seal(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let j0 = self.derive_j0(nonce)?;

        let mut counter = j0;
        increment(&mut counter);
        let mut ciphertext = Ctr::new(self.cipher, &counter)?.encrypt(plaintext)?;

        let tag = self.compute_tag(&j0, aad, &ciphertext)?;
        ciphertext.extend_from_slice(&tag[..self.tag_size]);
        Ok(ciphertext)
    }

    /// Verify and decrypt `ciphertext ‖ tag`. The tag is checked (in
    /// constant time) before any plaintext is computed; a mismatch
    /// returns `TagMismatch` and no data.
    pub fn open(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let j0 = self.derive_j0(nonce)?;

        if ciphertext.len() < self.tag_size {
            return Err(CryptoError::InvalidDataSize);
        }
        let (body, received_tag) = ciphertext.split_at(ciphertext.len() - self.tag_size);

        let expected = self.compute_tag(&j0, aad, body)?;
        if expected[..self.tag_size].ct_eq(received_tag).unwrap_u8() != 1 {
            return Err(CryptoError::TagMismatch);
        }

        let mut counter = j0;
        increment(&mut counter);
        Ctr::new(self.cipher, &counter)?.decrypt(body)
    }

    /// GCM must be driven through [`seal`](Gcm::seal).
    pub fn encrypt(&self, _plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::NotSupported)
    }

    /// GCM must be driven through [`open`](Gcm::open).
    pub fn decrypt(&self, _ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::NotSupported)
    }

    /// Authentication tag length in bytes.
    pub fn tag_size(&self) -> usize {
        self.tag_size
    }

    /// Required nonce length in bytes.
    pub fn nonce_size(&self) -> usize {
        GCM_NONCE_SIZE
    }

    /// J₀ = nonce ‖ 0x00000001 for the 96-bit nonce construction.
    fn derive_j0(&self, nonce: &[u8]) -> Result<[u8; GCM_BLOCK_SIZE], CryptoError> {
        if nonce.len() != GCM_NONCE_SIZE {
            return Err(CryptoError::InvalidNonce);
        }
        let mut j0 = [0u8; GCM_BLOCK_SIZE];
        j0[..GCM_NONCE_SIZE].copy_from_slice(nonce);
        j0[15] = 1;
        Ok(j0)
    }

    /// Tag = GHASH(H; AAD, C) XOR E_K(J₀).
    fn compute_tag(
        &self,
        j0: &[u8; GCM_BLOCK_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<[u8; GCM_BLOCK_SIZE], CryptoError> {
        let mut tag = self.ghash.digest(aad, ciphertext);
        let mut ek0 = *j0;
        self.cipher.encrypt_block(&mut ek0)?;
        for (t, &k) in tag.iter_mut().zip(ek0.iter()) {
            *t ^= k;
        }
        Ok(tag)
    }
}
