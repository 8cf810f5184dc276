//! CBC (Cipher Block Chaining) mode.

use cryptex_types::CryptoError;

use crate::cipher::BlockCipher;
use crate::util::xor_bytes;

/// CBC mode adapter: each plaintext block is XORed with the previous
/// ciphertext block (the IV for the first) before encryption.
pub struct Cbc<'c, C: BlockCipher> {
    cipher: &'c C,
    iv: Vec<u8>,
}

impl<'c, C: BlockCipher> Cbc<'c, C> {
    /// Create a CBC adapter; the IV length must equal the block size.
    pub fn new(cipher: &'c C, iv: &[u8]) -> Result<Self, CryptoError> {
        if iv.len() != cipher.block_size() {
            return Err(CryptoError::InvalidIv);
        }
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
        })
    }

    /// Encrypt block-aligned data.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let block_size = self.cipher.block_size();
        if plaintext.len() % block_size != 0 {
            return Err(CryptoError::InvalidDataSize);
        }

        let mut out = vec![0u8; plaintext.len()];
        let mut chain = self.iv.clone();
        for (i, block) in plaintext.chunks(block_size).enumerate() {
            let start = i * block_size;
            xor_bytes(&mut out[start..start + block_size], block, &chain);
            self.cipher.encrypt_block(&mut out[start..start + block_size])?;
            chain.copy_from_slice(&out[start..start + block_size]);
        }
        Ok(out)
    }

    /// Decrypt block-aligned data.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let block_size = self.cipher.block_size();
        if ciphertext.len() % block_size != 0 {
            return Err(CryptoError::InvalidDataSize);
        }

        let mut out = vec![0u8; ciphertext.len()];
        let mut chain = self.iv.clone();
        for (i, block) in ciphertext.chunks(block_size).enumerate() {
            let start = i * block_size;
            let mut decrypted = block.to_vec();
            self.cipher.decrypt_block(&mut decrypted)?;
            xor_bytes(&mut out[start..start + block_size], &decrypted, &chain);
            chain.copy_from_slice(block);
        }
        Ok(out)
    }

    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::Aes;
    use crate::des::Des;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    const NIST_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const NIST_IV: &str = "000102030405060708090a0b0c0d0e0f";
    const NIST_PT: &str = "6bc1bee22e409f96e93d7e117393172a\
                           ae2d8a571e03ac9c9eb76fac45af8e51\
                           30c81c46a35ce411e5fbc1191a0a52ef\
                           f69f2445df4f9b17ad2b417be66c3710";

    /// NIST SP 800-38A F.2.1, CBC-AES128, all four blocks.
    #[test]
    fn test_cbc_aes128_vector() {
        let aes = Aes::new(&hex_to_bytes(NIST_KEY)).unwrap();
        let cbc = Cbc::new(&aes, &hex_to_bytes(NIST_IV)).unwrap();
        let pt = hex_to_bytes(NIST_PT);

        let ct = cbc.encrypt(&pt).unwrap();
        assert_eq!(
            hex(&ct),
            "7649abac8119b246cee98e9b12e9197d\
             5086cb9b507219ee95db113a917678b2\
             73bed6b8e3c1743b7116e69e22229516\
             3ff1caa1681fac09120eca307586e1a7"
        );
        assert_eq!(cbc.decrypt(&ct).unwrap(), pt);
    }

    #[test]
    fn test_cbc_hides_equal_blocks() {
        let aes = Aes::new(&[7u8; 16]).unwrap();
        let cbc = Cbc::new(&aes, &[9u8; 16]).unwrap();
        let ct = cbc.encrypt(&[0xabu8; 32]).unwrap();
        assert_ne!(ct[..16], ct[16..]);
    }

    #[test]
    fn test_iv_must_match_block_size() {
        let aes = Aes::new(&[0u8; 16]).unwrap();
        assert_eq!(
            Cbc::new(&aes, &[0u8; 12]).err(),
            Some(CryptoError::InvalidIv)
        );
        let des = Des::new(&[0u8; 8]).unwrap();
        assert!(Cbc::new(&des, &[0u8; 8]).is_ok());
        assert!(Cbc::new(&des, &[0u8; 16]).is_err());
    }

    #[test]
    fn test_unaligned_input_rejected() {
        let aes = Aes::new(&[0u8; 16]).unwrap();
        let cbc = Cbc::new(&aes, &[0u8; 16]).unwrap();
        assert!(cbc.encrypt(&[0u8; 10]).is_err());
        assert!(cbc.decrypt(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_repeated_calls_use_stored_iv() {
        let aes = Aes::new(&[3u8; 16]).unwrap();
        let cbc = Cbc::new(&aes, &[5u8; 16]).unwrap();
        let pt = [0x11u8; 48];
        assert_eq!(cbc.encrypt(&pt).unwrap(), cbc.encrypt(&pt).unwrap());
    }

    #[test]
    fn test_different_ivs_differ() {
        let aes = Aes::new(&[3u8; 16]).unwrap();
        let a = Cbc::new(&aes, &[0u8; 16]).unwrap();
        let b = Cbc::new(&aes, &[1u8; 16]).unwrap();
        let pt = [0x22u8; 32];
        assert_ne!(a.encrypt(&pt).unwrap(), b.encrypt(&pt).unwrap());
    }

    #[test]
    fn test_cbc_with_des() {
        let des = Des::new(b"des key!").unwrap();
        let cbc = Cbc::new(&des, &[0x42u8; 8]).unwrap();
        let pt = b"sixteen and more";
        let ct = cbc.encrypt(pt).unwrap();
        assert_eq!(cbc.decrypt(&ct).unwrap(), pt);
    }
}
