//! CTR (Counter) mode.

use cryptex_types::CryptoError;

use crate::cipher::BlockCipher;
use crate::util::increment;

/// CTR mode adapter: encrypts successive counter values into a keystream.
///
/// The counter is treated as one big-endian integer spanning the whole
/// block and incremented by one per keystream block. Encryption and
/// decryption are identical.
pub struct Ctr<'c, C: BlockCipher> {
    cipher: &'c C,
    counter: Vec<u8>,
}

impl<'c, C: BlockCipher> Ctr<'c, C> {
    /// Create a CTR adapter; the initial counter length must equal the
    /// block size.
    pub fn new(cipher: &'c C, initial_counter: &[u8]) -> Result<Self, CryptoError> {
        if initial_counter.len() != cipher.block_size() {
            return Err(CryptoError::InvalidIv);
        }
        Ok(Self {
            cipher,
            counter: initial_counter.to_vec(),
        })
    }

    /// Encrypt data of any length.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = plaintext.to_vec();
        let mut counter = self.counter.clone();

        for chunk in out.chunks_mut(self.cipher.block_size()) {
            let mut keystream = counter.clone();
            self.cipher.encrypt_block(&mut keystream)?;
            for (byte, &pad) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= pad;
            }
            increment(&mut counter);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::Aes;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// NIST SP 800-38A F.5.1, CTR-AES128, all four blocks.
    #[test]
    fn test_ctr_aes128_vector() {
        let aes = Aes::new(&hex_to_bytes("2b7e151628aed2a6abf7158809cf4f3c")).unwrap();
        let ctr = Ctr::new(&aes, &hex_to_bytes("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff")).unwrap();
        let pt = hex_to_bytes(
            "6bc1bee22e409f96e93d7e117393172a\
             ae2d8a571e03ac9c9eb76fac45af8e51\
             30c81c46a35ce411e5fbc1191a0a52ef\
             f69f2445df4f9b17ad2b417be66c3710",
        );

        let ct = ctr.encrypt(&pt).unwrap();
        assert_eq!(
            hex(&ct),
            "874d6191b620e3261bef6864990db6ce\
             9806f66b7970fdff8617187bb9fffdff\
             5ae4df3edbd5d35e5b4f09020db03eab\
             1e031dda2fbe03d1792170a0f3009cee"
        );
        assert_eq!(ctr.decrypt(&ct).unwrap(), pt);
    }

    #[test]
    fn test_counter_carry_across_bytes() {
        // A counter ending in 0xff must carry into the next byte rather
        // than wrap within it.
        let aes = Aes::new(&[1u8; 16]).unwrap();
        let mut tail_counter = [0u8; 16];
        tail_counter[14] = 0x00;
        tail_counter[15] = 0xff;
        let ctr = Ctr::new(&aes, &tail_counter).unwrap();

        let mut second_counter = [0u8; 16];
        second_counter[14] = 0x01;
        second_counter[15] = 0x00;
        let direct = Ctr::new(&aes, &second_counter).unwrap();

        let two_blocks = ctr.encrypt(&[0u8; 32]).unwrap();
        let one_block = direct.encrypt(&[0u8; 16]).unwrap();
        assert_eq!(&two_blocks[16..], one_block.as_slice());
    }

    #[test]
    fn test_length_transparency() {
        let aes = Aes::new(&[1u8; 16]).unwrap();
        let ctr = Ctr::new(&aes, &[0u8; 16]).unwrap();
        for len in [0usize, 1, 15, 16, 31, 64] {
            let pt = vec![0xa5u8; len];
            let ct = ctr.encrypt(&pt).unwrap();
            assert_eq!(ct.len(), len);
            assert_eq!(ctr.decrypt(&ct).unwrap(), pt);
        }
    }

    #[test]
    fn test_counter_length_checked() {
        let aes = Aes::new(&[1u8; 16]).unwrap();
        assert_eq!(Ctr::new(&aes, &[0u8; 12]).err(), Some(CryptoError::InvalidIv));
    }

    #[test]
    fn test_repeated_calls_use_stored_counter() {
        let aes = Aes::new(&[1u8; 16]).unwrap();
        let ctr = Ctr::new(&aes, &[9u8; 16]).unwrap();
        let pt = [0u8; 48];
        assert_eq!(ctr.encrypt(&pt).unwrap(), ctr.encrypt(&pt).unwrap());
    }
}
