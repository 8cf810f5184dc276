//! Teaching-oriented cryptographic toolkit.
//!
//! Implements symmetric block ciphers (AES, DES, SM4, Blowfish, Twofish,
//! RC5), the RC4 stream cipher, modes of operation (ECB, CBC, CFB, OFB,
//! CTR, GCM), block padding schemes, the SM3 hash, and the SM2
//! elliptic-curve public-key algorithm, all from first principles.
//!
//! The block ciphers share the [`cipher::BlockCipher`] trait; the mode
//! adapters in [`modes`] are generic over it, so any cipher composes with
//! any mode:
//!
//! ```
//! use cryptex_crypto::cipher::BlockCipher;
//! use cryptex_crypto::modes::Cbc;
//! use cryptex_crypto::padding::Scheme;
//! use cryptex_crypto::sm4::Sm4;
//!
//! # fn main() -> Result<(), cryptex_types::CryptoError> {
//! let cipher = Sm4::new(&[0x42; 16])?;
//! let cbc = Cbc::new(&cipher, &[0x24; 16])?;
//! let padded = Scheme::Pkcs7.pad(b"attack at dawn", cipher.block_size())?;
//! let ciphertext = cbc.encrypt(&padded)?;
//! let recovered = Scheme::Pkcs7.unpad(&cbc.decrypt(&ciphertext)?)?;
//! assert_eq!(recovered, b"attack at dawn");
//! # Ok(())
//! # }
//! ```
//!
//! This is a study library: it favors clarity over speed and makes no
//! constant-time or side-channel claims.

pub mod cipher;
pub mod util;

// Block and stream ciphers
pub mod aes;
pub mod blowfish;
pub mod des;
pub mod rc4;
pub mod rc5;
pub mod sm4;
pub mod twofish;

// Modes of operation and padding
pub mod modes;
pub mod padding;

// Hash and public-key algorithms
pub mod ecc;
pub mod sm2;
pub mod sm3;
