//! Shared error taxonomy for the cryptex toolkit.

/// Cryptographic operation errors.
///
/// Every fallible operation in the toolkit reports one of these values from
/// the call that detected the condition; there is no implicit recovery.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    // Symmetric cipher errors
    #[error("invalid key size: {0} bytes")]
    InvalidKeySize(usize),
    #[error("invalid block size: {0} bytes")]
    InvalidBlockSize(usize),
    #[error("data length must be a multiple of the block size")]
    InvalidDataSize,
    #[error("initialization vector length must equal the block size")]
    InvalidIv,
    #[error("invalid nonce length")]
    InvalidNonce,
    #[error("rounds must be between 1 and 255")]
    InvalidRounds,
    #[error("unsupported word size")]
    InvalidWordSize,
    #[error("input data too long")]
    DataTooLarge,

    // Padding errors
    #[error("invalid padding")]
    InvalidPadding,

    // Authenticated encryption errors
    #[error("invalid tag size")]
    InvalidTagSize,
    #[error("authentication tag mismatch")]
    TagMismatch,
    #[error("operation not supported in this mode")]
    NotSupported,

    // Big number errors
    #[error("big number: division by zero")]
    DivisionByZero,
    #[error("big number: no modular inverse")]
    NoInverse,
    #[error("random generation failed")]
    RandFail,

    // SM2 errors
    #[error("sm2: invalid private key")]
    InvalidPrivateKey,
    #[error("sm2: invalid public key")]
    InvalidPublicKey,
    #[error("sm2: invalid signature")]
    InvalidSignature,
    #[error("sm2: invalid ciphertext")]
    InvalidCiphertext,
    #[error("sm2: decryption failed")]
    DecryptionFailed,
    #[error("sm2: verification failed")]
    VerificationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_simple_variants() {
        assert_eq!(
            CryptoError::InvalidDataSize.to_string(),
            "data length must be a multiple of the block size"
        );
        assert_eq!(
            CryptoError::TagMismatch.to_string(),
            "authentication tag mismatch"
        );
        assert_eq!(CryptoError::InvalidPadding.to_string(), "invalid padding");
        assert_eq!(
            CryptoError::DecryptionFailed.to_string(),
            "sm2: decryption failed"
        );
    }

    #[test]
    fn test_display_parameterized_variants() {
        assert_eq!(
            CryptoError::InvalidKeySize(7).to_string(),
            "invalid key size: 7 bytes"
        );
        assert_eq!(
            CryptoError::InvalidBlockSize(15).to_string(),
            "invalid block size: 15 bytes"
        );
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(CryptoError::InvalidIv, CryptoError::InvalidIv);
        assert_ne!(CryptoError::InvalidIv, CryptoError::InvalidNonce);
        assert_ne!(
            CryptoError::InvalidKeySize(8),
            CryptoError::InvalidKeySize(16)
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CryptoError>();
    }
}
