//! The block-cipher contract shared by every cipher and mode adapter.

use cryptex_types::CryptoError;

/// A keyed block cipher: a deterministic permutation on fixed-size blocks.
///
/// Implementations own a precomputed key schedule that is immutable after
/// construction and carry no per-message state, so a single cipher may be
/// shared across threads and wrapped by any number of mode adapters.
///
/// Both per-block calls must reject a slice whose length differs from
/// [`block_size`](BlockCipher::block_size) before touching any state.
pub trait BlockCipher: Send + Sync {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Encrypt a single block in place.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;

    /// Decrypt a single block in place.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;
}
