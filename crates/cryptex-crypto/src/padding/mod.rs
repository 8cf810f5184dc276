//! Block padding schemes.
//!
//! Every scheme extends data to a positive multiple of the block size and
//! recovers the original boundary on unpad. `Pkcs7`, `Iso7816`, `AnsiX923`,
//! `Iso10126`, and `Tbc` always add 1..=B bytes (a full block when the
//! input is already aligned); `Zero` adds 0..B-1 zero bytes and is
//! therefore ambiguous for data that ends in zeros.
//!
//! `M1` and `M2` are the GB/T 17964 names for the ISO 7816-4 and
//! zero-padding constructions.

use cryptex_types::CryptoError;

/// A padding scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// N bytes, each of value N.
    Pkcs7,
    /// PKCS#7 restricted to 8-byte blocks.
    Pkcs5,
    /// A 0x80 marker followed by zeros (ISO/IEC 7816-4).
    Iso7816,
    /// Zeros followed by a single length byte (ANSI X9.23).
    AnsiX923,
    /// Random bytes followed by a single length byte (ISO 10126).
    Iso10126,
    /// Zero bytes only; nothing added when already aligned.
    Zero,
    /// Repetitions of the bit-complement of the last data byte.
    Tbc,
    /// GB/T 17964 padding mode 1, identical to ISO 7816-4.
    M1,
    /// GB/T 17964 padding mode 2, identical to zero padding.
    M2,
}

impl Scheme {
    /// Pad `data` to a multiple of `block_size` (1..=255 bytes).
    pub fn pad(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>, CryptoError> {
        self.check_block_size(block_size)?;
        let fill = block_size - data.len() % block_size;
        let mut out = data.to_vec();

        match self {
            Scheme::Pkcs7 | Scheme::Pkcs5 => {
                out.resize(out.len() + fill, fill as u8);
            }
            Scheme::Iso7816 | Scheme::M1 => {
                out.push(0x80);
                out.resize(data.len() + fill, 0x00);
            }
            Scheme::AnsiX923 => {
                out.resize(data.len() + fill - 1, 0x00);
                out.push(fill as u8);
            }
            Scheme::Iso10126 => {
                let mut random = vec![0u8; fill - 1];
                getrandom::getrandom(&mut random).map_err(|_| CryptoError::RandFail)?;
                out.extend_from_slice(&random);
                out.push(fill as u8);
            }
            Scheme::Zero | Scheme::M2 => {
                if fill < block_size {
                    out.resize(out.len() + fill, 0x00);
                }
            }
            Scheme::Tbc => {
                let fill_byte = !data.last().copied().unwrap_or(0x00);
                out.resize(out.len() + fill, fill_byte);
            }
        }
        Ok(out)
    }

    /// Remove padding, validating it where the scheme allows.
    pub fn unpad(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Scheme::Pkcs7 | Scheme::Pkcs5 => {
                let count = trailing_count(data)?;
                if *self == Scheme::Pkcs5 && count > 8 {
                    return Err(CryptoError::InvalidPadding);
                }
                let boundary = data.len() - count;
                if data[boundary..].iter().any(|&b| b != count as u8) {
                    return Err(CryptoError::InvalidPadding);
                }
                Ok(data[..boundary].to_vec())
            }
            Scheme::Iso7816 | Scheme::M1 => {
                if data.is_empty() {
                    return Err(CryptoError::InvalidPadding);
                }
                let marker = data
                    .iter()
                    .rposition(|&b| b != 0x00)
                    .ok_or(CryptoError::InvalidPadding)?;
                if data[marker] != 0x80 {
                    return Err(CryptoError::InvalidPadding);
                }
                Ok(data[..marker].to_vec())
            }
            Scheme::AnsiX923 => {
                let count = trailing_count(data)?;
                let boundary = data.len() - count;
                if data[boundary..data.len() - 1].iter().any(|&b| b != 0x00) {
                    return Err(CryptoError::InvalidPadding);
                }
                Ok(data[..boundary].to_vec())
            }
            Scheme::Iso10126 => {
                // Fill bytes are random; only the count byte is checked.
                let count = trailing_count(data)?;
                Ok(data[..data.len() - count].to_vec())
            }
            Scheme::Zero | Scheme::M2 => {
                let end = data.iter().rposition(|&b| b != 0x00).map_or(0, |i| i + 1);
                Ok(data[..end].to_vec())
            }
            Scheme::Tbc => {
                if data.is_empty() {
                    return Err(CryptoError::InvalidPadding);
                }
                let fill = data[data.len() - 1];
                let end = data.iter().rposition(|&b| b != fill).map_or(0, |i| i + 1);
                Ok(data[..end].to_vec())
            }
        }
    }

    fn check_block_size(&self, block_size: usize) -> Result<(), CryptoError> {
        if *self == Scheme::Pkcs5 && block_size != 8 {
            return Err(CryptoError::InvalidBlockSize(block_size));
        }
        if block_size == 0 || block_size > 255 {
            return Err(CryptoError::InvalidBlockSize(block_size));
        }
        Ok(())
    }
}

/// Read and bound-check a trailing count byte.
fn trailing_count(data: &[u8]) -> Result<usize, CryptoError> {
    let count = *data.last().ok_or(CryptoError::InvalidPadding)? as usize;
    if count == 0 || count > data.len() {
        return Err(CryptoError::InvalidPadding);
    }
    Ok(count)
}
