//! Big number type, construction, and byte conversion.

use std::cmp::Ordering;

use cryptex_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Limb type (64-bit on all supported platforms).
pub(crate) type Limb = u64;
/// Double-width type for multiplication and division intermediates.
pub(crate) type DoubleLimb = u128;

/// Bits per limb.
pub(crate) const LIMB_BITS: usize = 64;

/// A heap-allocated big integer in sign-magnitude form, zeroized on drop.
///
/// The magnitude is stored as little-endian `u64` limbs with at least one
/// limb present; leading zero limbs are trimmed after every operation, and
/// zero is never negative.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BigNum {
    /// Little-endian limbs (`limbs[0]` is least significant).
    pub(crate) limbs: Vec<Limb>,
    /// Sign; always false for zero.
    pub(crate) negative: bool,
}

impl BigNum {
    /// The value 0.
    pub fn zero() -> Self {
        Self {
            limbs: vec![0],
            negative: false,
        }
    }

    /// The value 1.
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Construct from a `u64`.
    pub fn from_u64(value: u64) -> Self {
        Self {
            limbs: vec![value],
            negative: false,
        }
    }

    /// Construct a non-negative value from big-endian bytes.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut limbs: Vec<Limb> = bytes
            .rchunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
            })
            .collect();
        if limbs.is_empty() {
            limbs.push(0);
        }
        let mut out = Self {
            limbs,
            negative: false,
        };
        out.normalize();
        out
    }

    /// Export the magnitude as minimal big-endian bytes (`[0]` for zero).
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let byte_len = self.bit_len().div_ceil(8).max(1);
        let mut bytes = vec![0u8; byte_len];
        for i in 0..byte_len {
            let limb = self.limbs.get(i / 8).copied().unwrap_or(0);
            bytes[byte_len - 1 - i] = (limb >> ((i % 8) * 8)) as u8;
        }
        bytes
    }

    /// Export as big-endian bytes left-padded with zeros to exactly `len`
    /// bytes. Fails if the value does not fit.
    pub fn to_bytes_be_padded(&self, len: usize) -> Result<Vec<u8>, CryptoError> {
        let minimal = self.to_bytes_be();
        let minimal = if minimal == [0] && len > 0 {
            Vec::new()
        } else {
            minimal
        };
        if minimal.len() > len {
            return Err(CryptoError::DataTooLarge);
        }
        let mut out = vec![0u8; len];
        out[len - minimal.len()..].copy_from_slice(&minimal);
        Ok(out)
    }

    /// Number of significant bits in the magnitude (0 for zero).
    pub fn bit_len(&self) -> usize {
        match self.limbs.iter().rposition(|&l| l != 0) {
            Some(i) => (i + 1) * LIMB_BITS - self.limbs[i].leading_zeros() as usize,
            None => 0,
        }
    }

    /// Bit `i` of the magnitude (bit 0 is least significant).
    pub fn bit(&self, i: usize) -> bool {
        self.limbs
            .get(i / LIMB_BITS)
            .is_some_and(|&limb| (limb >> (i % LIMB_BITS)) & 1 == 1)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    pub fn is_one(&self) -> bool {
        !self.negative && self.limbs[0] == 1 && self.limbs[1..].iter().all(|&l| l == 0)
    }

    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Trim leading zero limbs and canonicalize the sign of zero.
    pub(crate) fn normalize(&mut self) {
        while self.limbs.len() > 1 && *self.limbs.last().unwrap() == 0 {
            self.limbs.pop();
        }
        if self.is_zero() {
            self.negative = false;
        }
    }

    /// Compare magnitudes, ignoring sign.
    pub(crate) fn cmp_mag(&self, other: &BigNum) -> Ordering {
        let a_bits = self.bit_len();
        let b_bits = other.bit_len();
        if a_bits != b_bits {
            return a_bits.cmp(&b_bits);
        }
        for i in (0..self.limbs.len().max(other.limbs.len())).rev() {
            let a = self.limbs.get(i).copied().unwrap_or(0);
            let b = other.limbs.get(i).copied().unwrap_or(0);
            if a != b {
                return a.cmp(&b);
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        self.is_negative() == other.is_negative() && self.cmp_mag(other) == Ordering::Equal
    }
}

impl Eq for BigNum {}

impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigNum {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_mag(other),
            (true, true) => other.cmp_mag(self),
        }
    }
}

impl std::fmt::Debug for BigNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let hex: String = self
            .to_bytes_be()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        write!(f, "BigNum({sign}0x{hex})")
    }
}
