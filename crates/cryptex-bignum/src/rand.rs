//! Random big number generation using OS randomness.

use cryptex_types::CryptoError;

use crate::bignum::BigNum;

impl BigNum {
    /// Generate a uniform random value in `[1, upper)` by rejection
    /// sampling over OS randomness.
    pub fn random_range(upper: &BigNum) -> Result<BigNum, CryptoError> {
        if upper.is_zero() || upper.is_one() || upper.is_negative() {
            return Err(CryptoError::RandFail);
        }

        let bits = upper.bit_len();
        let num_bytes = bits.div_ceil(8);
        let excess_bits = num_bytes * 8 - bits;

        loop {
            let mut buf = vec![0u8; num_bytes];
            getrandom::getrandom(&mut buf).map_err(|_| CryptoError::RandFail)?;
            if excess_bits > 0 {
                buf[0] &= 0xff >> excess_bits;
            }

            let candidate = BigNum::from_bytes_be(&buf);
            if !candidate.is_zero() && candidate < *upper {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_range_bounds() {
        let upper = BigNum::from_u64(1000);
        for _ in 0..50 {
            let r = BigNum::random_range(&upper).unwrap();
            assert!(!r.is_zero());
            assert!(r < upper);
        }
    }

    #[test]
    fn test_random_range_wide() {
        let upper = BigNum::from_bytes_be(&[0xff; 32]);
        let a = BigNum::random_range(&upper).unwrap();
        let b = BigNum::random_range(&upper).unwrap();
        // 256-bit collisions do not happen by accident.
        assert_ne!(a, b);
        assert!(a < upper && b < upper);
    }

    #[test]
    fn test_random_range_rejects_trivial_bounds() {
        assert!(BigNum::random_range(&BigNum::zero()).is_err());
        assert!(BigNum::random_range(&BigNum::one()).is_err());
    }

    #[test]
    fn test_random_range_tiny_bound() {
        // upper = 2 forces the only possible output, 1.
        let upper = BigNum::from_u64(2);
        for _ in 0..10 {
            assert_eq!(BigNum::random_range(&upper).unwrap(), BigNum::one());
        }
    }
}
