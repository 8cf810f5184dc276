//! Greatest common divisor and modular inverse.

use std::cmp::Ordering;

use cryptex_types::CryptoError;

use crate::bignum::BigNum;

impl BigNum {
    /// Greatest common divisor of the magnitudes, by the binary (Stein)
    /// algorithm: only shifts, comparisons, and subtractions.
    pub fn gcd(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        if self.is_zero() && other.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        let mut a = self.clone();
        a.negative = false;
        let mut b = other.clone();
        b.negative = false;
        if a.is_zero() {
            return Ok(b);
        }
        if b.is_zero() {
            return Ok(a);
        }

        // Factor out the common power of two.
        let mut shift = 0usize;
        while a.is_even() && b.is_even() {
            a.shr1_assign();
            b.shr1_assign();
            shift += 1;
        }
        while a.is_even() {
            a.shr1_assign();
        }
        loop {
            while b.is_even() {
                b.shr1_assign();
            }
            // Both odd here; keep the smaller in `a`.
            if a.cmp_mag(&b) == Ordering::Greater {
                std::mem::swap(&mut a, &mut b);
            }
            b = b.sub(&a);
            if b.is_zero() {
                break;
            }
        }

        for _ in 0..shift {
            a = a.add(&a);
        }
        Ok(a)
    }

    /// Modular inverse `self^(-1) mod modulus` for an odd modulus, by the
    /// binary extended-GCD algorithm. Every modulus in this toolkit (the SM2
    /// field prime and group order) is odd.
    ///
    /// Returns `NoInverse` when `gcd(self, modulus) != 1` or the modulus is
    /// even or trivial.
    pub fn mod_inv(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        if modulus.is_zero() || modulus.is_one() || modulus.is_even() {
            return Err(CryptoError::NoInverse);
        }

        let a = self.mod_reduce(modulus)?;
        if a.is_zero() {
            return Err(CryptoError::NoInverse);
        }

        // Invariants: x1 * a ≡ u (mod m) and x2 * a ≡ v (mod m).
        let mut u = a;
        let mut v = modulus.clone();
        let mut x1 = BigNum::one();
        let mut x2 = BigNum::zero();

        loop {
            if u.is_one() {
                return x1.mod_reduce(modulus);
            }
            if v.is_one() {
                return x2.mod_reduce(modulus);
            }
            if u.is_zero() || v.is_zero() {
                return Err(CryptoError::NoInverse);
            }

            while u.is_even() {
                u.shr1_assign();
                if x1.is_odd() {
                    x1 = x1.add(modulus);
                }
                x1.shr1_assign();
            }
            while v.is_even() {
                v.shr1_assign();
                if x2.is_odd() {
                    x2 = x2.add(modulus);
                }
                x2.shr1_assign();
            }

            if u.cmp_mag(&v) != Ordering::Less {
                u = u.sub(&v);
                x1 = if x1 >= x2 {
                    x1.sub(&x2)
                } else {
                    x1.add(modulus).sub(&x2)
                };
            } else {
                v = v.sub(&u);
                x2 = if x2 >= x1 {
                    x2.sub(&x1)
                } else {
                    x2.add(modulus).sub(&x1)
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_basic() {
        let a = BigNum::from_u64(12);
        let b = BigNum::from_u64(8);
        assert_eq!(a.gcd(&b).unwrap(), BigNum::from_u64(4));
    }

    #[test]
    fn test_gcd_coprime() {
        let a = BigNum::from_u64(17);
        let b = BigNum::from_u64(13);
        assert_eq!(a.gcd(&b).unwrap(), BigNum::one());
    }

    #[test]
    fn test_gcd_with_zero() {
        let a = BigNum::from_u64(42);
        let z = BigNum::zero();
        assert_eq!(a.gcd(&z).unwrap(), a);
        assert_eq!(z.gcd(&a).unwrap(), a);
        assert!(z.gcd(&z).is_err());
    }

    #[test]
    fn test_gcd_powers_of_two() {
        let a = BigNum::from_u64(96);
        let b = BigNum::from_u64(160);
        assert_eq!(a.gcd(&b).unwrap(), BigNum::from_u64(32));
    }

    #[test]
    fn test_mod_inv_basic() {
        // 3 * 5 = 15 ≡ 1 (mod 7)
        let inv = BigNum::from_u64(3).mod_inv(&BigNum::from_u64(7)).unwrap();
        assert_eq!(inv, BigNum::from_u64(5));
    }

    #[test]
    fn test_mod_inv_verifies() {
        let m = BigNum::from_u64(0xffff_ffff_ffff_ffc5); // a large odd modulus
        for v in [3u64, 17, 0x1234_5678, 0xdead_beef_1235] {
            let a = BigNum::from_u64(v);
            let inv = a.mod_inv(&m).unwrap();
            assert_eq!(a.mod_mul(&inv, &m).unwrap(), BigNum::one(), "v = {v}");
        }
    }

    #[test]
    fn test_mod_inv_no_inverse() {
        // gcd(6, 9) = 3
        let a = BigNum::from_u64(6);
        let m = BigNum::from_u64(9);
        assert!(a.mod_inv(&m).is_err());
    }

    #[test]
    fn test_mod_inv_of_zero_and_trivial_modulus() {
        assert!(BigNum::zero().mod_inv(&BigNum::from_u64(7)).is_err());
        assert!(BigNum::from_u64(3).mod_inv(&BigNum::one()).is_err());
        assert!(BigNum::from_u64(3).mod_inv(&BigNum::zero()).is_err());
    }
}
