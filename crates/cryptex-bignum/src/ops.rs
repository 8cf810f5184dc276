//! Arithmetic and modular operations.

use std::cmp::Ordering;

use cryptex_types::CryptoError;

use crate::bignum::{BigNum, DoubleLimb, Limb, LIMB_BITS};

impl BigNum {
    /// Sum `self + other`.
    pub fn add(&self, other: &BigNum) -> BigNum {
        if self.is_negative() == other.is_negative() {
            let mut out = add_mag(self, other);
            out.negative = self.is_negative();
            out.normalize();
            return out;
        }
        match self.cmp_mag(other) {
            Ordering::Equal => BigNum::zero(),
            Ordering::Greater => {
                let mut out = sub_mag(self, other);
                out.negative = self.is_negative();
                out.normalize();
                out
            }
            Ordering::Less => {
                let mut out = sub_mag(other, self);
                out.negative = other.is_negative();
                out.normalize();
                out
            }
        }
    }

    /// Difference `self - other`.
    pub fn sub(&self, other: &BigNum) -> BigNum {
        self.add(&other.neg())
    }

    /// Product `self * other`.
    pub fn mul(&self, other: &BigNum) -> BigNum {
        if self.is_zero() || other.is_zero() {
            return BigNum::zero();
        }
        let mut limbs = vec![0 as Limb; self.limbs.len() + other.limbs.len()];
        for (i, &a) in self.limbs.iter().enumerate() {
            let mut carry: Limb = 0;
            for (j, &b) in other.limbs.iter().enumerate() {
                let t = a as DoubleLimb * b as DoubleLimb
                    + limbs[i + j] as DoubleLimb
                    + carry as DoubleLimb;
                limbs[i + j] = t as Limb;
                carry = (t >> LIMB_BITS) as Limb;
            }
            limbs[i + other.limbs.len()] = carry;
        }
        let mut out = BigNum {
            limbs,
            negative: self.is_negative() != other.is_negative(),
        };
        out.normalize();
        out
    }

    /// Truncated division with remainder: `(quotient, remainder)` where the
    /// remainder carries the dividend's sign.
    pub fn div_rem(&self, divisor: &BigNum) -> Result<(BigNum, BigNum), CryptoError> {
        if divisor.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        let (mut q, mut r) = div_rem_mag(self, divisor);
        q.negative = !q.is_zero() && (self.is_negative() != divisor.is_negative());
        r.negative = !r.is_zero() && self.is_negative();
        Ok((q, r))
    }

    /// Reduce into the canonical residue range `[0, modulus)`.
    pub fn mod_reduce(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        if modulus.is_zero() || modulus.is_negative() {
            return Err(CryptoError::DivisionByZero);
        }
        if !self.is_negative() && self.cmp_mag(modulus) == Ordering::Less {
            return Ok(self.clone());
        }
        let (_, r) = self.div_rem(modulus)?;
        if r.is_negative() {
            Ok(r.add(modulus))
        } else {
            Ok(r)
        }
    }

    /// `(self + other) mod modulus`.
    pub fn mod_add(&self, other: &BigNum, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        self.add(other).mod_reduce(modulus)
    }

    /// `(self - other) mod modulus`.
    pub fn mod_sub(&self, other: &BigNum, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        self.sub(other).mod_reduce(modulus)
    }

    /// `(self * other) mod modulus`.
    pub fn mod_mul(&self, other: &BigNum, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        self.mul(other).mod_reduce(modulus)
    }

    /// Negation; zero stays non-negative.
    pub(crate) fn neg(&self) -> BigNum {
        let mut out = self.clone();
        if !out.is_zero() {
            out.negative = !out.negative;
        }
        out
    }

    /// Halve the magnitude in place.
    pub(crate) fn shr1_assign(&mut self) {
        let mut carry: Limb = 0;
        for limb in self.limbs.iter_mut().rev() {
            let next = *limb << (LIMB_BITS - 1);
            *limb = (*limb >> 1) | carry;
            carry = next;
        }
        self.normalize();
    }

    /// Double the magnitude in place.
    fn shl1_assign(&mut self) {
        let mut carry: Limb = 0;
        for limb in self.limbs.iter_mut() {
            let next = *limb >> (LIMB_BITS - 1);
            *limb = (*limb << 1) | carry;
            carry = next;
        }
        if carry != 0 {
            self.limbs.push(carry);
        }
    }

    fn set_bit(&mut self, i: usize) {
        let idx = i / LIMB_BITS;
        if idx >= self.limbs.len() {
            self.limbs.resize(idx + 1, 0);
        }
        self.limbs[idx] |= 1 << (i % LIMB_BITS);
    }
}

/// Magnitude addition.
fn add_mag(a: &BigNum, b: &BigNum) -> BigNum {
    let len = a.limbs.len().max(b.limbs.len());
    let mut limbs = vec![0 as Limb; len + 1];
    let mut carry: Limb = 0;
    for i in 0..len {
        let av = a.limbs.get(i).copied().unwrap_or(0);
        let bv = b.limbs.get(i).copied().unwrap_or(0);
        let t = av as DoubleLimb + bv as DoubleLimb + carry as DoubleLimb;
        limbs[i] = t as Limb;
        carry = (t >> LIMB_BITS) as Limb;
    }
    limbs[len] = carry;
    BigNum {
        limbs,
        negative: false,
    }
}

/// Magnitude subtraction; requires `|a| >= |b|`.
fn sub_mag(a: &BigNum, b: &BigNum) -> BigNum {
    let mut limbs = vec![0 as Limb; a.limbs.len()];
    let mut borrow: Limb = 0;
    for i in 0..a.limbs.len() {
        let bv = b.limbs.get(i).copied().unwrap_or(0);
        let (d1, b1) = a.limbs[i].overflowing_sub(bv);
        let (d2, b2) = d1.overflowing_sub(borrow);
        limbs[i] = d2;
        borrow = (b1 as Limb) + (b2 as Limb);
    }
    BigNum {
        limbs,
        negative: false,
    }
}

/// Binary long division on magnitudes.
fn div_rem_mag(a: &BigNum, b: &BigNum) -> (BigNum, BigNum) {
    if a.cmp_mag(b) == Ordering::Less {
        let mut r = a.clone();
        r.negative = false;
        return (BigNum::zero(), r);
    }

    let bits = a.bit_len();
    let mut quotient = BigNum::zero();
    quotient.limbs = vec![0; a.limbs.len()];
    let mut remainder = BigNum::zero();

    for i in (0..bits).rev() {
        remainder.shl1_assign();
        if a.bit(i) {
            remainder.limbs[0] |= 1;
        }
        if remainder.cmp_mag(b) != Ordering::Less {
            remainder = sub_mag(&remainder, b);
            remainder.normalize();
            quotient.set_bit(i);
        }
    }

    quotient.normalize();
    remainder.normalize();
    (quotient, remainder)
}
