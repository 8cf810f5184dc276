//! Hexadecimal fraction digits of π for the Blowfish tables.
//!
//! Blowfish seeds its P-array and S-boxes with the first 8,336 hex digits
//! of π. Rather than embedding 1,042 opaque word literals, this module
//! evaluates Machin's formula π = 16·atan(1/5) − 4·atan(1/239) in
//! fixed-point integer arithmetic with 128 guard bits and slices the
//! fraction into 32-bit words. The result is pinned by the known P-array
//! values in the cipher's tests.

/// Fixed-point number: little-endian `u64` limbs, the last limb holding
/// the integer part and the rest the fraction.
struct Fixed {
    limbs: Vec<u64>,
}

impl Fixed {
    fn zero(frac_limbs: usize) -> Self {
        Self {
            limbs: vec![0; frac_limbs + 1],
        }
    }

    /// The value 1/x.
    fn one_over(x: u64, frac_limbs: usize) -> Self {
        let mut out = Self::zero(frac_limbs);
        *out.limbs.last_mut().unwrap() = 1;
        out.div_small_assign(x);
        out
    }

    fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    fn div_small_assign(&mut self, divisor: u64) {
        let mut rem: u128 = 0;
        for limb in self.limbs.iter_mut().rev() {
            let cur = (rem << 64) | u128::from(*limb);
            *limb = (cur / u128::from(divisor)) as u64;
            rem = cur % u128::from(divisor);
        }
    }

    fn mul_small_assign(&mut self, factor: u64) {
        let mut carry: u128 = 0;
        for limb in self.limbs.iter_mut() {
            let cur = u128::from(*limb) * u128::from(factor) + carry;
            *limb = cur as u64;
            carry = cur >> 64;
        }
    }

    fn add_assign(&mut self, other: &Fixed) {
        let mut carry: u128 = 0;
        for (a, &b) in self.limbs.iter_mut().zip(other.limbs.iter()) {
            let cur = u128::from(*a) + u128::from(b) + carry;
            *a = cur as u64;
            carry = cur >> 64;
        }
    }

    fn sub_assign(&mut self, other: &Fixed) {
        let mut borrow: u64 = 0;
        for (a, &b) in self.limbs.iter_mut().zip(other.limbs.iter()) {
            let (d1, b1) = a.overflowing_sub(b);
            let (d2, b2) = d1.overflowing_sub(borrow);
            *a = d2;
            borrow = u64::from(b1) + u64::from(b2);
        }
    }
}

/// Gregory series for atan(1/x) with truncating division; every term
/// shrinks by x², so convergence is linear in the fraction width.
fn atan_inv(x: u64, frac_limbs: usize) -> Fixed {
    let mut term = Fixed::one_over(x, frac_limbs);
    let mut sum = Fixed::one_over(x, frac_limbs);
    let x_squared = x * x;

    let mut k: u64 = 1;
    loop {
        term.div_small_assign(x_squared);
        if term.is_zero() {
            break;
        }
        let mut t = Fixed {
            limbs: term.limbs.clone(),
        };
        t.div_small_assign(2 * k + 1);
        if k % 2 == 1 {
            sum.sub_assign(&t);
        } else {
            sum.add_assign(&t);
        }
        k += 1;
    }
    sum
}

/// The first `count` 32-bit words of π's hexadecimal fraction,
/// most significant first (0x243F6A88, 0x85A308D3, ...).
pub(super) fn pi_fraction_words(count: usize) -> Vec<u32> {
    // Two guard limbs absorb the truncation error of the series terms.
    let frac_limbs = count.div_ceil(2) + 2;

    let mut pi = atan_inv(5, frac_limbs);
    pi.mul_small_assign(16);
    let mut correction = atan_inv(239, frac_limbs);
    correction.mul_small_assign(4);
    pi.sub_assign(&correction);

    let mut words = Vec::with_capacity(count + 1);
    for i in (0..frac_limbs).rev() {
        let limb = pi.limbs[i];
        words.push((limb >> 32) as u32);
        words.push(limb as u32);
        if words.len() >= count {
            break;
        }
    }
    words.truncate(count);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_part_is_three() {
        let frac_limbs = 4;
        let mut pi = atan_inv(5, frac_limbs);
        pi.mul_small_assign(16);
        let mut c = atan_inv(239, frac_limbs);
        c.mul_small_assign(4);
        pi.sub_assign(&c);
        assert_eq!(*pi.limbs.last().unwrap(), 3);
    }

    #[test]
    fn test_leading_fraction_words() {
        let words = pi_fraction_words(4);
        assert_eq!(words, [0x243f6a88, 0x85a308d3, 0x13198a2e, 0x03707344]);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(pi_fraction_words(7).len(), 7);
        assert_eq!(pi_fraction_words(1042).len(), 1042);
    }
}
