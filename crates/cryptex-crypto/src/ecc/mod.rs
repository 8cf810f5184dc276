//! Elliptic-curve arithmetic for the SM2 subsystem.
//!
//! Affine-coordinate point arithmetic over a short Weierstrass curve,
//! with the point at infinity encoded as (0, 0). Scalar multiplication
//! is a plain left-to-right double-and-add; it is variable-time, which
//! is acceptable for this study library (a production port would use a
//! constant-time ladder over projective coordinates).

mod curves;

pub use curves::{sm2_p256v1, CurveParams};

use cryptex_bignum::BigNum;
use cryptex_types::CryptoError;

/// An affine curve point; (0, 0) is the point at infinity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcPoint {
    x: BigNum,
    y: BigNum,
}

impl EcPoint {
    pub fn new(x: BigNum, y: BigNum) -> Self {
        Self { x, y }
    }

    /// The identity element.
    pub fn infinity() -> Self {
        Self {
            x: BigNum::zero(),
            y: BigNum::zero(),
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn x(&self) -> &BigNum {
        &self.x
    }

    pub fn y(&self) -> &BigNum {
        &self.y
    }

    /// The curve's base point G.
    pub fn generator(params: &CurveParams) -> Self {
        Self {
            x: params.gx.clone(),
            y: params.gy.clone(),
        }
    }

    /// Check y² ≡ x³ + ax + b (mod p) with both coordinates in range.
    /// The point at infinity is not considered on the curve.
    pub fn is_on_curve(&self, params: &CurveParams) -> Result<bool, CryptoError> {
        if self.is_infinity() {
            return Ok(false);
        }
        let p = &params.p;
        if self.x >= *p || self.y >= *p {
            return Ok(false);
        }

        let y_squared = self.y.mod_mul(&self.y, p)?;
        let x_cubed = self.x.mod_mul(&self.x, p)?.mod_mul(&self.x, p)?;
        let ax = params.a.mod_mul(&self.x, p)?;
        let rhs = x_cubed.mod_add(&ax, p)?.mod_add(&params.b, p)?;
        Ok(y_squared == rhs)
    }

    /// Point addition by the affine chord formula; handles the identity
    /// and opposite points (equal x, distinct y sum to infinity).
    pub fn add(&self, other: &EcPoint, params: &CurveParams) -> Result<EcPoint, CryptoError> {
        if self.is_infinity() {
            return Ok(other.clone());
        }
        if other.is_infinity() {
            return Ok(self.clone());
        }

        let p = &params.p;
        if self.x == other.x {
            if self.y != other.y {
                return Ok(EcPoint::infinity());
            }
            return self.double(params);
        }

        // λ = (y2 − y1) / (x2 − x1)
        let numerator = other.y.mod_sub(&self.y, p)?;
        let denominator = other.x.mod_sub(&self.x, p)?;
        let lambda = numerator.mod_mul(&denominator.mod_inv(p)?, p)?;

        // x3 = λ² − x1 − x2; y3 = λ(x1 − x3) − y1
        let x3 = lambda
            .mod_mul(&lambda, p)?
            .mod_sub(&self.x, p)?
            .mod_sub(&other.x, p)?;
        let y3 = self
            .x
            .mod_sub(&x3, p)?
            .mod_mul(&lambda, p)?
            .mod_sub(&self.y, p)?;

        Ok(EcPoint::new(x3, y3))
    }

    /// Point doubling by the affine tangent formula.
    pub fn double(&self, params: &CurveParams) -> Result<EcPoint, CryptoError> {
        if self.y.is_zero() {
            // Covers the identity and the order-2 case alike.
            return Ok(EcPoint::infinity());
        }

        let p = &params.p;

        // λ = (3x² + a) / (2y)
        let three_x_squared = self
            .x
            .mod_mul(&self.x, p)?
            .mod_mul(&BigNum::from_u64(3), p)?;
        let numerator = three_x_squared.mod_add(&params.a, p)?;
        let denominator = self.y.mod_add(&self.y, p)?;
        let lambda = numerator.mod_mul(&denominator.mod_inv(p)?, p)?;

        // x3 = λ² − 2x; y3 = λ(x − x3) − y
        let x3 = lambda
            .mod_mul(&lambda, p)?
            .mod_sub(&self.x, p)?
            .mod_sub(&self.x, p)?;
        let y3 = self
            .x
            .mod_sub(&x3, p)?
            .mod_mul(&lambda, p)?
            .mod_sub(&self.y, p)?;

        Ok(EcPoint::new(x3, y3))
    }

    /// Scalar multiplication k·P, left-to-right double-and-add over the
    /// bit length of k.
    pub fn scalar_mul(&self, k: &BigNum, params: &CurveParams) -> Result<EcPoint, CryptoError> {
        let mut acc = EcPoint::infinity();
        for i in (0..k.bit_len()).rev() {
            acc = acc.double(params)?;
            if k.bit(i) {
                acc = acc.add(self, params)?;
            }
        }
        Ok(acc)
    }

    /// Encode as 0x04 ‖ x ‖ y with fixed-width coordinates.
    pub fn to_uncompressed(&self, params: &CurveParams) -> Result<Vec<u8>, CryptoError> {
        let mut out = Vec::with_capacity(1 + 2 * params.field_size);
        out.push(0x04);
        out.extend_from_slice(&self.x.to_bytes_be_padded(params.field_size)?);
        out.extend_from_slice(&self.y.to_bytes_be_padded(params.field_size)?);
        Ok(out)
    }

    /// Decode an uncompressed point, verifying curve membership.
    pub fn from_uncompressed(params: &CurveParams, data: &[u8]) -> Result<Self, CryptoError> {
        let fs = params.field_size;
        if data.len() != 1 + 2 * fs || data[0] != 0x04 {
            return Err(CryptoError::InvalidPublicKey);
        }
        let point = EcPoint::new(
            BigNum::from_bytes_be(&data[1..1 + fs]),
            BigNum::from_bytes_be(&data[1 + fs..]),
        );
        if !point.is_on_curve(params)? {
            return Err(CryptoError::InvalidPublicKey);
        }
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_on_curve() {
        let params = sm2_p256v1();
        let g = EcPoint::generator(params);
        assert!(g.is_on_curve(params).unwrap());
    }

    #[test]
    fn test_infinity_is_identity() {
        let params = sm2_p256v1();
        let g = EcPoint::generator(params);
        let inf = EcPoint::infinity();
        assert_eq!(g.add(&inf, params).unwrap(), g);
        assert_eq!(inf.add(&g, params).unwrap(), g);
        assert!(!inf.is_on_curve(params).unwrap());
    }

    #[test]
    fn test_double_equals_add_to_self() {
        let params = sm2_p256v1();
        let g = EcPoint::generator(params);
        assert_eq!(g.double(params).unwrap(), g.add(&g, params).unwrap());
    }

    #[test]
    fn test_scalar_distributivity() {
        // (5 + 7)·G == 5·G + 7·G, exercising add, double, and mixed cases.
        let params = sm2_p256v1();
        let g = EcPoint::generator(params);
        let five = g.scalar_mul(&BigNum::from_u64(5), params).unwrap();
        let seven = g.scalar_mul(&BigNum::from_u64(7), params).unwrap();
        let twelve = g.scalar_mul(&BigNum::from_u64(12), params).unwrap();
        assert_eq!(five.add(&seven, params).unwrap(), twelve);
        assert!(twelve.is_on_curve(params).unwrap());
    }

    #[test]
    fn test_order_times_generator_is_infinity() {
        let params = sm2_p256v1();
        let g = EcPoint::generator(params);
        let result = g.scalar_mul(&params.n, params).unwrap();
        assert!(result.is_infinity());
    }

    #[test]
    fn test_opposite_points_sum_to_infinity() {
        let params = sm2_p256v1();
        let g = EcPoint::generator(params);
        let neg_g = EcPoint::new(g.x().clone(), params.p.sub(g.y()));
        assert!(neg_g.is_on_curve(params).unwrap());
        assert!(g.add(&neg_g, params).unwrap().is_infinity());
    }

    #[test]
    fn test_uncompressed_roundtrip() {
        let params = sm2_p256v1();
        let point = EcPoint::generator(params)
            .scalar_mul(&BigNum::from_u64(0xdead_beef), params)
            .unwrap();
        let encoded = point.to_uncompressed(params).unwrap();
        assert_eq!(encoded.len(), 65);
        assert_eq!(encoded[0], 0x04);
        assert_eq!(EcPoint::from_uncompressed(params, &encoded).unwrap(), point);
    }

    #[test]
    fn test_decode_rejects_malformed_points() {
        let params = sm2_p256v1();
        let g = EcPoint::generator(params);
        let mut encoded = g.to_uncompressed(params).unwrap();

        assert!(EcPoint::from_uncompressed(params, &encoded[..64]).is_err());
        encoded[0] = 0x03;
        assert!(EcPoint::from_uncompressed(params, &encoded).is_err());
        encoded[0] = 0x04;
        encoded[40] ^= 0x01; // knock the point off the curve
        assert!(EcPoint::from_uncompressed(params, &encoded).is_err());
    }
}
