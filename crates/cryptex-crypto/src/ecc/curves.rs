//! Curve parameter definitions.

use std::sync::OnceLock;

use cryptex_bignum::BigNum;

/// Parameters of a short Weierstrass curve y² = x³ + ax + b (mod p).
pub struct CurveParams {
    /// Prime field modulus.
    pub p: BigNum,
    /// Curve coefficient a.
    pub a: BigNum,
    /// Curve coefficient b.
    pub b: BigNum,
    /// Base point x-coordinate.
    pub gx: BigNum,
    /// Base point y-coordinate.
    pub gy: BigNum,
    /// Order of the base point.
    pub n: BigNum,
    /// Field element byte length.
    pub field_size: usize,
}

/// Parse a hex string into a BigNum.
fn bn(hex: &str) -> BigNum {
    let bytes: Vec<u8> = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect();
    BigNum::from_bytes_be(&bytes)
}

/// SM2P256V1 parameters, GB/T 32918.5-2017.
pub fn sm2_p256v1() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(|| CurveParams {
        p: bn("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF"),
        a: bn("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC"),
        b: bn("28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93"),
        gx: bn("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7"),
        gy: bn("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0"),
        n: bn("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123"),
        field_size: 32,
    })
}
