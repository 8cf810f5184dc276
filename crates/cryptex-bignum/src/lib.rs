//! Arbitrary-precision integer arithmetic for the cryptex toolkit.
//!
//! Provides the [`BigNum`] type backing the SM2 elliptic-curve subsystem:
//! sign-magnitude integers on 64-bit limbs with the modular operations the
//! curve arithmetic needs. Values are zeroized on drop.

mod bignum;
mod gcd;
mod ops;
mod rand;

pub use bignum::BigNum;
