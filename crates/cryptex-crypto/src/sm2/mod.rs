//! SM2 elliptic-curve public-key algorithm, GB/T 32918.
//!
//! Key generation, hybrid public-key encryption, and digital signatures
//! over the SM2P256V1 curve, with the optional user-identity (ZA)
//! binding that folds the signer's identity and the curve parameters
//! into the message digest via SM3.
//!
//! Wire formats: ciphertext `C1 ‖ C2 ‖ C3` (uncompressed point, masked
//! message, 32-byte SM3 tag), signature `r ‖ s` (each zero-padded to 32
//! bytes), public key `0x04 ‖ x ‖ y`.
//!
//! The encryption keystream reproduces the historical behavior of this
//! toolkit rather than the standard counter-mode KDF: block 0 is
//! SM3(x₂‖y₂) and block j ≥ 1 is SM3(x₂‖y₂‖j) with j a single byte, so
//! ciphertexts produced by earlier versions remain decryptable. The
//! single counter byte caps a message at 8 KiB; longer inputs are
//! rejected rather than silently reusing keystream.

use cryptex_bignum::BigNum;
use cryptex_types::CryptoError;
use subtle::ConstantTimeEq;

use crate::ecc::{sm2_p256v1, CurveParams, EcPoint};
use crate::sm3::{Sm3, SM3_DIGEST_SIZE};

/// Private scalar size in bytes.
pub const SM2_PRIVATE_KEY_SIZE: usize = 32;

/// Uncompressed public key size in bytes.
pub const SM2_PUBLIC_KEY_SIZE: usize = 65;

/// Signature size in bytes (r and s, 32 each).
pub const SM2_SIGNATURE_SIZE: usize = 64;

/// Default user identity for ZA computation (GB/T 32918.2).
pub const SM2_DEFAULT_UID: &[u8] = b"1234567812345678";

// The keystream counter is one byte, so at most 256 SM3 blocks.
const MAX_PLAINTEXT_LEN: usize = 256 * SM3_DIGEST_SIZE;

const C1_LEN: usize = 1 + 2 * 32;

/// An SM2 public key: an affine point on sm2p256v1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: EcPoint,
}

/// An SM2 private key: the scalar d with its public point d·G.
#[derive(Clone)]
pub struct PrivateKey {
    d: BigNum,
    public: PublicKey,
}

impl PrivateKey {
    /// Generate a fresh key pair; d is uniform in [1, n−2] so that
    /// (1 + d) stays invertible during signing.
    pub fn generate() -> Result<Self, CryptoError> {
        let params = sm2_p256v1();
        let n_minus_1 = params.n.sub(&BigNum::one());
        let d = BigNum::random_range(&n_minus_1)?;
        Self::from_scalar(d, params)
    }

    /// Reconstruct a key pair from big-endian private-key bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() || bytes.len() > SM2_PRIVATE_KEY_SIZE {
            return Err(CryptoError::InvalidPrivateKey);
        }
        Self::from_scalar(BigNum::from_bytes_be(bytes), sm2_p256v1())
    }

    fn from_scalar(d: BigNum, params: &CurveParams) -> Result<Self, CryptoError> {
        let n_minus_1 = params.n.sub(&BigNum::one());
        if d.is_zero() || d >= n_minus_1 {
            return Err(CryptoError::InvalidPrivateKey);
        }
        let point = EcPoint::generator(params).scalar_mul(&d, params)?;
        Ok(Self {
            d,
            public: PublicKey { point },
        })
    }

    /// Export d as minimal big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.d.to_bytes_be()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Sign a precomputed digest e, emitting r ‖ s.
    ///
    /// An ephemeral k yielding r = 0, r + k = n, or s = 0 is discarded
    /// and redrawn; nothing else retries.
    pub fn sign(&self, digest: &[u8]) -> Result<[u8; SM2_SIGNATURE_SIZE], CryptoError> {
        let params = sm2_p256v1();
        let n = &params.n;
        let e = BigNum::from_bytes_be(digest);
        let g = EcPoint::generator(params);

        loop {
            let k = BigNum::random_range(n)?;
            let kg = g.scalar_mul(&k, params)?;
            if kg.is_infinity() {
                continue;
            }

            let r = e.mod_add(kg.x(), n)?;
            if r.is_zero() || r.add(&k) == *n {
                continue;
            }

            // s = (1 + d)⁻¹ · (k − r·d) mod n
            let inv = self.d.mod_add(&BigNum::one(), n)?.mod_inv(n)?;
            let rd = r.mod_mul(&self.d, n)?;
            let s = inv.mod_mul(&k.mod_sub(&rd, n)?, n)?;
            if s.is_zero() {
                continue;
            }

            let mut signature = [0u8; SM2_SIGNATURE_SIZE];
            signature[..32].copy_from_slice(&r.to_bytes_be_padded(32)?);
            signature[32..].copy_from_slice(&s.to_bytes_be_padded(32)?);
            return Ok(signature);
        }
    }

    /// Sign a message bound to a user identity: e = SM3(ZA ‖ M), then
    /// [`sign`](PrivateKey::sign). An empty uid selects
    /// [`SM2_DEFAULT_UID`].
    pub fn sign_with_id(
        &self,
        message: &[u8],
        uid: &[u8],
    ) -> Result<[u8; SM2_SIGNATURE_SIZE], CryptoError> {
        let digest = identity_digest(&self.public, message, uid)?;
        self.sign(&digest)
    }

    /// Decrypt C1 ‖ C2 ‖ C3.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let params = sm2_p256v1();

        if ciphertext.len() < C1_LEN + SM3_DIGEST_SIZE + 1 {
            return Err(CryptoError::InvalidCiphertext);
        }
        if ciphertext[0] != 0x04 {
            return Err(CryptoError::InvalidCiphertext);
        }
        let c1 = EcPoint::new(
            BigNum::from_bytes_be(&ciphertext[1..33]),
            BigNum::from_bytes_be(&ciphertext[33..65]),
        );
        if !c1.is_on_curve(params)? {
            return Err(CryptoError::InvalidCiphertext);
        }

        let c2 = &ciphertext[C1_LEN..ciphertext.len() - SM3_DIGEST_SIZE];
        let c3 = &ciphertext[ciphertext.len() - SM3_DIGEST_SIZE..];
        if c2.len() > MAX_PLAINTEXT_LEN {
            return Err(CryptoError::DataTooLarge);
        }

        let shared = c1.scalar_mul(&self.d, params)?;
        if shared.is_infinity() {
            return Err(CryptoError::DecryptionFailed);
        }
        let x2 = shared.x().to_bytes_be_padded(params.field_size)?;
        let y2 = shared.y().to_bytes_be_padded(params.field_size)?;

        let keystream = kdf(&x2, &y2, c2.len());
        let mut plaintext: Vec<u8> = c2
            .iter()
            .zip(keystream.iter())
            .map(|(&c, &k)| c ^ k)
            .collect();

        let mut tag = Sm3::new();
        tag.update(&x2);
        tag.update(&plaintext);
        tag.update(&y2);
        if tag.sum().ct_eq(c3).unwrap_u8() != 1 {
            return Err(CryptoError::DecryptionFailed);
        }

        // Empty input was encrypted as a single 0x00 marker byte.
        if plaintext == [0x00] {
            plaintext.clear();
        }
        Ok(plaintext)
    }
}

impl PublicKey {
    /// Decode an uncompressed public key, validating curve membership.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let point = EcPoint::from_uncompressed(sm2_p256v1(), bytes)?;
        Ok(Self { point })
    }

    /// Encode as 0x04 ‖ x ‖ y.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        self.point.to_uncompressed(sm2_p256v1())
    }

    /// Verify an r ‖ s signature over a precomputed digest. Returns a
    /// plain boolean; malformed input is simply a failed verification.
    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> bool {
        self.verify_digest(digest, signature).unwrap_or(false)
    }

    /// Verify a message bound to a user identity (see
    /// [`PrivateKey::sign_with_id`]).
    pub fn verify_with_id(&self, message: &[u8], signature: &[u8], uid: &[u8]) -> bool {
        match identity_digest(self, message, uid) {
            Ok(digest) => self.verify(&digest, signature),
            Err(_) => false,
        }
    }

    fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let params = sm2_p256v1();
        let n = &params.n;

        if signature.len() != SM2_SIGNATURE_SIZE {
            return Ok(false);
        }
        if !self.point.is_on_curve(params)? {
            return Ok(false);
        }

        let r = BigNum::from_bytes_be(&signature[..32]);
        let s = BigNum::from_bytes_be(&signature[32..]);
        if r.is_zero() || r >= *n || s.is_zero() || s >= *n {
            return Ok(false);
        }

        let t = r.mod_add(&s, n)?;
        if t.is_zero() {
            return Ok(false);
        }

        // (x1, y1) = s·G + t·Q
        let sg = EcPoint::generator(params).scalar_mul(&s, params)?;
        let tq = self.point.scalar_mul(&t, params)?;
        let point = sg.add(&tq, params)?;
        if point.is_infinity() {
            return Ok(false);
        }

        let e = BigNum::from_bytes_be(digest);
        Ok(e.mod_add(point.x(), n)? == r)
    }

    /// Hybrid encryption to this public key: C1 ‖ C2 ‖ C3.
    ///
    /// Empty input is replaced by a single 0x00 byte so C2 is never
    /// empty on the wire; decrypt strips it again.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let params = sm2_p256v1();
        let message: &[u8] = if plaintext.is_empty() {
            &[0x00]
        } else {
            plaintext
        };
        if message.len() > MAX_PLAINTEXT_LEN {
            return Err(CryptoError::DataTooLarge);
        }

        let g = EcPoint::generator(params);
        loop {
            let k = BigNum::random_range(&params.n)?;

            let c1_point = g.scalar_mul(&k, params)?;
            if c1_point.is_infinity() {
                continue;
            }
            let shared = self.point.scalar_mul(&k, params)?;
            if shared.is_infinity() {
                continue;
            }

            let x2 = shared.x().to_bytes_be_padded(params.field_size)?;
            let y2 = shared.y().to_bytes_be_padded(params.field_size)?;

            let keystream = kdf(&x2, &y2, message.len());
            if keystream.iter().all(|&b| b == 0) {
                continue;
            }

            let c2: Vec<u8> = message
                .iter()
                .zip(keystream.iter())
                .map(|(&m, &k)| m ^ k)
                .collect();

            let mut tag = Sm3::new();
            tag.update(&x2);
            tag.update(message);
            tag.update(&y2);
            let c3 = tag.sum();

            let mut ciphertext = c1_point.to_uncompressed(params)?;
            ciphertext.extend_from_slice(&c2);
            ciphertext.extend_from_slice(&c3);
            return Ok(ciphertext);
        }
    }
}

/// The legacy keystream: block 0 = SM3(x₂‖y₂), block j ≥ 1 =
/// SM3(x₂‖y₂‖j) with a single counter byte.
fn kdf(x2: &[u8], y2: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut block: usize = 0;
    while out.len() < len {
        let mut hasher = Sm3::new();
        hasher.update(x2);
        hasher.update(y2);
        if block > 0 {
            hasher.update(&[block as u8]);
        }
        let digest = hasher.sum();
        let take = (len - out.len()).min(SM3_DIGEST_SIZE);
        out.extend_from_slice(&digest[..take]);
        block += 1;
    }
    out
}

/// ZA = SM3(ENTL ‖ uid ‖ a ‖ b ‖ Gx ‖ Gy ‖ Qx ‖ Qy), all field elements
/// zero-padded to 32 bytes, then e = SM3(ZA ‖ M).
fn identity_digest(
    public: &PublicKey,
    message: &[u8],
    uid: &[u8],
) -> Result<[u8; SM3_DIGEST_SIZE], CryptoError> {
    let params = sm2_p256v1();
    let uid = if uid.is_empty() { SM2_DEFAULT_UID } else { uid };

    let mut za = Sm3::new();
    let entl = (uid.len() * 8) as u16;
    za.update(&entl.to_be_bytes());
    za.update(uid);
    za.update(&params.a.to_bytes_be_padded(params.field_size)?);
    za.update(&params.b.to_bytes_be_padded(params.field_size)?);
    za.update(&params.gx.to_bytes_be_padded(params.field_size)?);
    za.update(&params.gy.to_bytes_be_padded(params.field_size)?);
    za.update(&public.point.x().to_bytes_be_padded(params.field_size)?);
    za.update(&public.point.y().to_bytes_be_padded(params.field_size)?);

    let mut digest = Sm3::new();
    digest.update(&za.sum());
    digest.update(message);
    Ok(digest.sum())
}
