//! Modes of operation.
//!
//! Each adapter borrows a [`BlockCipher`](crate::cipher::BlockCipher) and
//! owns a copy of its IV, nonce, or counter. The stored IV is never
//! mutated: every encrypt/decrypt call copies it into a local register, so
//! one adapter may serve several sequential calls and each produces the
//! same well-defined stream.
//!
//! ECB and CBC require block-aligned input (pair them with a
//! [`padding`](crate::padding) scheme); CFB, OFB, CTR, and GCM accept any
//! length. GCM is the only authenticated mode and is driven exclusively
//! through [`Gcm::seal`] and [`Gcm::open`].

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod gcm;
mod ghash;
mod ofb;

pub use cbc::Cbc;
pub use cfb::Cfb;
pub use ctr::Ctr;
pub use ecb::Ecb;
pub use gcm::{Gcm, GCM_DEFAULT_TAG_SIZE, GCM_NONCE_SIZE};
pub use ofb::Ofb;
