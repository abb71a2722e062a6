#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Usage
//!
//! ## Importing a public key
//!
//! ```
//! use raw_rsa::{RawRsaKey, PublicKeyParts};
//!
//! // p = 61, q = 53
//! let key: RawRsaKey = RawRsaKey::new(&[0x0c, 0xa1], &[0x11]).expect("failed to import key");
//! assert_eq!(key.key_size(), 2);
//!
//! // 65^17 mod 3233 = 2790
//! let block = key.raw_transform(&[0x00, 0x41]).expect("failed to transform");
//! assert_eq!(block, [0x0a, 0xe6]);
//! ```
//!
//! ## Generating a key pair
//!
//! Only backends that report [`Backend::SUPPORTS_KEY_GENERATION`] can
//! generate keys; the others fail with [`Error::UnsupportedOperation`].
//!
//! ```
//! use raw_rsa::{backend::{BigNum, Blob}, Error, RawRsaKey};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//!
//! let mut rng = ChaCha8Rng::from_seed([42; 32]);
//!
//! let generated = RawRsaKey::<BigNum>::generate_key_components_with_rng(&mut rng, 512)
//!     .expect("failed to generate a key");
//! assert_eq!(generated.public_exponent(), [0x01, 0x00, 0x01]);
//!
//! let key = RawRsaKey::<Blob>::new(generated.modulus(), generated.public_exponent())
//!     .expect("failed to import key");
//! assert_eq!(key.key_size(), 64);
//!
//! assert!(matches!(
//!     RawRsaKey::<Blob>::generate_key_components_with_rng(&mut rng, 512),
//!     Err(Error::UnsupportedOperation { .. })
//! ));
//! ```
//!
//! # Backend selection
//!
//! [`RawRsaKey`] defaults to [`DefaultBackend`], which is the big-number
//! backend when the `bignum-backend` feature is enabled (the default) and
//! the blob backend otherwise.

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod backend;
pub mod errors;
pub mod traits;

mod dummy_rng;
mod key;

pub use crate::{
    backend::{Backend, DefaultBackend},
    errors::{Error, Result},
    key::{GeneratedKey, RawRsaKey},
    traits::{PrivateKeyParts, PublicKeyParts},
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
