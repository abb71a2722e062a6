//! Provider backends performing the actual big-integer work.
//!
//! A [`Backend`] is a strategy selected at build time: every [`RawRsaKey`]
//! is parameterized by one, and [`DefaultBackend`] names the one chosen by the
//! crate's cargo features. Two backends ship with the crate:
//!
//! - [`BigNum`]: an object-based provider. Keys are big-number objects,
//!   the raw transform only accepts full-size blocks, and key generation is
//!   supported.
//! - [`Blob`]: a blob/handle-based provider. Public keys are serialized into
//!   a binary key blob which a process-wide algorithm provider imports into
//!   an opaque handle. Key generation is not supported.
//!
//! Both are always compiled, so either can be named explicitly regardless of
//! which one is the default.
//!
//! [`RawRsaKey`]: crate::RawRsaKey

pub mod bignum;
pub mod blob;

use rand_core::CryptoRngCore;

use crate::errors::{Error, Result, TransformReason};
use crate::key::GeneratedKey;
use crate::traits::PublicKeyParts;

pub use self::{bignum::BigNum, blob::Blob};

/// Backend used by [`RawRsaKey`](crate::RawRsaKey) when none is named.
#[cfg(feature = "bignum-backend")]
pub type DefaultBackend = BigNum;

/// Backend used by [`RawRsaKey`](crate::RawRsaKey) when none is named.
#[cfg(not(feature = "bignum-backend"))]
pub type DefaultBackend = Blob;

/// A cryptographic provider able to import RSA keys and apply the raw
/// transform.
///
/// Output buffers follow a two-call protocol: calling a transform with
/// `output: None` returns the number of bytes the provider will produce,
/// calling it with a buffer writes the block and returns the number of bytes
/// written.
pub trait Backend {
    /// Provider-owned key object. Dropping it releases the provider resources.
    type Handle: PublicKeyParts;

    /// Human-readable backend name, used in errors and logs.
    const NAME: &'static str;

    /// Whether [`Backend::generate_key_pair`] is implemented.
    const SUPPORTS_KEY_GENERATION: bool;

    /// Build a key object from a big-endian modulus and public exponent.
    fn import_public_key(modulus: &[u8], public_exponent: &[u8]) -> Result<Self::Handle>;

    /// Build a key object that also carries a private exponent.
    fn import_private_key(
        _modulus: &[u8],
        _public_exponent: &[u8],
        _private_exponent: &[u8],
    ) -> Result<Self::Handle> {
        Err(Error::UnsupportedOperation { backend: Self::NAME })
    }

    /// Returns `true` if the key object carries a private exponent.
    fn has_private_exponent(_handle: &Self::Handle) -> bool {
        false
    }

    /// Raw public-exponent transform of `input`.
    fn public_encrypt(
        handle: &Self::Handle,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize>;

    /// Raw private-exponent transform of `input`, blinded if `rng` is given.
    fn private_decrypt<R: CryptoRngCore + ?Sized>(
        _handle: &Self::Handle,
        _rng: Option<&mut R>,
        _input: &[u8],
        _output: Option<&mut [u8]>,
    ) -> Result<usize> {
        Err(Error::Transform(TransformReason::MissingPrivateExponent))
    }

    /// Generate a fresh key pair with a `bit_size`-bit modulus and public
    /// exponent 65537.
    fn generate_key_pair<R: CryptoRngCore + ?Sized>(
        _rng: &mut R,
        _bit_size: usize,
    ) -> Result<GeneratedKey> {
        Err(Error::UnsupportedOperation { backend: Self::NAME })
    }
}
