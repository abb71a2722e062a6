use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use log::{debug, warn};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::backend::{Backend, DefaultBackend};
use crate::dummy_rng::DummyRng;
use crate::errors::{Error, Result};
use crate::traits::PublicKeyParts;

/// An RSA key for raw (unpadded) modular exponentiation.
///
/// The key owns its provider handle exclusively; dropping the key releases it.
/// All operations take `&self` and never mutate the key material.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// [`RawRsaKey::raw_transform`] computes `data^e mod n` without any padding.
/// Textbook RSA is deterministic and malleable and must be composed with a
/// padding or framing scheme by the caller.
pub struct RawRsaKey<B: Backend = DefaultBackend> {
    handle: B::Handle,
    key_size: usize,
    backend: PhantomData<B>,
}

impl<B: Backend> RawRsaKey<B> {
    /// Import a public key from its big-endian modulus and public exponent.
    ///
    /// The key size is the byte length of `modulus`, leading zero bytes
    /// included. Apart from rejecting empty components and a zero modulus, the
    /// components are not validated.
    pub fn new(modulus: &[u8], public_exponent: &[u8]) -> Result<Self> {
        let handle = B::import_public_key(modulus, public_exponent)?;
        debug!(
            "imported {}-byte RSA public key ({} backend)",
            modulus.len(),
            B::NAME
        );
        Ok(Self::from_handle(handle, modulus.len()))
    }

    /// Import a key that also carries a private exponent.
    ///
    /// Fails with [`Error::UnsupportedOperation`] on backends that only
    /// handle public keys.
    pub fn from_components(
        modulus: &[u8],
        public_exponent: &[u8],
        private_exponent: &[u8],
    ) -> Result<Self> {
        let handle = B::import_private_key(modulus, public_exponent, private_exponent)?;
        debug!(
            "imported {}-byte RSA private key ({} backend)",
            modulus.len(),
            B::NAME
        );
        Ok(Self::from_handle(handle, modulus.len()))
    }

    fn from_handle(handle: B::Handle, key_size: usize) -> Self {
        Self {
            handle,
            key_size,
            backend: PhantomData,
        }
    }

    /// Generate a fresh key pair using the provided random source and report
    /// its components.
    ///
    /// The public exponent is always 65537. Fails with
    /// [`Error::UnsupportedOperation`] on backends without key generation.
    pub fn generate_key_components_with_rng<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
    ) -> Result<GeneratedKey> {
        if !B::SUPPORTS_KEY_GENERATION {
            return Err(Error::UnsupportedOperation { backend: B::NAME });
        }
        B::generate_key_pair(rng, bit_size)
    }

    /// Generate a fresh key pair using the operating system's random source
    /// and report its components.
    #[cfg(feature = "getrandom")]
    pub fn generate_key_components(bit_size: usize) -> Result<GeneratedKey> {
        Self::generate_key_components_with_rng(&mut rand_core::OsRng, bit_size)
    }

    /// Generate a fresh key pair using the provided random source.
    ///
    /// The returned key holds the private exponent.
    pub fn generate_with_rng<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
    ) -> Result<Self> {
        let generated = Self::generate_key_components_with_rng(rng, bit_size)?;
        Self::from_components(
            generated.modulus(),
            generated.public_exponent(),
            generated.private_exponent(),
        )
    }

    /// Generate a fresh key pair using the operating system's random source.
    #[cfg(feature = "getrandom")]
    pub fn generate(bit_size: usize) -> Result<Self> {
        Self::generate_with_rng(&mut rand_core::OsRng, bit_size)
    }

    /// Returns `true` if the backend of this key type can generate keys.
    pub fn supports_key_generation() -> bool {
        B::SUPPORTS_KEY_GENERATION
    }

    /// Name of the backend of this key type.
    pub fn backend_name() -> &'static str {
        B::NAME
    }

    /// Key size in bytes. Every raw transform output has this length.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Returns `true` if the key can perform the private raw transform.
    pub fn has_private_exponent(&self) -> bool {
        B::has_private_exponent(&self.handle)
    }

    /// ⚠️ Raw RSA public transform: `data^e mod n`, no padding.
    ///
    /// The output is always exactly [`RawRsaKey::key_size`] bytes. `data`
    /// read as a big-endian integer must be below the modulus; whether a
    /// block shorter than the key is accepted depends on the backend.
    pub fn raw_transform(&self, data: &[u8]) -> Result<Vec<u8>> {
        let size = B::public_encrypt(&self.handle, data, None)?;
        let mut out = vec![0u8; size];
        let written = B::public_encrypt(&self.handle, data, Some(&mut out))?;
        self.check_size(written)?;
        Ok(out)
    }

    /// ⚠️ Raw RSA private transform: `data^d mod n`, no padding.
    ///
    /// Fails with a transform error if the key has no private exponent.
    pub fn raw_private_transform(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.private_transform(None::<&mut DummyRng>, data)
    }

    /// ⚠️ Raw RSA private transform with blinding: `data^d mod n`, no padding.
    pub fn raw_private_transform_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        self.private_transform(Some(rng), data)
    }

    fn private_transform<R: CryptoRngCore + ?Sized>(
        &self,
        mut rng: Option<&mut R>,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        let size = B::private_decrypt(&self.handle, rng.as_deref_mut(), data, None)?;
        let mut out = vec![0u8; size];
        let written = B::private_decrypt(&self.handle, rng, data, Some(&mut out))?;
        self.check_size(written)?;
        Ok(out)
    }

    fn check_size(&self, actual: usize) -> Result<()> {
        if actual != self.key_size {
            warn!(
                "{} backend produced {} bytes for a {}-byte key",
                B::NAME,
                actual,
                self.key_size
            );
            return Err(Error::TransformSize {
                expected: self.key_size,
                actual,
            });
        }
        Ok(())
    }
}

impl<B: Backend> PublicKeyParts for RawRsaKey<B> {
    fn n(&self) -> &BigUint {
        self.handle.n()
    }

    fn e(&self) -> &BigUint {
        self.handle.e()
    }

    fn size(&self) -> usize {
        self.key_size
    }
}

impl<B: Backend> fmt::Debug for RawRsaKey<B>
where
    B::Handle: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRsaKey")
            .field("backend", &B::NAME)
            .field("key_size", &self.key_size)
            .field("handle", &self.handle)
            .finish()
    }
}

/// Components of a freshly generated key pair, each the minimal big-endian
/// encoding of the number. The private exponent is zeroized on drop.
#[derive(Clone)]
pub struct GeneratedKey {
    modulus: Vec<u8>,
    public_exponent: Vec<u8>,
    private_exponent: Zeroizing<Vec<u8>>,
}

impl GeneratedKey {
    pub(crate) fn new(
        modulus: Vec<u8>,
        public_exponent: Vec<u8>,
        private_exponent: Zeroizing<Vec<u8>>,
    ) -> Self {
        Self {
            modulus,
            public_exponent,
            private_exponent,
        }
    }

    /// Big-endian modulus.
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Big-endian public exponent.
    pub fn public_exponent(&self) -> &[u8] {
        &self.public_exponent
    }

    /// Big-endian private exponent.
    pub fn private_exponent(&self) -> &[u8] {
        &self.private_exponent
    }
}

impl fmt::Debug for GeneratedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKey")
            .field("modulus", &self.modulus)
            .field("public_exponent", &self.public_exponent)
            .finish_non_exhaustive()
    }
}
