//! Object-based provider: keys are big-number objects.

use core::fmt;

use log::debug;
use num_bigint::BigUint;
use num_traits::{FromPrimitive, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use super::Backend;
use crate::algorithms::generate::{generate_multi_prime_key_with_exp, EXP};
use crate::algorithms::pad::{uint_to_be, uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, KeyGenerationReason, KeyImportReason, Result, TransformReason};
use crate::key::GeneratedKey;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Big-number backend. Supports key generation.
#[derive(Debug, Clone, Copy)]
pub struct BigNum;

/// RSA key object owned by a [`BigNum`] key.
pub struct RsaObject {
    n: BigUint,
    e: BigUint,
    d: Option<BigUint>,
    /// Byte length of the modulus as imported.
    size: usize,
}

impl RsaObject {
    fn from_be_bytes(modulus: &[u8], public_exponent: &[u8]) -> Result<Self> {
        if modulus.is_empty() {
            return Err(KeyImportReason::EmptyModulus.into());
        }
        if public_exponent.is_empty() {
            return Err(KeyImportReason::EmptyPublicExponent.into());
        }

        let n = BigUint::from_bytes_be(modulus);
        if n.is_zero() {
            return Err(KeyImportReason::ZeroModulus.into());
        }

        Ok(Self {
            n,
            e: BigUint::from_bytes_be(public_exponent),
            d: None,
            size: modulus.len(),
        })
    }

    fn private(&self) -> Result<PrivateObject<'_>> {
        match &self.d {
            Some(d) => Ok(PrivateObject { key: self, d }),
            None => Err(TransformReason::MissingPrivateExponent.into()),
        }
    }

    fn check_input(&self, input: &[u8]) -> Result<BigUint> {
        if input.len() != self.size {
            return Err(TransformReason::InputLength.into());
        }
        let value = BigUint::from_bytes_be(input);
        if value >= self.n {
            return Err(TransformReason::InputOutOfRange.into());
        }
        Ok(value)
    }

    fn write_output(&self, block: &[u8], output: &mut [u8]) -> Result<usize> {
        let out = output
            .get_mut(..block.len())
            .ok_or(Error::Transform(TransformReason::OutputTooShort))?;
        out.copy_from_slice(block);
        Ok(block.len())
    }
}

impl PublicKeyParts for RsaObject {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Debug for RsaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaObject")
            .field("n", &self.n)
            .field("e", &self.e)
            .field("d", &self.d.as_ref().map(|_| ".."))
            .field("size", &self.size)
            .finish()
    }
}

impl Drop for RsaObject {
    fn drop(&mut self) {
        if let Some(d) = self.d.as_mut() {
            d.zeroize();
        }
    }
}

/// Borrowed view of an [`RsaObject`] known to hold a private exponent.
struct PrivateObject<'a> {
    key: &'a RsaObject,
    d: &'a BigUint,
}

impl PublicKeyParts for PrivateObject<'_> {
    fn n(&self) -> &BigUint {
        &self.key.n
    }

    fn e(&self) -> &BigUint {
        &self.key.e
    }
}

impl PrivateKeyParts for PrivateObject<'_> {
    fn d(&self) -> &BigUint {
        self.d
    }
}

impl Backend for BigNum {
    type Handle = RsaObject;

    const NAME: &'static str = "bignum";
    const SUPPORTS_KEY_GENERATION: bool = true;

    fn import_public_key(modulus: &[u8], public_exponent: &[u8]) -> Result<RsaObject> {
        RsaObject::from_be_bytes(modulus, public_exponent)
    }

    fn import_private_key(
        modulus: &[u8],
        public_exponent: &[u8],
        private_exponent: &[u8],
    ) -> Result<RsaObject> {
        if private_exponent.is_empty() {
            return Err(KeyImportReason::EmptyPrivateExponent.into());
        }
        let mut key = RsaObject::from_be_bytes(modulus, public_exponent)?;
        key.d = Some(BigUint::from_bytes_be(private_exponent));
        Ok(key)
    }

    fn has_private_exponent(handle: &RsaObject) -> bool {
        handle.d.is_some()
    }

    fn public_encrypt(handle: &RsaObject, input: &[u8], output: Option<&mut [u8]>) -> Result<usize> {
        let Some(output) = output else {
            return Ok(handle.size);
        };

        let m = handle.check_input(input)?;
        let c = rsa_encrypt(handle, &m)?;
        let block = uint_to_be_pad(c, handle.size)?;
        handle.write_output(&block, output)
    }

    fn private_decrypt<R: CryptoRngCore + ?Sized>(
        handle: &RsaObject,
        rng: Option<&mut R>,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize> {
        let key = handle.private()?;
        let Some(output) = output else {
            return Ok(handle.size);
        };

        let c = handle.check_input(input)?;
        let m = rsa_decrypt_and_check(&key, rng, &c)?;
        let block = Zeroizing::new(uint_to_zeroizing_be_pad(m, handle.size)?);
        handle.write_output(&block, output)
    }

    fn generate_key_pair<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
    ) -> Result<GeneratedKey> {
        let exp = BigUint::from_u64(EXP).ok_or(KeyGenerationReason::InvalidPrime)?;
        let components = generate_multi_prime_key_with_exp(rng, 2, bit_size, &exp)?;
        debug!(
            "generated {}-bit RSA key pair ({} backend)",
            components.n.bits(),
            Self::NAME
        );

        Ok(GeneratedKey::new(
            uint_to_be(&components.n),
            uint_to_be(&components.e),
            Zeroizing::new(uint_to_be(&components.d)),
        ))
    }
}
