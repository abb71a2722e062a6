//! Blob/handle-based provider.
//!
//! Public keys are handed to the provider as a binary key blob: a fixed
//! little-endian header followed by the public exponent and the modulus, both
//! big-endian.
//!
//! ```text
//! +-------+------------+-------------+-----------+-----------+-----------+----------+---------+
//! | magic | bit_length | cb_pub_exp  | cb_modulus| cb_prime1 | cb_prime2 | exponent | modulus |
//! | u32le | u32le      | u32le       | u32le     | u32le     | u32le     | bytes    | bytes   |
//! +-------+------------+-------------+-----------+-----------+-----------+----------+---------+
//! ```
//!
//! The process-wide [`AlgorithmProvider`] imports blobs into [`BlobKey`]
//! handles. It is opened lazily on first use; if opening fails every import
//! reports [`KeyImportReason::ProviderUnavailable`].

use alloc::vec::Vec;
use core::fmt;

use lazy_static::lazy_static;
use log::{error, trace};
use num_bigint::BigUint;
use num_traits::Zero;

use super::Backend;
use crate::algorithms::pad::uint_to_be_pad;
use crate::algorithms::rsa::rsa_encrypt;
use crate::errors::{Error, KeyImportReason, Result, TransformReason};
use crate::traits::PublicKeyParts;

/// Magic value of a public key blob, `"RSA1"` read as a little-endian `u32`.
pub const RSA_PUBLIC_MAGIC: u32 = 0x3141_5352;

/// Length of the fixed blob header in bytes.
pub const HEADER_LEN: usize = 24;

lazy_static! {
    static ref RSA_ALGORITHM: Result<AlgorithmProvider> = AlgorithmProvider::open();
}

/// Returns the process-wide RSA algorithm provider, opening it on first use.
pub fn algorithm() -> Result<&'static AlgorithmProvider> {
    opened(&*RSA_ALGORITHM)
}

fn opened(slot: &Result<AlgorithmProvider>) -> Result<&AlgorithmProvider> {
    match slot {
        Ok(provider) => Ok(provider),
        Err(err) => Err(err.clone()),
    }
}

fn import_with(
    slot: &Result<AlgorithmProvider>,
    modulus: &[u8],
    public_exponent: &[u8],
) -> Result<BlobKey> {
    let blob = encode_public_blob(modulus, public_exponent)?;
    opened(slot)?.import_key_pair(&blob)
}

/// Blob backend. Does not support key generation.
#[derive(Debug, Clone, Copy)]
pub struct Blob;

/// Fixed header of a key blob.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct KeyBlobHeader {
    /// Blob type tag.
    pub magic: u32,
    /// Modulus length in bits, always `8 * cb_modulus`.
    pub bit_length: u32,
    /// Public exponent length in bytes.
    pub cb_public_exp: u32,
    /// Modulus length in bytes.
    pub cb_modulus: u32,
    /// First prime length in bytes, zero for public blobs.
    pub cb_prime1: u32,
    /// Second prime length in bytes, zero for public blobs.
    pub cb_prime2: u32,
}

impl KeyBlobHeader {
    fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let fields = [
            self.magic,
            self.bit_length,
            self.cb_public_exp,
            self.cb_modulus,
            self.cb_prime1,
            self.cb_prime2,
        ];
        for (chunk, field) in out.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = bytes
            .get(..HEADER_LEN)
            .ok_or(Error::KeyImport(KeyImportReason::MalformedBlob))?;

        let mut fields = [0u32; 6];
        for (field, chunk) in fields.iter_mut().zip(header.chunks_exact(4)) {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            *field = u32::from_le_bytes(word);
        }
        let [magic, bit_length, cb_public_exp, cb_modulus, cb_prime1, cb_prime2] = fields;

        Ok(Self {
            magic,
            bit_length,
            cb_public_exp,
            cb_modulus,
            cb_prime1,
            cb_prime2,
        })
    }
}

/// Serialize a public key into a key blob.
pub fn encode_public_blob(modulus: &[u8], public_exponent: &[u8]) -> Result<Vec<u8>> {
    if modulus.is_empty() {
        return Err(KeyImportReason::EmptyModulus.into());
    }
    if public_exponent.is_empty() {
        return Err(KeyImportReason::EmptyPublicExponent.into());
    }

    let cb_modulus = u32::try_from(modulus.len()).map_err(|_| KeyImportReason::ComponentTooLong)?;
    let cb_public_exp =
        u32::try_from(public_exponent.len()).map_err(|_| KeyImportReason::ComponentTooLong)?;
    let bit_length = cb_modulus
        .checked_mul(8)
        .ok_or(KeyImportReason::ComponentTooLong)?;

    let header = KeyBlobHeader {
        magic: RSA_PUBLIC_MAGIC,
        bit_length,
        cb_public_exp,
        cb_modulus,
        cb_prime1: 0,
        cb_prime2: 0,
    };

    let mut blob = Vec::with_capacity(HEADER_LEN + public_exponent.len() + modulus.len());
    blob.extend_from_slice(&header.to_bytes());
    blob.extend_from_slice(public_exponent);
    blob.extend_from_slice(modulus);
    Ok(blob)
}

/// The RSA algorithm provider shared by every [`Blob`] key.
///
/// Holds no per-key or per-call state, so a single instance is shared by all
/// threads.
#[derive(Debug)]
pub struct AlgorithmProvider {
    algorithm: &'static str,
}

impl AlgorithmProvider {
    /// Open the provider and run its known-answer self test.
    fn open() -> Result<Self> {
        Self::open_with(Self::self_test)
    }

    fn open_with(self_test: fn(&Self) -> Result<()>) -> Result<Self> {
        trace!("opening RSA algorithm provider");
        let provider = Self { algorithm: "RSA" };

        if let Err(err) = self_test(&provider) {
            error!("RSA algorithm provider self test failed: {}", err);
            return Err(KeyImportReason::ProviderUnavailable.into());
        }

        Ok(provider)
    }

    // 65^17 mod 3233 = 2790
    fn self_test(&self) -> Result<()> {
        let blob = encode_public_blob(&[0x0c, 0xa1], &[0x11])?;
        let key = self.import_key_pair(&blob)?;
        let mut out = [0u8; 2];
        let written = key.encrypt(&[0x00, 0x41], Some(&mut out))?;
        if out[..written] != [0x0a, 0xe6] {
            return Err(TransformReason::Internal.into());
        }
        Ok(())
    }

    /// Algorithm identifier.
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    /// Import a public key blob into a key handle.
    ///
    /// Only the blob structure is checked; the numeric values are accepted
    /// as long as the modulus is non-zero.
    pub fn import_key_pair(&self, blob: &[u8]) -> Result<BlobKey> {
        let malformed = Error::KeyImport(KeyImportReason::MalformedBlob);
        let header = KeyBlobHeader::from_bytes(blob)?;

        if header.magic != RSA_PUBLIC_MAGIC
            || header.cb_prime1 != 0
            || header.cb_prime2 != 0
            || header.cb_public_exp == 0
            || header.cb_modulus == 0
            || Some(header.bit_length) != header.cb_modulus.checked_mul(8)
        {
            return Err(malformed);
        }

        let cb_public_exp = header.cb_public_exp as usize;
        let cb_modulus = header.cb_modulus as usize;
        let payload = &blob[HEADER_LEN..];
        if Some(payload.len()) != cb_public_exp.checked_add(cb_modulus) {
            return Err(malformed);
        }

        let (exponent, modulus) = payload.split_at(cb_public_exp);
        let n = BigUint::from_bytes_be(modulus);
        if n.is_zero() {
            return Err(KeyImportReason::ZeroModulus.into());
        }

        Ok(BlobKey {
            n,
            e: BigUint::from_bytes_be(exponent),
            size: cb_modulus,
        })
    }
}

/// Opaque key handle produced by the [`AlgorithmProvider`].
pub struct BlobKey {
    n: BigUint,
    e: BigUint,
    size: usize,
}

impl BlobKey {
    /// Raw public transform. Inputs shorter than the key are read as
    /// left-zero-padded blocks.
    pub fn encrypt(&self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize> {
        if input.len() > self.size {
            return Err(TransformReason::InputTooLong.into());
        }
        let m = BigUint::from_bytes_be(input);
        if m >= self.n {
            return Err(TransformReason::InputOutOfRange.into());
        }

        let Some(output) = output else {
            return Ok(self.size);
        };
        if output.len() < self.size {
            return Err(TransformReason::OutputTooShort.into());
        }

        let c = rsa_encrypt(self, &m)?;
        let block = uint_to_be_pad(c, self.size)?;
        output[..self.size].copy_from_slice(&block);
        Ok(self.size)
    }
}

impl PublicKeyParts for BlobKey {
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

impl fmt::Debug for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobKey")
            .field("n", &self.n)
            .field("e", &self.e)
            .field("size", &self.size)
            .finish()
    }
}

impl Backend for Blob {
    type Handle = BlobKey;

    const NAME: &'static str = "blob";
    const SUPPORTS_KEY_GENERATION: bool = false;

    fn import_public_key(modulus: &[u8], public_exponent: &[u8]) -> Result<BlobKey> {
        import_with(&RSA_ALGORITHM, modulus, public_exponent)
    }

    fn public_encrypt(handle: &BlobKey, input: &[u8], output: Option<&mut [u8]>) -> Result<usize> {
        handle.encrypt(input, output)
    }
}
