//! Error types.

use core::fmt;

/// Alias for [`core::result::Result`] with the `raw-rsa` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The provider rejected the supplied modulus or exponent, or could not
    /// build its internal key object.
    KeyImport(KeyImportReason),

    /// The requested capability is not offered by the active backend.
    UnsupportedOperation {
        /// Name of the backend that refused the call.
        backend: &'static str,
    },

    /// The provider failed while generating a key pair.
    KeyGeneration(KeyGenerationReason),

    /// The provider rejected a raw transform call.
    Transform(TransformReason),

    /// The provider produced an output block whose length differs from the
    /// key size.
    TransformSize {
        /// Key size in bytes.
        expected: usize,
        /// Length reported by the provider.
        actual: usize,
    },
}

/// Why a key import failed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyImportReason {
    /// The modulus byte sequence is empty.
    EmptyModulus,
    /// The public exponent byte sequence is empty.
    EmptyPublicExponent,
    /// The private exponent byte sequence is empty.
    EmptyPrivateExponent,
    /// The modulus has numeric value zero.
    ZeroModulus,
    /// A component is too long to be described by the key blob header.
    ComponentTooLong,
    /// The key blob is structurally invalid.
    MalformedBlob,
    /// The process-wide algorithm provider could not be opened.
    ProviderUnavailable,
}

/// Why key generation failed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyGenerationReason {
    /// Fewer than two primes were requested.
    NprimesTooSmall,
    /// There are too few primes of the requested length to build a key.
    TooFewPrimes,
    /// The requested modulus is larger than the provider supports.
    TooLarge,
    /// The public exponent has no inverse modulo the totient.
    InvalidPrime,
}

/// Why a raw transform was rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum TransformReason {
    /// The input block is longer than the key.
    InputTooLong,
    /// The input block length differs from the key size and the provider
    /// only accepts full blocks.
    InputLength,
    /// The input block, read as a big-endian integer, is not below the modulus.
    InputOutOfRange,
    /// The caller's output buffer is shorter than the key.
    OutputTooShort,
    /// The key carries no private exponent.
    MissingPrivateExponent,
    /// The consistency check after the private operation failed.
    Internal,
}

impl core::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyImport(reason) => write!(f, "key import error: {reason}"),
            Error::UnsupportedOperation { backend } => {
                write!(f, "operation not supported by the {backend} backend")
            }
            Error::KeyGeneration(reason) => write!(f, "key generation error: {reason}"),
            Error::Transform(reason) => write!(f, "raw transform error: {reason}"),
            Error::TransformSize { expected, actual } => write!(
                f,
                "raw transform produced {actual} bytes, expected {expected}"
            ),
        }
    }
}

impl fmt::Display for KeyImportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyImportReason::EmptyModulus => "empty modulus",
            KeyImportReason::EmptyPublicExponent => "empty public exponent",
            KeyImportReason::EmptyPrivateExponent => "empty private exponent",
            KeyImportReason::ZeroModulus => "modulus is zero",
            KeyImportReason::ComponentTooLong => "key component too long",
            KeyImportReason::MalformedBlob => "malformed key blob",
            KeyImportReason::ProviderUnavailable => "algorithm provider unavailable",
        })
    }
}

impl fmt::Display for KeyGenerationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyGenerationReason::NprimesTooSmall => "nprimes must be >= 2",
            KeyGenerationReason::TooFewPrimes => {
                "too few primes of given length to generate an RSA key"
            }
            KeyGenerationReason::TooLarge => "requested key size too large",
            KeyGenerationReason::InvalidPrime => "invalid prime value",
        })
    }
}

impl fmt::Display for TransformReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransformReason::InputTooLong => "input longer than the modulus",
            TransformReason::InputLength => "input length differs from the key size",
            TransformReason::InputOutOfRange => "input too large for modulus",
            TransformReason::OutputTooShort => "output buffer shorter than the key",
            TransformReason::MissingPrivateExponent => "key has no private exponent",
            TransformReason::Internal => "internal error",
        })
    }
}

impl From<KeyImportReason> for Error {
    fn from(reason: KeyImportReason) -> Self {
        Error::KeyImport(reason)
    }
}

impl From<KeyGenerationReason> for Error {
    fn from(reason: KeyGenerationReason) -> Self {
        Error::KeyGeneration(reason)
    }
}

impl From<TransformReason> for Error {
    fn from(reason: TransformReason) -> Self {
        Error::Transform(reason)
    }
}
