//! Generic RSA implementation

use alloc::borrow::Cow;
use num_bigint::{BigInt, BigUint, IntoBigUint, ModInverse, RandBigInt};
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::errors::{Error, KeyGenerationReason, Result, TransformReason};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if key.n().is_zero() {
        return Err(Error::Transform(TransformReason::InputOutOfRange));
    }
    Ok(m.modpow(key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<R: CryptoRngCore + ?Sized>(
    mut rng: Option<&mut R>,
    priv_key: &impl PrivateKeyParts,
    c: &BigUint,
) -> Result<BigUint> {
    if priv_key.n().is_zero() || c >= priv_key.n() {
        return Err(Error::Transform(TransformReason::InputOutOfRange));
    }

    let mut ir = None;

    let c = if let Some(ref mut rng) = rng {
        let (blinded, unblinder) = blind(rng, priv_key, c);
        ir = Some(unblinder);
        Cow::Owned(blinded)
    } else {
        Cow::Borrowed(c)
    };

    let m = c.modpow(priv_key.d(), priv_key.n());

    match ir {
        Some(ref ir) => {
            // unblind
            Ok(unblind(priv_key, &m, ir))
        }
        None => Ok(m),
    }
}

/// ⚠️ Performs raw RSA decryption with no padding.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed. The result is
/// re-encrypted with the public exponent and compared against `c` before it is returned.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt_and_check<R: CryptoRngCore + ?Sized>(
    priv_key: &impl PrivateKeyParts,
    rng: Option<&mut R>,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(rng, priv_key, c)?;

    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Transform(TransformReason::Internal));
    }

    Ok(m)
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore, K: PublicKeyParts>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let mut r: BigUint;
    let mut ir: Option<BigInt>;
    let unblinder;
    loop {
        r = rng.gen_biguint_below(key.n());
        if r.is_zero() {
            r = BigUint::one();
        }
        ir = r.clone().mod_inverse(key.n());
        if let Some(ir) = ir {
            if let Some(ub) = ir.into_biguint() {
                unblinder = ub;
                break;
            }
        }
    }

    let c = {
        let mut rpowe = r.modpow(key.e(), key.n()); // N != 0
        let mut c = c * &rpowe;
        c %= key.n();

        rpowe.zeroize();
        r.zeroize();

        c
    };

    (c, unblinder)
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind(key: &impl PublicKeyParts, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % key.n()
}

/// Compute the modulus of a key from its primes.
pub(crate) fn compute_modulus(primes: &[BigUint]) -> BigUint {
    primes.iter().fold(BigUint::one(), |acc, prime| acc * prime)
}

/// Compute the private exponent from its primes (p and q) and public exponent
/// This uses Euler's totient function
#[inline]
pub(crate) fn compute_private_exponent_euler_totient(
    primes: &[BigUint],
    exp: &BigUint,
) -> Result<BigUint> {
    if primes.len() < 2 {
        return Err(Error::KeyGeneration(KeyGenerationReason::InvalidPrime));
    }

    let mut totient = BigUint::one();
    for prime in primes {
        totient *= prime - BigUint::one();
    }

    exp.clone()
        .mod_inverse(&totient)
        .and_then(IntoBigUint::into_biguint)
        .ok_or(Error::KeyGeneration(KeyGenerationReason::InvalidPrime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use num_traits::FromPrimitive;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    struct ToyKey {
        n: BigUint,
        e: BigUint,
        d: BigUint,
    }

    impl PublicKeyParts for ToyKey {
        fn n(&self) -> &BigUint {
            &self.n
        }

        fn e(&self) -> &BigUint {
            &self.e
        }
    }

    impl PrivateKeyParts for ToyKey {
        fn d(&self) -> &BigUint {
            &self.d
        }
    }

    // p = 61, q = 53
    fn toy_key() -> ToyKey {
        ToyKey {
            n: BigUint::from_u32(3233).unwrap(),
            e: BigUint::from_u32(17).unwrap(),
            d: BigUint::from_u32(2753).unwrap(),
        }
    }

    #[test]
    fn test_encrypt_known_answer() {
        let key = toy_key();
        let c = rsa_encrypt(&key, &BigUint::from_u32(65).unwrap()).unwrap();
        assert_eq!(c, BigUint::from_u32(2790).unwrap());
    }

    #[test]
    fn test_decrypt_with_and_without_blinding() {
        let key = toy_key();
        let c = BigUint::from_u32(2790).unwrap();
        let expected = BigUint::from_u32(65).unwrap();

        let m = rsa_decrypt::<ChaCha8Rng>(None, &key, &c).unwrap();
        assert_eq!(m, expected);

        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for _ in 0..16 {
            let m = rsa_decrypt_and_check(&key, Some(&mut rng), &c).unwrap();
            assert_eq!(m, expected);
        }
    }

    #[test]
    fn test_decrypt_rejects_out_of_range() {
        let key = toy_key();
        let c = BigUint::from_u32(3233).unwrap();
        assert_eq!(
            rsa_decrypt::<ChaCha8Rng>(None, &key, &c),
            Err(Error::Transform(TransformReason::InputOutOfRange))
        );
    }

    #[test]
    fn test_decrypt_and_check_detects_wrong_exponent() {
        let mut key = toy_key();
        key.d = BigUint::from_u32(2752).unwrap();
        let c = BigUint::from_u32(2790).unwrap();
        assert_eq!(
            rsa_decrypt_and_check::<ChaCha8Rng>(&key, None, &c),
            Err(Error::Transform(TransformReason::Internal))
        );
    }

    #[test]
    fn test_compute_private_exponent() {
        let primes = vec![
            BigUint::from_u32(61).unwrap(),
            BigUint::from_u32(53).unwrap(),
        ];
        assert_eq!(compute_modulus(&primes), BigUint::from_u32(3233).unwrap());

        let d = compute_private_exponent_euler_totient(&primes, &BigUint::from_u32(17).unwrap())
            .unwrap();
        assert_eq!(d, BigUint::from_u32(2753).unwrap());

        assert!(compute_private_exponent_euler_totient(
            &primes[..1],
            &BigUint::from_u32(17).unwrap()
        )
        .is_err());
    }
}
