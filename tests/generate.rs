use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use raw_rsa::{
    backend::{BigNum, Blob},
    errors::KeyGenerationReason,
    BigUint, Error, PublicKeyParts, RawRsaKey,
};

#[test]
fn generate_2048() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    let generated = RawRsaKey::<BigNum>::generate_key_components_with_rng(&mut rng, 2048).unwrap();

    assert_eq!(generated.modulus().len(), 2048 / 8);
    assert_eq!(generated.public_exponent(), [0x01, 0x00, 0x01]);
    assert!(generated.private_exponent().len() <= 2048 / 8);

    // The public half imports on either backend.
    let key = RawRsaKey::<BigNum>::new(generated.modulus(), generated.public_exponent()).unwrap();
    assert_eq!(key.key_size(), 256);
    let key = RawRsaKey::<Blob>::new(generated.modulus(), generated.public_exponent()).unwrap();
    assert_eq!(key.key_size(), 256);

    let mut block = vec![0u8; 256];
    block[1..].fill(0x5a);
    let c = key.raw_transform(&block).unwrap();
    assert_eq!(c.len(), 256);

    let n = BigUint::from_bytes_be(generated.modulus());
    let d = BigUint::from_bytes_be(generated.private_exponent());
    assert_eq!(
        BigUint::from_bytes_be(&c).modpow(&d, &n),
        BigUint::from_bytes_be(&block)
    );
}

#[test]
fn generated_key_holds_private_exponent() {
    let mut rng = ChaCha8Rng::from_seed([9; 32]);
    let key = RawRsaKey::<BigNum>::generate_with_rng(&mut rng, 1024).unwrap();
    assert!(key.has_private_exponent());
    assert_eq!(key.key_size(), 128);
    assert_eq!(key.n().bits(), 1024);

    let mut block = vec![0u8; 128];
    block[100..].fill(0xa5);
    let c = key.raw_transform(&block).unwrap();
    assert_ne!(c, block);
    assert_eq!(key.raw_private_transform(&c).unwrap(), block);
    assert_eq!(
        key.raw_private_transform_with_rng(&mut rng, &c).unwrap(),
        block
    );
}

#[test]
fn generation_is_independent_of_existing_keys() {
    let mut rng = ChaCha8Rng::from_seed([3; 32]);
    let existing = RawRsaKey::<BigNum>::generate_with_rng(&mut rng, 512).unwrap();
    let modulus = existing.n().clone();

    let generated = RawRsaKey::<BigNum>::generate_key_components_with_rng(&mut rng, 512).unwrap();
    assert_ne!(BigUint::from_bytes_be(generated.modulus()), modulus);
    assert_eq!(existing.n(), &modulus);
}

#[test]
fn blob_backend_refuses_generation() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    assert!(!RawRsaKey::<Blob>::supports_key_generation());
    assert_eq!(
        RawRsaKey::<Blob>::generate_key_components_with_rng(&mut rng, 2048).unwrap_err(),
        Error::UnsupportedOperation { backend: "blob" }
    );
}

#[test]
fn rejects_impossible_sizes() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    for bits in [0, 1, 8] {
        assert!(matches!(
            RawRsaKey::<BigNum>::generate_key_components_with_rng(&mut rng, bits),
            Err(Error::KeyGeneration(_))
        ));
    }
    for bits in [16385, usize::MAX / 2, usize::MAX] {
        assert_eq!(
            RawRsaKey::<BigNum>::generate_key_components_with_rng(&mut rng, bits).unwrap_err(),
            Error::KeyGeneration(KeyGenerationReason::TooLarge)
        );
        assert!(RawRsaKey::<BigNum>::generate_with_rng(&mut rng, bits).is_err());
    }
}

#[cfg(feature = "getrandom")]
#[test]
fn generate_with_os_rng() {
    let generated = RawRsaKey::<BigNum>::generate_key_components(1024).unwrap();
    assert_eq!(generated.modulus().len(), 128);

    let key = RawRsaKey::<BigNum>::generate(512).unwrap();
    assert!(key.has_private_exponent());
}
