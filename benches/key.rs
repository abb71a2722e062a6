#![feature(test)]

extern crate test;

use hex_literal::hex;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use raw_rsa::{
    backend::{BigNum, Blob},
    RawRsaKey,
};
use test::Bencher;

const N: [u8; 256] = hex!(
    "7163c842b2190a8970942b2764aed42d4124647b6f30e09a2da1c0e2"
    "56aa2ee24e790c40c96a4bd66d75c371a915e0703c476b4e1a06f1bd"
    "38c5a3c10ae3bd30f4ef62a5aa4f512ad145a06c48e96469a22ce8e6"
    "21e052f0669a8c34155512d82e55447f0b7e18da94bd911ac7b3aabe"
    "706843668964593ee71b2e5e484bcf0c7834101ab5d61bba1e63e623"
    "7af40489ce36a260dab70add4fbec24d659db0f7cac099b0a3aa4549"
    "acde7fc858a793a975e6cf65ca276b743525f0883980f6ad069bec34"
    "6d787797386d50fe0c9734be967c7d84ae5b8f349b094079457c0c0c"
    "6fee34c42a0b832603804f71e49f3320081637512c6cbf2bb81b6f6b"
    "e239846d"
);

const D: [u8; 256] = hex!(
    "4b97dad7216607064b0d721a431f381e2b6d98524a2095bc1e6bd5ec"
    "39c6c9ec3450b2d5db9c328ef3a3d7a11b63eaf57d84f2341159f67e"
    "25d917d607427e20a34a41c3c6df8b71e0d9159d85f0ed9bc17345ee"
    "c140374aef11b2cd638e0c901ee382ff5cfebb3c63290b672fcd1c7e"
    "f59ad799b0ed90d49a121ee98587df5cc161c584bc5887ae2a15e787"
    "e86ab1e803366150561e0b3b3ae28ebdcf32cd46dff317ed3e1b7590"
    "cc300d1d57c9288462d06d9fbe097e52b70dc4fca313ae09906e5fab"
    "0c24729b54fe35cc38fe1496419a902f35f08460952bd4783e0e930b"
    "a8b520f83eafe6fa6589bbab6e4f4bc5c285672c99f5055eec6a2a30"
    "b06e786b"
);

fn block() -> Vec<u8> {
    (0..=255u8).collect()
}

#[bench]
fn bench_rsa_1024_gen_key(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let key = RawRsaKey::<BigNum>::generate_key_components_with_rng(&mut rng, 1024).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_rsa_2048_import_blob(b: &mut Bencher) {
    b.iter(|| {
        let key = RawRsaKey::<Blob>::new(&N, &[3]).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_rsa_2048_raw_transform_bignum(b: &mut Bencher) {
    let key = RawRsaKey::<BigNum>::new(&N, &[3]).unwrap();
    let m = block();

    b.iter(|| {
        let res = key.raw_transform(&m).unwrap();
        test::black_box(res);
    });
}

#[bench]
fn bench_rsa_2048_raw_transform_blob(b: &mut Bencher) {
    let key = RawRsaKey::<Blob>::new(&N, &[3]).unwrap();
    let m = block();

    b.iter(|| {
        let res = key.raw_transform(&m).unwrap();
        test::black_box(res);
    });
}

#[bench]
fn bench_rsa_2048_raw_private_transform_blinded(b: &mut Bencher) {
    let key = RawRsaKey::<BigNum>::from_components(&N, &[3], &D).unwrap();
    let c = key.raw_transform(&block()).unwrap();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let res = key.raw_private_transform_with_rng(&mut rng, &c).unwrap();
        test::black_box(res);
    });
}
