//! ⚠️ Low-level "hazmat" RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds functions that apply RSA's core encryption and decryption
//! primitives to raw big integers without adding or removing any padding, and
//! without going through a provider backend. A well-reviewed padding scheme
//! is crucial to the security of RSA; these functions are intended for
//! implementing and testing higher-level constructions only.

pub use crate::algorithms::rsa::{rsa_decrypt, rsa_decrypt_and_check, rsa_encrypt};
