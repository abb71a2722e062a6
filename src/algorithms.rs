//! Useful algorithms related to RSA.

pub(crate) mod generate;
pub(crate) mod pad;
pub(crate) mod rsa;
