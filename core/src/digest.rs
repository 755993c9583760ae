//! The single entropy source for every synthetic identity field.
//!
//! Derivation code only ever sees a `NumberDigest`; which algorithm
//! produced it is hidden behind `DigestAlgorithm`, so swapping the hash
//! never touches the derivation rules.

use md5::{Digest, Md5};

use crate::types::MobileNumber;

/// A 128-bit digest of a mobile number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberDigest([u8; 16]);

impl NumberDigest {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Byte at position `i`, i.e. the hex pair `hex[2i..2i+2]`.
    pub fn byte(&self, i: usize) -> u8 {
        self.0[i]
    }

    /// 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

pub trait DigestAlgorithm {
    /// Stable name, for logs.
    fn name(&self) -> &'static str;

    fn digest(&self, input: &[u8]) -> NumberDigest;

    /// Digest over the UTF-8 bytes of the 10 validated digits.
    fn digest_number(&self, number: &MobileNumber) -> NumberDigest {
        self.digest(number.as_str().as_bytes())
    }
}

/// MD5, the reference algorithm. Not used for anything security related.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl DigestAlgorithm for Md5Digest {
    fn name(&self) -> &'static str {
        "md5"
    }

    fn digest(&self, input: &[u8]) -> NumberDigest {
        let out = Md5::digest(input);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&out);
        NumberDigest(bytes)
    }
}
