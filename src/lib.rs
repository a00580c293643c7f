//! # pbkdf2-engine
//!
//! PBKDF2 ([RFC 8018](https://www.rfc-editor.org/rfc/rfc8018)) key derivation with HMAC over a
//! selectable digest.
//!
//! ```
//! use pbkdf2_engine::{hash_password_hex, Algorithm, Options};
//!
//! let key = hash_password_hex("test", "abcd", 100, Options::default()).unwrap();
//! assert_eq!(key, "0313a6aca54dd4c5d82a699a8a0f0ffb0191b4ef62414b8d9dbc11c0c5ac04da");
//!
//! let options = Options::new(Algorithm::Sha1).key_length(5);
//! let key = hash_password_hex("password", "ATHENA.MIT.EDUraeburn", 1, options).unwrap();
//! assert_eq!(key, "cdedb5281b");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::{string::String, vec::Vec};
use core::{convert::From, fmt};
use hex::FromHexError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod algorithm;
pub use algorithm::Algorithm;

mod derived_key;
pub use derived_key::DerivedKey;

mod engine;
pub use engine::Engine;

mod pbkdf2;
pub use pbkdf2::pbkdf2;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    UnsupportedAlgorithm(String),
    InvalidKeyLength(KeyLengthError),
    InvalidIterations,
    DecodeError(FromHexError),
}

/// Why a requested key length was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLengthError {
    TooShort,
    TooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedAlgorithm(name) => write!(f, "Unsupported hash function: {name:?}"),
            Self::InvalidKeyLength(KeyLengthError::TooShort) => write!(f, "Key is too short"),
            Self::InvalidKeyLength(KeyLengthError::TooLong) => write!(f, "Key is too long"),
            Self::InvalidIterations => write!(f, "Iteration count must be at least 1"),
            Self::DecodeError(inner) => write!(f, "Failed decoding hex: {inner}"),
        }
    }
}

impl From<FromHexError> for Error {
    fn from(value: FromHexError) -> Self {
        Self::DecodeError(value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Optional parameters of [`hash_password`] and [`hash_password_hex`].
///
/// Defaults to [SHA-256](Algorithm::Sha256) with a key as long as its digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Options {
    pub hash_function: Algorithm,
    pub key_length: Option<usize>,
}

impl Options {
    pub const fn new(hash_function: Algorithm) -> Self {
        Self { hash_function, key_length: None }
    }

    /// Sets the derived key length in bytes.
    pub const fn key_length(mut self, key_length: usize) -> Self {
        self.key_length = Some(key_length);
        self
    }

    /// Builds the [`Engine`] these options describe.
    pub fn engine(&self, iterations: u32) -> Result<Engine> {
        Engine::new(self.hash_function, iterations, self.key_length)
    }
}

/// Derives a key from `password` and `salt` in one call.
///
/// # Example
///
/// ```
/// use pbkdf2_engine::{hash_password, Algorithm, Options};
///
/// let options = Options::new(Algorithm::Sha1).key_length(16);
/// let key = hash_password("pass\0word", "sa\0lt", 4096, options).unwrap();
/// assert_eq!(hex::encode(key), "56fa6aa75548099dcc37d7f03425e0c3");
/// ```
pub fn hash_password<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    password: P,
    salt: S,
    iterations: u32,
    options: Options,
) -> Result<Vec<u8>> {
    let engine = options.engine(iterations)?;
    Ok(engine.derive(password, salt).into_vec())
}

/// Like [`hash_password`], returning the key as lowercase hex.
pub fn hash_password_hex<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    password: P,
    salt: S,
    iterations: u32,
    options: Options,
) -> Result<String> {
    let engine = options.engine(iterations)?;
    Ok(engine.derive_hex(password, salt))
}
