use crate::{Algorithm, DerivedKey, Error, KeyLengthError, Result};
use alloc::{string::String, vec};

/// A validated PBKDF2 configuration.
///
/// Construction checks every parameter up front, so [`derive`](Self::derive) cannot fail. The
/// engine holds no mutable state and can be reused, copied, and shared across threads for any
/// number of password and salt pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Engine {
    algorithm: Algorithm,
    iterations: u32,
    key_length: usize,
}

impl Engine {
    /// Creates a new engine.
    ///
    /// `key_length` defaults to the digest output length of `algorithm`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIterations`] if `iterations` is 0.
    /// - [`Error::InvalidKeyLength`] if `key_length` is 0 or exceeds
    ///   [`Algorithm::max_key_len`].
    ///
    /// # Example
    ///
    /// ```
    /// use pbkdf2_engine::{Algorithm, Engine};
    ///
    /// let engine = Engine::new(Algorithm::Sha256, 1, None).unwrap();
    /// assert_eq!(engine.key_length(), 32);
    ///
    /// assert!(Engine::new(Algorithm::Sha1, 1, Some(0)).is_err());
    /// assert!(Engine::new(Algorithm::Sha1, 0, None).is_err());
    /// ```
    pub fn new(algorithm: Algorithm, iterations: u32, key_length: Option<usize>) -> Result<Self> {
        if iterations == 0 {
            return Err(Error::InvalidIterations)
        }
        let key_length = checked_key_length(algorithm, key_length)?;
        log::debug!(
            "created PBKDF2 engine: hash_function={algorithm}, iterations={iterations}, key_length={key_length}"
        );
        Ok(Self { algorithm, iterations, key_length })
    }

    /// Creates a new engine, resolving the hash function by name.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedAlgorithm`] if `hash_function` is not recognized, otherwise as
    /// [`new`](Self::new).
    ///
    /// # Example
    ///
    /// ```
    /// use pbkdf2_engine::{Algorithm, Engine, Error};
    ///
    /// let engine = Engine::with_name("SHA-1", 4096, Some(20)).unwrap();
    /// assert_eq!(engine.algorithm(), Algorithm::Sha1);
    ///
    /// let err = Engine::with_name("whirlpool", 1, None).unwrap_err();
    /// assert_eq!(err, Error::UnsupportedAlgorithm("whirlpool".into()));
    /// ```
    pub fn with_name(
        hash_function: &str,
        iterations: u32,
        key_length: Option<usize>,
    ) -> Result<Self> {
        Self::new(hash_function.parse()?, iterations, key_length)
    }

    /// The digest used by the HMAC pseudorandom function.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The number of PRF applications per block.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// The length in bytes of every derived key.
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// The number of digest-sized blocks computed per derivation.
    pub fn blocks_needed(&self) -> usize {
        self.key_length.div_ceil(self.algorithm.output_len())
    }

    /// Derives a key from `password` and `salt`.
    ///
    /// Both are arbitrary bytes; empty values and embedded NUL bytes are used as given.
    ///
    /// # Example
    ///
    /// ```
    /// use pbkdf2_engine::{Algorithm, Engine};
    ///
    /// let engine = Engine::new(Algorithm::Sha1, 1, Some(5)).unwrap();
    /// let key = engine.derive("password", "ATHENA.MIT.EDUraeburn");
    /// assert_eq!(key.as_bytes(), &[0xcd, 0xed, 0xb5, 0x28, 0x1b]);
    /// ```
    pub fn derive<P: AsRef<[u8]>, S: AsRef<[u8]>>(&self, password: P, salt: S) -> DerivedKey {
        log::trace!("deriving {} PBKDF2 blocks with {}", self.blocks_needed(), self.algorithm);
        let mut output = vec![0u8; self.key_length];
        self.algorithm.derive_into(password.as_ref(), salt.as_ref(), self.iterations, &mut output);
        DerivedKey::from(output)
    }

    /// Derives a key and encodes it as lowercase hex.
    ///
    /// # Example
    ///
    /// ```
    /// use pbkdf2_engine::{Algorithm, Engine};
    ///
    /// let engine = Engine::new(Algorithm::Sha1, 1, Some(5)).unwrap();
    /// assert_eq!(engine.derive_hex("password", "ATHENA.MIT.EDUraeburn"), "cdedb5281b");
    /// ```
    pub fn derive_hex<P: AsRef<[u8]>, S: AsRef<[u8]>>(&self, password: P, salt: S) -> String {
        self.derive(password, salt).to_hex()
    }
}

fn checked_key_length(algorithm: Algorithm, desired: Option<usize>) -> Result<usize> {
    let Some(desired) = desired else { return Ok(algorithm.output_len()) };
    if desired < 1 {
        return Err(Error::InvalidKeyLength(KeyLengthError::TooShort))
    }
    if desired as u64 > algorithm.max_key_len() {
        return Err(Error::InvalidKeyLength(KeyLengthError::TooLong))
    }
    Ok(desired)
}
