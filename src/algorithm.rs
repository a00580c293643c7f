use crate::{pbkdf2::pbkdf2, Error, Result};
use alloc::string::{String, ToString};
use core::{fmt, str::FromStr};
use hmac::Hmac;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A digest algorithm usable as the HMAC pseudorandom function of PBKDF2.
///
/// Parsed from a short or long digest name with [`FromStr`]; matching is case-insensitive and
/// ignores `-`, `_` and `/`, so `"sha256"`, `"SHA-256"` and `"SHA2-256"` are all
/// [`Sha256`](Self::Sha256).
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | '/'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let algorithm = match normalized.as_str() {
            "md5" => Self::Md5,
            "sha1" => Self::Sha1,
            "sha224" | "sha2224" => Self::Sha224,
            "sha256" | "sha2256" => Self::Sha256,
            "sha384" | "sha2384" => Self::Sha384,
            "sha512" | "sha2512" => Self::Sha512,
            "sha512224" | "sha2512224" => Self::Sha512_224,
            "sha512256" | "sha2512256" => Self::Sha512_256,
            _ => return Err(Error::UnsupportedAlgorithm(s.to_string())),
        };
        Ok(algorithm)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 8] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_224,
        Self::Sha512_256,
    ];

    /// The canonical short name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512-224",
            Self::Sha512_256 => "sha512-256",
        }
    }

    /// The digest output length in bytes, i.e. the PBKDF2 block size.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 | Self::Sha512_224 => 28,
            Self::Sha256 | Self::Sha512_256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// The largest derived key length PBKDF2 permits for this algorithm, `(2^32 - 1) * hLen`.
    pub const fn max_key_len(self) -> u64 {
        u32::MAX as u64 * self.output_len() as u64
    }

    /// Runs PBKDF2 with HMAC over this digest, filling `output`.
    pub(crate) fn derive_into(
        self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        output: &mut [u8],
    ) {
        let result = match self {
            Self::Md5 => pbkdf2::<Hmac<Md5>>(password, salt, iterations, output),
            Self::Sha1 => pbkdf2::<Hmac<Sha1>>(password, salt, iterations, output),
            Self::Sha224 => pbkdf2::<Hmac<Sha224>>(password, salt, iterations, output),
            Self::Sha256 => pbkdf2::<Hmac<Sha256>>(password, salt, iterations, output),
            Self::Sha384 => pbkdf2::<Hmac<Sha384>>(password, salt, iterations, output),
            Self::Sha512 => pbkdf2::<Hmac<Sha512>>(password, salt, iterations, output),
            Self::Sha512_224 => pbkdf2::<Hmac<Sha512_224>>(password, salt, iterations, output),
            Self::Sha512_256 => pbkdf2::<Hmac<Sha512_256>>(password, salt, iterations, output),
        };
        // HMAC accepts keys of any length
        result.expect("HMAC key of any length")
    }
}
