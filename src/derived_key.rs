use crate::{Error, Result};
use alloc::{string::String, vec::Vec};
use core::{fmt, ops::Deref, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The output of a PBKDF2 derivation: exactly as many bytes as the engine's key length.
///
/// Formats and parses as lowercase hex, matching [`Engine::derive_hex`](crate::Engine::derive_hex).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivedKey(Vec<u8>);

impl From<Vec<u8>> for DerivedKey {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<DerivedKey> for Vec<u8> {
    fn from(value: DerivedKey) -> Self {
        value.0
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for DerivedKey {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for DerivedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

impl fmt::LowerHex for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DerivedKey").field(&self.to_hex()).finish()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DerivedKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for DerivedKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl DerivedKey {
    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the key, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Encodes the key as lowercase hex: two characters per byte, no separators, no prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use pbkdf2_engine::DerivedKey;
    ///
    /// let key = DerivedKey::from(vec![0x0c, 0x60, 0xc8]);
    /// assert_eq!(key.to_hex(), "0c60c8");
    /// assert_eq!(key.to_string(), "0c60c8");
    /// ```
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parses a key previously formatted with [`to_hex`](Self::to_hex). Upper-case digits are
    /// accepted.
    ///
    /// # Example
    ///
    /// ```
    /// use pbkdf2_engine::DerivedKey;
    ///
    /// let key: DerivedKey = "cdedb5281b".parse().unwrap();
    /// assert_eq!(key.as_bytes(), &[0xcd, 0xed, 0xb5, 0x28, 0x1b]);
    /// assert!(DerivedKey::parse("cdedb5281").is_err());
    /// ```
    pub fn parse<T: AsRef<str>>(s: T) -> Result<Self> {
        let bytes = hex::decode(s.as_ref())?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, string::ToString, vec};

    #[test]
    fn test_format() {
        let key = DerivedKey::from(vec![0x56, 0xfa, 0x00, 0x0f]);
        assert_eq!(key.to_hex(), "56fa000f");
        assert_eq!(key.to_string(), key.to_hex());
        assert_eq!(format!("{key:x}"), "56fa000f");
        assert_eq!(format!("{key:#x}"), "0x56fa000f");
        assert_eq!(format!("{key:?}"), "DerivedKey(\"56fa000f\")");
    }

    #[test]
    fn test_parse() {
        let key: DerivedKey = "56FA000f".parse().unwrap();
        assert_eq!(key.into_vec(), vec![0x56, 0xfa, 0x00, 0x0f]);

        assert_eq!(
            DerivedKey::parse("abc"),
            Err(Error::DecodeError(hex::FromHexError::OddLength))
        );
        assert!(matches!(
            DerivedKey::parse("zz"),
            Err(Error::DecodeError(hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 }))
        ));
    }

    #[test]
    fn test_default() {
        let key = DerivedKey::default();
        assert!(key.is_empty());
        assert_eq!(key.to_string(), "");
        assert_eq!("".parse::<DerivedKey>().unwrap(), key);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde() {
        use serde::{Deserialize, Serialize};
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Test {
            key: DerivedKey,
        }
        let test = Test { key: DerivedKey::from(vec![0xcd, 0xed, 0xb5, 0x28, 0x1b]) };
        let s = serde_json::to_string(&test).unwrap();
        assert_eq!(s, "{\"key\":\"cdedb5281b\"}");
        let test2: Test = serde_json::from_str(&s).unwrap();
        assert_eq!(test, test2);
        assert!(serde_json::from_str::<Test>("{\"key\":\"xyz\"}").is_err());
    }
}
