//! Four-character resource type codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A fixed-width resource type tag such as `STR#` or `PICT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeCode([u8; 4]);

impl TypeCode {
    pub fn new(code: &str) -> Result<Self, CoreError> {
        let bytes = code.as_bytes();
        if bytes.len() != 4 || !code.is_ascii() {
            return Err(CoreError::InvalidTypeCode {
                code: code.to_string(),
            });
        }
        Ok(Self([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The code as a big-endian integer, as stored in resource maps.
    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is accepted by `new`.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for TypeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TypeCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TypeCode::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_four_characters() {
        let code = TypeCode::new("STR#").unwrap();
        assert_eq!(code.as_bytes(), b"STR#");
        assert_eq!(code.to_string(), "STR#");
        assert_eq!(code.to_u32(), 0x5354_5223);
    }

    #[test]
    fn trailing_space_is_significant() {
        let code: TypeCode = "snd ".parse().unwrap();
        assert_eq!(code.as_str(), "snd ");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            TypeCode::new("STR"),
            Err(CoreError::InvalidTypeCode { .. })
        ));
        assert!(TypeCode::new("SPRITE").is_err());
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(TypeCode::new("ab\u{e9}").is_err());
    }

    #[test]
    fn serde_as_string() {
        let code = TypeCode::new("PICT").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"PICT\"");
        let back: TypeCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<TypeCode>("\"PICTURE\"").is_err());
    }
}
