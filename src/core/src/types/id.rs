//! Platform identifiers

use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an encoded identifier in hex characters
pub const ID_ENCODED_LEN: usize = 16;

/// Identifier assigned by the platform to users, orgs, buckets,
/// authorizations and tasks.
///
/// On the wire it is 8 bytes rendered as 16 lowercase hex characters.
/// The zero ID is reserved and never valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(u64);

impl PlatformId {
    /// Create an ID from its numeric value
    pub fn new(value: u64) -> Result<Self, CoreError> {
        if value == 0 {
            return Err(CoreError::invalid("platform ID must be non-zero"));
        }
        Ok(PlatformId(value))
    }

    /// Numeric value of the ID
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Convert to the 16-character hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }
}

impl FromStr for PlatformId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ID_ENCODED_LEN {
            return Err(CoreError::invalid(format!(
                "platform ID must be {} hex characters, got {:?}",
                ID_ENCODED_LEN, s
            )));
        }
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| CoreError::invalid(format!("platform ID {:?}: {}", s, e)))?;
        PlatformId::new(u64::from_be_bytes(bytes))
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Serialize for PlatformId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PlatformId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: PlatformId = "020f755c3c082000".parse().unwrap();
        assert_eq!(id.get(), 0x020f_755c_3c08_2000);
        assert_eq!(id.to_string(), "020f755c3c082000");
        assert_eq!(id.to_hex(), id.to_string());
    }

    #[test]
    fn test_rejects_invalid_ids() {
        assert!(PlatformId::new(0).is_err());
        assert!("0000000000000000".parse::<PlatformId>().is_err());
        assert!("abc".parse::<PlatformId>().is_err());
        assert!("zzzzzzzzzzzzzzzz".parse::<PlatformId>().is_err());
        assert!("020f755c3c0820001".parse::<PlatformId>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = PlatformId::new(42).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"000000000000002a\"");

        let back: PlatformId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<PlatformId>("\"nope\"").is_err());
    }
}
