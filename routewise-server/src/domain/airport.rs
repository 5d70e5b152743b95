//! Airport identifier types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid airport identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport identifier: {reason}")]
pub struct InvalidAirportId {
    reason: &'static str,
}

/// An opaque airport identifier, usually a 3-letter IATA code.
///
/// Identifiers are compared verbatim. The only invariant is that the
/// identifier is not empty and not made of whitespace alone. The string
/// is reference counted so that cloning ids into cost tables and paths
/// stays cheap.
///
/// # Examples
///
/// ```
/// use routewise_server::domain::AirportId;
///
/// let msp = AirportId::parse("MSP").unwrap();
/// assert_eq!(msp.as_str(), "MSP");
///
/// // Blank identifiers are rejected
/// assert!(AirportId::parse("").is_err());
/// assert!(AirportId::parse("   ").is_err());
///
/// // User input can be normalized first
/// let dca = AirportId::parse_normalized(" dca ").unwrap();
/// assert_eq!(dca.as_str(), "DCA");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportId(Arc<str>);

impl AirportId {
    /// Parse an airport identifier, keeping it exactly as given.
    pub fn parse(s: &str) -> Result<Self, InvalidAirportId> {
        if s.is_empty() {
            return Err(InvalidAirportId {
                reason: "must not be empty",
            });
        }

        if s.trim().is_empty() {
            return Err(InvalidAirportId {
                reason: "must not be only whitespace",
            });
        }

        Ok(AirportId(Arc::from(s)))
    }

    /// Parse user input: surrounding whitespace is trimmed and letters are
    /// upper-cased before validation.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirportId> {
        Self::parse(&s.trim().to_uppercase())
    }

    /// Parse a comma-separated list such as `"MSP,DCA,MIA"`, normalizing
    /// each item. Any blank item rejects the whole list.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, InvalidAirportId> {
        s.split(',').map(Self::parse_normalized).collect()
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AirportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportId({})", self.as_str())
    }
}

impl fmt::Display for AirportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AirportId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AirportId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AirportId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(AirportId::parse("MSP").is_ok());
        assert!(AirportId::parse("DCA").is_ok());
        assert!(AirportId::parse("KMSP").is_ok());
        assert!(AirportId::parse("x").is_ok());
    }

    #[test]
    fn reject_blank() {
        assert!(AirportId::parse("").is_err());
        assert!(AirportId::parse(" ").is_err());
        assert!(AirportId::parse("\t\n").is_err());
    }

    #[test]
    fn parse_keeps_input_verbatim() {
        let id = AirportId::parse("msp").unwrap();
        assert_eq!(id.as_str(), "msp");
        assert_ne!(id, AirportId::parse("MSP").unwrap());
    }

    #[test]
    fn parse_normalized_trims_and_uppercases() {
        let id = AirportId::parse_normalized("  mia\n").unwrap();
        assert_eq!(id.as_str(), "MIA");
        assert!(AirportId::parse_normalized("   ").is_err());
    }

    #[test]
    fn parse_list_keeps_order() {
        let ids = AirportId::parse_list("msp, DCA ,mia").unwrap();
        let codes: Vec<_> = ids.iter().map(AirportId::as_str).collect();
        assert_eq!(codes, vec!["MSP", "DCA", "MIA"]);
    }

    #[test]
    fn parse_list_rejects_blank_items() {
        assert!(AirportId::parse_list("").is_err());
        assert!(AirportId::parse_list("MSP,,DCA").is_err());
        assert!(AirportId::parse_list("MSP,").is_err());
    }

    #[test]
    fn display() {
        let id = AirportId::parse("SEA").unwrap();
        assert_eq!(format!("{}", id), "SEA");
    }

    #[test]
    fn debug() {
        let id = AirportId::parse("DTW").unwrap();
        assert_eq!(format!("{:?}", id), "AirportId(DTW)");
    }

    #[test]
    fn serde_roundtrip_as_plain_string() {
        let id = AirportId::parse("ORD").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ORD\"");

        let back: AirportId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<AirportId>("\"\"").is_err());
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(AirportId::parse("MSP").unwrap());
        assert!(set.contains(&AirportId::parse("MSP").unwrap()));
        assert!(!set.contains(&AirportId::parse("DCA").unwrap()));
    }
}
