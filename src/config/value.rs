//! Stream source kind and its lenient parser.
//!
//! # Design Decisions
//! - Matching is exact and case-sensitive: only `backend` and `link`
//! - Anything else resolves to `backend`; parsing never fails
//! - Shape coercion (null, numbers, bytes) happens at the decode boundary,
//!   this module only ever sees text

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::loader::scalar_text;

/// Selects whether playback is served by the backend streaming server or by
/// a direct external link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamSourceType {
    /// The backend streaming server (default).
    #[default]
    Backend,
    /// A direct link.
    Link,
}

/// Returned by the strict [`FromStr`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stream source type: {0:?} (expected \"backend\" or \"link\")")]
pub struct UnknownStreamSourceType(pub String);

impl StreamSourceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Link => "link",
        }
    }

    /// Lenient parse. Absent, empty or unrecognised text gives `Backend`.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|text| text.parse().ok()).unwrap_or_default()
    }

    /// Lenient parse of raw bytes, decoded as (lossy) UTF-8.
    pub fn from_bytes(raw: Option<&[u8]>) -> Self {
        Self::parse(raw.map(String::from_utf8_lossy).as_deref())
    }

    /// Whether `raw` names a kind exactly.
    pub fn is_recognized(raw: &str) -> bool {
        raw.parse::<Self>().is_ok()
    }
}

impl FromStr for StreamSourceType {
    type Err = UnknownStreamSourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backend" => Ok(Self::Backend),
            "link" => Ok(Self::Link),
            other => Err(UnknownStreamSourceType(other.to_string())),
        }
    }
}

impl fmt::Display for StreamSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Deserialization goes through the lenient parser so a snapshot holding an
// arbitrary scalar still yields a valid kind.
impl<'de> Deserialize<'de> for StreamSourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_yaml::Value::deserialize(deserializer)?;
        Ok(Self::parse(scalar_text(&raw).as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(StreamSourceType::parse(Some("link")), StreamSourceType::Link);
        assert_eq!(StreamSourceType::parse(Some("backend")), StreamSourceType::Backend);
    }

    #[test]
    fn test_parse_defaults_to_backend() {
        assert_eq!(StreamSourceType::parse(None), StreamSourceType::Backend);
        assert_eq!(StreamSourceType::parse(Some("")), StreamSourceType::Backend);
        assert_eq!(StreamSourceType::parse(Some("LINK")), StreamSourceType::Backend);
        assert_eq!(StreamSourceType::parse(Some(" link")), StreamSourceType::Backend);
        assert_eq!(StreamSourceType::parse(Some("lnk")), StreamSourceType::Backend);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(StreamSourceType::from_bytes(Some(b"link".as_slice())), StreamSourceType::Link);
        assert_eq!(StreamSourceType::from_bytes(Some([0xff, 0xfe].as_slice())), StreamSourceType::Backend);
        assert_eq!(StreamSourceType::from_bytes(None), StreamSourceType::Backend);
    }

    #[test]
    fn test_strict_from_str() {
        assert_eq!("link".parse::<StreamSourceType>(), Ok(StreamSourceType::Link));
        let err = "Link".parse::<StreamSourceType>().unwrap_err();
        assert_eq!(err, UnknownStreamSourceType("Link".into()));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in [StreamSourceType::Backend, StreamSourceType::Link] {
            assert_eq!(StreamSourceType::parse(Some(&kind.to_string())), kind);
        }
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let kind: StreamSourceType = serde_json::from_str("\"link\"").unwrap();
        assert_eq!(kind, StreamSourceType::Link);
        let kind: StreamSourceType = serde_json::from_str("\"corrupted\"").unwrap();
        assert_eq!(kind, StreamSourceType::Backend);
        let kind: StreamSourceType = serde_json::from_str("null").unwrap();
        assert_eq!(kind, StreamSourceType::Backend);
    }

    #[test]
    fn test_deserialize_coerces_other_shapes() {
        for raw in ["5", "true", "1.5", "[\"link\"]", "{\"kind\": \"link\"}"] {
            let kind: StreamSourceType = serde_json::from_str(raw).unwrap();
            assert_eq!(kind, StreamSourceType::Backend, "{raw}");
        }
        let kind: StreamSourceType = serde_yaml::from_str("!custom link").unwrap();
        assert_eq!(kind, StreamSourceType::Link);
    }

    proptest! {
        #[test]
        fn prop_parse_only_accepts_exact_link(raw in ".*") {
            let kind = StreamSourceType::parse(Some(&raw));
            if raw == "link" {
                prop_assert_eq!(kind, StreamSourceType::Link);
            } else {
                prop_assert_eq!(kind, StreamSourceType::Backend);
            }
        }

        #[test]
        fn prop_from_bytes_never_fails(raw in proptest::collection::vec(any::<u8>(), 0..16)) {
            let kind = StreamSourceType::from_bytes(Some(raw.as_slice()));
            prop_assert!(matches!(kind, StreamSourceType::Backend | StreamSourceType::Link));
        }
    }
}
