use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

pub mod draft;

pub use draft::{EventDraft, EventMetadata, ImageFile};

/// An event as mirrored by the index. Never mutated locally.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndexedEvent {
    pub id: String,
    pub name: String,
    /// Milliseconds since the epoch.
    #[serde(deserialize_with = "millis_from_string_or_number")]
    pub event_timestamp: i64,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
}

impl IndexedEvent {
    pub fn starts_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.event_timestamp).single()
    }
}

// Subgraph BigInt fields arrive as decimal strings.
fn millis_from_string_or_number<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }
    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse::<i64>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_subgraph_shape() {
        let ev: IndexedEvent = serde_json::from_value(serde_json::json!({
            "id": "0xabc",
            "name": "Yoga Flow",
            "eventTimestamp": "1663762560000",
            "imageURL": "https://ipfs.io/ipfs/bafy/yoga.png"
        }))
        .unwrap();
        assert_eq!(ev.event_timestamp, 1_663_762_560_000);
        assert_eq!(ev.image_url.as_deref(), Some("https://ipfs.io/ipfs/bafy/yoga.png"));
        assert!(!ev.is_disabled);
    }

    #[test]
    fn accepts_numeric_timestamp_and_missing_image() {
        let ev: IndexedEvent = serde_json::from_value(serde_json::json!({
            "id": "1", "name": "x", "eventTimestamp": 42, "isDisabled": true
        }))
        .unwrap();
        assert_eq!(ev.event_timestamp, 42);
        assert!(ev.image_url.is_none());
        assert!(ev.is_disabled);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let res = serde_json::from_value::<IndexedEvent>(serde_json::json!({
            "id": "1", "name": "x", "eventTimestamp": "soon"
        }));
        assert!(res.is_err());
    }
}
