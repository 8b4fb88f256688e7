use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::domain::units::{deposit_to_base_units, event_timestamp, parse_capacity};
use crate::error::DraftError;

/// Form input for a new event. Lives only for one submission attempt.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub link: String,
    pub date: String,
    pub time: String,
    /// Display currency, passed to the contract as text.
    pub cost: String,
    pub max_capacity: String,
    /// Refundable deposit in native token units.
    pub refund: String,
    pub image: Option<ImageFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The JSON record uploaded next to the image.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    pub name: String,
    pub description: String,
    pub link: String,
    pub image: String,
}

impl EventMetadata {
    pub const FILE_NAME: &'static str = "data.json";

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Everything the upload and the contract call need, already converted.
#[derive(Debug, Clone)]
pub struct ValidatedDraft {
    pub metadata: EventMetadata,
    pub image: ImageFile,
    pub event_timestamp: i64,
    pub deposit: U256,
    pub max_capacity: u64,
    pub cost: String,
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, DraftError> {
    match value.trim() {
        "" => Err(DraftError::Missing(field)),
        v => Ok(v),
    }
}

impl EventDraft {
    pub fn validate(&self) -> Result<ValidatedDraft, DraftError> {
        let name = required(&self.name, "event name")?;
        let link = required(&self.link, "event link")?;
        let cost = required(&self.cost, "event cost")?;
        let image = match &self.image {
            Some(img) if !img.file_name.trim().is_empty() => img.clone(),
            _ => return Err(DraftError::Missing("image")),
        };
        let max_capacity = parse_capacity(&self.max_capacity)?;
        let deposit = deposit_to_base_units(&self.refund)?;
        let event_timestamp = event_timestamp(&self.date, &self.time)?;

        Ok(ValidatedDraft {
            metadata: EventMetadata {
                name: name.to_owned(),
                description: self.description.clone(),
                link: link.to_owned(),
                image: format!("/{}", image.file_name),
            },
            image,
            event_timestamp,
            deposit,
            max_capacity,
            cost: cost.to_owned(),
        })
    }

    /// Clears the free-text fields the form resets after an attempt.
    pub fn clear_text_fields(&mut self) {
        self.name.clear();
        self.description.clear();
        self.link.clear();
        self.cost.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_draft() -> EventDraft {
        EventDraft {
            name: "Yoga Flow".into(),
            description: "Morning session".into(),
            link: "https://meet.example.com/yoga".into(),
            date: "2022-09-21".into(),
            time: "12:16".into(),
            cost: "15".into(),
            max_capacity: "100".into(),
            refund: "0.001".into(),
            image: Some(ImageFile { file_name: "yoga.png".into(), bytes: vec![0x89, b'P', b'N', b'G'] }),
        }
    }

    #[test]
    fn validated_draft_carries_converted_values() {
        let v = sample_draft().validate().unwrap();
        assert_eq!(v.metadata.image, "/yoga.png");
        assert_eq!(v.metadata.name, "Yoga Flow");
        assert_eq!(v.deposit, U256::from(1_000_000_000_000_000u64));
        assert_eq!(v.max_capacity, 100);
        assert_eq!(v.cost, "15");
    }

    #[test]
    fn metadata_json_shape() {
        let v = sample_draft().validate().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&v.metadata.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Yoga Flow",
                "description": "Morning session",
                "link": "https://meet.example.com/yoga",
                "image": "/yoga.png"
            })
        );
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut d = sample_draft();
        d.image = None;
        assert_eq!(d.validate().unwrap_err(), DraftError::Missing("image"));

        let mut d = sample_draft();
        d.name = "  ".into();
        assert_eq!(d.validate().unwrap_err(), DraftError::Missing("event name"));

        let mut d = sample_draft();
        d.refund.clear();
        assert_eq!(d.validate().unwrap_err(), DraftError::Missing("refundable deposit"));
    }

    #[test]
    fn description_is_optional() {
        let mut d = sample_draft();
        d.description.clear();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn clearing_keeps_schedule_and_image() {
        let mut d = sample_draft();
        d.clear_text_fields();
        assert!(d.name.is_empty() && d.description.is_empty() && d.link.is_empty() && d.cost.is_empty());
        assert_eq!(d.date, "2022-09-21");
        assert!(d.image.is_some());
    }
}
