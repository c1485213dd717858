//! Change events - atoms of an item's timeline.

use serde::{Deserialize, Serialize};
use crate::item::RawChangeEvent;
use crate::Time;

/// Format of tracker timestamps: millisecond precision, numeric offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// A field change with its timestamp parsed. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Changed field identifier
    pub field: String,

    /// Previous value
    pub from_value: String,

    /// New value
    pub to_value: String,

    /// When the change happened
    pub occurred_at: Time,
}

impl ChangeEvent {
    /// Parse a raw tracker event.
    pub fn parse(raw: &RawChangeEvent) -> Result<Self, chrono::ParseError> {
        let occurred_at = Time::parse_from_str(&raw.created, TIMESTAMP_FORMAT)?;
        Ok(Self {
            field: raw.field.clone(),
            from_value: raw.from_value.clone(),
            to_value: raw.to_value.clone(),
            occurred_at,
        })
    }
}
