//! Wire format for local timestamps.
//!
//! Timestamps travel as strings shaped `dd-MM-yyyy__HH:mm:ss:SSSSSS`, for
//! example `"14-10-2026__09:30:00:000000"`. Use with
//! `#[serde(default, with = "common::date_time")]` on an
//! `Option<NaiveDateTime>` field.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// `strftime` pattern of the wire format.
pub const FORMAT: &str = "%d-%m-%Y__%H:%M:%S:%6f";

/// Formats a timestamp in the wire format.
pub fn format(value: &NaiveDateTime) -> String {
    value.format(FORMAT).to_string()
}

/// Parses a timestamp from the wire format.
pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, FORMAT)
}

pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_str(&format(value)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse(&s).map_err(serde::de::Error::custom))
        .transpose()
}
