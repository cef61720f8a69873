use std::fmt::Debug;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::ModelError;

/// On-disk pattern for `createdAt` / `updatedAt`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to whole seconds, matching what the file keeps.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Identity and timestamps shared by every record; flattened into the record's JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(with = "timestamp", default = "now")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp", default = "now")]
    pub updated_at: NaiveDateTime,
}

impl EntityMeta {
    pub fn new() -> Self {
        let ts = now();
        Self { id: None, created_at: ts, updated_at: ts }
    }

    /// Refresh `updated_at`; never moves it before `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.created_at);
    }
}

impl Default for EntityMeta {
    fn default() -> Self { Self::new() }
}

/// Capability shared by everything the file-backed store can hold.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned {
    /// Display name used in messages, e.g. `Customer with ID 3 not found`.
    const KIND: &'static str;

    fn meta(&self) -> &EntityMeta;
    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// Check the record's field rules.
    fn validate(&self) -> Result<(), ModelError>;

    fn id(&self) -> Option<u64> { self.meta().id }

    fn touch(&mut self) { self.meta_mut().touch() }
}

/// Reject empty and whitespace-only strings.
pub(crate) fn require_text(value: &str, msg: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(msg));
    }
    Ok(())
}

pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
