use chrono::{DateTime, Utc, serde::ts_seconds_option};
use serde::Deserialize;
use serde_json::Value;

use crate::api::page::{Filterable, UniqueRecord};

#[derive(Deserialize, Debug, Clone)]
pub struct Event {
    id: u64,
    #[serde(default)]
    place_id: u64,
    name: String,
    #[serde(default)]
    cover: u64,
    #[serde(default, with = "ts_seconds_option")]
    starts_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Unique identifier of the event.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Identifier of the place hosting the event. `0` when not provided.
    pub fn place_id(&self) -> u64 {
        self.place_id
    }

    /// Display name of the event.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cover charge in cents. `0` for free entry.
    pub fn cover(&self) -> u64 {
        self.cover
    }

    /// Scheduled start time, when announced.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }
}

impl UniqueRecord for Event {
    fn record_id(&self) -> u64 {
        self.id
    }

    fn from_document(document: &Value) -> Option<Self> {
        serde_json::from_value(document.clone()).ok()
    }
}

impl Filterable for Event {
    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
