use serde::Deserialize;
use serde_json::Value;

use crate::api::page::{Filterable, UniqueRecord};

#[derive(Deserialize, Debug, Clone)]
pub struct Place {
    id: u64,
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    open: bool,
}

impl Place {
    /// Unique identifier of the place.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name of the place.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Street address. Empty when not published.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether the place is currently open.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl UniqueRecord for Place {
    fn record_id(&self) -> u64 {
        self.id
    }

    fn from_document(document: &Value) -> Option<Self> {
        serde_json::from_value(document.clone()).ok()
    }
}

impl Filterable for Place {
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();

        self.name.to_lowercase().contains(&query) || self.address.to_lowercase().contains(&query)
    }
}
