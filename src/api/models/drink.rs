use serde::Deserialize;
use serde_json::Value;

use crate::api::page::{Filterable, UniqueRecord};

#[derive(Deserialize, Debug, Clone)]
pub struct Drink {
    id: u64,
    #[serde(default)]
    place_id: u64,
    name: String,
    #[serde(default)]
    price: u64,
}

impl Drink {
    /// Unique identifier of the drink.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Identifier of the place serving the drink. `0` when not provided.
    pub fn place_id(&self) -> u64 {
        self.place_id
    }

    /// Display name of the drink.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price in cents.
    pub fn price(&self) -> u64 {
        self.price
    }
}

impl UniqueRecord for Drink {
    fn record_id(&self) -> u64 {
        self.id
    }

    fn from_document(document: &Value) -> Option<Self> {
        serde_json::from_value(document.clone()).ok()
    }
}

impl Filterable for Drink {
    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
