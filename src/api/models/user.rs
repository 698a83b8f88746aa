use serde::Deserialize;
use serde_json::Value;

use crate::api::page::{Filterable, UniqueRecord};

#[derive(Deserialize, Debug, Clone)]
pub struct User {
    id: u64,
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    picture: String,
    #[serde(default)]
    balance: i64,
}

impl User {
    /// Unique identifier of the user.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name of the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address. Empty when the user keeps it private.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// URL of the profile picture. Empty when none was uploaded.
    pub fn picture(&self) -> &str {
        &self.picture
    }

    /// Account balance in cents.
    pub fn balance(&self) -> i64 {
        self.balance
    }
}

impl UniqueRecord for User {
    fn record_id(&self) -> u64 {
        self.id
    }

    fn from_document(document: &Value) -> Option<Self> {
        serde_json::from_value(document.clone()).ok()
    }
}

impl Filterable for User {
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();

        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }
}
