mod api;

pub use api::{
    ApiClient, ApiClientConfig, RestClientConfig,
    collections::{DrinkCollection, EventCollection, PlaceCollection, UserCollection},
    page::{
        Filterable, OffsetStrategy, PageCollection, PageCollectionDelegate, PageDeserializer,
        PagePreset, PageRecord, PageTransport, RequestParams, UniqueRecord,
    },
    rest::{ApiPath, RestClient},
};

/// Error types returned by `barlink-sdk`.
pub mod error {
    pub use super::api::{page::error::PageError, rest::error::RestApiError};
}

/// Record types served by the Barlink listings.
pub mod models {
    pub use super::api::models::{drink::Drink, event::Event, place::Place, user::User};
}
