use std::sync::Arc;

use super::{
    models::{drink::Drink, event::Event, place::Place, user::User},
    page::{OffsetStrategy, PageCollection, PagePreset, PageTransport},
    rest::ApiPath,
};

/// Paginated collection of [`Event`] records.
pub type EventCollection = PageCollection<Event>;
/// Paginated collection of [`Drink`] records.
pub type DrinkCollection = PageCollection<Drink>;
/// Paginated collection of [`Place`] records.
pub type PlaceCollection = PageCollection<Place>;
/// Paginated collection of [`User`] records.
pub type UserCollection = PageCollection<User>;

const RESPONSE_KEY: &str = "response";
const EVENTS_KEY: &str = "events";
const DRINKS_KEY: &str = "drinks";
const PLACES_KEY: &str = "places";
const USERS_KEY: &str = "users";

const PLACE_SCOPE_KEY: &str = "place_id";
const USER_SCOPE_KEY: &str = "id";

impl PageCollection<Event> {
    /// Collection over the events listing. Scope it to a single place with
    /// [`set_scope_id`](PageCollection::set_scope_id).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(rest: std::sync::Arc<barlink_sdk::RestClient>) {
    /// use barlink_sdk::EventCollection;
    ///
    /// let events = EventCollection::events(rest);
    /// events.set_scope_id(42);
    ///
    /// events.load().await;
    /// # }
    /// ```
    pub fn events(transport: Arc<dyn PageTransport>) -> Self {
        Self::new(
            PagePreset::barlink(ApiPath::Events, OffsetStrategy::ByOffsetCount)
                .with_scope_key(PLACE_SCOPE_KEY),
        )
        .with_key_path([RESPONSE_KEY, EVENTS_KEY])
        .with_transport(transport)
    }
}

impl PageCollection<Drink> {
    /// Collection over the drinks listing. Scope it to a single place with
    /// [`set_scope_id`](PageCollection::set_scope_id).
    pub fn drinks(transport: Arc<dyn PageTransport>) -> Self {
        Self::new(
            PagePreset::barlink(ApiPath::Drinks, OffsetStrategy::ByOffsetCount)
                .with_scope_key(PLACE_SCOPE_KEY),
        )
        .with_key_path([RESPONSE_KEY, DRINKS_KEY])
        .with_transport(transport)
    }
}

impl PageCollection<Place> {
    /// Collection over the places listing.
    pub fn places(transport: Arc<dyn PageTransport>) -> Self {
        Self::new(PagePreset::barlink(
            ApiPath::Places,
            OffsetStrategy::ByOffsetCount,
        ))
        .with_key_path([RESPONSE_KEY, PLACES_KEY])
        .with_transport(transport)
    }
}

impl PageCollection<User> {
    /// Collection over the friends of `user_id`, paginated by cursor.
    pub fn friends_of(user_id: u64, transport: Arc<dyn PageTransport>) -> Self {
        Self::new(
            PagePreset::barlink(ApiPath::Friends, OffsetStrategy::ByLastRecordId)
                .with_scope_key(USER_SCOPE_KEY)
                .with_scope_id(user_id),
        )
        .with_key_path([RESPONSE_KEY, USERS_KEY])
        .with_transport(transport)
    }

    /// Collection over the user directory, paginated by cursor.
    pub fn user_search(transport: Arc<dyn PageTransport>) -> Self {
        Self::new(PagePreset::barlink(
            ApiPath::UserSearch,
            OffsetStrategy::ByLastRecordId,
        ))
        .with_key_path([RESPONSE_KEY, USERS_KEY])
        .with_transport(transport)
    }
}
