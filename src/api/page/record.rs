use serde_json::Value;

/// A record that carries a stable unique identifier and can be built from a
/// raw JSON document.
///
/// Implementations back the two pagination primitives: cursor-style offsets
/// read [`record_id`] from the newest accumulated record, and page merges
/// build each record with [`from_document`].
///
/// [`record_id`]: UniqueRecord::record_id
/// [`from_document`]: UniqueRecord::from_document
pub trait UniqueRecord: Sized {
    /// Stable identifier of the record within its collection.
    fn record_id(&self) -> u64;

    /// Builds a record from a raw JSON document.
    ///
    /// Returns `None` when the document does not describe a valid record,
    /// e.g. when the identifier or a mandatory field is missing. Such
    /// documents are dropped from the page they arrived in.
    fn from_document(document: &Value) -> Option<Self>;
}

/// A record that can be matched against a free-text search query.
pub trait Filterable {
    /// Returns `true` when the record matches `query`.
    fn matches(&self, query: &str) -> bool;
}

/// Bounds required of records managed by a
/// [`PageCollection`](super::PageCollection).
///
/// Implemented automatically for every type that satisfies the component
/// traits.
pub trait PageRecord: UniqueRecord + Filterable + Clone + Send + Sync + 'static {}

impl<T> PageRecord for T where T: UniqueRecord + Filterable + Clone + Send + Sync + 'static {}
