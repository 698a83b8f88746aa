use std::num::NonZeroUsize;

use super::transport::RequestParams;

const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(20).unwrap();

const DEFAULT_SIZE_KEY: &str = "per_page";
const COUNT_OFFSET_KEY: &str = "page";
const CURSOR_OFFSET_KEY: &str = "since";

/// How a collection reports its position when requesting the next page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetStrategy {
    /// The offset parameter carries the number of records accumulated so far.
    ByOffsetCount,
    /// The offset parameter carries the identifier of the newest accumulated
    /// record, or `0` when nothing has been accumulated yet.
    ByLastRecordId,
}

/// Static description of a paginated endpoint.
///
/// A preset fixes the endpoint path, the parameter keys, the page size and
/// the [`OffsetStrategy`]; a [`PageCollection`](super::PageCollection) built
/// from it keeps the moving parts (offset state, accumulated records).
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use barlink_sdk::{OffsetStrategy, PagePreset};
///
/// // Barlink service defaults
/// let preset = PagePreset::barlink("/v1/events", OffsetStrategy::ByOffsetCount)
///     .with_scope_key("place_id");
///
/// // Explicit keys for a non-standard endpoint
/// let preset = PagePreset::new(
///     "/v1/archive",
///     OffsetStrategy::ByLastRecordId,
///     "limit",
///     "after",
///     NonZeroUsize::new(50).unwrap(),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct PagePreset {
    path: String,
    strategy: OffsetStrategy,
    size_key: String,
    offset_key: String,
    size: NonZeroUsize,
    scope_key: Option<String>,
    scope_id: u64,
    params: RequestParams,
}

impl PagePreset {
    /// Creates a preset with explicit parameter keys.
    pub fn new(
        path: impl Into<String>,
        strategy: OffsetStrategy,
        size_key: impl ToString,
        offset_key: impl ToString,
        size: NonZeroUsize,
    ) -> Self {
        Self {
            path: path.into(),
            strategy,
            size_key: size_key.to_string(),
            offset_key: offset_key.to_string(),
            size,
            scope_key: None,
            scope_id: 0,
            params: RequestParams::new(),
        }
    }

    /// Creates a preset with the Barlink service defaults: page size 20, the
    /// `per_page` size key, and the offset key matching the strategy
    /// (`page` for [`OffsetStrategy::ByOffsetCount`], `since` for
    /// [`OffsetStrategy::ByLastRecordId`]).
    pub fn barlink(path: impl Into<String>, strategy: OffsetStrategy) -> Self {
        let offset_key = match strategy {
            OffsetStrategy::ByOffsetCount => COUNT_OFFSET_KEY,
            OffsetStrategy::ByLastRecordId => CURSOR_OFFSET_KEY,
        };

        Self::new(path, strategy, DEFAULT_SIZE_KEY, offset_key, DEFAULT_PAGE_SIZE)
    }

    /// Sets the page size. The default is 20 records per page.
    pub fn with_size(mut self, size: NonZeroUsize) -> Self {
        self.size = size;
        self
    }

    /// Sets the parameter key used to scope requests to a parent resource.
    /// The scope parameter is only sent once a non-zero scope id is set.
    pub fn with_scope_key(mut self, key: impl ToString) -> Self {
        self.scope_key = Some(key.to_string());
        self
    }

    /// Sets the scope identifier. `0` leaves the preset unscoped.
    pub fn with_scope_id(mut self, id: u64) -> Self {
        self.scope_id = id;
        self
    }

    /// Adds a static query parameter sent with every page request.
    ///
    /// Static parameters are merged last and take precedence over the
    /// reserved size, offset and scope parameters on key collisions.
    pub fn with_param(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Endpoint path the preset describes.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Offset strategy used when requesting the next page.
    pub fn strategy(&self) -> OffsetStrategy {
        self.strategy
    }

    /// Number of records requested per page.
    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// Query parameter key carrying the page size.
    pub fn size_key(&self) -> &str {
        &self.size_key
    }

    /// Query parameter key carrying the offset.
    pub fn offset_key(&self) -> &str {
        &self.offset_key
    }

    /// Query parameter key carrying the scope id, if the preset is scoped.
    pub fn scope_key(&self) -> Option<&str> {
        self.scope_key.as_deref()
    }

    /// Current scope identifier. `0` means unscoped.
    pub fn scope_id(&self) -> u64 {
        self.scope_id
    }

    /// Static query parameters sent with every page request.
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub(super) fn set_scope_id(&mut self, id: u64) {
        self.scope_id = id;
    }

    pub(super) fn insert_param(&mut self, key: impl ToString, value: impl ToString) {
        self.params.insert(key.to_string(), value.to_string());
    }
}
