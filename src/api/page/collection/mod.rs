use std::{
    ops::Range,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use super::{
    delegate::PageCollectionDelegate,
    deserializer::PageDeserializer,
    error::PageError,
    preset::{OffsetStrategy, PagePreset},
    record::PageRecord,
    transport::{PageTransport, RequestParams},
};

/// Accumulating client for a paginated remote collection.
///
/// A `PageCollection` grows a local sequence of records page by page from a
/// [`PageTransport`], keeps at most one request in flight, and mirrors every
/// outcome to an optional [`PageCollectionDelegate`]. A parallel filtered
/// view, computed by [`filter`](PageCollection::filter), can be swapped in
/// front of the accumulated sequence with
/// [`set_searching`](PageCollection::set_searching).
///
/// All methods take `&self`; state lives behind an internal lock and the
/// collection can be driven from any task. Distinct collections are fully
/// independent, even when they share a transport.
pub struct PageCollection<T: PageRecord> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    preset: PagePreset,
    deserializer: PageDeserializer<T>,
    records: Vec<T>,
    filtered: Vec<T>,
    offset: usize,
    searching: bool,
    generation: u64,
    in_flight: Option<u64>,
    transport: Option<Arc<dyn PageTransport>>,
    delegate: Option<Weak<dyn PageCollectionDelegate<T>>>,
}

enum LoadOutcome<T> {
    Loaded(Vec<T>, Range<usize>),
    Failed(PageError),
}

impl<T: PageRecord> Inner<T> {
    fn visible(&self) -> &Vec<T> {
        if self.searching {
            &self.filtered
        } else {
            &self.records
        }
    }

    fn request_params(&self) -> RequestParams {
        let preset = &self.preset;

        let mut params = RequestParams::new();
        params.insert(preset.size_key().to_string(), preset.size().to_string());

        let offset = match preset.strategy() {
            OffsetStrategy::ByOffsetCount => self.offset as u64,
            OffsetStrategy::ByLastRecordId => {
                self.records.last().map(T::record_id).unwrap_or(0)
            }
        };
        params.insert(preset.offset_key().to_string(), offset.to_string());

        if let Some(scope_key) = preset.scope_key() {
            if preset.scope_id() > 0 {
                params.insert(scope_key.to_string(), preset.scope_id().to_string());
            }
        }

        // Static params win over the reserved keys on collision.
        for (key, value) in preset.params() {
            params.insert(key.clone(), value.clone());
        }

        params
    }
}

impl<T: PageRecord> PageCollection<T> {
    /// Creates a collection over `preset`, with an empty key path and no
    /// transport attached.
    pub fn new(preset: PagePreset) -> Self {
        Self {
            inner: Mutex::new(Inner {
                preset,
                deserializer: PageDeserializer::new(),
                records: Vec::new(),
                filtered: Vec::new(),
                offset: 0,
                searching: false,
                generation: 0,
                in_flight: None,
                transport: None,
                delegate: None,
            }),
        }
    }

    /// Appends keys to the path walked into page documents, consuming the
    /// collection for construction chaining.
    pub fn with_key_path<I, S>(self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.append_path(path);
        self
    }

    /// Attaches a transport, consuming the collection for construction
    /// chaining.
    pub fn with_transport(self, transport: Arc<dyn PageTransport>) -> Self {
        self.set_transport(transport);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends keys to the path walked into page documents.
    pub fn append_path<I, S>(&self, path: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.lock().deserializer.append_path(path);
    }

    /// Attaches the transport used to fetch pages. Without a transport,
    /// [`load`](PageCollection::load) is a no-op.
    pub fn set_transport(&self, transport: Arc<dyn PageTransport>) {
        self.lock().transport = Some(transport);
    }

    /// Registers the delegate notified about page loads.
    ///
    /// The delegate is held weakly; once the last `Arc` to it drops,
    /// notifications stop.
    pub fn set_delegate<D>(&self, delegate: &Arc<D>)
    where
        D: PageCollectionDelegate<T> + 'static,
    {
        let delegate = Arc::downgrade(delegate) as Weak<dyn PageCollectionDelegate<T>>;
        self.lock().delegate = Some(delegate);
    }

    /// Fetches the next page and merges it into the accumulated sequence.
    ///
    /// Returns `true` when a fetch was performed. The call is a silent no-op
    /// returning `false` when another load is already in flight or no
    /// transport is attached.
    ///
    /// On success the delegate receives
    /// [`page_loaded`](PageCollectionDelegate::page_loaded) followed by
    /// [`range_changed`](PageCollectionDelegate::range_changed) with the
    /// indices the batch now occupies; on failure it receives
    /// [`load_failed`](PageCollectionDelegate::load_failed). An outcome that
    /// was superseded by [`clean`](PageCollection::clean) or
    /// [`cancel`](PageCollection::cancel) while the request was out is
    /// discarded without any notification.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use barlink_sdk::{ApiClient, ApiClientConfig};
    ///
    /// let api = ApiClient::new(ApiClientConfig::default(), "api.barlink.app")?;
    /// let events = api.events();
    ///
    /// if events.load().await {
    ///     println!("loaded {} events", events.count());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self) -> bool {
        let (transport, path, params, generation) = {
            let mut inner = self.lock();

            if inner.in_flight.is_some() {
                return false;
            }
            let Some(transport) = inner.transport.clone() else {
                return false;
            };

            let generation = inner.generation;
            inner.in_flight = Some(generation);

            (
                transport,
                inner.preset.path().to_string(),
                inner.request_params(),
                generation,
            )
        };

        let response = transport.get(&path, &params).await;

        let (outcome, delegate) = {
            let mut inner = self.lock();

            if inner.in_flight == Some(generation) {
                inner.in_flight = None;
            }
            if inner.generation != generation {
                // Superseded while the request was out. The outcome must not
                // reach the reset sequence or the delegate.
                return true;
            }

            let outcome = match response {
                Ok(Some(document)) => match inner.deserializer.deserialize(&document) {
                    Ok(batch) => {
                        let start = inner.records.len();
                        inner.records.extend_from_slice(&batch);
                        if inner.preset.strategy() == OffsetStrategy::ByOffsetCount {
                            inner.offset += batch.len();
                        }
                        LoadOutcome::Loaded(batch, start..inner.records.len())
                    }
                    Err(error) => LoadOutcome::Failed(error),
                },
                Ok(None) => LoadOutcome::Failed(PageError::MalformedResponse(
                    "missing payload".to_string(),
                )),
                Err(error) => LoadOutcome::Failed(PageError::Transport(error)),
            };

            (outcome, inner.delegate.as_ref().and_then(Weak::upgrade))
        };

        if let Some(delegate) = delegate {
            match outcome {
                LoadOutcome::Loaded(batch, range) => {
                    delegate.page_loaded(&batch);
                    delegate.range_changed(range);
                }
                LoadOutcome::Failed(error) => delegate.load_failed(&error),
            }
        }

        true
    }

    /// Rebuilds the filtered view from the records matching `query` and
    /// returns its size.
    ///
    /// The predicate pass runs on the blocking thread pool over a snapshot
    /// of the accumulated sequence; the sequence itself is never touched and
    /// no fetch is triggered. Activate the view with
    /// [`set_searching`](PageCollection::set_searching).
    pub async fn filter(&self, query: impl ToString) -> usize {
        let query = query.to_string();

        let (snapshot, generation) = {
            let inner = self.lock();
            (inner.records.clone(), inner.generation)
        };

        let handle = tokio::task::spawn_blocking(move || {
            snapshot
                .into_iter()
                .filter(|record| record.matches(&query))
                .collect::<Vec<_>>()
        });

        // A panicked predicate leaves the previous view in place.
        let Ok(filtered) = handle.await else {
            return self.lock().filtered.len();
        };

        let mut inner = self.lock();
        if inner.generation == generation {
            inner.filtered = filtered;
        }
        inner.filtered.len()
    }

    /// Switches record access between the accumulated sequence and the
    /// filtered view.
    pub fn set_searching(&self, searching: bool) {
        self.lock().searching = searching;
    }

    /// Returns `true` while the filtered view is active.
    pub fn is_searching(&self) -> bool {
        self.lock().searching
    }

    /// Returns `true` while a page request is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Number of records in the currently visible view.
    pub fn count(&self) -> usize {
        self.lock().visible().len()
    }

    /// Returns `true` when the currently visible view holds no records.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Record at `index` in the currently visible view.
    pub fn get(&self, index: usize) -> Option<T> {
        self.lock().visible().get(index).cloned()
    }

    /// Snapshot of the currently visible view.
    pub fn objects(&self) -> Vec<T> {
        self.lock().visible().clone()
    }

    /// Configured number of records per page.
    pub fn page_size(&self) -> usize {
        self.lock().preset.size().get()
    }

    /// Number of pages the currently visible view spans, rounded up.
    pub fn pages_loaded(&self) -> usize {
        let inner = self.lock();
        inner.visible().len().div_ceil(inner.preset.size().get())
    }

    /// Returns `true` when displaying `index` should trigger the next page
    /// load, i.e. the view is not filtered and `index` is the last visible
    /// index.
    pub fn should_load_next(&self, index: usize) -> bool {
        let inner = self.lock();
        !inner.searching && inner.visible().len().checked_sub(1) == Some(index)
    }

    /// Current scope identifier of the preset. `0` means unscoped.
    pub fn scope_id(&self) -> u64 {
        self.lock().preset.scope_id()
    }

    /// Scopes subsequent page requests to the given parent resource.
    pub fn set_scope_id(&self, id: u64) {
        self.lock().preset.set_scope_id(id);
    }

    /// Adds a static query parameter sent with every subsequent page
    /// request. Static parameters win over the reserved size, offset and
    /// scope parameters on key collisions.
    pub fn insert_param(&self, key: impl ToString, value: impl ToString) {
        self.lock().preset.insert_param(key, value);
    }

    /// Discards the accumulated sequence, the filtered view and the offset
    /// state, and invalidates any request currently in flight.
    ///
    /// An invalidated request keeps its in-flight slot until it drains, so
    /// the next [`load`](PageCollection::load) stays a no-op until then; the
    /// stale outcome itself can never reach the reset sequence. Use
    /// [`cancel`](PageCollection::cancel) to release the slot immediately.
    pub fn clean(&self) {
        let mut inner = self.lock();
        inner.records.clear();
        inner.filtered.clear();
        inner.offset = 0;
        inner.generation += 1;
    }

    /// Invalidates any request currently in flight and releases its slot so
    /// a new load can start immediately. The superseded outcome is discarded
    /// when it arrives. Accumulated records are kept.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.in_flight = None;
    }
}

#[cfg(test)]
mod tests;
