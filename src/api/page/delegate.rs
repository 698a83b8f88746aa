use std::ops::Range;

use super::error::PageError;

/// Observer notified about the outcome of page loads.
///
/// Collections hold their delegate weakly; keeping the delegate alive is the
/// caller's responsibility. Notifications are delivered on the task driving
/// [`PageCollection::load`](super::PageCollection::load), after the
/// collection released its internal state, so a delegate may call back into
/// the collection.
pub trait PageCollectionDelegate<T>: Send + Sync {
    /// Called with the freshly merged batch after a page loaded successfully.
    fn page_loaded(&self, batch: &[T]);

    /// Called after [`page_loaded`] with the index range the batch occupies
    /// in the accumulated sequence. The range is empty when the page carried
    /// no valid records.
    ///
    /// [`page_loaded`]: PageCollectionDelegate::page_loaded
    fn range_changed(&self, range: Range<usize>);

    /// Called when a page load fails. The default implementation ignores the
    /// error.
    fn load_failed(&self, _error: &PageError) {}
}
