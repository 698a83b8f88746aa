mod collection;
mod delegate;
mod deserializer;
pub(crate) mod error;
mod preset;
mod record;
mod transport;

pub use collection::PageCollection;
pub use delegate::PageCollectionDelegate;
pub use deserializer::PageDeserializer;
pub use preset::{OffsetStrategy, PagePreset};
pub use record::{Filterable, PageRecord, UniqueRecord};
pub use transport::{PageTransport, RequestParams};
