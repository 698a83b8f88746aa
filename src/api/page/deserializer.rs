use std::marker::PhantomData;

use serde_json::Value;

use super::{
    error::{PageError, Result},
    record::UniqueRecord,
};

/// Extracts record batches out of raw page documents.
///
/// The deserializer walks its key path into the document, one key at a time,
/// and expects a JSON array at the end of the walk. Every element of that
/// array is handed to [`UniqueRecord::from_document`]; elements that fail to
/// convert are dropped, they never fail the page.
pub struct PageDeserializer<T> {
    key_path: Vec<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: UniqueRecord> PageDeserializer<T> {
    pub fn new() -> Self {
        Self {
            key_path: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Appends keys to the path walked into page documents. An empty path
    /// expects the document itself to be the record array.
    pub fn append_path<I, S>(&mut self, path: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.key_path.extend(path.into_iter().map(|key| key.to_string()));
    }

    /// Keys walked into page documents, in order.
    pub fn key_path(&self) -> &[String] {
        &self.key_path
    }

    /// Extracts the record batch from a raw page document.
    ///
    /// Fails with [`PageError::MalformedResponse`] when a key of the path is
    /// missing or the value at the end of the walk is not an array.
    pub fn deserialize(&self, document: &Value) -> Result<Vec<T>> {
        let mut node = document;

        for key in &self.key_path {
            node = node
                .get(key)
                .ok_or_else(|| PageError::MalformedResponse(format!("no value at key `{key}`")))?;
        }

        let items = node.as_array().ok_or_else(|| {
            PageError::MalformedResponse(match self.key_path.last() {
                Some(key) => format!("value at key `{key}` is not a record array"),
                None => "document is not a record array".to_string(),
            })
        })?;

        Ok(items.iter().filter_map(T::from_document).collect())
    }
}

impl<T: UniqueRecord> Default for PageDeserializer<T> {
    fn default() -> Self {
        Self::new()
    }
}
