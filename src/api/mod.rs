mod client;
pub(crate) mod collections;
mod config;
pub(crate) mod models;
pub(crate) mod page;
pub(crate) mod rest;

pub use client::ApiClient;
pub use config::{ApiClientConfig, RestClientConfig};
