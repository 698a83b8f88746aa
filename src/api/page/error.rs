use std::result;

use thiserror::Error;

use crate::api::rest::error::RestApiError;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Transport error: {0}")]
    Transport(#[from] RestApiError),
    #[error("Malformed page response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = result::Result<T, PageError>;
