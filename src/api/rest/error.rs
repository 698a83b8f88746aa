use std::result;

use reqwest::{StatusCode, header::InvalidHeaderValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestApiError {
    #[error("Http client error: {0}")]
    HttpClient(reqwest::Error),
    #[error("Url parse error: {0}")]
    UrlParse(String),
    #[error("Invalid session token error: {0}")]
    InvalidSessionToken(#[from] InvalidHeaderValue),
    #[error("Send failed error: {0}")]
    SendFailed(reqwest::Error),
    #[error("Error response with status `{status}`: {text}")]
    ErrorResponse { status: StatusCode, text: String },
    #[error("Response decoding error: {0}")]
    ResponseDecoding(reqwest::Error),
    #[error("Failed to deserialize JSON response `{raw_response}`: {e}")]
    ResponseJsonDeserializeFailed {
        raw_response: String,
        e: serde_json::Error,
    },
}

pub type Result<T> = result::Result<T, RestApiError>;
