//! Response envelope decoding
//!
//! Every Kraken REST response has the shape
//! `{"error": ["ECategory:Message", ...], "result": ...}`. The `result` is kept
//! as borrowed raw JSON until the error list has been checked, so an error
//! response is reported as such even when its `result` would not fit `T`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{RestError, RestResult};

#[derive(Debug, Deserialize)]
struct Envelope<'a> {
    #[serde(default)]
    error: Vec<String>,
    #[serde(borrow, default)]
    result: Option<&'a RawValue>,
}

/// Unwrap a response body into `T`
///
/// # Errors
/// - [`RestError::MalformedEnvelope`] if the body is not a JSON envelope
/// - [`RestError::Api`] if the envelope lists errors
/// - [`RestError::MissingResult`] if there are no errors but also no result
/// - [`RestError::Decode`] if the result does not deserialize into `T`
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> RestResult<T> {
    let envelope: Envelope<'_> =
        serde_json::from_slice(body).map_err(RestError::MalformedEnvelope)?;

    if !envelope.error.is_empty() {
        return Err(RestError::from_api_errors(envelope.error));
    }

    let raw = envelope.result.ok_or(RestError::MissingResult)?;

    serde_json::from_str(raw.get())
        .map_err(|e| RestError::decode(format!("unexpected result shape: {}", e)))
}
