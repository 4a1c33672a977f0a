// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-layer decoding of API responses.
//!
//! Every response body is wrapped as `{"response": <payload>}`. Errors
//! (status >= 400) carry `{"response": {"error": {"code", "messages"}}}`.
//! Unwrapping the envelope is independent of the payload shape, which the
//! caller supplies afterwards through [`decode_into`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::{ApiError, ClientError};

/// The still-encoded payload found inside a response envelope
#[derive(Debug, Clone)]
pub struct Payload(Box<RawValue>);

impl Payload {
    /// The payload's JSON text, exactly as it appeared in the body
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        decode_into(self)
    }
}

#[derive(Deserialize)]
struct Envelope {
    response: Box<RawValue>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    response: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    messages: Vec<String>,
}

/// Unwrap a response body, or turn it into an error for status >= 400
pub fn decode_success(body: &[u8], status: u16) -> Result<Payload, ClientError> {
    if status >= 400 {
        return Err(ClientError::Api(decode_error(body, status)));
    }

    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|source| ClientError::MalformedEnvelope { status, source })?;

    Ok(Payload(envelope.response))
}

/// Best-effort decoding of an error body
///
/// An unparseable body still yields an error carrying the status code.
pub fn decode_error(body: &[u8], status: u16) -> ApiError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError {
            status_code: status,
            error_code: envelope.response.error.code,
            messages: envelope.response.error.messages,
        },
        Err(err) => {
            tracing::warn!(status, error = %err, "could not parse API error body");
            ApiError::new(status)
        }
    }
}

/// Decode a payload into the caller's shape
pub fn decode_into<T: DeserializeOwned>(payload: &Payload) -> Result<T, ClientError> {
    serde_json::from_str(payload.as_str()).map_err(|source| ClientError::PayloadDecode { source })
}
