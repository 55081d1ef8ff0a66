//! The fully read response value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// A response body read to completion, plus its status code.
///
/// Holds no reference to the transport that produced it. The status code is
/// stored as received; no range check is made and no status counts as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BytesResponse {
    pub body: Vec<u8>,
    pub status_code: u16,
}

impl BytesResponse {
    pub fn new(body: impl Into<Vec<u8>>, status_code: u16) -> Self {
        Self {
            body: body.into(),
            status_code,
        }
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<String, ResponseError> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ResponseError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
