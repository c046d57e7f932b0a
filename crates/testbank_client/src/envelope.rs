//! The `{ success, data, error }` wrapper around every backend response.

use serde::Deserialize;

use crate::ClientError;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> Envelope<T> {
    /// Returns `data`, failing when the backend left it out.
    pub fn into_data(self) -> Result<T, ClientError> {
        self.data
            .ok_or_else(|| ClientError::invalid_response("response has no data"))
    }
}

/// Body of a failed response. Only the message is used.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extracts the error message from a raw body, if it has one.
    pub fn message(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
    }
}
