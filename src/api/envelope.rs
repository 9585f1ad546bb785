//! Response envelope used by every backend endpoint.
//!
//! The backend wraps each payload as `{ "success": bool, "message": string?,
//! "data": T? }`. A false `success` flag is surfaced as
//! [`ApiError::Rejected`] carrying the backend message so callers can decide
//! whether it means "not found" or a real failure.

use serde::Deserialize;

use crate::api::errors::{ApiError, ApiResult};

const DEFAULT_REJECTION: &str = "The request was rejected by the server";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    fn rejection(self) -> ApiError {
        ApiError::Rejected(
            self.message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
        )
    }

    /// Unwraps a payload that must be present on success.
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(self.rejection());
        }
        self.data
            .ok_or_else(|| ApiError::Decode("missing data field".to_string()))
    }

    /// Unwraps a payload that may legitimately be absent on success.
    pub fn into_optional_data(self) -> ApiResult<Option<T>> {
        if !self.success {
            return Err(self.rejection());
        }
        Ok(self.data)
    }

    /// Checks the flag only, for endpoints that return no payload.
    pub fn into_unit(self) -> ApiResult<()> {
        if !self.success {
            return Err(self.rejection());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_data_unwraps() {
        let envelope: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), 7);
    }

    #[test]
    fn success_without_data_is_decode_error() {
        let envelope: ApiEnvelope<i32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(envelope.into_data(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn failure_carries_backend_message() {
        let envelope: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": false, "message": "No member found"}"#).unwrap();
        match envelope.into_data() {
            Err(ApiError::Rejected(message)) => assert_eq!(message, "No member found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let envelope: ApiEnvelope<i32> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        match envelope.into_unit() {
            Err(ApiError::Rejected(message)) => assert_eq!(message, DEFAULT_REJECTION),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn optional_data_passes_through_null() {
        let envelope: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert_eq!(envelope.into_optional_data().unwrap(), None);
    }
}
