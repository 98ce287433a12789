use std::fmt::Display;
use thiserror::Error;

/// Uniform failure for every gateway call.
///
/// `status_code` is `None` when no usable response came back (connection
/// failure, undecodable body) and the HTTP status otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
    pub status_code: Option<u16>,
}

impl RemoteError {
    pub fn transport(err: impl Display) -> Self {
        Self {
            message: format!("Error: {}", err),
            status_code: None,
        }
    }

    /// Build from a non-success response. A JSON body with a `message`
    /// field contributes that field; any other body is used as-is.
    pub fn server(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        let message = if detail.is_empty() {
            format!("Error Code: {}", status)
        } else {
            format!("Error Code: {} - {}", status, detail)
        };
        Self {
            message,
            status_code: Some(status),
        }
    }

    pub fn is_transport(&self) -> bool {
        self.status_code.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_has_no_status() {
        let err = RemoteError::transport("connection refused");
        assert_eq!(err.message, "Error: connection refused");
        assert!(err.is_transport());
    }

    #[test]
    fn test_server_error_prefers_json_message() {
        let err = RemoteError::server(404, r#"{"success":false,"message":"Movie not found with id : '7'"}"#);
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.message, "Error Code: 404 - Movie not found with id : '7'");
    }

    #[test]
    fn test_server_error_falls_back_to_raw_body() {
        let err = RemoteError::server(502, "Bad Gateway\n");
        assert_eq!(err.message, "Error Code: 502 - Bad Gateway");
        assert_eq!(RemoteError::server(500, "").message, "Error Code: 500");
    }
}
