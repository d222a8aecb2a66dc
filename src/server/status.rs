//! Response envelope shared by every endpoint

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Canned message for a status code, `None` for success.
pub fn code_to_message(code: StatusCode) -> Option<&'static str> {
    match code.as_u16() {
        400 => Some("Looks like you sent a request that this server could not understand."),
        401 | 403 => Some("Looks like you are not authorized to perform the specified request."),
        429 => Some("It appears that you are making too many requests, please wait a bit."),
        500 => Some("Looks like something went wrong on our end, please try again later."),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub timestamp: DateTime<Utc>,
    pub error_code: u16,
    pub error_message: Option<String>,
    pub elapsed: u64,
    pub credit_count: u32,
    pub notice: Option<String>,
}

impl Status {
    pub fn new(code: StatusCode, message: Option<String>, elapsed: Duration) -> Self {
        let success = code == StatusCode::OK;
        Self {
            timestamp: Utc::now(),
            error_code: if success { 0 } else { code.as_u16() },
            error_message: message,
            elapsed: elapsed.as_millis() as u64,
            credit_count: u32::from(success),
            notice: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T, elapsed: Duration) -> Self {
        Self {
            status: Status::new(StatusCode::OK, None, elapsed),
            data: Some(data),
        }
    }

    pub fn failure(code: StatusCode, message: Option<String>) -> Self {
        Self {
            status: Status::new(code, message, Duration::ZERO),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_status() {
        let envelope = Envelope::success(vec![1, 2], Duration::from_millis(12));
        assert_eq!(envelope.status.error_code, 0);
        assert_eq!(envelope.status.credit_count, 1);
        assert_eq!(envelope.status.elapsed, 12);
        assert_eq!(envelope.status.error_message, None);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["data"], json!([1, 2]));
        assert_eq!(value["status"]["notice"], serde_json::Value::Null);
    }

    #[test]
    fn test_failure_status_omits_data() {
        let envelope = Envelope::<()>::failure(
            StatusCode::TOO_MANY_REQUESTS,
            code_to_message(StatusCode::TOO_MANY_REQUESTS).map(str::to_string),
        );
        assert_eq!(envelope.status.error_code, 429);
        assert_eq!(envelope.status.credit_count, 0);

        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("data").is_none());
        assert_eq!(
            value["status"]["error_message"],
            json!("It appears that you are making too many requests, please wait a bit.")
        );
    }

    #[test]
    fn test_success_has_no_canned_message() {
        assert_eq!(code_to_message(StatusCode::OK), None);
        assert_eq!(
            code_to_message(StatusCode::FORBIDDEN),
            code_to_message(StatusCode::UNAUTHORIZED)
        );
    }
}
