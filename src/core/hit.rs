//! Hit record and inbound payload validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recorded pageview. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub url: String,
    pub referrer: String,
    pub user_agent: String,
    pub timestamp: String,
}

impl Hit {
    /// Validate a freeform JSON payload into a typed hit.
    ///
    /// Checks run in order and the first failure wins; the error names the
    /// offending field. `referrer` may be empty but must be a string. Extra
    /// payload fields are ignored.
    pub fn from_payload(payload: &Value) -> Result<Hit, &'static str> {
        let url = match payload.get("url").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => s,
            _ => return Err("invalid or missing url"),
        };

        let referrer = match payload.get("referrer").and_then(Value::as_str) {
            Some(s) => s,
            None => return Err("invalid referrer"),
        };

        let user_agent = match payload.get("userAgent").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => s,
            _ => return Err("invalid or missing userAgent"),
        };

        let timestamp = match payload.get("timestamp").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => s,
            _ => return Err("invalid or missing timestamp"),
        };

        Ok(Hit {
            url: url.to_string(),
            referrer: referrer.to_string(),
            user_agent: user_agent.to_string(),
            timestamp: timestamp.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "url": "https://example.com/a",
            "referrer": "https://google.com",
            "userAgent": "Mozilla/5.0 Chrome/99",
            "timestamp": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn accepts_valid_payload_verbatim() {
        let hit = Hit::from_payload(&valid_payload()).unwrap();
        assert_eq!(hit.url, "https://example.com/a");
        assert_eq!(hit.referrer, "https://google.com");
        assert_eq!(hit.user_agent, "Mozilla/5.0 Chrome/99");
        assert_eq!(hit.timestamp, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn accepts_empty_referrer() {
        let mut payload = valid_payload();
        payload["referrer"] = json!("");
        let hit = Hit::from_payload(&payload).unwrap();
        assert_eq!(hit.referrer, "");
    }

    #[test]
    fn ignores_extra_fields() {
        let mut payload = valid_payload();
        payload["screen"] = json!("1920x1080");
        assert!(Hit::from_payload(&payload).is_ok());
    }

    #[test]
    fn rejects_missing_url() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("url");
        assert_eq!(Hit::from_payload(&payload), Err("invalid or missing url"));
    }

    #[test]
    fn rejects_empty_url() {
        let mut payload = valid_payload();
        payload["url"] = json!("");
        assert_eq!(Hit::from_payload(&payload), Err("invalid or missing url"));
    }

    #[test]
    fn rejects_non_string_url() {
        let mut payload = valid_payload();
        payload["url"] = json!(42);
        assert_eq!(Hit::from_payload(&payload), Err("invalid or missing url"));
    }

    #[test]
    fn rejects_missing_referrer() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("referrer");
        assert_eq!(Hit::from_payload(&payload), Err("invalid referrer"));
    }

    #[test]
    fn rejects_empty_user_agent() {
        let mut payload = valid_payload();
        payload["userAgent"] = json!("");
        assert_eq!(
            Hit::from_payload(&payload),
            Err("invalid or missing userAgent")
        );
    }

    #[test]
    fn rejects_missing_timestamp() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("timestamp");
        assert_eq!(
            Hit::from_payload(&payload),
            Err("invalid or missing timestamp")
        );
    }

    #[test]
    fn first_failure_wins() {
        // Both url and timestamp are bad; url is checked first.
        let payload = json!({ "referrer": "", "userAgent": "ua" });
        assert_eq!(Hit::from_payload(&payload), Err("invalid or missing url"));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let hit = Hit::from_payload(&valid_payload()).unwrap();
        let line = serde_json::to_string(&hit).unwrap();
        assert!(line.contains("\"userAgent\""));
        assert!(!line.contains("\"user_agent\""));
    }
}
