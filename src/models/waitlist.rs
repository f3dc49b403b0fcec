use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Label attached to signups that arrive without one.
pub const DEFAULT_SOURCE: &str = "website";

/// One signup submission. Lives for the duration of a single request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SignupRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SignupRequest {
    /// Lenient construction from an arbitrary JSON body. Scalars in the
    /// `email` slot are coerced to text so they reach the validator instead
    /// of failing deserialization with an unformatted error.
    pub fn from_value(body: &Value) -> Self {
        SignupRequest {
            email: coerce_string(body.get("email")),
            source: body
                .get("source")
                .map(coerce_string_value)
                .filter(|source| !source.is_empty()),
        }
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    value.map(coerce_string_value).unwrap_or_default()
}

fn coerce_string_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Body of the outbound POST to the Apps Script webhook.
#[derive(Serialize)]
pub struct ForwardBody<'a> {
    pub email: &'a str,
    pub source: &'a str,
}

/// Whatever the webhook answered. The script does not guarantee a JSON
/// content type, so a body that fails to parse is carried as raw text
/// instead of being dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamPayload {
    Structured(Value),
    Raw(String),
}

impl UpstreamPayload {
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => UpstreamPayload::Structured(value),
            Err(_) => UpstreamPayload::Raw(text.to_string()),
        }
    }

    /// The webhook's own `ok` field, when it reports one.
    pub fn ok_flag(&self) -> Option<bool> {
        match self {
            UpstreamPayload::Structured(value) => value.get("ok").and_then(Value::as_bool),
            UpstreamPayload::Raw(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UpstreamPayload::Structured(value) => value.get("error").and_then(Value::as_str),
            UpstreamPayload::Raw(_) => None,
        }
    }
}

impl Serialize for UpstreamPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UpstreamPayload::Structured(value) => value.serialize(serializer),
            UpstreamPayload::Raw(text) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("raw", text)?;
                map.end()
            }
        }
    }
}

/// The uniform envelope every caller gets back, whatever went wrong.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<UpstreamPayload>,
}

impl RelayResponse {
    pub fn accepted(google: UpstreamPayload) -> Self {
        RelayResponse {
            ok: true,
            error: None,
            google: Some(google),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        RelayResponse {
            ok: false,
            error: Some(message.into()),
            google: None,
        }
    }

    pub fn upstream_error(message: impl Into<String>, google: UpstreamPayload) -> Self {
        RelayResponse {
            ok: false,
            error: Some(message.into()),
            google: Some(google),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signup_request_coerces_scalar_email() {
        let request = SignupRequest::from_value(&json!({ "email": 42 }));
        assert_eq!(request.email, "42");
        assert_eq!(request.source, None);
    }

    #[test]
    fn signup_request_treats_empty_source_as_absent() {
        let request = SignupRequest::from_value(&json!({ "email": "a@b.co", "source": "" }));
        assert_eq!(request.source, None);

        let request = SignupRequest::from_value(&json!({ "email": "a@b.co", "source": "ads" }));
        assert_eq!(request.source.as_deref(), Some("ads"));
    }

    #[test]
    fn signup_request_tolerates_missing_fields() {
        let request = SignupRequest::from_value(&json!({}));
        assert_eq!(request.email, "");
        assert_eq!(request.source, None);
    }

    #[test]
    fn upstream_payload_parses_json_bodies() {
        let payload = UpstreamPayload::from_text(r#"{"ok":true,"id":42}"#);
        assert_eq!(
            payload,
            UpstreamPayload::Structured(json!({ "ok": true, "id": 42 }))
        );
        assert_eq!(payload.ok_flag(), Some(true));
    }

    #[test]
    fn upstream_payload_keeps_non_json_as_raw() {
        let payload = UpstreamPayload::from_text("Service Unavailable");
        assert_eq!(payload, UpstreamPayload::Raw("Service Unavailable".into()));
        assert_eq!(payload.ok_flag(), None);
        assert_eq!(payload.error_message(), None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "raw": "Service Unavailable" })
        );
    }

    #[test]
    fn upstream_payload_reports_error_message() {
        let payload = UpstreamPayload::from_text(r#"{"ok":false,"error":"duplicate"}"#);
        assert_eq!(payload.ok_flag(), Some(false));
        assert_eq!(payload.error_message(), Some("duplicate"));
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let body = serde_json::to_value(RelayResponse::error("Invalid email")).unwrap();
        assert_eq!(body, json!({ "ok": false, "error": "Invalid email" }));

        let body = serde_json::to_value(RelayResponse::accepted(UpstreamPayload::Structured(
            json!({ "ok": true }),
        )))
        .unwrap();
        assert_eq!(body, json!({ "ok": true, "google": { "ok": true } }));
    }

    #[test]
    fn forward_body_shape_matches_script_contract() {
        let body = serde_json::to_value(ForwardBody {
            email: "user@example.com",
            source: "website",
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "email": "user@example.com", "source": "website" })
        );
    }
}
