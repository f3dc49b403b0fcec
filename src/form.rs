//! Signup form state machine, the client half of the waitlist flow.
//!
//! Runs the same validator as the relay endpoint before anything goes over
//! the wire, so locally rejected input never costs a round trip. Status is
//! an enum rather than a pile of flags; `loading` and `success` at the same
//! time cannot be expressed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::models::waitlist::SignupRequest;
use crate::validation::{is_valid_email, normalize_email};

/// Source label the landing page form stamps on its submissions.
pub const FORM_SOURCE: &str = "landing-page";

const INVALID_EMAIL_MSG: &str = "Enter a valid email.";
const REQUEST_FAILED_MSG: &str = "Something failed. Try again.";
const REJECTED_MSG: &str = "Could not add you to the list. Try again.";
const NETWORK_ERROR_MSG: &str = "Network error. Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

/// What the relay endpoint answered: transport-level success plus whatever
/// body came back. The body stays loose, the form only peeks at a few
/// fields.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub ok: bool,
    pub body: Value,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn submit(&self, request: &SignupRequest) -> Result<TransportReply>;
}

/// Posts signups to the relay endpoint over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn submit(&self, request: &SignupRequest) -> Result<TransportReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .context("Failed to reach the waitlist endpoint")?;

        let ok = response.status().is_success();
        // An unparseable body is not fatal here; status alone decides.
        let body = response
            .json::<Value>()
            .await
            .unwrap_or_else(|_| Value::Object(Default::default()));

        Ok(TransportReply { ok, body })
    }
}

pub struct WaitlistForm {
    email: String,
    status: Status,
    error_message: Option<String>,
}

impl Default for WaitlistForm {
    fn default() -> Self {
        Self::new()
    }
}

impl WaitlistForm {
    pub fn new() -> Self {
        WaitlistForm {
            email: String::new(),
            status: Status::Idle,
            error_message: None,
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Locked while a request is in flight, and permanently once the signup
    /// went through; success is terminal for the session.
    pub fn is_submit_disabled(&self) -> bool {
        matches!(self.status, Status::Loading | Status::Success)
    }

    /// Validate the current input and move to `Loading`. Returns the request
    /// to send, or `None` when nothing should go over the wire.
    pub fn begin_submit(&mut self) -> Option<SignupRequest> {
        if self.is_submit_disabled() {
            return None;
        }

        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            self.fail(INVALID_EMAIL_MSG.to_string());
            return None;
        }

        self.status = Status::Loading;
        self.error_message = None;
        Some(SignupRequest {
            email,
            source: Some(FORM_SOURCE.to_string()),
        })
    }

    /// Apply the reply, or the transport failure, as the terminal
    /// transition of one submission.
    pub fn complete(&mut self, outcome: Result<TransportReply>) {
        let reply = match outcome {
            Ok(reply) => reply,
            Err(_) => return self.fail(NETWORK_ERROR_MSG.to_string()),
        };

        if !reply.ok {
            let message = reply
                .body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(REQUEST_FAILED_MSG);
            return self.fail(message.to_string());
        }

        // A payload without a `google.ok` field counts as success; the
        // script is not obliged to report one.
        let google = reply.body.get("google").unwrap_or(&Value::Null);
        if google.get("ok").and_then(Value::as_bool) == Some(false) {
            let message = google
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(REJECTED_MSG);
            return self.fail(message.to_string());
        }

        self.status = Status::Success;
        self.error_message = None;
        self.email.clear();
    }

    /// Full submission round trip over the given transport.
    pub async fn submit<T: SubmitTransport + ?Sized>(&mut self, transport: &T) {
        let Some(request) = self.begin_submit() else {
            return;
        };
        let outcome = transport.submit(&request).await;
        self.complete(outcome);
    }

    fn fail(&mut self, message: String) {
        self.status = Status::Error;
        self.error_message = Some(message);
    }
}
