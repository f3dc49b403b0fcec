use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::{AppConfig, WEBHOOK_URL_VAR};
use crate::models::waitlist::{DEFAULT_SOURCE, SignupRequest, UpstreamPayload};
use crate::upstream::{ScriptClient, ScriptReply};
use crate::validation::{is_valid_email, normalize_email};

/// Every way a relay attempt can end. The route layer maps these onto
/// status codes and the response envelope.
#[derive(Debug)]
pub enum RelayOutcome {
    Accepted { google: UpstreamPayload },
    InvalidEmail,
    MissingConfig,
    UpstreamFailed { error: String, google: UpstreamPayload },
    Internal { error: String },
}

/// Validate, forward, interpret. At most one outbound call; none at all
/// when the email is rejected or the webhook URL is missing.
pub async fn relay_signup(
    script: &dyn ScriptClient,
    config: &AppConfig,
    request: &SignupRequest,
) -> RelayOutcome {
    let email = normalize_email(&request.email);
    if !is_valid_email(&email) {
        return RelayOutcome::InvalidEmail;
    }

    let Some(script_url) = config.webhook_url.as_deref() else {
        error!("{} is not set, dropping signup", WEBHOOK_URL_VAR);
        return RelayOutcome::MissingConfig;
    };

    let source = request.source.as_deref().unwrap_or(DEFAULT_SOURCE);
    match forward(script, script_url, &email, source).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Waitlist relay failed for {}: {:?}", email, e);
            let message = e.to_string();
            RelayOutcome::Internal {
                error: if message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    message
                },
            }
        }
    }
}

async fn forward(
    script: &dyn ScriptClient,
    script_url: &str,
    email: &str,
    source: &str,
) -> Result<RelayOutcome> {
    let reply = script.post_signup(script_url, email, source).await?;
    Ok(interpret(email, reply))
}

/// A non-2xx status and an explicit `ok:false` in the body are the same
/// failure as far as the caller is concerned; both keep the upstream
/// payload attached for diagnostics.
fn interpret(email: &str, reply: ScriptReply) -> RelayOutcome {
    let google = UpstreamPayload::from_text(&reply.body);

    if !reply.success {
        warn!("Google Script returned a failure status for {}", email);
        return RelayOutcome::UpstreamFailed {
            error: "Google Script request failed".to_string(),
            google,
        };
    }

    if google.ok_flag() == Some(false) {
        let error = google
            .error_message()
            .unwrap_or("Google Script rejected request")
            .to_string();
        warn!("Google Script rejected {}: {}", email, error);
        return RelayOutcome::UpstreamFailed { error, google };
    }

    info!("Waitlist signup forwarded for {}", email);
    RelayOutcome::Accepted { google }
}
