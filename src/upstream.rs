use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::waitlist::ForwardBody;

/// Transport-level reply from the webhook, body kept as text because the
/// script is free to answer with plain text instead of JSON.
#[derive(Debug, Clone)]
pub struct ScriptReply {
    pub success: bool,
    pub body: String,
}

/// Seam between the relay logic and the Apps Script webhook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScriptClient: Send + Sync {
    async fn post_signup(
        &self,
        script_url: &str,
        email: &str,
        source: &str,
    ) -> Result<ScriptReply>;
}

pub struct HttpScriptClient {
    client: reqwest::Client,
}

impl HttpScriptClient {
    pub fn new() -> Self {
        HttpScriptClient {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpScriptClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptClient for HttpScriptClient {
    /// One uncached POST, no retry, platform-default timeout.
    async fn post_signup(
        &self,
        script_url: &str,
        email: &str,
        source: &str,
    ) -> Result<ScriptReply> {
        let response = self
            .client
            .post(script_url)
            .header("Cache-Control", "no-store")
            .json(&ForwardBody { email, source })
            .send()
            .await
            .context("Google Script request did not complete")?;

        let success = response.status().is_success();
        let body = response
            .text()
            .await
            .context("Failed to read Google Script response body")?;

        Ok(ScriptReply { success, body })
    }
}
