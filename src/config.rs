use std::env;

/// Env var holding the Google Apps Script webhook URL signups are relayed to.
pub const WEBHOOK_URL_VAR: &str = "GOOGLE_WAITLIST_URL";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Destination for relayed signups. `None` is a deployment problem the
    /// endpoint reports per request, not a startup crash.
    pub webhook_url: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            webhook_url: env::var(WEBHOOK_URL_VAR).ok().filter(|url| !url.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
        }
    }
}
