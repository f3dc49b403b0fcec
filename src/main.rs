use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use dotenv::dotenv;

use waitlist_backend::config::{AppConfig, WEBHOOK_URL_VAR};
use waitlist_backend::routes;
use waitlist_backend::upstream::{HttpScriptClient, ScriptClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let config = AppConfig::from_env();
    if config.webhook_url.is_none() {
        // Not fatal at startup; the endpoint reports it per request.
        tracing::warn!("{} is not set, signups will be rejected", WEBHOOK_URL_VAR);
    }

    let script: Arc<dyn ScriptClient> = Arc::new(HttpScriptClient::new());
    let port = config.port;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::from(script.clone()))
            .configure(routes::init)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
