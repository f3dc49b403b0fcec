use actix_web::{HttpResponse, Responder, post, web};
use serde_json::Value;

use crate::config::{AppConfig, WEBHOOK_URL_VAR};
use crate::handlers::waitlist::{RelayOutcome, relay_signup};
use crate::models::waitlist::{RelayResponse, SignupRequest};
use crate::upstream::ScriptClient;

#[post("/waitlist")]
async fn waitlist(
    body: web::Bytes,
    config: web::Data<AppConfig>,
    script: web::Data<dyn ScriptClient>,
) -> impl Responder {
    let request = match serde_json::from_slice::<Value>(&body) {
        Ok(value) => SignupRequest::from_value(&value),
        Err(e) => {
            return HttpResponse::InternalServerError().json(RelayResponse::error(e.to_string()));
        }
    };

    match relay_signup(script.as_ref(), &config, &request).await {
        RelayOutcome::Accepted { google } => HttpResponse::Ok().json(RelayResponse::accepted(google)),
        RelayOutcome::InvalidEmail => {
            HttpResponse::BadRequest().json(RelayResponse::error("Invalid email"))
        }
        RelayOutcome::MissingConfig => HttpResponse::InternalServerError().json(
            RelayResponse::error(format!("Missing {} in environment", WEBHOOK_URL_VAR)),
        ),
        RelayOutcome::UpstreamFailed { error, google } => {
            HttpResponse::BadGateway().json(RelayResponse::upstream_error(error, google))
        }
        RelayOutcome::Internal { error } => {
            HttpResponse::InternalServerError().json(RelayResponse::error(error))
        }
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(waitlist);
}
