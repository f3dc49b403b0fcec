use actix_web::{HttpResponse, Responder, get, web};

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping);
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    #[actix_web::test]
    async fn ping_answers_pong() {
        let app =
            test::init_service(App::new().service(web::scope("/health").configure(super::init)))
                .await;

        let request = test::TestRequest::get().uri("/health/ping").to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body = test::read_body(response).await;
        assert_eq!(body, "pong");
    }
}
