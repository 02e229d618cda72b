use actix_web::HttpResponse;

pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("I am server")
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
