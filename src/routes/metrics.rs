use actix_web::{HttpResponse, get, web};

use crate::metrics::Metrics;

/// Pull-based exposition of the process metrics.
#[get("/metrics")]
pub async fn metrics_get(metrics: web::Data<Metrics>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(metrics.render())
}
