use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;

use crate::common::api::ApiError;
use crate::metrics::Metrics;
use crate::middleware::ObservabilityMiddleware;
use crate::routes::{health_check, metrics_get, users_get, users_post};

pub fn run(listener: TcpListener, db_pool: PgPool, metrics: Metrics) -> std::io::Result<Server> {
    let db_pool = web::Data::new(db_pool);
    let metrics_handle = web::Data::new(metrics.clone());

    let server = HttpServer::new(move || {
        // Bodies the extractor rejects answer with the same generic message
        // as domain validation.
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            tracing::warn!(error = %err, "Rejected request body");
            ApiError::Validation("Invalid request body".into()).into()
        });

        App::new()
            .wrap(TracingLogger::default())
            .wrap(ObservabilityMiddleware::new(metrics.clone()))
            .app_data(db_pool.clone())
            .app_data(metrics_handle.clone())
            .app_data(json_config)
            .service(health_check)
            .service(metrics_get)
            .service(web::scope("/api").service(users_get).service(users_post))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
