use std::rc::Rc;
use std::time::Instant;

use actix_web::http::header;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};
use futures::future::{LocalBoxFuture, Ready, ok};

use crate::metrics::Metrics;

/// Per-request wrapper: one structured log line plus counter and histogram
/// updates for every response, including error responses.
pub struct ObservabilityMiddleware {
    metrics: Metrics,
}

impl ObservabilityMiddleware {
    pub fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ObservabilityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ObservabilityMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ObservabilityMiddlewareService {
            service: Rc::new(service),
            metrics: self.metrics.clone(),
        })
    }
}

pub struct ObservabilityMiddlewareService<S> {
    service: Rc<S>,
    metrics: Metrics,
}

impl<S, B> Service<ServiceRequest> for ObservabilityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        let metrics = self.metrics.clone();

        let method = req.method().to_string();
        let path = req.path().to_string();
        let client_ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("-")
            .to_string();
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-")
            .to_string();

        Box::pin(async move {
            let start = Instant::now();
            let res = srv.call(req).await;
            let elapsed = start.elapsed();

            // An Err still renders as a response downstream; record the
            // status it will carry.
            let status = match &res {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };

            tracing::info!(
                status = status.as_u16(),
                latency = ?elapsed,
                client_ip = %client_ip,
                method = %method,
                path = %path,
                user_agent = %user_agent,
                "HTTP request"
            );
            metrics.record_request(&method, &path, status.as_u16(), elapsed.as_secs_f64());

            res
        })
    }
}
