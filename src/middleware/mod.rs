mod observability_middleware;

pub use observability_middleware::*;
