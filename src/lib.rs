pub mod configuration;
pub mod routes;
pub mod startup;

pub mod common;
pub mod dao;
pub mod domain;
pub mod metrics;
pub mod middleware;
pub mod telemetry;
