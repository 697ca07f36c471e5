use std::net::TcpListener;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use web_app::configuration::get_configuration;
use web_app::dao::ensure_schema;
use web_app::metrics::Metrics;
use web_app::startup::run;
use web_app::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let configuration = get_configuration().context("Failed to read configuration")?;

    let subscriber = get_subscriber(
        "web-app".into(),
        configuration.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    // Connect eagerly: the process must not serve traffic it cannot back.
    let connection_pool = PgPoolOptions::new()
        .connect_with(configuration.database.connect_options())
        .await
        .context("Failed to connect to Postgres")?;

    ensure_schema(&connection_pool)
        .await
        .context("Failed to initialise the database schema")?;
    tracing::info!("Database initialised successfully");

    let metrics = Metrics::new().context("Failed to build the metrics registry")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind to {address}"))?;
    tracing::info!(%address, "Server starting");

    run(listener, connection_pool, metrics)?.await?;
    Ok(())
}
