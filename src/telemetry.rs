use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Build the subscriber: compact output locally, bunyan JSON in production.
///
/// `RUST_LOG` takes precedence over the configured verbosity when set.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> Box<dyn Subscriber + Send + Sync>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    #[cfg(debug_assertions)]
    let mut is_local = true;
    #[cfg(not(debug_assertions))]
    let mut is_local = false;

    // APP_ENV=local forces the compact format in release builds too.
    if let Ok(env) = std::env::var("APP_ENV") {
        if env.to_lowercase() == "local" {
            is_local = true;
        }
    }

    if is_local {
        let formatting_layer = fmt::layer().with_writer(sink).with_target(true).compact();
        Box::new(Registry::default().with(env_filter).with(formatting_layer))
    } else {
        let formatting_layer = BunyanFormattingLayer::new(name, sink);
        Box::new(
            Registry::default()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(formatting_layer),
        )
    }
}

/// Install the subscriber as the global default.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync + 'static) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
