//! Logging and error tracking bootstrap.
//!
//! Sentry must be initialized before the tracing subscriber so the Sentry
//! layer has a client to report to.

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConsoleConfig, LogFormat};

const DEFAULT_FILTER: &str = "atrium_console=info";

/// Keeps error tracking alive. Drop it on shutdown to flush pending events.
pub struct Telemetry {
    sentry: Option<sentry::ClientInitGuard>,
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("sentry_enabled", &self.sentry_enabled())
            .finish()
    }
}

impl Telemetry {
    /// Whether a Sentry client is active.
    #[must_use]
    pub const fn sentry_enabled(&self) -> bool {
        self.sentry.is_some()
    }
}

/// Initialize Sentry (when a DSN is configured) and the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this twice keeps the
/// first subscriber.
#[must_use = "dropping the guard stops error reporting"]
pub fn init(config: &ConsoleConfig) -> Telemetry {
    let sentry = init_sentry(config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let json = config.log_format == LogFormat::Json;
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    Telemetry { sentry }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ConsoleConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_init_without_dsn_skips_sentry() {
        let config = ConsoleConfig::with_api(ApiConfig::new("http://localhost:8080/").unwrap());
        let telemetry = init(&config);
        assert!(!telemetry.sentry_enabled());

        // A second call must not panic.
        let again = init(&config);
        assert!(!again.sentry_enabled());
    }
}
