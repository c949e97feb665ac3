//! Logging setup built on `tracing-subscriber`.
//!
//! Set `PRODUCT_ASSISTANT_LOG` to any `EnvFilter` directive to override the
//! level chosen in code, e.g. `PRODUCT_ASSISTANT_LOG=product_assistant=debug`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "PRODUCT_ASSISTANT_LOG";

/// Log levels, mapping onto the tracing hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Lowercase name as written in an `EnvFilter` directive.
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Default directive: this crate at `self`, HTTP internals at warn.
    fn directive(self) -> String {
        format!(
            "product_assistant={},tower_http=warn,hyper=warn,reqwest=warn",
            self.as_directive()
        )
    }
}

/// Initialize logging at `level`, unless `PRODUCT_ASSISTANT_LOG` says otherwise.
///
/// Later calls are no-ops; the first subscriber stays installed.
///
/// ```no_run
/// use product_assistant::logging::{LogLevel, init_logging};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("Application starting");
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.directive()));

    if install(env_filter) {
        tracing::info!("Logging initialized at level: {:?}", level);
    }
}

/// Initialize logging with a custom `EnvFilter` directive string.
///
/// An invalid directive falls back to info for this crate.
pub fn init_logging_with_filter(filter: &str) {
    let (env_filter, valid) = match EnvFilter::try_new(filter) {
        Ok(f) => (f, true),
        Err(_) => (EnvFilter::new(LogLevel::Info.directive()), false),
    };

    if install(env_filter) {
        if valid {
            tracing::info!("Logging initialized with custom filter: {}", filter);
        } else {
            tracing::warn!("Invalid filter string: {}, using default (info)", filter);
        }
    }
}

fn install(env_filter: EnvFilter) -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
        .is_ok()
}
