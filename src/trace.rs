use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Our own stage logs at info, everything pulled in through reqwest and hyper
/// only when it warns.
pub const DEFAULT_FILTER: &str = "warn,rottening=info";

/// Builds the log filter from the `RUST_LOG` value, or [`DEFAULT_FILTER`] when
/// it is unset or blank.
pub fn filter_from(rust_log: Option<&str>) -> Result<EnvFilter, TracingInitError> {
    let directives = rust_log
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directives).map_err(|source| TracingInitError::InvalidFilter {
        directives: directives.to_string(),
        source,
    })
}

/// Installs the global subscriber writing compact lines to stderr, which keeps
/// the `-dry-run` report on stdout clean.
pub fn init() -> Result<(), TracingInitError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_from(rust_log.as_deref())?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("invalid log filter '{directives}' in RUST_LOG")]
    InvalidFilter {
        directives: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("a global tracing subscriber is already installed")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}
