//! Logging and tracing initialization.
//!
//! Logs go to stderr; stdout is reserved for the render commentary.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directive used when `RUST_LOG` is not set.
///
/// `verbose` forces `debug` regardless of the configured level.
pub fn default_directive(config: &LoggingConfig, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else {
        &config.level
    }
}

/// Install the global subscriber. Calling it twice keeps the first one.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let directive = default_directive(config, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.with_target(true).finish())
    };

    if installed.is_ok() {
        tracing::debug!(directive, json = config.json, "Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_configured_level() {
        let config = LoggingConfig {
            level: "nnanim_batch=info,warn".to_string(),
            json: false,
        };
        assert_eq!(default_directive(&config, false), "nnanim_batch=info,warn");
        assert_eq!(default_directive(&config, true), "debug");
    }
}
