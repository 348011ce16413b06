use std::{fmt, io, str::FromStr};

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset: request traces plus catalog load/reload detail.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,service::catalog=debug";

/// Output shape of the stdout subscriber, as named by `server.log_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => f.write_str("compact"),
            Self::Json => f.write_str("json"),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global stdout subscriber. Later calls are no-ops.
pub fn init_logging(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Like `init_logging`, taking the format by name. Unknown names log compact.
pub fn init_logging_named(name: &str) {
    match name.parse::<LogFormat>() {
        Ok(format) => init_logging(format),
        Err(e) => {
            init_logging(LogFormat::Compact);
            tracing::warn!(error = %e, "falling back to compact logs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!("compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default().to_string(), "compact");
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging_named("json");
        init_logging(LogFormat::Compact);
        init_logging_named("bogus");
    }
}
