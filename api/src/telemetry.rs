//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use pv_shared::{LogFormat, LoggingConfig};

/// Build the filter directive for a configured level
///
/// A bare level quiets sqlx statement logging; a full directive is used
/// as given.
pub fn filter_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("{},sqlx=warn", level)
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Also routes `log`
/// records (actix's request logger) into tracing.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing subscriber already installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("info"), "info,sqlx=warn");
        assert_eq!(filter_directive("pv_core=debug"), "pv_core=debug");
        assert_eq!(filter_directive("warn,pv_api=info"), "warn,pv_api=info");
    }
}
