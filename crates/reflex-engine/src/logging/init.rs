use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "reflex_engine=debug,warn"). When unset, `RUST_LOG` is consulted, then
/// `info` is used.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix records with a millisecond timestamp.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto, timestamps: true }
    }
}

impl LoggingConfig {
    /// Debug output for this crate, info for everything else.
    pub fn verbose() -> Self {
        Self {
            env_filter: Some("reflex_engine=debug,info".to_string()),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

impl LoggingConfig {
    /// Filter string in effect: explicit, then `RUST_LOG`, then "info".
    fn resolved_filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string())
    }
}

static LOGGER: Once = Once::new();

/// Installs `env_logger` as the global logger; only the first call counts.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let filter = config.resolved_filter();
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style);
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }

        // A logger installed elsewhere (e.g. by a test harness) wins.
        match builder.try_init() {
            Ok(()) => log::debug!("logger installed with filter '{filter}'"),
            Err(_) => log::debug!("global logger already set"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig::default().with_filter("warn");
        assert_eq!(config.resolved_filter(), "warn");
    }

    #[test]
    fn verbose_targets_this_crate() {
        assert_eq!(
            LoggingConfig::verbose().env_filter.as_deref(),
            Some("reflex_engine=debug,info")
        );
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::verbose());
    }
}
