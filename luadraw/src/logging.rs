use std::sync::Once;

/// Used when neither the caller nor `RUST_LOG` picks a filter: this
/// program's crates at info, dependencies (SDL glue, mlua) only on warnings.
pub const DEFAULT_FILTER: &str = "warn,luadraw=info,backend=info,scripting=info";

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, overriding `RUST_LOG`.
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// Explicit filter first, then `rust_log`, then [`DEFAULT_FILTER`].
    /// Blank values count as unset.
    fn resolve_filter(&self, rust_log: Option<&str>) -> String {
        [self.filter.as_deref(), rust_log]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string()
    }
}

static INIT: Once = Once::new();

/// Installs the stderr logger once; repeated calls do nothing.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = config.resolve_filter(rust_log.as_deref());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .format_timestamp_millis()
            .init();

        log::debug!("logging with filter \"{filter}\"");
    });
}
