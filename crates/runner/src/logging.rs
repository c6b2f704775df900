//! Logging bootstrap for hosts

use env_logger::{Builder, Env};

/// Install the `env_logger` backend
///
/// Uses `filter` when given, `RUST_LOG` otherwise (defaulting to `info`).
/// Returns false if a logger was already installed.
pub fn init_logging(filter: Option<&str>) -> bool {
    let mut builder = match filter {
        Some(filter) => {
            let mut builder = Builder::new();
            builder.parse_filters(filter);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("info")),
    };

    builder.format_timestamp_millis().try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_logging(Some("debug"));
        assert!(!init_logging(None));
    }
}
