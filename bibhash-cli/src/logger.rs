//! One-shot logger setup

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Initialize `env_logger` once; later calls are no-ops.
///
/// Defaults to `warn` so the interactive menu stays clean; `RUST_LOG`
/// overrides as usual.
pub fn init_logger() {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Warn)
            .format_timestamp_millis()
            .parse_default_env();
        // Avoid panicking if a logger was already installed elsewhere
        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use log::info;

    use super::*;

    #[test]
    fn test_init_logger_is_idempotent() {
        init_logger();
        init_logger();
        info!("logger initialized twice without panicking");
    }
}
