//! Logging setup shared by both binaries: a stdout fmt subscriber filtered
//! by `RUST_LOG`, defaulting to info.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber. Subsequent calls are no-ops.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
