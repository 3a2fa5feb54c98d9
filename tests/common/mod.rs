use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a warn-level subscriber once per test binary, so skipped rows and solver
/// warnings show up in failing test output.
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("alliance_rating=warn"))
            .with_test_writer()
            .try_init();
    });
}
