pub mod builders;
pub mod fake_transport;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Tracing for tests, at `warn` like the probe itself unless `RUST_LOG` says
/// otherwise. Output goes through the test writer, so only failing tests
/// show it.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Bound for anything that waits on a child or a socket in tests.
pub const TEST_DEADLINE: std::time::Duration = std::time::Duration::from_secs(5);

/// Fails the test instead of hanging when a run or delivery never finishes.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    match tokio::time::timeout(TEST_DEADLINE, f).await {
        Ok(value) => value,
        Err(_) => panic!("no result within {TEST_DEADLINE:?}"),
    }
}

/// Command vector from string literals.
pub fn argv(parts: &[&str]) -> Vec<std::ffi::OsString> {
    parts.iter().map(std::ffi::OsString::from).collect()
}
