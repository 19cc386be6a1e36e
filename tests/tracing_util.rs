use tracing_subscriber::EnvFilter;

/// Thread-local tracing subscriber for one test.
///
/// Honors `RUST_LOG` when set and defaults to `hashroute=debug` otherwise;
/// output goes through the test writer so it stays attached to the owning
/// test. Dropping the guard uninstalls the subscriber.
pub struct TestTracing {
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("hashroute=debug"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        Self { _guard: guard }
    }
}
