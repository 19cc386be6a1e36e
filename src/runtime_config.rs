//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the watcher's runtime
//! behavior.
//!
//! ## Environment Variables
//!
//! ### `HASHROUTE_POLL_INTERVAL_MS`
//!
//! Interval of the polling fallback strategy, in milliseconds.
//!
//! Default: `100`
//!
//! Polling only runs on hosts that advertise no change-event capability, so
//! this knob has no effect on evented hosts. Shorter intervals reduce the
//! latency between a fragment write and its dispatch at the cost of more
//! wakeups.
//!
//! ### `HASHROUTE_MAX_REDIRECTS`
//!
//! Maximum nesting depth of a dispatch chain before it is cut off.
//!
//! Default: `8`
//!
//! A handler may itself navigate, and an unmatched hash may redirect to the
//! default route; both re-enter dispatch before the outer pass returns. The
//! depth cap keeps a mis-configured route set (for example two handlers that
//! navigate to each other) from recursing without bound.
//!
//! ## Usage
//!
//! ```rust
//! use hashroute::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("poll interval: {:?}", config.poll_interval);
//! ```

use std::env;
use std::time::Duration;

/// Default polling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default maximum dispatch nesting depth.
pub const DEFAULT_MAX_REDIRECT_DEPTH: usize = 8;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`]; the watcher
/// reads it once at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Interval between polling observations (default: 100 ms)
    pub poll_interval: Duration,
    /// Maximum nesting depth of redirect/navigation chains (default: 8)
    pub max_redirect_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_redirect_depth: DEFAULT_MAX_REDIRECT_DEPTH,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let poll_ms = match env::var("HASHROUTE_POLL_INTERVAL_MS") {
            Ok(val) => val.parse().unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            Err(_) => DEFAULT_POLL_INTERVAL_MS,
        };
        let max_redirect_depth = match env::var("HASHROUTE_MAX_REDIRECTS") {
            Ok(val) => val.parse().unwrap_or(DEFAULT_MAX_REDIRECT_DEPTH),
            Err(_) => DEFAULT_MAX_REDIRECT_DEPTH,
        };
        RuntimeConfig {
            poll_interval: Duration::from_millis(poll_ms),
            max_redirect_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env mutation is process-wide, so all from_env cases run in one test.
    #[test]
    fn test_from_env_defaults_and_overrides() {
        env::remove_var("HASHROUTE_POLL_INTERVAL_MS");
        env::remove_var("HASHROUTE_MAX_REDIRECTS");
        assert_eq!(RuntimeConfig::from_env(), RuntimeConfig::default());

        env::set_var("HASHROUTE_POLL_INTERVAL_MS", "25");
        env::set_var("HASHROUTE_MAX_REDIRECTS", "3");
        let config = RuntimeConfig::from_env();
        assert_eq!(config.poll_interval, Duration::from_millis(25));
        assert_eq!(config.max_redirect_depth, 3);

        env::set_var("HASHROUTE_POLL_INTERVAL_MS", "not a number");
        let config = RuntimeConfig::from_env();
        assert_eq!(
            config.poll_interval,
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        );

        env::remove_var("HASHROUTE_POLL_INTERVAL_MS");
        env::remove_var("HASHROUTE_MAX_REDIRECTS");
    }
}
