//! Change-detection strategy selection.

use crate::watcher::host::HostCapabilities;
use std::time::Duration;

/// The mechanism used to detect fragment changes.
///
/// Chosen once, at watcher install time, from the host's advertised
/// capabilities; there is no re-selection afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStrategy {
    /// Native fragment-change notification (preferred).
    NativeEvent,
    /// Legacy event-subscription mechanism.
    LegacyEvent,
    /// Fixed-interval polling: compare the current fragment to the last
    /// observed value on every tick.
    Polling(Duration),
}

impl ChangeStrategy {
    /// Pick the first supported strategy, in preference order: native
    /// event, legacy event, polling.
    #[must_use]
    pub fn select(capabilities: HostCapabilities, poll_interval: Duration) -> Self {
        if capabilities.native_events {
            ChangeStrategy::NativeEvent
        } else if capabilities.legacy_events {
            ChangeStrategy::LegacyEvent
        } else {
            ChangeStrategy::Polling(poll_interval)
        }
    }

    /// Whether changes are delivered by host callbacks (native or legacy)
    /// rather than observed by polling.
    #[must_use]
    pub fn is_evented(&self) -> bool {
        !matches!(self, ChangeStrategy::Polling(_))
    }

    /// Strategy name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ChangeStrategy::NativeEvent => "native_event",
            ChangeStrategy::LegacyEvent => "legacy_event",
            ChangeStrategy::Polling(_) => "polling",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_native_preferred_over_legacy() {
        let caps = HostCapabilities {
            native_events: true,
            legacy_events: true,
        };
        assert_eq!(
            ChangeStrategy::select(caps, INTERVAL),
            ChangeStrategy::NativeEvent
        );
    }

    #[test]
    fn test_legacy_when_no_native() {
        let caps = HostCapabilities {
            native_events: false,
            legacy_events: true,
        };
        assert_eq!(
            ChangeStrategy::select(caps, INTERVAL),
            ChangeStrategy::LegacyEvent
        );
    }

    #[test]
    fn test_polling_fallback() {
        let strategy = ChangeStrategy::select(HostCapabilities::default(), INTERVAL);
        assert_eq!(strategy, ChangeStrategy::Polling(INTERVAL));
        assert!(!strategy.is_evented());
    }
}
