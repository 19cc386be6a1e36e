//! Host environment boundary.
//!
//! The watcher never talks to a real location bar directly; it goes through
//! [`FragmentHost`], which reads and writes the current fragment and, when
//! the host supports it, delivers change notifications. Tests and
//! non-browser embeddings use [`MemoryHost`].

use std::sync::{Arc, Mutex, RwLock};

/// Change notification callback registered by the watcher.
///
/// Invoked with the new fragment value. `Arc` rather than `Box` so hosts can
/// snapshot their subscriber list before delivering, which keeps re-entrant
/// fragment writes from deadlocking.
pub type ChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Change-notification capabilities a host advertises.
///
/// Selection prefers native events, then the legacy mechanism, then the
/// polling fallback when neither is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// The host delivers fragment-change notifications natively.
    pub native_events: bool,
    /// The host only supports the legacy event-subscription mechanism.
    pub legacy_events: bool,
}

/// The host environment holding the location fragment.
///
/// Implementations must deliver change notifications as ordinary
/// single-threaded callbacks (synchronously from the write for evented
/// hosts) and must not notify for a write that leaves the fragment
/// unchanged, mirroring how real location bars behave.
pub trait FragmentHost: Send + Sync {
    /// Read the current fragment (the portion after `#`, as-is, no
    /// percent-decoding).
    fn fragment(&self) -> String;

    /// Write the fragment. Evented hosts fire their change callbacks
    /// synchronously when the value actually changes.
    fn set_fragment(&self, fragment: &str);

    /// Which change-notification mechanisms this host supports.
    fn capabilities(&self) -> HostCapabilities;

    /// Subscribe a change callback. Hosts without event support may ignore
    /// the subscription; the watcher falls back to polling for them.
    fn subscribe(&self, callback: ChangeCallback) {
        let _ = callback;
    }
}

/// In-process [`FragmentHost`] for tests, docs, and embeddings without a
/// real location bar.
///
/// Capabilities are fixed at construction so tests can drive each strategy
/// deterministically: [`MemoryHost::evented`] and [`MemoryHost::legacy`]
/// deliver callbacks synchronously from [`set_fragment`], while
/// [`MemoryHost::silent`] never notifies and leaves detection to polling.
///
/// [`set_fragment`]: FragmentHost::set_fragment
pub struct MemoryHost {
    fragment: Mutex<String>,
    capabilities: HostCapabilities,
    subscribers: RwLock<Vec<ChangeCallback>>,
}

impl MemoryHost {
    fn with_capabilities(capabilities: HostCapabilities) -> Arc<Self> {
        Arc::new(Self {
            fragment: Mutex::new(String::new()),
            capabilities,
            subscribers: RwLock::new(Vec::new()),
        })
    }

    /// A host with native change notification.
    #[must_use]
    pub fn evented() -> Arc<Self> {
        Self::with_capabilities(HostCapabilities {
            native_events: true,
            legacy_events: false,
        })
    }

    /// A host that only supports the legacy subscription mechanism.
    #[must_use]
    pub fn legacy() -> Arc<Self> {
        Self::with_capabilities(HostCapabilities {
            native_events: false,
            legacy_events: true,
        })
    }

    /// A host with no change notification at all; the watcher polls it.
    #[must_use]
    pub fn silent() -> Arc<Self> {
        Self::with_capabilities(HostCapabilities::default())
    }
}

impl FragmentHost for MemoryHost {
    fn fragment(&self) -> String {
        match self.fragment.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_fragment(&self, fragment: &str) {
        {
            let mut current = match self.fragment.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            // Real location bars do not notify when the hash is unchanged.
            if *current == fragment {
                return;
            }
            *current = fragment.to_string();
        }

        if !(self.capabilities.native_events || self.capabilities.legacy_events) {
            return;
        }
        // Snapshot outside the lock: a callback may navigate, re-entering
        // set_fragment on the same thread.
        let subscribers: Vec<ChangeCallback> = match self.subscribers.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        for callback in subscribers {
            callback(fragment);
        }
    }

    fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    fn subscribe(&self, callback: ChangeCallback) {
        let mut subscribers = match self.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push(callback);
    }
}
