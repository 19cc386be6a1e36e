//! Watcher core - install-once lifecycle, dispatch cycle, navigation.

use crate::dispatcher::{invoke, DispatchOutcome};
use crate::router::{Resolution, Router};
use crate::runtime_config::RuntimeConfig;
use crate::watcher::host::FragmentHost;
use crate::watcher::source::ChangeStrategy;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, Weak};
use std::thread;
use tracing::{debug, error, info, warn};

/// Watchers installed so far, keyed by host identity.
///
/// A host has at most one watcher for the life of the process; there is no
/// teardown, so entries are never removed.
type Registry = Vec<(Weak<dyn FragmentHost>, Arc<HashWatcher>)>;

static INSTALLED: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Vec::new()));

fn lock_installed() -> MutexGuard<'static, Registry> {
    match INSTALLED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Watches a host's fragment and dispatches route handlers on change.
///
/// Installing transitions the host from Idle to Active exactly once: a
/// second install on the same host is a no-op returning the existing
/// watcher. There is no Active-to-Idle transition; the watcher lives for
/// the process.
///
/// The change-detection strategy is chosen once at install from the host's
/// capabilities. Hosts do not notify for the initial state, so the default
/// and initial routes are only honored through an explicit [`run`] call.
///
/// [`run`]: HashWatcher::run
pub struct HashWatcher {
    host: Arc<dyn FragmentHost>,
    router: RwLock<Router>,
    strategy: ChangeStrategy,
    /// Last fragment value observed by any dispatch path; polling compares
    /// against this.
    last_seen: Mutex<String>,
    /// Current dispatch nesting depth (redirects and handler navigation).
    depth: AtomicUsize,
    config: RuntimeConfig,
}

impl std::fmt::Debug for HashWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashWatcher")
            .field("strategy", &self.strategy)
            .field("router", &self.router)
            .finish()
    }
}

/// Decrements the dispatch depth when a pass unwinds.
struct DepthGuard<'a>(&'a AtomicUsize);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl HashWatcher {
    /// Install a watcher for a host.
    ///
    /// Selects the change-detection strategy from the host's capabilities
    /// (native event, then legacy event, then polling at the configured
    /// interval) and wires it up. If the host already has a watcher, the
    /// existing instance is returned unchanged and `router` is dropped -
    /// one watcher per host, by contract.
    ///
    /// No resolution happens here: call [`run`](HashWatcher::run) to honor
    /// the hash present at startup.
    pub fn install(host: Arc<dyn FragmentHost>, router: Router) -> Arc<HashWatcher> {
        let mut installed = lock_installed();
        if let Some((_, existing)) = installed
            .iter()
            .find(|(w, _)| w.upgrade().is_some_and(|h| Arc::ptr_eq(&h, &host)))
        {
            warn!("watcher already installed for this host; install is a no-op");
            return Arc::clone(existing);
        }

        let config = RuntimeConfig::from_env();
        let strategy = ChangeStrategy::select(host.capabilities(), config.poll_interval);
        let initial = host.fragment();
        info!(
            strategy = strategy.name(),
            routes = router.len(),
            default = ?router.default_pattern(),
            initial_fragment = %initial,
            "hash watcher installed"
        );

        let watcher = Arc::new(HashWatcher {
            host: Arc::clone(&host),
            router: RwLock::new(router),
            strategy,
            last_seen: Mutex::new(initial),
            depth: AtomicUsize::new(0),
            config,
        });

        match strategy {
            ChangeStrategy::NativeEvent | ChangeStrategy::LegacyEvent => {
                let weak = Arc::downgrade(&watcher);
                host.subscribe(Arc::new(move |fragment: &str| {
                    if let Some(w) = weak.upgrade() {
                        w.on_change(fragment);
                    }
                }));
            }
            ChangeStrategy::Polling(interval) => {
                let weak = Arc::downgrade(&watcher);
                let spawned = thread::Builder::new()
                    .name("hashroute-poll".into())
                    .spawn(move || loop {
                        thread::sleep(interval);
                        match weak.upgrade() {
                            Some(w) => {
                                let _ = w.tick();
                            }
                            None => break,
                        }
                    });
                if let Err(e) = spawned {
                    error!(
                        error = %e,
                        "failed to spawn polling thread; fragment changes will not be observed"
                    );
                }
            }
        }

        installed.push((Arc::downgrade(&host), Arc::clone(&watcher)));
        watcher
    }

    /// Perform the initial resolution pass against the current fragment.
    ///
    /// Idempotent: each call re-resolves whatever hash is present at call
    /// time and invokes the matching handler again - there is no
    /// de-duplication.
    pub fn run(&self) -> DispatchOutcome {
        let hash = self.host.fragment();
        *self.lock_last_seen() = hash.clone();
        info!(hash = %hash, "initial resolution pass");
        self.dispatch(&hash)
    }

    /// One polling observation: dispatch if the fragment changed since the
    /// last observation.
    ///
    /// Driven by the polling thread on silent hosts; public so tests can
    /// drive deterministic change sequences without waiting on timers.
    pub fn tick(&self) -> Option<DispatchOutcome> {
        let current = self.host.fragment();
        {
            let mut last = self.lock_last_seen();
            if *last == current {
                return None;
            }
            *last = current.clone();
        }
        debug!(fragment = %current, "fragment change observed by polling");
        Some(self.dispatch(&current))
    }

    /// Navigate to a pattern's hash by writing the fragment through the
    /// host.
    ///
    /// On evented hosts the change callback re-enters dispatch
    /// synchronously before this returns; on polling hosts the next tick
    /// observes the write.
    pub fn navigate_to(&self, pattern: &str) {
        debug!(target = %pattern, "navigate");
        self.host.set_fragment(pattern);
    }

    /// Resolve a hash against the installed route table without invoking
    /// anything.
    #[must_use]
    pub fn resolve(&self, hash: &str) -> Resolution {
        self.read_router().resolve(hash)
    }

    /// Snapshot of registered pattern strings, in insertion order.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.read_router().patterns()
    }

    /// The change-detection strategy selected at install.
    #[must_use]
    pub fn strategy(&self) -> ChangeStrategy {
        self.strategy
    }

    /// Change-callback entry point for evented hosts.
    fn on_change(&self, fragment: &str) {
        *self.lock_last_seen() = fragment.to_string();
        debug!(
            fragment = %fragment,
            strategy = self.strategy.name(),
            "fragment change notified"
        );
        let _ = self.dispatch(fragment);
    }

    /// One dispatch pass: resolve, invoke, or fall back to the default
    /// route. Nesting (handler navigation, default redirects) is bounded by
    /// the configured redirect depth.
    fn dispatch(&self, hash: &str) -> DispatchOutcome {
        let depth = self.depth.fetch_add(1, Ordering::SeqCst);
        let _guard = DepthGuard(&self.depth);
        if depth >= self.config.max_redirect_depth {
            warn!(
                hash = %hash,
                depth = depth,
                max_redirect_depth = self.config.max_redirect_depth,
                "dispatch chain exceeded redirect depth; stopping"
            );
            return DispatchOutcome::DepthExceeded;
        }

        let resolved = {
            let router = self.read_router();
            match router.resolve(hash) {
                Resolution::Matched(m) => {
                    let handler = router.handler_for(&m.pattern);
                    Ok((m, handler))
                }
                Resolution::NoMatch { default } => Err(default),
            }
            // Read guard drops here: the handler may navigate and re-enter
            // dispatch on this thread.
        };

        match resolved {
            Ok((m, Some(handler))) => {
                if invoke(&handler, hash, &m) {
                    DispatchOutcome::Handled { pattern: m.pattern }
                } else {
                    DispatchOutcome::HandlerPanicked { pattern: m.pattern }
                }
            }
            Ok((m, None)) => {
                // Registration guarantees an invocable handler per entry; a
                // miss means the table and index disagree.
                error!(pattern = %m.pattern, "no handler stored for matched pattern");
                DispatchOutcome::NoMatch {
                    redirected_to: None,
                }
            }
            Err(default) => self.fall_back(hash, default),
        }
    }

    /// No route matched: navigate to the default pattern's hash, if one is
    /// configured, re-entering normal resolution.
    fn fall_back(&self, hash: &str, default: Option<String>) -> DispatchOutcome {
        let Some(default) = default else {
            info!(hash = %hash, "no route matched and no default route configured");
            return DispatchOutcome::NoMatch {
                redirected_to: None,
            };
        };
        if default == hash {
            // Navigating to the hash that just failed to match would loop.
            warn!(hash = %hash, "default route equals the unmatched hash; not redirecting");
            return DispatchOutcome::NoMatch {
                redirected_to: None,
            };
        }
        info!(hash = %hash, default = %default, "no route matched; navigating to default route");
        self.host.set_fragment(&default);
        if !self.strategy.is_evented() {
            // Polling hosts deliver no callback; observe the write now so
            // run() honors the default without waiting a tick.
            let _ = self.tick();
        }
        DispatchOutcome::NoMatch {
            redirected_to: Some(default),
        }
    }

    fn read_router(&self) -> RwLockReadGuard<'_, Router> {
        match self.router.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_last_seen(&self) -> MutexGuard<'_, String> {
        match self.last_seen.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
