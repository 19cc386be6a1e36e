//! Dispatcher core module - handler conversion and synchronous invocation.

use crate::error::RouterError;
use crate::router::{RouteMatch, VarVec};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// A registered route handler.
///
/// Handlers receive the raw hash string and, when the match captured any
/// variable segments, the binding vector. Invocation is synchronous within
/// the dispatch pass; a handler that navigates re-enters dispatch before
/// returning (bounded by the watcher's redirect depth cap).
pub trait RouteHandler: Send + Sync {
    /// Process one dispatch.
    fn call(&self, hash: &str, vars: Option<&VarVec>);
}

impl<F> RouteHandler for F
where
    F: Fn(&str, Option<&VarVec>) + Send + Sync,
{
    fn call(&self, hash: &str, vars: Option<&VarVec>) {
        self(hash, vars)
    }
}

/// A handler slot that may or may not hold a callable.
///
/// Closures convert infallibly via [`HandlerSlot::from_fn`]. Hosts that
/// assemble route tables dynamically - where a handler can
/// legitimately be absent - pass [`HandlerSlot::vacant`], which fails
/// registration with [`RouterError::InvalidHandler`] before the table is
/// touched.
pub struct HandlerSlot(Option<Arc<dyn RouteHandler>>);

impl HandlerSlot {
    /// A slot holding no callable. Registering it fails with
    /// [`RouterError::InvalidHandler`].
    #[must_use]
    pub fn vacant() -> Self {
        HandlerSlot(None)
    }

    /// A slot holding an existing shared handler.
    #[must_use]
    pub fn of(handler: Arc<dyn RouteHandler>) -> Self {
        HandlerSlot(Some(handler))
    }

    /// A slot holding a closure.
    pub fn from_fn<F>(handler: F) -> Self
    where
        F: Fn(&str, Option<&VarVec>) + Send + Sync + 'static,
    {
        HandlerSlot(Some(Arc::new(handler)))
    }

    /// Extract the callable, failing if the slot is vacant.
    pub(crate) fn into_callable(self) -> Result<Arc<dyn RouteHandler>, RouterError> {
        self.0.ok_or(RouterError::InvalidHandler)
    }
}

impl std::fmt::Debug for HandlerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerSlot")
            .field("invocable", &self.0.is_some())
            .finish()
    }
}

/// Outcome of one dispatch pass, observable by the caller and asserted in
/// tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DispatchOutcome {
    /// A route matched and its handler ran to completion.
    Handled {
        /// The matched pattern.
        pattern: String,
    },
    /// A route matched but its handler panicked; the panic was caught and
    /// the dispatch cycle stays alive.
    HandlerPanicked {
        /// The matched pattern.
        pattern: String,
    },
    /// No route matched. No handler was invoked for this pass.
    NoMatch {
        /// The default pattern the watcher navigated to, if one was
        /// configured and the redirect was taken.
        redirected_to: Option<String>,
    },
    /// The dispatch chain exceeded the configured redirect depth and was cut
    /// off.
    DepthExceeded,
}

/// Get a variable binding by name from a handler's `vars` argument.
///
/// Convenience for handler bodies; uses the same last-write-wins lookup as
/// [`RouteMatch::get_var`].
#[must_use]
pub fn var<'a>(vars: Option<&'a VarVec>, name: &str) -> Option<&'a str> {
    vars?.iter()
        .rfind(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_str())
}

/// Invoke a handler for a resolved match, with panic recovery.
///
/// Returns `false` if the handler panicked. The panic is caught and logged
/// so one failing handler cannot take down the watcher's dispatch loop.
pub(crate) fn invoke(handler: &Arc<dyn RouteHandler>, hash: &str, m: &RouteMatch) -> bool {
    let vars = if m.variables.is_empty() {
        None
    } else {
        Some(&m.variables)
    };

    info!(
        hash = %hash,
        pattern = %m.pattern,
        variables = ?m.variables,
        "handler invocation start"
    );
    let start = Instant::now();

    match catch_unwind(AssertUnwindSafe(|| handler.call(hash, vars))) {
        Ok(()) => {
            info!(
                hash = %hash,
                pattern = %m.pattern,
                latency_us = start.elapsed().as_micros() as u64,
                "handler invocation complete"
            );
            true
        }
        Err(panic) => {
            error!(
                hash = %hash,
                pattern = %m.pattern,
                panic_message = %format!("{panic:?}"),
                "handler panicked"
            );
            false
        }
    }
}
