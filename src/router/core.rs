//! Router core module - route table and resolver.

use crate::dispatcher::{HandlerSlot, RouteHandler};
use crate::error::RouterError;
use crate::router::pattern::CompiledPattern;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of variable bindings before heap allocation.
/// Most hash routes have ≤2 variable segments (e.g., `/users/:id/posts/:post`).
pub const MAX_INLINE_VARS: usize = 8;

/// Stack-allocated variable binding storage for the dispatch hot path.
///
/// Binding names use `Arc<str>` because they come from the compiled route
/// table (known at registration time); values are per-dispatch data captured
/// from the hash.
pub type VarVec = SmallVec<[(Arc<str>, String); MAX_INLINE_VARS]>;

/// Result of successfully resolving a hash against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// The matched pattern string, exactly as registered.
    pub pattern: String,
    /// Variable bindings in capture order. Empty for exact matches and
    /// patterns without variable segments.
    pub variables: VarVec,
}

impl RouteMatch {
    /// Get a variable binding by name.
    ///
    /// Uses "last write wins" semantics: if the same variable name appears
    /// at several positions in one pattern, the last capture is returned.
    #[inline]
    #[must_use]
    pub fn get_var(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert the bindings to a HashMap.
    /// Note: this allocates - use get_var() in hot paths instead.
    #[must_use]
    pub fn vars_map(&self) -> HashMap<String, String> {
        self.variables
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Outcome of one resolution pass.
///
/// An unmatched hash is a normal, expected value, not an error: `resolve`
/// never fails, and `NoMatch` carries the configured fallback pattern so the
/// caller can decide whether to navigate to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// A route matched; no handler has been invoked yet.
    Matched(RouteMatch),
    /// No route matched.
    NoMatch {
        /// The fallback pattern set via [`Router::otherwise`], if any.
        default: Option<String>,
    },
}

impl Resolution {
    /// Returns the match if a route matched.
    #[must_use]
    pub fn as_match(&self) -> Option<&RouteMatch> {
        match self {
            Resolution::Matched(m) => Some(m),
            Resolution::NoMatch { .. } => None,
        }
    }

    /// Returns whether a route matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }
}

/// One registered route: a compiled pattern and its handler.
#[derive(Clone)]
struct RouteEntry {
    compiled: CompiledPattern,
    handler: Arc<dyn RouteHandler>,
}

/// Route table that resolves hash fragments to registered handlers.
///
/// Entries are kept in insertion order; ambiguity between overlapping
/// patterns (e.g. `/home/:id` vs `/home/new`) is resolved by declaration
/// order, never by specificity - the first registered pattern that matches
/// wins. Patterns compile once at registration; resolution reuses the
/// compiled matchers.
///
/// Registration uses a consuming builder so routes chain fluently:
///
/// ```rust
/// use hashroute::Router;
///
/// let router = Router::new()
///     .go("/", |_hash, _vars| {})?
///     .go("/users/:id", |_hash, _vars| {})?
///     .otherwise("/");
/// assert_eq!(router.patterns(), vec!["/", "/users/:id"]);
/// # Ok::<(), hashroute::RouterError>(())
/// ```
#[derive(Clone, Default)]
pub struct Router {
    /// Registered routes in insertion order.
    entries: Vec<RouteEntry>,
    /// Pattern string -> entry index, for overwrite detection and handler
    /// lookup.
    index: HashMap<String, usize>,
    /// Fallback pattern set via [`Router::otherwise`].
    default: Option<String>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes_count", &self.entries.len())
            .field("default", &self.default)
            .finish()
    }
}

impl Router {
    /// Create a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route, chaining-style.
    ///
    /// Sugar over [`Router::register`] for plain closures. Returns the
    /// router for fluent chaining with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the pattern cannot be
    /// compiled. Nothing is stored on error; because registration consumes
    /// the router, clone before a fallible registration when the built
    /// table must survive it. Cloning is cheap: entries share their
    /// handlers through `Arc`.
    pub fn go<F>(self, pattern: &str, handler: F) -> Result<Self, RouterError>
    where
        F: Fn(&str, Option<&VarVec>) + Send + Sync + 'static,
    {
        self.register(pattern, HandlerSlot::from_fn(handler))
    }

    /// Register a route from a [`HandlerSlot`].
    ///
    /// Stores the handler under the pattern, overwriting any prior handler
    /// for the identical pattern string (last write wins; the entry keeps
    /// its original insertion position). This is the dynamic registration
    /// path for hosts that build handler slots at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidHandler`] if the slot holds no
    /// callable, or [`RouterError::InvalidPattern`] if the pattern cannot be
    /// compiled. In both cases nothing is stored; as with [`Router::go`],
    /// clone before a fallible registration when the built table must
    /// survive it.
    pub fn register(mut self, pattern: &str, handler: HandlerSlot) -> Result<Self, RouterError> {
        let handler = handler.into_callable()?;

        if let Some(&i) = self.index.get(pattern) {
            self.entries[i].handler = handler;
            info!(pattern = %pattern, "route handler replaced");
            return Ok(self);
        }

        let compiled = CompiledPattern::compile(pattern)?;
        debug!(
            pattern = %pattern,
            vars = ?compiled.var_names(),
            position = self.entries.len(),
            "route registered"
        );
        self.index.insert(pattern.to_string(), self.entries.len());
        self.entries.push(RouteEntry { compiled, handler });
        Ok(self)
    }

    /// Set the fallback pattern consulted when no route matches.
    ///
    /// The pattern is not validated against registered routes; a default
    /// with no matching entry is permitted and simply used as a navigation
    /// target. At most one default is active; the last call wins.
    #[must_use]
    pub fn otherwise(mut self, pattern: &str) -> Self {
        self.default = Some(pattern.to_string());
        self
    }

    /// Returns a snapshot of all registered pattern strings, in insertion
    /// order.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.compiled.pattern().to_string())
            .collect()
    }

    /// Returns the fallback pattern, if one is set.
    #[must_use]
    pub fn default_pattern(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a hash against the route table.
    ///
    /// Pure: no handler is invoked. Entries are tested in insertion order
    /// and the first match wins. For each entry, verbatim string equality is
    /// tried before the compiled matcher, so a hash that literally equals a
    /// registered pattern matches it with no variable bindings - even when
    /// the pattern text contains `:` segments.
    #[must_use]
    pub fn resolve(&self, hash: &str) -> Resolution {
        for entry in &self.entries {
            let pattern = entry.compiled.pattern();
            // An empty hash is what a bare "#" (or no fragment at all)
            // yields; it addresses the root route whether that was
            // registered as "" or "/".
            if pattern == hash || (hash.is_empty() && pattern == "/") {
                debug!(hash = %hash, pattern = %pattern, "exact route match");
                return Resolution::Matched(RouteMatch {
                    pattern: pattern.to_string(),
                    variables: VarVec::new(),
                });
            }
            if entry.compiled.has_vars() {
                if let Some(variables) = entry.compiled.matches(hash) {
                    debug!(
                        hash = %hash,
                        pattern = %entry.compiled.pattern(),
                        variables = ?variables,
                        "route matched"
                    );
                    return Resolution::Matched(RouteMatch {
                        pattern: entry.compiled.pattern().to_string(),
                        variables,
                    });
                }
            }
        }
        debug!(hash = %hash, routes = self.entries.len(), "no route matched");
        Resolution::NoMatch {
            default: self.default.clone(),
        }
    }

    /// Fetch the handler registered under a pattern string.
    pub(crate) fn handler_for(&self, pattern: &str) -> Option<Arc<dyn RouteHandler>> {
        self.index
            .get(pattern)
            .and_then(|&i| self.entries.get(i))
            .map(|e| Arc::clone(&e.handler))
    }
}
