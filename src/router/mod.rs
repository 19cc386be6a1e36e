//! # Router Module
//!
//! Route table, pattern compiler, and resolver.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route patterns (with `:variable` segments) into reusable
//!   matchers at registration time
//! - Resolving a hash fragment against the registered routes
//! - Extracting variable bindings from matched routes
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: at registration, patterns like `/users/:id` are
//!    parsed into segment lists and anchored regexes. A mis-specified
//!    pattern fails here, eagerly, never at dispatch time.
//!
//! 2. **Resolution**: for each hash, entries are tested in insertion order;
//!    the first match wins. Verbatim string equality is tried before the
//!    compiled matcher, so a hash that literally equals a registered
//!    pattern always resolves to it.
//!
//! First-match-wins is a deliberate policy: ambiguity between overlapping
//! patterns is resolved by declaration order, not specificity.
//!
//! ## Example
//!
//! ```rust
//! use hashroute::router::Router;
//!
//! let router = Router::new()
//!     .go("/users/:id", |_hash, _vars| {})?;
//!
//! let resolution = router.resolve("/users/123");
//! let m = resolution.as_match().unwrap();
//! assert_eq!(m.pattern, "/users/:id");
//! assert_eq!(m.get_var("id"), Some("123"));
//! # Ok::<(), hashroute::RouterError>(())
//! ```

mod core;
mod pattern;

pub use core::{Resolution, RouteMatch, Router, VarVec, MAX_INLINE_VARS};
pub use pattern::{CompiledPattern, Segment, VAR_CHAR_CLASS};
