//! # hashroute
//!
//! **hashroute** is a client-side hash-fragment router: a host page (or any
//! embedding that exposes a location fragment) registers callbacks for hash
//! patterns with `:variable` segments, and the router dispatches the first
//! matching callback on every fragment change, plus once on an explicit
//! initial `run()` pass, falling back to a default route when nothing
//! matches.
//!
//! ## Architecture
//!
//! The library is organized into three key modules:
//!
//! - **[`router`]** - route table, pattern compiler, and first-match-wins
//!   resolver. Patterns compile once at registration into anchored regex
//!   matchers; variable values are restricted to `[A-Za-z0-9_-]`.
//! - **[`dispatcher`]** - handler conversion and synchronous invocation
//!   with panic recovery. A vacant handler slot fails registration with
//!   [`RouterError::InvalidHandler`], so the table never holds a
//!   non-invocable entry.
//! - **[`watcher`]** - change detection and the dispatch cycle. The
//!   [`FragmentHost`] trait is the boundary to the environment; the
//!   detection strategy (native event, legacy event, or polling) is picked
//!   once at install from the host's capabilities.
//!
//! ## Matching Model
//!
//! Resolution tests routes in registration order and the first match wins -
//! a deliberate policy: overlap between patterns such as `/home/:id` and
//! `/home/new` is decided by declaration order, never by specificity. A
//! hash that literally equals a registered pattern string always resolves
//! to that entry with no variable bindings. An unmatched hash is a normal
//! value ([`Resolution::NoMatch`]), not an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use hashroute::{dispatcher, FragmentHost, HashWatcher, MemoryHost, Router};
//!
//! let host = MemoryHost::evented();
//! let router = Router::new()
//!     .go("/", |_hash, _vars| {
//!         // render the landing view
//!     })?
//!     .go("/users/:id", |_hash, vars| {
//!         let _id = dispatcher::var(vars, "id");
//!         // render the user view
//!     })?
//!     .otherwise("/");
//!
//! let watcher = HashWatcher::install(host.clone(), router);
//! watcher.run(); // hosts never notify for the initial state
//!
//! host.set_fragment("/users/42"); // dispatches the :id route inline
//! # Ok::<(), hashroute::RouterError>(())
//! ```
//!
//! ## Runtime Considerations
//!
//! Registration, matching, and handler invocation all execute synchronously
//! within the calling turn. Handlers may themselves navigate; the nested
//! dispatch runs before the outer one returns and chains are cut off at a
//! configurable depth (see [`runtime_config`]). The polling fallback runs
//! on a background thread created once at install; there is no teardown -
//! a watcher lives for the process.

pub mod dispatcher;
pub mod error;
pub mod router;
pub mod runtime_config;
pub mod watcher;

pub use dispatcher::{DispatchOutcome, HandlerSlot, RouteHandler};
pub use error::RouterError;
pub use router::{Resolution, RouteMatch, Router, VarVec};
pub use runtime_config::RuntimeConfig;
pub use watcher::{ChangeStrategy, FragmentHost, HashWatcher, HostCapabilities, MemoryHost};
