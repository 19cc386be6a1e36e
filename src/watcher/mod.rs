//! # Watcher Module
//!
//! Fragment change detection and the dispatch cycle.
//!
//! ## Overview
//!
//! The watcher connects a [`Router`](crate::router::Router) to a host
//! environment:
//!
//! - [`FragmentHost`] - the boundary to the environment holding the
//!   fragment (read, write, change notification)
//! - [`ChangeStrategy`] - how changes are detected: native event, legacy
//!   event, or fixed-interval polling, selected once at install in that
//!   preference order
//! - [`HashWatcher`] - install-once-per-host lifecycle, the initial
//!   [`run`](HashWatcher::run) pass, per-change dispatch, and default-route
//!   fallback
//!
//! ## Dispatch Cycle
//!
//! Every observed change (and every `run` call) resolves the current hash
//! against the route table and invokes the first matching handler. When
//! nothing matches and a default route is configured, the watcher navigates
//! to the default pattern's hash, which re-enters normal resolution; chains
//! of redirects and handler-driven navigation are cut off at the configured
//! depth.
//!
//! ## Example
//!
//! ```rust
//! use hashroute::{FragmentHost, HashWatcher, MemoryHost, Router};
//!
//! let host = MemoryHost::evented();
//! let router = Router::new()
//!     .go("/inbox", |_hash, _vars| {})?;
//! let watcher = HashWatcher::install(host.clone(), router);
//!
//! watcher.run();                 // resolve whatever hash is present now
//! host.set_fragment("/inbox");   // change notification dispatches inline
//! # Ok::<(), hashroute::RouterError>(())
//! ```

mod core;
mod host;
mod source;

pub use core::HashWatcher;
pub use host::{ChangeCallback, FragmentHost, HostCapabilities, MemoryHost};
pub use source::ChangeStrategy;
