//! # Dispatcher Module
//!
//! Handler conversion and synchronous invocation.
//!
//! ## Overview
//!
//! The dispatcher owns the seam between the route table and user code:
//!
//! - [`RouteHandler`] - the callable a route entry stores
//! - [`HandlerSlot`] - fallible handler conversion; a vacant slot fails
//!   registration with `InvalidHandler`, so the table never holds a
//!   non-invocable entry
//! - [`DispatchOutcome`] - the observable result of one dispatch pass
//!
//! ## Invocation Model
//!
//! All invocation is synchronous within the calling turn: the watcher
//! resolves the hash, looks up the handler, and calls it inline. Handler
//! panics are caught and logged as errors; the dispatch cycle stays alive
//! and later hash changes keep dispatching.

mod core;

pub use core::{var, DispatchOutcome, HandlerSlot, RouteHandler};

pub(crate) use core::invoke;
