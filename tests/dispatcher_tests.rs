mod tracing_util;

use hashroute::dispatcher::{var, HandlerSlot};
use hashroute::{DispatchOutcome, FragmentHost, HashWatcher, MemoryHost, Router, RouterError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_util::TestTracing;

#[test]
fn test_vacant_slot_fails_and_table_is_unchanged() {
    let router = Router::new().go("/present", |_h, _v| {}).unwrap();
    let err = router
        .clone()
        .register("/absent", HandlerSlot::vacant())
        .unwrap_err();
    assert_eq!(err, RouterError::InvalidHandler);
    assert_eq!(router.patterns(), vec!["/present"]);
}

#[test]
fn test_vacant_slot_does_not_overwrite_existing_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = Arc::clone(&calls);
    let router = Router::new()
        .go("/p", move |_h, _v| {
            calls_in.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let err = router
        .clone()
        .register("/p", HandlerSlot::vacant())
        .unwrap_err();
    assert_eq!(err, RouterError::InvalidHandler);

    let host = MemoryHost::evented();
    let watcher = HashWatcher::install(host.clone(), router);
    host.set_fragment("/p");
    drop(watcher);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reregistration_replaces_handler_last_write_wins() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_h1 = Arc::clone(&seen);
    let seen_h2 = Arc::clone(&seen);
    let router = Router::new()
        .go("/p", move |_h, _v| {
            seen_h1.lock().unwrap().push("h1");
        })
        .unwrap()
        .go("/p", move |_h, _v| {
            seen_h2.lock().unwrap().push("h2");
        })
        .unwrap();

    let host = MemoryHost::evented();
    let watcher = HashWatcher::install(host.clone(), router);
    host.set_fragment("/p");
    drop(watcher);
    assert_eq!(*seen.lock().unwrap(), vec!["h2"]);
}

#[test]
fn test_handler_receives_hash_and_bindings() {
    let _tracing = TestTracing::init();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in = Arc::clone(&seen);
    let router = Router::new()
        .go("/users/:id", move |hash, vars| {
            let id = var(vars, "id").unwrap_or("<none>").to_string();
            seen_in.lock().unwrap().push((hash.to_string(), id));
        })
        .unwrap();

    let host = MemoryHost::evented();
    let watcher = HashWatcher::install(host.clone(), router);
    host.set_fragment("/users/42");
    drop(watcher);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("/users/42".to_string(), "42".to_string())]
    );
}

#[test]
fn test_literal_match_passes_no_bindings() {
    let saw_vars = Arc::new(Mutex::new(None));
    let saw_in = Arc::clone(&saw_vars);
    let router = Router::new()
        .go("/plain", move |_h, vars| {
            *saw_in.lock().unwrap() = Some(vars.is_some());
        })
        .unwrap();

    let host = MemoryHost::evented();
    let watcher = HashWatcher::install(host.clone(), router);
    host.set_fragment("/plain");
    drop(watcher);
    assert_eq!(*saw_vars.lock().unwrap(), Some(false));
}

#[test]
fn test_panicking_handler_is_caught_and_cycle_survives() {
    let _tracing = TestTracing::init();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = Arc::clone(&calls);
    let router = Router::new()
        .go("/boom", |_h, _v| panic!("handler exploded"))
        .unwrap()
        .go("/fine", move |_h, _v| {
            calls_in.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let host = MemoryHost::evented();
    let watcher = HashWatcher::install(host.clone(), router);

    host.set_fragment("/boom");
    host.set_fragment("/fine");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The watcher keeps dispatching after the panic.
    let outcome = watcher.run();
    assert_eq!(
        outcome,
        DispatchOutcome::Handled {
            pattern: "/fine".to_string()
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shared_handler_slot_registers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = Arc::clone(&calls);
    let shared: Arc<dyn hashroute::RouteHandler> =
        Arc::new(move |_h: &str, _v: Option<&hashroute::VarVec>| {
            calls_in.fetch_add(1, Ordering::SeqCst);
        });
    let router = Router::new()
        .register("/a", HandlerSlot::of(Arc::clone(&shared)))
        .unwrap()
        .register("/b", HandlerSlot::of(shared))
        .unwrap();

    let host = MemoryHost::evented();
    let watcher = HashWatcher::install(host.clone(), router);
    host.set_fragment("/a");
    host.set_fragment("/b");
    drop(watcher);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
