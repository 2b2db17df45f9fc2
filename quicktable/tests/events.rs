//! Event emitter: registration order, forwarding, shared clones.

use std::sync::{Arc, Mutex};

use quicktable::events::{COLUMN_VISIBLE, EventArgs, EventEmitter};
use quicktable::column_id;

#[test]
fn test_handlers_run_in_registration_order() {
    let emitter = EventEmitter::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    emitter.on("ping", move |_| log.lock().unwrap().push(1));
    let log = Arc::clone(&seen);
    emitter.on("ping", move |_| log.lock().unwrap().push(2));

    emitter.trigger("ping", &EventArgs::None);
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
}

#[test]
fn test_trigger_without_handlers_is_noop() {
    let emitter = EventEmitter::new();
    emitter.trigger("nothing", &EventArgs::None);
}

#[test]
fn test_handlers_receive_args() {
    let emitter = EventEmitter::new();
    let seen = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&seen);
    emitter.on(COLUMN_VISIBLE, move |args| {
        *slot.lock().unwrap() = Some(args.clone());
    });

    let args = EventArgs::ColumnVisible {
        column_id: column_id(2),
        old_value: true,
        new_value: false,
    };
    emitter.trigger(COLUMN_VISIBLE, &args);
    assert_eq!(seen.lock().unwrap().clone(), Some(args));
}

#[test]
fn test_forward_re_triggers_on_target() {
    let source = EventEmitter::new();
    let target = EventEmitter::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    target.on("ping", move |_| log.lock().unwrap().push("target"));
    source.forward("ping", &target);
    let log = Arc::clone(&seen);
    source.on("ping", move |_| log.lock().unwrap().push("source"));

    source.trigger("ping", &EventArgs::None);
    // the forward handler registered first, so the target sees it first
    assert_eq!(*seen.lock().unwrap(), vec!["target", "source"]);
    // triggering the target does not loop back
    target.trigger("ping", &EventArgs::None);
    assert_eq!(*seen.lock().unwrap(), vec!["target", "source", "target"]);
}

#[test]
fn test_clones_share_listeners() {
    let emitter = EventEmitter::new();
    let clone = emitter.clone();
    let seen = Arc::new(Mutex::new(0));

    let counter = Arc::clone(&seen);
    clone.on("ping", move |_| *counter.lock().unwrap() += 1);
    emitter.trigger("ping", &EventArgs::None);
    assert_eq!(*seen.lock().unwrap(), 1);
    assert_eq!(emitter.listener_count("ping"), 1);
}
