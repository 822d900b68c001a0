//! In-process pub/sub emitter.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use strut_core::{EmitterCallback, EmitterHandle, EventEmitter};

#[derive(Default)]
struct EmitterState {
    next_handle: u64,
    channels: HashMap<String, Vec<(EmitterHandle, EmitterCallback)>>,
}

/// Single-threaded emitter backing the `on`/`off`/`trigger` surface of
/// views built with it.
#[derive(Default)]
pub struct LocalEmitter {
    inner: RefCell<EmitterState>,
}

impl LocalEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// New emitter behind the shared handle views expect.
    pub fn shared() -> Rc<LocalEmitter> {
        Rc::new(LocalEmitter::new())
    }

    /// Callbacks currently subscribed to `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.inner
            .borrow()
            .channels
            .get(event)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl EventEmitter for LocalEmitter {
    fn on(&self, event: &str, callback: EmitterCallback) -> EmitterHandle {
        let mut state = self.inner.borrow_mut();
        state.next_handle += 1;
        let handle = EmitterHandle(state.next_handle);
        state
            .channels
            .entry(event.to_string())
            .or_default()
            .push((handle, callback));
        handle
    }

    fn off(&self, handle: EmitterHandle) {
        let mut state = self.inner.borrow_mut();
        for subscribers in state.channels.values_mut() {
            subscribers.retain(|(h, _)| *h != handle);
        }
    }

    fn trigger(&self, event: &str) {
        // Snapshot so callbacks can subscribe/unsubscribe mid-trigger.
        let callbacks: Vec<EmitterCallback> = self
            .inner
            .borrow()
            .channels
            .get(event)
            .map(|subs| subs.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();
        for callback in callbacks {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn trigger_invokes_subscribers() {
        let emitter = LocalEmitter::new();
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        emitter.on("select", Rc::new(move || inner.set(inner.get() + 1)));

        emitter.trigger("select");
        emitter.trigger("select");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn off_removes_only_that_subscription() {
        let emitter = LocalEmitter::new();
        let count = Rc::new(Cell::new(0));
        let a = count.clone();
        let b = count.clone();
        let handle = emitter.on("select", Rc::new(move || a.set(a.get() + 1)));
        emitter.on("select", Rc::new(move || b.set(b.get() + 10)));

        emitter.off(handle);
        emitter.trigger("select");
        assert_eq!(count.get(), 10);
        assert_eq!(emitter.subscriber_count("select"), 1);
    }

    #[test]
    fn unknown_handle_is_noop() {
        let emitter = LocalEmitter::new();
        emitter.off(EmitterHandle(42));
        emitter.trigger("missing");
    }
}
