//! Pub-sub collaborator contract.
//!
//! Views compose with an injected emitter capability rather than
//! implementing one. Channels are addressed by name; subscribing
//! returns the handle used to unsubscribe.

use std::rc::Rc;

/// Handle for an emitter subscription, returned by [`EventEmitter::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterHandle(pub u64);

/// Callback registered on an emitter channel.
pub type EmitterCallback = Rc<dyn Fn()>;

/// External publish/subscribe capability a view composes with.
pub trait EventEmitter {
    /// Subscribe `callback` to `event`. The handle is the only way to
    /// unsubscribe.
    fn on(&self, event: &str, callback: EmitterCallback) -> EmitterHandle;

    /// Drop a subscription. Unknown handles are a no-op.
    fn off(&self, handle: EmitterHandle);

    /// Invoke every callback currently subscribed to `event`.
    fn trigger(&self, event: &str);
}

/// Emitter that drops everything. The default capability when a view is
/// built without an injected one; its handles are inert.
#[derive(Debug, Default)]
pub struct NullEmitter;

impl EventEmitter for NullEmitter {
    fn on(&self, _event: &str, _callback: EmitterCallback) -> EmitterHandle {
        EmitterHandle(0)
    }

    fn off(&self, _handle: EmitterHandle) {}

    fn trigger(&self, _event: &str) {}
}
