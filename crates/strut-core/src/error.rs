//! Error types for view construction and event delegation.

use thiserror::Error;

/// Errors raised by the view layer.
///
/// Delegation is the only fallible operation; everything else in the
/// layer is permissive (malformed selectors match nothing, detaching
/// an orphan is a no-op).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A declarative event entry names a method the definition does not
    /// carry. Raised before any subscription is attached for that
    /// entry; entries processed earlier in the same pass stay attached.
    #[error("event handler `{method}` for `{key}` does not exist")]
    HandlerNotFound { key: String, method: String },
}
