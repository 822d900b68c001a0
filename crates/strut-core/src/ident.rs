//! Process-unique identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Generate a process-unique identifier with the given prefix.
///
/// The counter is monotonic for the life of the process; ids are never
/// reused, so they stay stable across element rebinds.
pub fn unique_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct() {
        let a = unique_id("view");
        let b = unique_id("view");
        assert_ne!(a, b);
    }

    #[test]
    fn prefix_is_applied() {
        let id = unique_id("widget");
        assert!(id.starts_with("widget"));
        assert!(id["widget".len()..].parse::<u64>().is_ok());
    }
}
