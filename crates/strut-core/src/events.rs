//! Declarative event-key parsing.

/// Parsed form of a declarative event key such as `"click .item"`.
///
/// The first whitespace-delimited token is the event name; the trimmed
/// remainder is an optional selector scoping the subscription to
/// matching descendants. An empty selector targets the bound element
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKey {
    pub event: String,
    pub selector: String,
}

impl EventKey {
    /// Split a declarative key into event name and selector.
    ///
    /// Returns `None` for keys with no event token; callers treat those
    /// as skippable rather than as errors.
    pub fn parse(key: &str) -> Option<EventKey> {
        let trimmed = key.trim();
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let event = parts.next().filter(|s| !s.is_empty())?;
        let selector = parts.next().unwrap_or("").trim();
        Some(EventKey {
            event: event.to_string(),
            selector: selector.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_only() {
        let key = EventKey::parse("click").unwrap();
        assert_eq!(key.event, "click");
        assert_eq!(key.selector, "");
    }

    #[test]
    fn event_and_selector() {
        let key = EventKey::parse("click .item").unwrap();
        assert_eq!(key.event, "click");
        assert_eq!(key.selector, ".item");
    }

    #[test]
    fn selector_keeps_inner_structure() {
        let key = EventKey::parse("keydown input.search").unwrap();
        assert_eq!(key.event, "keydown");
        assert_eq!(key.selector, "input.search");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let key = EventKey::parse("  click   .item  ").unwrap();
        assert_eq!(key.event, "click");
        assert_eq!(key.selector, ".item");
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(EventKey::parse(""), None);
        assert_eq!(EventKey::parse("   "), None);
    }
}
