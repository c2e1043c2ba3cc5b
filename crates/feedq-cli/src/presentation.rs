//! Text formatting for CLI output.

use feedq_core::{Item, QueueEvent};

/// Truncates a string to at most `max_len` characters, adding "..." if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// One-line summary of an item: id, locator, and title if it has one.
pub fn format_item(item: &Item) -> String {
    let title = item
        .metadata
        .get("title")
        .and_then(|v| v.as_str())
        .map(|t| format!("  \"{}\"", truncate_string(t, 40)))
        .unwrap_or_default();
    format!("{}  {}{title}", item.id, item.resource_url)
}

/// Human-readable description of a queue event.
pub fn describe_event(event: &QueueEvent) -> String {
    match event {
        QueueEvent::QueueChanged { length } => format!("queue now holds {length} item(s)"),
        QueueEvent::FetchStarted {
            requested,
            excluded,
        } => format!("fetching up to {requested} item(s), excluding {excluded}"),
        QueueEvent::FetchCompleted { received, appended } => {
            format!("fetch returned {received} item(s), {appended} new")
        }
        QueueEvent::Exhausted => "feed has no more items".to_string(),
        QueueEvent::FetchFailed { message } => format!("fetch failed: {message}"),
        QueueEvent::Cleared => "queue cleared".to_string(),
    }
}

/// Render a yes/no flag.
pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_format_item_with_title() {
        let item = Item::new("42", "https://cdn/42.jpg").with_metadata("title", json!("Sunset"));
        assert_eq!(format_item(&item), "42  https://cdn/42.jpg  \"Sunset\"");
    }

    #[test]
    fn test_format_item_without_title() {
        let item = Item::new("7", "https://cdn/7.jpg");
        assert_eq!(format_item(&item), "7  https://cdn/7.jpg");
    }

    #[test]
    fn test_describe_event() {
        assert_eq!(
            describe_event(&QueueEvent::FetchCompleted {
                received: 3,
                appended: 2
            }),
            "fetch returned 3 item(s), 2 new"
        );
        assert_eq!(describe_event(&QueueEvent::Exhausted), "feed has no more items");
    }
}
