use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::table::RedirectEntry;

/// One recorded redirect hit, shaped for an eventual durable sink.
///
/// `referrer` and `ua` carry their fallback values (`"direct"` and the
/// empty string) rather than options so every record serializes with the
/// full field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub slug: String,
    pub category: String,
    pub label: String,
    pub referrer: String,
    pub ua: String,
    pub ts: DateTime<Utc>,
}

impl ClickRecord {
    /// Builds a record from a resolved entry plus request metadata.
    ///
    /// An absent or empty referrer becomes `"direct"`; an absent
    /// user-agent becomes the empty string.
    pub fn new(
        slug: &str,
        entry: &RedirectEntry,
        referrer: Option<&str>,
        user_agent: Option<&str>,
        ts: DateTime<Utc>,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            category: entry.category.clone(),
            label: entry.label.clone(),
            referrer: referrer
                .filter(|value| !value.is_empty())
                .unwrap_or("direct")
                .to_string(),
            ua: user_agent.unwrap_or_default().to_string(),
            ts,
        }
    }

    /// The `category:slug` pair exposed in the redirect response header.
    pub fn header_value(&self) -> String {
        format!("{}:{}", self.category, self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> RedirectEntry {
        RedirectEntry::new("https://example.org/book", "booking", "Book Now")
    }

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 22, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_click_copies_entry_metadata() {
        let click = ClickRecord::new("stay", &entry(), Some("https://a.example/"), Some("UA"), ts());
        assert_eq!(click.slug, "stay");
        assert_eq!(click.category, "booking");
        assert_eq!(click.label, "Book Now");
        assert_eq!(click.referrer, "https://a.example/");
        assert_eq!(click.ua, "UA");
        assert_eq!(click.header_value(), "booking:stay");
    }

    #[test]
    fn test_missing_referrer_falls_back_to_direct() {
        assert_eq!(ClickRecord::new("stay", &entry(), None, None, ts()).referrer, "direct");
        assert_eq!(
            ClickRecord::new("stay", &entry(), Some(""), None, ts()).referrer,
            "direct"
        );
    }

    #[test]
    fn test_missing_user_agent_falls_back_to_empty() {
        let click = ClickRecord::new("stay", &entry(), None, None, ts());
        assert_eq!(click.ua, "");
    }

    #[test]
    fn test_record_serializes_with_full_field_set() {
        let click = ClickRecord::new("stay", &entry(), None, Some("UA/1.0"), ts());
        let json = serde_json::to_value(&click).unwrap();

        assert_eq!(json["slug"], "stay");
        assert_eq!(json["category"], "booking");
        assert_eq!(json["label"], "Book Now");
        assert_eq!(json["referrer"], "direct");
        assert_eq!(json["ua"], "UA/1.0");
        assert!(json["ts"].is_string());
    }
}
