use std::collections::HashMap;

/// Destination and metadata for one short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectEntry {
    pub url: String,
    pub category: String,
    pub label: String,
}

impl RedirectEntry {
    pub fn new(url: &str, category: &str, label: &str) -> Self {
        Self {
            url: url.to_string(),
            category: category.to_string(),
            label: label.to_string(),
        }
    }
}

/// Immutable slug-to-destination mapping, built once at startup.
///
/// Resolution is total: a slug either maps to exactly one entry or to
/// nothing, and the answer never changes for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    entries: HashMap<String, RedirectEntry>,
}

impl RedirectTable {
    pub fn new(entries: impl IntoIterator<Item = (String, RedirectEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The production link set served by the site.
    pub fn builtin() -> Self {
        Self::new([
            (
                "surfside-town-events".to_string(),
                RedirectEntry::new(
                    "https://www.surfsidebeach.org/calendar.aspx?CID=29",
                    "events",
                    "Surfside Town Events (Full Calendar)",
                ),
            ),
            (
                "vmb-events".to_string(),
                RedirectEntry::new(
                    "https://www.visitmyrtlebeach.com/events-calendar",
                    "events",
                    "Visit Myrtle Beach Events Calendar",
                ),
            ),
            (
                "stay".to_string(),
                RedirectEntry::new(
                    "https://www.southerncoastvacations.com/myrtle-beach-vacation-rentals/paradise",
                    "booking",
                    "Paradise Booking (Southern Coast Vacations)",
                ),
            ),
        ])
    }

    pub fn resolve(&self, slug: &str) -> Option<&RedirectEntry> {
        self.entries.get(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_slugs_resolve() {
        let table = RedirectTable::builtin();
        assert_eq!(table.len(), 3);

        let stay = table.resolve("stay").unwrap();
        assert_eq!(
            stay.url,
            "https://www.southerncoastvacations.com/myrtle-beach-vacation-rentals/paradise"
        );
        assert_eq!(stay.category, "booking");

        let town = table.resolve("surfside-town-events").unwrap();
        assert_eq!(town.category, "events");
        assert_eq!(town.label, "Surfside Town Events (Full Calendar)");

        assert!(table.resolve("vmb-events").is_some());
    }

    #[test]
    fn test_unknown_slug_resolves_to_none() {
        let table = RedirectTable::builtin();
        assert!(table.resolve("unknown-slug").is_none());
        assert!(table.resolve("").is_none());
        assert!(table.resolve("STAY").is_none());
    }

    #[test]
    fn test_resolution_is_stable_across_calls() {
        let table = RedirectTable::builtin();
        let first = table.resolve("stay").cloned();
        let second = table.resolve("stay").cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_table() {
        let table = RedirectTable::new([]);
        assert!(table.is_empty());
        assert!(table.resolve("stay").is_none());
    }
}
