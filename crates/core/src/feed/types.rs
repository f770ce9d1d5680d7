use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One event as recovered from the calendar feed.
///
/// Fields degrade rather than fail: a missing summary becomes `"Event"`,
/// missing location or url become empty strings, and unparseable dates
/// become `None`. An event without a start survives parsing but is dropped
/// by the window filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub title: String,
    pub location: String,
    pub url: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// The wire form of an event, as served by the events endpoint.
///
/// Dates are flattened to ISO-8601 strings so absent values serialize as
/// JSON `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub location: String,
    pub url: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl From<CalendarEvent> for EventRecord {
    fn from(event: CalendarEvent) -> Self {
        Self {
            title: event.title,
            location: event.location,
            url: event.url,
            start: event.start.map(iso8601),
            end: event.end.map(iso8601),
        }
    }
}

/// Formats an instant for the JSON API: millisecond precision with a `Z`
/// suffix.
pub fn iso8601(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
