mod parse;
mod types;
mod window;

pub use parse::{extract_url, parse_events, parse_feed_date, unfold};
pub use types::{iso8601, CalendarEvent, EventRecord};
pub use window::{clamp_days, select_upcoming, DEFAULT_WINDOW_DAYS, MAX_EVENTS, MAX_WINDOW_DAYS};
