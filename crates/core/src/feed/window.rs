use chrono::{DateTime, Duration, Utc};

use super::types::{CalendarEvent, EventRecord};

/// Window length used when the query carries no usable `days` value.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;
/// Largest window a caller may request.
pub const MAX_WINDOW_DAYS: i64 = 90;
/// Hard cap on the number of events returned.
pub const MAX_EVENTS: usize = 150;

/// Resolves a raw `days` query value to a window length.
///
/// Only the leading integer counts, so `45abc` still means 45. Missing
/// input or input with no leading digits falls back to the default;
/// everything else clamps into `[1, 90]`. Nothing is ever rejected.
pub fn clamp_days(raw: Option<&str>) -> i64 {
    raw.and_then(leading_int)
        .unwrap_or(DEFAULT_WINDOW_DAYS)
        .clamp(1, MAX_WINDOW_DAYS)
}

/// Parses an optional sign plus leading decimal digits, discarding the
/// rest. Values too long for i64 saturate instead of failing.
fn leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let negative = trimmed.starts_with('-');
    let rest = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    match digits.parse::<i64>() {
        Ok(n) if negative => Some(-n),
        Ok(n) => Some(n),
        Err(_) => Some(if negative { i64::MIN } else { i64::MAX }),
    }
}

/// Selects events starting within `[now, now + days]` inclusive, sorted
/// ascending by start and capped at [`MAX_EVENTS`], flattened to their wire
/// form. Events without a start never qualify.
pub fn select_upcoming(
    events: Vec<CalendarEvent>,
    now: DateTime<Utc>,
    days: i64,
) -> Vec<EventRecord> {
    let window_end = now + Duration::days(days);

    let mut upcoming: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|event| {
            event
                .start
                .is_some_and(|start| start >= now && start <= window_end)
        })
        .collect();

    upcoming.sort_by_key(|event| event.start);
    upcoming.truncate(MAX_EVENTS);

    upcoming.into_iter().map(EventRecord::from).collect()
}
