//! Lenient parser for the calendar feed subset the town publishes.
//!
//! This is not a general iCalendar implementation. It handles exactly what
//! the upstream feed emits: folded lines, `VEVENT` blocks, `KEY;PARAMS:value`
//! fields, and the two basic date shapes. Anything malformed degrades to a
//! default value instead of failing the feed.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::types::CalendarEvent;

/// Splits feed text into logical lines, joining folded continuations.
///
/// A line starting with a space or tab belongs to the previous line; its
/// leading whitespace is stripped before joining. Idempotent on text that
/// is already unfolded.
pub fn unfold(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = Vec::new();

    for line in normalized.split('\n') {
        if line.starts_with([' ', '\t']) && !lines.is_empty() {
            if let Some(last) = lines.last_mut() {
                last.push_str(line.trim_start());
            }
        } else {
            lines.push(line.to_string());
        }
    }

    lines
}

/// Parses feed text into events, in the order their blocks close.
///
/// Lines outside a `BEGIN:VEVENT`/`END:VEVENT` block are ignored, as is an
/// unterminated block at end of input. Within a block, each line splits at
/// the first colon; the key is uppercased with any `;`-prefixed parameters
/// dropped, and a repeated key overwrites the earlier value.
pub fn parse_events(text: &str) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    let mut current: Option<HashMap<String, String>> = None;

    for line in unfold(text) {
        if line == "BEGIN:VEVENT" {
            current = Some(HashMap::new());
        } else if line == "END:VEVENT" {
            if let Some(fields) = current.take() {
                events.push(normalize_event(&fields));
            }
        } else if let Some(fields) = current.as_mut() {
            if let Some((raw_key, value)) = line.split_once(':') {
                if !raw_key.is_empty() {
                    let key = raw_key.split(';').next().unwrap_or(raw_key).to_uppercase();
                    fields.insert(key, value.to_string());
                }
            }
        }
    }

    events
}

fn normalize_event(fields: &HashMap<String, String>) -> CalendarEvent {
    let title = match fields.get("SUMMARY") {
        Some(summary) if !summary.is_empty() => summary.clone(),
        _ => "Event".to_string(),
    };

    let url = fields
        .get("URL")
        .filter(|url| !url.is_empty())
        .cloned()
        .or_else(|| {
            fields
                .get("DESCRIPTION")
                .and_then(|description| extract_url(description))
                .map(str::to_string)
        })
        .unwrap_or_default();

    CalendarEvent {
        title,
        location: fields.get("LOCATION").cloned().unwrap_or_default(),
        url,
        start: fields.get("DTSTART").and_then(|value| parse_feed_date(value)),
        end: fields.get("DTEND").and_then(|value| parse_feed_date(value)),
    }
}

/// Parses the two accepted date shapes.
///
/// `YYYYMMDDTHHMMSS` with an optional trailing `Z` is a full date-time;
/// `YYYYMMDD` is midnight of that day. Both are carried as UTC. Any other
/// shape, and any shape whose digit groups do not form a real date or
/// time, yields `None`.
pub fn parse_feed_date(value: &str) -> Option<DateTime<Utc>> {
    let (body, had_zulu) = match value.strip_suffix('Z') {
        Some(rest) => (rest, true),
        None => (value, false),
    };

    if body.len() == 15 && body.as_bytes()[8] == b'T' {
        let date_part = &body[..8];
        let time_part = &body[9..];
        if !is_digits(date_part) || !is_digits(time_part) {
            return None;
        }

        let date = date_from_digits(date_part)?;
        let time = NaiveTime::from_hms_opt(
            time_part[..2].parse().ok()?,
            time_part[2..4].parse().ok()?,
            time_part[4..6].parse().ok()?,
        )?;
        return Some(date.and_time(time).and_utc());
    }

    // The bare-date shape does not admit a zone suffix.
    if !had_zulu && body.len() == 8 && is_digits(body) {
        let date = date_from_digits(body)?;
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    None
}

fn date_from_digits(digits: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        digits[..4].parse().ok()?,
        digits[4..6].parse().ok()?,
        digits[6..8].parse().ok()?,
    )
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Finds the first absolute http(s) URL in free text.
///
/// A candidate runs from its scheme to the next whitespace character and
/// must contain at least one character after the `://`.
pub fn extract_url(text: &str) -> Option<&str> {
    let mut from = 0;

    while let Some(found) = text[from..].find("http") {
        let start = from + found;
        let rest = &text[start..];

        let tail = rest
            .strip_prefix("https://")
            .or_else(|| rest.strip_prefix("http://"));
        if let Some(tail) = tail {
            let len = tail
                .find(char::is_whitespace)
                .unwrap_or(tail.len());
            if len > 0 {
                let scheme_len = rest.len() - tail.len();
                return Some(&rest[..scheme_len + len]);
            }
        }

        from = start + 1;
    }

    None
}
