//! Merging of relationship interval endpoints into change events.
//!
//! Every relationship-scoped interval (a membership's own inception and
//! termination, each `HAS_ROLE` edge's dates) is merged on its own and
//! attached to its owning entity. Intervals are never combined.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::ChangeEvent;

/// Merge an optional `started`/`ended` pair into at most one change event.
///
/// Empty strings count as absent. When both sides are absent there is no
/// change event at all, never a record with both fields empty.
pub fn merge_change_event(started: Option<&str>, ended: Option<&str>) -> Option<ChangeEvent> {
    let started_at = non_empty(started).map(normalise_timestamp);
    let ended_at = non_empty(ended).map(normalise_timestamp);

    if started_at.is_none() && ended_at.is_none() {
        return None;
    }

    Some(ChangeEvent {
        started_at,
        ended_at,
    })
}

/// Convenience wrapper producing the list shape stored on the document.
pub fn change_events(started: Option<&str>, ended: Option<&str>) -> Vec<ChangeEvent> {
    merge_change_event(started, ended).into_iter().collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Full timestamps are reduced to second precision UTC; anything else
/// (plain dates such as `1979-01-01`) passes through untouched.
fn normalise_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        Err(_) => raw.to_string(),
    }
}
