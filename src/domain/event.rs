use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub speaker: Option<String>,
    pub venue: Option<String>,
    pub category: String,
    pub starts_at: NaiveDateTime,
}

/// Whether an event lies ahead of or behind a reference instant.
///
/// Derived on every render rather than stored, so the grids never show a
/// stale status after midnight.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Past,
}

impl Event {
    pub fn status(&self, now: NaiveDateTime) -> EventStatus {
        if self.starts_at >= now {
            EventStatus::Upcoming
        } else {
            EventStatus::Past
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Upcoming => write!(f, "upcoming"),
            EventStatus::Past => write!(f, "past"),
        }
    }
}

/// View record for the event grid with the derived status materialized,
/// so the status facet behaves like any stored field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventCard {
    pub id: i64,
    pub title: String,
    pub speaker: Option<String>,
    pub venue: Option<String>,
    pub category: String,
    pub starts_at: NaiveDateTime,
    pub status: EventStatus,
}

impl EventCard {
    pub fn from_event(event: &Event, now: NaiveDateTime) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            speaker: event.speaker.clone(),
            venue: event.venue.clone(),
            category: event.category.clone(),
            starts_at: event.starts_at,
            status: event.status(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn status_splits_on_reference_instant() {
        let event = Event {
            starts_at: at(2026, 9, 1),
            ..Event::default()
        };
        assert_eq!(event.status(at(2026, 8, 20)), EventStatus::Upcoming);
        assert_eq!(event.status(at(2026, 9, 2)), EventStatus::Past);
    }

    #[test]
    fn card_materializes_status_as_lowercase_field() {
        let event = Event {
            id: 3,
            title: "Colloquium".into(),
            starts_at: at(2030, 1, 1),
            ..Event::default()
        };
        let card = EventCard::from_event(&event, at(2026, 8, 20));
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["status"], "upcoming");
    }
}
