//! Demo weekly schedule projection.
//!
//! The grid is cosmetic: the first three subjects are placed on fixed
//! weekday/time slots. Missing subjects fall back to placeholder names.

use crate::model::catalog::Catalog;
use serde::Serialize;

pub const WEEK_DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];
pub const TIME_SLOTS: [&str; 3] = ["09:00", "13:00", "18:00"];

/// One scheduled block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEvent {
    pub day: &'static str,
    pub time: &'static str,
    pub title: String,
    pub note: &'static str,
    /// Style variant (`a`..`d`) for renderers that color events.
    pub variant: char,
}

/// Mon–Fri grid with three time slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySchedule {
    pub events: Vec<ScheduleEvent>,
}

impl WeeklySchedule {
    /// Event placed at `(day, time)`, if any.
    pub fn cell(&self, day: &str, time: &str) -> Option<&ScheduleEvent> {
        self.events
            .iter()
            .find(|event| event.day == day && event.time == time)
    }

    /// Rows of cells in `TIME_SLOTS` x `WEEK_DAYS` order.
    pub fn rows(&self) -> Vec<(&'static str, Vec<Option<&ScheduleEvent>>)> {
        TIME_SLOTS
            .iter()
            .map(|time| {
                let cells = WEEK_DAYS.iter().map(|day| self.cell(day, time)).collect();
                (*time, cells)
            })
            .collect()
    }
}

/// Builds the fixed demo schedule for `catalog`.
pub fn weekly_schedule(catalog: &Catalog) -> WeeklySchedule {
    let name = |index: usize, fallback: &str| {
        catalog
            .subjects
            .get(index)
            .map(|subject| subject.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };

    let event = |day: &'static str,
                 time: &'static str,
                 title: String,
                 note: &'static str,
                 variant: char| ScheduleEvent {
        day,
        time,
        title,
        note,
        variant,
    };

    WeeklySchedule {
        events: vec![
            event("Mon", "09:00", name(0, "Class A"), "Lesson 1", 'a'),
            event("Tue", "13:00", name(1, "Class B"), "Practice", 'b'),
            event("Wed", "18:00", name(2, "Class C"), "Review", 'c'),
            event("Fri", "09:00", name(0, "Class A"), "Quiz", 'd'),
        ],
    }
}
