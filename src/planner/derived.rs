//! Pure derivations over the view-model snapshot.
//!
//! Everything here recomputes from the current caches on each call; nothing
//! is memoized, so there is no invalidation to get wrong.

use chrono::{Local, NaiveDate};

use super::RevisionCalendar;
use crate::models::event::RevisionEvent;
use crate::models::exam::Exam;
use crate::models::subject::SubjectDisplay;
use crate::utils::date::week_range_label;
use crate::utils::time_of_day::TimeOfDay;

/// The selected date's events partitioned into the three time buckets.
#[derive(Debug, Default)]
pub struct GroupedEvents<'a> {
    pub morning: Vec<&'a RevisionEvent>,
    pub afternoon: Vec<&'a RevisionEvent>,
    pub night: Vec<&'a RevisionEvent>,
}

impl<'a> GroupedEvents<'a> {
    /// Total number of events across the three buckets.
    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len() + self.night.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RevisionCalendar {
    /// Events on the given day, in the cache's date/time order.
    pub fn events_for_day(&self, day: NaiveDate) -> Vec<&RevisionEvent> {
        self.events.iter().filter(|e| e.date == day).collect()
    }

    /// Events on the currently selected date.
    pub fn events_for_selected_date(&self) -> Vec<&RevisionEvent> {
        self.events_for_day(self.selected_date)
    }

    /// Whether a day of the visible week has any sessions.
    pub fn has_events(&self, day: NaiveDate) -> bool {
        self.events.iter().any(|e| e.date == day)
    }

    /// Exams scheduled on the given day.
    pub fn exams_for_day(&self, day: NaiveDate) -> Vec<&Exam> {
        self.exams.iter().filter(|e| e.date == day).collect()
    }

    /// The selected date's events partitioned by time of day.
    pub fn grouped_events(&self) -> GroupedEvents<'_> {
        let mut grouped = GroupedEvents::default();

        for event in self.events_for_selected_date() {
            match TimeOfDay::from_time(event.time) {
                TimeOfDay::Morning => grouped.morning.push(event),
                TimeOfDay::Afternoon => grouped.afternoon.push(event),
                TimeOfDay::Night => grouped.night.push(event),
            }
        }

        grouped
    }

    /// The next upcoming exam: earliest date/time among loaded exams dated
    /// today or later. Computed from the snapshot, not the store's view.
    pub fn next_exam(&self) -> Option<&Exam> {
        let today = Local::now().date_naive();
        self.exams
            .iter()
            .filter(|e| e.date >= today)
            .min_by_key(|e| (e.date, e.time))
    }

    /// Label for the visible week, e.g. "Jun 9 - 15, 2024".
    pub fn week_label(&self) -> String {
        week_range_label(&self.week)
    }

    /// Display name and color for a subject id, via the loaded registry.
    /// Unknown ids resolve to the "Unknown Subject" sentinel.
    pub fn subject_display(&self, subject_id: i64) -> SubjectDisplay {
        SubjectDisplay::for_id(subject_id, &self.subjects)
    }
}
