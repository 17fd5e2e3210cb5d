//! Calendar view-model for the study planner.
//!
//! `RevisionCalendar` holds the session's in-memory snapshot: the full
//! subject and exam lists plus the revision events of the currently visible
//! week. Every mutation goes through the persistence services first and the
//! snapshot is reconciled afterward (confirm-then-apply, never optimistic).
//! Derived views are recomputed from the snapshot on demand, never cached.

use chrono::{Local, NaiveDate};

use crate::models::event::RevisionEvent;
use crate::models::exam::Exam;
use crate::models::subject::Subject;
use crate::services::database::Database;
use crate::services::event::EventService;
use crate::services::exam::ExamService;
use crate::services::subject::SubjectService;
use crate::utils::date::week_days;

mod commands;
mod derived;
mod navigation;

pub use commands::CommandError;
pub use derived::GroupedEvents;

/// Loading lifecycle of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Subjects and exams have not been fetched yet
    Initializing,
    /// Initial data has settled, possibly with slices degraded to empty
    Ready,
}

/// The calendar view-model.
pub struct RevisionCalendar {
    db: Database,
    phase: LoadPhase,
    events_loading: bool,
    subjects: Vec<Subject>,
    /// Events of the visible week only; replaced wholesale on week change
    events: Vec<RevisionEvent>,
    exams: Vec<Exam>,
    week: Vec<NaiveDate>,
    selected_date: NaiveDate,
}

impl RevisionCalendar {
    /// Create a calendar anchored on today's week, with nothing loaded yet.
    pub fn new(db: Database) -> Self {
        let today = Local::now().date_naive();
        Self {
            db,
            phase: LoadPhase::Initializing,
            events_loading: false,
            subjects: Vec::new(),
            events: Vec::new(),
            exams: Vec::new(),
            week: week_days(today),
            selected_date: today,
        }
    }

    /// Fetch subjects and exams, then the visible week's events.
    ///
    /// The two initial slices settle independently: a failed fetch is logged
    /// and leaves that slice empty without blocking the other.
    pub fn load_initial(&mut self) {
        match SubjectService::new(self.db.connection()).list_all() {
            Ok(subjects) => self.subjects = subjects,
            Err(e) => log::error!("Failed to load subjects: {:#}", e),
        }

        match ExamService::new(self.db.connection()).list_all() {
            Ok(exams) => self.exams = exams,
            Err(e) => log::error!("Failed to load exams: {:#}", e),
        }

        self.phase = LoadPhase::Ready;
        self.reload_week_events();
    }

    /// Replace the events cache with the visible week's window.
    ///
    /// Stale-window events are discarded, not merged. A load failure is
    /// logged and treated as "no events".
    pub(crate) fn reload_week_events(&mut self) {
        self.events_loading = true;

        let start = self.week[0];
        let end = self.week[6];

        match EventService::new(self.db.connection()).list_for_range(start, end) {
            Ok(events) => self.events = events,
            Err(e) => {
                log::error!(
                    "Failed to load events for week {} - {}: {:#}",
                    start,
                    end,
                    e
                );
                self.events.clear();
            }
        }

        self.events_loading = false;
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn events_loading(&self) -> bool {
        self.events_loading
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn events(&self) -> &[RevisionEvent] {
        &self.events
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// The 7 days of the visible week, Sunday first.
    pub fn week(&self) -> &[NaiveDate] {
        &self.week
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }
}
