// Revision event module
// A scheduled study session tied to a subject

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::subject::SubjectDisplay;

/// A scheduled revision session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionEvent {
    pub id: Option<i64>,
    pub subject_id: i64,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Start time of day (stored as HH:MM)
    pub time: NaiveTime,
    /// Length of the session in whole minutes
    pub duration_minutes: u32,
    pub completed: bool,
    pub notes: Option<String>,
    /// Subject name and color joined in on reads; `None` until persisted
    pub subject: Option<SubjectDisplay>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl RevisionEvent {
    /// Create a new revision event with required fields
    ///
    /// # Arguments
    /// * `subject_id` - Subject the session belongs to
    /// * `date` - Calendar date of the session
    /// * `time` - Start time of day
    /// * `duration_minutes` - Session length in minutes (must be positive)
    pub fn new(
        subject_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id: None,
            subject_id,
            date,
            time,
            duration_minutes,
            completed: false,
            notes: None,
            subject: None,
            created_at: None,
            updated_at: None,
        };

        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> RevisionEventBuilder {
        RevisionEventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.subject_id <= 0 {
            return Err(EventValidationError::MissingSubject);
        }

        if self.duration_minutes == 0 {
            return Err(EventValidationError::ZeroDuration);
        }

        Ok(())
    }

    /// The subject name and color to display for this event.
    /// Falls back to the "Unknown Subject" sentinel when the join is absent.
    pub fn subject_display(&self) -> SubjectDisplay {
        self.subject.clone().unwrap_or_else(SubjectDisplay::unknown)
    }
}

/// Validation errors for RevisionEvent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    MissingSubject,
    MissingDate,
    MissingTime,
    ZeroDuration,
}

impl std::fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSubject => write!(f, "A subject must be selected for the session"),
            Self::MissingDate => write!(f, "Session date is required"),
            Self::MissingTime => write!(f, "Session start time is required"),
            Self::ZeroDuration => write!(f, "Session duration must be a positive number of minutes"),
        }
    }
}

impl std::error::Error for EventValidationError {}

/// Builder for creating revision events with optional fields
pub struct RevisionEventBuilder {
    subject_id: Option<i64>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    duration_minutes: u32,
    completed: bool,
    notes: Option<String>,
}

impl RevisionEventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self {
            subject_id: None,
            date: None,
            time: None,
            duration_minutes: 60,
            completed: false,
            notes: None,
        }
    }

    /// Set the subject the session belongs to
    pub fn subject_id(mut self, subject_id: i64) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    /// Set the session date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the start time of day
    pub fn time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the session length in minutes
    pub fn duration_minutes(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    /// Mark the session completed
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Attach free-text notes. Blank notes are normalized to `None`.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Build the event
    pub fn build(self) -> Result<RevisionEvent, EventValidationError> {
        let subject_id = self.subject_id.ok_or(EventValidationError::MissingSubject)?;
        let date = self.date.ok_or(EventValidationError::MissingDate)?;
        let time = self.time.ok_or(EventValidationError::MissingTime)?;

        let event = RevisionEvent {
            id: None,
            subject_id,
            date,
            time,
            duration_minutes: self.duration_minutes,
            completed: self.completed,
            notes: self.notes,
            subject: None,
            created_at: None,
            updated_at: None,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for RevisionEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
