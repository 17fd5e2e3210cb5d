// Exam module
// A scheduled exam with a derived day countdown

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::subject::SubjectDisplay;
use crate::utils::date::days_until;

/// A scheduled exam tied to a subject.
///
/// Unlike revision events, exams carry their own name ("Paper 1") and have no
/// completion flag. The day countdown is derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: Option<i64>,
    pub subject_id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    /// Subject name and color joined in on reads
    pub subject: Option<SubjectDisplay>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Exam {
    /// Create a new exam with required fields
    pub fn new(
        subject_id: i64,
        name: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
    ) -> Result<Self, ExamValidationError> {
        let exam = Self {
            id: None,
            subject_id,
            name: name.into(),
            date,
            time,
            duration_minutes,
            subject: None,
            created_at: None,
            updated_at: None,
        };

        exam.validate()?;
        Ok(exam)
    }

    /// Validate the exam
    pub fn validate(&self) -> Result<(), ExamValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExamValidationError::EmptyName);
        }

        if self.subject_id <= 0 {
            return Err(ExamValidationError::MissingSubject);
        }

        if self.duration_minutes == 0 {
            return Err(ExamValidationError::ZeroDuration);
        }

        Ok(())
    }

    /// Whole calendar days from today until the exam date.
    ///
    /// Recomputed from the wall clock on every call; 0 on exam day, negative
    /// once the date has passed.
    pub fn days_remaining(&self) -> i64 {
        days_until(self.date)
    }

    /// The subject name and color to display for this exam.
    pub fn subject_display(&self) -> SubjectDisplay {
        self.subject.clone().unwrap_or_else(SubjectDisplay::unknown)
    }
}

/// Validation errors for Exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamValidationError {
    EmptyName,
    MissingSubject,
    ZeroDuration,
}

impl std::fmt::Display for ExamValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Exam name cannot be empty"),
            Self::MissingSubject => write!(f, "A subject must be selected for the exam"),
            Self::ZeroDuration => write!(f, "Exam duration must be a positive number of minutes"),
        }
    }
}

impl std::error::Error for ExamValidationError {}
