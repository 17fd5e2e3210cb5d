//! Mutation commands for the calendar view-model.
//!
//! Every command validates locally first, then confirms the mutation with
//! the store before touching the snapshot. A gateway failure is logged and
//! leaves the snapshot exactly as it was.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use super::RevisionCalendar;
use crate::models::event::RevisionEvent;
use crate::models::subject::Subject;
use crate::services::event::EventService;
use crate::services::subject::SubjectService;

/// Why a view-model command did not change anything.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Rejected locally before any store call was issued
    #[error("{0}")]
    Validation(String),
    /// The store reported a failure; the snapshot is unchanged
    #[error(transparent)]
    Gateway(#[from] anyhow::Error),
}

impl RevisionCalendar {
    /// Create a subject and append it to the loaded registry.
    pub fn add_subject(&mut self, name: &str, color: &str) -> Result<Subject, CommandError> {
        let subject = Subject::new(name, color);
        subject
            .validate()
            .map_err(|e| CommandError::Validation(e.to_string()))?;

        match SubjectService::new(self.db.connection()).create(subject) {
            Ok(created) => {
                self.subjects.push(created.clone());
                Ok(created)
            }
            Err(e) => {
                log::error!("Failed to add subject: {:#}", e);
                Err(CommandError::Gateway(e))
            }
        }
    }

    /// Schedule a revision session and append it to the week's events.
    pub fn add_event(
        &mut self,
        subject_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
        notes: Option<String>,
    ) -> Result<RevisionEvent, CommandError> {
        let mut builder = RevisionEvent::builder()
            .subject_id(subject_id)
            .date(date)
            .time(time)
            .duration_minutes(duration_minutes);
        if let Some(notes) = notes {
            builder = builder.notes(notes);
        }
        let event = builder
            .build()
            .map_err(|e| CommandError::Validation(e.to_string()))?;

        match EventService::new(self.db.connection()).create(event) {
            Ok(created) => {
                self.events.push(created.clone());
                Ok(created)
            }
            Err(e) => {
                log::error!("Failed to add event: {:#}", e);
                Err(CommandError::Gateway(e))
            }
        }
    }

    /// Flip a session's completion flag, replacing the cached record with
    /// the store's post-mutation version.
    pub fn toggle_event_completion(
        &mut self,
        event_id: i64,
    ) -> Result<RevisionEvent, CommandError> {
        match EventService::new(self.db.connection()).toggle_completion(event_id) {
            Ok(updated) => {
                if let Some(slot) = self.events.iter_mut().find(|e| e.id == Some(event_id)) {
                    *slot = updated.clone();
                }
                Ok(updated)
            }
            Err(e) => {
                log::error!("Failed to toggle completion of event {}: {:#}", event_id, e);
                Err(CommandError::Gateway(e))
            }
        }
    }

    /// Delete a session and drop it from the cache.
    pub fn delete_event(&mut self, event_id: i64) -> Result<(), CommandError> {
        match EventService::new(self.db.connection()).delete(event_id) {
            Ok(()) => {
                self.events.retain(|e| e.id != Some(event_id));
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete event {}: {:#}", event_id, e);
                Err(CommandError::Gateway(e))
            }
        }
    }
}
