use super::EventService;
use crate::models::event::RevisionEvent;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

use super::shared::map_event_row;

impl<'a> EventService<'a> {
    /// Create a new revision event and return it with the subject joined in.
    pub fn create(&self, event: RevisionEvent) -> Result<RevisionEvent> {
        event.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO revision_events (
                    subject_id, date, time, duration_minutes, completed, notes,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.subject_id,
                    event.date.format("%Y-%m-%d").to_string(),
                    event.time.format("%H:%M").to_string(),
                    event.duration_minutes,
                    event.completed as i32,
                    event.notes,
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert revision event")?;

        let id = self.conn.last_insert_rowid();
        self.get(id)?
            .ok_or_else(|| anyhow!("Inserted event with id {} not found", id))
    }

    /// Retrieve an event by ID, subject joined in.
    pub fn get(&self, id: i64) -> Result<Option<RevisionEvent>> {
        let result = self.conn.query_row(
            "SELECT e.id, e.subject_id, e.date, e.time, e.duration_minutes,
                    e.completed, e.notes, e.created_at, e.updated_at,
                    s.name, s.color
             FROM revision_events e
             LEFT JOIN subjects s ON s.id = e.subject_id
             WHERE e.id = ?",
            [id],
            map_event_row,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing event and return the post-mutation record.
    pub fn update(&self, event: &RevisionEvent) -> Result<RevisionEvent> {
        let id = event
            .id
            .ok_or_else(|| anyhow!("Event ID is required for update"))?;
        event.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE revision_events SET
                    subject_id = ?, date = ?, time = ?, duration_minutes = ?,
                    completed = ?, notes = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    event.subject_id,
                    event.date.format("%Y-%m-%d").to_string(),
                    event.time.format("%H:%M").to_string(),
                    event.duration_minutes,
                    event.completed as i32,
                    event.notes,
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .context("Failed to update revision event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        self.get(id)?
            .ok_or_else(|| anyhow!("Updated event with id {} not found", id))
    }

    /// Flip an event's completion flag and return the post-mutation record.
    pub fn toggle_completion(&self, id: i64) -> Result<RevisionEvent> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE revision_events SET completed = 1 - completed, updated_at = ?
                 WHERE id = ?",
                params![Local::now().to_rfc3339(), id],
            )
            .context("Failed to toggle event completion")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        self.get(id)?
            .ok_or_else(|| anyhow!("Toggled event with id {} not found", id))
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM revision_events WHERE id = ?", [id])
            .context("Failed to delete revision event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }
}
