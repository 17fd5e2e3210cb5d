use super::shared::map_event_row;
use super::EventService;
use crate::models::event::RevisionEvent;
use anyhow::Result;
use chrono::NaiveDate;

impl<'a> EventService<'a> {
    /// List every event with its subject joined in, ordered by date then time.
    pub fn list_all(&self) -> Result<Vec<RevisionEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.subject_id, e.date, e.time, e.duration_minutes,
                    e.completed, e.notes, e.created_at, e.updated_at,
                    s.name, s.color
             FROM revision_events e
             LEFT JOIN subjects s ON s.id = e.subject_id
             ORDER BY e.date ASC, e.time ASC",
        )?;

        let events = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// List the events on a single date, ordered by time.
    pub fn list_for_date(&self, date: NaiveDate) -> Result<Vec<RevisionEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.subject_id, e.date, e.time, e.duration_minutes,
                    e.completed, e.notes, e.created_at, e.updated_at,
                    s.name, s.color
             FROM revision_events e
             LEFT JOIN subjects s ON s.id = e.subject_id
             WHERE e.date = ?
             ORDER BY e.time ASC",
        )?;

        let events = stmt
            .query_map([date.format("%Y-%m-%d").to_string()], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// List the events in an inclusive date range, ordered by date then time.
    pub fn list_for_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RevisionEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.subject_id, e.date, e.time, e.duration_minutes,
                    e.completed, e.notes, e.created_at, e.updated_at,
                    s.name, s.color
             FROM revision_events e
             LEFT JOIN subjects s ON s.id = e.subject_id
             WHERE e.date >= ? AND e.date <= ?
             ORDER BY e.date ASC, e.time ASC",
        )?;

        let events = stmt
            .query_map(
                [
                    start.format("%Y-%m-%d").to_string(),
                    end.format("%Y-%m-%d").to_string(),
                ],
                map_event_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}
