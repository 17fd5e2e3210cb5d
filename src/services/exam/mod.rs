//! Exam service for CRUD operations on scheduled exams.
//!
//! Reads join the subject's name and color; `list_upcoming` goes through the
//! `upcoming_exams` view, which applies the store's own notion of "today".

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use rusqlite::{self, params, Connection, Row};

use crate::models::exam::Exam;
use crate::models::subject::SubjectDisplay;

/// Service for managing exams stored in SQLite.
pub struct ExamService<'a> {
    conn: &'a Connection,
}

impl<'a> ExamService<'a> {
    /// Create a new ExamService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new exam and return it with the subject joined in.
    pub fn create(&self, exam: Exam) -> Result<Exam> {
        exam.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO exams (
                    subject_id, name, date, time, duration_minutes, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    exam.subject_id,
                    exam.name.trim(),
                    exam.date.format("%Y-%m-%d").to_string(),
                    exam.time.format("%H:%M").to_string(),
                    exam.duration_minutes,
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert exam")?;

        let id = self.conn.last_insert_rowid();
        self.get(id)?
            .ok_or_else(|| anyhow!("Inserted exam with id {} not found", id))
    }

    /// Retrieve an exam by ID, subject joined in.
    pub fn get(&self, id: i64) -> Result<Option<Exam>> {
        let result = self.conn.query_row(
            "SELECT e.id, e.subject_id, e.name, e.date, e.time, e.duration_minutes,
                    e.created_at, e.updated_at, s.name, s.color
             FROM exams e
             LEFT JOIN subjects s ON s.id = e.subject_id
             WHERE e.id = ?",
            [id],
            map_exam_row,
        );

        match result {
            Ok(exam) => Ok(Some(exam)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every exam with its subject joined in, ordered by date then time.
    pub fn list_all(&self) -> Result<Vec<Exam>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.subject_id, e.name, e.date, e.time, e.duration_minutes,
                    e.created_at, e.updated_at, s.name, s.color
             FROM exams e
             LEFT JOIN subjects s ON s.id = e.subject_id
             ORDER BY e.date ASC, e.time ASC",
        )?;

        let exams = stmt
            .query_map([], map_exam_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(exams)
    }

    /// List the exams on a single date, ordered by time.
    pub fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Exam>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.subject_id, e.name, e.date, e.time, e.duration_minutes,
                    e.created_at, e.updated_at, s.name, s.color
             FROM exams e
             LEFT JOIN subjects s ON s.id = e.subject_id
             WHERE e.date = ?
             ORDER BY e.time ASC",
        )?;

        let exams = stmt
            .query_map([date.format("%Y-%m-%d").to_string()], map_exam_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(exams)
    }

    /// List the exams in an inclusive date range, ordered by date then time.
    pub fn list_for_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Exam>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.subject_id, e.name, e.date, e.time, e.duration_minutes,
                    e.created_at, e.updated_at, s.name, s.color
             FROM exams e
             LEFT JOIN subjects s ON s.id = e.subject_id
             WHERE e.date >= ? AND e.date <= ?
             ORDER BY e.date ASC, e.time ASC",
        )?;

        let exams = stmt
            .query_map(
                [
                    start.format("%Y-%m-%d").to_string(),
                    end.format("%Y-%m-%d").to_string(),
                ],
                map_exam_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(exams)
    }

    /// List exams dated today or later through the `upcoming_exams` view.
    pub fn list_upcoming(&self) -> Result<Vec<Exam>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, subject_id, name, date, time, duration_minutes,
                    created_at, updated_at, subject_name, subject_color
             FROM upcoming_exams",
        )?;

        let exams = stmt
            .query_map([], map_exam_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(exams)
    }

    /// Update an existing exam and return the post-mutation record.
    pub fn update(&self, exam: &Exam) -> Result<Exam> {
        let id = exam
            .id
            .ok_or_else(|| anyhow!("Exam ID is required for update"))?;
        exam.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE exams SET
                    subject_id = ?, name = ?, date = ?, time = ?, duration_minutes = ?,
                    updated_at = ?
                 WHERE id = ?",
                params![
                    exam.subject_id,
                    exam.name.trim(),
                    exam.date.format("%Y-%m-%d").to_string(),
                    exam.time.format("%H:%M").to_string(),
                    exam.duration_minutes,
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .context("Failed to update exam")?;

        if rows_affected == 0 {
            return Err(anyhow!("Exam with id {} not found", id));
        }

        self.get(id)?
            .ok_or_else(|| anyhow!("Updated exam with id {} not found", id))
    }

    /// Delete an exam by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM exams WHERE id = ?", [id])
            .context("Failed to delete exam")?;

        if rows_affected == 0 {
            return Err(anyhow!("Exam with id {} not found", id));
        }

        Ok(())
    }
}

fn map_exam_row(row: &Row<'_>) -> rusqlite::Result<Exam> {
    let subject_name: Option<String> = row.get(8)?;
    let subject_color: Option<String> = row.get(9)?;
    let subject = match (subject_name, subject_color) {
        (Some(name), Some(color)) => Some(SubjectDisplay { name, color }),
        _ => None,
    };

    Ok(Exam {
        id: Some(row.get(0)?),
        subject_id: row.get(1)?,
        name: row.get(2)?,
        date: parse_date(row.get::<_, String>(3)?)?,
        time: parse_time(row.get::<_, String>(4)?)?,
        duration_minutes: row.get(5)?,
        subject,
        created_at: Some(parse_timestamp(row.get::<_, String>(6)?)?),
        updated_at: Some(parse_timestamp(row.get::<_, String>(7)?)?),
    })
}

fn parse_date(value: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn parse_time(value: String) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(&value, "%H:%M")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn parse_timestamp(value: String) -> rusqlite::Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
