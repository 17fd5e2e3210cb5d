//! Subject service for CRUD operations on study subjects.
//!
//! Subjects are the registry that events and exams reference by id. Deleting
//! a subject leaves those references dangling on purpose; the display layer
//! resolves them to the "Unknown Subject" sentinel.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::subject::Subject;

/// Service for managing subjects stored in SQLite.
pub struct SubjectService<'a> {
    conn: &'a Connection,
}

impl<'a> SubjectService<'a> {
    /// Create a new SubjectService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new subject.
    pub fn create(&self, subject: Subject) -> Result<Subject> {
        subject.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

        self.conn
            .execute(
                "INSERT INTO subjects (name, color) VALUES (?1, ?2)",
                params![subject.name.trim(), subject.color],
            )
            .context("Failed to insert subject")?;

        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)
    }

    /// Get a subject by ID.
    pub fn get_by_id(&self, id: i64) -> Result<Subject> {
        let subject = self
            .conn
            .query_row(
                "SELECT id, name, color FROM subjects WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Subject {
                        id: Some(row.get(0)?),
                        name: row.get(1)?,
                        color: row.get(2)?,
                    })
                },
            )
            .context("Subject not found")?;

        Ok(subject)
    }

    /// Get all subjects ordered by name.
    pub fn list_all(&self) -> Result<Vec<Subject>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM subjects ORDER BY name ASC")?;

        let subjects = stmt.query_map([], |row| {
            Ok(Subject {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                color: row.get(2)?,
            })
        })?;

        subjects
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch subjects")
    }

    /// Update an existing subject's name and color.
    pub fn update(&self, subject: &Subject) -> Result<Subject> {
        subject.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

        let id = subject
            .id
            .ok_or_else(|| anyhow::anyhow!("Subject ID is required for update"))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE subjects SET name = ?1, color = ?2 WHERE id = ?3",
                params![subject.name.trim(), subject.color, id],
            )
            .context("Failed to update subject")?;

        if rows_affected == 0 {
            return Err(anyhow::anyhow!("Subject with id {} not found", id));
        }

        self.get_by_id(id)
    }

    /// Delete a subject by ID.
    ///
    /// Events and exams referencing the subject are untouched; they render
    /// as "Unknown Subject" afterwards.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM subjects WHERE id = ?1", params![id])
            .context("Failed to delete subject")?;

        if rows_affected == 0 {
            return Err(anyhow::anyhow!("Subject with id {} not found", id));
        }

        Ok(())
    }
}
