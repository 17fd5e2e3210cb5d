use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_subjects_table(conn)?;
    create_revision_events_table(conn)?;
    run_event_migrations(conn)?;
    create_exams_table(conn)?;
    create_upcoming_exams_view(conn)?;
    Ok(())
}

fn create_subjects_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            color TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create subjects table")?;

    Ok(())
}

// subject_id carries no FK constraint: deleting a subject must leave its
// events in place, rendered as "Unknown Subject".
fn create_revision_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS revision_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create revision_events table")?;

    Ok(())
}

fn run_event_migrations(conn: &Connection) -> Result<()> {
    // Databases created before session notes shipped lack the column.
    migrations::ensure_column(
        conn,
        "revision_events",
        "notes",
        "ALTER TABLE revision_events ADD COLUMN notes TEXT",
    )?;

    Ok(())
}

fn create_exams_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS exams (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create exams table")?;

    Ok(())
}

// The store-side notion of "upcoming": today or later by the store's local
// clock, pre-joined and pre-sorted.
fn create_upcoming_exams_view(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE VIEW IF NOT EXISTS upcoming_exams AS
         SELECT e.id, e.subject_id, e.name, e.date, e.time, e.duration_minutes,
                e.created_at, e.updated_at, s.name AS subject_name, s.color AS subject_color
         FROM exams e
         LEFT JOIN subjects s ON s.id = e.subject_id
         WHERE e.date >= date('now', 'localtime')
         ORDER BY e.date ASC, e.time ASC",
        [],
    )
    .context("Failed to create upcoming_exams view")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_creates_all_tables_and_view() {
        let conn = setup();
        assert!(table_exists(&conn, "subjects"));
        assert!(table_exists(&conn, "revision_events"));
        assert!(table_exists(&conn, "exams"));
        assert!(table_exists(&conn, "upcoming_exams"));
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let conn = setup();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        assert!(table_exists(&conn, "revision_events"));
    }

    #[test]
    fn test_notes_column_added_to_legacy_table() {
        let conn = Connection::open_in_memory().unwrap();

        // Simulate a database created before the notes column existed
        conn.execute(
            "CREATE TABLE revision_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();

        assert!(migrations::column_exists(&conn, "revision_events", "notes").unwrap());
    }

    #[test]
    fn test_completed_defaults_to_false() {
        let conn = setup();
        conn.execute(
            "INSERT INTO revision_events (subject_id, date, time, duration_minutes)
             VALUES (1, '2024-06-10', '09:00', 60)",
            [],
        )
        .unwrap();

        let completed: i64 = conn
            .query_row("SELECT completed FROM revision_events", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(completed, 0);
    }

    #[test]
    fn test_upcoming_exams_view_filters_past_dates() {
        let conn = setup();
        conn.execute(
            "INSERT INTO exams (subject_id, name, date, time, duration_minutes)
             VALUES (1, 'Old Paper', '2000-01-01', '09:00', 90)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO exams (subject_id, name, date, time, duration_minutes)
             VALUES (1, 'Far Future Paper', '2999-01-01', '09:00', 90)",
            [],
        )
        .unwrap();

        let names: Vec<String> = conn
            .prepare("SELECT name FROM upcoming_exams")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(names, vec!["Far Future Paper".to_string()]);
    }
}
