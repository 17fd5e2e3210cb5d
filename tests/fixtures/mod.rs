// Test fixtures - reusable test data
// Provides consistent dates, times, and seeded databases across test files

use chrono::{NaiveDate, NaiveTime};

use study_calendar::services::database::Database;

/// Shorthand for building a calendar date in tests.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Shorthand for building a time of day in tests.
pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// An in-memory database with the full schema applied.
pub fn fresh_db() -> Database {
    let db = Database::in_memory().expect("in-memory database");
    db.initialize_schema().expect("schema initialization");
    db
}
