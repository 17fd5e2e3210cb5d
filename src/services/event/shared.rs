use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use rusqlite::{self, Result, Row};

use crate::models::event::RevisionEvent;
use crate::models::subject::SubjectDisplay;

pub(crate) fn to_naive_date(value: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn to_naive_time(value: String) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(&value, "%H:%M")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Maps a row of the joined event select:
/// id, subject_id, date, time, duration_minutes, completed, notes,
/// created_at, updated_at, subject name, subject color.
pub(crate) fn map_event_row(row: &Row<'_>) -> Result<RevisionEvent> {
    let subject_name: Option<String> = row.get(9)?;
    let subject_color: Option<String> = row.get(10)?;
    let subject = match (subject_name, subject_color) {
        (Some(name), Some(color)) => Some(SubjectDisplay { name, color }),
        _ => None,
    };

    Ok(RevisionEvent {
        id: Some(row.get(0)?),
        subject_id: row.get(1)?,
        date: to_naive_date(row.get::<_, String>(2)?)?,
        time: to_naive_time(row.get::<_, String>(3)?)?,
        duration_minutes: row.get(4)?,
        completed: row.get::<_, i32>(5)? != 0,
        notes: row.get(6)?,
        subject,
        created_at: Some(to_local_datetime(row.get::<_, String>(7)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
    })
}
