//! Revision event service entry point.
//! Database-backed CRUD and date-scoped queries, with the subject's name and
//! color joined onto every read, organized across focused submodules.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing revision events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::RevisionEvent;
    use crate::models::subject::Subject;
    use crate::services::database::Database;
    use crate::services::subject::SubjectService;
    use chrono::{Datelike, NaiveDate, NaiveTime};

    fn setup_test_db() -> Database {
        let db = Database::in_memory().unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn seed_subject(db: &Database, name: &str) -> i64 {
        let service = SubjectService::new(db.connection());
        service
            .create(Subject::new(name, "#3B82F6"))
            .unwrap()
            .id
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_event(subject_id: i64) -> RevisionEvent {
        RevisionEvent::new(subject_id, date(2024, 6, 10), time(9, 0), 60).unwrap()
    }

    #[test]
    fn test_create_event() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let created = service.create(sample_event(subject_id)).unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.subject_id, subject_id);
        assert!(!created.completed);
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());
    }

    #[test]
    fn test_create_joins_subject() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let created = service.create(sample_event(subject_id)).unwrap();

        let subject = created.subject.expect("subject should be joined");
        assert_eq!(subject.name, "Maths");
        assert_eq!(subject.color, "#3B82F6");
    }

    #[test]
    fn test_create_with_notes() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let event = RevisionEvent::builder()
            .subject_id(subject_id)
            .date(date(2024, 6, 10))
            .time(time(14, 30))
            .duration_minutes(45)
            .notes("Integration by parts")
            .build()
            .unwrap();

        let created = service.create(event).unwrap();
        assert_eq!(created.notes, Some("Integration by parts".to_string()));
        assert_eq!(created.duration_minutes, 45);
    }

    #[test]
    fn test_create_rejects_zero_duration() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let mut event = sample_event(subject_id);
        event.duration_minutes = 0;

        assert!(service.create(event).is_err());
    }

    #[test]
    fn test_get_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let result = service.get(999);
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_update_event() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let mut event = service.create(sample_event(subject_id)).unwrap();
        event.time = time(16, 0);
        event.notes = Some("Moved to the afternoon".to_string());

        let updated = service.update(&event).unwrap();
        assert_eq!(updated.time, time(16, 0));
        assert_eq!(updated.notes, Some("Moved to the afternoon".to_string()));
    }

    #[test]
    fn test_update_nonexistent_event() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let mut event = sample_event(subject_id);
        event.id = Some(999);

        assert!(service.update(&event).is_err());
    }

    #[test]
    fn test_toggle_completion() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let created = service.create(sample_event(subject_id)).unwrap();
        let id = created.id.unwrap();
        assert!(!created.completed);

        let toggled = service.toggle_completion(id).unwrap();
        assert!(toggled.completed);

        // Joined fields survive the toggle
        assert_eq!(toggled.subject.unwrap().name, "Maths");
    }

    #[test]
    fn test_toggle_completion_twice_round_trips() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let created = service.create(sample_event(subject_id)).unwrap();
        let id = created.id.unwrap();

        service.toggle_completion(id).unwrap();
        let restored = service.toggle_completion(id).unwrap();
        assert_eq!(restored.completed, created.completed);
    }

    #[test]
    fn test_toggle_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        assert!(service.toggle_completion(999).is_err());
    }

    #[test]
    fn test_delete_event() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let created = service.create(sample_event(subject_id)).unwrap();
        let id = created.id.unwrap();

        service.delete(id).unwrap();
        assert!(service.get(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        assert!(service.delete(999).is_err());
    }

    #[test]
    fn test_list_all_ordered_by_date_then_time() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        service
            .create(RevisionEvent::new(subject_id, date(2024, 6, 11), time(8, 0), 60).unwrap())
            .unwrap();
        service
            .create(RevisionEvent::new(subject_id, date(2024, 6, 10), time(19, 0), 60).unwrap())
            .unwrap();
        service
            .create(RevisionEvent::new(subject_id, date(2024, 6, 10), time(9, 0), 60).unwrap())
            .unwrap();

        let events = service.list_all().unwrap();
        let order: Vec<(NaiveDate, NaiveTime)> =
            events.iter().map(|e| (e.date, e.time)).collect();
        assert_eq!(
            order,
            vec![
                (date(2024, 6, 10), time(9, 0)),
                (date(2024, 6, 10), time(19, 0)),
                (date(2024, 6, 11), time(8, 0)),
            ]
        );
    }

    #[test]
    fn test_list_for_date() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        service.create(sample_event(subject_id)).unwrap();
        service
            .create(RevisionEvent::new(subject_id, date(2024, 6, 11), time(9, 0), 60).unwrap())
            .unwrap();

        let events = service.list_for_date(date(2024, 6, 10)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(2024, 6, 10));
    }

    #[test]
    fn test_list_for_date_empty() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let events = service.list_for_date(date(2024, 6, 10)).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_list_for_range_is_inclusive() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        for day in [9, 10, 15, 16] {
            service
                .create(RevisionEvent::new(subject_id, date(2024, 6, day), time(9, 0), 60).unwrap())
                .unwrap();
        }

        let events = service
            .list_for_range(date(2024, 6, 9), date(2024, 6, 15))
            .unwrap();
        let days: Vec<u32> = events.iter().map(|e| e.date.day()).collect();
        assert_eq!(days, vec![9, 10, 15]);
    }

    #[test]
    fn test_dangling_subject_reads_without_join() {
        let db = setup_test_db();
        let subject_id = seed_subject(&db, "Maths");
        let service = EventService::new(db.connection());

        let created = service.create(sample_event(subject_id)).unwrap();

        SubjectService::new(db.connection())
            .delete(subject_id)
            .unwrap();

        let event = service.get(created.id.unwrap()).unwrap().unwrap();
        assert!(event.subject.is_none());
        assert_eq!(event.subject_display().name, "Unknown Subject");
    }
}
