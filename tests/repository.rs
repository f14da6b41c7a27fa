use chrono::NaiveDate;
use classmate::domain::class::ValidatedSchedule;
use classmate::domain::note::{NewNote, NoteUpdate};
use classmate::domain::types::{ClassCategory, ClassId, MeetingDay, NoteContent};
use classmate::repository::{ClassListQuery, ClassReader, ClassWriter, NoteReader, NoteWriter};
use classmate::schedule::validator::{MeetingInput, validate};
use classmate::schema::class_meetings;
use diesel::prelude::*;
use serde_json::json;

mod common;

fn schedule(title: &str, category: &str, meetings: &[(&str, &str, &str)]) -> ValidatedSchedule {
    let meetings: Vec<MeetingInput> = meetings
        .iter()
        .map(|(day, start, end)| MeetingInput::new(day, start, end))
        .collect();
    validate(title, Some(category), &meetings).expect("valid schedule")
}

fn note(class: &classmate::domain::class::ClassRecord, day: u32, text: &str) -> NewNote {
    NewNote {
        class_id: class.id,
        class_title: class.title.clone(),
        class_date: NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date"),
        content: NoteContent::new(json!({"type": "doc", "text": text})).expect("object"),
    }
}

#[test]
fn create_class_stores_meetings_in_submission_order() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let created = repo
        .create_class(&schedule(
            "Biology",
            "Lecture",
            &[
                ("friday", "09:00", "10:00"),
                ("Monday", "14:00", "15:30"),
                ("wednesday", "14:00", "15:30"),
            ],
        ))
        .expect("should create class");

    assert_eq!(created.title, "Biology");
    assert_eq!(created.category, ClassCategory::Lecture);
    let days: Vec<MeetingDay> = created.slots().map(|slot| slot.day).collect();
    assert_eq!(
        days,
        [MeetingDay::Friday, MeetingDay::Monday, MeetingDay::Wednesday]
    );

    let loaded = repo
        .get_class_by_id(created.id)
        .expect("should load class")
        .expect("class should exist");
    assert_eq!(loaded, created);
}

#[test]
fn list_classes_is_newest_first_and_filters_by_category() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    repo.create_class(&schedule("Biology", "lecture", &[("monday", "10:00", "11:00")]))
        .expect("should create class");
    repo.create_class(&schedule("Chemistry", "lab", &[("tuesday", "13:00", "15:00")]))
        .expect("should create class");
    repo.create_class(&schedule("Physics", "lecture", &[("monday", "10:30", "11:30")]))
        .expect("should create class");

    let (total, classes) = repo
        .list_classes(ClassListQuery::default())
        .expect("should list classes");
    assert_eq!(total, 3);
    let titles: Vec<&str> = classes.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Physics", "Chemistry", "Biology"]);
    assert!(classes.iter().all(|c| c.meetings.len() == 1));

    let (total, lectures) = repo
        .list_classes(
            ClassListQuery::default()
                .category(ClassCategory::Lecture)
                .paginate(2, 1),
        )
        .expect("should list lectures");
    assert_eq!(total, 2);
    assert_eq!(lectures.len(), 1);
    assert_eq!(lectures[0].title, "Biology");
}

#[test]
fn list_classes_past_the_last_page_is_empty() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    repo.create_class(&schedule("Biology", "lecture", &[("monday", "10:00", "11:00")]))
        .expect("should create class");

    for page in [2, usize::MAX / 2, usize::MAX] {
        let (total, classes) = repo
            .list_classes(ClassListQuery::default().paginate(page, 50))
            .expect("should list classes");
        assert_eq!(total, 1);
        assert!(classes.is_empty());
    }
}

#[test]
fn replace_class_swaps_the_meeting_list() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let created = repo
        .create_class(&schedule(
            "Biology",
            "lecture",
            &[("monday", "10:00", "11:00"), ("wednesday", "10:00", "11:00")],
        ))
        .expect("should create class");

    let replaced = repo
        .replace_class(
            created.id,
            &schedule("Biology II", "seminar", &[("thursday", "16:00", "17:15")]),
        )
        .expect("should replace class")
        .expect("class should exist");

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.created_at, created.created_at);
    assert_eq!(replaced.title, "Biology II");
    assert_eq!(replaced.category, ClassCategory::Seminar);
    assert_eq!(replaced.meetings.len(), 1);
    assert_eq!(replaced.meetings[0].slot.day, MeetingDay::Thursday);

    let mut conn = test_db.conn();
    let stored: i64 = class_meetings::table
        .filter(class_meetings::class_id.eq(created.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("should count meetings");
    assert_eq!(stored, 1);

    let missing = repo
        .replace_class(
            ClassId::new(999).expect("valid id"),
            &schedule("Ghost", "lab", &[("monday", "10:00", "11:00")]),
        )
        .expect("should run replace");
    assert!(missing.is_none());
}

#[test]
fn delete_class_removes_meetings_and_notes() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let biology = repo
        .create_class(&schedule("Biology", "lecture", &[("monday", "10:00", "11:00")]))
        .expect("should create class");
    let chemistry = repo
        .create_class(&schedule("Chemistry", "lab", &[("tuesday", "13:00", "15:00")]))
        .expect("should create class");
    let stale = repo
        .create_note(&note(&biology, 10, "cells"))
        .expect("should create note");
    let kept = repo
        .create_note(&note(&chemistry, 11, "titration"))
        .expect("should create note");

    assert_eq!(repo.delete_class(biology.id).expect("should delete"), 1);
    assert_eq!(repo.delete_class(biology.id).expect("should delete"), 0);

    assert!(repo.get_class_by_id(biology.id).expect("lookup").is_none());
    assert!(repo.get_note_by_id(stale.id).expect("lookup").is_none());
    assert!(repo.get_note_by_id(kept.id).expect("lookup").is_some());

    let mut conn = test_db.conn();
    let orphans: i64 = class_meetings::table
        .filter(class_meetings::class_id.eq(biology.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("should count meetings");
    assert_eq!(orphans, 0);
}

#[test]
fn notes_crud() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let biology = repo
        .create_class(&schedule("Biology", "lecture", &[("monday", "10:00", "11:00")]))
        .expect("should create class");

    let first = repo
        .create_note(&note(&biology, 10, "cells"))
        .expect("should create note");
    let second = repo
        .create_note(&note(&biology, 12, "mitosis"))
        .expect("should create note");
    assert_eq!(first.class_title, "Biology");

    let listed = repo.list_notes(biology.id).expect("should list notes");
    let ids: Vec<_> = listed.iter().map(|n| n.id).collect();
    assert_eq!(ids, [second.id, first.id]);

    let content = NoteContent::new(json!({"type": "doc", "text": "meiosis"})).expect("object");
    let updated = repo
        .update_note(
            second.id,
            &NoteUpdate {
                content: Some(content.clone()),
                class_date: None,
            },
        )
        .expect("should update note")
        .expect("note should exist");
    assert_eq!(updated.content, content);
    assert_eq!(updated.class_date, second.class_date);
    assert!(updated.updated_at >= second.updated_at);

    assert_eq!(repo.delete_note(first.id).expect("should delete"), 1);
    assert_eq!(repo.list_notes(biology.id).expect("list").len(), 1);
}

#[test]
fn list_all_notes_spans_classes_newest_first() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let biology = repo
        .create_class(&schedule("Biology", "lecture", &[("monday", "10:00", "11:00")]))
        .expect("should create class");
    let chemistry = repo
        .create_class(&schedule("Chemistry", "lab", &[("tuesday", "13:00", "15:00")]))
        .expect("should create class");

    let first = repo
        .create_note(&note(&biology, 10, "cells"))
        .expect("should create note");
    let second = repo
        .create_note(&note(&chemistry, 11, "titration"))
        .expect("should create note");

    let ids: Vec<_> = repo
        .list_all_notes()
        .expect("should list notes")
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, [second.id, first.id]);
}
