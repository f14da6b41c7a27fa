use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::note::{NewNote as DomainNewNote, Note as DomainNote};
use crate::domain::types::{ClassTitle, NoteContent, TypeConstraintError};
use crate::models::class::Class;

/// Diesel model representing a row in the `notes` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Class))]
#[diesel(table_name = crate::schema::notes)]
pub struct Note {
    pub id: i32,
    pub class_id: i32,
    pub class_title: String,
    pub class_date: NaiveDate,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Note`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::notes)]
pub struct NewNote<'a> {
    pub class_id: i32,
    pub class_title: &'a str,
    pub class_date: NaiveDate,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Note`]; `None` columns are left untouched.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::notes)]
pub struct NoteChangeset {
    pub content: Option<String>,
    pub class_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Note> for DomainNote {
    type Error = TypeConstraintError;

    fn try_from(note: Note) -> Result<Self, Self::Error> {
        Ok(Self {
            id: note.id.try_into()?,
            class_id: note.class_id.try_into()?,
            class_title: ClassTitle::new(note.class_title)?,
            class_date: note.class_date,
            content: NoteContent::parse(&note.content)?,
            created_at: note.created_at,
            updated_at: note.updated_at,
        })
    }
}

impl<'a> NewNote<'a> {
    pub fn from_domain(note: &'a DomainNewNote, now: NaiveDateTime) -> Self {
        Self {
            class_id: note.class_id.get(),
            class_title: note.class_title.as_str(),
            class_date: note.class_date,
            content: note.content.to_json_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
