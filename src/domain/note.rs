use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClassId, ClassTitle, NoteContent, NoteId};

/// Editor document written for one session of a class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub class_id: ClassId,
    /// Title of the class at the time the note was written.
    pub class_title: ClassTitle,
    pub class_date: NaiveDate,
    pub content: NoteContent,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Note`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub class_id: ClassId,
    pub class_title: ClassTitle,
    pub class_date: NaiveDate,
    pub content: NoteContent,
}

/// Changes applied to an existing [`Note`]. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteUpdate {
    pub content: Option<NoteContent>,
    pub class_date: Option<NaiveDate>,
}
