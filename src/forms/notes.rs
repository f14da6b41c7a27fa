use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::class::ClassRecord;
use crate::domain::note::{NewNote, NoteUpdate};
use crate::domain::types::{NoteContent, TypeConstraintError};

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping only the date.
fn parse_class_date(value: &str) -> Result<NaiveDate, TypeConstraintError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| TypeConstraintError::InvalidValue(format!("class date: {value}")))
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    #[validate(length(min = 1))]
    pub class_date: String,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteFormPayload {
    pub class_date: NaiveDate,
    pub content: NoteContent,
}

impl NoteFormPayload {
    /// Attaches the note to `class`, snapshotting its current title.
    pub fn into_new_note(self, class: &ClassRecord) -> NewNote {
        NewNote {
            class_id: class.id,
            class_title: class.title.clone(),
            class_date: self.class_date,
            content: self.content,
        }
    }
}

#[derive(Debug, Error)]
pub enum NoteFormError {
    #[error("Note form validation failed: {0}")]
    Validation(String),
    #[error("Note form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for NoteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for NoteFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<NoteForm> for NoteFormPayload {
    type Error = NoteFormError;

    fn try_from(value: NoteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            class_date: parse_class_date(&value.class_date)?,
            content: NoteContent::new(value.content)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    #[validate(length(min = 1))]
    pub class_date: Option<String>,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateNoteFormPayload {
    pub update: NoteUpdate,
}

impl TryFrom<UpdateNoteForm> for UpdateNoteFormPayload {
    type Error = NoteFormError;

    fn try_from(value: UpdateNoteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            update: NoteUpdate {
                content: Some(NoteContent::new(value.content)?),
                class_date: value
                    .class_date
                    .as_deref()
                    .map(parse_class_date)
                    .transpose()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn note_form_accepts_plain_and_timestamp_dates() {
        for date in ["2025-03-10", "2025-03-10T09:30:00Z"] {
            let form = NoteForm {
                class_date: date.to_string(),
                content: json!({"type": "doc", "content": []}),
            };
            let payload: NoteFormPayload = form.try_into().unwrap();
            assert_eq!(
                payload.class_date,
                NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
            );
        }
    }

    #[test]
    fn note_form_rejects_non_object_content() {
        let form = NoteForm {
            class_date: "2025-03-10".to_string(),
            content: json!("just text"),
        };
        let payload: Result<NoteFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(NoteFormError::TypeConstraint(_))));
    }

    #[test]
    fn update_form_keeps_date_optional() {
        let form = UpdateNoteForm {
            class_date: None,
            content: json!({"type": "doc"}),
        };
        let payload: UpdateNoteFormPayload = form.try_into().unwrap();
        assert!(payload.update.class_date.is_none());
        assert!(payload.update.content.is_some());
    }
}
