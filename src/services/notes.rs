use crate::domain::note::Note;
use crate::domain::types::{ClassId, NoteId};
use crate::forms::notes::{NoteFormPayload, UpdateNoteFormPayload};
use crate::repository::{ClassReader, NoteReader, NoteWriter};

use super::{ServiceError, ServiceResult};

fn class_id(value: i32) -> ServiceResult<ClassId> {
    ClassId::new(value).map_err(|_| ServiceError::NotFound)
}

fn note_id(value: i32) -> ServiceResult<NoteId> {
    NoteId::new(value).map_err(|_| ServiceError::NotFound)
}

/// Notes of a class, newest first. Unknown classes are `NotFound`.
pub fn show_notes<R>(class_id: i32, repo: &R) -> ServiceResult<Vec<Note>>
where
    R: ClassReader + NoteReader,
{
    let class_id = self::class_id(class_id)?;

    match repo.get_class_by_id(class_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get class: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.list_notes(class_id) {
        Ok(notes) => Ok(notes),
        Err(e) => {
            log::error!("Failed to list notes: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Every note, newest first.
pub fn show_all_notes<R>(repo: &R) -> ServiceResult<Vec<Note>>
where
    R: NoteReader,
{
    match repo.list_all_notes() {
        Ok(notes) => Ok(notes),
        Err(e) => {
            log::error!("Failed to list notes: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_note<R>(note_id: i32, repo: &R) -> ServiceResult<Note>
where
    R: NoteReader,
{
    let note_id = self::note_id(note_id)?;

    match repo.get_note_by_id(note_id) {
        Ok(Some(note)) => Ok(note),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get note: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Creates a note for an existing class, recording the class title as it is
/// now.
pub fn create_note<R>(class_id: i32, payload: NoteFormPayload, repo: &R) -> ServiceResult<Note>
where
    R: ClassReader + NoteWriter,
{
    let class_id = self::class_id(class_id)?;

    let class = match repo.get_class_by_id(class_id) {
        Ok(Some(class)) => class,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get class: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.create_note(&payload.into_new_note(&class)) {
        Ok(note) => Ok(note),
        Err(e) => {
            log::error!("Failed to create note: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_note<R>(note_id: i32, payload: UpdateNoteFormPayload, repo: &R) -> ServiceResult<Note>
where
    R: NoteWriter,
{
    let note_id = self::note_id(note_id)?;

    match repo.update_note(note_id, &payload.update) {
        Ok(Some(note)) => Ok(note),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update note: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_note<R>(note_id: i32, repo: &R) -> ServiceResult<()>
where
    R: NoteWriter,
{
    let note_id = self::note_id(note_id)?;

    match repo.delete_note(note_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete note: {e}");
            Err(ServiceError::Internal)
        }
    }
}
