use chrono::Utc;
use diesel::prelude::*;

use crate::domain::note::{NewNote, Note, NoteUpdate};
use crate::domain::types::{ClassId, NoteId};
use crate::models::note::{NewNote as DbNewNote, Note as DbNote, NoteChangeset};
use crate::repository::{DieselRepository, NoteReader, NoteWriter, RepositoryResult};

impl NoteReader for DieselRepository {
    fn list_all_notes(&self) -> RepositoryResult<Vec<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;

        let items = notes::table
            .order((notes::created_at.desc(), notes::id.desc()))
            .load::<DbNote>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Note>, _>>()?;

        Ok(items)
    }

    fn list_notes(&self, class_id: ClassId) -> RepositoryResult<Vec<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;

        let items = notes::table
            .filter(notes::class_id.eq(class_id.get()))
            .order((notes::created_at.desc(), notes::id.desc()))
            .load::<DbNote>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Note>, _>>()?;

        Ok(items)
    }

    fn get_note_by_id(&self, id: NoteId) -> RepositoryResult<Option<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;

        let note = notes::table
            .find(id.get())
            .first::<DbNote>(&mut conn)
            .optional()?;

        Ok(note.map(TryInto::try_into).transpose()?)
    }
}

impl NoteWriter for DieselRepository {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let db_note = DbNewNote::from_domain(note, Utc::now().naive_utc());

        let created = diesel::insert_into(notes::table)
            .values(&db_note)
            .get_result::<DbNote>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_note(&self, id: NoteId, update: &NoteUpdate) -> RepositoryResult<Option<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let changeset = NoteChangeset {
            content: update.content.as_ref().map(|content| content.to_json_string()),
            class_date: update.class_date,
            updated_at: Utc::now().naive_utc(),
        };

        let updated = diesel::update(notes::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbNote>(&mut conn)
            .optional()?;

        Ok(updated.map(TryInto::try_into).transpose()?)
    }

    fn delete_note(&self, id: NoteId) -> RepositoryResult<usize> {
        use crate::schema::notes;

        let mut conn = self.conn()?;

        let affected = diesel::delete(notes::table.find(id.get())).execute(&mut conn)?;
        Ok(affected)
    }
}
