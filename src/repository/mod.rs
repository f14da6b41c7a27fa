use crate::db::{DbConnection, DbPool};
use crate::domain::class::{ClassRecord, ValidatedSchedule};
use crate::domain::note::{NewNote, Note, NoteUpdate};
use crate::domain::types::{ClassCategory, ClassId, NoteId};

pub mod class;
pub mod errors;
pub mod note;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Page selection for list queries. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip. Saturates for page numbers past any real
    /// result set.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// Query parameters used when listing classes.
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    /// Restrict to one category.
    pub category: Option<ClassCategory>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ClassListQuery {
    pub fn category(mut self, category: ClassCategory) -> Self {
        self.category = Some(category);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for classes.
pub trait ClassReader {
    /// List classes newest first, with the total number of matches.
    fn list_classes(&self, query: ClassListQuery) -> RepositoryResult<(usize, Vec<ClassRecord>)>;
    /// Retrieve a class and its meetings.
    fn get_class_by_id(&self, id: ClassId) -> RepositoryResult<Option<ClassRecord>>;
}

/// Write operations for classes. Each call is atomic.
pub trait ClassWriter {
    /// Persist a class together with its meetings.
    fn create_class(&self, schedule: &ValidatedSchedule) -> RepositoryResult<ClassRecord>;
    /// Overwrite title and category and replace every meeting of the class.
    /// Returns `None` when the class does not exist.
    fn replace_class(
        &self,
        id: ClassId,
        schedule: &ValidatedSchedule,
    ) -> RepositoryResult<Option<ClassRecord>>;
    /// Delete a class with its meetings and notes, returning affected classes.
    fn delete_class(&self, id: ClassId) -> RepositoryResult<usize>;
}

/// Read-only operations for notes.
pub trait NoteReader {
    /// Every note across all classes, newest first.
    fn list_all_notes(&self) -> RepositoryResult<Vec<Note>>;
    /// Notes of a class, newest first.
    fn list_notes(&self, class_id: ClassId) -> RepositoryResult<Vec<Note>>;
    fn get_note_by_id(&self, id: NoteId) -> RepositoryResult<Option<Note>>;
}

/// Write operations for notes.
pub trait NoteWriter {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note>;
    /// Returns `None` when the note does not exist.
    fn update_note(&self, id: NoteId, update: &NoteUpdate) -> RepositoryResult<Option<Note>>;
    fn delete_note(&self, id: NoteId) -> RepositoryResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination { page: 3, per_page: 50 };
        assert_eq!(pagination.offset(), 100);
        let first = Pagination { page: 0, per_page: 50 };
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: 50,
        };
        assert_eq!(pagination.offset(), usize::MAX);
    }
}
