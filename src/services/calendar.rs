use serde::Serialize;

use crate::repository::{ClassListQuery, ClassReader};
use crate::schedule::book::ClassBook;
use crate::schedule::placement::{CalendarGrid, GridConfig, build_grid};
use crate::schedule::validator::has_conflict;

use super::{ServiceError, ServiceResult};

/// Weekly calendar of every stored class.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub grid: CalendarGrid,
    /// Whether any two meetings on the same day overlap.
    pub has_conflict: bool,
    pub class_count: usize,
}

/// Loads the full class list as a [`ClassBook`].
pub fn load_book<R>(repo: &R) -> ServiceResult<ClassBook>
where
    R: ClassReader,
{
    match repo.list_classes(ClassListQuery::default()) {
        Ok((_total, classes)) => Ok(ClassBook::new(classes)),
        Err(e) => {
            log::error!("Failed to load classes: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn calendar_for(book: &ClassBook, config: &GridConfig) -> CalendarView {
    CalendarView {
        grid: build_grid(book.classes(), config),
        has_conflict: has_conflict(&book.slots()),
        class_count: book.len(),
    }
}

pub fn show_calendar<R>(config: &GridConfig, repo: &R) -> ServiceResult<CalendarView>
where
    R: ClassReader,
{
    let book = load_book(repo)?;
    Ok(calendar_for(&book, config))
}
