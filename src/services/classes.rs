use serde::Deserialize;

use crate::domain::class::ClassRecord;
use crate::domain::types::{ClassCategory, ClassId};
use crate::forms::classes::ClassFormPayload;
use crate::repository::{ClassListQuery, ClassReader, ClassWriter};

use super::{ServiceError, ServiceResult};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;

/// Query parameters accepted when listing classes.
#[derive(Deserialize, Debug, Default)]
pub struct ClassesQueryParams {
    pub category: Option<String>,
    pub page: Option<usize>,
}

/// Lists classes newest first, optionally filtered by category.
pub fn show_classes<R>(params: ClassesQueryParams, repo: &R) -> ServiceResult<Vec<ClassRecord>>
where
    R: ClassReader,
{
    let mut query = ClassListQuery::default();

    if let Some(category) = params.category.as_deref().filter(|c| !c.trim().is_empty()) {
        let category =
            ClassCategory::try_from(category).map_err(|e| ServiceError::Form(e.to_string()))?;
        query = query.category(category);
    }

    if let Some(page) = params.page {
        query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }

    match repo.list_classes(query) {
        Ok((_total, classes)) => Ok(classes),
        Err(e) => {
            log::error!("Failed to list classes: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_class<R>(class_id: i32, repo: &R) -> ServiceResult<ClassRecord>
where
    R: ClassReader,
{
    let class_id = ClassId::new(class_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_class_by_id(class_id) {
        Ok(Some(class)) => Ok(class),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get class: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Persists a validated class with all of its meetings.
pub fn create_class<R>(payload: ClassFormPayload, repo: &R) -> ServiceResult<ClassRecord>
where
    R: ClassWriter,
{
    match repo.create_class(&payload.schedule) {
        Ok(class) => {
            log::info!("Created class {} with {} meetings", class.id, class.meetings.len());
            Ok(class)
        }
        Err(e) => {
            log::error!("Failed to create class: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Replaces title, category and the full meeting list of a class.
pub fn update_class<R>(
    class_id: i32,
    payload: ClassFormPayload,
    repo: &R,
) -> ServiceResult<ClassRecord>
where
    R: ClassWriter,
{
    let class_id = ClassId::new(class_id).map_err(|_| ServiceError::NotFound)?;

    match repo.replace_class(class_id, &payload.schedule) {
        Ok(Some(class)) => Ok(class),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update class: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a class; its meetings and notes go with it.
pub fn delete_class<R>(class_id: i32, repo: &R) -> ServiceResult<()>
where
    R: ClassWriter,
{
    let class_id = ClassId::new(class_id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_class(class_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete class: {e}");
            Err(ServiceError::Internal)
        }
    }
}
