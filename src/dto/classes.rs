use serde::Serialize;

use crate::domain::class::{ClassRecord, MeetingSlot};

/// Row of the class list page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassListItemDto {
    pub id: i32,
    pub title: String,
    pub category: &'static str,
    pub fill: &'static str,
    pub border: &'static str,
    /// One entry per meeting, e.g. `Monday 10:00 - 11:30`.
    pub meetings: Vec<String>,
}

fn describe(slot: &MeetingSlot) -> String {
    let day = slot.day.as_str();
    let mut chars = day.chars();
    let day = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{day} {} - {}", slot.start_time, slot.end_time)
}

impl From<&ClassRecord> for ClassListItemDto {
    fn from(value: &ClassRecord) -> Self {
        let colors = value.category.colors();
        Self {
            id: value.id.get(),
            title: value.title.as_str().to_string(),
            category: value.category.as_str(),
            fill: colors.fill,
            border: colors.border,
            meetings: value.slots().map(describe).collect(),
        }
    }
}
