//! Weekly calendar geometry.
//!
//! Every function here is a pure transform of an already validated class list.
//! A meeting is drawn in the cell of its start hour only and stretched to its
//! full length via height and offset; meetings sharing a cell are kept in input
//! order and stacked by the presentation layer.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::domain::class::{ClassRecord, MeetingSlot};
use crate::domain::types::{
    ClassCategory, ClassId, ClassTitle, MeetingDay, MeetingTime, TypeConstraintError,
};

pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 20;
pub const DEFAULT_CELL_HEIGHT_PX: f64 = 56.0;

/// Visible hour range and cell size of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First hour row, inclusive.
    pub start_hour: u32,
    /// Last hour row, inclusive.
    pub end_hour: u32,
    pub cell_height_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            cell_height_px: DEFAULT_CELL_HEIGHT_PX,
        }
    }
}

impl GridConfig {
    pub fn new(
        start_hour: u32,
        end_hour: u32,
        cell_height_px: f64,
    ) -> Result<Self, TypeConstraintError> {
        let config = Self {
            start_hour,
            end_hour,
            cell_height_px,
        };
        config.check()?;
        Ok(config)
    }

    /// Ensures the hour range lies within a day and the cell height is usable.
    pub fn check(&self) -> Result<(), TypeConstraintError> {
        if self.start_hour > self.end_hour || self.end_hour > 23 {
            return Err(TypeConstraintError::InvalidValue(format!(
                "calendar hours {}..={} must be ordered and within 0..=23",
                self.start_hour, self.end_hour
            )));
        }
        if !(self.cell_height_px.is_finite() && self.cell_height_px > 0.0) {
            return Err(TypeConstraintError::InvalidValue(
                "calendar cell height must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Hour rows from top to bottom.
    pub fn hours(&self) -> RangeInclusive<u32> {
        self.start_hour..=self.end_hour
    }
}

/// A meeting denormalized with the class it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatMeeting<'a> {
    pub class_id: ClassId,
    pub class_title: &'a ClassTitle,
    pub category: ClassCategory,
    pub slot: &'a MeetingSlot,
}

/// Flattens every meeting of every class, class order first, then meeting
/// order within a class.
pub fn flatten_meetings(classes: &[ClassRecord]) -> Vec<FlatMeeting<'_>> {
    classes
        .iter()
        .flat_map(|class| {
            class.meetings.iter().map(move |meeting| FlatMeeting {
                class_id: class.id,
                class_title: &class.title,
                category: class.category,
                slot: &meeting.slot,
            })
        })
        .collect()
}

/// Whether `slot` is drawn in the `(day, hour)` cell.
pub fn cell_membership(slot: &MeetingSlot, day: MeetingDay, hour: u32) -> bool {
    slot.day == day && slot.start_time.hour() == hour
}

/// Pixel height of a meeting spanning `start..end`.
pub fn compute_height(start: MeetingTime, end: MeetingTime, cell_height_px: f64) -> f64 {
    let duration = end
        .minutes_since_midnight()
        .saturating_sub(start.minutes_since_midnight());
    f64::from(duration) / 60.0 * cell_height_px
}

/// Distance from the top of the start hour cell to the top of the meeting.
pub fn compute_offset(start: MeetingTime, cell_height_px: f64) -> f64 {
    f64::from(start.minute()) / 60.0 * cell_height_px
}

/// Fill and accent colors of a calendar block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryColors {
    pub fill: &'static str,
    pub border: &'static str,
}

/// Colors used for values outside the category table.
pub const FALLBACK_COLORS: CategoryColors = CategoryColors {
    fill: "#3730a3",
    border: "#1e1b4b",
};

impl ClassCategory {
    pub const fn colors(self) -> CategoryColors {
        match self {
            Self::Lecture => CategoryColors {
                fill: "#16b3d4",
                border: "#0e7a8f",
            },
            Self::Lab => CategoryColors {
                fill: "#feca14",
                border: "#d9a800",
            },
            Self::Seminar => CategoryColors {
                fill: "#ec745c",
                border: "#c85240",
            },
            Self::Discussion => CategoryColors {
                fill: "#e85484",
                border: "#c03a68",
            },
        }
    }
}

/// Looks up the colors of a category name, degrading to [`FALLBACK_COLORS`].
pub fn color_for(category: &str) -> CategoryColors {
    ClassCategory::try_from(category)
        .map(ClassCategory::colors)
        .unwrap_or(FALLBACK_COLORS)
}

/// Layout of one meeting block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub class_id: ClassId,
    pub day: MeetingDay,
    pub day_column: usize,
    pub hour: u32,
    /// Index into [`GridConfig::hours`].
    pub hour_row: usize,
    pub offset_px: f64,
    pub height_px: f64,
    pub label: String,
    /// `HH:MM - HH:MM`
    pub time_range: String,
    pub fill: &'static str,
    pub border: &'static str,
}

/// Computes a placement for every meeting whose start hour is on the grid.
///
/// Meetings starting before or after the visible range belong to no cell and
/// are left out.
pub fn place(classes: &[ClassRecord], config: &GridConfig) -> Vec<Placement> {
    flatten_meetings(classes)
        .into_iter()
        .filter_map(|flat| {
            let slot = flat.slot;
            let hour_row = config
                .hours()
                .position(|hour| cell_membership(slot, slot.day, hour))?;
            let colors = flat.category.colors();
            Some(Placement {
                class_id: flat.class_id,
                day: slot.day,
                day_column: slot.day.column(),
                hour: slot.start_time.hour(),
                hour_row,
                offset_px: compute_offset(slot.start_time, config.cell_height_px),
                height_px: compute_height(slot.start_time, slot.end_time, config.cell_height_px),
                label: flat.class_title.to_string(),
                time_range: format!("{} - {}", slot.start_time, slot.end_time),
                fill: colors.fill,
                border: colors.border,
            })
        })
        .collect()
}

/// 12-hour label of an hour row, e.g. `8:00 AM` or `1:00 PM`.
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        1..=11 => format!("{hour}:00 AM"),
        12 => "12:00 PM".to_string(),
        _ => format!("{}:00 PM", hour - 12),
    }
}

/// Column header of the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHeader {
    pub day: MeetingDay,
    pub label: String,
}

/// One hour row with a cell per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    pub hour: u32,
    pub label: String,
    pub cells: Vec<Vec<Placement>>,
}

/// Full calendar ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub days: Vec<DayHeader>,
    pub rows: Vec<HourRow>,
    pub cell_height_px: f64,
}

/// Arranges [`place`] output into hour rows and day cells.
pub fn build_grid(classes: &[ClassRecord], config: &GridConfig) -> CalendarGrid {
    let mut rows: Vec<HourRow> = config
        .hours()
        .map(|hour| HourRow {
            hour,
            label: format_hour(hour),
            cells: vec![Vec::new(); MeetingDay::ALL.len()],
        })
        .collect();

    for placement in place(classes, config) {
        rows[placement.hour_row].cells[placement.day_column].push(placement);
    }

    CalendarGrid {
        days: MeetingDay::ALL
            .into_iter()
            .map(|day| DayHeader {
                day,
                label: day.short_label(),
            })
            .collect(),
        rows,
        cell_height_px: config.cell_height_px,
    }
}
