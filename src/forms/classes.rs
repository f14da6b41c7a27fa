use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::class::{ClassRecord, ValidatedSchedule};
use crate::schedule::validator::{MeetingInput, ScheduleError, validate};

/// Class submission used for both creating and editing a class.
///
/// Every check is left to the schedule validator so that users see its
/// messages.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassForm {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub meetings: Vec<MeetingInput>,
}

/// Class submission from the HTML pages.
///
/// `meetings` holds one meeting per line as `day start end`, for example
/// `Monday 14:00 15:30` or `Monday 14:00-15:30`. Blank lines are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassPageForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub meetings: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassFormPayload {
    pub schedule: ValidatedSchedule,
}

#[derive(Debug, Error, PartialEq)]
pub enum ClassFormError {
    #[error("meeting {0}: expected `day start end`")]
    MeetingLine(usize),
    #[error("{0}")]
    Schedule(#[from] ScheduleError),
}

impl TryFrom<ClassForm> for ClassFormPayload {
    type Error = ClassFormError;

    fn try_from(value: ClassForm) -> Result<Self, Self::Error> {
        let schedule = validate(&value.title, value.category.as_deref(), &value.meetings)?;
        Ok(Self { schedule })
    }
}

fn parse_meeting_line(position: usize, line: &str) -> Result<MeetingInput, ClassFormError> {
    let line = line.replace('-', " ");
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [day, start, end] => Ok(MeetingInput::new(day, start, end)),
        [day, start] => Ok(MeetingInput::new(day, start, "")),
        [day] => Ok(MeetingInput::new(day, "", "")),
        _ => Err(ClassFormError::MeetingLine(position)),
    }
}

impl TryFrom<ClassPageForm> for ClassForm {
    type Error = ClassFormError;

    fn try_from(value: ClassPageForm) -> Result<Self, Self::Error> {
        let meetings = value
            .meetings
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(index, line)| parse_meeting_line(index + 1, line))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: value.title,
            category: value.category,
            meetings,
        })
    }
}

impl TryFrom<ClassPageForm> for ClassFormPayload {
    type Error = ClassFormError;

    fn try_from(value: ClassPageForm) -> Result<Self, Self::Error> {
        ClassForm::try_from(value)?.try_into()
    }
}

impl From<&ClassRecord> for ClassPageForm {
    /// Prefills the edit page with the stored class.
    fn from(value: &ClassRecord) -> Self {
        Self {
            title: value.title.to_string(),
            category: Some(value.category.as_str().to_string()),
            meetings: value
                .slots()
                .map(|slot| format!("{} {}-{}", slot.day, slot.start_time, slot.end_time))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
