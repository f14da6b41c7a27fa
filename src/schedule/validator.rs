//! Gatekeeping for class submissions.
//!
//! [`validate`] is the only way untrusted input becomes a
//! [`ValidatedSchedule`]. Checks run in a fixed order and the first failure is
//! returned: title, category, meeting-set emptiness, then every meeting in
//! list order (day before times).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::class::{MeetingSlot, ValidatedSchedule};
use crate::domain::types::{ClassCategory, ClassTitle, MeetingDay, MeetingTime};

/// Raw meeting as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInput {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl MeetingInput {
    pub fn new(day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

/// Reasons a class submission is rejected. `meeting` is the 1-based position
/// of the offending entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("at least one meeting time is required")]
    NoMeetings,
    #[error("meeting {meeting}: unknown day `{value}`")]
    InvalidDay { meeting: usize, value: String },
    #[error("meeting {meeting}: {reason}")]
    InvalidTimeRange { meeting: usize, reason: String },
}

/// Validates a class submission and returns the normalized schedule.
pub fn validate(
    title: &str,
    category: Option<&str>,
    meetings: &[MeetingInput],
) -> Result<ValidatedSchedule, ScheduleError> {
    let title = ClassTitle::new(title).map_err(|_| ScheduleError::MissingField("title"))?;

    let category = category
        .map(ClassCategory::try_from)
        .and_then(Result::ok)
        .ok_or(ScheduleError::MissingField("category"))?;

    if meetings.is_empty() {
        return Err(ScheduleError::NoMeetings);
    }

    let meetings = meetings
        .iter()
        .enumerate()
        .map(|(index, input)| validate_meeting(index + 1, input))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedSchedule {
        title,
        category,
        meetings,
    })
}

fn validate_meeting(position: usize, input: &MeetingInput) -> Result<MeetingSlot, ScheduleError> {
    let day = MeetingDay::try_from(input.day.as_str()).map_err(|_| ScheduleError::InvalidDay {
        meeting: position,
        value: input.day.clone(),
    })?;

    let invalid = |reason: String| ScheduleError::InvalidTimeRange {
        meeting: position,
        reason,
    };

    let start_time = MeetingTime::parse(&input.start_time).map_err(|e| invalid(e.to_string()))?;
    let end_time = MeetingTime::parse(&input.end_time).map_err(|e| invalid(e.to_string()))?;

    if start_time >= end_time {
        return Err(invalid(format!(
            "start time {start_time} must be before end time {end_time}"
        )));
    }

    Ok(MeetingSlot {
        day,
        start_time,
        end_time,
    })
}

/// Whether any two slots overlap on the same day.
///
/// Overlaps are allowed; this only reports them.
pub fn has_conflict(meetings: &[MeetingSlot]) -> bool {
    meetings.iter().enumerate().any(|(i, a)| {
        meetings[i + 1..].iter().any(|b| a.overlaps(b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday(start: &str, end: &str) -> MeetingInput {
        MeetingInput::new("monday", start, end)
    }

    #[test]
    fn accepts_valid_schedule_and_normalizes_case() {
        let meetings = vec![
            MeetingInput::new(" Wednesday ", "14:00", "15:30"),
            monday("09:00", "10:00"),
        ];

        let schedule = validate("  Biology ", Some("LECTURE"), &meetings).unwrap();

        assert_eq!(schedule.title.as_str(), "Biology");
        assert_eq!(schedule.category, ClassCategory::Lecture);
        assert_eq!(schedule.meetings.len(), 2);
        assert_eq!(schedule.meetings[0].day, MeetingDay::Wednesday);
        assert_eq!(schedule.meetings[1].day, MeetingDay::Monday);
        assert_eq!(schedule.meetings[0].start_time.to_string(), "14:00");
    }

    #[test]
    fn empty_title_is_missing_field() {
        let err = validate("", Some("lecture"), &[monday("10:00", "11:00")]).unwrap_err();
        assert_eq!(err, ScheduleError::MissingField("title"));
    }

    #[test]
    fn absent_or_unknown_category_is_missing_field() {
        let meetings = [monday("10:00", "11:00")];
        assert_eq!(
            validate("Biology", None, &meetings).unwrap_err(),
            ScheduleError::MissingField("category")
        );
        assert_eq!(
            validate("Biology", Some("workshop"), &meetings).unwrap_err(),
            ScheduleError::MissingField("category")
        );
    }

    #[test]
    fn empty_meeting_list_is_rejected() {
        let err = validate("Biology", Some("lab"), &[]).unwrap_err();
        assert_eq!(err, ScheduleError::NoMeetings);
    }

    #[test]
    fn title_is_checked_before_meetings() {
        let err = validate(" ", None, &[]).unwrap_err();
        assert_eq!(err, ScheduleError::MissingField("title"));
    }

    #[test]
    fn start_must_precede_end() {
        for (start, end) in [("11:00", "10:00"), ("10:00", "10:00")] {
            let err = validate("Biology", Some("lecture"), &[monday(start, end)]).unwrap_err();
            assert!(matches!(
                err,
                ScheduleError::InvalidTimeRange { meeting: 1, .. }
            ));
        }
        assert!(validate("Biology", Some("lecture"), &[monday("10:00", "10:01")]).is_ok());
    }

    #[test]
    fn unparseable_times_are_invalid_ranges() {
        for (start, end) in [("25:00", "26:00"), ("10:00", "noon"), ("", "11:00")] {
            let err = validate("Biology", Some("lecture"), &[monday(start, end)]).unwrap_err();
            assert!(matches!(err, ScheduleError::InvalidTimeRange { .. }));
        }
    }

    #[test]
    fn first_failing_meeting_is_reported() {
        let meetings = vec![
            monday("08:00", "09:00"),
            monday("12:00", "11:00"),
            MeetingInput::new("someday", "08:00", "09:00"),
        ];
        let err = validate("Biology", Some("seminar"), &meetings).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidTimeRange { meeting: 2, .. }
        ));
    }

    #[test]
    fn unknown_day_is_rejected() {
        let err = validate(
            "Biology",
            Some("seminar"),
            &[MeetingInput::new("someday", "08:00", "09:00")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidDay {
                meeting: 1,
                value: "someday".to_string()
            }
        );
    }

    #[test]
    fn overlapping_meetings_are_accepted() {
        let meetings = [monday("10:00", "11:00"), monday("10:30", "11:30")];
        let schedule = validate("Biology", Some("lecture"), &meetings).unwrap();
        assert!(has_conflict(&schedule.meetings));
    }

    #[test]
    fn back_to_back_meetings_do_not_conflict() {
        let schedule = validate(
            "Biology",
            Some("lecture"),
            &[
                monday("10:00", "11:00"),
                monday("11:00", "12:00"),
                MeetingInput::new("tuesday", "10:00", "11:00"),
            ],
        )
        .unwrap();
        assert!(!has_conflict(&schedule.meetings));
    }
}
