use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClassCategory, ClassId, ClassTitle, MeetingDay, MeetingId, MeetingTime,
};

/// One weekly recurring time slot. Also the insertable form of a [`Meeting`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSlot {
    pub day: MeetingDay,
    pub start_time: MeetingTime,
    pub end_time: MeetingTime,
}

impl MeetingSlot {
    /// Length of the meeting in minutes. Zero for malformed slots.
    pub fn duration_minutes(&self) -> u32 {
        self.end_time
            .minutes_since_midnight()
            .saturating_sub(self.start_time.minutes_since_midnight())
    }

    /// Whether two slots share any minute on the same day.
    pub fn overlaps(&self, other: &MeetingSlot) -> bool {
        self.day == other.day
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

/// A stored meeting owned by exactly one class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meeting {
    pub id: MeetingId,
    #[serde(flatten)]
    pub slot: MeetingSlot,
}

/// A user defined class together with its weekly schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub id: ClassId,
    pub title: ClassTitle,
    pub category: ClassCategory,
    pub created_at: NaiveDateTime,
    /// Meetings in the order they were submitted.
    pub meetings: Vec<Meeting>,
}

impl ClassRecord {
    /// Iterates over the time slots of this class.
    pub fn slots(&self) -> impl Iterator<Item = &MeetingSlot> {
        self.meetings.iter().map(|meeting| &meeting.slot)
    }
}

/// Validated class data ready to be handed to persistence.
///
/// Only [`crate::schedule::validator::validate`] produces values of this type
/// from untrusted input, so every instance carries at least one meeting with
/// `start_time < end_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedSchedule {
    pub title: ClassTitle,
    pub category: ClassCategory,
    pub meetings: Vec<MeetingSlot>,
}
