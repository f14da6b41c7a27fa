use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::class::{ClassRecord, Meeting, MeetingSlot};
use crate::domain::types::{
    ClassCategory, ClassTitle, MeetingDay, MeetingTime, TypeConstraintError,
};

/// Diesel model representing a row in the `classes` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::classes)]
pub struct Class {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Class`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::classes)]
pub struct NewClass<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub created_at: NaiveDateTime,
}

/// Diesel model representing a row in the `class_meetings` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Class))]
#[diesel(table_name = crate::schema::class_meetings)]
pub struct ClassMeeting {
    pub id: i32,
    pub class_id: i32,
    pub position: i32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// Insertable form of [`ClassMeeting`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::class_meetings)]
pub struct NewClassMeeting {
    pub class_id: i32,
    pub position: i32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl NewClassMeeting {
    /// Rows for `slots`, numbered in submission order.
    pub fn for_class(class_id: i32, slots: &[MeetingSlot]) -> Vec<Self> {
        slots
            .iter()
            .zip(0..)
            .map(|(slot, position)| Self {
                class_id,
                position,
                day: slot.day.as_str().to_string(),
                start_time: slot.start_time.to_string(),
                end_time: slot.end_time.to_string(),
            })
            .collect()
    }
}

impl TryFrom<ClassMeeting> for Meeting {
    type Error = TypeConstraintError;

    fn try_from(meeting: ClassMeeting) -> Result<Self, Self::Error> {
        Ok(Self {
            id: meeting.id.try_into()?,
            slot: MeetingSlot {
                day: MeetingDay::try_from(meeting.day)?,
                start_time: MeetingTime::parse(&meeting.start_time)?,
                end_time: MeetingTime::parse(&meeting.end_time)?,
            },
        })
    }
}

impl TryFrom<(Class, Vec<ClassMeeting>)> for ClassRecord {
    type Error = TypeConstraintError;

    fn try_from((class, meetings): (Class, Vec<ClassMeeting>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: class.id.try_into()?,
            title: ClassTitle::new(class.title)?,
            category: ClassCategory::try_from(class.category)?,
            created_at: class.created_at,
            meetings: meetings
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<Meeting>, _>>()?,
        })
    }
}
