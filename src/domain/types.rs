//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, day names, clock times and categories are enforced at the
//! boundary.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// The value is not one of the known class categories.
    #[error("unknown class category: {0}")]
    InvalidCategory(String),
    /// The value is not one of the seven day names.
    #[error("unknown day of week: {0}")]
    InvalidDay(String),
    /// The value is not an `HH:MM` time between 00:00 and 23:59.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(ClassId, "Unique identifier of a class.", "class_id");
id_newtype!(MeetingId, "Unique identifier of a class meeting.", "meeting_id");
id_newtype!(NoteId, "Unique identifier of a note.", "note_id");

non_empty_string_newtype!(ClassTitle, "Display title of a class.", "title");

/// Kind of class, used for visual grouping in the calendar.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum ClassCategory {
    Lecture,
    Lab,
    Seminar,
    Discussion,
}

impl ClassCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [Self::Lecture, Self::Lab, Self::Seminar, Self::Discussion];

    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Lab => "lab",
            Self::Seminar => "seminar",
            Self::Discussion => "discussion",
        }
    }
}

impl Display for ClassCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ClassCategory {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "lecture" => Ok(Self::Lecture),
            "lab" => Ok(Self::Lab),
            "seminar" => Ok(Self::Seminar),
            "discussion" => Ok(Self::Discussion),
            _ => Err(TypeConstraintError::InvalidCategory(value.to_string())),
        }
    }
}

impl TryFrom<String> for ClassCategory {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<ClassCategory> for String {
    fn from(value: ClassCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Day of the week a meeting recurs on. The calendar is laid out Monday-first.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum MeetingDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl MeetingDay {
    /// All days in calendar column order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Zero-based calendar column, Monday is `0`.
    pub const fn column(self) -> usize {
        self as usize
    }

    /// Three letter upper-case header, e.g. `MON`.
    pub fn short_label(self) -> String {
        self.as_str()[..3].to_uppercase()
    }
}

impl Display for MeetingDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for MeetingDay {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == normalized)
            .ok_or_else(|| TypeConstraintError::InvalidDay(value.to_string()))
    }
}

impl TryFrom<String> for MeetingDay {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<MeetingDay> for String {
    fn from(value: MeetingDay) -> Self {
        value.as_str().to_string()
    }
}

/// Wall-clock time of day with minute precision, written as `HH:MM`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct MeetingTime(NaiveTime);

impl MeetingTime {
    const FORMAT: &'static str = "%H:%M";

    /// Parses an `HH:MM` value in the range 00:00–23:59.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        NaiveTime::parse_from_str(value.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidTime(value.to_string()))
    }

    /// Builds a time from its components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TypeConstraintError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TypeConstraintError::InvalidTime(format!("{hour}:{minute}")))
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl Display for MeetingTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl TryFrom<&str> for MeetingTime {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for MeetingTime {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MeetingTime> for String {
    fn from(value: MeetingTime) -> Self {
        value.to_string()
    }
}

/// Serialized editor document attached to a note.
///
/// The document schema belongs to the editor; the only requirement enforced
/// here is that the value is a JSON object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NoteContent(serde_json::Value);

impl NoteContent {
    pub fn new(value: serde_json::Value) -> Result<Self, TypeConstraintError> {
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidValue(
                "note content must be a JSON object".to_string(),
            ))
        }
    }

    /// Parses stored JSON text.
    pub fn parse(raw: &str) -> Result<Self, TypeConstraintError> {
        let value = serde_json::from_str(raw)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("note content: {e}")))?;
        Self::new(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// JSON text used for persistence.
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }
}
