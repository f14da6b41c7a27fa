//! In-memory class snapshot and optimistic mutations against it.
//!
//! A [`ClassBook`] is the explicit list of classes handed to the list and
//! calendar views. Changes are expressed as [`Mutation`] commands: applying
//! one returns its compensating inverse, which [`OptimisticUpdate`] replays
//! when persistence fails.

use serde::Serialize;
use thiserror::Error;

use crate::domain::class::{ClassRecord, MeetingSlot};
use crate::domain::types::ClassId;

/// Ordered class list, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassBook {
    classes: Vec<ClassRecord>,
}

impl ClassBook {
    pub fn new(classes: Vec<ClassRecord>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassRecord> {
        self.classes.iter().find(|class| class.id == id)
    }

    fn position(&self, id: ClassId) -> Option<usize> {
        self.classes.iter().position(|class| class.id == id)
    }

    /// Every meeting slot across all classes.
    pub fn slots(&self) -> Vec<MeetingSlot> {
        self.classes
            .iter()
            .flat_map(|class| class.meetings.iter().map(|meeting| meeting.slot))
            .collect()
    }

    pub fn into_inner(self) -> Vec<ClassRecord> {
        self.classes
    }
}

impl From<Vec<ClassRecord>> for ClassBook {
    fn from(classes: Vec<ClassRecord>) -> Self {
        Self::new(classes)
    }
}

/// A change to a [`ClassBook`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Adds a class at the top of the list.
    Create(ClassRecord),
    /// Swaps the class with the same id for the given record.
    Replace(ClassRecord),
    /// Removes a class.
    Delete(ClassId),
    /// Puts a class back at a specific position.
    Restore { index: usize, record: ClassRecord },
}

impl Mutation {
    /// Applies the mutation and returns the inverse that undoes it, or `None`
    /// when the mutation did not change the book.
    pub fn apply(self, book: &mut ClassBook) -> Option<Mutation> {
        match self {
            Mutation::Create(record) => {
                let id = record.id;
                book.classes.insert(0, record);
                Some(Mutation::Delete(id))
            }
            Mutation::Replace(record) => {
                let index = book.position(record.id)?;
                let previous = std::mem::replace(&mut book.classes[index], record);
                Some(Mutation::Replace(previous))
            }
            Mutation::Delete(id) => {
                let index = book.position(id)?;
                let record = book.classes.remove(index);
                Some(Mutation::Restore { index, record })
            }
            Mutation::Restore { index, record } => {
                let id = record.id;
                let index = index.min(book.classes.len());
                book.classes.insert(index, record);
                Some(Mutation::Delete(id))
            }
        }
    }
}

/// Lifecycle of an [`OptimisticUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    Pending,
    Committed,
    RolledBack,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("cannot {action} an update that is {state:?}")]
    InvalidTransition {
        state: UpdateState,
        action: &'static str,
    },
}

/// Tentatively applied mutation awaiting the persistence outcome.
///
/// `Idle -> Pending` on [`begin`](Self::begin), then either
/// `Pending -> Committed` or `Pending -> RolledBack`.
#[derive(Debug)]
pub struct OptimisticUpdate {
    state: UpdateState,
    mutation: Option<Mutation>,
    inverse: Option<Mutation>,
}

impl OptimisticUpdate {
    pub fn new(mutation: Mutation) -> Self {
        Self {
            state: UpdateState::Idle,
            mutation: Some(mutation),
            inverse: None,
        }
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    fn transition(
        &mut self,
        from: UpdateState,
        to: UpdateState,
        action: &'static str,
    ) -> Result<(), UpdateError> {
        if self.state != from {
            return Err(UpdateError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        self.state = to;
        Ok(())
    }

    /// Applies the mutation to `book`.
    pub fn begin(&mut self, book: &mut ClassBook) -> Result<(), UpdateError> {
        self.transition(UpdateState::Idle, UpdateState::Pending, "begin")?;
        self.inverse = self.mutation.take().and_then(|mutation| mutation.apply(book));
        Ok(())
    }

    /// Keeps the tentative change.
    pub fn commit(&mut self) -> Result<(), UpdateError> {
        self.transition(UpdateState::Pending, UpdateState::Committed, "commit")?;
        self.inverse = None;
        Ok(())
    }

    /// Undoes the tentative change.
    pub fn rollback(&mut self, book: &mut ClassBook) -> Result<(), UpdateError> {
        self.transition(UpdateState::Pending, UpdateState::RolledBack, "roll back")?;
        if let Some(inverse) = self.inverse.take() {
            inverse.apply(book);
        }
        Ok(())
    }

    /// Runs the full cycle around `persist`: apply, call, then commit on
    /// success or roll back on failure. The persistence result is returned
    /// unchanged.
    pub fn run<T, E>(
        mutation: Mutation,
        book: &mut ClassBook,
        persist: impl FnOnce(&ClassBook) -> Result<T, E>,
    ) -> (UpdateState, Result<T, E>) {
        let mut update = Self::new(mutation);
        let begun = update.begin(book);
        debug_assert!(begun.is_ok(), "new update must start idle");
        let outcome = persist(book);
        let settled = match &outcome {
            Ok(_) => update.commit(),
            Err(_) => update.rollback(book),
        };
        debug_assert!(settled.is_ok(), "begun update must be pending");
        (update.state(), outcome)
    }
}
