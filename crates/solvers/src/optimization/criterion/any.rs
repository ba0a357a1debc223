use std::fmt;

use crate::optimization::State;

use super::{Criterion, Stop};

/// Stops when any member stops.
///
/// Members are checked in insertion order and the first reason wins.
#[derive(Default)]
pub struct Any {
    members: Vec<Box<dyn Criterion>>,
}

impl Any {
    /// Creates an empty composite that never stops.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member.
    #[must_use]
    pub fn with(mut self, criterion: impl Criterion + 'static) -> Self {
        self.members.push(Box::new(criterion));
        self
    }

    /// Appends a member in place.
    pub fn push(&mut self, criterion: impl Criterion + 'static) {
        self.members.push(Box::new(criterion));
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Criterion for Any {
    fn check(&self, state: &State) -> Option<Stop> {
        self.members.iter().find_map(|member| member.check(state))
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("members", &self.members.len())
            .finish()
    }
}
