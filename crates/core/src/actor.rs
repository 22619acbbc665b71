// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actor identity and per-actor status
//!
//! Actors are seated in a circle and identified 1..=N. Neighbour lookups wrap
//! around, so actor 1 sits between actor N and actor 2.

use serde::{Deserialize, Serialize};

/// 1-based identity of an actor seated at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub usize);

impl ActorId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Actor seated at a zero-based table slot
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// Zero-based table slot. Only meaningful for a valid id.
    pub fn index(self) -> usize {
        self.0.saturating_sub(1)
    }

    /// Check whether this id names a seat at a table of `actors`
    pub fn is_valid(self, actors: usize) -> bool {
        (1..=actors).contains(&self.0)
    }

    /// Neighbour on the left, wrapping from 1 to `actors`
    pub fn left(self, actors: usize) -> Self {
        if self.0 <= 1 {
            Self(actors)
        } else {
            Self(self.0 - 1)
        }
    }

    /// Neighbour on the right, wrapping from `actors` to 1
    pub fn right(self, actors: usize) -> Self {
        if self.0 >= actors {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl From<usize> for ActorId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an actor is currently doing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorState {
    /// Idle; holds nothing and wants nothing
    #[default]
    Thinking,
    /// Waiting for both neighbours to be inactive
    Hungry,
    /// In the exclusive activity; neither neighbour may be active
    Active,
}

impl ActorState {
    pub fn as_str(self) -> &'static str {
        match self {
            ActorState::Thinking => "thinking",
            ActorState::Hungry => "hungry",
            ActorState::Active => "active",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, ActorState::Active)
    }

    /// Whether moving to `next` follows THINKING -> HUNGRY -> ACTIVE -> THINKING.
    ///
    /// HUNGRY -> THINKING is also legal: a waiter that gives up withdraws.
    pub fn can_become(self, next: ActorState) -> bool {
        matches!(
            (self, next),
            (ActorState::Thinking, ActorState::Hungry)
                | (ActorState::Hungry, ActorState::Active)
                | (ActorState::Hungry, ActorState::Thinking)
                | (ActorState::Active, ActorState::Thinking)
        )
    }
}

impl std::fmt::Display for ActorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "actor_tests.rs"]
mod tests;
