// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Roster of actors waiting to become active
//!
//! Entries are kept in arrival order. The order is informational only: grants
//! are decided by the neighbour predicate, never by position in the roster.

use crate::actor::ActorId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaitRoster {
    entries: VecDeque<ActorId>,
}

impl WaitRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor. Returns false if it was already waiting.
    pub fn push(&mut self, actor: ActorId) -> bool {
        if self.contains(actor) {
            return false;
        }
        self.entries.push_back(actor);
        true
    }

    /// Remove this actor's own entry, wherever it sits
    pub fn remove(&mut self, actor: ActorId) -> bool {
        match self.entries.iter().position(|a| *a == actor) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.entries.contains(&actor)
    }

    /// Longest-waiting actor, if any
    pub fn front(&self) -> Option<ActorId> {
        self.entries.front().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.entries.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<ActorId> {
        self.entries.iter().copied().collect()
    }
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;
