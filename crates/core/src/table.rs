// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State table for the seated actors and the talk token
//!
//! Pure state machine: every change goes through [`StateTable::transition`],
//! which returns the next table and the events describing what happened. The
//! coordinator owns the only live copy and swaps it in under its lock.

use crate::actor::{ActorId, ActorState};
use crate::error::TableError;
use crate::event::Event;
use crate::roster::WaitRoster;
use serde::{Deserialize, Serialize};

/// Inputs that drive table transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableInput {
    /// THINKING -> HUNGRY, joining the wait roster
    Request { actor: ActorId },
    /// HUNGRY -> ACTIVE if neither neighbour is active, otherwise deferred
    Grant { actor: ActorId },
    /// ACTIVE -> THINKING
    Release { actor: ActorId },
    /// HUNGRY -> THINKING, leaving the wait roster
    Withdraw { actor: ActorId },
    /// Take the talk token if it is free, otherwise report it busy
    AcquireToken,
    /// Return the talk token
    ReleaseToken,
}

/// Per-actor states, the wait roster, and the talk token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateTable {
    states: Vec<ActorState>,
    roster: WaitRoster,
    token_held: bool,
}

/// Point-in-time copy of the table for observers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub states: Vec<ActorState>,
    pub waiting: Vec<ActorId>,
    pub token_held: bool,
}

impl StateTable {
    /// Seat `actors` actors, all thinking, with the token free
    pub fn new(actors: usize) -> Self {
        Self {
            states: vec![ActorState::Thinking; actors],
            roster: WaitRoster::new(),
            token_held: false,
        }
    }

    pub fn actors(&self) -> usize {
        self.states.len()
    }

    pub fn roster(&self) -> &WaitRoster {
        &self.roster
    }

    pub fn is_token_held(&self) -> bool {
        self.token_held
    }

    /// Reject ids outside 1..=N
    pub fn check_actor(&self, actor: ActorId) -> Result<(), TableError> {
        if actor.is_valid(self.actors()) {
            Ok(())
        } else {
            Err(TableError::InvalidActor {
                actor,
                actors: self.actors(),
            })
        }
    }

    pub fn state(&self, actor: ActorId) -> Result<ActorState, TableError> {
        self.check_actor(actor)?;
        Ok(self.states[actor.index()])
    }

    fn state_of(&self, actor: ActorId) -> ActorState {
        self.states
            .get(actor.index())
            .copied()
            .unwrap_or_default()
    }

    /// The active neighbour standing in the way of `actor`, if any
    pub fn blocker(&self, actor: ActorId) -> Option<ActorId> {
        let n = self.actors();
        [actor.left(n), actor.right(n)]
            .into_iter()
            .find(|&neighbour| neighbour != actor && self.state_of(neighbour).is_active())
    }

    /// Hungry, and neither neighbour is active
    pub fn can_proceed(&self, actor: ActorId) -> bool {
        actor.is_valid(self.actors())
            && self.state_of(actor) == ActorState::Hungry
            && self.blocker(actor).is_none()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            states: self.states.clone(),
            waiting: self.roster.to_vec(),
            token_held: self.token_held,
        }
    }

    /// Verify no two neighbours are active and the roster matches the hungry set
    pub fn check_invariants(&self) -> Result<(), TableError> {
        let n = self.actors();
        for index in 0..n {
            let actor = ActorId::from_index(index);
            let right = actor.right(n);
            if right != actor && self.state_of(actor).is_active() && self.state_of(right).is_active()
            {
                return Err(TableError::InvariantViolated(format!(
                    "neighbours {actor} and {right} are both active"
                )));
            }

            let hungry = self.state_of(actor) == ActorState::Hungry;
            if hungry != self.roster.contains(actor) {
                return Err(TableError::InvariantViolated(format!(
                    "actor {actor} is {} but roster membership is {}",
                    self.state_of(actor),
                    !hungry
                )));
            }
        }
        Ok(())
    }

    /// Pure state transition function
    pub fn transition(&self, input: TableInput) -> Result<(StateTable, Vec<Event>), TableError> {
        let mut next = self.clone();
        let mut events = Vec::new();

        match input {
            TableInput::Request { actor } => {
                let state = self.state(actor)?;
                if state != ActorState::Thinking {
                    return Err(TableError::NotThinking { actor, state });
                }
                next.states[actor.index()] = ActorState::Hungry;
                next.roster.push(actor);
                events.push(Event::ActorHungry { actor });
            }

            TableInput::Grant { actor } => {
                let state = self.state(actor)?;
                if state != ActorState::Hungry {
                    return Err(TableError::NotHungry { actor, state });
                }
                match self.blocker(actor) {
                    None => {
                        next.states[actor.index()] = ActorState::Active;
                        next.roster.remove(actor);
                        events.push(Event::ActorActive { actor });
                    }
                    Some(blocked_by) => {
                        // Neighbour is active, nothing changes
                        events.push(Event::GrantDeferred { actor, blocked_by });
                    }
                }
            }

            TableInput::Release { actor } => {
                let state = self.state(actor)?;
                if state != ActorState::Active {
                    return Err(TableError::NotActive { actor, state });
                }
                next.states[actor.index()] = ActorState::Thinking;
                events.push(Event::ActorThinking {
                    actor,
                    from: ActorState::Active,
                });
            }

            TableInput::Withdraw { actor } => {
                let state = self.state(actor)?;
                if state != ActorState::Hungry {
                    return Err(TableError::NotHungry { actor, state });
                }
                next.states[actor.index()] = ActorState::Thinking;
                next.roster.remove(actor);
                events.push(Event::ActorThinking {
                    actor,
                    from: ActorState::Hungry,
                });
            }

            TableInput::AcquireToken => {
                if self.token_held {
                    events.push(Event::TokenBusy);
                } else {
                    next.token_held = true;
                    events.push(Event::TokenAcquired);
                }
            }

            TableInput::ReleaseToken => {
                if !self.token_held {
                    return Err(TableError::TokenNotHeld);
                }
                next.token_held = false;
                events.push(Event::TokenReleased);
            }
        }

        Ok((next, events))
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
