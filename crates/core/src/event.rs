// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by state table transitions

use crate::actor::{ActorId, ActorState};
use crate::traced::TracedEvent;
use serde::{Deserialize, Serialize};

/// Something that happened at the table
///
/// Denials (`GrantDeferred`, `TokenBusy`) leave the table unchanged; every
/// other variant records a state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Actor joined the wait roster
    ActorHungry { actor: ActorId },
    /// Actor was granted the exclusive activity
    ActorActive { actor: ActorId },
    /// Actor returned to thinking, either by release (from active) or by
    /// withdrawing from the roster (from hungry)
    ActorThinking { actor: ActorId, from: ActorState },
    /// A grant was refused because a neighbour is active
    GrantDeferred { actor: ActorId, blocked_by: ActorId },
    /// The talk token was taken
    TokenAcquired,
    /// The talk token was returned
    TokenReleased,
    /// A token request found it already held
    TokenBusy,
}

impl Event {
    /// Whether this event changed the table
    pub fn is_transition(&self) -> bool {
        !matches!(self, Event::GrantDeferred { .. } | Event::TokenBusy)
    }

    /// The actor this event concerns, if any
    pub fn actor(&self) -> Option<ActorId> {
        match self {
            Event::ActorHungry { actor }
            | Event::ActorActive { actor }
            | Event::ActorThinking { actor, .. }
            | Event::GrantDeferred { actor, .. } => Some(*actor),
            Event::TokenAcquired | Event::TokenReleased | Event::TokenBusy => None,
        }
    }

    /// State the actor is in after this event, for actor transitions
    pub fn resulting_state(&self) -> Option<ActorState> {
        match self {
            Event::ActorHungry { .. } => Some(ActorState::Hungry),
            Event::ActorActive { .. } => Some(ActorState::Active),
            Event::ActorThinking { .. } => Some(ActorState::Thinking),
            _ => None,
        }
    }
}

impl TracedEvent for Event {
    fn name(&self) -> &'static str {
        match self {
            Event::ActorHungry { .. } => "actor:hungry",
            Event::ActorActive { .. } => "actor:active",
            Event::ActorThinking { .. } => "actor:thinking",
            Event::GrantDeferred { .. } => "grant:deferred",
            Event::TokenAcquired => "token:acquired",
            Event::TokenReleased => "token:released",
            Event::TokenBusy => "token:busy",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Event::ActorHungry { actor } | Event::ActorActive { actor } => {
                vec![("actor", actor.to_string())]
            }
            Event::ActorThinking { actor, from } => {
                vec![("actor", actor.to_string()), ("from", from.to_string())]
            }
            Event::GrantDeferred { actor, blocked_by } => vec![
                ("actor", actor.to_string()),
                ("blocked_by", blocked_by.to_string()),
            ],
            Event::TokenAcquired | Event::TokenReleased | Event::TokenBusy => vec![],
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
