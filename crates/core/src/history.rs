// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded, totally ordered record of table transitions
//!
//! Entries are appended under the coordinator lock, so sequence numbers give
//! the exact order in which state changes happened.

use crate::actor::{ActorId, ActorState};
use crate::event::Event;
use std::collections::VecDeque;
use std::time::Instant;

/// One recorded transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub seq: u64,
    pub at: Instant,
    pub event: Event,
}

#[derive(Clone, Debug)]
pub struct History {
    capacity: usize,
    next_seq: u64,
    entries: VecDeque<Recorded>,
}

impl History {
    /// A capacity of 0 records nothing. The ring grows on demand up to
    /// `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            next_seq: 0,
            entries: VecDeque::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Append a transition, evicting the oldest entry when full. Denials are
    /// not recorded.
    pub fn record(&mut self, event: &Event, at: Instant) {
        if !self.is_enabled() || !event.is_transition() {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Recorded {
            seq: self.next_seq,
            at,
            event: event.clone(),
        });
        self.next_seq += 1;
    }

    pub fn entries(&self) -> Vec<Recorded> {
        self.entries.iter().cloned().collect()
    }

    /// Number of transitions recorded so far, including evicted ones
    pub fn total_recorded(&self) -> u64 {
        self.next_seq
    }

    /// States `actor` moved through, oldest first
    pub fn trajectory(&self, actor: ActorId) -> Vec<ActorState> {
        self.entries
            .iter()
            .filter(|r| r.event.actor() == Some(actor))
            .filter_map(|r| r.event.resulting_state())
            .collect()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
