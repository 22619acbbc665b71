// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Counters describing coordinator activity

use crate::actor::ActorState;
use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Statistics about grants, releases, and wakeups
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorStats {
    pub grants: u64,
    pub releases: u64,
    /// Grant checks refused because a neighbour was active
    pub deferrals: u64,
    /// Hungry actors that went back to thinking without being granted
    pub withdrawals: u64,
    pub token_grants: u64,
    pub token_releases: u64,
    /// Token checks that found it held
    pub token_busy: u64,
    /// Times a waiter came back from a suspend
    pub wakeups: u64,
    /// Wakeups after which the waiter still could not proceed
    pub spurious_wakeups: u64,
    pub cancellations: u64,
    /// Time from HUNGRY to ACTIVE, summed over every grant
    #[serde(with = "humantime_serde")]
    pub total_wait: Duration,
    #[serde(with = "humantime_serde")]
    pub max_wait: Duration,
}

impl CoordinatorStats {
    /// Count an event emitted by the table
    pub fn observe(&mut self, event: &Event) {
        match event {
            Event::ActorHungry { .. } => {}
            Event::ActorActive { .. } => self.grants += 1,
            Event::ActorThinking { from, .. } => match from {
                ActorState::Active => self.releases += 1,
                _ => self.withdrawals += 1,
            },
            Event::GrantDeferred { .. } => self.deferrals += 1,
            Event::TokenAcquired => self.token_grants += 1,
            Event::TokenReleased => self.token_releases += 1,
            Event::TokenBusy => self.token_busy += 1,
        }
    }

    /// Record how long a granted actor was hungry
    pub fn record_wait(&mut self, waited: Duration) {
        self.total_wait += waited;
        self.max_wait = self.max_wait.max(waited);
    }

    /// Mean time from HUNGRY to ACTIVE, if anything was granted
    pub fn mean_wait(&self) -> Option<Duration> {
        let grants = u32::try_from(self.grants).ok().filter(|g| *g > 0)?;
        Some(self.total_wait / grants)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
