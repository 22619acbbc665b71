// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking coordinator for the seated actors and the talk token
//!
//! One mutex guards the whole table. Waiters suspend on a condition variable
//! and re-check their own predicate after every wake; releases broadcast. A
//! wake therefore never implies the waiter may proceed, it only means
//! something changed.

use crate::actor::{ActorId, ActorState};
use crate::cancel::CancelToken;
use crate::clock::{Clock, SystemClock};
use crate::config::{CoordinatorConfig, WakeMode};
use crate::error::{ConfigError, CoordinatorError, TableError};
use crate::event::Event;
use crate::history::{History, Recorded};
use crate::stats::CoordinatorStats;
use crate::table::{StateTable, TableInput, TableSnapshot};
use crate::traced::trace_event;
use std::collections::HashMap;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Instant;

/// Everything the coordinator lock protects
#[derive(Debug)]
struct Shared {
    table: StateTable,
    stats: CoordinatorStats,
    history: History,
    /// When each currently hungry actor started waiting
    hungry_since: HashMap<ActorId, Instant>,
}

impl Shared {
    /// Run one table transition and account for its events
    fn apply(
        &mut self,
        op: &'static str,
        input: TableInput,
        now: Instant,
    ) -> Result<Vec<Event>, TableError> {
        let (table, events) = self.table.transition(input).inspect_err(|e| {
            tracing::warn!(op, error = %e, "transition rejected");
        })?;
        self.table = table;

        for event in &events {
            trace_event(op, event);
            self.stats.observe(event);
            self.history.record(event, now);
            match event {
                Event::ActorHungry { actor } => {
                    self.hungry_since.insert(*actor, now);
                }
                Event::ActorActive { actor } => {
                    if let Some(since) = self.hungry_since.remove(actor) {
                        self.stats.record_wait(now.saturating_duration_since(since));
                    }
                }
                Event::ActorThinking { actor, .. } => {
                    self.hungry_since.remove(actor);
                }
                _ => {}
            }
        }

        Ok(events)
    }
}

/// Which of the two facets a waiter belongs to
#[derive(Clone, Copy, Debug)]
enum Channel {
    Proceed,
    Talk,
}

/// Coordinates N actors around a table plus a single talk token
///
/// Share it between actor threads with `Arc<Coordinator>`.
#[derive(Debug)]
pub struct Coordinator<C: Clock = SystemClock> {
    config: CoordinatorConfig,
    clock: C,
    shared: Mutex<Shared>,
    proceed: Condvar,
    /// Only waited on in `WakeMode::Split`
    talk: Condvar,
}

impl Coordinator<SystemClock> {
    /// Seat `actors` actors with default settings
    pub fn new(actors: usize) -> Result<Self, ConfigError> {
        Self::from_config(CoordinatorConfig::new(actors))
    }

    pub fn from_config(config: CoordinatorConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Coordinator<C> {
    pub fn with_clock(config: CoordinatorConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(
            actors = config.actors,
            wake_mode = ?config.wake_mode,
            history = config.history_capacity,
            "coordinator created"
        );
        Ok(Self {
            shared: Mutex::new(Shared {
                table: StateTable::new(config.actors),
                stats: CoordinatorStats::default(),
                history: History::new(config.history_capacity),
                hungry_since: HashMap::new(),
            }),
            proceed: Condvar::new(),
            talk: Condvar::new(),
            config,
            clock,
        })
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn actors(&self) -> usize {
        self.config.actors
    }

    // === Proceed Protocol ===

    /// Block until `id` may become active, then mark it active
    ///
    /// The actor must be thinking. It turns hungry, joins the wait roster, and
    /// waits for both neighbours to be inactive. There is no timeout.
    pub fn pick_up(&self, id: impl Into<ActorId>) -> Result<(), CoordinatorError> {
        self.pick_up_inner(id.into(), None)
    }

    /// Like [`pick_up`](Self::pick_up), but gives up once `cancel` is set
    ///
    /// On cancellation the actor is back to thinking and off the roster.
    pub fn pick_up_cancellable(
        &self,
        id: impl Into<ActorId>,
        cancel: &CancelToken,
    ) -> Result<(), CoordinatorError> {
        self.pick_up_inner(id.into(), Some(cancel))
    }

    /// Become active only if that is possible right now
    ///
    /// Returns false and leaves the actor thinking otherwise.
    pub fn try_pick_up(&self, id: impl Into<ActorId>) -> Result<bool, CoordinatorError> {
        let actor = id.into();
        let mut shared = self.lock();
        let now = self.clock.now();

        shared.apply("try_pick_up", TableInput::Request { actor }, now)?;
        shared.apply("try_pick_up", TableInput::Grant { actor }, now)?;
        if shared.table.state(actor)? == ActorState::Active {
            return Ok(true);
        }
        shared.apply("try_pick_up", TableInput::Withdraw { actor }, now)?;
        Ok(false)
    }

    fn pick_up_inner(
        &self,
        actor: ActorId,
        cancel: Option<&CancelToken>,
    ) -> Result<(), CoordinatorError> {
        let mut shared = self.lock();
        shared.apply("pick_up", TableInput::Request { actor }, self.clock.now())?;

        let mut woken = false;
        loop {
            shared.apply("pick_up", TableInput::Grant { actor }, self.clock.now())?;
            if shared.table.state(actor)? == ActorState::Active {
                return Ok(());
            }
            if woken {
                shared.stats.spurious_wakeups += 1;
            }

            if cancel.is_some_and(CancelToken::is_cancelled) {
                shared.apply("pick_up", TableInput::Withdraw { actor }, self.clock.now())?;
                shared.stats.cancellations += 1;
                tracing::info!(%actor, "pick_up cancelled");
                return Err(CoordinatorError::Cancelled);
            }

            shared = self.wait(Channel::Proceed, shared, cancel);
            shared.stats.wakeups += 1;
            woken = true;
        }
    }

    /// Return `id` to thinking and wake every waiter
    ///
    /// Rejected with `NotActive` if the actor is not active; the table is
    /// left untouched and nobody is woken.
    pub fn put_down(&self, id: impl Into<ActorId>) -> Result<(), CoordinatorError> {
        let actor = id.into();
        let mut shared = self.lock();
        shared.apply("put_down", TableInput::Release { actor }, self.clock.now())?;
        self.channel(Channel::Proceed).notify_all();
        Ok(())
    }

    // === Talk Token ===

    /// Block until the talk token is free, then take it
    pub fn request_talk(&self) -> Result<(), CoordinatorError> {
        self.request_talk_inner(None)
    }

    /// Like [`request_talk`](Self::request_talk), but gives up once `cancel` is set
    pub fn request_talk_cancellable(&self, cancel: &CancelToken) -> Result<(), CoordinatorError> {
        self.request_talk_inner(Some(cancel))
    }

    /// Take the talk token only if it is free right now
    pub fn try_request_talk(&self) -> Result<bool, CoordinatorError> {
        let mut shared = self.lock();
        let events = shared.apply("try_request_talk", TableInput::AcquireToken, self.clock.now())?;
        Ok(events.contains(&Event::TokenAcquired))
    }

    fn request_talk_inner(&self, cancel: Option<&CancelToken>) -> Result<(), CoordinatorError> {
        let mut shared = self.lock();

        let mut woken = false;
        loop {
            let events = shared.apply("request_talk", TableInput::AcquireToken, self.clock.now())?;
            if events.contains(&Event::TokenAcquired) {
                return Ok(());
            }
            if woken {
                shared.stats.spurious_wakeups += 1;
            }

            if cancel.is_some_and(CancelToken::is_cancelled) {
                shared.stats.cancellations += 1;
                tracing::info!("request_talk cancelled");
                return Err(CoordinatorError::Cancelled);
            }

            shared = self.wait(Channel::Talk, shared, cancel);
            shared.stats.wakeups += 1;
            woken = true;
        }
    }

    /// Free the talk token and wake every waiter
    ///
    /// The token is anonymous: any caller may end the talk. Rejected with
    /// `TokenNotHeld` if nobody holds it.
    pub fn end_talk(&self) -> Result<(), CoordinatorError> {
        let mut shared = self.lock();
        shared.apply("end_talk", TableInput::ReleaseToken, self.clock.now())?;
        self.channel(Channel::Talk).notify_all();
        Ok(())
    }

    // === Cancellation ===

    /// Cancel `token` and wake every waiter so cancellable waits return now
    pub fn interrupt(&self, token: &CancelToken) {
        token.cancel();
        // Holding the lock orders the flag before any waiter's next check
        let _shared = self.lock();
        self.proceed.notify_all();
        self.talk.notify_all();
    }

    // === Observation ===

    pub fn state(&self, id: impl Into<ActorId>) -> Result<ActorState, CoordinatorError> {
        Ok(self.lock().table.state(id.into())?)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        self.lock().table.snapshot()
    }

    /// Actors currently waiting to proceed, in arrival order
    pub fn waiting(&self) -> Vec<ActorId> {
        self.lock().table.roster().to_vec()
    }

    pub fn is_talking(&self) -> bool {
        self.lock().table.is_token_held()
    }

    pub fn stats(&self) -> CoordinatorStats {
        self.lock().stats.clone()
    }

    /// Recorded transitions, oldest first (empty unless `history_capacity > 0`)
    pub fn history(&self) -> Vec<Recorded> {
        self.lock().history.entries()
    }

    /// States `id` has moved through according to the history ring
    pub fn trajectory(&self, id: impl Into<ActorId>) -> Vec<ActorState> {
        self.lock().history.trajectory(id.into())
    }

    pub fn check_invariants(&self) -> Result<(), TableError> {
        self.lock().table.check_invariants()
    }

    // === Internals ===

    fn lock(&self) -> MutexGuard<'_, Shared> {
        // The table is swapped in whole after a successful transition, so a
        // poisoned lock still guards a consistent table
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn channel(&self, channel: Channel) -> &Condvar {
        match (self.config.wake_mode, channel) {
            (WakeMode::Split, Channel::Talk) => &self.talk,
            _ => &self.proceed,
        }
    }

    /// Release the lock, suspend, and re-acquire on wake
    ///
    /// Cancellable waits wake up at least every `cancel_poll_interval`.
    fn wait<'a>(
        &self,
        channel: Channel,
        guard: MutexGuard<'a, Shared>,
        cancel: Option<&CancelToken>,
    ) -> MutexGuard<'a, Shared> {
        let condvar = self.channel(channel);
        match cancel {
            None => condvar.wait(guard).unwrap_or_else(|e| e.into_inner()),
            Some(_) => condvar
                .wait_timeout(guard, self.config.cancel_poll_interval)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0),
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
