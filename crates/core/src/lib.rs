// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! philo-core: coordinator for actors sharing resources around a circular table
//!
//! This crate provides:
//! - A pure state table (per-actor state, wait roster, talk token)
//! - A blocking [`Coordinator`] enforcing that neighbours are never active together
//! - Cancellable waits, statistics, and an ordered transition history

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod actor;
pub mod cancel;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod history;
pub mod roster;
pub mod stats;
pub mod table;
pub mod traced;

// Re-exports
pub use actor::{ActorId, ActorState};
pub use cancel::CancelToken;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{CoordinatorConfig, WakeMode};
pub use coordinator::Coordinator;
pub use error::{ConfigError, CoordinatorError, TableError};
pub use event::Event;
pub use history::{History, Recorded};
pub use roster::WaitRoster;
pub use stats::CoordinatorStats;
pub use table::{StateTable, TableInput, TableSnapshot};
pub use traced::TracedEvent;
