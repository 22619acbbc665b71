// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the table, configuration, and coordinator

use crate::actor::{ActorId, ActorState};
use std::path::PathBuf;
use thiserror::Error;

/// Transitions the state table refuses to make
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("actor {actor} is not seated at a table of {actors}")]
    InvalidActor { actor: ActorId, actors: usize },
    #[error("actor {actor} must be thinking to request, but is {state}")]
    NotThinking { actor: ActorId, state: ActorState },
    #[error("actor {actor} is not hungry (currently {state})")]
    NotHungry { actor: ActorId, state: ActorState },
    #[error("actor {actor} is not active (currently {state})")]
    NotActive { actor: ActorId, state: ActorState },
    #[error("talk token is not held")]
    TokenNotHeld,
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

/// Errors loading or validating coordinator configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a table needs at least one actor")]
    NoActors,
    #[error("cancel poll interval must be non-zero")]
    ZeroPollInterval,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors returned by coordinator operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("wait cancelled")]
    Cancelled,
}
