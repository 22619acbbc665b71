// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing infrastructure for coordinator events

/// Trait for records that should be traced
///
/// Provides consistent naming and structured fields for logging.
pub trait TracedEvent {
    /// Event name for log records (e.g., "actor:active", "token:released")
    fn name(&self) -> &'static str;

    /// Key-value pairs for structured logging
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// Emit a debug record for an event on behalf of `op`
pub(crate) fn trace_event(op: &'static str, event: &impl TracedEvent) {
    tracing::debug!(op, event = event.name(), fields = ?event.fields(), "event");
}
