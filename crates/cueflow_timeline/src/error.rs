// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error taxonomy for resolution and execution.

use std::path::PathBuf;
use thiserror::Error;

/// Per-command resolution failure. These are reported and the offending
/// command dropped; they never abort resolution of the remaining script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The command name is not in the catalog
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// The cue's sound asset could not be found or decoded
    #[error("sound file not found: {}", .0.display())]
    AssetNotFound(PathBuf),
    /// The sync expression has an unrecognized anchor or unparsable offset
    #[error("unknown sync base: {0}")]
    UnknownSyncBase(String),
}

/// Execution failure. Only [`ExecuteError::EmptyTimeline`] and
/// [`ExecuteError::Cancelled`] propagate out of the executor; actuator and
/// playback failures are logged per event and the schedule continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    /// No events survived resolution, nothing to do
    #[error("timeline is empty, nothing to do")]
    EmptyTimeline,
    /// A physical actuator operation failed
    #[error("actuator failure: {0}")]
    Actuator(String),
    /// Starting audio playback failed
    #[error("playback failure: {0}")]
    Playback(String),
    /// Execution was cancelled between events
    #[error("execution cancelled")]
    Cancelled,
}
