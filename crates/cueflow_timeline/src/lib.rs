// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline resolver and realtime executor for CueFlow.
//!
//! This crate turns a cue script (an ordered list of commands with relative
//! synchronization anchors) into an absolute, normalized timeline, and then
//! replays that timeline in real time:
//! - Command and sync-expression data model
//! - Command catalog (cue name to sound asset + physical action)
//! - Timeline resolution (anchor arithmetic, normalization, stable ordering)
//! - Realtime execution (wall-clock scheduling, actuator + audio dispatch)
//!
//! ## Architecture
//!
//! Resolution and execution are strictly ordered: [`resolve`] consumes the
//! parsed commands and produces [`ResolvedEvent`]s, which [`execute`] then
//! walks against the wall clock. All I/O lives behind the [`AssetLoader`],
//! [`AudioOutput`] and [`Actuator`] traits so the core stays headless and
//! testable.

pub mod catalog;
pub mod command;
pub mod error;
pub mod execute;
pub mod resolve;
pub mod sync;

pub use catalog::{CommandCatalog, CueSpec};
pub use command::{Command, PhysicalAction, SyncAnchor, SyncSpec};
pub use error::{ExecuteError, ResolveError};
pub use execute::{execute, Actuator, AudioOutput, CancelToken};
pub use resolve::{resolve, AssetLoader, LoadedSound, ResolvedEvent, SoundHandle, Timeline};
pub use sync::parse_sync;
