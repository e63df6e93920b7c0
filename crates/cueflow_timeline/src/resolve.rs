// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline resolution.
//!
//! A single forward pass turns commands into absolute start times. Each
//! command is anchored against the previous *successfully resolved* command
//! in script order, so sync chains are linear and independent of the final
//! time ordering. After the pass the timeline is normalized so the earliest
//! event starts at zero, then stably sorted by start time.

use crate::catalog::CommandCatalog;
use crate::command::{Command, PhysicalAction, SyncAnchor};
use crate::error::ResolveError;
use crate::sync::parse_sync;
use std::path::Path;

/// Opaque handle to a loaded, ready-to-play sound asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// A loaded asset: its handle plus playback duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedSound {
    /// Handle for later playback
    pub handle: SoundHandle,
    /// Playback duration in seconds
    pub duration: f64,
}

/// Loads sound assets and reports their durations.
///
/// Relative paths are interpreted by the implementation (typically against a
/// configured sounds directory). A missing or undecodable asset fails with
/// [`ResolveError::AssetNotFound`].
pub trait AssetLoader {
    /// Load the asset at `path`, returning a playback handle and duration
    fn load(&mut self, path: &Path) -> Result<LoadedSound, ResolveError>;
}

/// One scheduled cue: start time, duration, sound and physical action.
/// Immutable once resolution completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEvent {
    /// Absolute start time in seconds, never negative after normalization
    pub start_time: f64,
    /// Playback duration of the cue's sound in seconds
    pub duration: f64,
    /// Handle to the cue's loaded sound
    pub sound: SoundHandle,
    /// Physical action fired at the start time
    pub physical: PhysicalAction,
}

impl ResolvedEvent {
    /// Time at which this event's sound finishes
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// Output of resolution: the ordered events plus the per-command failures
/// that were reported and skipped along the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    /// Events sorted non-decreasing by start time, script order on ties
    pub events: Vec<ResolvedEvent>,
    /// Commands dropped during resolution, in script order
    pub skipped: Vec<ResolveError>,
}

impl Timeline {
    /// Whether no events survived resolution
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of scheduled events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Resolve commands into an absolute, normalized, time-ordered timeline.
///
/// Commands with an unknown name, missing asset or malformed sync
/// expression are reported and dropped without touching the prev-state the
/// next command anchors against.
pub fn resolve(
    commands: &[Command],
    catalog: &CommandCatalog,
    loader: &mut dyn AssetLoader,
) -> Timeline {
    let mut timeline = Timeline::default();
    let mut prev_start = 0.0_f64;
    let mut prev_dur = 0.0_f64;

    for command in commands {
        match resolve_one(command, catalog, loader, prev_start, prev_dur) {
            Ok(event) => {
                prev_start = event.start_time;
                prev_dur = event.duration;
                timeline.events.push(event);
            }
            Err(err) => {
                tracing::warn!(command = %command.name, "skipping cue: {err}");
                timeline.skipped.push(err);
            }
        }
    }

    normalize(&mut timeline.events);
    timeline
        .events
        .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    tracing::debug!(
        events = timeline.events.len(),
        skipped = timeline.skipped.len(),
        "timeline resolved"
    );
    timeline
}

fn resolve_one(
    command: &Command,
    catalog: &CommandCatalog,
    loader: &mut dyn AssetLoader,
    prev_start: f64,
    prev_dur: f64,
) -> Result<ResolvedEvent, ResolveError> {
    let spec = catalog
        .get(&command.name)
        .ok_or_else(|| ResolveError::UnknownCommand(command.name.clone()))?;

    let loaded = loader.load(&spec.sound)?;
    let sync = parse_sync(command.sync.as_deref())?;

    let start_time = match sync.anchor {
        SyncAnchor::Default => prev_start + prev_dur,
        SyncAnchor::Start => prev_start + sync.offset,
        // Literal finish semantics: align this cue's end with the
        // predecessor's end, shift by the offset, then back off by this
        // cue's own duration so start_time names the cue's start.
        SyncAnchor::Finish => prev_start + prev_dur + sync.offset - loaded.duration,
    };

    Ok(ResolvedEvent {
        start_time,
        duration: loaded.duration,
        sound: loaded.handle,
        physical: spec.physical,
    })
}

/// Shift the timeline so the earliest event starts at exactly zero. Only
/// the minimum itself can dip below zero after the subtraction, and only by
/// floating-point slack, so residual negatives clamp to zero.
fn normalize(events: &mut [ResolvedEvent]) {
    let Some(min_start) = events
        .iter()
        .map(|e| e.start_time)
        .reduce(f64::min)
    else {
        return;
    };

    for event in events {
        event.start_time = (event.start_time - min_start).max(0.0);
    }
}
