// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command catalog mapping cue names to assets and actions.

use crate::command::PhysicalAction;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a catalog entry cues: a sound asset plus an optional physical action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSpec {
    /// Sound asset path, relative to the sounds directory
    pub sound: PathBuf,
    /// Physical action fired alongside the sound
    #[serde(default)]
    pub physical: PhysicalAction,
}

impl CueSpec {
    /// Create a sound-only cue
    pub fn sound(path: impl Into<PathBuf>) -> Self {
        Self {
            sound: path.into(),
            physical: PhysicalAction::None,
        }
    }

    /// Create a cue with a physical action
    pub fn with_action(path: impl Into<PathBuf>, physical: PhysicalAction) -> Self {
        Self {
            sound: path.into(),
            physical,
        }
    }
}

/// Catalog of known cue names, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandCatalog {
    entries: IndexMap<String, CueSpec>,
}

impl CommandCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cue, replacing any existing entry with the same name
    pub fn insert(&mut self, name: impl Into<String>, spec: CueSpec) {
        self.entries.insert(name.into(), spec);
    }

    /// Look up a cue by name
    pub fn get(&self, name: &str) -> Option<&CueSpec> {
        self.entries.get(name)
    }

    /// Number of cues in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no cues
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over cue names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The built-in show catalog: cat, door, tomte and guest cues.
    pub fn default_show() -> Self {
        let mut catalog = Self::new();
        catalog.insert("cat.run", CueSpec::sound("cat.run.mp3"));
        catalog.insert("cat.meow", CueSpec::sound("cat.want_into.mp3"));
        catalog.insert(
            "door.open",
            CueSpec::with_action("door.open.mp3", PhysicalAction::Open),
        );
        catalog.insert(
            "door.close",
            CueSpec::with_action("door.close.mp3", PhysicalAction::Close),
        );
        catalog.insert("tomte.walk", CueSpec::sound("tomte.walk.mp3"));
        catalog.insert("guest.doorbell", CueSpec::sound("doorbell.mp3"));
        catalog.insert("guest.snowwalk", CueSpec::sound("outside.snowwalk.mp3"));
        catalog
    }
}
