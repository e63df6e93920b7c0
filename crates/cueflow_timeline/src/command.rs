// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command and sync-expression data model.

use serde::{Deserialize, Serialize};

/// Physical device action fired at a cue's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PhysicalAction {
    /// No physical action, sound only
    #[default]
    None,
    /// Open the mechanism
    Open,
    /// Close the mechanism
    Close,
}

impl PhysicalAction {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Open => "open",
            Self::Close => "close",
        }
    }
}

/// Reference point a sync expression measures its offset from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncAnchor {
    /// Chain immediately after the previous cue ends (offset is ignored)
    #[default]
    Default,
    /// Relative to the previous cue's start
    Start,
    /// Align this cue's end with the previous cue's end, then shift
    Finish,
}

/// A parsed sync expression: anchor plus signed offset in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SyncSpec {
    /// Anchor the offset is measured from
    pub anchor: SyncAnchor,
    /// Signed offset in seconds
    pub offset: f64,
}

impl SyncSpec {
    /// Create a sync spec
    pub fn new(anchor: SyncAnchor, offset: f64) -> Self {
        Self { anchor, offset }
    }
}

/// One line of a cue script: a catalog key plus an optional raw sync
/// expression (e.g. `"finish-1.5"`). The expression is parsed during
/// resolution so that malformed input is reported per line, not up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Catalog key naming the cue
    pub name: String,
    /// Raw sync expression, absent for default chaining
    pub sync: Option<String>,
}

impl Command {
    /// Create a command with default chaining
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sync: None,
        }
    }

    /// Create a command with a sync expression
    pub fn with_sync(name: impl Into<String>, sync: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sync: Some(sync.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_action_names() {
        assert_eq!(PhysicalAction::None.name(), "none");
        assert_eq!(PhysicalAction::Open.name(), "open");
        assert_eq!(PhysicalAction::Close.name(), "close");
    }

    #[test]
    fn test_physical_action_defaults_to_none() {
        assert_eq!(PhysicalAction::default(), PhysicalAction::None);
    }
}
