// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cue script loading and tokenizing.
//!
//! A script is a plain text file, one cue per line:
//! `<command> [-S <syncExpr>]`. Blank lines and `#` comments are skipped.
//! Tokens beyond the recognized pair are ignored, and a `-S` flag with no
//! following expression is treated as absent.

use anyhow::{Context, Result};
use cueflow_timeline::Command;
use std::fs;
use std::path::Path;

/// Read and tokenize a cue script file.
pub fn load_script(path: &Path) -> Result<Vec<Command>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    Ok(parse_script(&text))
}

/// Tokenize script text into commands.
pub fn parse_script(text: &str) -> Vec<Command> {
    let mut commands = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };

        let sync = if tokens.next() == Some("-S") {
            tokens.next()
        } else {
            None
        };

        commands.push(match sync {
            Some(expr) => Command::with_sync(name, expr),
            None => Command::new(name),
        });
    }

    commands
}
