// SPDX-License-Identifier: MIT OR Apache-2.0
//! Audio engine backed by rodio.
//!
//! The engine owns the output stream for the duration of the run (no global
//! mixer state) and serves both sides of the pipeline: it is the
//! [`AssetLoader`] the resolver measures durations with, and the
//! [`AudioOutput`] the executor fires playback through. Each asset is fully
//! decoded at load time so the duration is exact, and cached by path so
//! repeated cues load once. Playback detaches a fresh sink per cue, so
//! overlapping cues each get their own voice.

use anyhow::{Context, Result};
use cueflow_timeline::{AssetLoader, AudioOutput, ExecuteError, LoadedSound, ResolveError, SoundHandle};
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A fully decoded sound asset.
struct Clip {
    channels: u16,
    sample_rate: u32,
    samples: Vec<i16>,
    duration: f64,
}

/// Rodio-backed asset loader and playback engine.
pub struct AudioEngine {
    /// Output stream, must be kept alive while sinks play
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds_dir: PathBuf,
    clips: Vec<Clip>,
    by_path: HashMap<PathBuf, SoundHandle>,
}

impl AudioEngine {
    /// Open the default audio output. Relative asset paths resolve against
    /// `sounds_dir`.
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .context("failed to open audio output (try --dry-run on headless machines)")?;
        tracing::info!("audio output initialized");
        Ok(Self {
            _stream: stream,
            handle,
            sounds_dir: sounds_dir.into(),
            clips: Vec::new(),
            by_path: HashMap::new(),
        })
    }
}

impl AssetLoader for AudioEngine {
    fn load(&mut self, path: &Path) -> Result<LoadedSound, ResolveError> {
        let full = self.sounds_dir.join(path);
        if let Some(&handle) = self.by_path.get(&full) {
            let duration = self.clips[handle.0 as usize].duration;
            return Ok(LoadedSound { handle, duration });
        }

        let file = File::open(&full).map_err(|_| ResolveError::AssetNotFound(full.clone()))?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|err| {
            tracing::warn!(path = %full.display(), "failed to decode: {err}");
            ResolveError::AssetNotFound(full.clone())
        })?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        if channels == 0 || sample_rate == 0 {
            return Err(ResolveError::AssetNotFound(full));
        }

        let samples: Vec<i16> = decoder.collect();
        let duration = samples.len() as f64 / (f64::from(channels) * f64::from(sample_rate));

        let handle = SoundHandle(self.clips.len() as u32);
        self.clips.push(Clip {
            channels,
            sample_rate,
            samples,
            duration,
        });
        self.by_path.insert(full, handle);
        tracing::debug!(handle = handle.0, duration, "sound loaded");
        Ok(LoadedSound { handle, duration })
    }
}

impl AudioOutput for AudioEngine {
    fn play(&mut self, sound: SoundHandle) -> Result<(), ExecuteError> {
        let clip = self
            .clips
            .get(sound.0 as usize)
            .ok_or_else(|| ExecuteError::Playback(format!("no clip for handle {}", sound.0)))?;

        let sink = Sink::try_new(&self.handle)
            .map_err(|err| ExecuteError::Playback(err.to_string()))?;
        sink.append(SamplesBuffer::new(
            clip.channels,
            clip.sample_rate,
            clip.samples.clone(),
        ));
        sink.detach();
        Ok(())
    }
}

/// Dry-run stand-in: checks that assets exist but reports zero duration and
/// only logs playback, so a script can be validated without an audio device.
pub struct SilentEngine {
    sounds_dir: PathBuf,
    paths: Vec<PathBuf>,
}

impl SilentEngine {
    /// Create a silent engine resolving assets against `sounds_dir`
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
            paths: Vec::new(),
        }
    }
}

impl AssetLoader for SilentEngine {
    fn load(&mut self, path: &Path) -> Result<LoadedSound, ResolveError> {
        let full = self.sounds_dir.join(path);
        if !full.is_file() {
            return Err(ResolveError::AssetNotFound(full));
        }
        let handle = SoundHandle(self.paths.len() as u32);
        self.paths.push(full);
        Ok(LoadedSound {
            handle,
            duration: 0.0,
        })
    }
}

impl AudioOutput for SilentEngine {
    fn play(&mut self, sound: SoundHandle) -> Result<(), ExecuteError> {
        match self.paths.get(sound.0 as usize) {
            Some(path) => {
                tracing::info!(path = %path.display(), "dry-run: would play");
                Ok(())
            }
            None => Err(ExecuteError::Playback(format!(
                "no asset for handle {}",
                sound.0
            ))),
        }
    }
}
