// SPDX-License-Identifier: MIT OR Apache-2.0
//! Realtime timeline execution.
//!
//! The executor walks the sorted event list with a single control flow that
//! alternates between sleeping and dispatching. Each delay is computed
//! against the absolute schedule (the previous event's *scheduled* start,
//! not measured elapsed time), so rounding never accumulates across events;
//! per-step oversleep is not retroactively corrected. Audio playback is the
//! only concurrent activity: `play` hands off to an independent voice and
//! returns immediately.

use crate::command::PhysicalAction;
use crate::error::ExecuteError;
use crate::resolve::{ResolvedEvent, SoundHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Physical mechanism boundary. Operations are synchronous and expected to
/// return quickly; a blocking implementation must bound its own latency so
/// it cannot desynchronize the schedule.
pub trait Actuator {
    /// Open the mechanism
    fn open(&mut self) -> Result<(), ExecuteError>;
    /// Close the mechanism
    fn close(&mut self) -> Result<(), ExecuteError>;
}

/// Audio playback boundary. `play` must be non-blocking (fire-and-forget)
/// and support at least 10 concurrent voices, since overlapping cues are
/// expected by design.
pub trait AudioOutput {
    /// Start the sound playing asynchronously
    fn play(&mut self, sound: SoundHandle) -> Result<(), ExecuteError>;
}

/// Cooperative cancellation flag, polled once per event between the sleep
/// and the dispatch. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect at the next event checkpoint
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Execute a resolved timeline in real time.
///
/// Actuator and playback failures are logged and the remaining schedule
/// continues: a live sequence cannot be rolled back, so completing as much
/// of the show as possible beats failing fast. Only an empty timeline or a
/// cancellation request ends the run early.
pub fn execute(
    events: &[ResolvedEvent],
    actuator: &mut dyn Actuator,
    audio: &mut dyn AudioOutput,
    cancel: &CancelToken,
) -> Result<(), ExecuteError> {
    if events.is_empty() {
        return Err(ExecuteError::EmptyTimeline);
    }

    let t0 = Instant::now();
    let mut current = 0.0_f64;

    for (index, event) in events.iter().enumerate() {
        let delay = event.start_time - current;
        if delay > 0.0 {
            thread::sleep(Duration::from_secs_f64(delay));
        }

        if cancel.is_cancelled() {
            tracing::info!(dispatched = index, "execution cancelled");
            return Err(ExecuteError::Cancelled);
        }

        match event.physical {
            PhysicalAction::Open => {
                if let Err(err) = actuator.open() {
                    tracing::warn!(index, "{err}");
                }
            }
            PhysicalAction::Close => {
                if let Err(err) = actuator.close() {
                    tracing::warn!(index, "{err}");
                }
            }
            PhysicalAction::None => {}
        }

        if let Err(err) = audio.play(event.sound) {
            tracing::warn!(index, "{err}");
        }

        tracing::debug!(
            index,
            t = event.start_time,
            action = event.physical.name(),
            "cue dispatched"
        );
        current = event.start_time;
    }

    // Hold until the longest-running sound finishes so the process does not
    // exit mid-playback.
    let max_end = events.iter().map(ResolvedEvent::end_time).fold(0.0, f64::max);
    if max_end > current {
        thread::sleep(Duration::from_secs_f64(max_end - current));
    }

    tracing::info!(elapsed = ?t0.elapsed(), "sequence completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Actuator + audio double that records dispatch order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail: bool,
    }

    impl Actuator for Recorder {
        fn open(&mut self) -> Result<(), ExecuteError> {
            self.calls.push("open".into());
            if self.fail {
                return Err(ExecuteError::Actuator("stuck".into()));
            }
            Ok(())
        }

        fn close(&mut self) -> Result<(), ExecuteError> {
            self.calls.push("close".into());
            if self.fail {
                return Err(ExecuteError::Actuator("stuck".into()));
            }
            Ok(())
        }
    }

    impl AudioOutput for Recorder {
        fn play(&mut self, sound: SoundHandle) -> Result<(), ExecuteError> {
            self.calls.push(format!("play {}", sound.0));
            if self.fail {
                return Err(ExecuteError::Playback("no voice".into()));
            }
            Ok(())
        }
    }

    fn event(start: f64, duration: f64, physical: PhysicalAction, id: u32) -> ResolvedEvent {
        ResolvedEvent {
            start_time: start,
            duration,
            sound: SoundHandle(id),
            physical,
        }
    }

    #[test]
    fn test_empty_timeline_is_reported() {
        let mut actuator = Recorder::default();
        let mut audio = Recorder::default();
        let result = execute(&[], &mut actuator, &mut audio, &CancelToken::new());
        assert_eq!(result, Err(ExecuteError::EmptyTimeline));
        assert!(actuator.calls.is_empty());
        assert!(audio.calls.is_empty());
    }

    #[test]
    fn test_dispatch_order_and_actions() {
        let events = [
            event(0.0, 0.0, PhysicalAction::Open, 0),
            event(0.005, 0.0, PhysicalAction::None, 1),
            event(0.01, 0.0, PhysicalAction::Close, 2),
        ];
        let mut actuator = Recorder::default();
        let mut audio = Recorder::default();
        execute(&events, &mut actuator, &mut audio, &CancelToken::new()).unwrap();
        assert_eq!(actuator.calls, ["open", "close"]);
        assert_eq!(audio.calls, ["play 0", "play 1", "play 2"]);
    }

    #[test]
    fn test_negative_delay_is_clamped() {
        // Schedule going backwards must not panic or sleep; both events
        // still dispatch in list order.
        let events = [
            event(0.01, 0.0, PhysicalAction::None, 0),
            event(0.0, 0.0, PhysicalAction::None, 1),
        ];
        let mut actuator = Recorder::default();
        let mut audio = Recorder::default();
        execute(&events, &mut actuator, &mut audio, &CancelToken::new()).unwrap();
        assert_eq!(audio.calls, ["play 0", "play 1"]);
    }

    #[test]
    fn test_trailing_wait_covers_longest_sound() {
        let events = [
            event(0.0, 0.06, PhysicalAction::None, 0),
            event(0.01, 0.0, PhysicalAction::None, 1),
        ];
        let mut actuator = Recorder::default();
        let mut audio = Recorder::default();
        let t0 = Instant::now();
        execute(&events, &mut actuator, &mut audio, &CancelToken::new()).unwrap();
        // last dispatch at 0.01, longest sound ends at 0.06
        assert!(t0.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_cancellation_stops_before_dispatch() {
        let events = [
            event(0.0, 0.0, PhysicalAction::None, 0),
            event(0.01, 0.0, PhysicalAction::Open, 1),
        ];
        let cancel = CancelToken::new();
        let mut actuator = Recorder::default();
        let mut audio = Recorder::default();
        cancel.cancel();
        let result = execute(&events, &mut actuator, &mut audio, &cancel);
        assert_eq!(result, Err(ExecuteError::Cancelled));
        assert!(actuator.calls.is_empty());
        assert!(audio.calls.is_empty());
    }

    #[test]
    fn test_dispatch_failures_do_not_abort() {
        let events = [
            event(0.0, 0.0, PhysicalAction::Open, 0),
            event(0.005, 0.0, PhysicalAction::Close, 1),
        ];
        let mut actuator = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut audio = Recorder {
            fail: true,
            ..Recorder::default()
        };
        execute(&events, &mut actuator, &mut audio, &CancelToken::new()).unwrap();
        assert_eq!(actuator.calls, ["open", "close"]);
        assert_eq!(audio.calls, ["play 0", "play 1"]);
    }
}
