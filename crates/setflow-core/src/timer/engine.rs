//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` once per second
//! while the workout plays.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! Time-kind activities count down one second per tick and auto-advance on
//! expiry; reps-kind activities hold until `complete_reps()`. Short audio
//! cues fire while 2-4 seconds remain, a long cue at exactly 1. A platform
//! wake lock is held exactly while the engine is `Running`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(flatten(&workout), Box::new(NoopPlatform));
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) on advancement/completion
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::platform::Platform;
use crate::events::Event;
use crate::workout::{total_duration_secs, Activity, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Cursor moved past the last activity.
    Completed,
}

/// Remaining-seconds window (inclusive) in which the short cue fires.
const SHORT_CUE_WINDOW: std::ops::RangeInclusive<u64> = 2..=4;
/// Remaining seconds at which the long cue fires.
const LONG_CUE_AT: u64 = 1;

/// Core timer engine.
///
/// Walks a flattened activity sequence. The sequence is read-only once
/// loaded; replacing it wholesale via [`TimerEngine::set_activities`] resets
/// the cursor, countdown and elapsed time so stale indices can never be
/// observed.
pub struct TimerEngine {
    activities: Vec<Activity>,
    state: TimerState,
    cursor: usize,
    /// Remaining seconds for the current activity (0 for reps-kind).
    remaining_secs: u64,
    /// Cumulative seconds consumed by countdown ticks.
    elapsed_secs: u64,
    platform: Box<dyn Platform>,
    lock_held: bool,
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("remaining_secs", &self.remaining_secs)
            .field("elapsed_secs", &self.elapsed_secs)
            .field("activities", &self.activities.len())
            .finish()
    }
}

impl TimerEngine {
    /// Create a new engine over a flattened activity sequence.
    ///
    /// Starts in `Idle` with the first activity's countdown loaded.
    pub fn new(activities: Vec<Activity>, platform: Box<dyn Platform>) -> Self {
        let remaining_secs = activities.first().map(first_countdown).unwrap_or(0);
        Self {
            activities,
            state: TimerState::Idle,
            cursor: 0,
            remaining_secs,
            elapsed_secs: 0,
            platform,
            lock_held: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.state == TimerState::Completed
    }

    pub fn current_activity(&self) -> Option<&Activity> {
        self.activities.get(self.cursor)
    }

    pub fn next_activity(&self) -> Option<&Activity> {
        self.activities.get(self.cursor + 1)
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Total planned seconds across the whole sequence.
    pub fn total_secs(&self) -> u64 {
        total_duration_secs(&self.activities)
    }

    /// 0.0 .. 1.0 progress within the current activity.
    pub fn activity_progress(&self) -> f64 {
        let total = self
            .current_activity()
            .and_then(|a| a.duration)
            .unwrap_or(0);
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// 0.0 .. 100.0 progress across the entire workout.
    pub fn workout_progress_pct(&self) -> f64 {
        let total = self.total_secs() as f64;
        if total == 0.0 {
            return 0.0;
        }
        (self.elapsed_secs as f64 / total * 100.0).min(100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let activity = self.current_activity();
        Event::StateSnapshot {
            state: self.state,
            activity_index: self.cursor,
            activity_name: activity.map(|a| a.name.clone()).unwrap_or_default(),
            kind: activity
                .map(|a| a.kind)
                .unwrap_or(crate::workout::ActivityKind::Exercise),
            unit: activity.map(|a| a.unit).unwrap_or_default(),
            current_set: activity.map(|a| a.current_set).unwrap_or(0),
            total_sets: activity.map(|a| a.total_sets).unwrap_or(0),
            remaining_secs: self.remaining_secs,
            elapsed_secs: self.elapsed_secs,
            total_secs: self.total_secs(),
            progress_pct: self.workout_progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// `Idle | Paused | Completed -> Running`. No-op while already running
    /// or when the sequence is empty.
    pub fn start(&mut self) -> Option<Event> {
        if self.activities.is_empty() || self.state == TimerState::Running {
            return None;
        }
        self.state = TimerState::Running;
        self.acquire_wake_lock();
        Some(Event::TimerStarted {
            activity_index: self.cursor,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// `Running -> Paused`. Countdown and cursor freeze in place.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        self.release_wake_lock();
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Any state -> `Idle`, cursor back to 0, elapsed time cleared.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.cursor = 0;
        self.remaining_secs = self.activities.first().map(first_countdown).unwrap_or(0);
        self.elapsed_secs = 0;
        self.release_wake_lock();
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance one second. Call exactly once per second while playing.
    ///
    /// Only has an effect while `Running` and the current activity is
    /// time-kind: decrements the countdown (firing audio cues near the end)
    /// or, once the countdown is exhausted, advances to the next activity.
    /// Reps-kind activities are unaffected; they advance via
    /// [`TimerEngine::complete_reps`].
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let current = self.activities.get(self.cursor)?;
        if current.unit != Unit::Time {
            return None;
        }
        if self.remaining_secs > 0 {
            let at_tick = self.remaining_secs;
            self.remaining_secs -= 1;
            self.elapsed_secs += 1;
            if SHORT_CUE_WINDOW.contains(&at_tick) {
                self.platform.play_short_cue();
            } else if at_tick == LONG_CUE_AT {
                self.platform.play_long_cue();
            }
            None
        } else {
            self.advance()
        }
    }

    /// Confirm a reps-kind activity is done and move on.
    ///
    /// Only valid while the current activity is reps-kind; mirrors automatic
    /// time-based advancement otherwise.
    pub fn complete_reps(&mut self) -> Option<Event> {
        let current = self.activities.get(self.cursor)?;
        if current.unit != Unit::Reps {
            return None;
        }
        self.advance()
    }

    /// Move the cursor directly to `index` (overview-table navigation).
    ///
    /// Elapsed time is recomputed as the planned durations of everything
    /// strictly before the target. Clears `Completed`.
    pub fn jump_to(&mut self, index: usize) -> Option<Event> {
        let target = self.activities.get(index)?;
        let from = self.cursor;
        self.cursor = index;
        self.remaining_secs = target.duration.unwrap_or(0);
        self.elapsed_secs = total_duration_secs(&self.activities[..index]);
        if self.state == TimerState::Completed {
            self.state = TimerState::Paused;
        }
        Some(Event::ActivityJumped {
            from_index: from,
            to_index: index,
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Replace the sequence wholesale (the source workout changed).
    /// All cursor/countdown/elapsed state resets so stale indices can never
    /// be referenced.
    pub fn set_activities(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
        self.reset();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Option<Event> {
        let from = self.cursor;
        if self.cursor + 1 < self.activities.len() {
            self.cursor += 1;
            let next = &self.activities[self.cursor];
            self.remaining_secs = next.duration.unwrap_or(0);
            Some(Event::ActivityAdvanced {
                from_index: from,
                to_index: self.cursor,
                kind: next.kind,
                unit: next.unit,
                duration_secs: self.remaining_secs,
                at: Utc::now(),
            })
        } else {
            self.state = TimerState::Completed;
            self.release_wake_lock();
            Some(Event::WorkoutCompleted {
                elapsed_secs: self.elapsed_secs,
                at: Utc::now(),
            })
        }
    }

    fn acquire_wake_lock(&mut self) {
        if self.lock_held {
            return;
        }
        match self.platform.acquire_wake_lock() {
            Ok(()) => self.lock_held = true,
            Err(e) => tracing::warn!("wake lock unavailable: {e}"),
        }
    }

    fn release_wake_lock(&mut self) {
        if self.lock_held {
            self.platform.release_wake_lock();
            self.lock_held = false;
        }
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.release_wake_lock();
    }
}

fn first_countdown(activity: &Activity) -> u64 {
    activity.duration.unwrap_or(0)
}
