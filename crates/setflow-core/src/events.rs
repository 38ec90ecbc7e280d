use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;
use crate::workout::{ActivityKind, Unit};

/// Every engine transition produces an Event.
/// The presentation layer polls snapshots and reacts to transition events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        activity_index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// Cursor moved to the next activity, either by countdown expiry or by
    /// a reps confirmation.
    ActivityAdvanced {
        from_index: usize,
        to_index: usize,
        kind: ActivityKind,
        unit: Unit,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Cursor moved by direct navigation; elapsed time was recomputed.
    ActivityJumped {
        from_index: usize,
        to_index: usize,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    WorkoutCompleted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        activity_index: usize,
        activity_name: String,
        kind: ActivityKind,
        unit: Unit,
        current_set: u32,
        total_sets: u32,
        remaining_secs: u64,
        elapsed_secs: u64,
        total_secs: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
