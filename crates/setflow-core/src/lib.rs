//! # Setflow Core Library
//!
//! Core business logic for Setflow, a guided workout timer. The surrounding
//! application (planner UI, workout editor, CLI) is a thin layer over this
//! crate.
//!
//! ## Architecture
//!
//! - **Activity Flattener**: a pure transformation that expands a structured
//!   workout (sections -> exercises -> sets -> rest) into a flat, time-ordered
//!   sequence of activities
//! - **Timer Engine**: a state machine that walks the flattened sequence.
//!   It has no internal thread - the caller drives it by invoking `tick()`
//!   once per second
//! - **Storage**: TOML-based configuration under `~/.config/setflow/`
//!
//! ## Key Components
//!
//! - [`Workout`]: workout document model, tolerant of loosely-typed fields
//! - [`flatten`]: workout -> activity sequence expansion
//! - [`TimerEngine`]: countdown/advance state machine
//! - [`Platform`]: injected audio-cue and wake-lock capability

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;
pub mod workout;

pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use storage::Config;
pub use timer::{NoopPlatform, Platform, TimerEngine, TimerState};
pub use workout::{
    flatten, total_duration_secs, Activity, ActivityKind, Exercise, Scalar, Section, Unit, Workout,
};
