//! Platform capabilities injected into the timer engine.
//!
//! The engine itself never touches audio hardware or display power: it calls
//! through this trait, so it stays fully unit-testable. Implementations are
//! best-effort; the engine treats every failure as non-fatal.

use crate::error::Result;

/// Audio-cue and wake-lock capability of the host environment.
pub trait Platform {
    /// Short countdown cue, fired once per qualifying second near the end of
    /// a timed activity. Implementations swallow playback failures.
    fn play_short_cue(&mut self);

    /// Long cue fired at exactly one second remaining.
    fn play_long_cue(&mut self);

    /// Keep the display awake while the timer runs. Failure means the lock
    /// is unavailable; the engine logs and carries on.
    fn acquire_wake_lock(&mut self) -> Result<()>;

    /// Release a previously acquired wake lock. Idempotent.
    fn release_wake_lock(&mut self);
}

/// A platform with no audio and no wake lock, for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlatform;

impl Platform for NoopPlatform {
    fn play_short_cue(&mut self) {}

    fn play_long_cue(&mut self) {}

    fn acquire_wake_lock(&mut self) -> Result<()> {
        Ok(())
    }

    fn release_wake_lock(&mut self) {}
}
