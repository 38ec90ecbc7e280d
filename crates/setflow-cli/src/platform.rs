//! Terminal implementation of the engine's platform capability.

use std::io::Write;

use setflow_core::{Platform, Result};

/// Audio cues via the terminal bell; no display wake lock is available in a
/// terminal session, so the lock is a logged no-op.
pub struct TerminalPlatform {
    bell: bool,
}

impl TerminalPlatform {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }

    fn ring(&self, times: usize) {
        if !self.bell {
            return;
        }
        let mut stdout = std::io::stdout();
        for _ in 0..times {
            // Playback failure is non-fatal.
            let _ = stdout.write_all(b"\x07");
        }
        let _ = stdout.flush();
    }
}

impl Platform for TerminalPlatform {
    fn play_short_cue(&mut self) {
        self.ring(1);
    }

    fn play_long_cue(&mut self) {
        self.ring(2);
    }

    fn acquire_wake_lock(&mut self) -> Result<()> {
        tracing::debug!("wake lock not supported in the terminal player");
        Ok(())
    }

    fn release_wake_lock(&mut self) {}
}
