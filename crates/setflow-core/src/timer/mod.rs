mod engine;
mod platform;

pub use engine::{TimerEngine, TimerState};
pub use platform::{NoopPlatform, Platform};
