pub mod reaction;
pub mod timer;

pub use reaction::{ReactionTimer, TimerHandle, TimerState};
pub use timer::{FrameStats, HighPrecisionTimer, ManualTimer, Timer};
