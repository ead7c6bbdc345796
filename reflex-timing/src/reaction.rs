//! Stimulus-to-response latency measurement.

use crate::timer::Timer;
use std::time::Duration;

/// Start instant of one measurement. Not `Clone`: completing it consumes it,
/// so a measurement can only be finished once.
#[derive(Debug, PartialEq, Eq)]
pub struct TimerHandle {
    started_ns: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// The instant polled lies before the start.
    Waiting,
    /// Milliseconds since the start, still inside the timeout.
    Elapsed(u32),
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTimer {
    timeout: Duration,
}

impl ReactionTimer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn start<T: Timer>(&self, timer: &T) -> TimerHandle {
        self.start_at(timer.now())
    }

    pub fn start_at(&self, now_ns: u64) -> TimerHandle {
        TimerHandle { started_ns: now_ns }
    }

    pub fn poll(&self, handle: &TimerHandle, now_ns: u64) -> TimerState {
        let Some(elapsed_ns) = now_ns.checked_sub(handle.started_ns) else {
            return TimerState::Waiting;
        };
        if elapsed_ns >= self.timeout.as_nanos() as u64 {
            TimerState::TimedOut
        } else {
            TimerState::Elapsed(to_millis(elapsed_ns))
        }
    }

    /// Milliseconds from start to `now_ns`, truncated.
    pub fn complete(&self, handle: TimerHandle, now_ns: u64) -> u32 {
        to_millis(now_ns.saturating_sub(handle.started_ns))
    }
}

fn to_millis(ns: u64) -> u32 {
    u32::try_from(ns / 1_000_000).unwrap_or(u32::MAX)
}
