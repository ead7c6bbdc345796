//! Outer driver tying the state machine to a presentation layer.

use crate::error::Fault;
use crate::persistence::PersistenceGateway;
use crate::state::{GameStateMachine, Poll};
use rand::Rng;
use reflex_core::{Frame, Layout, StampedEvent};
use reflex_timing::Timer;

/// Draws frames and reports input. Implemented by the windowing layer.
pub trait Presentation {
    type Error: std::fmt::Display;

    fn render(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    /// Drain everything received since the previous call, oldest first.
    fn poll_events(&mut self) -> Vec<StampedEvent>;

    fn viewport(&self) -> Layout;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Running,
    Quit,
}

pub struct Session<T, R, G>
where
    T: Timer,
    R: Rng,
    G: PersistenceGateway,
{
    machine: GameStateMachine<T, R, G>,
    iterations: u64,
}

impl<T, R, G> Session<T, R, G>
where
    T: Timer,
    R: Rng,
    G: PersistenceGateway,
{
    pub fn new(machine: GameStateMachine<T, R, G>) -> Self {
        Self {
            machine,
            iterations: 0,
        }
    }

    pub fn machine(&self) -> &GameStateMachine<T, R, G> {
        &self.machine
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// One loop iteration: poll input, advance the machine, draw.
    ///
    /// A quit returns before drawing. Results are already on disk by then.
    pub fn iterate<P: Presentation>(
        &mut self,
        presentation: &mut P,
    ) -> Result<SessionOutcome, Fault> {
        self.iterations += 1;
        self.machine.set_layout(presentation.viewport());
        let events = presentation.poll_events();
        if self.machine.step(events)? == Poll::Interrupted {
            return Ok(SessionOutcome::Quit);
        }
        presentation
            .render(&self.machine.frame())
            .map_err(|e| Fault::Presentation(e.to_string()))?;
        Ok(SessionOutcome::Running)
    }
}
