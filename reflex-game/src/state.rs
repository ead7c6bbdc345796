//! The round state machine: Welcome → Wait → Stimulus → {Loss | Result} → Welcome.
//!
//! Every timed screen is polled through [`GameStateMachine::tick`]; nothing
//! here sleeps. Input is handled with the time it was received, so a reaction
//! is measured to the key press, not to the frame that noticed it.

use crate::config::GameConfig;
use crate::error::Fault;
use crate::name::NameInput;
use crate::persistence::PersistenceGateway;
use rand::Rng;
use reflex_core::{
    GameAttempt, InputEvent, Key, Layout, LossReason, PlayerDataset, StampedEvent, Target,
};
use reflex_timing::{ReactionTimer, Timer, TimerHandle, TimerState};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of feeding one event or one tick to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Still on the same screen.
    Continue,
    /// Moved to another screen.
    Advance,
    /// Quit signal received.
    Interrupted,
}

impl Poll {
    fn merge(self, other: Poll) -> Poll {
        match (self, other) {
            (Poll::Interrupted, _) | (_, Poll::Interrupted) => Poll::Interrupted,
            (Poll::Advance, _) | (_, Poll::Advance) => Poll::Advance,
            _ => Poll::Continue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Welcome,
    Wait {
        deadline_ns: u64,
    },
    Stimulus,
    Loss {
        reason: LossReason,
        until_ns: u64,
    },
    Result {
        time_ms: u32,
        best_ms: u32,
        mean_ms: f64,
        saved: bool,
    },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Wait { .. } => "wait",
            Screen::Stimulus => "stimulus",
            Screen::Loss { .. } => "loss",
            Screen::Result { .. } => "result",
        }
    }
}

pub struct GameStateMachine<T, R, G>
where
    T: Timer,
    R: Rng,
    G: PersistenceGateway,
{
    pub(crate) config: GameConfig,
    pub(crate) timer: T,
    rng: R,
    store: G,
    reaction: ReactionTimer,
    reaction_handle: Option<TimerHandle>,
    pub(crate) layout: Layout,
    pub(crate) screen: Screen,
    pub(crate) screen_entered_ns: u64,
    pub(crate) name: NameInput,
    attempt: Option<GameAttempt>,
    pub(crate) dataset: PlayerDataset,
    wait_delay: Option<Duration>,
}

impl<T, R, G> GameStateMachine<T, R, G>
where
    T: Timer,
    R: Rng,
    G: PersistenceGateway,
{
    pub fn new(config: GameConfig, timer: T, rng: R, store: G) -> Self {
        let reaction = ReactionTimer::new(config.stimulus_timeout());
        let name = NameInput::new(config.name_max_chars);
        let mut machine = Self {
            config,
            timer,
            rng,
            store,
            reaction,
            reaction_handle: None,
            layout: Layout::default(),
            screen: Screen::Welcome,
            screen_entered_ns: 0,
            name,
            attempt: None,
            dataset: PlayerDataset::new(),
            wait_delay: None,
        };
        machine.enter_welcome();
        machine
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn attempt(&self) -> Option<&GameAttempt> {
        self.attempt.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }

    /// Dataset snapshot backing the leaderboard and histogram.
    pub fn dataset(&self) -> &PlayerDataset {
        &self.dataset
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    /// Delay rolled on the most recent entry to Wait.
    pub fn wait_delay(&self) -> Option<Duration> {
        self.wait_delay
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// One scheduler iteration: every pending event in order, then the clock.
    pub fn step<I>(&mut self, events: I) -> Result<Poll, Fault>
    where
        I: IntoIterator<Item = StampedEvent>,
    {
        let mut poll = Poll::Continue;
        for event in events {
            poll = poll.merge(self.handle_event(event)?);
            if poll == Poll::Interrupted {
                return Ok(poll);
            }
        }
        Ok(poll.merge(self.tick()?))
    }

    pub fn handle_event(&mut self, stamped: StampedEvent) -> Result<Poll, Fault> {
        let StampedEvent { at_ns, event } = stamped;
        if event == InputEvent::Quit {
            info!(screen = self.screen.name(), "quit requested");
            return Ok(Poll::Interrupted);
        }

        match self.screen {
            Screen::Welcome => Ok(self.welcome_input(event)),
            Screen::Wait { .. } => match event {
                InputEvent::KeyPress(_) => {
                    self.enter_loss(LossReason::EarlyPress)?;
                    Ok(Poll::Advance)
                }
                _ => Ok(Poll::Continue),
            },
            Screen::Stimulus => match event {
                InputEvent::KeyPress(_) => self.stimulus_press(at_ns),
                _ => Ok(Poll::Continue),
            },
            Screen::Loss { .. } => Ok(Poll::Continue),
            Screen::Result { .. } => match event {
                InputEvent::KeyPress(_) => {
                    self.enter_welcome();
                    Ok(Poll::Advance)
                }
                _ => Ok(Poll::Continue),
            },
        }
    }

    /// Advance timed screens whose deadline has passed.
    pub fn tick(&mut self) -> Result<Poll, Fault> {
        let now = self.timer.now();
        match self.screen {
            Screen::Wait { deadline_ns } if now >= deadline_ns => {
                self.enter_stimulus();
                Ok(Poll::Advance)
            }
            Screen::Stimulus => {
                let handle = self.reaction_handle.as_ref().ok_or(Fault::MissingTimer)?;
                if self.reaction.poll(handle, now) == TimerState::TimedOut {
                    self.enter_loss(LossReason::Timeout)?;
                    Ok(Poll::Advance)
                } else {
                    Ok(Poll::Continue)
                }
            }
            Screen::Loss { until_ns, .. } if now >= until_ns => {
                self.enter_welcome();
                Ok(Poll::Advance)
            }
            _ => Ok(Poll::Continue),
        }
    }

    fn welcome_input(&mut self, event: InputEvent) -> Poll {
        match event {
            InputEvent::KeyPress(Key::Enter) => self.submit_name(),
            InputEvent::KeyPress(key) => {
                self.name.edit(key);
                Poll::Continue
            }
            InputEvent::PointerClick { x, y } => match self.layout.hit_test(x, y) {
                Some(Target::Play) => self.submit_name(),
                Some(Target::Quit) => {
                    info!("quit button pressed");
                    Poll::Interrupted
                }
                None => Poll::Continue,
            },
            InputEvent::Quit => Poll::Interrupted,
        }
    }

    fn submit_name(&mut self) -> Poll {
        let Some(name) = self.name.submission() else {
            return Poll::Continue;
        };
        info!(player = name, "round started");
        self.attempt = Some(GameAttempt::new(name));
        self.enter_wait();
        Poll::Advance
    }

    fn stimulus_press(&mut self, at_ns: u64) -> Result<Poll, Fault> {
        let handle = self.reaction_handle.take().ok_or(Fault::MissingTimer)?;
        match self.reaction.poll(&handle, at_ns) {
            TimerState::Waiting => {
                debug!("key press predates the stimulus");
                self.enter_loss(LossReason::EarlyPress)?;
            }
            TimerState::TimedOut => self.enter_loss(LossReason::Timeout)?,
            TimerState::Elapsed(_) => {
                let time_ms = self.reaction.complete(handle, at_ns).max(1);
                self.enter_result(time_ms)?;
            }
        }
        Ok(Poll::Advance)
    }

    fn enter(&mut self, screen: Screen) {
        debug!(from = self.screen.name(), to = screen.name(), "screen change");
        self.screen = screen;
        self.screen_entered_ns = self.timer.now();
    }

    fn enter_welcome(&mut self) {
        self.name.clear();
        self.attempt = None;
        self.reaction_handle = None;
        self.dataset = self.store.load();
        self.enter(Screen::Welcome);
    }

    fn enter_wait(&mut self) {
        let (min, max) = self.config.wait_range_ms;
        // fresh delay on every entry, never reused
        let delay_ms: f64 = self.rng.random_range(min as f64..=max as f64);
        let delay = Duration::from_secs_f64(delay_ms / 1000.0);
        self.wait_delay = Some(delay);
        let deadline_ns = self.timer.now() + delay.as_nanos() as u64;
        debug!(delay_ms = delay.as_millis() as u64, "wait delay rolled");
        self.enter(Screen::Wait { deadline_ns });
    }

    fn enter_stimulus(&mut self) {
        self.enter(Screen::Stimulus);
        self.reaction_handle = Some(self.reaction.start(&self.timer));
    }

    fn enter_loss(&mut self, reason: LossReason) -> Result<(), Fault> {
        let mut attempt = self
            .attempt
            .take()
            .ok_or(Fault::MissingAttempt(self.screen.name()))?;
        attempt.lose(reason);
        info!(player = %attempt.player_name, ?reason, "round lost");
        self.reaction_handle = None;
        let until_ns = self.timer.now() + self.config.loss_display().as_nanos() as u64;
        self.enter(Screen::Loss { reason, until_ns });
        Ok(())
    }

    fn enter_result(&mut self, time_ms: u32) -> Result<(), Fault> {
        let mut attempt = self
            .attempt
            .take()
            .ok_or(Fault::MissingAttempt(self.screen.name()))?;
        attempt.react(time_ms);
        let player = attempt.player_name.clone();
        let record = attempt
            .into_record()
            .ok_or(Fault::MissingAttempt("result"))??;

        let mut dataset = self.store.load();
        dataset.push(record);
        let saved = match self.store.save(&dataset) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    error = %e,
                    cause = ?std::error::Error::source(&e),
                    "result kept in memory only"
                );
                false
            }
        };
        info!(player = %player, time_ms, saved, "round finished");

        let best_ms = reflex_core::stats::best(&dataset);
        let mean_ms = reflex_core::stats::mean(&dataset);
        self.dataset = dataset;
        self.enter(Screen::Result {
            time_ms,
            best_ms,
            mean_ms,
            saved,
        });
        Ok(())
    }
}
