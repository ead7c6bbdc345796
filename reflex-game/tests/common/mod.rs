#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use reflex_core::{Frame, InputEvent, Key, Layout, PlayerDataset, StampedEvent};
use reflex_game::{GameConfig, GameStateMachine, PersistenceGateway, Presentation, StorageError};
use reflex_timing::{ManualTimer, Timer};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;

/// In-memory store that counts writes and can be told to fail them.
#[derive(Default)]
pub struct MemoryStore {
    pub data: RefCell<PlayerDataset>,
    pub saves: Cell<usize>,
    pub fail_writes: Cell<bool>,
}

impl PersistenceGateway for MemoryStore {
    fn load(&self) -> PlayerDataset {
        self.data.borrow().clone()
    }

    fn save(&self, dataset: &PlayerDataset) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::WriteFailure {
                path: "memory".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saves.set(self.saves.get() + 1);
        *self.data.borrow_mut() = dataset.clone();
        Ok(())
    }
}

pub type Machine = GameStateMachine<ManualTimer, StdRng, MemoryStore>;

pub fn machine_with(config: GameConfig) -> (Machine, ManualTimer) {
    let clock = ManualTimer::new();
    let machine = GameStateMachine::new(
        config,
        clock.clone(),
        StdRng::seed_from_u64(7),
        MemoryStore::default(),
    );
    (machine, clock)
}

/// Machine whose wait delay is always exactly 5 s.
pub fn machine() -> (Machine, ManualTimer) {
    machine_with(GameConfig {
        wait_range_ms: (5_000, 5_000),
        ..Default::default()
    })
}

pub fn key(clock: &ManualTimer, key: Key) -> StampedEvent {
    StampedEvent::new(clock.now(), InputEvent::KeyPress(key))
}

pub fn type_name(m: &mut Machine, clock: &ManualTimer, name: &str) {
    let events: Vec<_> = name.chars().map(|c| key(clock, Key::Char(c))).collect();
    m.step(events).unwrap();
}

/// Type a name, submit it and wait out the delay.
pub fn reach_stimulus(m: &mut Machine, clock: &ManualTimer) {
    type_name(m, clock, "Ana");
    m.step([key(clock, Key::Enter)]).unwrap();
    let delay = m.wait_delay().expect("delay rolled on entering wait");
    clock.advance(delay);
    m.tick().unwrap();
}

/// Presentation fed from a queue, keeping every rendered frame.
pub struct ScriptedPresentation {
    pub pending: VecDeque<Vec<StampedEvent>>,
    pub frames: Vec<Frame>,
    pub fail_render: bool,
}

impl ScriptedPresentation {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            frames: Vec::new(),
            fail_render: false,
        }
    }
}

impl Presentation for ScriptedPresentation {
    type Error = String;

    fn render(&mut self, frame: &Frame) -> Result<(), String> {
        if self.fail_render {
            return Err("surface lost".to_string());
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<StampedEvent> {
        self.pending.pop_front().unwrap_or_default()
    }

    fn viewport(&self) -> Layout {
        Layout::new(1280, 720)
    }
}
