mod common;

use common::{MemoryStore, ScriptedPresentation, key};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reflex_core::{InputEvent, Key, ScreenKind, StampedEvent};
use reflex_game::{Fault, GameConfig, GameStateMachine, Session, SessionOutcome};
use reflex_timing::ManualTimer;

fn session() -> (Session<ManualTimer, StdRng, MemoryStore>, ManualTimer) {
    let clock = ManualTimer::new();
    let config = GameConfig {
        wait_range_ms: (3_000, 3_000),
        ..Default::default()
    };
    let machine = GameStateMachine::new(
        config,
        clock.clone(),
        StdRng::seed_from_u64(3),
        MemoryStore::default(),
    );
    (Session::new(machine), clock)
}

#[test]
fn full_round_through_the_loop() {
    let (mut s, clock) = session();
    let mut screen = ScriptedPresentation::new();

    screen.pending.push_back(vec![
        key(&clock, Key::Char('M')),
        key(&clock, Key::Char('o')),
        key(&clock, Key::Enter),
    ]);
    assert_eq!(s.iterate(&mut screen).unwrap(), SessionOutcome::Running);
    assert_eq!(screen.frames.last().unwrap().kind, ScreenKind::Wait);

    clock.advance_ms(3_000);
    s.iterate(&mut screen).unwrap();
    assert_eq!(screen.frames.last().unwrap().kind, ScreenKind::Stimulus);

    clock.advance_ms(215);
    screen.pending.push_back(vec![key(&clock, Key::Char(' '))]);
    s.iterate(&mut screen).unwrap();
    let result = screen.frames.last().unwrap();
    assert_eq!(result.kind, ScreenKind::Result);
    assert_eq!(result.body[0].text, "Your reaction time: 215 ms");

    assert_eq!(s.iterations(), 3);
    assert_eq!(screen.frames.len(), 3);
    assert_eq!(s.machine().store().data.borrow().len(), 1);
}

#[test]
fn quit_stops_before_drawing() {
    let (mut s, _) = session();
    let mut screen = ScriptedPresentation::new();
    screen
        .pending
        .push_back(vec![StampedEvent::new(0, InputEvent::Quit)]);
    assert_eq!(s.iterate(&mut screen).unwrap(), SessionOutcome::Quit);
    assert!(screen.frames.is_empty());
}

#[test]
fn render_failure_is_a_fault() {
    let (mut s, _) = session();
    let mut screen = ScriptedPresentation::new();
    screen.fail_render = true;
    match s.iterate(&mut screen) {
        Err(Fault::Presentation(msg)) => assert_eq!(msg, "surface lost"),
        other => panic!("expected presentation fault, got {other:?}"),
    }
}
