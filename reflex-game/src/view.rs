use crate::persistence::PersistenceGateway;
use crate::state::{GameStateMachine, Screen};
use rand::Rng;
use reflex_core::stats;
use reflex_core::{Button, Frame, Rgb, ScreenKind, TextLine, TextSize};
use reflex_timing::Timer;

impl<T, R, G> GameStateMachine<T, R, G>
where
    T: Timer,
    R: Rng,
    G: PersistenceGateway,
{
    /// Describe the current screen for the presentation layer.
    pub fn frame(&self) -> Frame {
        let histogram = stats::histogram(&self.dataset);
        match self.screen {
            Screen::Welcome => self.welcome_frame(histogram),
            Screen::Wait { .. } => {
                let mut frame = Frame::new(ScreenKind::Wait, histogram);
                frame
                    .line("GET READY", TextSize::Large, Rgb::WHITE)
                    .line(
                        "Press a key when you are told to",
                        TextSize::Medium,
                        Rgb::WHITE,
                    );
                frame
            }
            Screen::Stimulus => {
                let mut frame = Frame::new(ScreenKind::Stimulus, histogram);
                frame.game_background = Rgb::RED;
                frame.line("PRESS NOW!!!", TextSize::Large, Rgb::WHITE);
                frame
            }
            Screen::Loss { reason, .. } => {
                let mut frame = Frame::new(ScreenKind::Loss, histogram);
                frame
                    .body
                    .push(TextLine::new(reason.message(), TextSize::Large, Rgb::WHITE).wrapped());
                frame
            }
            Screen::Result {
                time_ms,
                best_ms,
                mean_ms,
                saved,
            } => {
                let mut frame = Frame::new(ScreenKind::Result, histogram);
                frame.title = Some(TextLine::new("RESULTS!", TextSize::Large, Rgb::GREEN));
                frame.line(
                    format!("Your reaction time: {time_ms} ms"),
                    TextSize::Medium,
                    Rgb::WHITE,
                );
                frame.line(
                    format!("Average person: {} ms", self.config.reference_mean_ms),
                    TextSize::Medium,
                    Rgb::WHITE,
                );
                if best_ms > 0 {
                    frame.line(
                        format!("Best time: {best_ms} ms"),
                        TextSize::Medium,
                        Rgb::WHITE,
                    );
                }
                if mean_ms > 0.0 {
                    frame.line(
                        format!("Players' average: {} ms", mean_ms as u32),
                        TextSize::Medium,
                        Rgb::WHITE,
                    );
                }
                if !saved {
                    frame.line(
                        "Your result could not be saved",
                        TextSize::Small,
                        Rgb::RED,
                    );
                }
                frame.line("Press any key to continue", TextSize::Small, Rgb::WHITE);
                frame.footer = self.credits();
                frame
            }
        }
    }

    fn welcome_frame(&self, histogram: [u32; stats::BUCKET_COUNT]) -> Frame {
        let mut frame = Frame::new(ScreenKind::Welcome, histogram);
        frame.header = self
            .config
            .header
            .as_ref()
            .map(|h| TextLine::new(h.clone(), TextSize::Medium, Rgb::WHITE));

        frame
            .line("TEST YOUR REFLEXES", TextSize::Large, Rgb::WHITE)
            .line("Best Players:", TextSize::Medium, Rgb::WHITE);

        let top = stats::top_n(&self.dataset, self.config.leaderboard_size);
        if top.is_empty() {
            frame.line("No records yet", TextSize::Small, Rgb::WHITE);
        }
        for (rank, record) in top.iter().enumerate() {
            frame.line(
                format!(
                    "{}. {}: {} ms",
                    rank + 1,
                    record.name(),
                    record.reaction_time_ms()
                ),
                TextSize::Small,
                Rgb::WHITE,
            );
        }

        let mean = stats::mean(&self.dataset);
        if mean > 0.0 {
            frame.line(
                format!("Our players' average: {} ms", mean as u32),
                TextSize::Small,
                Rgb::YELLOW,
            );
        }
        frame
            .line(
                format!("Population average: {} ms", self.config.reference_mean_ms),
                TextSize::Small,
                Rgb::YELLOW,
            )
            .line("Enter your name:", TextSize::Medium, Rgb::WHITE)
            .line(
                format!(
                    "{}{}",
                    self.name.text(),
                    if self.cursor_visible() { "|" } else { " " }
                ),
                TextSize::Medium,
                Rgb::WHITE,
            );

        frame.play_button = Some(Button {
            label: "PLAY".to_string(),
            fill: Rgb::GREEN,
            text: Rgb::BLACK,
        });
        frame.show_quit_button = true;
        frame.footer = self.credits();
        frame
    }

    fn cursor_visible(&self) -> bool {
        let blink_ns = self.config.cursor_blink_ms.max(1) * 1_000_000;
        let on_screen = self.timer.now().saturating_sub(self.screen_entered_ns);
        (on_screen / blink_ns) % 2 == 0
    }

    fn credits(&self) -> Option<TextLine> {
        self.config
            .credits
            .as_ref()
            .map(|c| TextLine::new(c.clone(), TextSize::Tiny, Rgb::WHITE))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::error::StorageError;
    use crate::persistence::PersistenceGateway;
    use crate::state::GameStateMachine;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use reflex_core::{InputEvent, Key, PlayerDataset, PlayerRecord, ScreenKind, StampedEvent};
    use reflex_timing::ManualTimer;

    struct Fixed(PlayerDataset);

    impl PersistenceGateway for Fixed {
        fn load(&self) -> PlayerDataset {
            self.0.clone()
        }
        fn save(&self, _: &PlayerDataset) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn machine(
        records: Vec<PlayerRecord>,
    ) -> (GameStateMachine<ManualTimer, StdRng, Fixed>, ManualTimer) {
        let clock = ManualTimer::new();
        let config = GameConfig {
            credits: Some("Made at school".into()),
            ..Default::default()
        };
        let m = GameStateMachine::new(
            config,
            clock.clone(),
            StdRng::seed_from_u64(1),
            Fixed(PlayerDataset::from_records(records)),
        );
        (m, clock)
    }

    fn texts(frame: &reflex_core::Frame) -> Vec<&str> {
        frame.body.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn welcome_without_records() {
        let (m, _) = machine(vec![]);
        let frame = m.frame();
        assert_eq!(frame.kind, ScreenKind::Welcome);
        let body = texts(&frame);
        assert!(body.contains(&"No records yet"));
        assert!(!body.iter().any(|t| t.starts_with("Our players")));
        assert!(body.contains(&"Population average: 250 ms"));
        assert!(frame.play_button.is_some());
        assert!(frame.show_quit_button);
        assert_eq!(frame.footer.unwrap().text, "Made at school");
    }

    #[test]
    fn welcome_lists_leaderboard_and_blinks_cursor() {
        let (mut m, clock) = machine(vec![
            PlayerRecord::new("Leo", 300).unwrap(),
            PlayerRecord::new("Ana", 180).unwrap(),
        ]);
        let body = m.frame().body;
        assert_eq!(body[2].text, "1. Ana: 180 ms");
        assert_eq!(body[3].text, "2. Leo: 300 ms");
        assert_eq!(body[4].text, "Our players' average: 240 ms");
        assert_eq!(m.frame().histogram[0], 1);

        m.step([StampedEvent::new(0, InputEvent::KeyPress(Key::Char('Z')))])
            .unwrap();
        assert_eq!(m.frame().body.last().unwrap().text, "Z|");
        clock.advance_ms(500);
        assert_eq!(m.frame().body.last().unwrap().text, "Z ");
        clock.advance_ms(500);
        assert_eq!(m.frame().body.last().unwrap().text, "Z|");
    }
}
