use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use reflex_core::{Button, Frame, Rgb, ScreenKind, TextLine, TextSize};
use reflex_render::SkiaRenderer;

fn welcome_frame() -> Frame {
    let mut frame = Frame::new(ScreenKind::Welcome, [1, 3, 5, 8, 6, 4, 2, 1, 0, 1]);
    frame.header = Some(TextLine::new("Science Fair", TextSize::Medium, Rgb::WHITE));
    frame
        .line("TEST YOUR REFLEXES", TextSize::Large, Rgb::WHITE)
        .line("Best Players:", TextSize::Medium, Rgb::WHITE)
        .line("1. Ana: 180 ms", TextSize::Small, Rgb::WHITE)
        .line("2. Leo: 212 ms", TextSize::Small, Rgb::WHITE)
        .line("Population average: 250 ms", TextSize::Small, Rgb::YELLOW)
        .line("Enter your name:", TextSize::Medium, Rgb::WHITE)
        .line("Mo|", TextSize::Medium, Rgb::WHITE);
    frame.play_button = Some(Button {
        label: "PLAY".into(),
        fill: Rgb::GREEN,
        text: Rgb::BLACK,
    });
    frame.show_quit_button = true;
    frame
}

fn harness() -> Option<(SkiaRenderer, Vec<u8>)> {
    let (width, height) = (1280u32, 720u32);
    let r = SkiaRenderer::with_font_path(None, width, height).ok()?;
    Some((r, vec![0u8; (width * height * 4) as usize]))
}

pub fn bench_frames(c: &mut Criterion) {
    if harness().is_none() {
        eprintln!("render_frame: no system font found, skipping");
        return;
    }
    let mut g = c.benchmark_group("render_frame");
    g.sample_size(40);

    // warm text cache: steady state of the game loop
    g.bench_function("welcome_cached", |b| {
        let Some((mut r, mut fb)) = harness() else {
            return;
        };
        let frame = welcome_frame();
        let _ = r.render_frame(&frame, &mut fb);
        b.iter(|| black_box(r.render_frame(black_box(&frame), &mut fb).ok()))
    });

    g.bench_function("welcome_cold", |b| {
        b.iter_batched(
            harness,
            |h| {
                if let Some((mut r, mut fb)) = h {
                    black_box(r.render_frame(&welcome_frame(), &mut fb).ok());
                }
            },
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
