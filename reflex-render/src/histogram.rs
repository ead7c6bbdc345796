//! Reaction-time distribution panel in the right half of the screen.

use crate::render::SkiaRenderer;
use reflex_core::stats::{BUCKET_BOUNDS_MS, BUCKET_COUNT, HistogramBucket};
use reflex_core::{PixelRect, Rgb, TextSize};

const TITLE: &str = "Reaction time distribution";
const TITLE_Y: f32 = 80.0;
const BAR_GAP: f32 = 10.0;

/// Five y-axis tick values, bottom to top. The top tick is always the tallest bar.
pub fn axis_ticks(max_count: u32) -> [u32; 5] {
    let max = max_count.max(1);
    let step = max / 4 + 1;
    std::array::from_fn(|i| if i == 4 { max } else { i as u32 * step })
}

/// Bar rectangles inside `plot`, scaled so the tallest bar fills the plot height.
pub fn bar_rects(plot: PixelRect, counts: &[u32; BUCKET_COUNT]) -> [PixelRect; BUCKET_COUNT] {
    let max = counts.iter().copied().max().unwrap_or(0).max(1) as f32;
    let slot = plot.width / BUCKET_COUNT as f32;
    let bar_width = (slot - BAR_GAP).max(1.0);
    std::array::from_fn(|i| {
        let height = counts[i] as f32 / max * plot.height;
        PixelRect::new(
            plot.x + 5.0 + i as f32 * slot,
            plot.bottom() - height,
            bar_width,
            height,
        )
    })
}

fn bucket_labels() -> [String; BUCKET_COUNT] {
    std::array::from_fn(|i| {
        HistogramBucket {
            lower_bound_ms: BUCKET_BOUNDS_MS[i],
            upper_bound_ms: BUCKET_BOUNDS_MS[i + 1],
            count: 0,
        }
        .label()
    })
}

impl SkiaRenderer {
    pub(crate) fn draw_histogram(&mut self, counts: &[u32; BUCKET_COUNT]) {
        let layout = self.layout();
        let panel = layout.histogram_panel();
        let plot = layout.histogram_plot();
        if plot.width <= 0.0 || plot.height <= 0.0 {
            return;
        }

        self.text_centered(
            TITLE,
            TextSize::Medium,
            Rgb::WHITE,
            panel.center_x(),
            TITLE_Y,
            panel.width - 20.0,
        );

        // axes
        self.fill(PixelRect::new(plot.x - 1.0, plot.y, 2.0, plot.height), Rgb::WHITE);
        self.fill(PixelRect::new(plot.x, plot.bottom() - 1.0, plot.width, 2.0), Rgb::WHITE);

        let slot = plot.width / BUCKET_COUNT as f32;
        for (i, label) in bucket_labels().iter().enumerate() {
            let center = plot.x + i as f32 * slot + slot / 2.0;
            let top = plot.bottom() + 5.0;
            self.text_centered(label, TextSize::Tiny, Rgb::WHITE, center, top, slot - 2.0);
        }

        let max = counts.iter().copied().max().unwrap_or(0);
        for (i, tick) in axis_ticks(max).iter().enumerate() {
            let y = plot.bottom() - i as f32 * plot.height / 4.0;
            self.text_right_aligned(&tick.to_string(), TextSize::Tiny, Rgb::WHITE, plot.x - 5.0, y);
        }

        for (i, bar) in bar_rects(plot, counts).into_iter().enumerate() {
            let color = if i % 2 == 0 { Rgb::GREEN } else { Rgb::LIGHT_BLUE };
            self.fill(bar, color);
        }

        self.text_centered(
            "Time (ms)",
            TextSize::Small,
            Rgb::WHITE,
            plot.center_x(),
            plot.bottom() + 30.0,
            plot.width,
        );
        self.text_rotated(
            "Players",
            TextSize::Small,
            Rgb::WHITE,
            plot.x - 40.0,
            plot.y + plot.height / 2.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_follow_quarter_steps() {
        assert_eq!(axis_ticks(0), [0, 1, 2, 3, 1]);
        assert_eq!(axis_ticks(4), [0, 2, 4, 6, 4]);
        assert_eq!(axis_ticks(8), [0, 3, 6, 9, 8]);
        assert_eq!(axis_ticks(13), [0, 4, 8, 12, 13]);
    }

    #[test]
    fn tallest_bar_fills_the_plot() {
        let plot = PixelRect::new(690.0, 150.0, 540.0, 420.0);
        let mut counts = [0; BUCKET_COUNT];
        counts[2] = 4;
        counts[3] = 2;
        let bars = bar_rects(plot, &counts);
        assert_eq!(bars[2].height, 420.0);
        assert_eq!(bars[2].y, 150.0);
        assert_eq!(bars[3].height, 210.0);
        assert_eq!(bars[0].height, 0.0);
        assert_eq!(bars[0].x, 695.0);
        assert_eq!(bars[1].x - bars[0].x, 54.0);
        assert_eq!(bars[0].width, 44.0);
    }

    #[test]
    fn all_zero_counts_draw_no_bars() {
        let plot = PixelRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(bar_rects(plot, &[0; BUCKET_COUNT]).iter().all(|b| b.height == 0.0));
    }

    #[test]
    fn labels_cover_every_bucket() {
        let labels = bucket_labels();
        assert_eq!(labels[0], "0-199");
        assert_eq!(labels[1], "200-219");
        assert_eq!(labels[9], "360-380");
    }
}
