use crate::font::load_font;
use crate::text::{TextCache, split_message};
use ab_glyph::FontVec;
use anyhow::{Context, Result, bail};
use bytemuck::{cast_slice, cast_slice_mut};
use reflex_core::{Frame, Layout, PixelRect, Rgb, TextLine, TextSize};
use reflex_timing::{FrameStats, HighPrecisionTimer, Timer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

const EDGE_MARGIN: f32 = 20.0;
const HEADER_Y: f32 = 20.0;
const TITLE_Y: f32 = 50.0;
const FOOTER_OFFSET: f32 = 40.0;
const DIVIDER_WIDTH: f32 = 2.0;
/// Clear space kept between the body text and whatever sits under it.
const BODY_GAP: f32 = 10.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    pub draw: Duration,
    pub copy: Duration,
    pub total: Duration,
    pub cached_labels: usize,
}

/// Software renderer turning [`Frame`] descriptors into RGBA pixels.
pub struct SkiaRenderer {
    width: u32,
    height: u32,
    canvas: Pixmap,
    text_cache: TextCache<FontVec>,
    clock: HighPrecisionTimer,
}

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::from_rgba8(r, g, b, 255)
}

fn paint(rgb: Rgb) -> Paint<'static> {
    let mut p = Paint::default();
    p.anti_alias = false;
    p.set_color(color(rgb));
    p
}

impl SkiaRenderer {
    pub fn new(font: FontVec, width: u32, height: u32) -> Result<Self> {
        let canvas = Pixmap::new(width, height)
            .with_context(|| format!("cannot allocate a {width}x{height} canvas"))?;
        Ok(SkiaRenderer {
            width,
            height,
            canvas,
            text_cache: TextCache::new(font),
            clock: HighPrecisionTimer::new(),
        })
    }

    /// Build a renderer around the configured font, or the first system font found.
    pub fn with_font_path(font_path: Option<&Path>, width: u32, height: u32) -> Result<Self> {
        Self::new(load_font(font_path)?, width, height)
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Result<()> {
        self.canvas = Pixmap::new(new_width, new_height)
            .with_context(|| format!("cannot allocate a {new_width}x{new_height} canvas"))?;
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.width, self.height)
    }

    /// Distribution of whole-frame render times so far.
    pub fn render_times(&self) -> FrameStats {
        self.clock.frame_stats()
    }

    /// Draw `frame` and copy it into `frame_buffer`, an RGBA8 buffer of the canvas size.
    pub fn render_frame(&mut self, frame: &Frame, frame_buffer: &mut [u8]) -> Result<RenderStats> {
        let expected = self.canvas.data().len();
        if frame_buffer.len() != expected {
            bail!(
                "frame buffer holds {} bytes, canvas needs {expected}",
                frame_buffer.len()
            );
        }

        let t_draw = self.clock.now();
        self.canvas.fill(color(Rgb::BLACK));
        self.draw_game_area(frame);
        self.draw_histogram(&frame.histogram);
        let layout = self.layout();
        self.fill(
            PixelRect::new(
                layout.left_width() - DIVIDER_WIDTH / 2.0,
                0.0,
                DIVIDER_WIDTH,
                self.height as f32,
            ),
            Rgb::WHITE,
        );
        if frame.show_quit_button {
            self.draw_quit_button();
        }
        let draw = self.clock.elapsed(t_draw);

        // canvas is fully opaque, so premultiplied bytes equal straight RGBA
        let t_copy = self.clock.now();
        frame_buffer.copy_from_slice(self.canvas.data());
        let copy = self.clock.elapsed(t_copy);

        let total = draw + copy;
        self.clock.record_frame(total);
        Ok(RenderStats {
            draw,
            copy,
            total,
            cached_labels: self.text_cache.len(),
        })
    }

    pub fn text_cache_misses(&self) -> u64 {
        self.text_cache.misses()
    }

    fn draw_game_area(&mut self, frame: &Frame) {
        let layout = self.layout();
        let area = layout.game_area();
        self.fill(area, frame.game_background);
        let cx = area.center_x();
        let max_width = area.width - EDGE_MARGIN;

        let mut top = 0.0f32;
        if let Some(header) = &frame.header {
            self.line_centered(header, cx, HEADER_Y, max_width);
            top = HEADER_Y + header.size.advance();
        }
        if let Some(title) = &frame.title {
            self.line_centered(title, cx, TITLE_Y, max_width);
            top = top.max(TITLE_Y + title.size.advance());
        }

        let lines: Vec<TextLine> = frame
            .body
            .iter()
            .flat_map(|line| {
                let parts = if line.wrap {
                    split_message(&line.text)
                } else {
                    vec![line.text.clone()]
                };
                parts
                    .into_iter()
                    .map(|text| TextLine::new(text, line.size, line.color))
                    .collect::<Vec<_>>()
            })
            .collect();
        let block: f32 = lines.iter().map(|l| l.size.advance()).sum();

        let mut bottom = area.bottom();
        if let Some(footer) = &frame.footer {
            bottom = bottom.min(area.bottom() - FOOTER_OFFSET);
            self.line_centered(footer, cx, area.bottom() - FOOTER_OFFSET, max_width);
        }
        if let Some(button) = &frame.play_button {
            let rect = layout.play_button();
            bottom = bottom.min(rect.y);
            self.fill(rect, button.fill);
            let label = TextLine::new(button.label.clone(), TextSize::Medium, button.text);
            self.line_middle(&label, rect);
        }

        let (mut y, scale) = place_body(block, area.height, top, bottom);
        for line in &lines {
            self.line_scaled(line, cx, y, max_width, scale);
            y += line.size.advance() * scale;
        }
    }

    fn draw_quit_button(&mut self) {
        let rect = self.layout().quit_button();
        self.fill(rect, Rgb::BLACK);
        if let Some(r) = Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) {
            let stroke = Stroke {
                width: 2.0,
                ..Stroke::default()
            };
            let path = PathBuilder::from_rect(r);
            self.canvas
                .stroke_path(&path, &paint(Rgb::WHITE), &stroke, Transform::identity(), None);
        }
        let x = TextLine::new("X", TextSize::Small, Rgb::WHITE);
        self.line_middle(&x, rect);
    }

    pub(crate) fn fill(&mut self, rect: PixelRect, rgb: Rgb) {
        if let Some(r) = Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) {
            self.canvas.fill_rect(r, &paint(rgb), Transform::identity(), None);
        }
    }

    fn line_centered(&mut self, line: &TextLine, center_x: f32, top: f32, max_width: f32) {
        self.line_scaled(line, center_x, top, max_width, 1.0);
    }

    fn line_scaled(
        &mut self,
        line: &TextLine,
        center_x: f32,
        top: f32,
        max_width: f32,
        scale: f32,
    ) {
        let px = line.size.px() * scale;
        if let Some(pm) = self.text_cache.fitted(&line.text, px, line.color, max_width) {
            self.blit(&pm, center_x - pm.width() as f32 / 2.0, top);
        }
    }

    /// Center `line` both ways inside `rect`.
    fn line_middle(&mut self, line: &TextLine, rect: PixelRect) {
        let fitted = self
            .text_cache
            .fitted(&line.text, line.size.px(), line.color, rect.width);
        if let Some(pm) = fitted {
            let x = rect.center_x() - pm.width() as f32 / 2.0;
            let y = rect.y + (rect.height - pm.height() as f32) / 2.0;
            self.blit(&pm, x, y);
        }
    }

    pub(crate) fn text_centered(
        &mut self,
        text: &str,
        size: TextSize,
        rgb: Rgb,
        center_x: f32,
        top: f32,
        max_width: f32,
    ) {
        if let Some(pm) = self.text_cache.fitted(text, size.px(), rgb, max_width) {
            self.blit(&pm, center_x - pm.width() as f32 / 2.0, top);
        }
    }

    /// Right edge at `right`, vertically centered on `center_y`.
    pub(crate) fn text_right_aligned(
        &mut self,
        text: &str,
        size: TextSize,
        rgb: Rgb,
        right: f32,
        center_y: f32,
    ) {
        if let Some(pm) = self.text_cache.get_or_render(text, size.px(), rgb) {
            self.blit(&pm, right - pm.width() as f32, center_y - pm.height() as f32 / 2.0);
        }
    }

    /// Draw `text` turned a quarter counterclockwise, centered on the given point.
    pub(crate) fn text_rotated(
        &mut self,
        text: &str,
        size: TextSize,
        rgb: Rgb,
        center_x: f32,
        center_y: f32,
    ) {
        let Some(pm) = self.text_cache.get_or_render(text, size.px(), rgb) else {
            return;
        };
        let x = (center_x - pm.width() as f32 / 2.0) as i32;
        let y = (center_y - pm.height() as f32 / 2.0) as i32;
        self.canvas.draw_pixmap(
            x,
            y,
            Pixmap::as_ref(&pm),
            &PixmapPaint::default(),
            Transform::from_rotate_at(-90.0, center_x, center_y),
            None,
        );
    }

    /// Composite a premultiplied pixmap onto the canvas with its top-left at (x, y).
    fn blit(&mut self, pm: &Arc<Pixmap>, x: f32, y: f32) {
        blit_over(&mut self.canvas, pm, x as i32, y as i32);
    }
}

/// Top of the body block and the factor its lines shrink by.
///
/// The block is centered in the area when it fits between `top` and
/// `bottom`. Otherwise it starts at `top` with every line scaled down so
/// the last one still ends above `bottom`.
fn place_body(block: f32, area_height: f32, top: f32, bottom: f32) -> (f32, f32) {
    let limit = bottom - BODY_GAP;
    let room = (limit - top).max(0.0);
    if block <= room {
        let y = ((area_height - block) / 2.0).min(limit - block).max(top);
        (y, 1.0)
    } else {
        (top, room / block)
    }
}

/// "Over" composite of `src` onto `dst`, clipped to the destination.
fn blit_over(dst: &mut Pixmap, src: &Pixmap, x: i32, y: i32) {
    let (dw, dh) = (dst.width() as i32, dst.height() as i32);
    let (sw, sh) = (src.width() as i32, src.height() as i32);
    if x + sw <= 0 || y + sh <= 0 || x >= dw || y >= dh {
        return;
    }

    let dst_x = x.max(0) as usize;
    let dst_y = y.max(0) as usize;
    let src_x = (-x).max(0) as usize;
    let src_y = (-y).max(0) as usize;
    let copy_w = (sw as usize - src_x).min(dw as usize - dst_x);
    let copy_h = (sh as usize - src_y).min(dh as usize - dst_y);

    let src_px: &[[u8; 4]] = cast_slice(src.data());
    let dst_stride = dw as usize;
    let src_stride = sw as usize;
    let dst_px: &mut [[u8; 4]] = cast_slice_mut(dst.data_mut());

    for row in 0..copy_h {
        let s0 = (src_y + row) * src_stride + src_x;
        let d0 = (dst_y + row) * dst_stride + dst_x;
        let src_row = &src_px[s0..s0 + copy_w];
        let dst_row = &mut dst_px[d0..d0 + copy_w];
        if src_row.iter().all(|p| p[3] == 255) {
            dst_row.copy_from_slice(src_row);
            continue;
        }
        for (d, s) in dst_row.iter_mut().zip(src_row) {
            let inv_a = 255 - s[3] as u32;
            if inv_a == 255 {
                continue;
            }
            for c in 0..4 {
                d[c] = (s[c] as u32 + (d[c] as u32 * inv_a + 127) / 255) as u8;
            }
        }
    }
}
