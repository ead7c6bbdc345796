use ab_glyph::{Font, Glyph, PxScale, ScaleFont, point};
use reflex_cache::{LabelId, clear_labels, intern_label};
use reflex_core::Rgb;
use std::collections::HashMap;
use std::sync::Arc;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Messages longer than this are drawn on two lines.
const SPLIT_THRESHOLD: usize = 30;
const TEXT_CACHE_CAP: usize = 512;

/// Rasterize one line of `text` into a tight, transparent, premultiplied pixmap.
///
/// Returns `None` when nothing in `text` has an outline (empty or all spaces).
pub fn render_text_pixmap<F: Font>(
    text: &str,
    font_px: f32,
    font: &F,
    color: Rgb,
) -> Option<Pixmap> {
    let scale = PxScale::from(font_px);
    let sf = font.as_scaled(scale);

    // baseline at ascent
    let mut pen_x = 0.0f32;
    let mut glyphs = Vec::<Glyph>::new();
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = glyphs.last() {
            pen_x += sf.kern(prev.id, id);
        }
        glyphs.push(Glyph {
            id,
            scale,
            position: point(pen_x, sf.ascent()),
        });
        pen_x += sf.h_advance(id);
    }

    let outlines: Vec<_> = glyphs
        .into_iter()
        .filter_map(|g| font.outline_glyph(g))
        .collect();
    let (min_x, min_y, max_x, max_y) = outlines.iter().fold(
        (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        |(x0, y0, x1, y1), out| {
            let b = out.px_bounds();
            (x0.min(b.min.x), y0.min(b.min.y), x1.max(b.max.x), y1.max(b.max.y))
        },
    );
    if outlines.is_empty() {
        return None;
    }

    let w = (max_x.ceil() - min_x.floor()).max(1.0) as u32;
    let h = (max_y.ceil() - min_y.floor()).max(1.0) as u32;
    let mut pm = Pixmap::new(w, h)?;
    let stride = w as usize;
    let dst = pm.pixels_mut();
    let Rgb(cr, cg, cb) = color;

    for out in &outlines {
        let b = out.px_bounds();
        out.draw(|x, y, cov| {
            if cov <= f32::EPSILON {
                return;
            }
            let ix = (x as f32 + b.min.x - min_x).floor() as i32;
            let iy = (y as f32 + b.min.y - min_y).floor() as i32;
            if ix < 0 || iy < 0 || ix >= w as i32 || iy >= h as i32 {
                return;
            }
            let i = iy as usize * stride + ix as usize;
            let Some(bg) = dst.get(i).copied() else {
                return;
            };

            // source premultiplied by coverage, then "over" the existing pixel
            let a = cov.clamp(0.0, 1.0);
            let inv = 1.0 - a;
            let over = |s: u8, d: u8| ((s as f32 * a) as u8).saturating_add((d as f32 * inv) as u8);
            let al = over(255, bg.alpha());
            let r = over(cr, bg.red()).min(al);
            let g = over(cg, bg.green()).min(al);
            let bl = over(cb, bg.blue()).min(al);
            if let Some(px) = PremultipliedColorU8::from_rgba(r, g, bl, al) {
                dst[i] = px;
            }
        });
    }
    Some(pm)
}

/// Break a long message into at most two lines.
///
/// Over 30 characters the text is cut before the first `" and "`, the second
/// line keeping the `"and "`; without one it is cut at the middle word.
pub fn split_message(message: &str) -> Vec<String> {
    if message.chars().count() <= SPLIT_THRESHOLD {
        return vec![message.to_string()];
    }
    if let Some((head, tail)) = message.split_once(" and ") {
        return vec![head.to_string(), format!("and {tail}")];
    }
    let words: Vec<&str> = message.split_whitespace().collect();
    if words.len() < 2 {
        return vec![message.to_string()];
    }
    let mid = words.len() / 2;
    vec![words[..mid].join(" "), words[mid..].join(" ")]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TextKey {
    label: LabelId,
    px_bits: u32,
    color: Rgb,
}

impl TextKey {
    fn new(text: &str, font_px: f32, color: Rgb) -> Self {
        TextKey {
            label: intern_label(text),
            px_bits: font_px.to_bits(),
            color,
        }
    }
}

/// Rasterized labels keyed by interned text, size and color.
pub(crate) struct TextCache<F> {
    font: F,
    map: HashMap<TextKey, Arc<Pixmap>>,
    misses: u64,
}

impl<F> TextCache<F> {
    pub(crate) fn new(font: F) -> Self {
        Self {
            font,
            map: HashMap::new(),
            misses: 0,
        }
    }

    /// Drop every pixmap and the label table with them once the cap is hit.
    /// Returns whether anything was dropped.
    fn make_room(&mut self) -> bool {
        if self.map.len() < TEXT_CACHE_CAP {
            return false;
        }
        self.map.clear();
        clear_labels();
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn misses(&self) -> u64 {
        self.misses
    }
}

impl<F: Font> TextCache<F> {
    pub(crate) fn get_or_render(
        &mut self,
        text: &str,
        font_px: f32,
        color: Rgb,
    ) -> Option<Arc<Pixmap>> {
        let mut key = TextKey::new(text, font_px, color);
        if let Some(pm) = self.map.get(&key) {
            return Some(Arc::clone(pm));
        }
        self.misses += 1;
        if self.make_room() {
            key = TextKey::new(text, font_px, color);
        }
        let pm = Arc::new(render_text_pixmap(text, font_px, &self.font, color)?);
        self.map.insert(key, Arc::clone(&pm));
        Some(pm)
    }

    /// Like [`get_or_render`](Self::get_or_render), shrinking the font until
    /// the line fits in `max_width` pixels.
    pub(crate) fn fitted(
        &mut self,
        text: &str,
        font_px: f32,
        color: Rgb,
        max_width: f32,
    ) -> Option<Arc<Pixmap>> {
        let pm = self.get_or_render(text, font_px, color)?;
        let width = pm.width() as f32;
        if width <= max_width || max_width <= 1.0 {
            return Some(pm);
        }
        let shrunk = (font_px * max_width / width).floor().max(1.0);
        self.get_or_render(text, shrunk, color)
    }
}
