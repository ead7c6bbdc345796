mod font;
mod histogram;
mod render;
mod text;

pub use font::{FONT_CANDIDATES, load_font};
pub use histogram::{axis_ticks, bar_rects};
pub use render::{RenderStats, SkiaRenderer};
pub use text::{render_text_pixmap, split_message};
