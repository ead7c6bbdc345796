use ab_glyph::FontVec;
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Probed in order when no font path is configured.
pub const FONT_CANDIDATES: &[&str] = &[
    "assets/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn read_font(path: &Path) -> Result<FontVec> {
    let bytes = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    FontVec::try_from_vec(bytes).map_err(|e| anyhow!("{}: {e}", path.display()))
}

/// Load `path`, or the first usable entry of [`FONT_CANDIDATES`].
pub fn load_font(path: Option<&Path>) -> Result<FontVec> {
    if let Some(path) = path {
        let font = read_font(path)?;
        info!(font = %path.display(), "font loaded");
        return Ok(font);
    }
    for candidate in FONT_CANDIDATES.iter().map(PathBuf::from) {
        match read_font(&candidate) {
            Ok(font) => {
                info!(font = %candidate.display(), "font loaded");
                return Ok(font);
            }
            Err(e) => debug!(error = %e, "font candidate skipped"),
        }
    }
    Err(anyhow!(
        "no usable font found; set font_path in the config or pass --font"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_font(Some(Path::new("/nonexistent/font.ttf")))
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
