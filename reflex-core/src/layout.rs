//! Screen geometry shared by the renderer and pointer hit-testing.
//!
//! The left half holds the game, the right half the histogram.

const QUIT_BUTTON_SIZE: f32 = 30.0;
const QUIT_BUTTON_MARGIN: f32 = 10.0;
const PLAY_BUTTON_WIDTH: f32 = 200.0;
const PLAY_BUTTON_HEIGHT: f32 = 50.0;
const PLAY_BUTTON_BOTTOM_OFFSET: f32 = 160.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Clickable areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Play,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn left_width(&self) -> f32 {
        (self.width / 2) as f32
    }

    pub fn right_width(&self) -> f32 {
        self.width as f32 - self.left_width()
    }

    pub fn game_area(&self) -> PixelRect {
        PixelRect::new(0.0, 0.0, self.left_width(), self.height as f32)
    }

    pub fn histogram_panel(&self) -> PixelRect {
        PixelRect::new(
            self.left_width(),
            0.0,
            self.right_width(),
            self.height as f32,
        )
    }

    /// Plot area of the histogram, inside the right half.
    pub fn histogram_plot(&self) -> PixelRect {
        PixelRect::new(
            self.left_width() + 50.0,
            150.0,
            (self.right_width() - 100.0).max(0.0),
            (self.height as f32 - 300.0).max(0.0),
        )
    }

    pub fn quit_button(&self) -> PixelRect {
        PixelRect::new(
            self.width as f32 - QUIT_BUTTON_SIZE - QUIT_BUTTON_MARGIN,
            QUIT_BUTTON_MARGIN,
            QUIT_BUTTON_SIZE,
            QUIT_BUTTON_SIZE,
        )
    }

    pub fn play_button(&self) -> PixelRect {
        PixelRect::new(
            self.left_width() / 2.0 - PLAY_BUTTON_WIDTH / 2.0,
            (self.height as f32 - PLAY_BUTTON_BOTTOM_OFFSET).max(0.0),
            PLAY_BUTTON_WIDTH,
            PLAY_BUTTON_HEIGHT,
        )
    }

    /// Which button, if any, sits under the pointer. Quit wins on overlap.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Target> {
        if self.quit_button().contains(x, y) {
            Some(Target::Quit)
        } else if self.play_button().contains(x, y) {
            Some(Target::Play)
        } else {
            None
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}
