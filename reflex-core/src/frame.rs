//! Render descriptors. The game emits a [`Frame`] per tick and the
//! presentation layer turns it into pixels; nothing here draws.

use crate::stats::BUCKET_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Welcome,
    Wait,
    Stimulus,
    Loss,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const LIGHT_BLUE: Rgb = Rgb(100, 180, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSize {
    Large,
    Medium,
    Small,
    Tiny,
}

impl TextSize {
    /// Font size in pixels.
    pub fn px(self) -> f32 {
        match self {
            TextSize::Large => 72.0,
            TextSize::Medium => 48.0,
            TextSize::Small => 32.0,
            TextSize::Tiny => 24.0,
        }
    }

    /// Vertical space one line of this size takes in a stacked block.
    pub fn advance(self) -> f32 {
        match self {
            TextSize::Large => 80.0,
            TextSize::Medium => 60.0,
            TextSize::Small => 40.0,
            TextSize::Tiny => 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: TextSize,
    pub color: Rgb,
    /// Long lines may be broken in two by the renderer.
    pub wrap: bool,
}

impl TextLine {
    pub fn new(text: impl Into<String>, size: TextSize, color: Rgb) -> Self {
        Self {
            text: text.into(),
            size,
            color,
            wrap: false,
        }
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub fill: Rgb,
    pub text: Rgb,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub kind: ScreenKind,
    /// Fill of the left half.
    pub game_background: Rgb,
    /// Top-of-screen line (venue name).
    pub header: Option<TextLine>,
    /// Title pinned near the top of the game area.
    pub title: Option<TextLine>,
    /// Lines stacked and centered vertically in the game area.
    pub body: Vec<TextLine>,
    pub play_button: Option<Button>,
    pub show_quit_button: bool,
    pub footer: Option<TextLine>,
    pub histogram: [u32; BUCKET_COUNT],
}

impl Frame {
    pub fn new(kind: ScreenKind, histogram: [u32; BUCKET_COUNT]) -> Self {
        Self {
            kind,
            game_background: Rgb::BLACK,
            header: None,
            title: None,
            body: Vec::new(),
            play_button: None,
            show_quit_button: false,
            footer: None,
            histogram,
        }
    }

    pub fn line(&mut self, text: impl Into<String>, size: TextSize, color: Rgb) -> &mut Self {
        self.body.push(TextLine::new(text, size, color));
        self
    }

    /// Height of the stacked body block.
    pub fn body_height(&self) -> f32 {
        self.body.iter().map(|l| l.size.advance()).sum()
    }
}
