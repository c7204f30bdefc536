//! The status bar across the top of the arena
//!
//! A light-gray strip holding a row of text indicators: lives, score, and the
//! level name. Indicators render from shared counters, so the bar is always
//! current without any explicit update step.

use crate::counter::Counter;
use crate::draw::{Color, DrawSurface, Drawable};
use crate::sim::geometry::Rect;

const TEXT_SIZE: u32 = 18;
const TEXT_COLOR: Color = Color::BLACK;
const BAR_FILL: Color = Color::GRAY;
const BAR_BORDER: Color = Color::WHITE;
/// Horizontal space reserved per indicator
const SLOT_WIDTH: f32 = 160.0;

/// One text readout on the status bar
pub trait Indicator {
    fn text(&self) -> String;
}

/// Remaining lives
pub struct LivesIndicator {
    lives: Counter,
}

impl LivesIndicator {
    pub fn new(lives: Counter) -> Self {
        Self { lives }
    }
}

impl Indicator for LivesIndicator {
    fn text(&self) -> String {
        format!("Lives: {}", self.lives.value())
    }
}

/// Current score
pub struct ScoreIndicator {
    score: Counter,
}

impl ScoreIndicator {
    pub fn new(score: Counter) -> Self {
        Self { score }
    }
}

impl Indicator for ScoreIndicator {
    fn text(&self) -> String {
        format!("Score: {}", self.score.value())
    }
}

/// Name of the level in play
pub struct LevelNameIndicator {
    name: String,
}

impl LevelNameIndicator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Indicator for LevelNameIndicator {
    fn text(&self) -> String {
        format!("Level: {}", self.name)
    }
}

/// The bar itself: a rectangle plus its indicators, drawn left to right
pub struct StatusBar {
    rect: Rect,
    indicators: Vec<Box<dyn Indicator>>,
}

impl StatusBar {
    pub fn new(width: f32, height: f32, indicators: Vec<Box<dyn Indicator>>) -> Self {
        Self {
            rect: Rect::from_coords(0.0, 0.0, width, height),
            indicators,
        }
    }
}

impl Drawable for StatusBar {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.fill_rect(&self.rect, BAR_FILL);
        surface.draw_rect(&self.rect, BAR_BORDER);

        let y = self.rect.height() - 2.0;
        let mut x = 5.0;
        for indicator in &self.indicators {
            surface.draw_text(x, y, &indicator.text(), TEXT_SIZE, TEXT_COLOR);
            x += SLOT_WIDTH;
        }
    }
}
