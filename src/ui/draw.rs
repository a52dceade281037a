//! Draw-command list
//!
//! The core never talks to the render device. Each frame it appends
//! primitives to a `DrawList`, in draw order, and the frontend replays them.
//! Text measurement goes through the `FontMetrics` trait so cursor and
//! centering math stays independent of the font backend.

use macroquad::prelude::Color;

use super::Rect;

/// A single draw primitive. Coordinates are screen-space pixels; `Text`
/// positions are the baseline, matching the renderer's text convention.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        color: Color,
    },
    RectLines {
        rect: Rect,
        thickness: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Color,
    },
    Triangle {
        p1: (f32, f32),
        p2: (f32, f32),
        p3: (f32, f32),
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

/// Ordered sequence of draw commands for one frame
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    /// Drop last frame's commands, keeping the allocation
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::Rect { rect, color });
    }

    pub fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.cmds.push(DrawCmd::RectLines {
            rect,
            thickness,
            color,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color) {
        self.cmds.push(DrawCmd::Line {
            x1,
            y1,
            x2,
            y2,
            thickness,
            color,
        });
    }

    pub fn triangle(&mut self, p1: (f32, f32), p2: (f32, f32), p3: (f32, f32), color: Color) {
        self.cmds.push(DrawCmd::Triangle { p1, p2, p3, color });
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.into(),
            x,
            y,
            size,
            color,
        });
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.cmds.iter()
    }
}

/// Text measurement seam. The frontend implements this with the real font;
/// tests use a fixed-width stand-in.
pub trait FontMetrics {
    /// Width in pixels of `text` rendered at `font_size`
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

#[cfg(test)]
pub mod test_metrics {
    use super::FontMetrics;

    /// Fixed-width metrics for tests: every glyph is half the font size wide
    pub struct MonoMetrics;

    impl FontMetrics for MonoMetrics {
        fn text_width(&self, text: &str, font_size: f32) -> f32 {
            text.chars().count() as f32 * font_size * 0.5
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme;

    #[test]
    fn test_commands_keep_order() {
        let mut dl = DrawList::new();
        dl.rect(Rect::new(0.0, 0.0, 10.0, 10.0), theme::BG_COLOR);
        dl.text("hello", 1.0, 2.0, 16.0, theme::TEXT_COLOR);
        dl.line(0.0, 0.0, 5.0, 5.0, 1.0, theme::GRID_COLOR);
        assert_eq!(dl.len(), 3);

        let kinds: Vec<_> = dl.iter().collect();
        assert!(matches!(kinds[0], DrawCmd::Rect { .. }));
        assert!(matches!(kinds[1], DrawCmd::Text { .. }));
        assert!(matches!(kinds[2], DrawCmd::Line { .. }));
    }

    #[test]
    fn test_clear_resets() {
        let mut dl = DrawList::new();
        dl.rect(Rect::new(0.0, 0.0, 1.0, 1.0), theme::BG_COLOR);
        dl.clear();
        assert!(dl.is_empty());
    }
}
