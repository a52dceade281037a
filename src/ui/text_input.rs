//! Single-line text input field
//!
//! A bounded text buffer with a cursor. Edit mode is entered by a pointer
//! press inside the field and left by a press outside it; while a field is in
//! edit mode it drains every character event of the frame, not just the
//! first. Edit-mode exclusivity is the focus token's job, not this module's.

use super::draw::{DrawList, FontMetrics};
use super::input::{EditKey, FrameInput, TextFieldId};
use super::scaler::UiScaler;
use super::theme;
use super::{FocusState, Rect};

/// Maximum text length a field will hold
pub const MAX_TEXT_LEN: usize = 255;

/// Characters the field accepts (printable ASCII range of the editor)
fn is_accepted(ch: char) -> bool {
    (ch as u32) >= 32 && (ch as u32) <= 125
}

#[derive(Debug, Clone)]
pub struct TextField {
    pub id: TextFieldId,
    /// Design-space bounds
    pub bounds: Rect,
    text: String,
    cursor: usize,
    max_len: usize,
}

impl TextField {
    pub fn new(id: TextFieldId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            text: String::new(),
            cursor: 0,
            max_len: MAX_TEXT_LEN,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the content, truncating to capacity; cursor moves to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        text.retain(is_accepted);
        text.truncate(self.max_len);
        self.cursor = text.len();
        self.text = text;
    }

    /// Insert one character at the cursor. Returns false if the character is
    /// outside the accepted range or the buffer is full.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !is_accepted(ch) || self.text.len() >= self.max_len {
            return false;
        }
        // Accepted characters are ASCII, so byte and char indices agree
        self.text.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Remove the character before the cursor (no-op at position 0)
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.text.remove(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    /// Remove the character at the cursor (no-op at end of text)
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Apply one frame of input: edit-mode transitions on pointer presses,
    /// then (while in edit mode) every pending character and editing key.
    /// Returns true if the text changed.
    pub fn update(
        &mut self,
        input: &FrameInput,
        focus: &mut FocusState,
        scaler: &UiScaler,
    ) -> bool {
        let screen_bounds = scaler.rect(self.bounds);

        if input.mouse.left_pressed {
            if input.mouse.inside(&screen_bounds) {
                focus.try_begin_edit(self.id);
            } else {
                focus.end_edit(self.id);
            }
        }

        if focus.editing_text() != Some(self.id) {
            return false;
        }

        let old_text = self.text.clone();

        for &ch in &input.chars {
            self.insert_char(ch);
        }
        for &key in &input.keys {
            match key {
                EditKey::Backspace => self.backspace(),
                EditKey::Delete => self.delete(),
                EditKey::Left => self.move_left(),
                EditKey::Right => self.move_right(),
                EditKey::Home => self.move_home(),
                EditKey::End => self.move_end(),
            }
        }

        self.text != old_text
    }

    /// Render the field. The cursor bar is drawn only in edit mode, at the
    /// measured width of the text before the cursor.
    pub fn draw(
        &self,
        dl: &mut DrawList,
        metrics: &dyn FontMetrics,
        scaler: &UiScaler,
        focus: &FocusState,
    ) {
        let editing = focus.editing_text() == Some(self.id);
        let r = scaler.rect(self.bounds);
        let bg = if editing {
            theme::INPUT_BG_EDIT
        } else {
            theme::INPUT_BG
        };
        dl.rect(r, bg);
        dl.rect_lines(r, 1.0, if editing { theme::WHITE } else { theme::GRAY });

        let padding = scaler.apply(5.0);
        let font_size = scaler.apply(theme::FONT_SIZE_INPUT);
        let text_x = r.x + padding;
        let text_y = r.y + (r.h + font_size * 0.7) / 2.0;
        dl.text(self.text.clone(), text_x, text_y, font_size, theme::WHITE);

        if editing {
            let cursor_x = text_x + metrics.text_width(&self.text[..self.cursor], font_size);
            dl.rect(
                Rect::new(cursor_x, r.y + padding, 2.0, r.h - padding * 2.0),
                theme::WHITE,
            );
        }
    }
}
