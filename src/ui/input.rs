//! Frame input snapshot and the single-owner focus token
//!
//! All components consume one `FrameInput` per frame; nothing reads the
//! windowing layer directly. Exclusive interactions (text editing, panel
//! drags, element drags) go through `FocusState`, which holds at most one
//! owner at a time.

use super::panel::PanelKind;
use super::Rect;

/// Mouse button state for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub middle_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub wheel: f32, // Scroll wheel delta
}

impl MouseState {
    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is held down inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// Non-character editing keys a text field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
}

/// One frame's worth of raw input, polled once by the frontend
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub mouse: MouseState,
    /// All character events since last frame, in order
    pub chars: Vec<char>,
    /// Editing keys that were pressed this frame
    pub keys: Vec<EditKey>,
    /// Seconds since app start
    pub time: f64,
    /// Seconds since last frame
    pub dt: f32,
    pub window_w: f32,
    pub window_h: f32,
}

impl FrameInput {
    pub fn key_pressed(&self, key: EditKey) -> bool {
        self.keys.contains(&key)
    }

    /// Copy with pointer edges, wheel and key events stripped.
    /// Used to keep background components drawing (and hover-free) while a
    /// modal dialog owns the pointer.
    pub fn swallowed(&self) -> FrameInput {
        FrameInput {
            mouse: MouseState {
                x: -1.0,
                y: -1.0,
                ..MouseState::default()
            },
            chars: Vec::new(),
            keys: Vec::new(),
            time: self.time,
            dt: self.dt,
            window_w: self.window_w,
            window_h: self.window_h,
        }
    }
}

/// Identity of a text field in the app (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFieldId {
    ProjectName,
    ProjectPath,
}

/// Who currently owns exclusive input, if anyone.
///
/// One enum value means one owner: a text field in edit mode, a panel being
/// dragged, or a timeline element being dragged can never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Idle,
    EditingText(TextFieldId),
    DraggingPanel(PanelKind),
    DraggingElement { index: usize },
}

/// Holder of the focus token. Components acquire via the `try_*` methods and
/// release explicitly when their interaction ends.
#[derive(Debug, Default)]
pub struct FocusState {
    owner: Focus,
}

impl FocusState {
    pub fn new() -> Self {
        Self { owner: Focus::Idle }
    }

    pub fn owner(&self) -> Focus {
        self.owner
    }

    pub fn is_idle(&self) -> bool {
        self.owner == Focus::Idle
    }

    /// The text field in edit mode, if any
    pub fn editing_text(&self) -> Option<TextFieldId> {
        match self.owner {
            Focus::EditingText(id) => Some(id),
            _ => None,
        }
    }

    /// The panel being dragged, if any
    pub fn dragging_panel(&self) -> Option<PanelKind> {
        match self.owner {
            Focus::DraggingPanel(kind) => Some(kind),
            _ => None,
        }
    }

    /// The timeline element being dragged, if any
    pub fn dragging_element(&self) -> Option<usize> {
        match self.owner {
            Focus::DraggingElement { index } => Some(index),
            _ => None,
        }
    }

    /// Enter edit mode for a text field. Allowed from idle or from another
    /// field's edit mode (clicking field B while editing field A moves the
    /// token); never while a drag is in progress.
    pub fn try_begin_edit(&mut self, id: TextFieldId) -> bool {
        match self.owner {
            Focus::Idle | Focus::EditingText(_) => {
                self.owner = Focus::EditingText(id);
                true
            }
            _ => false,
        }
    }

    /// Leave edit mode, if this field holds it
    pub fn end_edit(&mut self, id: TextFieldId) {
        if self.owner == Focus::EditingText(id) {
            self.owner = Focus::Idle;
        }
    }

    pub fn try_begin_panel_drag(&mut self, kind: PanelKind) -> bool {
        if self.owner == Focus::Idle {
            self.owner = Focus::DraggingPanel(kind);
            true
        } else {
            false
        }
    }

    pub fn end_panel_drag(&mut self) {
        if matches!(self.owner, Focus::DraggingPanel(_)) {
            self.owner = Focus::Idle;
        }
    }

    pub fn try_begin_element_drag(&mut self, index: usize) -> bool {
        if self.owner == Focus::Idle {
            self.owner = Focus::DraggingElement { index };
            true
        } else {
            false
        }
    }

    pub fn end_element_drag(&mut self) {
        if matches!(self.owner, Focus::DraggingElement { .. }) {
            self.owner = Focus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mode_is_exclusive() {
        let mut focus = FocusState::new();
        assert!(focus.try_begin_edit(TextFieldId::ProjectName));
        assert_eq!(focus.editing_text(), Some(TextFieldId::ProjectName));

        // A second field takes the token over; there is still only one owner
        assert!(focus.try_begin_edit(TextFieldId::ProjectPath));
        assert_eq!(focus.editing_text(), Some(TextFieldId::ProjectPath));

        // No drag may start while editing
        assert!(!focus.try_begin_panel_drag(PanelKind::Mixer));
        assert!(!focus.try_begin_element_drag(0));

        // Releasing with the wrong id is a no-op
        focus.end_edit(TextFieldId::ProjectName);
        assert_eq!(focus.editing_text(), Some(TextFieldId::ProjectPath));
        focus.end_edit(TextFieldId::ProjectPath);
        assert!(focus.is_idle());
    }

    #[test]
    fn test_single_drag_owner() {
        let mut focus = FocusState::new();
        assert!(focus.try_begin_panel_drag(PanelKind::Assets));
        assert!(!focus.try_begin_panel_drag(PanelKind::Inspector));
        assert!(!focus.try_begin_edit(TextFieldId::ProjectName));
        assert!(!focus.try_begin_element_drag(3));
        assert_eq!(focus.dragging_panel(), Some(PanelKind::Assets));

        focus.end_panel_drag();
        assert!(focus.is_idle());
        assert!(focus.try_begin_element_drag(3));
        assert_eq!(focus.dragging_element(), Some(3));
        focus.end_element_drag();
        assert!(focus.is_idle());
    }

    #[test]
    fn test_swallowed_input_keeps_frame_context() {
        let input = FrameInput {
            mouse: MouseState {
                x: 100.0,
                y: 50.0,
                left_pressed: true,
                ..MouseState::default()
            },
            chars: vec!['a'],
            keys: vec![EditKey::Backspace],
            time: 2.5,
            dt: 0.016,
            window_w: 1280.0,
            window_h: 720.0,
        };
        let quiet = input.swallowed();
        assert!(!quiet.mouse.left_pressed);
        assert!(quiet.chars.is_empty());
        assert!(quiet.keys.is_empty());
        assert!((quiet.window_w - 1280.0).abs() < 0.001);
        assert!((quiet.time - 2.5).abs() < 0.001);
    }
}
