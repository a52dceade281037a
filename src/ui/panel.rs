//! Dockable panel system
//!
//! A fixed set of five panels, identified by kind (array slot, not
//! allocation). Each is independently shown/hidden, collapsible to its
//! header, and draggable by its header. Only one panel can be dragged at a
//! time; that exclusivity lives in the focus token, not here.

use super::draw::DrawList;
use super::input::FrameInput;
use super::scaler::UiScaler;
use super::theme;
use super::widgets::fold_indicator;
use super::{FocusState, Rect};

/// Height of a panel header (the always-visible, draggable strip)
pub const PANEL_HEADER_H: f32 = 22.0;

/// Width of the collapse toggle box at the left of the header
const FOLD_BOX_W: f32 = 18.0;

/// How many design-space pixels of a panel must stay inside the window
const MIN_VISIBLE: f32 = 40.0;

/// The available panels (fixed set, one slot each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Assets = 0,
    Inspector = 1,
    Hierarchy = 2,
    PatternEditor = 3,
    Mixer = 4,
}

impl PanelKind {
    pub const ALL: [PanelKind; 5] = [
        PanelKind::Assets,
        PanelKind::Inspector,
        PanelKind::Hierarchy,
        PanelKind::PatternEditor,
        PanelKind::Mixer,
    ];

    /// Get the display label for this panel
    pub fn label(&self) -> &'static str {
        match self {
            PanelKind::Assets => "Assets",
            PanelKind::Inspector => "Inspector",
            PanelKind::Hierarchy => "Hierarchy",
            PanelKind::PatternEditor => "Pattern Editor",
            PanelKind::Mixer => "Mixer",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// One dockable panel. Bounds are design-space; they change only while this
/// panel is the current drag target.
#[derive(Debug, Clone)]
pub struct Panel {
    pub kind: PanelKind,
    pub bounds: Rect,
    pub visible: bool,
    pub collapsed: bool,
    /// Content scroll offset (clamped by whichever view renders the content)
    pub scroll: f32,
    pub min_w: f32,
    pub min_h: f32,
}

impl Panel {
    pub fn new(kind: PanelKind, bounds: Rect, visible: bool) -> Self {
        Self {
            kind,
            bounds: Rect::new(
                bounds.x,
                bounds.y,
                bounds.w.max(120.0),
                bounds.h.max(PANEL_HEADER_H),
            ),
            visible,
            collapsed: false,
            scroll: 0.0,
            min_w: 120.0,
            min_h: 80.0,
        }
    }

    /// The draggable header strip (design space)
    pub fn header_rect(&self) -> Rect {
        self.bounds.slice_top(PANEL_HEADER_H)
    }

    /// The collapse toggle region at the left of the header (design space)
    pub fn fold_box(&self) -> Rect {
        let h = self.header_rect();
        Rect::new(h.x, h.y, FOLD_BOX_W, h.h)
    }

    /// Content area below the header, or None while collapsed
    pub fn content_rect(&self) -> Option<Rect> {
        if self.collapsed {
            None
        } else {
            Some(self.bounds.remaining_after_top(PANEL_HEADER_H).pad(2.0))
        }
    }
}

/// The fixed panel array plus the drag bookkeeping that accompanies the
/// focus token while a drag is live.
#[derive(Debug)]
pub struct PanelSet {
    panels: [Panel; 5],
    /// Pointer-to-origin offset recorded at drag start (design space)
    drag_offset: (f32, f32),
}

impl PanelSet {
    /// Default editor layout at the 1280x720 design resolution
    pub fn new() -> Self {
        Self {
            panels: [
                Panel::new(PanelKind::Assets, Rect::new(0.0, 560.0, 1280.0, 160.0), true),
                Panel::new(PanelKind::Inspector, Rect::new(1060.0, 70.0, 220.0, 310.0), true),
                Panel::new(PanelKind::Hierarchy, Rect::new(0.0, 70.0, 220.0, 310.0), true),
                Panel::new(PanelKind::PatternEditor, Rect::new(300.0, 120.0, 420.0, 300.0), false),
                Panel::new(PanelKind::Mixer, Rect::new(340.0, 150.0, 560.0, 280.0), false),
            ],
            drag_offset: (0.0, 0.0),
        }
    }

    pub fn get(&self, kind: PanelKind) -> &Panel {
        &self.panels[kind.index()]
    }

    pub fn get_mut(&mut self, kind: PanelKind) -> &mut Panel {
        &mut self.panels[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    pub fn toggle_visible(&mut self, kind: PanelKind) {
        let panel = self.get_mut(kind);
        panel.visible = !panel.visible;
    }

    /// Advance the drag state machine by one frame.
    ///
    /// While a drag is live the panel's origin tracks the pointer minus the
    /// offset recorded at drag start, clamped so the panel stays at least
    /// partially inside the window. Pointer release ends the drag.
    pub fn update(&mut self, input: &FrameInput, focus: &mut FocusState, scaler: &UiScaler) {
        if let Some(kind) = focus.dragging_panel() {
            if input.mouse.left_down {
                let (dw, dh) = scaler.design_size();
                let x = scaler.unapply(input.mouse.x) - self.drag_offset.0;
                let y = scaler.unapply(input.mouse.y) - self.drag_offset.1;
                let panel = self.get_mut(kind);
                panel.bounds.x = x;
                panel.bounds.y = y;
                Self::clamp_bounds(&mut panel.bounds, dw, dh);
            } else {
                focus.end_panel_drag();
            }
            return;
        }

        if !input.mouse.left_pressed {
            return;
        }

        // Later panels draw on top, so they get first claim on the pointer
        for kind in PanelKind::ALL.iter().rev() {
            let panel = self.get(*kind);
            if !panel.visible {
                continue;
            }
            let header = scaler.rect(panel.header_rect());
            if !input.mouse.inside(&header) {
                continue;
            }

            let fold_box = scaler.rect(panel.fold_box());
            if input.mouse.inside(&fold_box) {
                let panel = self.get_mut(*kind);
                panel.collapsed = !panel.collapsed;
            } else if focus.try_begin_panel_drag(*kind) {
                let origin = self.get(*kind).bounds;
                self.drag_offset = (
                    scaler.unapply(input.mouse.x) - origin.x,
                    scaler.unapply(input.mouse.y) - origin.y,
                );
            }
            break;
        }
    }

    /// Keep at least `MIN_VISIBLE` pixels of the panel inside the window
    /// horizontally and the whole header strip inside vertically.
    fn clamp_bounds(bounds: &mut Rect, design_w: f32, design_h: f32) {
        bounds.x = bounds.x.clamp(MIN_VISIBLE - bounds.w, design_w - MIN_VISIBLE);
        bounds.y = bounds.y.clamp(0.0, (design_h - PANEL_HEADER_H).max(0.0));
    }

    /// Draw every visible panel's chrome (header, fold indicator, title,
    /// body) in fixed kind order. Content is rendered by the views on top.
    pub fn draw(&self, dl: &mut DrawList, scaler: &UiScaler) {
        for kind in PanelKind::ALL {
            let panel = self.get(kind);
            if !panel.visible {
                continue;
            }

            let header = scaler.rect(panel.header_rect());
            dl.rect(header, theme::PANEL_HEADER);

            let indicator_size = scaler.apply(5.0);
            fold_indicator(
                dl,
                header.x + scaler.apply(7.0),
                header.y + header.h * 0.5,
                indicator_size,
                panel.collapsed,
            );

            let font_size = scaler.apply(theme::FONT_SIZE_CONTENT);
            dl.text(
                kind.label(),
                header.x + scaler.apply(FOLD_BOX_W + 2.0),
                header.y + (header.h + font_size * 0.7) * 0.5,
                font_size,
                theme::TEXT_COLOR,
            );

            if panel.collapsed {
                dl.rect_lines(header, 1.0, theme::PANEL_BORDER);
            } else {
                let body = scaler.rect(panel.bounds.remaining_after_top(PANEL_HEADER_H));
                dl.rect(body, theme::PANEL_BG);
                dl.rect_lines(scaler.rect(panel.bounds), 1.0, theme::PANEL_BORDER);
            }
        }
    }
}

impl Default for PanelSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::input::MouseState;

    fn scaler() -> UiScaler {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(1280.0, 720.0);
        s
    }

    fn press_at(x: f32, y: f32) -> FrameInput {
        FrameInput {
            mouse: MouseState {
                x,
                y,
                left_down: true,
                left_pressed: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        }
    }

    fn held_at(x: f32, y: f32) -> FrameInput {
        FrameInput {
            mouse: MouseState {
                x,
                y,
                left_down: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        }
    }

    fn released_at(x: f32, y: f32) -> FrameInput {
        FrameInput {
            mouse: MouseState {
                x,
                y,
                left_released: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        }
    }

    #[test]
    fn test_fixed_set_by_slot() {
        let set = PanelSet::new();
        for kind in PanelKind::ALL {
            assert_eq!(set.get(kind).kind, kind);
        }
        assert!(set.get(PanelKind::Hierarchy).visible);
        assert!(!set.get(PanelKind::Mixer).visible);
    }

    #[test]
    fn test_drag_tracks_pointer_minus_offset() {
        let mut set = PanelSet::new();
        let mut focus = FocusState::new();
        let s = scaler();

        // Hierarchy header spans (0, 70)..(220, 92); grab it at (100, 80)
        set.update(&press_at(100.0, 80.0), &mut focus, &s);
        assert_eq!(focus.dragging_panel(), Some(PanelKind::Hierarchy));

        set.update(&held_at(400.0, 200.0), &mut focus, &s);
        let b = set.get(PanelKind::Hierarchy).bounds;
        // Moved by the pointer delta (300, 120), offset stays fixed
        assert!((b.x - 300.0).abs() < 0.001);
        assert!((b.y - 190.0).abs() < 0.001);

        set.update(&released_at(400.0, 200.0), &mut focus, &s);
        assert!(focus.is_idle());
        let b = set.get(PanelKind::Hierarchy).bounds;
        assert!((b.x - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_only_one_panel_drags() {
        let mut set = PanelSet::new();
        let mut focus = FocusState::new();
        let s = scaler();

        set.update(&press_at(100.0, 80.0), &mut focus, &s);
        assert_eq!(focus.dragging_panel(), Some(PanelKind::Hierarchy));

        // A press on the Inspector header while Hierarchy drags is ignored
        set.update(&press_at(1100.0, 80.0), &mut focus, &s);
        assert_eq!(focus.dragging_panel(), Some(PanelKind::Hierarchy));
    }

    #[test]
    fn test_drag_clamped_to_window() {
        let mut set = PanelSet::new();
        let mut focus = FocusState::new();
        let s = scaler();

        set.update(&press_at(100.0, 80.0), &mut focus, &s);
        set.update(&held_at(-4000.0, -4000.0), &mut focus, &s);
        let b = set.get(PanelKind::Hierarchy).bounds;
        assert!(b.x >= MIN_VISIBLE - b.w - 0.001);
        assert!(b.y >= -0.001);

        set.update(&held_at(4000.0, 4000.0), &mut focus, &s);
        let b = set.get(PanelKind::Hierarchy).bounds;
        assert!(b.x <= 1280.0 - MIN_VISIBLE + 0.001);
        assert!(b.y <= 720.0 - PANEL_HEADER_H + 0.001);
    }

    #[test]
    fn test_scaled_window_drag_uses_design_space() {
        let mut set = PanelSet::new();
        let mut focus = FocusState::new();
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(640.0, 360.0); // scale 0.5

        // Header at design (0,70) appears at screen (0,35); grab at screen (50, 40)
        let mut input = press_at(50.0, 40.0);
        input.window_w = 640.0;
        input.window_h = 360.0;
        set.update(&input, &mut focus, &s);
        assert_eq!(focus.dragging_panel(), Some(PanelKind::Hierarchy));

        let mut input = held_at(150.0, 40.0); // +100 screen px = +200 design px
        input.window_w = 640.0;
        input.window_h = 360.0;
        set.update(&input, &mut focus, &s);
        let b = set.get(PanelKind::Hierarchy).bounds;
        assert!((b.x - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_collapse_keeps_header_draggable() {
        let mut set = PanelSet::new();
        let mut focus = FocusState::new();
        let s = scaler();

        // Click the fold box (first 18 design px of the header)
        set.update(&press_at(5.0, 80.0), &mut focus, &s);
        assert!(set.get(PanelKind::Hierarchy).collapsed);
        assert!(focus.is_idle());
        assert!(set.get(PanelKind::Hierarchy).content_rect().is_none());

        // Header outside the fold box still drags
        set.update(&press_at(100.0, 80.0), &mut focus, &s);
        assert_eq!(focus.dragging_panel(), Some(PanelKind::Hierarchy));
        set.update(&released_at(100.0, 80.0), &mut focus, &s);

        // And clicking the fold box again expands
        set.update(&press_at(5.0, 80.0), &mut focus, &s);
        assert!(!set.get(PanelKind::Hierarchy).collapsed);
        assert!(set.get(PanelKind::Hierarchy).content_rect().is_some());
    }

    #[test]
    fn test_hidden_panels_ignore_input() {
        let mut set = PanelSet::new();
        let mut focus = FocusState::new();
        let s = scaler();

        // Mixer is hidden by default; its header region does nothing
        let header = set.get(PanelKind::Mixer).header_rect();
        set.update(&press_at(header.center_x(), header.center_y()), &mut focus, &s);
        assert!(focus.is_idle());

        set.toggle_visible(PanelKind::Mixer);
        set.update(&press_at(header.center_x(), header.center_y()), &mut focus, &s);
        assert_eq!(focus.dragging_panel(), Some(PanelKind::Mixer));
    }
}
