//! Basic UI widgets
//!
//! Immediate-mode helpers: each call draws into the frame's draw list and
//! reports interaction for this frame. Widgets never claim the focus token;
//! they only respond while nothing else owns it.

use super::draw::{DrawList, FontMetrics};
use super::input::FrameInput;
use super::scaler::UiScaler;
use super::theme;
use super::{FocusState, Rect};

/// Draw a push button, returns true when clicked (released inside).
/// `rect` is in design space.
pub fn button(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    metrics: &dyn FontMetrics,
    rect: Rect,
    label: &str,
) -> bool {
    button_impl(dl, input, focus, scaler, metrics, rect, label, false)
}

/// Button with an active state (accent background while active)
pub fn toggle_button(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    metrics: &dyn FontMetrics,
    rect: Rect,
    label: &str,
    active: bool,
) -> bool {
    button_impl(dl, input, focus, scaler, metrics, rect, label, active)
}

#[allow(clippy::too_many_arguments)]
fn button_impl(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    metrics: &dyn FontMetrics,
    rect: Rect,
    label: &str,
    active: bool,
) -> bool {
    let r = scaler.rect(rect);
    let interactive = focus.is_idle();
    let hovered = interactive && input.mouse.inside(&r);

    let bg = if active {
        theme::ACCENT
    } else if hovered {
        theme::BUTTON_HOVER
    } else {
        theme::BUTTON_BG
    };
    dl.rect(r, bg);
    dl.rect_lines(r, 1.0, if hovered { theme::WHITE } else { theme::TEXT_DIM });

    let font_size = scaler.apply(theme::FONT_SIZE_SMALL);
    let text_w = metrics.text_width(label, font_size);
    dl.text(
        label,
        r.x + (r.w - text_w) * 0.5,
        r.y + (r.h + font_size * 0.7) * 0.5,
        font_size,
        theme::WHITE,
    );

    hovered && input.mouse.left_released
}

/// Horizontal value bar (mixer volume/pan). Clicking or holding inside sets
/// the value from the pointer position. Returns true if the value changed.
#[allow(clippy::too_many_arguments)]
pub fn value_bar(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    rect: Rect,
    value: &mut f32,
    min: f32,
    max: f32,
) -> bool {
    let r = scaler.rect(rect);
    let mut changed = false;

    if focus.is_idle() && input.mouse.clicking(&r) && r.w > 0.0 {
        let t = ((input.mouse.x - r.x) / r.w).clamp(0.0, 1.0);
        let new_value = min + t * (max - min);
        if (new_value - *value).abs() > f32::EPSILON {
            *value = new_value;
            changed = true;
        }
    }

    dl.rect(r, theme::LIST_BG);
    let t = if max > min {
        ((*value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    dl.rect(Rect::new(r.x, r.y, r.w * t, r.h), theme::ACCENT);
    dl.rect_lines(r, 1.0, theme::PANEL_BORDER);

    changed
}

/// Small fold indicator triangle (right-pointing when folded, down-pointing
/// when open), drawn in screen space at the left of a row.
pub fn fold_indicator(dl: &mut DrawList, x: f32, y: f32, size: f32, folded: bool) {
    if folded {
        dl.triangle(
            (x, y - size),
            (x, y + size),
            (x + size, y),
            theme::TEXT_DIM,
        );
    } else {
        dl.triangle(
            (x - 2.0, y - size * 0.6),
            (x + size + 2.0, y - size * 0.6),
            (x + size * 0.5, y + size * 0.8),
            theme::TEXT_DIM,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::draw::test_metrics::MonoMetrics;
    use crate::ui::input::MouseState;
    use crate::ui::input::TextFieldId;

    fn scaler() -> UiScaler {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(1280.0, 720.0);
        s
    }

    fn release_at(x: f32, y: f32) -> FrameInput {
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
    fn test_button_clicks_on_release_inside() {
        let mut dl = DrawList::new();
        let focus = FocusState::new();
        let s = scaler();
        let rect = Rect::new(100.0, 100.0, 90.0, 30.0);

        assert!(button(
            &mut dl,
            &release_at(120.0, 110.0),
            &focus,
            &s,
            &MonoMetrics,
            rect,
            "OK"
        ));
        assert!(!button(
            &mut dl,
            &release_at(10.0, 10.0),
            &focus,
            &s,
            &MonoMetrics,
            rect,
            "OK"
        ));
    }

    #[test]
    fn test_button_inert_while_focus_owned() {
        let mut dl = DrawList::new();
        let mut focus = FocusState::new();
        focus.try_begin_edit(TextFieldId::ProjectName);
        let s = scaler();
        let rect = Rect::new(100.0, 100.0, 90.0, 30.0);
        assert!(!button(
            &mut dl,
            &release_at(120.0, 110.0),
            &focus,
            &s,
            &MonoMetrics,
            rect,
            "OK"
        ));
    }

    #[test]
    fn test_value_bar_sets_from_pointer() {
        let mut dl = DrawList::new();
        let focus = FocusState::new();
        let s = scaler();
        let rect = Rect::new(0.0, 0.0, 100.0, 10.0);
        let mut value = 0.0f32;

        let input = FrameInput {
            mouse: MouseState {
                x: 75.0,
                y: 5.0,
                left_down: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        };
        assert!(value_bar(
            &mut dl, &input, &focus, &s, rect, &mut value, 0.0, 1.0
        ));
        assert!((value - 0.75).abs() < 0.001);

        // Pan-style range maps the same way
        let mut pan = 0.0f32;
        assert!(value_bar(
            &mut dl, &input, &focus, &s, rect, &mut pan, -1.0, 1.0
        ));
        assert!((pan - 0.5).abs() < 0.001);
    }
}
