//! Timeline rendering and interaction
//!
//! Transforms between time and screen under zoom/scroll, element hit testing
//! and dragging, grid and playhead rendering. All layout runs in design
//! space; only the emitted draw commands are screen-space.

use super::state::TimelineState;
use super::track::Arrangement;
use crate::ui::{theme, widgets, DrawList, FocusState, FontMetrics, FrameInput, Rect, UiScaler};

/// Height of the timeline strip (design space)
pub const TIMELINE_H: f32 = 180.0;

/// Header row with the transport and view controls
pub const HEADER_H: f32 = 25.0;

/// Track label column width
pub const LABEL_W: f32 = 110.0;

/// Track row height and gap between rows
pub const TRACK_H: f32 = 36.0;
pub const TRACK_GAP: f32 = 4.0;

/// Wheel scroll pixels per notch (design space)
const SCROLL_STEP: f32 = 30.0;

/// Per-step zoom factor for the +/- controls
const ZOOM_STEP: f32 = 1.25;

/// Requests the timeline header raises for the frame controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineAction {
    TogglePlay,
    ToggleRecord,
    AddTrack,
    /// Cascade: the track's elements go with it
    RemoveSelectedTrack,
    TogglePatternEditor,
    ToggleMixer,
}

/// Header button states supplied by the frame controller
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineChrome {
    pub playing: bool,
    pub recording: bool,
    pub patterns_open: bool,
    pub mixer_open: bool,
}

/// Screen X for a time, under the current zoom and scroll
pub fn time_to_x(state: &TimelineState, time: f32) -> f32 {
    state.view.x + time * state.pixels_per_second() - state.scroll_x
}

/// Time for a design-space X, inverse of `time_to_x`
pub fn x_to_time(state: &TimelineState, x: f32) -> f32 {
    (x - state.view.x + state.scroll_x) / state.pixels_per_second()
}

/// Top edge of a track row in design space
pub fn track_y(state: &TimelineState, index: usize) -> f32 {
    state.view.y + index as f32 * (TRACK_H + TRACK_GAP) - state.scroll_y
}

/// Stacked height of all track rows
pub fn tracks_height(track_count: usize) -> f32 {
    track_count as f32 * (TRACK_H + TRACK_GAP)
}

/// Design-space bounds of an element under the current transform
pub fn element_rect(state: &TimelineState, track: usize, start: f32, duration: f32) -> Rect {
    Rect::new(
        time_to_x(state, start),
        track_y(state, track) + 4.0,
        duration * state.pixels_per_second(),
        TRACK_H - 8.0,
    )
}

/// Seconds of content worth keeping scrollable: the arranged material plus
/// a couple of bars of headroom
fn content_duration(state: &TimelineState, arr: &Arrangement) -> f32 {
    let arranged = arr
        .elements()
        .iter()
        .map(|e| e.end())
        .fold(0.0f32, f32::max);
    let headroom = state.beat_seconds() * 8.0;
    (arranged + headroom).max(60.0).max(state.playhead + headroom)
}

/// Run the timeline for one frame inside `bounds` (design space): header
/// controls, track interaction, element selection/drag, then drawing.
#[allow(clippy::too_many_arguments)]
pub fn frame(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &mut FocusState,
    scaler: &UiScaler,
    metrics: &dyn FontMetrics,
    state: &mut TimelineState,
    arr: &mut Arrangement,
    bounds: Rect,
    chrome: TimelineChrome,
) -> Option<TimelineAction> {
    let header = bounds.slice_top(HEADER_H);
    let body = bounds.remaining_after_top(HEADER_H);
    state.view = Rect::new(body.x + LABEL_W, body.y, body.w - LABEL_W, body.h);

    // Background first; everything else layers on top
    dl.rect(scaler.rect(bounds), theme::TIMELINE_BG);

    let action = header_frame(dl, input, focus, scaler, metrics, state, header, chrome);

    update_view_input(input, focus, scaler, state, arr);
    state.clamp_scroll(content_duration(state, arr), tracks_height(arr.track_count()));

    draw_tracks(dl, input, focus, scaler, state, arr);
    draw_grid(dl, scaler, state);
    draw_elements(dl, scaler, state, arr);
    draw_playhead(dl, scaler, state);

    action
}

/// Transport and view controls along the header strip
#[allow(clippy::too_many_arguments)]
fn header_frame(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    metrics: &dyn FontMetrics,
    state: &mut TimelineState,
    header: Rect,
    chrome: TimelineChrome,
) -> Option<TimelineAction> {
    dl.rect(scaler.rect(header), theme::PANEL_HEADER);
    let font_size = scaler.apply(theme::FONT_SIZE_TITLE);
    let title = scaler.rect(header);
    dl.text(
        "Timeline",
        title.x + scaler.apply(10.0),
        title.y + (title.h + font_size * 0.7) * 0.5,
        font_size,
        theme::TEXT_COLOR,
    );

    let mut action = None;
    let btn = |x: f32, w: f32| Rect::new(header.x + x, header.y + 2.5, w, HEADER_H - 5.0);

    if widgets::toggle_button(dl, input, focus, scaler, metrics, btn(110.0, 50.0), "Play", chrome.playing) {
        action = Some(TimelineAction::TogglePlay);
    }
    if widgets::toggle_button(dl, input, focus, scaler, metrics, btn(165.0, 45.0), "Rec", chrome.recording) {
        action = Some(TimelineAction::ToggleRecord);
    }
    if widgets::button(dl, input, focus, scaler, metrics, btn(220.0, 75.0), "Add Track") {
        action = Some(TimelineAction::AddTrack);
    }
    if widgets::button(dl, input, focus, scaler, metrics, btn(300.0, 75.0), "Del Track") {
        action = Some(TimelineAction::RemoveSelectedTrack);
    }
    if widgets::toggle_button(dl, input, focus, scaler, metrics, btn(380.0, 50.0), "Snap", state.snap_enabled) {
        state.snap_enabled = !state.snap_enabled;
    }
    if widgets::toggle_button(dl, input, focus, scaler, metrics, btn(435.0, 50.0), "Grid", state.show_grid) {
        state.show_grid = !state.show_grid;
    }
    if widgets::button(dl, input, focus, scaler, metrics, btn(490.0, 25.0), "-") {
        state.zoom_by(1.0 / ZOOM_STEP);
    }
    if widgets::button(dl, input, focus, scaler, metrics, btn(518.0, 25.0), "+") {
        state.zoom_by(ZOOM_STEP);
    }

    if widgets::toggle_button(
        dl, input, focus, scaler, metrics,
        btn(header.w - 200.0, 90.0),
        "Mixer",
        chrome.mixer_open,
    ) {
        action = Some(TimelineAction::ToggleMixer);
    }
    if widgets::toggle_button(
        dl, input, focus, scaler, metrics,
        btn(header.w - 100.0, 90.0),
        "Patterns",
        chrome.patterns_open,
    ) {
        action = Some(TimelineAction::TogglePatternEditor);
    }

    action
}

/// Selection, element drags, panning, and wheel scrolling over the track area
fn update_view_input(
    input: &FrameInput,
    focus: &mut FocusState,
    scaler: &UiScaler,
    state: &mut TimelineState,
    arr: &mut Arrangement,
) {
    let view_screen = scaler.rect(state.view);
    let mouse_design = (
        scaler.unapply(input.mouse.x),
        scaler.unapply(input.mouse.y),
    );

    // Element drag in progress: retime under the pointer, snapped
    if let Some(index) = focus.dragging_element() {
        if input.mouse.left_down {
            let pointer_time = x_to_time(state, mouse_design.0);
            let new_start = state.snap_time(pointer_time - state.drag_grab);
            if let Some(element) = arr.element_mut(index) {
                element.start = new_start;
            }
            state.cursor = mouse_design;
        } else {
            focus.end_element_drag();
        }
        return;
    }

    // Middle-button pan: scroll follows the anchored origin
    if input.mouse.middle_down && (state.panning || input.mouse.inside(&view_screen)) {
        if !state.panning {
            state.panning = true;
            state.origin = (state.scroll_x + mouse_design.0, state.scroll_y + mouse_design.1);
        }
        state.cursor = mouse_design;
        state.scroll_x = state.origin.0 - mouse_design.0;
        state.scroll_y = state.origin.1 - mouse_design.1;
    } else {
        state.panning = false;
    }

    if input.mouse.wheel != 0.0 && input.mouse.inside(&view_screen) {
        state.scroll_y -= input.mouse.wheel * SCROLL_STEP;
    }

    if !input.mouse.left_pressed || !input.mouse.inside(&view_screen) {
        return;
    }

    // Topmost element under the pointer wins; later elements draw on top
    let hit = arr
        .elements()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, e)| {
            element_rect(state, e.track, e.start, e.duration)
                .contains(mouse_design.0, mouse_design.1)
        })
        .map(|(i, _)| i);

    match hit {
        Some(index) => {
            arr.select_only(Some(index));
            if focus.try_begin_element_drag(index) {
                let element = &arr.elements()[index];
                state.drag_grab = x_to_time(state, mouse_design.0) - element.start;
            }
        }
        None => arr.select_only(None),
    }
    state.cursor = mouse_design;
}

/// Track label column and row backgrounds; label clicks select the track,
/// the M/S boxes toggle mute and solo
fn draw_tracks(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    state: &mut TimelineState,
    arr: &mut Arrangement,
) {
    let view = state.view;
    let label_x = view.x - LABEL_W;
    let any_solo = arr.any_solo();

    for index in 0..arr.track_count() {
        let y = track_y(state, index);
        if y + TRACK_H < view.y || y > view.bottom() {
            continue;
        }

        let row = Rect::new(view.x, y, view.w, TRACK_H);
        let label = Rect::new(label_x, y, LABEL_W, TRACK_H);
        let label_screen = scaler.rect(label);
        let selected = state.selected_track == Some(index);

        let audible = arr.tracks()[index].is_audible(any_solo);
        dl.rect(scaler.rect(row), theme::PANEL_BG);
        dl.line(
            scaler.apply(label_x),
            scaler.apply(y),
            scaler.apply(view.right()),
            scaler.apply(y),
            1.0,
            theme::PANEL_BORDER,
        );
        dl.rect(
            label_screen,
            if selected { theme::ROW_SELECTED } else { theme::PANEL_HEADER },
        );

        // Color chip, dimmed while inaudible
        let track = &arr.tracks()[index];
        let mut chip_color = track.color;
        if !audible {
            chip_color.a = 0.35;
        }
        dl.rect(
            scaler.rect(Rect::new(label.x + 3.0, label.y + 3.0, 6.0, TRACK_H - 6.0)),
            chip_color,
        );

        let font_size = scaler.apply(theme::FONT_SIZE_SMALL);
        dl.text(
            track.name.clone(),
            label_screen.x + scaler.apply(13.0),
            label_screen.y + (label_screen.h + font_size * 0.7) * 0.5,
            font_size,
            if audible { theme::TEXT_COLOR } else { theme::TEXT_DIM },
        );

        // Mute / solo boxes at the right edge of the label
        let mute_box = Rect::new(label.right() - 36.0, label.y + 9.0, 16.0, 16.0);
        let solo_box = Rect::new(label.right() - 18.0, label.y + 9.0, 16.0, 16.0);
        let (muted, soloed) = (track.muted, track.solo);
        draw_flag_box(dl, scaler, mute_box, "M", muted, theme::ACCENT_ALT);
        draw_flag_box(dl, scaler, solo_box, "S", soloed, theme::ACCENT);

        if focus.is_idle() && input.mouse.left_pressed {
            if input.mouse.inside(&scaler.rect(mute_box)) {
                arr.tracks_mut()[index].muted = !muted;
            } else if input.mouse.inside(&scaler.rect(solo_box)) {
                arr.tracks_mut()[index].solo = !soloed;
            } else if input.mouse.inside(&label_screen) {
                state.selected_track = Some(index);
            }
        }

        arr.tracks_mut()[index].bounds = scaler.rect(row);
        arr.tracks_mut()[index].selected = selected;
    }
}

fn draw_flag_box(
    dl: &mut DrawList,
    scaler: &UiScaler,
    rect: Rect,
    letter: &str,
    active: bool,
    active_color: macroquad::prelude::Color,
) {
    let r = scaler.rect(rect);
    dl.rect(r, if active { active_color } else { theme::ROW_SELECTED });
    dl.rect_lines(r, 1.0, theme::PANEL_BORDER);
    let font_size = scaler.apply(theme::FONT_SIZE_SMALL);
    dl.text(
        letter,
        r.x + r.w * 0.25,
        r.y + (r.h + font_size * 0.7) * 0.5,
        font_size,
        theme::TEXT_COLOR,
    );
}

/// Vertical beat lines across the track area
fn draw_grid(dl: &mut DrawList, scaler: &UiScaler, state: &TimelineState) {
    if !state.show_grid {
        return;
    }
    let view = state.view;
    let beat = state.beat_seconds();
    let first_beat = (x_to_time(state, view.x) / beat).floor().max(0.0);
    let mut t = first_beat * beat;
    while time_to_x(state, t) <= view.right() {
        let x = time_to_x(state, t);
        if x >= view.x {
            dl.line(
                scaler.apply(x),
                scaler.apply(view.y),
                scaler.apply(x),
                scaler.apply(view.bottom()),
                1.0,
                theme::GRID_COLOR,
            );
        }
        t += beat;
    }
}

/// Element rectangles, clipped to the view; refreshes each element's stored
/// screen bounds for next frame's hit tests
fn draw_elements(
    dl: &mut DrawList,
    scaler: &UiScaler,
    state: &TimelineState,
    arr: &mut Arrangement,
) {
    let view = state.view;
    for element in arr.elements_mut() {
        let rect = element_rect(state, element.track, element.start, element.duration);
        element.bounds = scaler.rect(rect);
        if !rect.intersects(&view) {
            continue;
        }

        // Clip horizontally so elements never spill over the label column
        let x0 = rect.x.max(view.x);
        let x1 = rect.right().min(view.right());
        let clipped = Rect::new(x0, rect.y, x1 - x0, rect.h);
        let screen = scaler.rect(clipped);

        dl.rect(screen, element.color);
        if element.selected {
            dl.rect(screen, theme::SELECTION);
            dl.rect_lines(screen, 2.0, theme::WHITE);
        } else {
            dl.rect_lines(screen, 1.0, theme::PANEL_BORDER);
        }

        let font_size = scaler.apply(theme::FONT_SIZE_SMALL);
        dl.text(
            element.name.clone(),
            screen.x + scaler.apply(4.0),
            screen.y + font_size,
            font_size,
            theme::TEXT_COLOR,
        );
    }
}

/// Playhead marker, drawn only while inside the visible track area
fn draw_playhead(dl: &mut DrawList, scaler: &UiScaler, state: &TimelineState) {
    let x = time_to_x(state, state.playhead);
    let view = state.view;
    if x >= view.x && x <= view.right() {
        dl.line(
            scaler.apply(x),
            scaler.apply(view.y),
            scaler.apply(x),
            scaler.apply(view.bottom()),
            2.0,
            theme::ACCENT_ALT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::track::ElementKind;
    use crate::ui::test_metrics::MonoMetrics;
    use crate::ui::MouseState;

    fn scaler() -> UiScaler {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(1280.0, 720.0);
        s
    }

    fn state_with_view() -> TimelineState {
        let mut state = TimelineState::new();
        state.view = Rect::new(LABEL_W, 405.0, 1280.0 - LABEL_W, 155.0);
        state
    }

    #[test]
    fn test_time_transform_roundtrip() {
        let mut state = state_with_view();
        state.set_zoom(2.0);
        state.scroll_x = 120.0;
        let t = 3.25;
        let x = time_to_x(&state, t);
        assert!((x_to_time(&state, x) - t).abs() < 0.0001);
    }

    #[test]
    fn test_zoom_scales_element_width() {
        let mut state = state_with_view();
        state.set_zoom(1.0);
        let narrow = element_rect(&state, 0, 1.0, 0.5);
        state.set_zoom(2.0);
        let wide = element_rect(&state, 0, 1.0, 0.5);
        assert!((wide.w - narrow.w * 2.0).abs() < 0.001);
    }

    #[test]
    fn test_click_selects_topmost_element() {
        let mut state = state_with_view();
        let mut arr = Arrangement::new();
        arr.add_track("T").unwrap();
        arr.add_element("under", ElementKind::Audio, 0, 0.0, 2.0).unwrap();
        arr.add_element("over", ElementKind::Event, 0, 0.5, 1.0).unwrap();
        let mut focus = FocusState::new();
        let s = scaler();

        // Click where both elements overlap (t = 1.0)
        let x = time_to_x(&state, 1.0);
        let y = track_y(&state, 0) + TRACK_H * 0.5;
        let input = FrameInput {
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
        };
        update_view_input(&input, &mut focus, &s, &mut state, &mut arr);
        assert_eq!(arr.selected_element(), Some(1)); // later element is on top
        assert_eq!(focus.dragging_element(), Some(1));
    }

    #[test]
    fn test_click_empty_clears_selection() {
        let mut state = state_with_view();
        let mut arr = Arrangement::new();
        arr.add_track("T").unwrap();
        arr.add_element("a", ElementKind::Audio, 0, 0.0, 1.0).unwrap();
        arr.select_only(Some(0));
        let mut focus = FocusState::new();
        let s = scaler();

        let x = time_to_x(&state, 5.0); // far past the element
        let y = track_y(&state, 0) + TRACK_H * 0.5;
        let input = FrameInput {
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
        };
        update_view_input(&input, &mut focus, &s, &mut state, &mut arr);
        assert_eq!(arr.selected_element(), None);
        assert!(focus.is_idle());
    }

    #[test]
    fn test_element_drag_snaps_start() {
        let mut state = state_with_view();
        let mut arr = Arrangement::new();
        arr.add_track("T").unwrap();
        arr.add_element("a", ElementKind::Audio, 0, 1.0, 0.5).unwrap();
        let mut focus = FocusState::new();
        let s = scaler();

        // Grab the element at its start edge
        let grab_x = time_to_x(&state, 1.0) + 1.0;
        let y = track_y(&state, 0) + TRACK_H * 0.5;
        let press = FrameInput {
            mouse: MouseState {
                x: grab_x,
                y,
                left_down: true,
                left_pressed: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        };
        update_view_input(&press, &mut focus, &s, &mut state, &mut arr);
        assert_eq!(focus.dragging_element(), Some(0));

        // Drag to roughly t = 2.3; 120 BPM 4/4 with division 4 snaps to 0.125s
        let drag = FrameInput {
            mouse: MouseState {
                x: time_to_x(&state, 2.3) + 1.0,
                y,
                left_down: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        };
        update_view_input(&drag, &mut focus, &s, &mut state, &mut arr);
        let start = arr.elements()[0].start;
        let step = state.snap_step();
        let remainder = (start / step) - (start / step).round();
        assert!(remainder.abs() < 0.0001, "start {} not on the snap grid", start);

        // Release ends the drag
        let release = FrameInput {
            mouse: MouseState {
                left_released: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        };
        update_view_input(&release, &mut focus, &s, &mut state, &mut arr);
        assert!(focus.is_idle());
    }

    #[test]
    fn test_playhead_clipped_to_view() {
        let mut state = state_with_view();
        state.playhead = 1000.0; // far off screen
        let s = scaler();
        let mut dl = DrawList::new();
        draw_playhead(&mut dl, &s, &state);
        assert!(dl.is_empty());

        state.playhead = x_to_time(&state, state.view.x + 10.0);
        let mut dl = DrawList::new();
        draw_playhead(&mut dl, &s, &state);
        assert_eq!(dl.len(), 1);
    }

    #[test]
    fn test_frame_reports_header_actions() {
        let mut state = TimelineState::new();
        let mut arr = Arrangement::new();
        arr.add_track("T").unwrap();
        let mut focus = FocusState::new();
        let s = scaler();
        let mut dl = DrawList::new();

        // Release on the "Add Track" button (design 220..295 x, header row)
        let bounds = Rect::new(0.0, 380.0, 1280.0, TIMELINE_H);
        let input = FrameInput {
            mouse: MouseState {
                x: 250.0,
                y: 380.0 + HEADER_H * 0.5,
                left_released: true,
                ..MouseState::default()
            },
            window_w: 1280.0,
            window_h: 720.0,
            ..FrameInput::default()
        };
        let action = frame(
            &mut dl,
            &input,
            &mut focus,
            &s,
            &MonoMetrics,
            &mut state,
            &mut arr,
            bounds,
            TimelineChrome::default(),
        );
        assert_eq!(action, Some(TimelineAction::AddTrack));
    }
}
