//! Panel content rendering
//!
//! Each dockable panel hosts one of these views. Views draw into the frame's
//! draw list, scroll their panel, and apply simple row interactions. Rows
//! outside the visible content area are skipped.

use crate::scene::{AssetEntry, GameObject, Pattern};
use crate::timeline::Arrangement;
use crate::ui::{
    theme, widgets, DrawList, FocusState, FontMetrics, FrameInput, Panel, Rect, UiScaler,
};

/// Height of one content row (design space)
const ROW_H: f32 = 22.0;

/// Wheel scroll pixels per notch (design space)
const SCROLL_STEP: f32 = 30.0;

/// Indent for nested rows (components under objects)
const INDENT: f32 = 18.0;

/// Wheel-scroll the panel content and clamp against the content height
fn scroll_panel(panel: &mut Panel, input: &FrameInput, scaler: &UiScaler, content_h: f32) {
    let Some(content) = panel.content_rect() else {
        return;
    };
    let content_screen = scaler.rect(content);
    if input.mouse.wheel != 0.0 && input.mouse.inside(&content_screen) {
        panel.scroll -= input.mouse.wheel * SCROLL_STEP;
    }
    panel.scroll = panel.scroll.clamp(0.0, (content_h - content.h).max(0.0));
}

/// Design-space rect of row `index` under the panel's scroll
fn row_rect(content: Rect, index: usize, scroll: f32) -> Rect {
    Rect::new(
        content.x,
        content.y + index as f32 * ROW_H - scroll,
        content.w,
        ROW_H,
    )
}

fn row_visible(content: Rect, row: Rect) -> bool {
    row.bottom() > content.y && row.y < content.bottom()
}

fn row_text(dl: &mut DrawList, scaler: &UiScaler, row: Rect, indent: f32, text: String, color: macroquad::prelude::Color) {
    let r = scaler.rect(row);
    let font_size = scaler.apply(theme::FONT_SIZE_SMALL);
    dl.text(
        text,
        r.x + scaler.apply(indent),
        r.y + (r.h + font_size * 0.7) * 0.5,
        font_size,
        color,
    );
}

/// Assets panel: flat list of importable items with their kinds
pub fn draw_assets(
    dl: &mut DrawList,
    input: &FrameInput,
    scaler: &UiScaler,
    panel: &mut Panel,
    assets: &[AssetEntry],
) {
    scroll_panel(panel, input, scaler, assets.len() as f32 * ROW_H);
    let Some(content) = panel.content_rect() else {
        return;
    };

    for (i, asset) in assets.iter().enumerate() {
        let row = row_rect(content, i, panel.scroll);
        if !row_visible(content, row) {
            continue;
        }
        row_text(dl, scaler, row, 6.0, asset.name.clone(), theme::TEXT_COLOR);
        let kind = asset.kind.label();
        let kind_row = Rect::new(row.right() - 70.0, row.y, 70.0, row.h);
        row_text(dl, scaler, kind_row, 0.0, kind.to_string(), theme::TEXT_DIM);
    }
}

/// Hierarchy panel: objects with fold triangles; a row click selects the
/// object exclusively, a fold-box click toggles its children
pub fn draw_hierarchy(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    panel: &mut Panel,
    objects: &mut [GameObject],
    selected_object: &mut Option<usize>,
) {
    let total_rows: usize = objects
        .iter()
        .map(|o| 1 + if o.folded { 0 } else { o.components().len() })
        .sum();
    scroll_panel(panel, input, scaler, total_rows as f32 * ROW_H);
    let Some(content) = panel.content_rect() else {
        return;
    };

    let click = focus.is_idle() && input.mouse.left_pressed;
    let mut row_index = 0usize;
    for (i, object) in objects.iter_mut().enumerate() {
        let row = row_rect(content, row_index, panel.scroll);
        row_index += 1;

        if row_visible(content, row) {
            let row_screen = scaler.rect(row);
            if *selected_object == Some(i) {
                dl.rect(row_screen, theme::SELECTION);
            }
            widgets::fold_indicator(
                dl,
                row_screen.x + scaler.apply(8.0),
                row_screen.y + row_screen.h * 0.5,
                scaler.apply(4.0),
                object.folded,
            );
            row_text(dl, scaler, row, INDENT, object.name.clone(), theme::TEXT_COLOR);

            if click && input.mouse.inside(&row_screen) {
                let fold_box = scaler.rect(Rect::new(row.x, row.y, INDENT, row.h));
                if input.mouse.inside(&fold_box) {
                    object.folded = !object.folded;
                } else {
                    *selected_object = Some(i);
                }
            }
        }

        object.selected = *selected_object == Some(i);
        if object.folded {
            continue;
        }
        for component in object.components() {
            let row = row_rect(content, row_index, panel.scroll);
            row_index += 1;
            if row_visible(content, row) {
                row_text(
                    dl,
                    scaler,
                    row,
                    INDENT * 2.0,
                    component.name.clone(),
                    theme::TEXT_DIM,
                );
            }
        }
    }
}

/// Inspector panel: the selected object's components rendered generically,
/// folding per component, one value bar per active property
pub fn draw_inspector(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    panel: &mut Panel,
    object: Option<&mut GameObject>,
) {
    let Some(object) = object else {
        if let Some(content) = panel.content_rect() {
            let row = row_rect(content, 0, 0.0);
            row_text(dl, scaler, row, 6.0, "No object selected".into(), theme::TEXT_DIM);
        }
        return;
    };

    let total_rows: usize = 1 + object
        .components()
        .iter()
        .map(|c| 1 + if c.folded { 0 } else { c.properties().len() })
        .sum::<usize>();
    scroll_panel(panel, input, scaler, total_rows as f32 * ROW_H);
    let Some(content) = panel.content_rect() else {
        return;
    };

    let click = focus.is_idle() && input.mouse.left_pressed;
    let mut row_index = 0usize;

    let name_row = row_rect(content, row_index, panel.scroll);
    row_index += 1;
    if row_visible(content, name_row) {
        row_text(dl, scaler, name_row, 6.0, object.name.clone(), theme::TEXT_COLOR);
    }

    for component in object.components_mut() {
        let header = row_rect(content, row_index, panel.scroll);
        row_index += 1;
        if row_visible(content, header) {
            let header_screen = scaler.rect(header);
            dl.rect(header_screen, theme::PANEL_HEADER);
            widgets::fold_indicator(
                dl,
                header_screen.x + scaler.apply(8.0),
                header_screen.y + header_screen.h * 0.5,
                scaler.apply(4.0),
                component.folded,
            );
            row_text(dl, scaler, header, INDENT, component.name.clone(), theme::TEXT_COLOR);
            if click && input.mouse.inside(&header_screen) {
                component.folded = !component.folded;
            }
        }
        if component.folded {
            continue;
        }

        for property in component.properties_mut() {
            let row = row_rect(content, row_index, panel.scroll);
            row_index += 1;
            if !row_visible(content, row) {
                continue;
            }
            let color = if property.active {
                theme::TEXT_COLOR
            } else {
                theme::TEXT_DIM
            };
            row_text(dl, scaler, row, INDENT, property.name.clone(), color);
            if property.active {
                let bar = Rect::new(
                    row.x + row.w * 0.45,
                    row.y + 4.0,
                    row.w * 0.55 - 6.0,
                    row.h - 8.0,
                );
                widgets::value_bar(
                    dl,
                    input,
                    focus,
                    scaler,
                    bar,
                    &mut property.value,
                    property.min,
                    property.max,
                );
            } else {
                let kind_row = Rect::new(row.right() - 50.0, row.y, 50.0, row.h);
                row_text(dl, scaler, kind_row, 0.0, property.kind.label().into(), theme::TEXT_DIM);
            }
        }
    }
}

/// Pattern Editor panel: pattern rows with color chips; clicking selects,
/// the fold box reveals the pattern's detail line
pub fn draw_pattern_editor(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    panel: &mut Panel,
    patterns: &mut [Pattern],
    selected_pattern: &mut Option<usize>,
) {
    let total_rows: usize = patterns
        .iter()
        .map(|p| 1 + if p.folded { 0 } else { 1 })
        .sum();
    scroll_panel(panel, input, scaler, total_rows as f32 * ROW_H);
    let Some(content) = panel.content_rect() else {
        return;
    };

    let click = focus.is_idle() && input.mouse.left_pressed;
    let mut row_index = 0usize;
    for (i, pattern) in patterns.iter_mut().enumerate() {
        let row = row_rect(content, row_index, panel.scroll);
        row_index += 1;
        if row_visible(content, row) {
            let row_screen = scaler.rect(row);
            if *selected_pattern == Some(i) {
                dl.rect(row_screen, theme::SELECTION);
            }
            widgets::fold_indicator(
                dl,
                row_screen.x + scaler.apply(8.0),
                row_screen.y + row_screen.h * 0.5,
                scaler.apply(4.0),
                pattern.folded,
            );
            dl.rect(
                scaler.rect(Rect::new(row.x + INDENT, row.y + 5.0, 10.0, row.h - 10.0)),
                pattern.color,
            );
            row_text(
                dl,
                scaler,
                row,
                INDENT + 14.0,
                pattern.name.clone(),
                theme::TEXT_COLOR,
            );

            if click && input.mouse.inside(&row_screen) {
                let fold_box = scaler.rect(Rect::new(row.x, row.y, INDENT, row.h));
                if input.mouse.inside(&fold_box) {
                    pattern.folded = !pattern.folded;
                } else {
                    *selected_pattern = Some(i);
                }
            }
        }

        if !pattern.folded {
            let detail = row_rect(content, row_index, panel.scroll);
            row_index += 1;
            if row_visible(content, detail) {
                row_text(
                    dl,
                    scaler,
                    detail,
                    INDENT * 2.0,
                    format!("#{} - {} notes", pattern.id, pattern.note_count),
                    theme::TEXT_DIM,
                );
            }
        }
    }
}

/// Mixer panel: one strip per track with mute/solo toggles and
/// volume/pan bars
pub fn draw_mixer(
    dl: &mut DrawList,
    input: &FrameInput,
    focus: &FocusState,
    scaler: &UiScaler,
    metrics: &dyn FontMetrics,
    panel: &mut Panel,
    arr: &mut Arrangement,
) {
    let strip_h = ROW_H * 2.0;
    scroll_panel(panel, input, scaler, arr.track_count() as f32 * strip_h);
    let Some(content) = panel.content_rect() else {
        return;
    };

    let any_solo = arr.any_solo();
    for index in 0..arr.track_count() {
        let strip = Rect::new(
            content.x,
            content.y + index as f32 * strip_h - panel.scroll,
            content.w,
            strip_h,
        );
        if strip.bottom() <= content.y || strip.y >= content.bottom() {
            continue;
        }

        let audible = arr.tracks()[index].is_audible(any_solo);
        let name = arr.tracks()[index].name.clone();
        let name_row = strip.slice_top(ROW_H);
        row_text(
            dl,
            scaler,
            name_row,
            6.0,
            name,
            if audible { theme::TEXT_COLOR } else { theme::TEXT_DIM },
        );

        let muted = arr.tracks()[index].muted;
        if widgets::toggle_button(
            dl,
            input,
            focus,
            scaler,
            metrics,
            Rect::new(name_row.right() - 50.0, name_row.y + 2.0, 22.0, ROW_H - 4.0),
            "M",
            muted,
        ) {
            arr.tracks_mut()[index].muted = !muted;
        }
        let soloed = arr.tracks()[index].solo;
        if widgets::toggle_button(
            dl,
            input,
            focus,
            scaler,
            metrics,
            Rect::new(name_row.right() - 26.0, name_row.y + 2.0, 22.0, ROW_H - 4.0),
            "S",
            soloed,
        ) {
            arr.tracks_mut()[index].solo = !soloed;
        }

        let bar_row = Rect::new(strip.x, strip.y + ROW_H, strip.w, ROW_H);
        let half = bar_row.w * 0.5;
        let track = &mut arr.tracks_mut()[index];
        widgets::value_bar(
            dl,
            input,
            focus,
            scaler,
            Rect::new(bar_row.x + 4.0, bar_row.y + 4.0, half - 8.0, bar_row.h - 8.0),
            &mut track.volume,
            0.0,
            1.0,
        );
        widgets::value_bar(
            dl,
            input,
            focus,
            scaler,
            Rect::new(bar_row.x + half + 4.0, bar_row.y + 4.0, half - 8.0, bar_row.h - 8.0),
            &mut track.pan,
            -1.0,
            1.0,
        );
    }
}
