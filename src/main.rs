//! GearBox: a hybrid audio/timeline/scene editor
//!
//! The frontend owns the window: it polls raw input into one `FrameInput`
//! snapshot per frame, hands it to the core, and replays the core's draw
//! list through macroquad. All editor behavior lives in the core modules.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod browser;
mod config;
mod scene;
mod timeline;
mod ui;
mod views;

use macroquad::prelude::*;

use app::AppState;
use config::EditorConfig;
use ui::{theme, DrawCmd, DrawList, EditKey, FontMetrics, FrameInput, MouseState};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("GearBox v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Text measurement through macroquad's default font
struct MacroquadMetrics;

impl FontMetrics for MacroquadMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        measure_text(text, None, font_size as u16, 1.0).width
    }
}

/// Poll macroquad once into the frame's input snapshot
fn poll_input() -> FrameInput {
    let (mouse_x, mouse_y) = mouse_position();

    let mut chars = Vec::new();
    while let Some(ch) = get_char_pressed() {
        chars.push(ch);
    }

    let mut keys = Vec::new();
    for (code, key) in [
        (KeyCode::Left, EditKey::Left),
        (KeyCode::Right, EditKey::Right),
        (KeyCode::Home, EditKey::Home),
        (KeyCode::End, EditKey::End),
        (KeyCode::Backspace, EditKey::Backspace),
        (KeyCode::Delete, EditKey::Delete),
    ] {
        if is_key_pressed(code) {
            keys.push(key);
        }
    }

    FrameInput {
        mouse: MouseState {
            x: mouse_x,
            y: mouse_y,
            left_down: is_mouse_button_down(MouseButton::Left),
            middle_down: is_mouse_button_down(MouseButton::Middle),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            wheel: mouse_wheel().1,
        },
        chars,
        keys,
        time: get_time(),
        dt: get_frame_time(),
        window_w: screen_width(),
        window_h: screen_height(),
    }
}

/// Replay the core's draw commands on the device
fn render(dl: &DrawList) {
    for cmd in dl.iter() {
        match cmd {
            DrawCmd::Rect { rect, color } => {
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, *color);
            }
            DrawCmd::RectLines {
                rect,
                thickness,
                color,
            } => {
                draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, *thickness, *color);
            }
            DrawCmd::Line {
                x1,
                y1,
                x2,
                y2,
                thickness,
                color,
            } => {
                draw_line(*x1, *y1, *x2, *y2, *thickness, *color);
            }
            DrawCmd::Triangle { p1, p2, p3, color } => {
                draw_triangle(
                    Vec2::new(p1.0, p1.1),
                    Vec2::new(p2.0, p2.1),
                    Vec2::new(p3.0, p3.1),
                    *color,
                );
            }
            DrawCmd::Text {
                text,
                x,
                y,
                size,
                color,
            } => {
                draw_text(text, *x, *y, *size, *color);
            }
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config_path = std::path::Path::new("gearbox.ron");
    let config = if config_path.exists() {
        match EditorConfig::load(config_path) {
            Ok(config) => {
                println!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", config_path.display(), e);
                EditorConfig::default()
            }
        }
    } else {
        EditorConfig::default()
    };

    let mut app = AppState::new(config);

    // Directory listings run off the frame thread on native targets
    #[cfg(not(target_arch = "wasm32"))]
    let lister = browser::ThreadedDir;
    #[cfg(target_arch = "wasm32")]
    let lister = browser::LocalDir;

    let metrics = MacroquadMetrics;

    println!("=== GearBox v{} ===", VERSION);

    loop {
        clear_background(theme::BG_COLOR);
        let input = poll_input();
        let draw_list = app.frame(&input, &lister, &metrics);
        render(draw_list);
        next_frame().await;
    }
}
