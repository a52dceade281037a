//! Immediate-mode UI layer for the editor
//!
//! Design principles:
//! - One input snapshot per frame, one draw list out
//! - Layout at a fixed design resolution, scaled uniformly to the window
//! - Exclusive interactions (text edit, drags) go through a single focus token
//!
//! Note: some geometry helpers are kept as part of the layout API even
//! where only tests exercise them today.

#![allow(dead_code)]

mod draw;
mod input;
mod panel;
mod rect;
mod scaler;
mod text_input;
pub mod theme;
pub mod widgets;

pub use draw::{DrawCmd, DrawList, FontMetrics};
pub use input::{EditKey, Focus, FocusState, FrameInput, MouseState, TextFieldId};
pub use panel::{Panel, PanelKind, PanelSet, PANEL_HEADER_H};
pub use rect::Rect;
pub use scaler::UiScaler;
pub use text_input::{TextField, MAX_TEXT_LEN};

#[cfg(test)]
pub use draw::test_metrics;
