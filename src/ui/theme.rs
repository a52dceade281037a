//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for consistent look across all editor panels.

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.118, 0.118, 0.118, 1.0); // 30, 30, 30

/// Panel background
pub const PANEL_BG: Color = Color::new(0.157, 0.157, 0.157, 1.0); // 40, 40, 40

/// Panel header
pub const PANEL_HEADER: Color = Color::new(0.235, 0.235, 0.235, 1.0); // 60, 60, 60

/// Panel border
pub const PANEL_BORDER: Color = Color::new(0.314, 0.314, 0.314, 1.0); // 80, 80, 80

/// Accent (Unity-like blue)
pub const ACCENT: Color = Color::new(0.0, 0.47, 0.824, 1.0); // 0, 120, 210

/// Alternate accent (FL Studio orange)
pub const ACCENT_ALT: Color = Color::new(1.0, 0.502, 0.0, 1.0); // 255, 128, 0

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.902, 0.902, 0.902, 1.0); // 230, 230, 230

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.706, 0.706, 0.706, 1.0); // 180, 180, 180

/// Grid lines
pub const GRID_COLOR: Color = Color::new(0.196, 0.196, 0.196, 0.5); // 50, 50, 50, 128

/// Timeline background
pub const TIMELINE_BG: Color = Color::new(0.098, 0.098, 0.098, 1.0); // 25, 25, 25

/// Selection highlight
pub const SELECTION: Color = Color::new(0.392, 0.588, 0.902, 0.392); // 100, 150, 230, 100

// =============================================================================
// Buttons and list rows
// =============================================================================

/// Button background
pub const BUTTON_BG: Color = Color::new(0.231, 0.357, 0.463, 1.0); // 59, 91, 118

/// Button background when hovered
pub const BUTTON_HOVER: Color = Color::new(0.318, 0.443, 0.565, 1.0); // 81, 113, 144

/// List view background (file browser, hierarchy)
pub const LIST_BG: Color = Color::new(0.078, 0.078, 0.078, 1.0); // 20, 20, 20

/// Selected list row background
pub const ROW_SELECTED: Color = Color::new(0.235, 0.235, 0.235, 1.0); // 60, 60, 60

/// Directory entries in the file browser
pub const DIR_ENTRY: Color = Color::new(0.4, 0.749, 1.0, 1.0); // 102, 191, 255

/// Text input background
pub const INPUT_BG: Color = Color::new(0.235, 0.235, 0.235, 1.0); // 60, 60, 60

/// Text input background while editing
pub const INPUT_BG_EDIT: Color = Color::new(0.275, 0.275, 0.275, 1.0); // 70, 70, 70

/// Scrollbar thumb
pub const SCROLLBAR: Color = Color::new(0.51, 0.51, 0.51, 1.0); // 130, 130, 130

/// Modal dim behind dialogs
pub const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.784); // 0, 0, 0, 200

/// White (borders, cursor, hot outlines)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Gray (inactive borders)
pub const GRAY: Color = Color::new(0.51, 0.51, 0.51, 1.0);

// =============================================================================
// Timeline element colors (by kind)
// =============================================================================

/// Audio elements
pub const ELEMENT_AUDIO: Color = Color::new(0.0, 0.706, 0.471, 1.0); // 0, 180, 120

/// Object elements
pub const ELEMENT_OBJECT: Color = Color::new(0.0, 0.47, 0.824, 1.0); // 0, 120, 210

/// Effect elements
pub const ELEMENT_EFFECT: Color = Color::new(0.784, 0.392, 0.863, 1.0); // 200, 100, 220

/// Event elements
pub const ELEMENT_EVENT: Color = Color::new(0.902, 0.784, 0.314, 1.0); // 230, 200, 80

/// Track label colors cycle through this palette as tracks are created
pub const TRACK_COLORS: [Color; 6] = [
    Color::new(0.839, 0.353, 0.353, 1.0), // 214, 90, 90
    Color::new(0.353, 0.706, 0.839, 1.0), // 90, 180, 214
    Color::new(0.467, 0.839, 0.353, 1.0), // 119, 214, 90
    Color::new(0.839, 0.702, 0.353, 1.0), // 214, 179, 90
    Color::new(0.678, 0.353, 0.839, 1.0), // 173, 90, 214
    Color::new(0.353, 0.839, 0.678, 1.0), // 90, 214, 173
];

// =============================================================================
// Font Sizes
// =============================================================================

/// Panel/section title size
pub const FONT_SIZE_TITLE: f32 = 18.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 16.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 14.0;

/// Text input content size
pub const FONT_SIZE_INPUT: f32 = 20.0;
