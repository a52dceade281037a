//! Timeline view state: zoom, scroll, snap, playhead
//!
//! The horizontal axis is time scaled by zoom and offset by scroll; the
//! vertical axis is track stacking order offset by scroll. Zoom and the
//! snap division are strictly positive by construction.

use crate::ui::Rect;

/// Zoom bounds keep the horizontal scale strictly positive and drawable
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;

/// Horizontal pixels for one second at zoom 1.0
pub const BASE_PIXELS_PER_SECOND: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct TimelineState {
    zoom: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    /// The track area on screen, refreshed by the view each frame
    pub view: Rect,
    /// Selected track, if any (always a valid index when set)
    pub selected_track: Option<usize>,
    /// Current pointer position during a pan (design space)
    pub cursor: (f32, f32),
    /// Scroll-plus-pointer anchor recorded when a pan starts
    pub origin: (f32, f32),
    pub bpm: f32,
    pub sig_numerator: f32,
    pub sig_denominator: f32,
    snap_division: f32,
    pub snap_enabled: bool,
    pub show_grid: bool,
    /// Playhead position in seconds, advanced by the transport
    pub playhead: f32,
    /// While an element drag is live: time offset between the grab point
    /// and the element's start
    pub drag_grab: f32,
    /// Whether a middle-button pan is in progress
    pub panning: bool,
}

impl TimelineState {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            view: Rect::default(),
            selected_track: None,
            cursor: (0.0, 0.0),
            origin: (0.0, 0.0),
            bpm: 120.0,
            sig_numerator: 4.0,
            sig_denominator: 4.0,
            snap_division: 4.0,
            snap_enabled: true,
            show_grid: true,
            playhead: 0.0,
            drag_grab: 0.0,
            panning: false,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    pub fn snap_division(&self) -> f32 {
        self.snap_division
    }

    pub fn set_snap_division(&mut self, division: f32) {
        if division > 0.0 {
            self.snap_division = division;
        }
    }

    /// Seconds per beat: one denominator note at the configured BPM
    pub fn beat_seconds(&self) -> f32 {
        (60.0 / self.bpm) * (4.0 / self.sig_denominator)
    }

    /// The snap step in seconds (1 / snap_division beats)
    pub fn snap_step(&self) -> f32 {
        self.beat_seconds() / self.snap_division
    }

    /// Round a time to the nearest snap step when snapping is on.
    /// Results never go below zero.
    pub fn snap_time(&self, time: f32) -> f32 {
        let t = if self.snap_enabled {
            let step = self.snap_step();
            (time / step).round() * step
        } else {
            time
        };
        t.max(0.0)
    }

    /// Horizontal scale in pixels per second under the current zoom
    pub fn pixels_per_second(&self) -> f32 {
        BASE_PIXELS_PER_SECOND * self.zoom
    }

    /// Clamp both scroll offsets so the content stays reachable:
    /// horizontally against the arranged duration, vertically against the
    /// stacked track height.
    pub fn clamp_scroll(&mut self, content_duration: f32, tracks_height: f32) {
        let max_x = (content_duration * self.pixels_per_second() - self.view.w).max(0.0);
        let max_y = (tracks_height - self.view.h).max(0.0);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }
}

impl Default for TimelineState {
    fn default() -> Self {
        Self::new()
    }
}
