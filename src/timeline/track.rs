//! Tracks, timeline elements, and the arrangement that owns them
//!
//! Bounded collections with explicit capacity checks: creation either
//! succeeds completely or fails with a typed error and no partial mutation.

use macroquad::prelude::Color;
use std::fmt;

use crate::ui::{theme, Rect};

/// Maximum number of tracks in an arrangement
pub const MAX_TRACKS: usize = 16;

/// Maximum number of elements across all tracks
pub const MAX_ELEMENTS: usize = 128;

/// What a timeline element represents (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Audio,
    Object,
    Effect,
    Event,
}

impl ElementKind {
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Audio => "Audio",
            ElementKind::Object => "Object",
            ElementKind::Effect => "Effect",
            ElementKind::Event => "Event",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ElementKind::Audio => theme::ELEMENT_AUDIO,
            ElementKind::Object => theme::ELEMENT_OBJECT,
            ElementKind::Effect => theme::ELEMENT_EFFECT,
            ElementKind::Event => theme::ELEMENT_EVENT,
        }
    }
}

/// One horizontal lane of the timeline. Order in the arrangement is the
/// vertical stacking order.
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub color: Color,
    pub muted: bool,
    pub solo: bool,
    pub volume: f32,
    pub pan: f32,
    /// Screen-space row bounds, refreshed by the view each frame
    pub bounds: Rect,
    pub selected: bool,
}

impl Track {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            muted: false,
            solo: false,
            volume: 1.0,
            pan: 0.0,
            bounds: Rect::default(),
            selected: false,
        }
    }

    /// Mute and solo are independent flags; mute wins when both are set
    pub fn is_audible(&self, any_solo: bool) -> bool {
        !self.muted && (!any_solo || self.solo)
    }
}

/// An item placed on a track: a start time and a duration, in seconds
#[derive(Debug, Clone)]
pub struct TimelineElement {
    pub name: String,
    pub kind: ElementKind,
    pub id: u32,
    /// Screen-space bounds, refreshed by the view each frame
    pub bounds: Rect,
    pub color: Color,
    pub selected: bool,
    pub track: usize,
    pub start: f32,
    pub duration: f32,
}

impl TimelineElement {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// Why a timeline mutation was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// Element creation referenced a track that does not exist
    TrackIndexOutOfRange { index: usize, track_count: usize },
    /// Track list is full
    TrackLimitReached { max: usize },
    /// Element list is full
    ElementLimitReached { max: usize },
    /// Elements must have a strictly positive duration
    InvalidDuration { duration: f32 },
    /// Elements cannot start before time zero
    InvalidStart { start: f32 },
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineError::TrackIndexOutOfRange { index, track_count } => {
                write!(f, "track index {} out of range ({} tracks)", index, track_count)
            }
            TimelineError::TrackLimitReached { max } => {
                write!(f, "track limit reached ({} max)", max)
            }
            TimelineError::ElementLimitReached { max } => {
                write!(f, "element limit reached ({} max)", max)
            }
            TimelineError::InvalidDuration { duration } => {
                write!(f, "element duration must be positive (got {})", duration)
            }
            TimelineError::InvalidStart { start } => {
                write!(f, "element start must be non-negative (got {})", start)
            }
        }
    }
}

impl std::error::Error for TimelineError {}

/// Tracks plus the elements placed on them. The single owner of both lists;
/// every mutation keeps the cross-references valid.
#[derive(Debug, Default)]
pub struct Arrangement {
    tracks: Vec<Track>,
    elements: Vec<TimelineElement>,
    next_element_id: u32,
}

impl Arrangement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    pub fn elements(&self) -> &[TimelineElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [TimelineElement] {
        &mut self.elements
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    pub fn element(&self, index: usize) -> Option<&TimelineElement> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut TimelineElement> {
        self.elements.get_mut(index)
    }

    /// Append a track. New tracks default to unmuted, unsolo, full volume,
    /// centered pan; colors cycle through the track palette.
    pub fn add_track(&mut self, name: impl Into<String>) -> Result<usize, TimelineError> {
        if self.tracks.len() >= MAX_TRACKS {
            return Err(TimelineError::TrackLimitReached { max: MAX_TRACKS });
        }
        let color = theme::TRACK_COLORS[self.tracks.len() % theme::TRACK_COLORS.len()];
        self.tracks.push(Track::new(name, color));
        Ok(self.tracks.len() - 1)
    }

    /// Place an element on a track. Rejects out-of-range track references,
    /// non-positive durations, and negative start times without mutating
    /// anything. Returns the assigned id (monotonically increasing).
    pub fn add_element(
        &mut self,
        name: impl Into<String>,
        kind: ElementKind,
        track: usize,
        start: f32,
        duration: f32,
    ) -> Result<u32, TimelineError> {
        if track >= self.tracks.len() {
            return Err(TimelineError::TrackIndexOutOfRange {
                index: track,
                track_count: self.tracks.len(),
            });
        }
        if !(duration > 0.0) {
            return Err(TimelineError::InvalidDuration { duration });
        }
        if start < 0.0 {
            return Err(TimelineError::InvalidStart { start });
        }
        if self.elements.len() >= MAX_ELEMENTS {
            return Err(TimelineError::ElementLimitReached { max: MAX_ELEMENTS });
        }

        let id = self.next_element_id;
        self.next_element_id += 1;
        self.elements.push(TimelineElement {
            name: name.into(),
            kind,
            id,
            bounds: Rect::default(),
            color: kind.color(),
            selected: false,
            track,
            start,
            duration,
        });
        Ok(id)
    }

    /// Remove a track. Its elements are deleted with it and elements on
    /// later tracks are reindexed, so every element keeps referencing a
    /// live track.
    pub fn remove_track(&mut self, index: usize) -> Result<Track, TimelineError> {
        if index >= self.tracks.len() {
            return Err(TimelineError::TrackIndexOutOfRange {
                index,
                track_count: self.tracks.len(),
            });
        }
        let track = self.tracks.remove(index);
        self.elements.retain(|e| e.track != index);
        for element in &mut self.elements {
            if element.track > index {
                element.track -= 1;
            }
        }
        Ok(track)
    }

    /// Make `index` the sole selected element (None clears the selection)
    pub fn select_only(&mut self, index: Option<usize>) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.selected = Some(i) == index;
        }
    }

    pub fn selected_element(&self) -> Option<usize> {
        self.elements.iter().position(|e| e.selected)
    }

    pub fn any_solo(&self) -> bool {
        self.tracks.iter().any(|t| t.solo)
    }
}
