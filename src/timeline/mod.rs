//! Timeline: tracks, elements, and the zoom/scroll/snap view over them

mod state;
mod track;
mod view;

pub use state::{TimelineState, BASE_PIXELS_PER_SECOND, MAX_ZOOM, MIN_ZOOM};
pub use track::{
    Arrangement, ElementKind, TimelineElement, TimelineError, Track, MAX_ELEMENTS, MAX_TRACKS,
};
pub use view::{
    frame as timeline_frame, time_to_x, track_y, TimelineAction, TimelineChrome, TIMELINE_H,
};
