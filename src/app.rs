//! Application state and frame controller
//!
//! One explicitly owned `AppState` holds every component; nothing is global.
//! Each frame consumes exactly one input snapshot, updates components in a
//! fixed sequence, and renders in a fixed depth order: background, toolbar,
//! timeline, panels, then the file browser modal on top.

use crate::browser::{BrowserOutcome, DirLister, FileBrowser};
use crate::config::EditorConfig;
use crate::scene::{AssetEntry, Component, ComponentProperty, GameObject, Pattern, PropertyKind};
use crate::timeline::{
    timeline_frame, Arrangement, ElementKind, TimelineAction, TimelineChrome, TimelineState,
    TIMELINE_H,
};
use crate::ui::{
    theme, widgets, DrawList, FocusState, FontMetrics, FrameInput, PanelKind, PanelSet, Rect,
    TextField, TextFieldId, UiScaler,
};
use crate::views;

/// Height of the top toolbar strip (design space)
pub const TOOLBAR_H: f32 = 34.0;

/// The editing tools (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTool {
    Select,
    Move,
    Pen,
    Eraser,
    Scale,
}

impl EditorTool {
    pub const ALL: [EditorTool; 5] = [
        EditorTool::Select,
        EditorTool::Move,
        EditorTool::Pen,
        EditorTool::Eraser,
        EditorTool::Scale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditorTool::Select => "Select",
            EditorTool::Move => "Move",
            EditorTool::Pen => "Pen",
            EditorTool::Eraser => "Erase",
            EditorTool::Scale => "Scale",
        }
    }
}

/// Play/record flags; drives the playhead
#[derive(Debug, Clone, Copy, Default)]
pub struct Transport {
    pub playing: bool,
    pub recording: bool,
}

/// Everything the editor session owns
pub struct AppState {
    pub config: EditorConfig,
    pub scaler: UiScaler,
    pub focus: FocusState,
    pub panels: PanelSet,
    pub timeline: TimelineState,
    pub arrangement: Arrangement,
    pub transport: Transport,
    pub tool: EditorTool,

    pub objects: Vec<GameObject>,
    pub selected_object: Option<usize>,
    pub patterns: Vec<Pattern>,
    pub selected_pattern: Option<usize>,
    pub assets: Vec<AssetEntry>,

    pub project_name: TextField,
    pub project_path: TextField,
    pub browser: FileBrowser,

    draw: DrawList,
}

impl AppState {
    pub fn new(config: EditorConfig) -> Self {
        let scaler = UiScaler::new(config.base_width, config.base_height);

        let mut timeline = TimelineState::new();
        timeline.bpm = config.bpm;
        timeline.sig_numerator = config.time_signature.0;
        timeline.sig_denominator = config.time_signature.1;
        timeline.set_snap_division(config.snap_division);

        let mut arrangement = Arrangement::new();
        for name in ["Track 1", "Track 2"] {
            // Two fresh tracks always fit the capacity
            let _ = arrangement.add_track(name);
        }
        for (name, kind, track, start, duration) in [
            ("kick", ElementKind::Audio, 0usize, 0.0f32, 0.5f32),
            ("snare", ElementKind::Audio, 0, 1.0, 0.5),
            ("bassline", ElementKind::Audio, 1, 0.0, 2.0),
            ("scene_start", ElementKind::Event, 1, 0.0, 0.25),
        ] {
            // Seeded against the tracks created just above
            let _ = arrangement.add_element(name, kind, track, start, duration);
        }

        let project_path = TextField::new(
            TextFieldId::ProjectPath,
            Rect::new(600.0, 4.0, 300.0, 26.0),
        )
        .with_text(config.project_dir());

        Self {
            config,
            scaler,
            focus: FocusState::new(),
            panels: PanelSet::new(),
            timeline,
            arrangement,
            transport: Transport::default(),
            tool: EditorTool::Select,
            objects: default_objects(),
            selected_object: None,
            patterns: default_patterns(),
            selected_pattern: None,
            assets: default_assets(),
            project_name: TextField::new(
                TextFieldId::ProjectName,
                Rect::new(335.0, 4.0, 210.0, 26.0),
            ),
            project_path,
            browser: FileBrowser::new(),
            draw: DrawList::new(),
        }
    }

    /// Run one frame: poll-once input in, draw list out
    pub fn frame(
        &mut self,
        input: &FrameInput,
        lister: &dyn DirLister,
        metrics: &dyn FontMetrics,
    ) -> &DrawList {
        // Scale first; every layout read this frame depends on it
        self.scaler.update(input.window_w, input.window_h);
        self.browser.poll();
        self.draw.clear();

        self.draw.rect(
            Rect::new(0.0, 0.0, input.window_w, input.window_h),
            theme::BG_COLOR,
        );

        // While the browser modal is open it owns the pointer and keys;
        // everything behind it still draws
        let modal = self.browser.is_open();
        let ui_input = if modal { input.swallowed() } else { input.clone() };

        if self.transport.playing {
            self.timeline.playhead += input.dt;
        }

        self.toolbar_frame(&ui_input, lister, metrics);

        // Panels float above the timeline, so they claim the pointer first
        // even though they draw later
        self.panels.update(&ui_input, &mut self.focus, &self.scaler);
        let timeline_input = if self.pointer_over_panel(&ui_input) {
            ui_input.swallowed()
        } else {
            ui_input.clone()
        };

        let timeline_bounds = self.timeline_bounds();
        let chrome = TimelineChrome {
            playing: self.transport.playing,
            recording: self.transport.recording,
            patterns_open: self.panels.get(PanelKind::PatternEditor).visible,
            mixer_open: self.panels.get(PanelKind::Mixer).visible,
        };
        if let Some(action) = timeline_frame(
            &mut self.draw,
            &timeline_input,
            &mut self.focus,
            &self.scaler,
            metrics,
            &mut self.timeline,
            &mut self.arrangement,
            timeline_bounds,
            chrome,
        ) {
            self.apply_timeline_action(action);
        }

        self.panels.draw(&mut self.draw, &self.scaler);
        self.panel_contents(&ui_input, metrics);

        if let Some(outcome) =
            self.browser
                .frame(input, lister, &mut self.draw, metrics, &self.scaler, &self.focus)
        {
            if let BrowserOutcome::Confirmed(path) = outcome {
                self.project_path.set_text(path);
            }
        }

        &self.draw
    }

    /// Whether the pointer is over any visible panel (header only while
    /// collapsed). Input under a panel never reaches the timeline.
    fn pointer_over_panel(&self, input: &FrameInput) -> bool {
        PanelKind::ALL.iter().any(|kind| {
            let panel = self.panels.get(*kind);
            if !panel.visible {
                return false;
            }
            let hit = if panel.collapsed {
                panel.header_rect()
            } else {
                panel.bounds
            };
            input.mouse.inside(&self.scaler.rect(hit))
        })
    }

    /// Timeline sits directly above the Assets panel; without that panel
    /// it hugs the bottom of the window.
    fn timeline_bounds(&self) -> Rect {
        let (dw, dh) = self.scaler.design_size();
        let assets = self.panels.get(PanelKind::Assets);
        let anchor = if assets.visible { assets.bounds.y } else { dh };
        Rect::new(0.0, (anchor - TIMELINE_H).max(TOOLBAR_H), dw, TIMELINE_H)
    }

    fn apply_timeline_action(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::TogglePlay => self.transport.playing = !self.transport.playing,
            TimelineAction::ToggleRecord => self.transport.recording = !self.transport.recording,
            TimelineAction::AddTrack => {
                let name = format!("Track {}", self.arrangement.track_count() + 1);
                if let Err(e) = self.arrangement.add_track(name) {
                    eprintln!("Cannot add track: {}", e);
                }
            }
            TimelineAction::RemoveSelectedTrack => {
                if let Some(index) = self.timeline.selected_track {
                    match self.arrangement.remove_track(index) {
                        Ok(_) => self.timeline.selected_track = None,
                        Err(e) => eprintln!("Cannot remove track: {}", e),
                    }
                }
            }
            TimelineAction::TogglePatternEditor => {
                self.panels.toggle_visible(PanelKind::PatternEditor)
            }
            TimelineAction::ToggleMixer => self.panels.toggle_visible(PanelKind::Mixer),
        }
    }

    /// Tool buttons, project name/destination fields, and the Browse button
    fn toolbar_frame(
        &mut self,
        input: &FrameInput,
        lister: &dyn DirLister,
        metrics: &dyn FontMetrics,
    ) {
        let (dw, _) = self.scaler.design_size();
        let bar = Rect::new(0.0, 0.0, dw, TOOLBAR_H);
        self.draw.rect(self.scaler.rect(bar), theme::PANEL_HEADER);

        for (i, tool) in EditorTool::ALL.iter().enumerate() {
            let rect = Rect::new(4.0 + i as f32 * 54.0, 4.0, 50.0, 26.0);
            if widgets::toggle_button(
                &mut self.draw,
                input,
                &self.focus,
                &self.scaler,
                metrics,
                rect,
                tool.label(),
                self.tool == *tool,
            ) {
                self.tool = *tool;
            }
        }

        let caption_size = self.scaler.apply(theme::FONT_SIZE_SMALL);
        let caption_y = self.scaler.apply(4.0 + 13.0) + caption_size * 0.35;
        self.draw.text(
            "Name",
            self.scaler.apply(290.0),
            caption_y,
            caption_size,
            theme::TEXT_DIM,
        );
        self.draw.text(
            "Dest",
            self.scaler.apply(560.0),
            caption_y,
            caption_size,
            theme::TEXT_DIM,
        );

        self.project_name.update(input, &mut self.focus, &self.scaler);
        self.project_name
            .draw(&mut self.draw, metrics, &self.scaler, &self.focus);
        self.project_path.update(input, &mut self.focus, &self.scaler);
        self.project_path
            .draw(&mut self.draw, metrics, &self.scaler, &self.focus);

        if widgets::button(
            &mut self.draw,
            input,
            &self.focus,
            &self.scaler,
            metrics,
            Rect::new(910.0, 4.0, 80.0, 26.0),
            "Browse",
        ) {
            let start = if self.project_path.text().is_empty() {
                self.config.project_dir()
            } else {
                self.project_path.text().to_string()
            };
            self.browser.open_at(start, lister);
        }
    }

    /// Render each visible panel's content view
    fn panel_contents(&mut self, input: &FrameInput, metrics: &dyn FontMetrics) {
        for kind in PanelKind::ALL {
            if !self.panels.get(kind).visible {
                continue;
            }
            match kind {
                PanelKind::Assets => views::draw_assets(
                    &mut self.draw,
                    input,
                    &self.scaler,
                    self.panels.get_mut(kind),
                    &self.assets,
                ),
                PanelKind::Hierarchy => views::draw_hierarchy(
                    &mut self.draw,
                    input,
                    &self.focus,
                    &self.scaler,
                    self.panels.get_mut(kind),
                    &mut self.objects,
                    &mut self.selected_object,
                ),
                PanelKind::Inspector => views::draw_inspector(
                    &mut self.draw,
                    input,
                    &self.focus,
                    &self.scaler,
                    self.panels.get_mut(kind),
                    self.selected_object
                        .and_then(|i| self.objects.get_mut(i)),
                ),
                PanelKind::PatternEditor => views::draw_pattern_editor(
                    &mut self.draw,
                    input,
                    &self.focus,
                    &self.scaler,
                    self.panels.get_mut(kind),
                    &mut self.patterns,
                    &mut self.selected_pattern,
                ),
                PanelKind::Mixer => views::draw_mixer(
                    &mut self.draw,
                    input,
                    &self.focus,
                    &self.scaler,
                    metrics,
                    self.panels.get_mut(kind),
                    &mut self.arrangement,
                ),
            }
        }
    }
}

/// Starting scene shown before any project is loaded
fn default_objects() -> Vec<GameObject> {
    let mut camera = GameObject::new("Main Camera");
    let mut transform = Component::new("Transform");
    for (name, value, min, max) in [
        ("x", 0.0, -100.0, 100.0),
        ("y", 1.5, -100.0, 100.0),
        ("z", -10.0, -100.0, 100.0),
    ] {
        let _ = transform.add_property(ComponentProperty::new(
            name,
            PropertyKind::Float,
            value,
            min,
            max,
        ));
    }
    let _ = camera.add_component(transform);

    let mut source = GameObject::new("Audio Source");
    let mut gain = Component::new("Output");
    let _ = gain.add_property(ComponentProperty::new(
        "gain",
        PropertyKind::Float,
        0.8,
        0.0,
        1.0,
    ));
    let _ = gain.add_property(ComponentProperty::new(
        "pan",
        PropertyKind::Float,
        0.0,
        -1.0,
        1.0,
    ));
    let _ = source.add_component(gain);

    vec![camera, source]
}

fn default_patterns() -> Vec<Pattern> {
    vec![
        Pattern::new("Intro Beat", 0, theme::TRACK_COLORS[0], 16),
        Pattern::new("Verse", 1, theme::TRACK_COLORS[1], 32),
    ]
}

fn default_assets() -> Vec<AssetEntry> {
    vec![
        AssetEntry::new("kick.wav", ElementKind::Audio),
        AssetEntry::new("snare.wav", ElementKind::Audio),
        AssetEntry::new("crate.obj", ElementKind::Object),
        AssetEntry::new("reverb.fx", ElementKind::Effect),
        AssetEntry::new("scene_start", ElementKind::Event),
    ]
}
