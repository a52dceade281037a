//! File Browser
//!
//! Modal dialog for picking a directory. Holds the current directory, the
//! acquired entry list for it, selection, scroll, and the double-click
//! bookkeeping — all as explicit fields. Every navigation releases the
//! previous entry list before acquiring the next one, and results from
//! superseded navigations are dropped unapplied.

mod listing;

pub use listing::{
    list_directory, BrowseError, DirEntry, DirLister, EntryList, Lease, Listing, LocalDir,
};

#[cfg(not(target_arch = "wasm32"))]
pub use listing::ThreadedDir;

use crate::ui::{theme, widgets, DrawList, FocusState, FontMetrics, FrameInput, Rect, UiScaler};

/// Height of one entry row (design space)
pub const ROW_HEIGHT: f32 = 25.0;

/// Second click within this window on the same row enters a directory
pub const DOUBLE_CLICK_SECS: f64 = 0.5;

/// Scroll wheel pixels per notch (design space)
pub const SCROLL_STEP: f32 = 30.0;

/// Fallback when the current directory loses its last component
pub const ROOT_PATH: &str = "/";

const DIALOG_W: f32 = 600.0;
const DIALOG_H: f32 = 400.0;

/// How the dialog was dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserOutcome {
    /// The chosen directory path
    Confirmed(String),
    Cancelled,
}

#[derive(Debug, Default)]
pub struct FileBrowser {
    open: bool,
    dir: String,
    entries: Option<EntryList>,
    error: Option<BrowseError>,
    selected: Option<usize>,
    scroll: f32,
    /// Last row clicked and when, for double-click detection
    last_click: Option<(usize, f64)>,
    /// Listing in flight, tagged with the navigation that issued it
    pending: Option<(u64, Listing)>,
    nav_seq: u64,
}

impl FileBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_dir(&self) -> &str {
        &self.dir
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn entries(&self) -> Option<&EntryList> {
        self.entries.as_ref()
    }

    pub fn error(&self) -> Option<&BrowseError> {
        self.error.as_ref()
    }

    /// Open the dialog at a starting directory and list it
    pub fn open_at(&mut self, dir: impl Into<String>, lister: &dyn DirLister) {
        self.open = true;
        self.dir = dir.into();
        if self.dir.is_empty() {
            self.dir = ROOT_PATH.to_string();
        }
        self.selected = None;
        self.scroll = 0.0;
        self.last_click = None;
        self.request_listing(lister);
    }

    /// Go up one directory level: truncate at the last separator (empty
    /// result resets to the root), then re-list with selection and scroll
    /// cleared.
    pub fn navigate_parent(&mut self, lister: &dyn DirLister) {
        self.dir = parent_of(&self.dir);
        self.selected = None;
        self.scroll = 0.0;
        self.last_click = None;
        self.request_listing(lister);
    }

    /// Enter the directory entry at `index` (no-op for files)
    pub fn enter(&mut self, index: usize, lister: &dyn DirLister) {
        let name = match self.entries.as_ref().and_then(|list| list.get(index)) {
            Some(entry) if entry.is_dir => entry.name.clone(),
            _ => return,
        };
        self.dir = join_path(&self.dir, &name);
        self.selected = None;
        self.scroll = 0.0;
        self.last_click = None;
        self.request_listing(lister);
    }

    /// A click landed on row `index` at time `now`. Selects the row; a
    /// second click on the same row within the double-click window enters it
    /// if it is a directory.
    pub fn click_row(&mut self, index: usize, now: f64, lister: &dyn DirLister) {
        let is_double = matches!(
            self.last_click,
            Some((i, t)) if i == index && now - t < DOUBLE_CLICK_SECS
        );
        self.selected = Some(index);
        if is_double {
            let is_dir = self
                .entries
                .as_ref()
                .and_then(|list| list.get(index))
                .map(|e| e.is_dir)
                .unwrap_or(false);
            if is_dir {
                self.enter(index, lister);
                return;
            }
        }
        self.last_click = Some((index, now));
    }

    /// Close the dialog and return the chosen path: the selected directory
    /// entry if there is one, the current directory otherwise.
    pub fn confirm(&mut self) -> String {
        let path = match (self.selected, self.entries.as_ref()) {
            (Some(i), Some(list)) => match list.get(i) {
                Some(entry) if entry.is_dir => join_path(&self.dir, &entry.name),
                _ => self.dir.clone(),
            },
            _ => self.dir.clone(),
        };
        self.close();
        path
    }

    /// Close the dialog without using the selection
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.open = false;
        self.entries = None; // releases the acquired list
        self.pending = None; // an in-flight result will be dropped unapplied
        self.error = None;
        self.selected = None;
        self.scroll = 0.0;
        self.last_click = None;
    }

    /// Release the current list and ask the collaborator for the new one.
    /// Release-then-acquire keeps the two strictly paired even when the new
    /// listing completes frames later.
    fn request_listing(&mut self, lister: &dyn DirLister) {
        self.entries = None;
        self.error = None;
        self.nav_seq += 1;
        self.pending = Some((self.nav_seq, lister.begin_list(&self.dir)));
        self.poll();
    }

    /// Poll the listing in flight, applying it only if it belongs to the
    /// current navigation and the dialog is still open. Anything else is
    /// dropped, which releases it.
    pub fn poll(&mut self) {
        if let Some((seq, mut listing)) = self.pending.take() {
            if !listing.poll() {
                self.pending = Some((seq, listing));
                return;
            }
            if seq == self.nav_seq && self.open {
                match listing.take() {
                    Some(Ok(list)) => self.entries = Some(list),
                    Some(Err(e)) => self.error = Some(e),
                    None => {}
                }
            }
        }
    }

    fn row_count(&self) -> usize {
        self.entries.as_ref().map(|l| l.len()).unwrap_or(0)
    }

    fn visible_rows(view_h: f32) -> usize {
        (view_h / ROW_HEIGHT).floor().max(0.0) as usize
    }

    /// Upper scroll bound for a list view of the given height
    pub fn max_scroll(&self, view_h: f32) -> f32 {
        let total = self.row_count();
        let visible = Self::visible_rows(view_h);
        total.saturating_sub(visible) as f32 * ROW_HEIGHT
    }

    /// Apply a wheel delta, clamped into `[0, max_scroll]`
    pub fn apply_scroll(&mut self, wheel: f32, view_h: f32) {
        self.scroll = (self.scroll - wheel * SCROLL_STEP).clamp(0.0, self.max_scroll(view_h));
    }

    /// Run the dialog for one frame: handle input and draw. Returns how the
    /// dialog was dismissed, if it was.
    pub fn frame(
        &mut self,
        input: &FrameInput,
        lister: &dyn DirLister,
        dl: &mut DrawList,
        metrics: &dyn FontMetrics,
        scaler: &UiScaler,
        focus: &FocusState,
    ) -> Option<BrowserOutcome> {
        if !self.open {
            return None;
        }

        let (dw, dh) = scaler.design_size();
        let dialog = Rect::new(
            (dw - DIALOG_W) * 0.5,
            (dh - DIALOG_H) * 0.5,
            DIALOG_W,
            DIALOG_H,
        );
        let list_view = Rect::new(
            dialog.x + 10.0,
            dialog.y + 70.0,
            dialog.w - 20.0,
            dialog.h - 120.0,
        );

        // Dim everything behind the dialog
        dl.rect(
            Rect::new(0.0, 0.0, input.window_w, input.window_h),
            theme::OVERLAY,
        );
        let dialog_screen = scaler.rect(dialog);
        dl.rect(dialog_screen, theme::PANEL_BG);
        dl.rect_lines(dialog_screen, 2.0, theme::WHITE);

        let title_size = scaler.apply(theme::FONT_SIZE_TITLE);
        dl.text(
            "Select Directory",
            dialog_screen.x + scaler.apply(10.0),
            dialog_screen.y + scaler.apply(10.0) + title_size * 0.7,
            title_size,
            theme::TEXT_COLOR,
        );
        let dir_size = scaler.apply(theme::FONT_SIZE_CONTENT);
        dl.text(
            self.dir.clone(),
            dialog_screen.x + scaler.apply(10.0),
            dialog_screen.y + scaler.apply(40.0) + dir_size * 0.7,
            dir_size,
            theme::TEXT_DIM,
        );

        if widgets::button(
            dl,
            input,
            focus,
            scaler,
            metrics,
            Rect::new(dialog.right() - 100.0, dialog.y + 10.0, 90.0, 30.0),
            "Parent Dir",
        ) {
            self.navigate_parent(lister);
        }

        self.list_frame(input, lister, dl, scaler, list_view);

        if widgets::button(
            dl,
            input,
            focus,
            scaler,
            metrics,
            Rect::new(dialog.right() - 220.0, dialog.bottom() - 40.0, 100.0, 30.0),
            "Select",
        ) {
            return Some(BrowserOutcome::Confirmed(self.confirm()));
        }
        if widgets::button(
            dl,
            input,
            focus,
            scaler,
            metrics,
            Rect::new(dialog.right() - 110.0, dialog.bottom() - 40.0, 100.0, 30.0),
            "Cancel",
        ) {
            self.cancel();
            return Some(BrowserOutcome::Cancelled);
        }

        None
    }

    /// Entry list area: scroll, row clicks, virtualized rows, scrollbar
    fn list_frame(
        &mut self,
        input: &FrameInput,
        lister: &dyn DirLister,
        dl: &mut DrawList,
        scaler: &UiScaler,
        list_view: Rect,
    ) {
        let list_screen = scaler.rect(list_view);
        dl.rect(list_screen, theme::LIST_BG);

        if input.mouse.wheel != 0.0 && input.mouse.inside(&list_screen) {
            self.apply_scroll(input.mouse.wheel, list_view.h);
        }

        if input.mouse.left_pressed && input.mouse.inside(&list_screen) {
            let design_y = scaler.unapply(input.mouse.y) - list_view.y + self.scroll;
            let index = (design_y / ROW_HEIGHT).floor();
            if index >= 0.0 && (index as usize) < self.row_count() {
                self.click_row(index as usize, input.time, lister);
            }
        }

        let font_size = scaler.apply(theme::FONT_SIZE_CONTENT);
        let message_pos = (
            list_screen.x + scaler.apply(8.0),
            list_screen.y + scaler.apply(8.0) + font_size * 0.7,
        );

        if self.pending.is_some() {
            dl.text("Loading...", message_pos.0, message_pos.1, font_size, theme::TEXT_DIM);
            return;
        }
        if let Some(err) = &self.error {
            dl.text(
                format!("Cannot read directory: {}", err),
                message_pos.0,
                message_pos.1,
                font_size,
                theme::ACCENT_ALT,
            );
            return;
        }

        let Some(entries) = self.entries.as_ref() else {
            return;
        };

        for (i, entry) in entries.iter().enumerate() {
            let item_y = list_view.y + i as f32 * ROW_HEIGHT - self.scroll;
            // Only rows intersecting the view are drawn
            if item_y + ROW_HEIGHT < list_view.y || item_y > list_view.bottom() {
                continue;
            }
            let row = scaler.rect(Rect::new(list_view.x, item_y, list_view.w, ROW_HEIGHT));
            if self.selected == Some(i) {
                dl.rect(row, theme::ROW_SELECTED);
            }
            let (label, color) = if entry.is_dir {
                (format!("[DIR] {}", entry.name), theme::DIR_ENTRY)
            } else {
                (entry.name.clone(), theme::TEXT_COLOR)
            };
            dl.text(
                label,
                row.x + scaler.apply(5.0),
                row.y + (row.h + font_size * 0.7) * 0.5,
                font_size,
                color,
            );
        }

        // Scrollbar when the list overflows
        let total = self.row_count();
        let visible = Self::visible_rows(list_view.h);
        if total > visible && total > 0 {
            let max_scroll = self.max_scroll(list_view.h);
            let bar_h = list_view.h * visible as f32 / total as f32;
            let bar_y = list_view.y + (self.scroll / max_scroll) * (list_view.h - bar_h);
            dl.rect(
                scaler.rect(Rect::new(list_view.right() - 10.0, bar_y, 8.0, bar_h)),
                theme::SCROLLBAR,
            );
        }
    }
}

/// Truncate at the last path separator; an emptied path resets to the root.
/// Paths with no separator are returned unchanged.
fn parent_of(path: &str) -> String {
    match path.rfind(['/', '\\']) {
        Some(idx) if path[..idx].is_empty() => ROOT_PATH.to_string(),
        Some(idx) => path[..idx].to_string(),
        None => path.to_string(),
    }
}

/// Append an entry name to a directory path
fn join_path(dir: &str, name: &str) -> String {
    if dir.ends_with(['/', '\\']) {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{channel, Sender};
    use std::sync::Arc;

    /// Canned directory tree with acquire/release counters
    struct TreeLister {
        acquired: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    impl TreeLister {
        fn new() -> Self {
            Self {
                acquired: Arc::new(AtomicUsize::new(0)),
                released: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn acquired(&self) -> usize {
            self.acquired.load(Ordering::SeqCst)
        }

        fn released(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }

        fn leased(&self, entries: Vec<DirEntry>) -> EntryList {
            self.acquired.fetch_add(1, Ordering::SeqCst);
            let released = self.released.clone();
            EntryList::with_lease(
                entries,
                Lease::new(move || {
                    released.fetch_add(1, Ordering::SeqCst);
                }),
            )
        }
    }

    fn dir(name: &str) -> DirEntry {
        DirEntry {
            name: name.into(),
            is_dir: true,
        }
    }

    fn file(name: &str) -> DirEntry {
        DirEntry {
            name: name.into(),
            is_dir: false,
        }
    }

    impl DirLister for TreeLister {
        fn begin_list(&self, path: &str) -> Listing {
            let result = match path {
                "/" => Ok(self.leased(vec![dir("home")])),
                "/home" => Ok(self.leased(vec![dir("user")])),
                "/home/user" => Ok(self.leased(vec![dir("projects"), file("notes.txt")])),
                "/home/user/projects" => {
                    Ok(self.leased(vec![dir("alpha"), dir("beta"), file("readme.md")]))
                }
                "/empty" => Ok(self.leased(Vec::new())),
                "/denied" => Err(BrowseError::PermissionDenied(path.into())),
                other => Err(BrowseError::NotFound(other.into())),
            };
            Listing::ready(result)
        }
    }

    #[test]
    fn test_open_lists_starting_directory() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user", &lister);
        assert!(b.is_open());
        assert_eq!(b.current_dir(), "/home/user");
        assert_eq!(b.entries().unwrap().len(), 2);
        assert_eq!(b.selected(), None);
        assert_eq!(lister.acquired(), 1);
        assert_eq!(lister.released(), 0);
    }

    #[test]
    fn test_parent_navigation_twice_releases_twice() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user/projects", &lister);
        b.click_row(0, 1.0, &lister);

        b.navigate_parent(&lister);
        assert_eq!(b.current_dir(), "/home/user");
        assert_eq!(b.selected(), None);
        assert!((b.scroll() - 0.0).abs() < 0.001);

        b.navigate_parent(&lister);
        assert_eq!(b.current_dir(), "/home");

        // Three acquires (open + two navigations), two releases so far
        assert_eq!(lister.acquired(), 3);
        assert_eq!(lister.released(), 2);

        b.cancel();
        assert_eq!(lister.released(), 3); // balanced on exit
    }

    #[test]
    fn test_parent_of_reaches_root() {
        assert_eq!(parent_of("/home/user"), "/home");
        assert_eq!(parent_of("/home"), "/");
        assert_eq!(parent_of("/"), "/");
        assert_eq!(parent_of("relative"), "relative");
    }

    #[test]
    fn test_double_click_enters_directory() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user", &lister);

        b.click_row(0, 1.0, &lister); // "projects"
        assert_eq!(b.selected(), Some(0));
        assert_eq!(b.current_dir(), "/home/user");

        b.click_row(0, 1.3, &lister); // within 0.5s, same row
        assert_eq!(b.current_dir(), "/home/user/projects");
        assert_eq!(b.selected(), None);
        assert_eq!(b.entries().unwrap().len(), 3);
    }

    #[test]
    fn test_slow_clicks_only_select() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user", &lister);

        b.click_row(0, 1.0, &lister);
        b.click_row(0, 1.6, &lister); // 0.6s apart: selection only
        assert_eq!(b.current_dir(), "/home/user");
        assert_eq!(b.selected(), Some(0));
        assert_eq!(lister.acquired(), 1);
    }

    #[test]
    fn test_double_click_across_rows_does_not_enter() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user/projects", &lister);

        b.click_row(0, 1.0, &lister);
        b.click_row(1, 1.2, &lister); // fast, but a different row
        assert_eq!(b.current_dir(), "/home/user/projects");
        assert_eq!(b.selected(), Some(1));
    }

    #[test]
    fn test_double_click_on_file_does_not_enter() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user", &lister);

        b.click_row(1, 1.0, &lister); // "notes.txt"
        b.click_row(1, 1.2, &lister);
        assert_eq!(b.current_dir(), "/home/user");
        assert_eq!(b.selected(), Some(1));
    }

    #[test]
    fn test_confirm_prefers_selected_directory() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user", &lister);
        b.click_row(0, 1.0, &lister);

        assert_eq!(b.confirm(), "/home/user/projects");
        assert!(!b.is_open());
        assert_eq!(lister.released(), 1);
    }

    #[test]
    fn test_confirm_with_file_selection_returns_current_dir() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user", &lister);
        b.click_row(1, 1.0, &lister); // a file
        assert_eq!(b.confirm(), "/home/user");
    }

    #[test]
    fn test_confirm_with_no_selection_returns_current_dir() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user/projects", &lister);
        assert_eq!(b.confirm(), "/home/user/projects");
        assert_eq!(lister.acquired(), lister.released());
    }

    #[test]
    fn test_error_is_distinct_from_empty() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();

        b.open_at("/empty", &lister);
        assert!(b.error().is_none());
        assert_eq!(b.entries().unwrap().len(), 0);

        b.cancel();
        b.open_at("/denied", &lister);
        assert!(matches!(b.error(), Some(BrowseError::PermissionDenied(_))));
        assert!(b.entries().is_none());
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let lister = TreeLister::new();
        let mut b = FileBrowser::new();
        b.open_at("/home/user/projects", &lister); // 3 entries
        let view_h = 2.0 * ROW_HEIGHT; // room for 2 rows

        assert!((b.max_scroll(view_h) - ROW_HEIGHT).abs() < 0.001);

        b.apply_scroll(-10.0, view_h); // huge scroll down
        assert!((b.scroll() - ROW_HEIGHT).abs() < 0.001);
        b.apply_scroll(10.0, view_h); // huge scroll up
        assert!((b.scroll() - 0.0).abs() < 0.001);

        // Entering a smaller directory recomputes the bound
        b.click_row(0, 1.0, &lister);
        b.click_row(0, 1.2, &lister); // into "alpha" (not found -> error), still clamps
        assert!((b.max_scroll(view_h) - 0.0).abs() < 0.001);
    }

    /// Lister whose results arrive later, through a channel we control
    struct ManualLister {
        senders: RefCell<Vec<Sender<Result<EntryList, BrowseError>>>>,
    }

    impl ManualLister {
        fn new() -> Self {
            Self {
                senders: RefCell::new(Vec::new()),
            }
        }
    }

    impl DirLister for ManualLister {
        fn begin_list(&self, _path: &str) -> Listing {
            let (sender, receiver) = channel();
            self.senders.borrow_mut().push(sender);
            Listing::pending(receiver)
        }
    }

    #[test]
    fn test_stale_listing_dropped_and_released() {
        let tree = TreeLister::new();
        let manual = ManualLister::new();
        let mut b = FileBrowser::new();

        b.open_at("/home/user", &manual); // pending listing #0
        assert!(b.entries().is_none());

        // Navigate again before the first listing lands; its channel is gone
        b.navigate_parent(&manual); // pending listing #1
        let senders = manual.senders.borrow();

        // The first navigation's result can no longer be delivered; the list
        // comes back from the failed send and is released on drop
        let stale = tree.leased(vec![dir("late")]);
        assert!(senders[0].send(Ok(stale)).is_err());
        assert_eq!(tree.released(), 1);

        // The current navigation's result applies normally
        let fresh = tree.leased(vec![dir("user")]);
        senders[1].send(Ok(fresh)).unwrap();
        drop(senders);
        b.poll();
        assert_eq!(b.current_dir(), "/home");
        assert_eq!(b.entries().unwrap().len(), 1);

        b.cancel();
        assert_eq!(tree.acquired(), tree.released());
    }

    #[test]
    fn test_join_path_handles_root() {
        assert_eq!(join_path("/", "home"), "/home");
        assert_eq!(join_path("/home", "user"), "/home/user");
    }
}
