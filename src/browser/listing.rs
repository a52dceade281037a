//! Directory listing backends
//!
//! The browser treats the filesystem as a collaborator behind `DirLister`.
//! A listing request returns a `Listing` handle that is either ready
//! immediately (local synchronous backend) or pending on a background thread,
//! polled once per frame. An acquired `EntryList` is released exactly once —
//! on drop — and carries an optional lease so tests can observe the release.

use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

/// One directory entry as the browser sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Listing failure, kept distinct from an empty directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseError {
    /// Directory does not exist
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// Any other I/O failure
    Io(String),
}

impl fmt::Display for BrowseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowseError::NotFound(path) => write!(f, "not found: {}", path),
            BrowseError::PermissionDenied(path) => write!(f, "permission denied: {}", path),
            BrowseError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BrowseError {}

impl From<std::io::Error> for BrowseError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => BrowseError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => BrowseError::PermissionDenied(e.to_string()),
            _ => BrowseError::Io(e.to_string()),
        }
    }
}

/// Observer for the release of an acquired entry list. Runs exactly once,
/// when the list is dropped.
pub struct Lease {
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl Lease {
    pub fn new(on_release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_release: Some(Box::new(on_release)),
        }
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        if let Some(f) = self.on_release.take() {
            f();
        }
    }
}

impl fmt::Debug for Lease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lease")
    }
}

/// The entries of one directory, acquired as a unit and released on drop
#[derive(Debug, Default)]
pub struct EntryList {
    entries: Vec<DirEntry>,
    _lease: Option<Lease>,
}

impl EntryList {
    pub fn new(entries: Vec<DirEntry>) -> Self {
        Self {
            entries,
            _lease: None,
        }
    }

    pub fn with_lease(entries: Vec<DirEntry>, lease: Lease) -> Self {
        Self {
            entries,
            _lease: Some(lease),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DirEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DirEntry> {
        self.entries.iter()
    }
}

/// A listing request in flight. Ready handles resolve on the first poll;
/// pending ones resolve when their background thread reports in.
pub struct Listing {
    #[cfg(not(target_arch = "wasm32"))]
    receiver: Option<Receiver<Result<EntryList, BrowseError>>>,
    result: Option<Result<EntryList, BrowseError>>,
}

impl Listing {
    /// A listing that completed synchronously
    pub fn ready(result: Result<EntryList, BrowseError>) -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            receiver: None,
            result: Some(result),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn pending(receiver: Receiver<Result<EntryList, BrowseError>>) -> Self {
        Self {
            receiver: Some(receiver),
            result: None,
        }
    }

    /// Check for completion. Returns true once a result is available.
    pub fn poll(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(receiver) = &self.receiver {
            match receiver.try_recv() {
                Ok(result) => self.result = Some(result),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    // Listing thread died without reporting
                    self.result = Some(Err(BrowseError::Io("listing failed".into())));
                }
            }
        }
        self.result.is_some()
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<Result<EntryList, BrowseError>> {
        if self.poll() {
            self.result.take()
        } else {
            None
        }
    }
}

impl fmt::Debug for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.result.is_some() {
            f.write_str("Listing(ready)")
        } else {
            f.write_str("Listing(pending)")
        }
    }
}

/// Filesystem collaborator seam
pub trait DirLister {
    fn begin_list(&self, path: &str) -> Listing;
}

/// Read a directory right now: directories first, then files, each group
/// sorted case-insensitively. Unreadable individual entries are skipped;
/// an unreadable directory is an error, not an empty list.
pub fn list_directory(path: &str) -> Result<EntryList, BrowseError> {
    let read = std::fs::read_dir(path)?;
    let mut entries: Vec<DirEntry> = read
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().into_string().ok()?;
            let is_dir = e.file_type().ok()?.is_dir();
            Some(DirEntry { name, is_dir })
        })
        .collect();
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(EntryList::new(entries))
}

/// Synchronous local filesystem backend. Every request resolves immediately.
#[derive(Debug, Clone, Default)]
pub struct LocalDir;

impl DirLister for LocalDir {
    fn begin_list(&self, path: &str) -> Listing {
        Listing::ready(list_directory(path))
    }
}

/// Local filesystem backend that lists on a background thread so large or
/// slow directories never stall the frame loop. Results are applied by the
/// frame that polls them, keeping the single-writer rule intact.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct ThreadedDir;

#[cfg(not(target_arch = "wasm32"))]
impl DirLister for ThreadedDir {
    fn begin_list(&self, path: &str) -> Listing {
        let (sender, receiver) = channel();
        let path = path.to_string();
        thread::spawn(move || {
            let _ = sender.send(list_directory(&path));
        });
        Listing::pending(receiver)
    }
}
