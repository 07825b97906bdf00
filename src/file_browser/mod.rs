//! File browser for picking equation files.
//!
//! Lists directories and `.txt` files; everything else is hidden.

pub mod ui;

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of equation files.
pub const EQUATION_EXTENSION: &str = "txt";

/// Kind of a browser row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The `..` row.
    Parent,
    /// A directory.
    Dir,
    /// An equation file.
    File,
}

/// One row of the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    /// Full path.
    pub path: PathBuf,
    /// Display name.
    pub name: String,
    /// Row kind.
    pub kind: EntryKind,
}

impl BrowserEntry {
    fn rank(&self) -> u8 {
        match self.kind {
            EntryKind::Parent => 0,
            EntryKind::Dir => 1,
            EntryKind::File => 2,
        }
    }
}

/// Whether a path looks like an equation file.
pub fn is_equation_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(EQUATION_EXTENSION))
}

/// File browser state.
#[derive(Debug)]
pub struct FileBrowserState {
    /// Directory being listed.
    pub current_dir: PathBuf,
    /// Rows, parent first, then directories, then files.
    pub entries: Vec<BrowserEntry>,
    /// Highlighted row.
    pub cursor: usize,
    /// First visible row.
    pub scroll: usize,
    /// Why the last listing failed, if it did.
    pub error: Option<String>,
}

impl FileBrowserState {
    /// Browser starting in the working directory.
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::at(current_dir)
    }

    /// Browser starting in `dir`. Nothing is listed until
    /// [`load_directory`](Self::load_directory).
    pub fn at(dir: PathBuf) -> Self {
        Self {
            current_dir: dir,
            entries: Vec::new(),
            cursor: 0,
            scroll: 0,
            error: None,
        }
    }

    /// List the current directory.
    pub fn load_directory(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.scroll = 0;
        self.error = None;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(BrowserEntry {
                path: parent.to_path_buf(),
                name: "..".to_string(),
                kind: EntryKind::Parent,
            });
        }

        let dir_entries = match fs::read_dir(&self.current_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", self.current_dir.display(), e);
                self.error = Some(e.to_string());
                return;
            },
        };

        for entry in dir_entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            // metadata() follows symlinks
            let kind = match path.metadata() {
                Ok(m) if m.is_dir() => EntryKind::Dir,
                Ok(_) if is_equation_file(&path) => EntryKind::File,
                _ => continue,
            };
            self.entries.push(BrowserEntry { path, name, kind });
        }

        self.entries.sort_by(|a, b| match a.rank().cmp(&b.rank()) {
            Ordering::Equal => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            other => other,
        });
    }

    /// Move cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Enter the highlighted directory, or return the highlighted file.
    pub fn select_current(&mut self) -> Option<PathBuf> {
        let entry = self.entries.get(self.cursor)?.clone();
        match entry.kind {
            EntryKind::File => Some(entry.path),
            EntryKind::Parent | EntryKind::Dir => {
                self.current_dir = entry.path;
                self.load_directory();
                None
            },
        }
    }

    /// Go to the parent directory.
    pub fn go_to_parent(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.load_directory();
        }
    }

    /// Keep the cursor inside a viewport of `height` rows.
    pub fn adjust_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }
}

impl Default for FileBrowserState {
    fn default() -> Self {
        Self::new()
    }
}
