//! Persisted UI preferences (piece, placement mode, colour, theme).
//!
//! SYSTEM CONTEXT
//! ==============
//! Preferences outlive a single page load, so they are kept in a small
//! key-value store on disk. They are never sent to the server as such; the
//! server keeps its own session copy and the next reconciliation wins.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: a store that cannot be read starts empty and
//! a failed write is logged, never surfaced to the user.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

pub const PIECE_KEY: &str = "piece";
pub const MODE_KEY: &str = "mode";
pub const COLOR_KEY: &str = "color";
pub const THEME_KEY: &str = "theme";

/// Piece type selected when nothing is stored (server naming).
pub const DEFAULT_PIECE: &str = "Dame";

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("preference store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference store encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage with a lifetime beyond one page load.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    /// Persist one value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing or unreadable file starts empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "preference file unreadable; starting empty");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementMode {
    #[default]
    Place,
    Remove,
}

impl PlacementMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Remove => "remove",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "place" => Some(Self::Place),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    /// Piece type to place, in server naming (`Dame`, `Tour`, ...).
    pub piece: String,
    pub mode: PlacementMode,
    /// Side colour for placed pieces.
    pub white: bool,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { piece: DEFAULT_PIECE.to_owned(), mode: PlacementMode::Place, white: true, theme: Theme::Light }
    }
}

impl Preferences {
    /// Read every preference, falling back to defaults per key.
    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        Self {
            piece: store
                .get(PIECE_KEY)
                .filter(|p| !p.trim().is_empty())
                .map_or(defaults.piece, |p| normalize_piece(&p)),
            mode: store
                .get(MODE_KEY)
                .and_then(|m| PlacementMode::parse(&m))
                .unwrap_or(defaults.mode),
            white: store.get(COLOR_KEY).map_or(defaults.white, |c| c != "false"),
            theme: match store.get(THEME_KEY).as_deref() {
                Some("dark") => Theme::Dark,
                _ => defaults.theme,
            },
        }
    }

    pub fn set_piece(&mut self, store: &mut dyn PreferenceStore, raw: &str) {
        self.piece = normalize_piece(raw);
        persist(store, PIECE_KEY, &self.piece);
    }

    pub fn set_mode(&mut self, store: &mut dyn PreferenceStore, mode: PlacementMode) {
        self.mode = mode;
        persist(store, MODE_KEY, mode.as_str());
    }

    pub fn set_white(&mut self, store: &mut dyn PreferenceStore, white: bool) {
        self.white = white;
        persist(store, COLOR_KEY, if white { "true" } else { "false" });
    }

    /// Flip the theme and persist the new value.
    pub fn toggle_theme(&mut self, store: &mut dyn PreferenceStore) -> Theme {
        self.theme = self.theme.toggled();
        persist(store, THEME_KEY, self.theme.as_str());
        self.theme
    }
}

/// Server piece names start with a capital letter: `dame` → `Dame`.
#[must_use]
pub fn normalize_piece(raw: &str) -> String {
    let raw = raw.trim();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn persist(store: &mut dyn PreferenceStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(key, error = %e, "failed to persist preference");
    }
}
