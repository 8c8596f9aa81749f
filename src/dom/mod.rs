//! Typed model of the server-rendered page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server owns all game state and ships it as HTML. This module turns
//! that HTML into the handful of facts the client acts on (cells, pieces,
//! the message slot, the overlay alert, the turn flag, the anti-forgery
//! token, interactive controls). `page` holds the live model and performs
//! region swaps; `parse` is the only place that knows CSS selectors.

pub mod page;
pub mod parse;

use std::collections::BTreeMap;
use std::fmt;

use crate::feedback::SoundCue;

/// Error raised while compiling the page contract.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: &'static str, reason: String },
}

/// Board cell coordinates exactly as rendered in `data-x` / `data-y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    #[must_use]
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Identifier of one board instance inside the content region.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardId(pub String);

impl BoardId {
    /// Id used when the region has a single board without an explicit id.
    pub const DEFAULT: &'static str = "board";

    #[must_use]
    pub fn main() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Label of the piece standing on the cell, if any.
    pub piece: Option<String>,
    /// Visual "selected" marker set by the selection machine.
    pub selected: bool,
    /// Hint highlight rendered by the server.
    pub hinted: bool,
}

impl Cell {
    #[must_use]
    pub fn has_piece(&self) -> bool {
        self.piece.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub id: BoardId,
    pub cells: BTreeMap<Coord, Cell>,
}

/// Logical type of a server message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Info,
    Error,
    Success,
    Danger,
    Victory,
}

impl MessageKind {
    /// Parse the `data-type` attribute; unknown values read as `Info`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "success" => Self::Success,
            "danger" => Self::Danger,
            "victory" => Self::Victory,
            _ => Self::Info,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerMessage {
    pub kind: MessageKind,
    pub text: String,
    pub sound: Option<SoundCue>,
}

/// Single-delivery notification slot embedded in the region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSlot {
    message: Option<ServerMessage>,
}

impl MessageSlot {
    /// Build a slot; blank text leaves it empty.
    #[must_use]
    pub fn new(message: Option<ServerMessage>) -> Self {
        Self { message: message.filter(|m| !m.text.trim().is_empty()) }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }

    /// Consume the pending message. Later calls return `None`.
    pub fn take(&mut self) -> Option<ServerMessage> {
        self.message.take()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPhase {
    Shown,
    Fading,
}

/// Full-screen alert rendered by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub text: String,
    pub phase: OverlayPhase,
}

/// A toggle-style button carrying a value (`data-piece`, `data-color`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleButton {
    pub value: String,
    pub selected: bool,
}

/// Interactive controls present in the region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    /// Current value of the difficulty select, when rendered.
    pub difficulty: Option<String>,
    pub reset: bool,
    pub hint: bool,
    pub clear: bool,
    pub piece_buttons: Vec<ToggleButton>,
    pub color_buttons: Vec<ToggleButton>,
    /// `Some(selected)` when the place-mode button is rendered.
    pub mode_place: Option<bool>,
    /// `Some(selected)` when the remove-mode button is rendered.
    pub mode_remove: Option<bool>,
    /// `Some(visible)` when the custom configuration panel is rendered.
    pub custom_panel: Option<bool>,
}

/// The swappable content region and everything derived from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Inner markup of the region as received.
    pub html: String,
    pub boards: Vec<Board>,
    pub message: MessageSlot,
    pub overlay: Option<Overlay>,
    /// Server flag: the computer must move next.
    pub computer_turn: bool,
    pub csrf_token: Option<String>,
    pub controls: Controls,
}

impl Region {
    #[must_use]
    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    #[must_use]
    pub fn cell(&self, board: &BoardId, at: Coord) -> Option<&Cell> {
        self.board(board).and_then(|b| b.cells.get(&at))
    }

    pub fn cell_mut(&mut self, board: &BoardId, at: Coord) -> Option<&mut Cell> {
        self.boards
            .iter_mut()
            .find(|b| &b.id == board)
            .and_then(|b| b.cells.get_mut(&at))
    }

    /// Drop every hint highlight in the region.
    pub fn clear_hints(&mut self) {
        for cell in self.boards.iter_mut().flat_map(|b| b.cells.values_mut()) {
            cell.hinted = false;
        }
    }

    #[must_use]
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }
}
