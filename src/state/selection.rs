//! Two-click move selection, one origin slot per board.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashMap;

use crate::dom::{BoardId, Coord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Idle,
    OriginSelected(Coord),
}

/// Result of feeding one click to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Empty cell clicked while idle.
    Ignored,
    /// First click on a piece; the cell now carries the selected marker.
    Selected(Coord),
    /// Second click on the origin itself; nothing is sent.
    Cancelled(Coord),
    /// Second click elsewhere; submit this move.
    Move { from: Coord, to: Coord },
}

#[derive(Debug, Default)]
pub struct Selections {
    origins: HashMap<BoardId, Coord>,
}

impl Selections {
    #[must_use]
    pub fn state(&self, board: &BoardId) -> Selection {
        self.origins
            .get(board)
            .map_or(Selection::Idle, |origin| Selection::OriginSelected(*origin))
    }

    /// Advance the machine of `board`. `has_piece` is read from the live
    /// region at click time.
    pub fn click(&mut self, board: &BoardId, at: Coord, has_piece: bool) -> ClickOutcome {
        match self.origins.remove(board) {
            None if has_piece => {
                self.origins.insert(board.clone(), at);
                ClickOutcome::Selected(at)
            }
            None => ClickOutcome::Ignored,
            Some(origin) if origin == at => ClickOutcome::Cancelled(origin),
            Some(origin) => ClickOutcome::Move { from: origin, to: at },
        }
    }

    /// Drop the origin of `board`, if any.
    pub fn cancel(&mut self, board: &BoardId) -> Option<Coord> {
        self.origins.remove(board)
    }

    /// Drop every origin; returns what was selected.
    pub fn clear_all(&mut self) -> Vec<(BoardId, Coord)> {
        let mut cleared: Vec<_> = self.origins.drain().collect();
        cleared.sort();
        cleared
    }
}
