//! Server endpoint catalog and the one JSON payload the client decodes.
//!
//! Everything else the server returns is an HTML page that goes through
//! the reconciler; only the external puzzle lookup answers with JSON.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde_json::Value;

pub const PUZZLE_VIEW: &str = "/puzzle";
pub const PUZZLE_MOVE: &str = "/puzzle/move";
pub const PUZZLE_COMPUTER_MOVE: &str = "/puzzle/computer-move";
pub const PUZZLE_RESET: &str = "/puzzle/reset";
pub const PUZZLE_CHANGE_MODE: &str = "/puzzle/changeMode";
pub const PUZZLE_CLEAR: &str = "/puzzle/clear";
pub const PUZZLE_HINT: &str = "/puzzle/hint";
pub const PUZZLE_LOAD_FROM_DATA: &str = "/puzzle/load-from-data";
pub const PUZZLE_RANDOM_EXTERNAL: &str = "/puzzle/random-lichess";

pub const PLACEMENT_VIEW: &str = "/placement";
pub const PLACEMENT_SELECT_PIECE: &str = "/placement/selectPiece";
pub const PLACEMENT_SET_COLOR: &str = "/placement/setColor";
pub const PLACEMENT_ACTION: &str = "/placement/action";
pub const PLACEMENT_RESET: &str = "/placement/reset";
pub const PLACEMENT_CHANGE_MODE: &str = "/placement/changeMode";

/// Text shown when the lookup says the puzzle was solved but carries no message.
pub const ALREADY_SOLVED_FALLBACK: &str = "Daily puzzle already solved.";

/// Response of `GET /puzzle/random-lichess`.
///
/// The server forwards the upstream record, so both the upstream field names
/// (`PuzzleId`, `FEN`, `Moves`) and its own (`puzzleId`, `fen`, `moves`) occur.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPuzzle {
    #[serde(default)]
    pub already_solved: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "PuzzleId")]
    pub puzzle_id: Option<Value>,
    #[serde(default, alias = "FEN")]
    pub fen: Option<String>,
    #[serde(default, alias = "Moves")]
    pub moves: Option<Value>,
}

impl ExternalPuzzle {
    /// Message to show for an already-solved puzzle.
    #[must_use]
    pub fn solved_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(ALREADY_SOLVED_FALLBACK)
    }

    /// Puzzle id as a form value.
    #[must_use]
    pub fn puzzle_id_param(&self) -> String {
        self.puzzle_id.as_ref().map(value_param).unwrap_or_default()
    }

    /// Move list as a form value; arrays are comma-joined.
    #[must_use]
    pub fn moves_param(&self) -> String {
        self.moves.as_ref().map(value_param).unwrap_or_default()
    }

    #[must_use]
    pub fn fen_param(&self) -> String {
        self.fen.clone().unwrap_or_default()
    }
}

fn value_param(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_param).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
