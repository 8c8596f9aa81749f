//! Line commands typed on stdin, mapped to view events.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use chessmate_client::dom::{BoardId, Coord};
use chessmate_client::view::Control;
use chessmate_client::{UiEvent, ViewKind};

pub const HELP: &str = "\
commands:
  click X Y [BOARD]   click a cell (puzzle: select then move; placement: place/remove)
  reset | hint | clear
  difficulty VALUE    puzzle difficulty select
  local               restart with local puzzles
  lichess             load a puzzle from the external catalog
  piece NAME          placement piece type
  color white|black   placement colour
  place | remove      placement interaction mode
  mode VALUE          placement game mode (custom opens the local panel)
  theme               toggle light/dark
  help | quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Usage { command: &'static str, expected: &'static str },
    #[error("`{0}` is not available on this page")]
    WrongView(&'static str),
}

/// Parse one input line. Blank lines parse to `None`.
///
/// `generation` is the region the user is looking at; control events are
/// tagged with it so the view can drop them once the region is replaced.
pub fn parse(line: &str, kind: ViewKind, generation: u64) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let control = |control: Control, value: Option<&str>| {
        Command::Event(UiEvent::Control { control, generation, value: value.map(str::to_owned) })
    };
    let puzzle_only = |name: &'static str| {
        if kind == ViewKind::Puzzle { Ok(()) } else { Err(CommandError::WrongView(name)) }
    };
    let placement_only = |name: &'static str| {
        if kind == ViewKind::Placement { Ok(()) } else { Err(CommandError::WrongView(name)) }
    };

    let command = match head {
        "click" => {
            let usage = CommandError::Usage { command: "click", expected: "X Y [BOARD]" };
            let (Some(x), Some(y)) = (args.first(), args.get(1)) else {
                return Err(usage);
            };
            let (Ok(x), Ok(y)) = (x.parse::<u8>(), y.parse::<u8>()) else {
                return Err(usage);
            };
            let board = args.get(2).map_or_else(BoardId::main, |id| BoardId((*id).to_owned()));
            Command::Event(UiEvent::CellClicked { board, at: Coord::new(x, y) })
        }
        "reset" => control(Control::ResetButton, None),
        "hint" => {
            puzzle_only("hint")?;
            control(Control::HintButton, None)
        }
        "clear" => {
            puzzle_only("clear")?;
            control(Control::ClearButton, None)
        }
        "difficulty" => {
            puzzle_only("difficulty")?;
            let Some(&value) = args.first() else {
                return Err(CommandError::Usage { command: "difficulty", expected: "VALUE" });
            };
            control(Control::Difficulty, Some(value))
        }
        "local" => {
            puzzle_only("local")?;
            Command::Event(UiEvent::LocalMode)
        }
        "lichess" => {
            puzzle_only("lichess")?;
            Command::Event(UiEvent::LoadExternalPuzzle)
        }
        "piece" => {
            placement_only("piece")?;
            let Some(&value) = args.first() else {
                return Err(CommandError::Usage { command: "piece", expected: "NAME" });
            };
            control(Control::PieceButton, Some(value))
        }
        "color" | "colour" => {
            placement_only("color")?;
            let value = match args.first().copied() {
                Some("white" | "true") => "true",
                Some("black" | "false") => "false",
                _ => return Err(CommandError::Usage { command: "color", expected: "white|black" }),
            };
            control(Control::ColorButton, Some(value))
        }
        "place" => {
            placement_only("place")?;
            control(Control::ModePlace, None)
        }
        "remove" => {
            placement_only("remove")?;
            control(Control::ModeRemove, None)
        }
        "mode" => {
            placement_only("mode")?;
            let Some(&value) = args.first() else {
                return Err(CommandError::Usage { command: "mode", expected: "VALUE" });
            };
            Command::Event(UiEvent::GameModeSelected(value.to_owned()))
        }
        "theme" => Command::Event(UiEvent::ToggleTheme),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}
