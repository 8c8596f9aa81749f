//! Presenter printing the view's side effects to stdout.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chessmate_client::dom::{Board, BoardId, Coord, Region};
use chessmate_client::feedback::{Presenter, SoundCue, Toast, ToastId};
use chessmate_client::state::gate::Indicators;
use chessmate_client::state::prefs::Preferences;
use chessmate_client::Navigation;

/// Prints everything; shares the live region generation with the input task.
pub struct Terminal {
    generation: Arc<AtomicU64>,
}

impl Terminal {
    pub fn new(generation: Arc<AtomicU64>) -> Self {
        Self { generation }
    }
}

impl Presenter for Terminal {
    fn play_sound(&mut self, cue: &SoundCue) {
        println!("  (sound: {cue})");
    }

    fn toast_shown(&mut self, toast: &Toast) {
        println!("  [{}] {}", toast.style.css_class(), toast.text);
    }

    fn toast_removed(&mut self, id: ToastId) {
        tracing::debug!(%id, "toast gone");
    }

    fn shake_board(&mut self, _seq: u64) {
        println!("  ~~ board shakes ~~");
    }

    fn celebrate(&mut self) {
        println!("  *** puzzle solved ***");
    }

    fn overlay_removed(&mut self) {
        println!("  (alert dismissed)");
    }

    fn cell_marked(&mut self, board: &BoardId, at: Coord, selected: bool) {
        if selected {
            println!("  {board} {at} selected");
        } else {
            println!("  {board} {at} released");
        }
    }

    fn region_replaced(&mut self, region: &Region, generation: u64) {
        self.generation.store(generation, Ordering::Relaxed);
        for board in &region.boards {
            print_board(board);
        }
        if let Some(overlay) = &region.overlay {
            println!("  !! {}", overlay.text);
        }
    }

    fn indicators_changed(&mut self, indicators: Indicators) {
        if indicators.thinking {
            println!("  computer is thinking...");
        } else if indicators.loader {
            println!("  loading...");
        }
    }

    fn preferences_applied(&mut self, prefs: &Preferences) {
        println!(
            "  piece={} mode={} colour={} theme={}",
            prefs.piece,
            prefs.mode.as_str(),
            if prefs.white { "white" } else { "black" },
            prefs.theme.as_str()
        );
    }

    fn navigate(&mut self, navigation: &Navigation) {
        match navigation {
            Navigation::Login(path) => println!("  session expired; log in at {path}"),
            Navigation::Reload => println!("  reloading page"),
            Navigation::SubmitForm { path, .. } => println!("  submitting {path}"),
        }
    }
}

/// Rows are `y`, columns are `x`; `.` marks an empty cell, `+` a hint.
fn print_board(board: &Board) {
    let max_x = board.cells.keys().map(|c| c.x).max().unwrap_or_default();
    let max_y = board.cells.keys().map(|c| c.y).max().unwrap_or_default();
    println!("  {}:", board.id);
    for y in 0..=max_y {
        let row: String = (0..=max_x)
            .map(|x| match board.cells.get(&Coord::new(x, y)) {
                Some(cell) if cell.selected => '*',
                Some(cell) => cell
                    .piece
                    .as_deref()
                    .and_then(|p| p.chars().next())
                    .unwrap_or(if cell.hinted { '+' } else { '.' }),
                None => ' ',
            })
            .collect();
        println!("  {y:>2} {row}");
    }
}
