//! HTML → typed page facts.
//!
//! The selector set mirrors the markup contract of the server templates.
//! Selectors are compiled once per view; a failure there is a programming
//! error surfaced as [`DomError`] instead of a panic.

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};

use super::{
    Board, BoardId, Cell, Controls, Coord, DomError, MessageKind, MessageSlot, Overlay, OverlayPhase, Region,
    ServerMessage, ToggleButton,
};
use crate::feedback::SoundCue;

const REGION: &str = ".main-container";
const OVERLAY_ALERT: &str = ".messages-overlay .alert";
const MESSAGE_SLOT: &str = "#server-data-message";
const GAME_STATE: &str = "#game-state-data";
const CSRF_INPUT: &str = "input[name=\"_csrf\"]";
const BOARD: &str = "#board, [data-board]";
const CELL: &str = "[data-x][data-y]";
const PIECE: &str = ".piece";
const HINT: &str = ".hint-anim";
const DIFFICULTY_SELECT: &str = "#diffSelect";
const SELECTED_OPTION: &str = "option[selected]";
const OPTION: &str = "option";
const RESET_BUTTON: &str = "#resetBtn";
const HINT_BUTTON: &str = "#hintBtn";
const CLEAR_BUTTON: &str = "#clearBtn";
const PIECE_BUTTON: &str = ".piece-btn[data-piece]";
const COLOR_BUTTON: &str = ".color-btn[data-color]";
const MODE_PLACE: &str = "#modePlace";
const MODE_REMOVE: &str = "#modeRemove";
const CUSTOM_PANEL: &str = "#customConfigPanel";
const SCRIPT: &str = "script";

/// Attribute on `#game-state-data` flagging a pending computer move.
const COMPUTER_TURN_ATTR: &str = "data-ordi-joue";
/// Inline script variable carrying the same flag on a full page load.
const LOAD_TIME_FLAG: &str = "ordiJoue";

/// Facts read from a full document.
#[derive(Debug)]
pub struct ParsedDocument {
    pub region: Option<Region>,
    /// First anti-forgery token anywhere in the document.
    pub csrf_token: Option<String>,
    /// Load-time signal that the computer must move first.
    pub computer_turn_at_load: bool,
}

pub struct Selectors {
    region: Selector,
    overlay_alert: Selector,
    message_slot: Selector,
    game_state: Selector,
    csrf_input: Selector,
    board: Selector,
    cell: Selector,
    piece: Selector,
    hint: Selector,
    difficulty_select: Selector,
    selected_option: Selector,
    option: Selector,
    reset_button: Selector,
    hint_button: Selector,
    clear_button: Selector,
    piece_button: Selector,
    color_button: Selector,
    mode_place: Selector,
    mode_remove: Selector,
    custom_panel: Selector,
    script: Selector,
}

fn compile(selector: &'static str) -> Result<Selector, DomError> {
    Selector::parse(selector).map_err(|e| DomError::Selector { selector, reason: e.to_string() })
}

impl Selectors {
    /// Compile the page contract.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Selector`] if a contract selector does not parse.
    pub fn compile() -> Result<Self, DomError> {
        Ok(Self {
            region: compile(REGION)?,
            overlay_alert: compile(OVERLAY_ALERT)?,
            message_slot: compile(MESSAGE_SLOT)?,
            game_state: compile(GAME_STATE)?,
            csrf_input: compile(CSRF_INPUT)?,
            board: compile(BOARD)?,
            cell: compile(CELL)?,
            piece: compile(PIECE)?,
            hint: compile(HINT)?,
            difficulty_select: compile(DIFFICULTY_SELECT)?,
            selected_option: compile(SELECTED_OPTION)?,
            option: compile(OPTION)?,
            reset_button: compile(RESET_BUTTON)?,
            hint_button: compile(HINT_BUTTON)?,
            clear_button: compile(CLEAR_BUTTON)?,
            piece_button: compile(PIECE_BUTTON)?,
            color_button: compile(COLOR_BUTTON)?,
            mode_place: compile(MODE_PLACE)?,
            mode_remove: compile(MODE_REMOVE)?,
            custom_panel: compile(CUSTOM_PANEL)?,
            script: compile(SCRIPT)?,
        })
    }

    /// Parse a full page as loaded by navigation.
    #[must_use]
    pub fn parse_document(&self, html: &str) -> ParsedDocument {
        let doc = Html::parse_document(html);
        let csrf_token = doc
            .select(&self.csrf_input)
            .find_map(|el| el.value().attr("value").map(str::to_owned));
        let computer_turn_at_load = doc
            .select(&self.script)
            .any(|el| script_flags_computer_turn(&el.text().collect::<String>()));
        ParsedDocument { region: self.region_of(&doc), csrf_token, computer_turn_at_load }
    }

    /// Parse a response and extract only its content region.
    #[must_use]
    pub fn parse_region(&self, html: &str) -> Option<Region> {
        self.region_of(&Html::parse_document(html))
    }

    fn region_of(&self, doc: &Html) -> Option<Region> {
        let root = doc.select(&self.region).next()?;
        Some(self.read_region(root))
    }

    fn read_region(&self, root: ElementRef<'_>) -> Region {
        let message = root.select(&self.message_slot).next().map(|el| {
            let attr = |name: &str| el.value().attr(name).unwrap_or_default();
            ServerMessage {
                kind: MessageKind::parse(attr("data-type")),
                text: attr("data-msg").to_owned(),
                sound: SoundCue::parse(attr("data-sound")),
            }
        });
        let overlay = root.select(&self.overlay_alert).next().map(|el| Overlay {
            text: collapse_whitespace(&el.text().collect::<String>()),
            phase: OverlayPhase::Shown,
        });
        let computer_turn = root
            .select(&self.game_state)
            .next()
            .and_then(|el| el.value().attr(COMPUTER_TURN_ATTR))
            .is_some_and(|v| v.trim() == "true");
        let csrf_token = root
            .select(&self.csrf_input)
            .find_map(|el| el.value().attr("value").map(str::to_owned));

        Region {
            html: root.inner_html(),
            boards: self.read_boards(root),
            message: MessageSlot::new(message),
            overlay,
            computer_turn,
            csrf_token,
            controls: self.read_controls(root),
        }
    }

    fn read_boards(&self, root: ElementRef<'_>) -> Vec<Board> {
        let boards: Vec<Board> = root
            .select(&self.board)
            .map(|el| {
                let id = el
                    .value()
                    .attr("data-board")
                    .or_else(|| el.value().id())
                    .filter(|id| !id.is_empty())
                    .unwrap_or(BoardId::DEFAULT);
                Board { id: BoardId(id.to_owned()), cells: self.read_cells(el) }
            })
            .collect();
        if boards.is_empty() {
            let cells = self.read_cells(root);
            if cells.is_empty() {
                return Vec::new();
            }
            return vec![Board { id: BoardId::main(), cells }];
        }
        boards
    }

    fn read_cells(&self, scope: ElementRef<'_>) -> BTreeMap<Coord, Cell> {
        let mut cells = BTreeMap::new();
        for el in scope.select(&self.cell) {
            let (Some(x), Some(y)) = (parse_coord(el.value().attr("data-x")), parse_coord(el.value().attr("data-y")))
            else {
                continue;
            };
            let piece = el.select(&self.piece).next().map(|p| {
                p.value()
                    .attr("data-piece")
                    .or_else(|| p.value().attr("title"))
                    .map_or_else(|| collapse_whitespace(&p.text().collect::<String>()), str::to_owned)
            });
            let hinted = has_class(el, "hint-anim") || el.select(&self.hint).next().is_some();
            let selected = has_class(el, "selected");
            cells.insert(Coord::new(x, y), Cell { piece, selected, hinted });
        }
        cells
    }

    fn read_controls(&self, root: ElementRef<'_>) -> Controls {
        let present = |sel: &Selector| root.select(sel).next().is_some();
        let toggle = |sel: &Selector, attr: &str| {
            root.select(sel)
                .filter_map(|el| {
                    el.value()
                        .attr(attr)
                        .map(|value| ToggleButton { value: value.to_owned(), selected: has_class(el, "selected") })
                })
                .collect::<Vec<_>>()
        };
        let difficulty = root.select(&self.difficulty_select).next().map(|select| {
            select
                .select(&self.selected_option)
                .next()
                .or_else(|| select.select(&self.option).next())
                .and_then(|opt| opt.value().attr("value"))
                .unwrap_or_default()
                .to_owned()
        });
        let custom_panel = root.select(&self.custom_panel).next().map(|panel| {
            !panel
                .value()
                .attr("style")
                .is_some_and(|style| style.replace(' ', "").contains("display:none"))
        });

        Controls {
            difficulty,
            reset: present(&self.reset_button),
            hint: present(&self.hint_button),
            clear: present(&self.clear_button),
            piece_buttons: toggle(&self.piece_button, "data-piece"),
            color_buttons: toggle(&self.color_button, "data-color"),
            mode_place: root.select(&self.mode_place).next().map(|el| has_class(el, "selected")),
            mode_remove: root.select(&self.mode_remove).next().map(|el| has_class(el, "selected")),
            custom_panel,
        }
    }
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn parse_coord(raw: Option<&str>) -> Option<u8> {
    raw.and_then(|v| v.trim().parse::<u8>().ok())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when an inline script sets the load-time flag, e.g. `window.ordiJoue = true;`.
fn script_flags_computer_turn(script: &str) -> bool {
    script.match_indices(LOAD_TIME_FLAG).any(|(idx, _)| {
        let rest = script[idx + LOAD_TIME_FLAG.len()..].trim_start();
        rest.strip_prefix('=')
            .is_some_and(|value| !value.starts_with('=') && value.trim_start().starts_with("true"))
    })
}
