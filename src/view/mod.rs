//! Per-view controller: the single owner of all client-side UI state.
//!
//! SYSTEM CONTEXT
//! ==============
//! A [`View`] wraps one server-rendered page (puzzle or placement) and turns
//! user events, HTTP outcomes and timer expiries into effects. It never does
//! I/O itself: a started round trip comes back as [`Effect::Send`], the
//! runtime performs it and hands the outcome to [`View::complete`].
//!
//! DESIGN
//! ======
//! - `dispatch` holds the action catalog and the request/response protocol.
//! - `reconcile` swaps the content region and re-derives local state.
//! - `chain` schedules the computer's reply after a reconciliation.
//! - `bindings` decides which control events are still live.
//!
//! TRADE-OFFS
//! ==========
//! The controller is synchronous and takes `now` explicitly, which keeps
//! every timing rule testable without a clock, at the cost of the runtime
//! having to thread the current instant through each call.

mod chain;
mod dispatch;
mod reconcile;

pub mod bindings;


pub use bindings::{Bindings, Control};
pub use dispatch::{Action, CONNECTION_ERROR, Dispatch, Outcome, SERVER_ERROR, Stage};

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, Timings};
use crate::dom::parse::Selectors;
use crate::dom::page::Page;
use crate::dom::{BoardId, Coord, DomError};
use crate::feedback::notify::{self, Delivery};
use crate::feedback::{FeedbackEmitter, Presenter, Toast};
use crate::net::api;
use crate::state::gate::{DispatchGate, Indicators};
use crate::state::prefs::{PlacementMode, PreferenceStore, Preferences};
use crate::state::selection::{ClickOutcome, Selection, Selections};
use crate::timers::{Scheduler, Timer, TimerKey};

/// Game-mode value that opens the local custom configuration panel.
pub const CUSTOM_GAME_MODE: &str = "custom";
/// Difficulty sent by the local-mode trigger when no select is rendered.
pub const ANY_DIFFICULTY: &str = "any";

/// Which server page the view drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Puzzle,
    Placement,
}

impl ViewKind {
    /// Path of the page itself, used for the initial load and refreshes.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Puzzle => api::PUZZLE_VIEW,
            Self::Placement => api::PLACEMENT_VIEW,
        }
    }
}

/// Leaving the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Session expired; go to the login page.
    Login(String),
    /// Reload the current page from scratch.
    Reload,
    /// Full form submission (the response replaces the whole page).
    SubmitForm { path: String, fields: Vec<(String, String)> },
}

/// Input raised by the user against the live page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    CellClicked { board: BoardId, at: Coord },
    /// A region control fired; `generation` is the region it was rendered in.
    Control { control: Control, generation: u64, value: Option<String> },
    /// Puzzle: restart with local puzzles at the selected difficulty.
    LocalMode,
    /// Puzzle: fetch a puzzle from the external catalog.
    LoadExternalPuzzle,
    /// Placement: game-mode select changed.
    GameModeSelected(String),
    ToggleTheme,
}

/// What the runtime must do next.
#[derive(Debug)]
pub enum Effect {
    Idle,
    /// Perform this round trip and report back through [`View::complete`].
    Send(Dispatch),
    Navigate(Navigation),
}

pub struct View {
    kind: ViewKind,
    login_path: String,
    timings: Timings,
    selectors: Selectors,
    page: Page,
    bindings: Bindings,
    selections: Selections,
    gate: DispatchGate,
    published: Indicators,
    scheduler: Scheduler,
    /// Timers owned by the current region; cancelled when it is replaced.
    region_timers: Vec<TimerKey>,
    feedback: FeedbackEmitter,
    prefs: Preferences,
    store: Box<dyn PreferenceStore>,
    computer_first: Option<bool>,
}

impl View {
    /// Build a view over the fully loaded page `html`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the page contract selectors fail to compile.
    pub fn new(
        kind: ViewKind,
        config: &ClientConfig,
        html: &str,
        presenter: Box<dyn Presenter>,
        store: Box<dyn PreferenceStore>,
    ) -> Result<Self, DomError> {
        let selectors = Selectors::compile()?;
        let page = Page::load(&selectors, html);
        if !page.has_region() {
            warn!(kind = ?kind, "loaded page has no content region");
        }
        let bindings = Bindings::for_region(page.generation(), &page.region().controls);
        let prefs = Preferences::load(store.as_ref());
        Ok(Self {
            kind,
            login_path: config.login_path.clone(),
            timings: config.timings,
            selectors,
            page,
            bindings,
            selections: Selections::default(),
            gate: DispatchGate::default(),
            published: Indicators::default(),
            scheduler: Scheduler::default(),
            region_timers: Vec::new(),
            feedback: FeedbackEmitter::new(presenter, config.timings),
            prefs,
            store,
            computer_first: None,
        })
    }

    /// Override the load-time "computer moves first" signal.
    #[must_use]
    pub fn with_computer_first(mut self, computer_first: bool) -> Self {
        self.computer_first = Some(computer_first);
        self
    }

    /// First paint: deliver the message rendered with the page and start the
    /// computer's turn if the page asked for it.
    pub fn start(&mut self, now: Instant) {
        let generation = self.page.generation();
        if self.kind == ViewKind::Placement {
            self.apply_preferences();
        }
        self.feedback.presenter().region_replaced(self.page.region(), generation);
        self.deliver_message(now);
        if self.computer_first.unwrap_or_else(|| self.page.computer_turn_at_load()) {
            self.schedule_computer_move(now);
        }
        self.publish_indicators();
    }

    pub fn handle(&mut self, event: UiEvent) -> Effect {
        let effect = match (self.kind, event) {
            (ViewKind::Puzzle, UiEvent::CellClicked { board, at }) => self.click_puzzle_cell(&board, at),
            (ViewKind::Placement, UiEvent::CellClicked { at, .. }) => self.click_placement_cell(at),
            (_, UiEvent::Control { control, generation, value }) => {
                if !self.bindings.accepts(control, generation) {
                    debug!(?control, generation, live = self.bindings.generation(), "stale control event ignored");
                    return Effect::Idle;
                }
                self.handle_control(control, value)
            }
            (ViewKind::Puzzle, UiEvent::LocalMode) => {
                let difficulty = self
                    .page
                    .region()
                    .controls
                    .difficulty
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| ANY_DIFFICULTY.to_owned());
                self.begin(Action::ChangeDifficulty(difficulty))
            }
            (ViewKind::Puzzle, UiEvent::LoadExternalPuzzle) => self.begin(Action::FetchExternalPuzzle),
            (ViewKind::Placement, UiEvent::GameModeSelected(mode)) => self.select_game_mode(&mode),
            (_, UiEvent::ToggleTheme) => {
                let theme = self.prefs.toggle_theme(self.store.as_mut());
                info!(theme = theme.as_str(), "theme toggled");
                self.feedback.presenter().preferences_applied(&self.prefs);
                Effect::Idle
            }
            (kind, event) => {
                debug!(?kind, ?event, "event not handled by this view");
                Effect::Idle
            }
        };
        self.publish_indicators();
        effect
    }

    /// Fire every timer due at `now`.
    pub fn fire_due(&mut self, now: Instant) -> Effect {
        let mut effect = Effect::Idle;
        while let Some(timer) = self.scheduler.pop_due(now) {
            let fired = self.on_timer(timer, now);
            if matches!(effect, Effect::Idle) {
                effect = fired;
            }
        }
        self.publish_indicators();
        effect
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.page.generation()
    }

    #[must_use]
    pub fn indicators(&self) -> Indicators {
        self.gate.indicators()
    }

    #[must_use]
    pub fn selection(&self, board: &BoardId) -> Selection {
        self.selections.state(board)
    }

    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        self.feedback.toasts()
    }

    /// Pending timers, oldest first.
    #[must_use]
    pub fn pending_timers(&self) -> Vec<Timer> {
        self.scheduler.pending()
    }

    fn on_timer(&mut self, timer: Timer, now: Instant) -> Effect {
        match timer {
            Timer::ToastFade(_) | Timer::ToastRemove(_) => {
                self.feedback.on_timer(timer, &mut self.scheduler, now);
                Effect::Idle
            }
            Timer::OverlayFade { generation } => {
                self.fade_overlay(generation, now);
                Effect::Idle
            }
            Timer::OverlayRemove { generation } => {
                self.remove_overlay(generation);
                Effect::Idle
            }
            Timer::ComputerMove { generation } => self.computer_move_due(generation),
        }
    }

    fn click_puzzle_cell(&mut self, board: &BoardId, at: Coord) -> Effect {
        if self.gate.is_thinking() {
            debug!(%board, %at, "computer is thinking; click ignored");
            return Effect::Idle;
        }
        self.page.region_mut().clear_hints();
        let Some(has_piece) = self.page.region().cell(board, at).map(|cell| cell.has_piece()) else {
            debug!(%board, %at, "click on unknown cell");
            return Effect::Idle;
        };
        match self.selections.click(board, at, has_piece) {
            ClickOutcome::Ignored => Effect::Idle,
            ClickOutcome::Selected(origin) => {
                self.mark(board, origin, true);
                Effect::Idle
            }
            ClickOutcome::Cancelled(origin) => {
                self.mark(board, origin, false);
                Effect::Idle
            }
            ClickOutcome::Move { from, to } => {
                self.mark(board, from, false);
                self.begin(Action::Move { from, to })
            }
        }
    }

    fn click_placement_cell(&mut self, at: Coord) -> Effect {
        if !self.page.region().boards.iter().any(|b| b.cells.contains_key(&at)) {
            debug!(%at, "click on unknown cell");
            return Effect::Idle;
        }
        let piece = match self.prefs.mode {
            PlacementMode::Place => Some(self.prefs.piece.clone()),
            PlacementMode::Remove => None,
        };
        self.begin(Action::PlaceOrRemove { at, piece, white: self.prefs.white })
    }

    fn handle_control(&mut self, control: Control, value: Option<String>) -> Effect {
        match control {
            Control::Difficulty => match value {
                Some(difficulty) => self.begin(Action::ChangeDifficulty(difficulty)),
                None => Effect::Idle,
            },
            Control::ResetButton => self.begin(Action::Reset),
            Control::HintButton => self.begin(Action::Hint),
            Control::ClearButton => self.begin(Action::Clear),
            Control::PieceButton => {
                let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
                    warn!("piece button without a piece value");
                    return Effect::Idle;
                };
                if self.gate.is_busy() {
                    return Effect::Idle;
                }
                self.prefs.set_piece(self.store.as_mut(), &raw);
                self.apply_preferences();
                self.begin(Action::SelectPiece(self.prefs.piece.clone()))
            }
            Control::ColorButton => {
                let Some(raw) = value else {
                    warn!("colour button without a colour value");
                    return Effect::Idle;
                };
                if self.gate.is_busy() {
                    return Effect::Idle;
                }
                self.prefs.set_white(self.store.as_mut(), raw.trim() == "true");
                self.apply_preferences();
                self.begin(Action::SetColor(self.prefs.white))
            }
            Control::ModePlace => {
                self.set_mode(PlacementMode::Place);
                Effect::Idle
            }
            Control::ModeRemove => {
                self.set_mode(PlacementMode::Remove);
                Effect::Idle
            }
        }
    }

    fn set_mode(&mut self, mode: PlacementMode) {
        self.prefs.set_mode(self.store.as_mut(), mode);
        self.apply_preferences();
    }

    fn select_game_mode(&mut self, mode: &str) -> Effect {
        let custom = mode == CUSTOM_GAME_MODE;
        let panel = &mut self.page.region_mut().controls.custom_panel;
        if panel.is_some() {
            *panel = Some(custom);
        }
        if custom {
            return Effect::Idle;
        }
        let mut fields = vec![("modeDeJeu".to_owned(), mode.to_owned())];
        if let Some(token) = self.page.csrf_token() {
            fields.push((crate::net::types::CSRF_FIELD.to_owned(), token));
        }
        self.navigate(Navigation::SubmitForm { path: api::PLACEMENT_CHANGE_MODE.to_owned(), fields })
    }

    fn mark(&mut self, board: &BoardId, at: Coord, selected: bool) {
        if let Some(cell) = self.page.region_mut().cell_mut(board, at) {
            cell.selected = selected;
        }
        self.feedback.presenter().cell_marked(board, at, selected);
    }

    fn deliver_message(&mut self, now: Instant) -> Delivery {
        notify::deliver_server_message(self.page.region_mut(), &mut self.feedback, &mut self.scheduler, now)
    }

    fn navigate(&mut self, navigation: Navigation) -> Effect {
        info!(?navigation, "leaving page");
        self.cancel_region_timers();
        self.selections.clear_all();
        self.feedback.presenter().navigate(&navigation);
        Effect::Navigate(navigation)
    }

    fn cancel_region_timers(&mut self) {
        for key in self.region_timers.drain(..) {
            self.scheduler.cancel(key);
        }
    }

    /// Tell the presenter about indicator changes since the last call.
    fn publish_indicators(&mut self) {
        let current = self.gate.indicators();
        if current != self.published {
            self.published = current;
            self.feedback.presenter().indicators_changed(current);
        }
    }
}
