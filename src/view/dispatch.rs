//! Action dispatcher: one round trip at a time, cleaned up on every exit.
//!
//! A dispatch may take several HTTP hops (submit, then an optional external
//! puzzle load, then a view refresh for puzzle pages). The gate ticket rides
//! along with each hop and is released exactly once, when the chain ends.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error to the caller. Transport failures and
//! non-2xx answers become a toast; a bounce to the login page becomes a
//! navigation; domain errors arrive later through the message slot.

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::{Effect, Navigation, View, ViewKind};
use crate::dom::{Coord, MessageKind};
use crate::feedback::SoundCue;
use crate::net::api::{self, ExternalPuzzle};
use crate::net::types::{HttpRequest, HttpResponse, Method, TransportError};
use crate::state::gate::Ticket;
use crate::state::prefs::PlacementMode;

/// Toast text for a request that failed or was refused.
pub const CONNECTION_ERROR: &str = "Connection error";
/// Toast text for a refused external puzzle load.
pub const SERVER_ERROR: &str = "Server error";

pub type Outcome = Result<HttpResponse, TransportError>;

/// Every mutating operation a view can send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move { from: Coord, to: Coord },
    ComputerMove,
    Reset,
    ChangeDifficulty(String),
    Hint,
    Clear,
    FetchExternalPuzzle,
    SelectPiece(String),
    SetColor(bool),
    /// Placement cell click. `piece` is set in place mode, `None` removes.
    PlaceOrRemove { at: Coord, piece: Option<String>, white: bool },
}

impl Action {
    /// Heavy actions show the full-board loader for their whole round trip.
    #[must_use]
    pub fn is_heavy(&self) -> bool {
        matches!(self, Self::Reset | Self::ChangeDifficulty(_) | Self::FetchExternalPuzzle)
    }

    #[must_use]
    pub fn is_computer(&self) -> bool {
        matches!(self, Self::ComputerMove)
    }

    /// First request of the action on a `kind` page.
    #[must_use]
    pub fn request(&self, kind: ViewKind) -> HttpRequest {
        match self {
            Self::Move { from, to } => HttpRequest::post(api::PUZZLE_MOVE)
                .with_field("departX", from.x.to_string())
                .with_field("departY", from.y.to_string())
                .with_field("arriveeX", to.x.to_string())
                .with_field("arriveeY", to.y.to_string()),
            Self::ComputerMove => HttpRequest::post(api::PUZZLE_COMPUTER_MOVE),
            Self::Reset => HttpRequest::post(match kind {
                ViewKind::Puzzle => api::PUZZLE_RESET,
                ViewKind::Placement => api::PLACEMENT_RESET,
            }),
            Self::ChangeDifficulty(difficulty) => {
                HttpRequest::post(api::PUZZLE_CHANGE_MODE).with_field("difficulte", difficulty.clone())
            }
            Self::Hint => HttpRequest::post(api::PUZZLE_HINT),
            Self::Clear => HttpRequest::post(api::PUZZLE_CLEAR),
            Self::FetchExternalPuzzle => HttpRequest::get(api::PUZZLE_RANDOM_EXTERNAL),
            Self::SelectPiece(piece) => HttpRequest::post(api::PLACEMENT_SELECT_PIECE).with_field("type", piece.clone()),
            Self::SetColor(white) => HttpRequest::post(api::PLACEMENT_SET_COLOR).with_field("isWhite", white.to_string()),
            Self::PlaceOrRemove { at, piece, white } => {
                let request = HttpRequest::post(api::PLACEMENT_ACTION)
                    .with_field("x", at.x.to_string())
                    .with_field("y", at.y.to_string())
                    .with_field("type", piece.clone().unwrap_or_default());
                if piece.is_some() { request.with_field("isWhite", white.to_string()) } else { request }
            }
        }
    }
}

/// Which hop of a dispatch a request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// The action's own request.
    Submit,
    /// Loading a puzzle returned by the external lookup.
    LoadExternal,
    /// Re-reading the current page after a puzzle mutation.
    Refresh,
}

/// A round trip in progress; owns the gate until the chain ends.
#[derive(Debug)]
pub struct Dispatch {
    action: Action,
    stage: Stage,
    request: HttpRequest,
    ticket: Ticket,
}

impl Dispatch {
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

impl View {
    /// Take the gate and build the first request of `action`. Dropped while
    /// another dispatch is in flight.
    pub(super) fn begin(&mut self, action: Action) -> Effect {
        let Some(ticket) = self.gate.begin(action.is_heavy(), action.is_computer()) else {
            debug!(?action, "request in flight; action dropped");
            return Effect::Idle;
        };
        let request = self.authorize(action.request(self.kind));
        info!(method = ?request.method, path = %request.path, "dispatch");
        self.publish_indicators();
        Effect::Send(Dispatch { action, stage: Stage::Submit, request, ticket })
    }

    /// Process the outcome of `dispatch`. Returns the next hop, a
    /// navigation, or `Idle` once the gate is released.
    pub fn complete(&mut self, dispatch: Dispatch, outcome: Outcome, now: Instant) -> Effect {
        let Dispatch { action, stage, request, ticket } = dispatch;

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!(path = %request.path, error = %e, "request failed");
                self.finish(ticket, &action);
                let text = if action == Action::FetchExternalPuzzle && stage == Stage::Submit {
                    format!("Error: {e}")
                } else {
                    CONNECTION_ERROR.to_owned()
                };
                self.report_failure(&action, &text, now);
                return Effect::Idle;
            }
        };

        if response.redirected_to_login(&self.login_path) {
            info!(path = %request.path, final_url = %response.final_url, "session expired");
            self.finish(ticket, &action);
            return self.navigate(Navigation::Login(self.login_path.clone()));
        }

        if !response.is_success() {
            warn!(path = %request.path, status = response.status, ?stage, "request refused");
            self.finish(ticket, &action);
            match stage {
                Stage::Refresh => return self.navigate(Navigation::Reload),
                Stage::LoadExternal => self.report_failure(&action, SERVER_ERROR, now),
                Stage::Submit if action == Action::FetchExternalPuzzle => {
                    self.report_failure(&action, &format!("Error: HTTP {}", response.status), now);
                }
                Stage::Submit => self.report_failure(&action, CONNECTION_ERROR, now),
            }
            return Effect::Idle;
        }

        match (stage, self.kind) {
            (Stage::Submit, _) if action == Action::FetchExternalPuzzle => {
                self.external_puzzle_received(action, ticket, &response.body, now)
            }
            (Stage::Submit | Stage::LoadExternal, ViewKind::Puzzle) => {
                let request = HttpRequest::get(self.kind.path());
                debug!(path = %request.path, "refreshing view");
                Effect::Send(Dispatch { action, stage: Stage::Refresh, request, ticket })
            }
            _ => {
                self.finish(ticket, &action);
                self.reconcile(&response.body, &action, now);
                if action == Action::Reset && self.kind == ViewKind::Placement {
                    self.feedback.play(&SoundCue::Remove);
                }
                self.publish_indicators();
                Effect::Idle
            }
        }
    }

    fn external_puzzle_received(&mut self, action: Action, ticket: Ticket, body: &str, now: Instant) -> Effect {
        let puzzle = match serde_json::from_str::<ExternalPuzzle>(body) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                warn!(error = %e, "external puzzle payload unreadable");
                self.finish(ticket, &action);
                self.report_failure(&action, &format!("Error: {e}"), now);
                return Effect::Idle;
            }
        };
        if puzzle.already_solved {
            info!("external puzzle already solved");
            self.finish(ticket, &action);
            self.feedback.toast(puzzle.solved_message(), MessageKind::Info, &mut self.scheduler, now);
            return Effect::Idle;
        }
        let request = self.authorize(
            HttpRequest::post(api::PUZZLE_LOAD_FROM_DATA)
                .with_field("puzzleId", puzzle.puzzle_id_param())
                .with_field("fen", puzzle.fen_param())
                .with_field("moves", puzzle.moves_param())
                .with_field("isLichessPuzzle", "true"),
        );
        info!(puzzle_id = %puzzle.puzzle_id_param(), "loading external puzzle");
        Effect::Send(Dispatch { action, stage: Stage::LoadExternal, request, ticket })
    }

    /// Release the gate and undo everything the dispatch showed.
    fn finish(&mut self, ticket: Ticket, action: &Action) {
        self.gate.release(ticket);
        if matches!(action, Action::SelectPiece(_)) {
            self.set_mode(PlacementMode::Place);
        }
        self.publish_indicators();
    }

    fn report_failure(&mut self, action: &Action, text: &str, now: Instant) {
        if matches!(action, Action::PlaceOrRemove { .. }) {
            self.feedback.play(&SoundCue::Error);
        }
        self.feedback.toast(text, MessageKind::Error, &mut self.scheduler, now);
    }

    /// Attach the page's anti-forgery token to a POST.
    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        if request.method == Method::Get {
            return request;
        }
        let token = self.page.csrf_token();
        if token.is_none() {
            warn!(path = %request.path, "no anti-forgery token on page; sending without it");
        }
        request.with_csrf(token)
    }
}
