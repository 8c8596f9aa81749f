//! Rendering seam between the view and an actual output surface.
//!
//! The view calls a [`Presenter`] for every visible side effect. Methods
//! default to no-ops so a surface only implements what it can show.
//! [`Recorder`] captures calls in order; tests and scripted drivers read the
//! log back through a cloned handle.

use std::sync::{Arc, Mutex};

use super::SoundCue;
use super::toast::{Toast, ToastId};
use crate::dom::{BoardId, Coord, Region};
use crate::state::gate::Indicators;
use crate::state::prefs::Preferences;
use crate::view::Navigation;

pub trait Presenter: Send {
    fn play_sound(&mut self, _cue: &SoundCue) {}
    fn toast_shown(&mut self, _toast: &Toast) {}
    fn toast_fading(&mut self, _id: ToastId) {}
    fn toast_removed(&mut self, _id: ToastId) {}
    /// Restart the board shake animation; `seq` grows on every call.
    fn shake_board(&mut self, _seq: u64) {}
    fn celebrate(&mut self) {}
    fn overlay_fading(&mut self) {}
    fn overlay_removed(&mut self) {}
    fn cell_marked(&mut self, _board: &BoardId, _at: Coord, _selected: bool) {}
    fn region_replaced(&mut self, _region: &Region, _generation: u64) {}
    fn indicators_changed(&mut self, _indicators: Indicators) {}
    fn preferences_applied(&mut self, _prefs: &Preferences) {}
    fn navigate(&mut self, _navigation: &Navigation) {}
}

/// One recorded presenter call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presented {
    Sound(SoundCue),
    ToastShown(Toast),
    ToastFading(ToastId),
    ToastRemoved(ToastId),
    Shake(u64),
    Celebrate,
    OverlayFading,
    OverlayRemoved,
    CellMarked { board: BoardId, at: Coord, selected: bool },
    RegionReplaced { generation: u64 },
    Indicators(Indicators),
    Preferences(Preferences),
    Navigate(Navigation),
}

/// Presenter that appends every call to a shared log.
#[derive(Clone, Default)]
pub struct Recorder {
    log: Arc<Mutex<Vec<Presented>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<Presented> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<Presented> {
        self.log.lock().map(|mut log| std::mem::take(&mut *log)).unwrap_or_default()
    }

    /// Toasts shown so far, in order.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Presented::ToastShown(toast) => Some(toast),
                _ => None,
            })
            .collect()
    }

    /// Sounds played so far, in order.
    #[must_use]
    pub fn sounds(&self) -> Vec<SoundCue> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Presented::Sound(cue) => Some(cue),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn shake_count(&self) -> usize {
        self.events().iter().filter(|e| matches!(e, Presented::Shake(_))).count()
    }

    fn push(&self, event: Presented) {
        if let Ok(mut log) = self.log.lock() {
            log.push(event);
        }
    }
}

impl Presenter for Recorder {
    fn play_sound(&mut self, cue: &SoundCue) {
        self.push(Presented::Sound(cue.clone()));
    }

    fn toast_shown(&mut self, toast: &Toast) {
        self.push(Presented::ToastShown(toast.clone()));
    }

    fn toast_fading(&mut self, id: ToastId) {
        self.push(Presented::ToastFading(id));
    }

    fn toast_removed(&mut self, id: ToastId) {
        self.push(Presented::ToastRemoved(id));
    }

    fn shake_board(&mut self, seq: u64) {
        self.push(Presented::Shake(seq));
    }

    fn celebrate(&mut self) {
        self.push(Presented::Celebrate);
    }

    fn overlay_fading(&mut self) {
        self.push(Presented::OverlayFading);
    }

    fn overlay_removed(&mut self) {
        self.push(Presented::OverlayRemoved);
    }

    fn cell_marked(&mut self, board: &BoardId, at: Coord, selected: bool) {
        self.push(Presented::CellMarked { board: board.clone(), at, selected });
    }

    fn region_replaced(&mut self, _region: &Region, generation: u64) {
        self.push(Presented::RegionReplaced { generation });
    }

    fn indicators_changed(&mut self, indicators: Indicators) {
        self.push(Presented::Indicators(indicators));
    }

    fn preferences_applied(&mut self, prefs: &Preferences) {
        self.push(Presented::Preferences(prefs.clone()));
    }

    fn navigate(&mut self, navigation: &Navigation) {
        self.push(Presented::Navigate(navigation.clone()));
    }
}
