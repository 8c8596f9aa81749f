//! Control bindings of the current content region.
//!
//! DESIGN
//! ======
//! Every reconciliation replaces the table wholesale and stamps it with the
//! region generation. A control event carries the generation it was raised
//! against; anything older than the table is dropped, so each control has
//! exactly one live handler no matter how many swaps happened.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use std::collections::BTreeSet;

use crate::dom::Controls;

/// Region-scoped interactive control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    /// `#diffSelect` change.
    Difficulty,
    ResetButton,
    HintButton,
    ClearButton,
    /// `.piece-btn[data-piece]` click.
    PieceButton,
    /// `.color-btn[data-color]` click.
    ColorButton,
    ModePlace,
    ModeRemove,
}

#[derive(Debug, Default)]
pub struct Bindings {
    generation: u64,
    live: BTreeSet<Control>,
}

impl Bindings {
    /// Bind the controls rendered in a region of `generation`.
    #[must_use]
    pub fn for_region(generation: u64, controls: &Controls) -> Self {
        let mut live = BTreeSet::new();
        let mut bind = |present: bool, control: Control| {
            if present {
                live.insert(control);
            }
        };
        bind(controls.difficulty.is_some(), Control::Difficulty);
        bind(controls.reset, Control::ResetButton);
        bind(controls.hint, Control::HintButton);
        bind(controls.clear, Control::ClearButton);
        bind(!controls.piece_buttons.is_empty(), Control::PieceButton);
        bind(!controls.color_buttons.is_empty(), Control::ColorButton);
        bind(controls.mode_place.is_some(), Control::ModePlace);
        bind(controls.mode_remove.is_some(), Control::ModeRemove);
        Self { generation, live }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when `control` raised against `generation` has a live handler.
    #[must_use]
    pub fn accepts(&self, control: Control, generation: u64) -> bool {
        generation == self.generation && self.live.contains(&control)
    }

    /// Live controls in a stable order.
    pub fn controls(&self) -> impl Iterator<Item = Control> + '_ {
        self.live.iter().copied()
    }
}
