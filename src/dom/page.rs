//! Live page model: a fixed shell around one swappable content region.
//!
//! DESIGN
//! ======
//! Only the region changes after load. Each swap bumps `generation`, which
//! bindings and region-scoped timers use to tell current state from stale.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use super::Region;
use super::parse::{ParsedDocument, Selectors};

#[derive(Debug)]
pub struct Page {
    shell_csrf_token: Option<String>,
    computer_turn_at_load: bool,
    region: Region,
    has_region: bool,
    generation: u64,
}

impl Page {
    #[must_use]
    pub fn from_parsed(parsed: ParsedDocument) -> Self {
        let has_region = parsed.region.is_some();
        Self {
            shell_csrf_token: parsed.csrf_token,
            computer_turn_at_load: parsed.computer_turn_at_load,
            region: parsed.region.unwrap_or_default(),
            has_region,
            generation: 0,
        }
    }

    /// Parse a full document loaded by navigation.
    #[must_use]
    pub fn load(selectors: &Selectors, html: &str) -> Self {
        Self::from_parsed(selectors.parse_document(html))
    }

    /// Swap in the region of `html`. Returns `false` and leaves the page
    /// untouched when the response carries no region.
    pub fn swap_region(&mut self, selectors: &Selectors, html: &str) -> bool {
        let Some(region) = selectors.parse_region(html) else {
            return false;
        };
        self.region = region;
        self.has_region = true;
        self.generation += 1;
        true
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut Region {
        &mut self.region
    }

    #[must_use]
    pub fn has_region(&self) -> bool {
        self.has_region
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn computer_turn_at_load(&self) -> bool {
        self.computer_turn_at_load
    }

    /// Anti-forgery token for the next request: a token rendered inside the
    /// region is the freshest, otherwise the one from the shell.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        self.region
            .csrf_token
            .clone()
            .or_else(|| self.shell_csrf_token.clone())
            .filter(|t| !t.is_empty())
    }
}
