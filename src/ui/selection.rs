//! Season selection scoped to one league details view

use crate::data_fetcher::models::Season;
use tracing::debug;

/// Currently selected season label.
///
/// The first season is chosen automatically when a season list arrives and
/// nothing is selected yet. An explicit pick always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonSelection {
    selected: Option<String>,
}

impl SeasonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the arrival rule for a freshly received season list.
    /// Returns true when a season was auto-selected.
    pub fn on_seasons_arrived(&mut self, seasons: &[Season]) -> bool {
        if self.selected.is_some() {
            return false;
        }
        match seasons.first() {
            Some(first) => {
                debug!("Auto-selecting first season {}", first.label);
                self.selected = Some(first.label.clone());
                true
            }
            None => false,
        }
    }

    /// Replaces the selection unconditionally
    pub fn select(&mut self, label: impl Into<String>) {
        self.selected = Some(label.into());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.as_deref() == Some(label)
    }
}
