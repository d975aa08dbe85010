//! State behind the league list screen: search input, sport facet and cursor

use super::debounce::Debouncer;
use crate::data_fetcher::models::{League, Sport};
use crate::data_fetcher::processors::{derive_sport_facets, filter_leagues, results_label};
use std::time::{Duration, Instant};
use tracing::debug;

/// Derived content of the list screen for one league list
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueListModel<'a> {
    pub sports: Vec<Sport>,
    pub leagues: Vec<&'a League>,
    pub results_label: String,
}

impl LeagueListModel<'_> {
    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty()
    }
}

#[derive(Debug)]
pub struct LeagueListView {
    input: String,
    search: Debouncer<String>,
    applied_term: String,
    selected_sport: Option<Sport>,
    cursor: usize,
}

impl LeagueListView {
    pub fn new(debounce: Duration) -> Self {
        Self {
            input: String::new(),
            search: Debouncer::new(debounce),
            applied_term: String::new(),
            selected_sport: None,
            cursor: 0,
        }
    }

    /// Raw text of the search box
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Search term the filter currently uses
    pub fn applied_term(&self) -> &str {
        &self.applied_term
    }

    pub fn selected_sport(&self) -> Option<&Sport> {
        self.selected_sport.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Records new search box text; the filter picks it up after the
    /// debounce period.
    pub fn on_input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.search.schedule(self.input.clone(), now);
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut text = self.input.clone();
        text.push(c);
        self.on_input(text, now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        let mut text = self.input.clone();
        if text.pop().is_some() {
            self.on_input(text, now);
        }
    }

    /// Empties the search box and applies the empty term at once
    pub fn clear(&mut self) {
        self.input.clear();
        self.search.cancel();
        self.apply_term(String::new());
    }

    /// Applies a debounced search term when it is due.
    /// Returns true when the applied term changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(term) if term != self.applied_term => {
                self.apply_term(term);
                true
            }
            _ => false,
        }
    }

    /// Applies the current input immediately, skipping the debounce
    pub fn apply_search_now(&mut self) {
        self.search.cancel();
        let term = self.input.clone();
        self.apply_term(term);
    }

    fn apply_term(&mut self, term: String) {
        debug!("Applying search term '{}'", term);
        self.applied_term = term;
        self.cursor = 0;
    }

    pub fn select_sport(&mut self, sport: Option<Sport>) {
        if self.selected_sport != sport {
            self.selected_sport = sport;
            self.cursor = 0;
        }
    }

    /// Moves the sport filter through "all sports" and each facet in order.
    /// A selected sport that is no longer among the facets restarts the cycle.
    pub fn cycle_sport(&mut self, sports: &[Sport], forward: bool) {
        let position = self
            .selected_sport
            .as_ref()
            .and_then(|selected| sports.iter().position(|s| s == selected));

        // Slot 0 is "all sports", slot i + 1 is sports[i]
        let slots = sports.len() + 1;
        let current = position.map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };

        self.select_sport(next.checked_sub(1).map(|i| sports[i].clone()));
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, visible: usize) {
        if self.cursor + 1 < visible {
            self.cursor += 1;
        }
    }

    pub fn model<'a>(&self, leagues: &'a [League]) -> LeagueListModel<'a> {
        let sports = derive_sport_facets(leagues);
        let filtered = filter_leagues(leagues, &self.applied_term, self.selected_sport.as_ref());
        let results_label = results_label(filtered.len());
        LeagueListModel {
            sports,
            leagues: filtered,
            results_label,
        }
    }

    /// League under the cursor in the filtered list
    pub fn highlighted<'a>(&self, leagues: &'a [League]) -> Option<&'a League> {
        let filtered = filter_leagues(leagues, &self.applied_term, self.selected_sport.as_ref());
        filtered
            .get(self.cursor.min(filtered.len().saturating_sub(1)))
            .copied()
    }
}
