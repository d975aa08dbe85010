//! State behind the league details screen: season selection and badge images

use super::image_status::ImageSlot;
use super::selection::SeasonSelection;
use crate::data_fetcher::cache::QueryState;
use crate::data_fetcher::models::{League, Season};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug)]
pub struct LeagueDetailsView {
    league: League,
    seasons: Option<Arc<Vec<Season>>>,
    selection: SeasonSelection,
    main_image: ImageSlot,
    season_images: HashMap<String, ImageSlot>,
    // url -> loaded, for every check this view has seen finish
    image_outcomes: HashMap<String, bool>,
    requested_images: HashSet<String>,
}

impl LeagueDetailsView {
    pub fn new(league: League) -> Self {
        Self {
            league,
            seasons: None,
            selection: SeasonSelection::new(),
            main_image: ImageSlot::new(None),
            season_images: HashMap::new(),
            image_outcomes: HashMap::new(),
            requested_images: HashSet::new(),
        }
    }

    pub fn league(&self) -> &League {
        &self.league
    }

    /// Season list the view has accepted, if it has arrived
    pub fn seasons(&self) -> &[Season] {
        self.seasons.as_deref().map_or(&[], Vec::as_slice)
    }

    /// Feeds the latest query state into the view. The season list is taken
    /// over the first time it is available; later calls with the same data
    /// change nothing. Returns true when the view changed.
    pub fn on_seasons_state(&mut self, state: &QueryState<Vec<Season>>) -> bool {
        if self.seasons.is_some() {
            return false;
        }
        let Some(seasons) = state.shared_data() else {
            return false;
        };

        self.season_images = seasons
            .iter()
            .map(|s| (s.label.clone(), ImageSlot::new(s.badge_url.as_deref())))
            .collect();
        self.selection.on_seasons_arrived(&seasons);
        self.seasons = Some(seasons);
        self.sync_main_image();
        self.replay_outcomes();
        true
    }

    pub fn selected_season(&self) -> Option<&Season> {
        let label = self.selection.selected()?;
        self.seasons().iter().find(|s| s.label == label)
    }

    pub fn is_selected(&self, season: &Season) -> bool {
        self.selection.is_selected(&season.label)
    }

    pub fn select_season(&mut self, season: &Season) {
        self.selection.select(season.label.clone());
        self.sync_main_image();
    }

    pub fn select_next(&mut self) {
        self.step_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.step_selection(-1);
    }

    fn step_selection(&mut self, delta: isize) {
        let seasons = self.seasons();
        if seasons.is_empty() {
            return;
        }
        let current = self
            .selection
            .selected()
            .and_then(|label| seasons.iter().position(|s| s.label == label))
            .unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(seasons.len() - 1);
        let label = seasons[next].label.clone();

        self.selection.select(label);
        self.sync_main_image();
    }

    fn sync_main_image(&mut self) {
        let badge = self
            .selected_season()
            .and_then(|s| s.badge_url.clone());
        if self.main_image.set_source(badge.as_deref()) {
            self.replay_outcomes();
        }
    }

    fn replay_outcomes(&mut self) {
        let outcomes: Vec<(String, bool)> = self
            .image_outcomes
            .iter()
            .map(|(url, loaded)| (url.clone(), *loaded))
            .collect();
        for (url, loaded) in outcomes {
            self.mark_slots(&url, loaded);
        }
    }

    pub fn main_image(&self) -> &ImageSlot {
        &self.main_image
    }

    pub fn season_image(&self, label: &str) -> Option<&ImageSlot> {
        self.season_images.get(label)
    }

    /// Records the outcome of loading `url`. Every slot currently pointing at
    /// that URL is updated.
    pub fn on_image_result(&mut self, url: &str, loaded: bool) {
        self.image_outcomes.insert(url.to_string(), loaded);
        self.mark_slots(url, loaded);
    }

    fn mark_slots(&mut self, url: &str, loaded: bool) {
        let slots = std::iter::once(&mut self.main_image).chain(self.season_images.values_mut());
        for slot in slots.filter(|slot| slot.source() == Some(url)) {
            if loaded {
                slot.mark_loaded();
            } else {
                slot.mark_errored();
            }
        }
    }

    /// Distinct image URLs that still need a load attempt
    pub fn pending_image_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        let slots = std::iter::once(&self.main_image).chain(
            self.seasons()
                .iter()
                .filter_map(|s| self.season_images.get(&s.label)),
        );
        for slot in slots.filter(|slot| slot.needs_load()) {
            if let Some(url) = slot.source()
                && !urls.iter().any(|u| u == url)
            {
                urls.push(url.to_string());
            }
        }
        urls
    }

    /// Pending image URLs this view has not asked for yet. Each URL is
    /// handed out once per view.
    pub fn take_image_requests(&mut self) -> Vec<String> {
        let mut urls = self.pending_image_urls();
        urls.retain(|url| self.requested_images.insert(url.clone()));
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::FetchError;
    use crate::ui::image_status::{ImageDisplay, ImageLoadStatus};

    fn league() -> League {
        League::new("4328", "English Premier League", "Soccer", None)
    }

    fn arrived(seasons: Vec<Season>) -> QueryState<Vec<Season>> {
        QueryState::Success(Arc::new(seasons))
    }

    fn sample_seasons() -> Vec<Season> {
        vec![
            Season::new("2022-2023", Some("https://img.test/22.png")),
            Season::new("2023-2024", Some("https://img.test/23.png")),
            Season::new("2024-2025", None),
        ]
    }

    #[test]
    fn test_pending_and_error_states_change_nothing() {
        let mut view = LeagueDetailsView::new(league());

        assert!(!view.on_seasons_state(&QueryState::Pending));
        assert!(!view.on_seasons_state(&QueryState::Error(FetchError::new("boom"))));
        assert!(view.seasons().is_empty());
        assert_eq!(view.selected_season(), None);
    }

    #[test]
    fn test_arrival_selects_first_season_and_main_badge() {
        let mut view = LeagueDetailsView::new(league());

        assert!(view.on_seasons_state(&arrived(sample_seasons())));

        assert_eq!(view.selected_season().map(|s| s.label.as_str()), Some("2022-2023"));
        assert_eq!(view.main_image().source(), Some("https://img.test/22.png"));
        assert_eq!(view.main_image().display(), ImageDisplay::Placeholder);
    }

    #[test]
    fn test_arrival_applied_once() {
        let mut view = LeagueDetailsView::new(league());
        let state = arrived(sample_seasons());

        view.on_seasons_state(&state);
        view.select_next();
        assert!(!view.on_seasons_state(&state));

        assert_eq!(view.selected_season().map(|s| s.label.as_str()), Some("2023-2024"));
    }

    #[test]
    fn test_empty_season_list_selects_nothing() {
        let mut view = LeagueDetailsView::new(league());

        assert!(view.on_seasons_state(&arrived(Vec::new())));
        assert_eq!(view.selected_season(), None);
        assert_eq!(view.main_image().display(), ImageDisplay::Fallback);
    }

    #[test]
    fn test_explicit_selection_moves_main_image() {
        let mut view = LeagueDetailsView::new(league());
        view.on_seasons_state(&arrived(sample_seasons()));
        view.on_image_result("https://img.test/22.png", true);
        assert_eq!(view.main_image().status(), ImageLoadStatus::Loaded);

        let season = view.seasons()[2].clone();
        view.select_season(&season);

        assert!(view.is_selected(&season));
        // No badge for this season
        assert_eq!(view.main_image().display(), ImageDisplay::Fallback);

        view.select_previous();
        assert_eq!(view.main_image().source(), Some("https://img.test/23.png"));
        assert_eq!(view.main_image().status(), ImageLoadStatus::Unloaded);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut view = LeagueDetailsView::new(league());
        view.on_seasons_state(&arrived(sample_seasons()));

        view.select_previous();
        assert_eq!(view.selected_season().map(|s| s.label.as_str()), Some("2022-2023"));

        for _ in 0..5 {
            view.select_next();
        }
        assert_eq!(view.selected_season().map(|s| s.label.as_str()), Some("2024-2025"));
    }

    #[test]
    fn test_image_results_update_matching_slots() {
        let mut view = LeagueDetailsView::new(league());
        view.on_seasons_state(&arrived(sample_seasons()));

        view.on_image_result("https://img.test/22.png", true);
        view.on_image_result("https://img.test/23.png", false);

        assert_eq!(
            view.season_image("2022-2023").map(ImageSlot::status),
            Some(ImageLoadStatus::Loaded)
        );
        assert_eq!(
            view.season_image("2023-2024").map(ImageSlot::display),
            Some(ImageDisplay::Fallback)
        );
        assert_eq!(
            view.season_image("2024-2025").map(ImageSlot::display),
            Some(ImageDisplay::Fallback)
        );
        assert_eq!(view.main_image().status(), ImageLoadStatus::Loaded);
    }

    #[test]
    fn test_pending_image_urls_are_distinct() {
        let mut view = LeagueDetailsView::new(league());
        view.on_seasons_state(&arrived(sample_seasons()));

        assert_eq!(
            view.pending_image_urls(),
            vec![
                "https://img.test/22.png".to_string(),
                "https://img.test/23.png".to_string()
            ]
        );

        view.on_image_result("https://img.test/22.png", true);
        assert_eq!(view.pending_image_urls(), vec!["https://img.test/23.png".to_string()]);
    }

    #[test]
    fn test_image_requests_handed_out_once_per_view() {
        let mut view = LeagueDetailsView::new(league());
        view.on_seasons_state(&arrived(sample_seasons()));

        assert_eq!(view.take_image_requests().len(), 2);
        assert!(view.take_image_requests().is_empty());
        // Still pending until results arrive
        assert_eq!(view.pending_image_urls().len(), 2);

        let mut reopened = LeagueDetailsView::new(league());
        reopened.on_seasons_state(&arrived(sample_seasons()));
        assert_eq!(reopened.take_image_requests().len(), 2);
    }

    #[test]
    fn test_known_outcome_applies_when_main_image_moves() {
        let mut view = LeagueDetailsView::new(league());
        view.on_seasons_state(&arrived(sample_seasons()));
        view.on_image_result("https://img.test/23.png", false);

        view.select_next();

        assert_eq!(view.main_image().source(), Some("https://img.test/23.png"));
        assert_eq!(view.main_image().status(), ImageLoadStatus::Errored);
        assert_eq!(view.pending_image_urls(), vec!["https://img.test/22.png".to_string()]);
    }
}
