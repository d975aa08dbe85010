//! Main interactive loop
//!
//! Each iteration applies due search input, re-reads cache state, folds in
//! finished badge checks, redraws when anything changed and then polls the
//! terminal for a key press. Fetches run as spawned tasks, so the loop never
//! waits on the network.

use super::input_handler::{Action, ScreenKind, map_key};
use super::terminal_manager::{TerminalConfig, TerminalManager, terminal_size};
use crate::constants::{polling, strings};
use crate::data_fetcher::SportsDataService;
use crate::data_fetcher::cache::QueryStatus;
use crate::error::AppError;
use crate::ui::league_details::LeagueDetailsView;
use crate::ui::league_list::LeagueListView;
use crate::ui::loading_indicator::LoadingIndicator;
use crate::ui::render::{draw, render_league_details, render_league_list};
use crossterm::event::{self, Event};
use std::io::Stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};

const SPINNER_FRAME_MS: u64 = 150;

enum Screen {
    List,
    Details(LeagueDetailsView),
}

/// Outcome of one badge URL check: (url, loaded)
type ImageResult = (String, bool);

struct InteractiveState {
    service: SportsDataService,
    list: LeagueListView,
    screen: Screen,
    spinner: LoadingIndicator,
    last_spinner_frame: Instant,
    last_leagues_status: Option<QueryStatus>,
    last_seasons_status: Option<QueryStatus>,
    image_tx: UnboundedSender<ImageResult>,
    image_rx: UnboundedReceiver<ImageResult>,
    needs_render: bool,
}

impl InteractiveState {
    fn new(service: SportsDataService, search_debounce: Duration) -> Self {
        let (image_tx, image_rx) = unbounded_channel();
        Self {
            service,
            list: LeagueListView::new(search_debounce),
            screen: Screen::List,
            spinner: LoadingIndicator::new(strings::LOADING),
            last_spinner_frame: Instant::now(),
            last_leagues_status: None,
            last_seasons_status: None,
            image_tx,
            image_rx,
            needs_render: true,
        }
    }

    fn screen_kind(&self) -> ScreenKind {
        match self.screen {
            Screen::List => ScreenKind::List,
            Screen::Details(_) => ScreenKind::Details,
        }
    }

    /// Pulls in everything that may have changed since the last iteration
    fn update(&mut self, now: Instant) {
        if self.list.tick(now) {
            self.needs_render = true;
        }

        let leagues = self.service.leagues();
        let mut loading = leagues.is_loading();
        if self.last_leagues_status != Some(leagues.status()) {
            self.last_leagues_status = Some(leagues.status());
            self.needs_render = true;
        }

        while let Ok((url, loaded)) = self.image_rx.try_recv() {
            if let Screen::Details(view) = &mut self.screen {
                view.on_image_result(&url, loaded);
                self.needs_render = true;
            }
        }

        if let Screen::Details(view) = &mut self.screen {
            let seasons = self.service.league_seasons(&view.league().id);
            loading |= seasons.is_loading();
            if self.last_seasons_status != Some(seasons.status()) {
                self.last_seasons_status = Some(seasons.status());
                self.needs_render = true;
            }
            if view.on_seasons_state(&seasons) {
                self.needs_render = true;
            }

            for url in view.take_image_requests() {
                spawn_image_check(&self.service, url, self.image_tx.clone());
            }
            loading |= !view.pending_image_urls().is_empty();
        }

        if loading
            && now.duration_since(self.last_spinner_frame) >= Duration::from_millis(SPINNER_FRAME_MS)
        {
            self.spinner.next_frame();
            self.last_spinner_frame = now;
            self.needs_render = true;
        }
    }

    fn render(&mut self, stdout: &mut Stdout) -> Result<(), AppError> {
        if !self.needs_render {
            return Ok(());
        }
        let (_, height) = terminal_size();
        let lines = match &self.screen {
            Screen::List => {
                render_league_list(&self.list, &self.service.leagues(), &self.spinner, height)
            }
            Screen::Details(view) => render_league_details(
                view,
                &self.service.league_seasons(&view.league().id),
                &self.spinner,
            ),
        };
        draw(stdout, &lines, height)?;
        self.needs_render = false;
        Ok(())
    }

    /// Applies one action. Returns false when the UI should exit.
    fn apply(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Quit => return false,
            Action::Ignore => return true,
            Action::Type(c) => self.list.push_char(c, now),
            Action::Backspace => self.list.pop_char(now),
            Action::ClearSearch => self.list.clear(),
            Action::NextSport | Action::PreviousSport => {
                if let Some(leagues) = self.service.leagues().shared_data() {
                    let sports = self.list.model(&leagues).sports;
                    self.list
                        .cycle_sport(&sports, action == Action::NextSport);
                }
            }
            Action::Up => self.list.move_up(),
            Action::Down => {
                if let Some(leagues) = self.service.leagues().shared_data() {
                    let visible = self.list.model(&leagues).leagues.len();
                    self.list.move_down(visible);
                }
            }
            Action::Open => {
                let highlighted = self
                    .service
                    .leagues()
                    .shared_data()
                    .and_then(|leagues| self.list.highlighted(&leagues).cloned());
                if let Some(league) = highlighted {
                    info!("Opening league {} ({})", league.name, league.id);
                    self.last_seasons_status = None;
                    self.screen = Screen::Details(LeagueDetailsView::new(league));
                }
            }
            Action::NextSeason => {
                if let Screen::Details(view) = &mut self.screen {
                    view.select_next();
                }
            }
            Action::PreviousSeason => {
                if let Screen::Details(view) = &mut self.screen {
                    view.select_previous();
                }
            }
            Action::Back => self.screen = Screen::List,
        }
        self.needs_render = true;
        true
    }
}

fn spawn_image_check(service: &SportsDataService, url: String, tx: UnboundedSender<ImageResult>) {
    let service = service.clone();
    tokio::spawn(async move {
        let loaded = match service.check_image(&url).await {
            Ok(()) => true,
            Err(e) => {
                debug!("Badge check failed for {}: {}", url, e);
                false
            }
        };
        // The receiver is gone once the UI has exited
        let _ = tx.send((url, loaded));
    });
}

/// Runs the interactive league browser until the user quits
pub async fn run_interactive_ui(
    service: SportsDataService,
    search_debounce: Duration,
    initial_search: Option<&str>,
    debug_mode: bool,
) -> Result<(), AppError> {
    let mut state = InteractiveState::new(service, search_debounce);
    if let Some(term) = initial_search {
        state.list.on_input(term, Instant::now());
        state.list.apply_search_now();
    }

    let terminal = TerminalManager::with_config(TerminalConfig { debug_mode });
    let mut stdout = terminal.setup_terminal()?;

    let result = event_loop(&mut stdout, state).await;

    terminal.cleanup_terminal(stdout)?;
    result
}

async fn event_loop(stdout: &mut Stdout, mut state: InteractiveState) -> Result<(), AppError> {
    let poll_interval = Duration::from_millis(polling::EVENT_POLL_MS);
    let stats_interval = Duration::from_secs(polling::CACHE_STATS_LOG_SECONDS);
    let mut last_stats_log = Instant::now();

    loop {
        let now = Instant::now();
        state.update(now);
        state.render(stdout)?;

        if now.duration_since(last_stats_log) >= stats_interval {
            state.service.log_cache_stats();
            last_stats_log = now;
        }

        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key_event) => {
                    let action = map_key(
                        &key_event,
                        state.screen_kind(),
                        state.list.input().is_empty(),
                    );
                    if !state.apply(action, Instant::now()) {
                        debug!("Exiting interactive UI");
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => state.needs_render = true,
                _ => {}
            }
        } else {
            // Let spawned fetches make progress on a current-thread runtime
            tokio::task::yield_now().await;
        }
    }
}
