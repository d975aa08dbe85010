//! Turns view state into colored text lines and draws them with crossterm

use super::colors::*;
use super::image_status::ImageDisplay;
use super::league_details::LeagueDetailsView;
use super::league_list::LeagueListView;
use super::loading_indicator::LoadingIndicator;
use crate::constants::strings;
use crate::data_fetcher::cache::QueryState;
use crate::data_fetcher::models::{League, Season, Sport};
use crate::error::AppError;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// One rendered row of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub color: Color,
    pub text: String,
}

impl Line {
    pub fn new(color: Color, text: impl Into<String>) -> Self {
        Self {
            color,
            text: text.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new(text_fg(), "")
    }
}

const LIST_FOOTER: &str = "Type to search  Tab/Shift+Tab sport  Up/Down move  Enter open  Esc clear/quit";
const DETAILS_FOOTER: &str = "Left/Right season  Esc back  q quit";

/// Rows taken by everything but the league entries on the list screen
const LIST_CHROME_ROWS: usize = 9;
/// Rows per league entry
const LEAGUE_ENTRY_ROWS: usize = 2;

pub fn render_league_list(
    view: &LeagueListView,
    state: &QueryState<Vec<League>>,
    spinner: &LoadingIndicator,
    height: u16,
) -> Vec<Line> {
    let mut lines = vec![
        Line::new(title_fg(), strings::APP_TITLE),
        Line::new(subtitle_fg(), strings::APP_SUBTITLE),
        Line::blank(),
    ];

    let search_line = if view.input().is_empty() {
        Line::new(muted_fg(), format!("Search: {}", strings::SEARCH_PLACEHOLDER))
    } else {
        let marker = if view.is_search_pending() { " ..." } else { "" };
        Line::new(text_fg(), format!("Search: {}{}", view.input(), marker))
    };
    lines.push(search_line);

    match state {
        QueryState::Idle | QueryState::Pending => {
            lines.push(Line::blank());
            lines.push(Line::new(text_fg(), spinner.line()));
        }
        QueryState::Error(_) => {
            lines.push(Line::blank());
            lines.push(Line::new(error_fg(), strings::GENERIC_ERROR));
        }
        QueryState::Success(leagues) => {
            let model = view.model(leagues);

            lines.push(Line::new(
                highlight_fg(),
                sport_bar(&model.sports, view.selected_sport().map(|s| s.id.as_str())),
            ));
            lines.push(Line::new(muted_fg(), model.results_label.clone()));
            lines.push(Line::blank());

            if model.is_empty() {
                lines.push(Line::new(muted_fg(), strings::NO_LEAGUES_FOUND));
            } else {
                let capacity = (height as usize)
                    .saturating_sub(LIST_CHROME_ROWS)
                    .max(LEAGUE_ENTRY_ROWS)
                    / LEAGUE_ENTRY_ROWS;
                let cursor = view.cursor().min(model.leagues.len() - 1);
                let first = cursor.saturating_sub(capacity.saturating_sub(1));

                for (index, league) in model.leagues.iter().enumerate().skip(first).take(capacity) {
                    lines.extend(league_entry(league, index == cursor));
                }
            }
        }
    }

    lines.push(Line::blank());
    lines.push(Line::new(muted_fg(), LIST_FOOTER));
    lines
}

fn sport_bar(sports: &[Sport], selected: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(sports.len() + 1);
    let mark = |name: &str, active: bool| {
        if active {
            format!("[{name}]")
        } else {
            name.to_string()
        }
    };
    parts.push(mark(strings::ALL_SPORTS, selected.is_none()));
    for sport in sports {
        parts.push(mark(&sport.name, selected == Some(sport.id.as_str())));
    }
    parts.join("  ")
}

fn league_entry(league: &League, highlighted: bool) -> [Line; 2] {
    let (marker, color) = if highlighted {
        ("> ", highlight_fg())
    } else {
        ("  ", text_fg())
    };
    let detail = match &league.alternate_name {
        Some(alt) => format!("    {} | {}", league.sport, alt),
        None => format!("    {}", league.sport),
    };
    [
        Line::new(color, format!("{marker}{}", league.name)),
        Line::new(muted_fg(), detail),
    ]
}

pub fn render_league_details(
    view: &LeagueDetailsView,
    state: &QueryState<Vec<Season>>,
    spinner: &LoadingIndicator,
) -> Vec<Line> {
    let league = view.league();
    let mut lines = vec![
        Line::new(title_fg(), league.name.clone()),
        Line::new(subtitle_fg(), league.sport.clone()),
        Line::blank(),
    ];

    match state {
        QueryState::Idle | QueryState::Pending => {
            lines.push(Line::new(text_fg(), spinner.line()));
        }
        QueryState::Error(_) => {
            lines.push(Line::new(error_fg(), strings::ERROR_LOADING_LEAGUE_BADGE));
        }
        QueryState::Success(_) if view.seasons().is_empty() => {
            lines.push(Line::new(muted_fg(), strings::NO_SEASONS_FOUND));
        }
        QueryState::Success(_) => {
            let main = match view.main_image().display() {
                ImageDisplay::Placeholder => Line::new(muted_fg(), format!("Badge: {}", spinner.current_frame())),
                ImageDisplay::Image(url) => Line::new(text_fg(), format!("Badge: {url}")),
                ImageDisplay::Fallback => Line::new(muted_fg(), strings::NO_BADGE_AVAILABLE),
            };
            lines.push(main);
            if let Some(selected) = view.selected_season() {
                lines.push(Line::new(
                    highlight_fg(),
                    format!("{} {}", strings::SEASON_BADGE_ALT_TEXT_PREFIX, selected.label),
                ));
            }
            lines.push(Line::blank());
            lines.push(Line::new(subtitle_fg(), strings::ALL_SEASONS_TITLE));

            for season in view.seasons() {
                lines.push(season_entry(view, season, spinner));
            }
        }
    }

    lines.push(Line::blank());
    lines.push(Line::new(muted_fg(), DETAILS_FOOTER));
    lines
}

fn season_entry(view: &LeagueDetailsView, season: &Season, spinner: &LoadingIndicator) -> Line {
    let selected = view.is_selected(season);
    let marker = if selected { "> " } else { "  " };
    let image = match view.season_image(&season.label).map(|slot| slot.display()) {
        Some(ImageDisplay::Placeholder) => spinner.current_frame().to_string(),
        Some(ImageDisplay::Image(_)) => "[badge]".to_string(),
        Some(ImageDisplay::Fallback) | None => strings::NO_IMAGE.to_string(),
    };
    let color = if selected { highlight_fg() } else { text_fg() };
    Line::new(color, format!("{marker}{:<12} {image}", season.label))
}

/// Clears the screen and writes `lines` from the top-left corner
pub fn draw<W: Write>(out: &mut W, lines: &[Line], height: u16) -> Result<(), AppError> {
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in lines.iter().take(height as usize).enumerate() {
        queue!(
            out,
            MoveTo(0, row as u16),
            SetForegroundColor(line.color),
            Print(&line.text),
            ResetColor
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Writes `lines` one per row at the current cursor position, for output
/// that should stay in the terminal history
pub fn print_lines<W: Write>(out: &mut W, lines: &[Line]) -> Result<(), AppError> {
    for line in lines {
        queue!(
            out,
            SetForegroundColor(line.color),
            Print(&line.text),
            ResetColor,
            Print("\n")
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::FetchError;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.text.clone()).collect()
    }

    fn contains(lines: &[Line], needle: &str) -> bool {
        lines.iter().any(|l| l.text.contains(needle))
    }

    fn leagues_state() -> QueryState<Vec<League>> {
        QueryState::Success(Arc::new(vec![
            League::new("4328", "English Premier League", "Soccer", Some("EPL")),
            League::new("4387", "NBA", "Basketball", None),
        ]))
    }

    #[test]
    fn test_list_loading_and_error_states() {
        let view = LeagueListView::new(Duration::from_millis(300));
        let spinner = LoadingIndicator::new(strings::LOADING);

        let loading = render_league_list(&view, &QueryState::Pending, &spinner, 40);
        assert!(contains(&loading, strings::LOADING));

        let error = render_league_list(&view, &QueryState::Error(FetchError::new("x")), &spinner, 40);
        assert!(contains(&error, strings::GENERIC_ERROR));
        assert!(!contains(&error, strings::LOADING));
    }

    #[test]
    fn test_list_shows_leagues_facets_and_label() {
        let view = LeagueListView::new(Duration::from_millis(300));
        let spinner = LoadingIndicator::new(strings::LOADING);

        let lines = render_league_list(&view, &leagues_state(), &spinner, 40);

        assert!(contains(&lines, "[All Sports]  Soccer  Basketball"));
        assert!(contains(&lines, "2 leagues found"));
        assert!(contains(&lines, "> English Premier League"));
        assert!(contains(&lines, "Soccer | EPL"));
        assert!(texts(&lines).contains(&"  NBA".to_string()));
    }

    #[test]
    fn test_list_empty_result_message() {
        let mut view = LeagueListView::new(Duration::from_millis(300));
        view.on_input("curling", Instant::now());
        view.apply_search_now();
        let spinner = LoadingIndicator::new(strings::LOADING);

        let lines = render_league_list(&view, &leagues_state(), &spinner, 40);

        assert!(contains(&lines, strings::NO_LEAGUES_FOUND));
        assert!(contains(&lines, "0 leagues found"));
    }

    #[test]
    fn test_list_scrolls_to_keep_cursor_visible() {
        let leagues: Vec<League> = (0..30)
            .map(|i| League::new(i.to_string(), format!("League {i}"), "Soccer", None))
            .collect();
        let state = QueryState::Success(Arc::new(leagues));
        let mut view = LeagueListView::new(Duration::from_millis(300));
        for _ in 0..25 {
            view.move_down(30);
        }
        let spinner = LoadingIndicator::new(strings::LOADING);

        let lines = render_league_list(&view, &state, &spinner, 19);

        assert!(contains(&lines, "> League 25"));
        assert!(!contains(&lines, "League 0"));
    }

    #[test]
    fn test_details_states() {
        let view = LeagueDetailsView::new(League::new("1", "NBA", "Basketball", None));
        let spinner = LoadingIndicator::new(strings::LOADING);

        assert!(contains(
            &render_league_details(&view, &QueryState::Pending, &spinner),
            strings::LOADING
        ));
        assert!(contains(
            &render_league_details(&view, &QueryState::Error(FetchError::new("x")), &spinner),
            strings::ERROR_LOADING_LEAGUE_BADGE
        ));
    }

    #[test]
    fn test_details_no_seasons() {
        let mut view = LeagueDetailsView::new(League::new("1", "NBA", "Basketball", None));
        let state = QueryState::Success(Arc::new(Vec::new()));
        view.on_seasons_state(&state);
        let spinner = LoadingIndicator::new(strings::LOADING);

        let lines = render_league_details(&view, &state, &spinner);

        assert!(contains(&lines, strings::NO_SEASONS_FOUND));
    }

    #[test]
    fn test_details_seasons_and_badges() {
        let mut view = LeagueDetailsView::new(League::new("1", "NBA", "Basketball", None));
        let state = QueryState::Success(Arc::new(vec![
            Season::new("2023", Some("https://img.test/23.png")),
            Season::new("2024", None),
        ]));
        view.on_seasons_state(&state);
        view.on_image_result("https://img.test/23.png", true);
        let spinner = LoadingIndicator::new(strings::LOADING);

        let lines = render_league_details(&view, &state, &spinner);

        assert!(contains(&lines, "Badge: https://img.test/23.png"));
        assert!(contains(&lines, "Season 2023"));
        assert!(contains(&lines, strings::ALL_SEASONS_TITLE));
        assert!(contains(&lines, "> 2023"));
        assert!(contains(&lines, "[badge]"));
        assert!(contains(&lines, strings::NO_IMAGE));
    }

    #[test]
    fn test_draw_writes_text() {
        let mut buffer = Vec::new();
        let lines = vec![Line::new(text_fg(), "hello"), Line::new(muted_fg(), "world")];

        draw(&mut buffer, &lines, 1).unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("hello"));
        assert!(!output.contains("world"));
    }

    #[test]
    fn test_print_lines_writes_every_line() {
        let mut buffer = Vec::new();
        let lines = vec![Line::new(text_fg(), "first"), Line::blank(), Line::new(muted_fg(), "last")];

        print_lines(&mut buffer, &lines).unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("first"));
        assert!(output.contains("last"));
        assert_eq!(output.matches('\n').count(), 3);
    }
}
