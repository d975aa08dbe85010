use crate::cli::Args;
use league_lens::config::Config;
use league_lens::config::user_prompts::prompt_for_api_domain;
use league_lens::constants::strings;
use league_lens::data_fetcher::models::{League, Season, Sport};
use league_lens::data_fetcher::processors::{derive_sport_facets, filter_leagues, results_label};
use league_lens::data_fetcher::{FetchError, QueryState, SportsDataService};
use league_lens::error::AppError;
use league_lens::ui::colors::*;
use league_lens::ui::render::{Line, print_lines};
use std::io::stdout;
use tracing::{info, warn};

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// An unreadable config file is replaced with defaults plus the requested
/// changes.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_else(|e| {
        warn!("Could not load existing config, starting from defaults: {}", e);
        Config::default()
    });

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = if new_domain.trim().is_empty() {
            prompt_for_api_domain(&config.api_domain).await?
        } else {
            new_domain.clone()
        };
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Handles --once: prints the (optionally filtered) league list and exits.
pub async fn handle_once_command(args: &Args, service: &SportsDataService) -> Result<(), AppError> {
    let leagues = settled_data(service.fetch_leagues().await, strings::GENERIC_ERROR)?;
    let lines = league_lines(&leagues, args.search.as_deref(), args.sport.as_deref());
    print_lines(&mut stdout(), &lines)
}

/// Handles --sports: prints the distinct sports of the league list.
pub async fn handle_sports_command(service: &SportsDataService) -> Result<(), AppError> {
    let leagues = settled_data(service.fetch_leagues().await, strings::GENERIC_ERROR)?;
    let lines = sport_lines(&derive_sport_facets(&leagues));
    print_lines(&mut stdout(), &lines)
}

/// Handles --league: prints one league's seasons, or a single season and the
/// result of checking its badge.
pub async fn handle_league_command(
    service: &SportsDataService,
    league_id: &str,
    season: Option<&str>,
) -> Result<(), AppError> {
    let state = service.fetch_league_seasons(league_id).await;
    if matches!(state, QueryState::Idle) {
        return Err(AppError::config_error("League id cannot be empty"));
    }
    let seasons = settled_data(state, strings::ERROR_LOADING_LEAGUE_BADGE)?;

    let lines = match season {
        None => season_lines(&seasons),
        Some(label) => match seasons.iter().find(|s| s.label == label) {
            Some(season) => {
                let badge_loaded = match &season.badge_url {
                    Some(url) => service.check_image(url).await.is_ok(),
                    None => false,
                };
                selected_season_lines(season, badge_loaded)
            }
            None => vec![Line::new(muted_fg(), format!("Season {label} not found."))],
        },
    };
    print_lines(&mut stdout(), &lines)
}

/// Unwraps a settled query, printing `failure_text` and turning the cached
/// error into an `AppError` on failure.
fn settled_data<T>(state: QueryState<T>, failure_text: &str) -> Result<std::sync::Arc<T>, AppError> {
    match state {
        QueryState::Success(data) => Ok(data),
        QueryState::Error(e) => {
            print_lines(&mut stdout(), &[Line::new(error_fg(), failure_text)])?;
            Err(fetch_failure(&e))
        }
        QueryState::Idle | QueryState::Pending => {
            Err(AppError::unexpected("Query did not settle"))
        }
    }
}

fn fetch_failure(error: &FetchError) -> AppError {
    match error.status {
        Some(status) => AppError::unexpected(format!("{} (HTTP {status})", error.message)),
        None => AppError::unexpected(error.message.clone()),
    }
}

fn league_lines(leagues: &[League], search: Option<&str>, sport: Option<&str>) -> Vec<Line> {
    let facets = derive_sport_facets(leagues);
    let selected = match sport {
        Some(name) => match facets.iter().find(|s| s.id.eq_ignore_ascii_case(name)) {
            Some(facet) => Some(facet.clone()),
            None => {
                info!("Sport '{}' is not among the league sports", name);
                // Matches nothing, same as an unknown facet id
                Some(Sport::new(name))
            }
        },
        None => None,
    };
    let filtered = filter_leagues(leagues, search.unwrap_or(""), selected.as_ref());

    let mut lines = vec![
        Line::new(title_fg(), strings::APP_TITLE),
        Line::new(muted_fg(), results_label(filtered.len())),
        Line::blank(),
    ];
    if filtered.is_empty() {
        lines.push(Line::new(muted_fg(), strings::NO_LEAGUES_FOUND));
    }
    for league in filtered {
        let mut text = format!("{:>6}  {} [{}]", league.id, league.name, league.sport);
        if let Some(alt) = &league.alternate_name {
            text.push_str(&format!("  ({alt})"));
        }
        lines.push(Line::new(text_fg(), text));
    }
    lines
}

fn sport_lines(sports: &[Sport]) -> Vec<Line> {
    sports
        .iter()
        .map(|sport| Line::new(text_fg(), sport.name.clone()))
        .collect()
}

fn season_lines(seasons: &[Season]) -> Vec<Line> {
    if seasons.is_empty() {
        return vec![Line::new(muted_fg(), strings::NO_SEASONS_FOUND)];
    }
    let mut lines = vec![Line::new(subtitle_fg(), strings::ALL_SEASONS_TITLE)];
    for season in seasons {
        let badge = season.badge_url.as_deref().unwrap_or(strings::NO_IMAGE);
        lines.push(Line::new(text_fg(), format!("{:<12} {badge}", season.label)));
    }
    lines
}

fn selected_season_lines(season: &Season, badge_loaded: bool) -> Vec<Line> {
    let badge = match (&season.badge_url, badge_loaded) {
        (Some(url), true) => Line::new(text_fg(), format!("Badge: {url}")),
        _ => Line::new(muted_fg(), strings::NO_BADGE_AVAILABLE),
    };
    vec![
        Line::new(
            highlight_fg(),
            format!("{} {}", strings::SEASON_BADGE_ALT_TEXT_PREFIX, season.label),
        ),
        badge,
    ]
}
