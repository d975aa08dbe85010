// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_operation, is_noninteractive_mode};
use league_lens::config::Config;
use league_lens::data_fetcher::SportsDataService;
use league_lens::error::AppError;
use league_lens::ui;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config = Config::load().await;
    let (log_file_path, _guard) = logging::setup_logging(&args, config.as_ref().ok()).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    let config = config?;
    tracing::debug!("Using API domain {}", config.api_domain);
    let service = SportsDataService::new(&config)?;

    if args.sports {
        return commands::handle_sports_command(&service).await;
    }

    if let Some(league_id) = &args.league {
        return commands::handle_league_command(&service, league_id, args.season.as_deref()).await;
    }

    if is_noninteractive_mode(&args) {
        return commands::handle_once_command(&args, &service).await;
    }

    ui::run_interactive_ui(
        service,
        config.search_debounce(),
        args.search.as_deref(),
        args.debug,
    )
    .await
}
