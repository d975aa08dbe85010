use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode.
/// Any listing flag or configuration operation prints and exits.
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once
        || args.sports
        || args.league.is_some()
        || args.new_api_domain.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// True when only the configuration is touched and no data is fetched
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_domain.is_some() || args.new_log_file_path.is_some() || args.clear_log_file_path
}

/// League Lens
///
/// Browse sports leagues from TheSportsDB, filter them by name and sport and
/// look through each league's season badges.
///
/// In interactive mode (default):
/// - Type to search leagues by name, sport or alternate name
/// - Tab / Shift+Tab cycles the sport filter
/// - Up/Down moves, Enter opens a league
/// - Left/Right picks a season, Esc goes back
/// - Esc on an empty search or Ctrl+C quits
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Print the league list once and exit instead of starting the interactive browser.
    #[arg(short, long)]
    pub once: bool,

    /// Only list leagues whose name, sport or alternate name contains this text.
    #[arg(long, short = 's', help_heading = "Filtering")]
    pub search: Option<String>,

    /// Only list leagues of this sport (exact sport name, e.g. "Soccer").
    #[arg(long, help_heading = "Filtering")]
    pub sport: Option<String>,

    /// Print the seasons and badges of the league with this id and exit.
    #[arg(long, short = 'L', value_name = "LEAGUE_ID", help_heading = "Filtering")]
    pub league: Option<String>,

    /// With --league: show only this season and check its badge.
    #[arg(long, requires = "league", help_heading = "Filtering")]
    pub season: Option<String>,

    /// Print the distinct sports of the league list and exit.
    #[arg(long, help_heading = "Filtering")]
    pub sports: bool,

    /// Update API domain in config. Will prompt for new domain if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_DOMAIN",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode which keeps the terminal in normal mode and also logs to stdout.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
