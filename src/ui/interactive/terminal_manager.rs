//! Terminal setup and cleanup for interactive mode

use crate::error::AppError;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{Stdout, stdout};
use tracing::warn;

/// Size used when the terminal cannot report one
const FALLBACK_SIZE: (u16, u16) = (80, 24);

#[derive(Debug, Clone, Default)]
pub struct TerminalConfig {
    /// Leaves the terminal in cooked mode so log output stays readable
    pub debug_mode: bool,
}

pub struct TerminalManager {
    config: TerminalConfig,
}

impl TerminalManager {
    pub fn with_config(config: TerminalConfig) -> Self {
        Self { config }
    }

    /// Enables raw mode and switches to the alternate screen.
    /// Returns the handle to render into.
    pub fn setup_terminal(&self) -> Result<Stdout, AppError> {
        let mut stdout = stdout();

        if !self.config.debug_mode {
            enable_raw_mode()?;
            execute!(stdout, EnterAlternateScreen, Hide)?;
        }

        Ok(stdout)
    }

    /// Restores the terminal to the state it had before `setup_terminal`
    pub fn cleanup_terminal(&self, mut stdout: Stdout) -> Result<(), AppError> {
        if !self.config.debug_mode {
            disable_raw_mode()?;
            execute!(stdout, Show, LeaveAlternateScreen)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }
}

/// Current terminal size as (columns, rows), with a fallback when detection
/// fails or reports zero dimensions
pub fn terminal_size() -> (u16, u16) {
    match terminal::size() {
        Ok(size) => sanitize_size(size),
        Err(e) => {
            warn!("Failed to detect terminal size: {}", e);
            FALLBACK_SIZE
        }
    }
}

fn sanitize_size(size: (u16, u16)) -> (u16, u16) {
    if size.0 == 0 || size.1 == 0 {
        FALLBACK_SIZE
    } else {
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_manager_with_config() {
        let manager = TerminalManager::with_config(TerminalConfig { debug_mode: true });
        assert!(manager.config().debug_mode);
    }

    #[test]
    fn test_terminal_config_default() {
        assert!(!TerminalConfig::default().debug_mode);
    }

    #[test]
    fn test_zero_size_falls_back() {
        assert_eq!(sanitize_size((0, 40)), FALLBACK_SIZE);
        assert_eq!(sanitize_size((120, 0)), FALLBACK_SIZE);
        assert_eq!(sanitize_size((120, 40)), (120, 40));
    }
}
