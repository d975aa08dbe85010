//! Maps key events to actions for the current screen

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which screen is receiving input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ScreenKind {
    List,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    Quit,
    Type(char),
    Backspace,
    ClearSearch,
    NextSport,
    PreviousSport,
    Up,
    Down,
    Open,
    NextSeason,
    PreviousSeason,
    Back,
    Ignore,
}

/// Decides what a key press means. On the list screen every printable
/// character goes into the search box, so quitting is Esc on an empty box or
/// Ctrl+C.
pub(super) fn map_key(key: &KeyEvent, screen: ScreenKind, search_empty: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match screen {
        ScreenKind::List => match key.code {
            KeyCode::Esc if search_empty => Action::Quit,
            KeyCode::Esc => Action::ClearSearch,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Tab => Action::NextSport,
            KeyCode::BackTab => Action::PreviousSport,
            KeyCode::Up => Action::Up,
            KeyCode::Down => Action::Down,
            KeyCode::Enter => Action::Open,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::Type(c),
            _ => Action::Ignore,
        },
        ScreenKind::Details => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc | KeyCode::Backspace => Action::Back,
            KeyCode::Right | KeyCode::Down => Action::NextSeason,
            KeyCode::Left | KeyCode::Up => Action::PreviousSeason,
            _ => Action::Ignore,
        },
    }
}
