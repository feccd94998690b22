use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    TogglePalette,
    Quit,
    Goto(Section),
    Cancel,
    NextField,
    PrevField,
    Submit,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Input(char),
    None,
}

/// Translates a key press into an action. Plain characters are always
/// `Input`: whether `q` quits depends on what has focus.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => AppAction::Quit,
            KeyCode::Char('p') => AppAction::TogglePalette,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::F(1) => AppAction::Goto(Section::Entry),
        KeyCode::F(2) => AppAction::Goto(Section::History),
        KeyCode::F(3) => AppAction::Goto(Section::Dashboard),
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
