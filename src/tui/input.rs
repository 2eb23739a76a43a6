// Input mapping - terminal events to console actions
//
// Keys and mouse events are translated into `Action`s; `App::apply` is the
// only place that acts on them. Keeping the mapping here makes it testable
// without a terminal.

use super::console_view::ScrollMotion;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Everything the user can ask the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    /// Scroll the focused view (starts its settle window)
    Scroll(ScrollMotion),
    /// Start/stop a drag on the focused view
    Touch(bool),
    /// Pin/unpin the focused view (holds it as if touched)
    TogglePin,
    Clear,
    WriteAtHead,
    BlankLine,
    Copy,
    OpenView,
    CloseView,
}

/// Map a key event; releases and repeats of non-navigation keys are ignored
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let navigation = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(ScrollMotion::LineUp),
        KeyCode::Down | KeyCode::Char('j') => Some(ScrollMotion::LineDown),
        KeyCode::PageUp => Some(ScrollMotion::PageUp),
        KeyCode::PageDown => Some(ScrollMotion::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(ScrollMotion::Start),
        KeyCode::End | KeyCode::Char('G') => Some(ScrollMotion::End),
        _ => None,
    };
    if let Some(motion) = navigation {
        return Some(Action::Scroll(motion));
    }

    // Single-shot actions fire on press only
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab | KeyCode::Right => Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Left => Some(Action::FocusPrev),
        KeyCode::Char('p') => Some(Action::TogglePin),
        KeyCode::Char('c') => Some(Action::Clear),
        KeyCode::Char('h') => Some(Action::WriteAtHead),
        KeyCode::Char('l') => Some(Action::BlankLine),
        KeyCode::Char('y') => Some(Action::Copy),
        KeyCode::Char('n') => Some(Action::OpenView),
        KeyCode::Char('x') => Some(Action::CloseView),
        _ => None,
    }
}

/// Map a mouse event on the focused view
pub fn action_for_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::Scroll(ScrollMotion::LineUp)),
        MouseEventKind::ScrollDown => Some(Action::Scroll(ScrollMotion::LineDown)),
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Touch(true)),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::Touch(false)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_press_maps_actions() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('h'), KeyEventKind::Press)),
            Some(Action::WriteAtHead)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Tab, KeyEventKind::Press)),
            Some(Action::FocusNext)
        );
        assert_eq!(action_for_key(key(KeyCode::Char('z'), KeyEventKind::Press)), None);
    }

    #[test]
    fn test_release_ignored() {
        assert_eq!(action_for_key(key(KeyCode::Char('q'), KeyEventKind::Release)), None);
        assert_eq!(action_for_key(key(KeyCode::Up, KeyEventKind::Release)), None);
    }

    #[test]
    fn test_navigation_repeats_but_actions_do_not() {
        assert_eq!(
            action_for_key(key(KeyCode::Down, KeyEventKind::Repeat)),
            Some(Action::Scroll(ScrollMotion::LineDown))
        );
        assert_eq!(action_for_key(key(KeyCode::Char('c'), KeyEventKind::Repeat)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut event = key(KeyCode::Char('c'), KeyEventKind::Press);
        event.modifiers = KeyModifiers::CONTROL;
        assert_eq!(action_for_key(event), Some(Action::Quit));
    }

    #[test]
    fn test_mouse_mapping() {
        assert_eq!(
            action_for_mouse(mouse(MouseEventKind::ScrollUp)),
            Some(Action::Scroll(ScrollMotion::LineUp))
        );
        assert_eq!(
            action_for_mouse(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Action::Touch(true))
        );
        assert_eq!(
            action_for_mouse(mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(Action::Touch(false))
        );
        assert_eq!(action_for_mouse(mouse(MouseEventKind::Moved)), None);
    }
}
