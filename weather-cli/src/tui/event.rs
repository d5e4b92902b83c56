use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{io, time::Duration};

/// Terminal input, already reduced to what the widget understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    InputChar(char),
    Backspace,
    ClearLine,
    Submit,
    Up,
    Down,
    Resize,
}

/// Wait up to `timeout` for the next relevant event.
pub fn poll_event(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    let mapped = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        Event::Resize(..) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(mapped)
}

fn map_key(key: KeyEvent) -> Option<TuiEvent> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(TuiEvent::ClearLine),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Up) => Some(TuiEvent::Up),
        (_, KeyCode::Down | KeyCode::Tab) => Some(TuiEvent::Down),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_shortcuts_take_precedence_over_text() {
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Quit)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ClearLine)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('C'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('C'))
        );
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(TuiEvent::Submit));
        assert_eq!(map_key(key(KeyCode::Tab, KeyModifiers::NONE)), Some(TuiEvent::Down));
        assert_eq!(map_key(key(KeyCode::Up, KeyModifiers::NONE)), Some(TuiEvent::Up));
        assert_eq!(map_key(key(KeyCode::Esc, KeyModifiers::NONE)), Some(TuiEvent::Quit));
        assert_eq!(map_key(key(KeyCode::F(5), KeyModifiers::NONE)), None);
    }
}
