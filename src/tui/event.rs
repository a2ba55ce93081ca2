use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C: quits from anywhere.
    ForceQuit,
    Escape,
    Submit,
    InputChar(char),
    Backspace,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    NextField,
    PrevField,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }

    match event::read() {
        Ok(Event::Key(key_event)) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            map_key(key_event.modifiers, key_event.code)
        }
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    let chorded = modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match (modifiers, code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ForceQuit),
        // Other Ctrl/Alt chords are not text and have no bindings
        (_, KeyCode::Char(_)) if chorded => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Tab) => Some(TuiEvent::NextField),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevField),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_is_force_quit() {
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::Char('c')),
            Some(TuiEvent::InputChar('c'))
        );
    }

    #[test]
    fn test_modified_chars_are_not_input() {
        assert_eq!(map_key(KeyModifiers::CONTROL, KeyCode::Char('d')), None);
        assert_eq!(map_key(KeyModifiers::CONTROL, KeyCode::Char('a')), None);
        assert_eq!(map_key(KeyModifiers::ALT, KeyCode::Char('n')), None);
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::Char('A')),
            Some(TuiEvent::InputChar('A'))
        );
        assert_eq!(
            map_key(KeyModifiers::CONTROL | KeyModifiers::SHIFT, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
    }

    #[test]
    fn test_shift_tab_is_prev_field() {
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::BackTab),
            Some(TuiEvent::PrevField)
        );
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::F(1)), None);
    }
}
