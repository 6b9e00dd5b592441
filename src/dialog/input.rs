//! Keyboard translation
//!
//! Translates key presses into dialog events for the focused control.
//! Edit boxes accept Emacs-style bindings.

use super::controls::{ControlId, ControlKind, EditAction, SelectAction};
use super::Event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translate a key press into a dialog event
pub fn translate_key(key: KeyEvent, focus: ControlId) -> Option<Event> {
    match key.code {
        KeyCode::Esc => return Some(Event::Command(ControlId::Cancel)),
        KeyCode::Tab => return Some(Event::FocusNext),
        KeyCode::BackTab => return Some(Event::FocusPrev),
        KeyCode::F(1) => return Some(Event::Command(ControlId::Help)),
        // OK is the default button
        KeyCode::Enter => {
            let target = match focus {
                ControlId::Cancel | ControlId::Help => focus,
                _ => ControlId::Ok,
            };
            return Some(Event::Command(target));
        }
        _ => {}
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match focus.kind() {
        ControlKind::Edit | ControlKind::ComboEdit => translate_edit_key(key, focus),
        ControlKind::ComboList => {
            let action = match key.code {
                KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => SelectAction::Prev,
                KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => SelectAction::Next,
                KeyCode::Home => SelectAction::Index(0),
                _ => return None,
            };
            Some(Event::Select(focus, action))
        }
        ControlKind::Radio | ControlKind::CheckBox | ControlKind::Button => match key.code {
            KeyCode::Char(' ') => Some(Event::Command(focus)),
            KeyCode::Up | KeyCode::Left => Some(Event::FocusPrev),
            KeyCode::Down | KeyCode::Right => Some(Event::FocusNext),
            _ => None,
        },
        ControlKind::Label => None,
    }
}

fn translate_edit_key(key: KeyEvent, focus: ControlId) -> Option<Event> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char(c) if ctrl => match c {
            'a' => EditAction::Home,
            'e' => EditAction::End,
            'b' => EditAction::Left,
            'f' => EditAction::Right,
            'd' => EditAction::Delete,
            'h' => EditAction::Backspace,
            'k' => EditAction::KillToEnd,
            'u' => EditAction::KillToStart,
            _ => return None,
        },
        KeyCode::Char(c) => EditAction::Insert(c),
        KeyCode::Backspace => EditAction::Backspace,
        KeyCode::Delete => EditAction::Delete,
        KeyCode::Left => EditAction::Left,
        KeyCode::Right => EditAction::Right,
        KeyCode::Home => EditAction::Home,
        KeyCode::End => EditAction::End,
        KeyCode::Up if focus.kind() == ControlKind::ComboEdit => {
            return Some(Event::Select(focus, SelectAction::Prev))
        }
        KeyCode::Down if focus.kind() == ControlKind::ComboEdit => {
            return Some(Event::Select(focus, SelectAction::Next))
        }
        KeyCode::Up => return Some(Event::FocusPrev),
        KeyCode::Down => return Some(Event::FocusNext),
        _ => return None,
    };
    Some(Event::Edit(focus, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_global_keys() {
        assert_eq!(
            translate_key(key(KeyCode::Esc), ControlId::HostName),
            Some(Event::Command(ControlId::Cancel))
        );
        assert_eq!(
            translate_key(key(KeyCode::Tab), ControlId::HostName),
            Some(Event::FocusNext)
        );
        assert_eq!(
            translate_key(key(KeyCode::F(1)), ControlId::Com),
            Some(Event::Command(ControlId::Help))
        );
    }

    #[test]
    fn test_enter_is_default_button() {
        assert_eq!(
            translate_key(key(KeyCode::Enter), ControlId::TcpPort),
            Some(Event::Command(ControlId::Ok))
        );
        assert_eq!(
            translate_key(key(KeyCode::Enter), ControlId::Cancel),
            Some(Event::Command(ControlId::Cancel))
        );
        assert_eq!(
            translate_key(key(KeyCode::Enter), ControlId::Help),
            Some(Event::Command(ControlId::Help))
        );
    }

    #[test]
    fn test_typing_in_edit_box() {
        assert_eq!(
            translate_key(key(KeyCode::Char('x')), ControlId::HostName),
            Some(Event::Edit(ControlId::HostName, EditAction::Insert('x')))
        );
        assert_eq!(
            translate_key(key(KeyCode::Backspace), ControlId::TcpPort),
            Some(Event::Edit(ControlId::TcpPort, EditAction::Backspace))
        );
    }

    #[test]
    fn test_emacs_bindings() {
        assert_eq!(
            translate_key(ctrl('a'), ControlId::HostName),
            Some(Event::Edit(ControlId::HostName, EditAction::Home))
        );
        assert_eq!(
            translate_key(ctrl('k'), ControlId::HostName),
            Some(Event::Edit(ControlId::HostName, EditAction::KillToEnd))
        );
        assert_eq!(translate_key(ctrl('v'), ControlId::HostName), None);
    }

    #[test]
    fn test_history_navigation_only_on_host_name() {
        assert_eq!(
            translate_key(key(KeyCode::Down), ControlId::HostName),
            Some(Event::Select(ControlId::HostName, SelectAction::Next))
        );
        assert_eq!(
            translate_key(key(KeyCode::Down), ControlId::TcpPort),
            Some(Event::FocusNext)
        );
    }

    #[test]
    fn test_lists_and_buttons() {
        assert_eq!(
            translate_key(key(KeyCode::Char('j')), ControlId::Protocol),
            Some(Event::Select(ControlId::Protocol, SelectAction::Next))
        );
        assert_eq!(
            translate_key(key(KeyCode::Char(' ')), ControlId::Serial),
            Some(Event::Command(ControlId::Serial))
        );
        assert_eq!(
            translate_key(key(KeyCode::Char(' ')), ControlId::Telnet),
            Some(Event::Command(ControlId::Telnet))
        );
        assert_eq!(translate_key(key(KeyCode::Char('x')), ControlId::Ok), None);
    }
}
