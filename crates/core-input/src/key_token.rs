use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Translate a crossterm event into a normalized input event.
///
/// Returns `None` for events the viewer never reacts to: key releases,
/// mouse, focus, paste and key codes without a [`KeyCode`] counterpart.
pub(crate) fn map_event(event: &CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(key) => map_key_event(key),
        CEvent::Resize(w, h) => Some(InputEvent::Resize(*w, *h)),
        _ => None,
    }
}

pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<InputEvent> {
    if !matches!(event.kind, CKeyEventKind::Press | CKeyEventKind::Repeat) {
        return None;
    }
    if matches!(event.code, CKeyCode::Char('c' | 'C'))
        && event.modifiers.contains(CKeyModifiers::CONTROL)
    {
        return Some(InputEvent::CtrlC);
    }
    let code = map_key_code(&event.code)?;
    Some(InputEvent::Key(KeyEvent {
        code,
        mods: map_mods(event.modifiers),
    }))
}

pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        _ => return None,
    };
    Some(code)
}

pub(crate) fn map_mods(m: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: CKeyCode, mods: CKeyModifiers) -> CKeyEvent {
        CKeyEvent::new(code, mods)
    }

    #[test]
    fn ctrl_c_is_distinct() {
        let ev = press(CKeyCode::Char('c'), CKeyModifiers::CONTROL);
        assert_eq!(map_key_event(&ev), Some(InputEvent::CtrlC));
        let plain = press(CKeyCode::Char('c'), CKeyModifiers::NONE);
        assert_eq!(
            map_key_event(&plain),
            Some(InputEvent::Key(KeyEvent::plain(KeyCode::Char('c'))))
        );
    }

    #[test]
    fn release_is_dropped() {
        let mut ev = press(CKeyCode::Down, CKeyModifiers::NONE);
        ev.kind = CKeyEventKind::Release;
        assert_eq!(map_key_event(&ev), None);
        ev.kind = CKeyEventKind::Repeat;
        assert_eq!(
            map_key_event(&ev),
            Some(InputEvent::Key(KeyEvent::plain(KeyCode::Down)))
        );
    }

    #[test]
    fn modifiers_are_carried() {
        let ev = press(CKeyCode::Left, CKeyModifiers::SHIFT | CKeyModifiers::ALT);
        let Some(InputEvent::Key(k)) = map_key_event(&ev) else {
            panic!("expected key event");
        };
        assert_eq!(k.mods, KeyModifiers::SHIFT | KeyModifiers::ALT);
    }

    #[test]
    fn unsupported_codes_and_events() {
        assert_eq!(map_key_code(&CKeyCode::F(5)), None);
        assert_eq!(map_key_code(&CKeyCode::Insert), None);
        assert_eq!(map_key_code(&CKeyCode::Enter), None);
        assert_eq!(map_key_code(&CKeyCode::PageDown), None);
        assert_eq!(map_event(&CEvent::FocusGained), None);
        assert_eq!(
            map_event(&CEvent::Resize(100, 40)),
            Some(InputEvent::Resize(100, 40))
        );
    }
}
