//! Key bindings.
//!
//! Fixed table: arrows and `h`/`j`/`k`/`l` move, `q` quits. Anything else is
//! ignored. Modifiers other than Shift disqualify a binding so terminal
//! shortcuts such as Alt-j never move the viewport.

use core_events::{Command, Direction, KeyCode, KeyEvent, KeyModifiers};

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) {
        return None;
    }
    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(Direction::Right),
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}
