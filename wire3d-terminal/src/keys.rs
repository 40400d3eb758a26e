/// Translate crossterm key codes into the viewer's key identifiers
use crossterm::event::KeyCode;

/// Key identifier for a crossterm key, named the way browsers name
/// `KeyboardEvent.key`. Keys the viewer never binds map to `None`.
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Home => "Home",
        KeyCode::Char(c) => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}
