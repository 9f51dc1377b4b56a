use bracket_terminal::prelude::VirtualKeyCode;

/// What a key press means on the game screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Letter(char),
    Tile(usize),
    Clear,
    Submit,
    Finish,
}

const LETTER_KEYS: [(char, VirtualKeyCode); 26] = [
    ('a', VirtualKeyCode::A),
    ('b', VirtualKeyCode::B),
    ('c', VirtualKeyCode::C),
    ('d', VirtualKeyCode::D),
    ('e', VirtualKeyCode::E),
    ('f', VirtualKeyCode::F),
    ('g', VirtualKeyCode::G),
    ('h', VirtualKeyCode::H),
    ('i', VirtualKeyCode::I),
    ('j', VirtualKeyCode::J),
    ('k', VirtualKeyCode::K),
    ('l', VirtualKeyCode::L),
    ('m', VirtualKeyCode::M),
    ('n', VirtualKeyCode::N),
    ('o', VirtualKeyCode::O),
    ('p', VirtualKeyCode::P),
    ('q', VirtualKeyCode::Q),
    ('r', VirtualKeyCode::R),
    ('s', VirtualKeyCode::S),
    ('t', VirtualKeyCode::T),
    ('u', VirtualKeyCode::U),
    ('v', VirtualKeyCode::V),
    ('w', VirtualKeyCode::W),
    ('x', VirtualKeyCode::X),
    ('y', VirtualKeyCode::Y),
    ('z', VirtualKeyCode::Z),
];

const TILE_KEYS: [VirtualKeyCode; 9] = [
    VirtualKeyCode::Key1,
    VirtualKeyCode::Key2,
    VirtualKeyCode::Key3,
    VirtualKeyCode::Key4,
    VirtualKeyCode::Key5,
    VirtualKeyCode::Key6,
    VirtualKeyCode::Key7,
    VirtualKeyCode::Key8,
    VirtualKeyCode::Key9,
];

pub fn key_action(key: VirtualKeyCode) -> Option<KeyAction> {
    match key {
        VirtualKeyCode::Back | VirtualKeyCode::Delete => Some(KeyAction::Clear),
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => Some(KeyAction::Submit),
        VirtualKeyCode::Escape => Some(KeyAction::Finish),
        _ => letter_for_key(key)
            .map(KeyAction::Letter)
            .or_else(|| tile_for_key(key).map(KeyAction::Tile)),
    }
}

pub fn letter_for_key(key: VirtualKeyCode) -> Option<char> {
    LETTER_KEYS
        .iter()
        .find(|(_, code)| *code == key)
        .map(|(letter, _)| *letter)
}

pub fn key_for_letter(letter: char) -> Option<VirtualKeyCode> {
    let letter = letter.to_ascii_lowercase();
    LETTER_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == letter)
        .map(|(_, code)| *code)
}

pub fn tile_for_key(key: VirtualKeyCode) -> Option<usize> {
    TILE_KEYS.iter().position(|code| *code == key)
}

pub fn key_for_tile(idx: usize) -> Option<VirtualKeyCode> {
    TILE_KEYS.get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_lowercase_taps() {
        assert_eq!(key_action(VirtualKeyCode::D), Some(KeyAction::Letter('d')));
        assert_eq!(key_action(VirtualKeyCode::Z), Some(KeyAction::Letter('z')));
        assert_eq!(key_for_letter('G'), Some(VirtualKeyCode::G));
    }

    #[test]
    fn digits_tap_tiles_from_one() {
        assert_eq!(key_action(VirtualKeyCode::Key1), Some(KeyAction::Tile(0)));
        assert_eq!(key_action(VirtualKeyCode::Key9), Some(KeyAction::Tile(8)));
        assert_eq!(key_for_tile(2), Some(VirtualKeyCode::Key3));
        assert_eq!(key_for_tile(9), None);
    }

    #[test]
    fn control_keys() {
        assert_eq!(key_action(VirtualKeyCode::Back), Some(KeyAction::Clear));
        assert_eq!(key_action(VirtualKeyCode::Return), Some(KeyAction::Submit));
        assert_eq!(key_action(VirtualKeyCode::Escape), Some(KeyAction::Finish));
        assert_eq!(key_action(VirtualKeyCode::Tab), None);
    }
}
