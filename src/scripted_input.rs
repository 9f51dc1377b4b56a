use bracket_terminal::prelude::VirtualKeyCode;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::input::{key_for_letter, key_for_tile};

/// Key presses replayed in place of the keyboard, one per frame.
pub struct ScriptedInput {
    script_commands: Vec<VirtualKeyCode>,
    current_command_index: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut script_commands = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            for char_code in trimmed_line.chars() {
                if let Some(key) = char_to_virtualkeycode(char_code) {
                    script_commands.push(key);
                } else {
                    tracing::warn!("unknown key in script: {char_code:?}");
                }
            }
        }

        Ok(Self {
            script_commands,
            current_command_index: 0,
        })
    }

    pub fn next_key(&mut self) -> Option<VirtualKeyCode> {
        let key = self.script_commands.get(self.current_command_index).copied()?;
        self.current_command_index += 1;
        Some(key)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_command_index >= self.script_commands.len()
    }
}

fn char_to_virtualkeycode(c: char) -> Option<VirtualKeyCode> {
    match c {
        '-' => Some(VirtualKeyCode::Back),   // Clear
        '=' => Some(VirtualKeyCode::Return), // Submit
        '!' => Some(VirtualKeyCode::Escape), // Finish
        '1'..='9' => key_for_tile(c as usize - '1' as usize),
        c if c.is_ascii_alphabetic() => key_for_letter(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn script(text: &str) -> ScriptedInput {
        ScriptedInput::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn replays_keys_in_order() {
        let mut input = script("# solve one word\ncat=\n\n12-!\n");
        let keys: Vec<_> = std::iter::from_fn(|| input.next_key()).collect();
        assert_eq!(
            keys,
            vec![
                VirtualKeyCode::C,
                VirtualKeyCode::A,
                VirtualKeyCode::T,
                VirtualKeyCode::Return,
                VirtualKeyCode::Key1,
                VirtualKeyCode::Key2,
                VirtualKeyCode::Back,
                VirtualKeyCode::Escape,
            ]
        );
        assert!(input.is_exhausted());
        assert_eq!(input.next_key(), None);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let mut input = script("d?o g");
        assert_eq!(input.next_key(), Some(VirtualKeyCode::D));
        assert_eq!(input.next_key(), Some(VirtualKeyCode::O));
        assert_eq!(input.next_key(), Some(VirtualKeyCode::G));
        assert_eq!(input.next_key(), None);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ScriptedInput::from_file("/definitely/not/here.txt").is_err());
    }
}
