/// Letters picked so far, in tap order. Any character is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuessAccumulator {
    selected: String,
}

impl GuessAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, letter: char) {
        self.selected.push(letter);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn current(&self) -> &str {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_concatenates_in_order() {
        let mut guess = GuessAccumulator::new();
        guess.append('d');
        guess.append('o');
        guess.append('g');
        assert_eq!(guess.current(), "dog");
    }

    #[test]
    fn append_accepts_letters_outside_the_scramble() {
        let mut guess = GuessAccumulator::new();
        for letter in ['z', 'Z', 'z'] {
            guess.append(letter);
        }
        assert_eq!(guess.current(), "zZz");
    }

    #[test]
    fn clear_is_idempotent() {
        let mut guess = GuessAccumulator::new();
        guess.append('c');
        guess.clear();
        assert_eq!(guess.current(), "");
        guess.clear();
        assert_eq!(guess.current(), "");
        assert_eq!(guess, GuessAccumulator::new());
    }
}
