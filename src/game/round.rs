use bracket_random::prelude::RandomNumberGenerator;
use smallvec::SmallVec;

pub const ANIMALS: [&str; 5] = ["dog", "cat", "lion", "tiger", "elephant"];

pub type Letters = SmallVec<[char; 8]>;

/// Ordered, non-empty list of lowercase target words.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Panics on an empty word list; rounds cannot be generated without one.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .collect();
        assert!(!words.is_empty(), "vocabulary must contain at least one word");
        Self { words }
    }

    pub fn animals() -> Self {
        Self::new(ANIMALS)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub target_word: String,
    pub scrambled_letters: Letters,
}

impl Round {
    pub fn letter_at(&self, idx: usize) -> Option<char> {
        self.scrambled_letters.get(idx).copied()
    }

    pub fn word_score(&self) -> u32 {
        self.target_word.chars().count() as u32 * 10
    }
}

pub struct RoundGenerator {
    vocabulary: Vocabulary,
    rng: RandomNumberGenerator,
}

impl RoundGenerator {
    pub fn new(vocabulary: Vocabulary, rng: RandomNumberGenerator) -> Self {
        Self { vocabulary, rng }
    }

    pub fn seeded(vocabulary: Vocabulary, seed: u64) -> Self {
        Self::new(vocabulary, RandomNumberGenerator::seeded(seed))
    }

    pub fn start_round(&mut self) -> Round {
        let idx = self.rng.range(0, self.vocabulary.len());
        let target_word = self.vocabulary.words[idx].clone();
        let scrambled_letters = scramble(&target_word, &mut self.rng);
        tracing::debug!(word = %target_word, "started round");
        Round {
            target_word,
            scrambled_letters,
        }
    }
}

/// Uniform Fisher-Yates shuffle of the word's characters.
pub fn scramble(word: &str, rng: &mut RandomNumberGenerator) -> Letters {
    let mut letters: Letters = word.chars().collect();
    for i in (1..letters.len()).rev() {
        let j = rng.range(0, i + 1);
        letters.swap(i, j);
    }
    letters
}
