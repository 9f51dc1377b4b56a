use super::round::{Round, RoundGenerator};

pub const INCORRECT_MESSAGE: &str = "Incorrect animal name. Please try again.";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub current_score: u32,
    pub high_score: u32,
}

impl ScoreState {
    pub const fn new(high_score: u32) -> Self {
        Self {
            current_score: 0,
            high_score,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Clone, Debug)]
pub struct SubmitResult {
    pub outcome: Outcome,
    pub new_score: u32,
    pub new_high_score: u32,
    pub next_round: Option<Round>,
    /// Set when the high score was raised and must be written to storage.
    pub persist_high_score: Option<u32>,
}

impl SubmitResult {
    pub fn score_state(&self) -> ScoreState {
        ScoreState {
            current_score: self.new_score,
            high_score: self.new_high_score,
        }
    }
}

pub struct ScoreKeeper;

impl ScoreKeeper {
    /// Scores a guess against the round. `new_score` is computed once and the
    /// same value is both compared with the high score and stored.
    pub fn submit(
        guess: &str,
        round: &Round,
        scores: ScoreState,
        generator: &mut RoundGenerator,
    ) -> SubmitResult {
        if guess.to_lowercase() != round.target_word {
            return SubmitResult {
                outcome: Outcome::Incorrect,
                new_score: scores.current_score,
                new_high_score: scores.high_score,
                next_round: None,
                persist_high_score: None,
            };
        }

        let new_score = scores.current_score.saturating_add(round.word_score());
        let raised = new_score > scores.high_score;
        let new_high_score = if raised { new_score } else { scores.high_score };

        SubmitResult {
            outcome: Outcome::Correct,
            new_score,
            new_high_score,
            next_round: Some(generator.start_round()),
            persist_high_score: raised.then_some(new_high_score),
        }
    }
}
