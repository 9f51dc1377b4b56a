pub mod guess;
pub mod round;
pub mod score;

use self::{
    guess::GuessAccumulator,
    round::{Round, RoundGenerator},
    score::{INCORRECT_MESSAGE, Outcome, ScoreKeeper, ScoreState},
};

/// User intents routed in from the view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    LetterTapped(char),
    ClearPressed,
    SubmitPressed,
    FinishPressed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReport {
    pub outcome: Outcome,
    pub guess: String,
    pub solved_word: Option<String>,
    pub points: u32,
    pub persist_high_score: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Submitted(SubmitReport),
    Finished,
}

/// One play session: the live round, the guess being built and the scores.
pub struct Session {
    generator: RoundGenerator,
    round: Round,
    guess: GuessAccumulator,
    scores: ScoreState,
    error: Option<&'static str>,
    phase: Phase,
}

impl Session {
    pub fn new(mut generator: RoundGenerator, high_score: u32) -> Self {
        let round = generator.start_round();
        Self {
            generator,
            round,
            guess: GuessAccumulator::new(),
            scores: ScoreState::new(high_score),
            error: None,
            phase: Phase::Playing,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn guess(&self) -> &str {
        self.guess.current()
    }

    pub fn scores(&self) -> ScoreState {
        self.scores
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn apply(&mut self, intent: Intent) -> Effect {
        if self.phase == Phase::Finished {
            tracing::debug!(?intent, "ignoring intent after finish");
            return Effect::None;
        }
        match intent {
            Intent::LetterTapped(letter) => {
                self.guess.append(letter);
                Effect::None
            }
            Intent::ClearPressed => {
                self.guess.clear();
                self.error = None;
                Effect::None
            }
            Intent::SubmitPressed => Effect::Submitted(self.submit()),
            Intent::FinishPressed => {
                self.phase = Phase::Finished;
                tracing::info!(
                    score = self.scores.current_score,
                    high_score = self.scores.high_score,
                    "session finished"
                );
                Effect::Finished
            }
        }
    }

    /// Taps the scrambled tile at `idx`; out-of-range taps are ignored.
    pub fn tap_tile(&mut self, idx: usize) -> Effect {
        match self.round.letter_at(idx) {
            Some(letter) => self.apply(Intent::LetterTapped(letter)),
            None => Effect::None,
        }
    }

    /// Starts over with a zero score, keeping the high score.
    pub fn restart(&mut self) {
        self.round = self.generator.start_round();
        self.guess.clear();
        self.scores = ScoreState::new(self.scores.high_score);
        self.error = None;
        self.phase = Phase::Playing;
    }

    fn submit(&mut self) -> SubmitReport {
        let guess = self.guess.current().to_string();
        let result = ScoreKeeper::submit(&guess, &self.round, self.scores, &mut self.generator);
        let points = result.new_score - self.scores.current_score;
        self.scores = result.score_state();
        self.guess.clear();

        let solved_word = match (result.outcome, result.next_round) {
            (Outcome::Correct, Some(next)) => {
                self.error = None;
                let solved = std::mem::replace(&mut self.round, next);
                tracing::info!(
                    word = %solved.target_word,
                    points,
                    score = self.scores.current_score,
                    "word solved"
                );
                Some(solved.target_word)
            }
            _ => {
                self.error = Some(INCORRECT_MESSAGE);
                tracing::debug!(%guess, "incorrect guess");
                None
            }
        };

        SubmitReport {
            outcome: result.outcome,
            guess,
            solved_word,
            points,
            persist_high_score: result.persist_high_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::round::Vocabulary;

    fn cat_session(high_score: u32) -> Session {
        Session::new(RoundGenerator::seeded(Vocabulary::new(["cat"]), 5), high_score)
    }

    fn type_word(session: &mut Session, word: &str) {
        for letter in word.chars() {
            session.apply(Intent::LetterTapped(letter));
        }
    }

    #[test]
    fn new_session_starts_empty() {
        let session = cat_session(120);
        assert_eq!(session.guess(), "");
        assert_eq!(session.scores(), ScoreState::new(120));
        assert_eq!(session.error(), None);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.round().target_word, "cat");
    }

    #[test]
    fn solving_cat_requests_write_of_thirty() {
        let mut session = cat_session(0);
        type_word(&mut session, "cat");
        let Effect::Submitted(report) = session.apply(Intent::SubmitPressed) else {
            panic!("expected submit report");
        };
        assert_eq!(report.outcome, Outcome::Correct);
        assert_eq!(report.points, 30);
        assert_eq!(report.solved_word.as_deref(), Some("cat"));
        assert_eq!(report.persist_high_score, Some(30));
        assert_eq!(session.scores().current_score, 30);
        assert_eq!(session.scores().high_score, 30);
        assert_eq!(session.guess(), "");
    }

    #[test]
    fn score_carries_into_next_round() {
        let mut session = cat_session(0);
        type_word(&mut session, "cat");
        session.apply(Intent::SubmitPressed);
        type_word(&mut session, "CAT");
        let Effect::Submitted(report) = session.apply(Intent::SubmitPressed) else {
            panic!("expected submit report");
        };
        assert_eq!(report.persist_high_score, Some(60));
        assert_eq!(session.scores().current_score, 60);
    }

    #[test]
    fn incorrect_guess_sets_error_until_cleared() {
        let mut session = cat_session(10);
        type_word(&mut session, "act");
        let Effect::Submitted(report) = session.apply(Intent::SubmitPressed) else {
            panic!("expected submit report");
        };
        assert_eq!(report.outcome, Outcome::Incorrect);
        assert_eq!(report.points, 0);
        assert_eq!(session.guess(), "");
        assert_eq!(session.error(), Some(INCORRECT_MESSAGE));

        session.apply(Intent::LetterTapped('c'));
        assert_eq!(session.error(), Some(INCORRECT_MESSAGE));

        session.apply(Intent::ClearPressed);
        assert_eq!(session.error(), None);
        session.apply(Intent::ClearPressed);
        assert_eq!(session.guess(), "");
        assert_eq!(session.error(), None);
    }

    #[test]
    fn correct_guess_clears_error() {
        let mut session = cat_session(0);
        session.apply(Intent::SubmitPressed);
        assert!(session.error().is_some());
        type_word(&mut session, "cat");
        session.apply(Intent::SubmitPressed);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn tapping_tiles_appends_scrambled_letters() {
        let mut session = cat_session(0);
        let letters = session.round().scrambled_letters.clone();
        for idx in 0..letters.len() {
            session.tap_tile(idx);
        }
        assert_eq!(session.tap_tile(99), Effect::None);
        assert_eq!(session.guess(), letters.iter().collect::<String>());
    }

    #[test]
    fn finish_freezes_session_until_restart() {
        let mut session = cat_session(40);
        type_word(&mut session, "cat");
        session.apply(Intent::SubmitPressed);
        assert_eq!(session.apply(Intent::FinishPressed), Effect::Finished);
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.apply(Intent::LetterTapped('c')), Effect::None);
        assert_eq!(session.guess(), "");

        session.restart();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.scores(), ScoreState::new(40));
    }
}
