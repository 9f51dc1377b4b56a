mod config;
mod game;
mod input;
mod render;
mod scripted_input;
mod storage;

use std::path::Path;

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::*;
use chrono::{DateTime, Utc};
use config::GameConfig;
use game::{
    Effect, Intent, Phase, Session, SubmitReport,
    round::{RoundGenerator, Vocabulary},
    score::Outcome,
};
use input::{KeyAction, key_action};
use render::{
    Hit, LOG_VISIBLE_ENTRIES, Layout, SCREEN_WIDTH, draw_board, draw_header, draw_log,
    draw_summary, log_panel_top,
};
use scripted_input::ScriptedInput;
use storage::{FileStore, HighScoreRecord, HighScoreWriter, KeyValueStore, MemoryStore};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SCREEN_HEIGHT: i32 = 50;
const LOG_PANEL_TOP: i32 = log_panel_top(SCREEN_HEIGHT);
const LOG_MAX_ENTRIES: usize = LOG_VISIBLE_ENTRIES;

struct ScrambleState {
    session: Session,
    writer: Option<HighScoreWriter>,
    high_score_at: Option<DateTime<Utc>>,
    script: Option<ScriptedInput>,
    message_log: Vec<String>,
}

impl GameState for ScrambleState {
    fn tick(&mut self, ctx: &mut BTerm) {
        self.handle_input(ctx);
        ctx.cls();
        self.draw_scene(ctx);
    }
}

impl ScrambleState {
    fn new(config: &GameConfig) -> Self {
        let store: Box<dyn KeyValueStore> = match FileStore::new(&config.store_path) {
            Ok(store) => {
                tracing::info!("high score store: {}", store.path().display());
                Box::new(store)
            }
            Err(err) => {
                tracing::warn!(
                    "cannot open {}: {err}; high score will not survive this session",
                    config.store_path.display()
                );
                Box::new(MemoryStore::new())
            }
        };
        let record = HighScoreRecord::load(store.as_ref());
        let writer = HighScoreWriter::spawn(store, record.score)
            .map_err(|err| tracing::error!("failed to start high score writer: {err}"))
            .ok();

        let rng = match config.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::new(),
        };
        let session = Session::new(RoundGenerator::new(Vocabulary::animals(), rng), record.score);

        let script = config.script.as_deref().and_then(|path| {
            ScriptedInput::from_file(path)
                .map_err(|err| tracing::warn!("cannot read script {}: {err}", path.display()))
                .ok()
        });

        let mut state = Self {
            session,
            writer,
            high_score_at: record.recorded_at,
            script,
            message_log: Vec::new(),
        };
        state.push_log_entry(format!("New game. Best so far: {}", record.score));
        state
    }

    fn next_key(&mut self, ctx: &BTerm) -> Option<VirtualKeyCode> {
        match self.script.as_mut() {
            Some(script) if !script.is_exhausted() => script.next_key(),
            _ => ctx.key,
        }
    }

    fn handle_input(&mut self, ctx: &mut BTerm) {
        let key = self.next_key(ctx);
        if self.handle_key(key) {
            ctx.quit();
            return;
        }
        if ctx.left_click {
            let (x, y) = ctx.mouse_pos();
            self.handle_click(Point::new(x, y));
        }
    }

    /// Returns true when the player asked to quit.
    fn handle_key(&mut self, key: Option<VirtualKeyCode>) -> bool {
        match self.session.phase() {
            Phase::Playing => {
                if let Some(action) = key.and_then(key_action) {
                    let effect = match action {
                        KeyAction::Letter(letter) => self.session.apply(Intent::LetterTapped(letter)),
                        KeyAction::Tile(idx) => self.session.tap_tile(idx),
                        KeyAction::Clear => self.session.apply(Intent::ClearPressed),
                        KeyAction::Submit => self.session.apply(Intent::SubmitPressed),
                        KeyAction::Finish => self.session.apply(Intent::FinishPressed),
                    };
                    self.resolve_effect(effect);
                }
                false
            }
            Phase::Finished => match key {
                Some(VirtualKeyCode::Return) | Some(VirtualKeyCode::NumpadEnter) => {
                    self.session.restart();
                    self.push_log_entry("Started a new game.");
                    false
                }
                Some(VirtualKeyCode::Escape) => true,
                _ => false,
            },
        }
    }

    /// Resolves a click against the round that is current after key input.
    fn handle_click(&mut self, point: Point) {
        if self.session.phase() != Phase::Playing {
            return;
        }
        let layout = Layout::new(self.session.round().scrambled_letters.len(), SCREEN_WIDTH);
        let Some(hit) = layout.hit(point) else {
            return;
        };
        let effect = match hit {
            Hit::Tile(idx) => self.session.tap_tile(idx),
            Hit::Clear => self.session.apply(Intent::ClearPressed),
            Hit::Submit => self.session.apply(Intent::SubmitPressed),
            Hit::Finish => self.session.apply(Intent::FinishPressed),
        };
        self.resolve_effect(effect);
    }

    fn resolve_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Submitted(report) => self.record_submission(report),
            Effect::Finished => self.push_log_entry("Game finished."),
        }
    }

    fn record_submission(&mut self, report: SubmitReport) {
        match (report.outcome, report.solved_word) {
            (Outcome::Correct, Some(word)) => {
                self.push_log_entry(format!("Solved '{word}' for +{}", report.points))
            }
            _ if report.guess.is_empty() => self.push_log_entry("Nothing to submit."),
            _ => self.push_log_entry(format!("'{}' is not the animal.", report.guess)),
        }

        if let Some(score) = report.persist_high_score {
            self.push_log_entry(format!("New high score: {score}"));
            let Some(writer) = self.writer.as_ref() else {
                tracing::warn!(score, "no high score writer; score not saved");
                self.high_score_at = None;
                return;
            };
            match writer.submit(score) {
                Ok(recorded_at) => self.high_score_at = Some(recorded_at),
                Err(err) => {
                    tracing::warn!(score, "high score not queued: {err}");
                    self.high_score_at = None;
                }
            }
        }
    }

    fn draw_scene(&self, ctx: &mut BTerm) {
        let scores = self.session.scores();
        draw_header(ctx, scores);
        match self.session.phase() {
            Phase::Playing => {
                let round = self.session.round();
                let layout = Layout::new(round.scrambled_letters.len(), SCREEN_WIDTH);
                draw_board(
                    ctx,
                    &layout,
                    &round.scrambled_letters,
                    self.session.guess(),
                    self.session.error(),
                );
            }
            Phase::Finished => draw_summary(ctx, scores, self.high_score_at),
        }
        draw_log(ctx, &self.message_log, LOG_PANEL_TOP);
    }

    fn push_log_entry<S: Into<String>>(&mut self, entry: S) {
        self.message_log.insert(0, entry.into());
        self.message_log.truncate(LOG_MAX_ENTRIES);
    }
}

/// Logs go to `<log_dir>/scramble.log`; the console owns the terminal.
fn setup_logging(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "scramble.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: {}/scramble.log", log_dir.display());
    Ok(guard)
}

fn main() -> BError {
    let config = GameConfig::from_env();
    let _log_guard = setup_logging(&config.log_dir)
        .map_err(|err| eprintln!("Logging disabled: {err}"))
        .ok();

    let context = BTermBuilder::simple80x50()
        .with_title("Animal Scramble")
        .build()?;
    let game_state = ScrambleState::new(&config);
    main_loop(context, game_state)
}
