//! Background writer for high scores.
//!
//! Writes are queued on a channel and applied by a single thread in the
//! order they were submitted. The thread also remembers the highest value it
//! has written and drops anything that would not raise it, so a late write
//! can never lower the stored score.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use super::{HighScoreRecord, KeyValueStore, Result, StorageError};

enum WriterCommand {
    Record(HighScoreRecord),
}

pub struct HighScoreWriter {
    sender: Option<Sender<WriterCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl HighScoreWriter {
    /// `floor` is the value already in storage; only higher scores are written.
    pub fn spawn(store: Box<dyn KeyValueStore>, floor: u32) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("high-score-writer".into())
            .spawn(move || run(store, receiver, floor))?;
        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queues `score` for writing and returns the timestamp it will be stored with.
    pub fn submit(&self, score: u32) -> Result<DateTime<Utc>> {
        let recorded_at = Utc::now();
        let record = HighScoreRecord {
            score,
            recorded_at: Some(recorded_at),
        };
        self.sender
            .as_ref()
            .ok_or(StorageError::WriterClosed)?
            .send(WriterCommand::Record(record))
            .map_err(|_| StorageError::WriterClosed)?;
        Ok(recorded_at)
    }

    /// Waits for queued writes to land and stops the thread.
    pub fn shutdown(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("high score writer thread panicked");
            }
        }
    }
}

impl Drop for HighScoreWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(mut store: Box<dyn KeyValueStore>, receiver: Receiver<WriterCommand>, floor: u32) {
    let mut last_written = floor;
    for command in receiver {
        match command {
            WriterCommand::Record(record) => {
                if record.score <= last_written {
                    debug!(
                        score = record.score,
                        last_written, "skipping stale high score write"
                    );
                    continue;
                }
                match record.save(store.as_mut()) {
                    Ok(()) => {
                        last_written = record.score;
                        info!(score = record.score, "saved high score");
                    }
                    Err(err) => error!(score = record.score, "error saving high score: {err}"),
                }
            }
        }
    }
    debug!("high score writer stopped");
}
