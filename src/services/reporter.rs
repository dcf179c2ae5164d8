//=========================================================================
// Score Reporter
//=========================================================================
//
// Fire-and-forget final score delivery.
//
// Architecture:
//   game thread ──report_score()──> channel ──> worker thread ──> sink
//
// The game never waits for the sink. Dropping the reporter closes the
// channel; the worker drains what is left and is joined.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Sender};
use log::{info, warn};
use serde::Serialize;

//=== Internal Dependencies ===============================================

use crate::game::ScoreReporter;

//=== ScoreReport =========================================================

/// One finished game, as delivered to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub score: u32,
    pub game_id: u32,
}

//=== ChannelReporter =====================================================

pub struct ChannelReporter {
    sender: Option<Sender<ScoreReport>>,
    worker: Option<JoinHandle<()>>,
}

impl ChannelReporter {
    /// Starts a worker thread that hands every report to `sink`.
    pub fn spawn<F>(mut sink: F) -> Self
    where
        F: FnMut(ScoreReport) + Send + 'static,
    {
        let (sender, receiver) = unbounded::<ScoreReport>();

        let worker = thread::Builder::new()
            .name("score-reporter".into())
            .spawn(move || {
                for report in receiver {
                    sink(report);
                }
            });

        match worker {
            Ok(handle) => Self {
                sender: Some(sender),
                worker: Some(handle),
            },
            Err(e) => {
                warn!(target: "telemetry", "Could not start reporter thread: {}", e);
                Self {
                    sender: None,
                    worker: None,
                }
            }
        }
    }

    /// Reporter whose sink logs each report as RON on target `telemetry`.
    pub fn logging() -> Self {
        Self::spawn(|report| match ron::ser::to_string(&report) {
            Ok(text) => info!(target: "telemetry", "Score report {}", text),
            Err(e) => warn!(target: "telemetry", "Could not encode {:?}: {}", report, e),
        })
    }
}

impl ScoreReporter for ChannelReporter {
    fn report_score(&mut self, score: u32, game_id: u32) {
        let report = ScoreReport { score, game_id };

        let sent = self
            .sender
            .as_ref()
            .map(|sender| sender.send(report).is_ok())
            .unwrap_or(false);

        if !sent {
            warn!(target: "telemetry", "Reporter closed, dropping {:?}", report);
        }
    }
}

impl Drop for ChannelReporter {
    fn drop(&mut self) {
        drop(self.sender.take());

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(target: "telemetry", "Reporter sink panicked");
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
