//! Async driver that feeds timer ticks and pointer input into a session.

use crate::phases::{GameSummary, Phase};
use crate::session::PuzzleSession;
use crate::types::Coord;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep_until};
use tracing::{debug, info, instrument};

/// Pointer input forwarded from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Pointer pressed on a cell.
    Press(Coord),
    /// Pointer moved onto a cell while pressed.
    Drag(Coord),
    /// Pointer released.
    Release,
    /// Cell clicked (click-click selection).
    Click(Coord),
    /// Pointer left the grid.
    Cancel,
    /// Player quit.
    Quit,
}

/// How [`run`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The game finished and its summary was emitted.
    Completed(GameSummary),
    /// The player quit, or the input channel closed, before the summary went out.
    Exited,
}

/// Periodic tick source running on its own task.
pub struct Ticker;

impl Ticker {
    /// Spawns a task sending `()` every `period`, first tick one period from now.
    ///
    /// Must be called inside a tokio runtime. The task stops when the handle
    /// is cancelled or dropped, or when the receiver is dropped.
    #[instrument]
    pub fn spawn(period: Duration) -> (TickerHandle, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(()).await.is_err() {
                    debug!("Tick receiver dropped, stopping ticker");
                    break;
                }
            }
        });
        (TickerHandle { task }, rx)
    }
}

/// Cancellation handle for a [`Ticker`]. Dropping it stops the ticks.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Stops the ticker.
    pub fn cancel(self) {
        self.task.abort();
    }

    /// Returns true once the ticker task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Drives `session` until it finishes or the player quits.
///
/// Starts the session if it is still waiting. Ticks arrive every
/// [`PuzzleSession::tick_period`] while playing; after the last word is
/// found the summary is held for [`PuzzleSession::finish_hold`]. Input
/// received during the hold is ignored.
#[instrument(skip_all)]
pub async fn run(
    session: &mut PuzzleSession,
    mut inputs: mpsc::UnboundedReceiver<Input>,
) -> RunOutcome {
    if session.is_exited() {
        return RunOutcome::Exited;
    }
    session.start();

    let (ticker, mut ticks) = Ticker::spawn(session.tick_period());
    let mut ticker = Some(ticker);
    let mut deadline: Option<Instant> = None;

    loop {
        if session.phase() == Phase::Finished {
            if let Some(handle) = ticker.take() {
                handle.cancel();
            }
            if session.has_pending_end() {
                if deadline.is_none() {
                    debug!(hold = ?session.finish_hold(), "Holding end summary");
                    deadline = Some(Instant::now() + session.finish_hold());
                }
            } else if let Some(summary) = session.summary() {
                info!(reason = %summary.reason(), "Run completed");
                return RunOutcome::Completed(summary.clone());
            }
        }

        tokio::select! {
            Some(()) = ticks.recv(), if session.phase() == Phase::Playing => {
                session.tick();
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                session.release_hold();
            }
            input = inputs.recv() => match input {
                Some(Input::Quit) | None => {
                    session.exit();
                    return RunOutcome::Exited;
                }
                Some(input) => apply(session, input),
            },
        }
    }
}

fn apply(session: &mut PuzzleSession, input: Input) {
    match input {
        Input::Press(coord) => session.press(coord),
        Input::Drag(coord) => {
            session.drag(coord);
        }
        Input::Release => {
            session.release();
        }
        Input::Click(coord) => {
            session.click(coord);
        }
        Input::Cancel => session.cancel_selection(),
        Input::Quit => session.exit(),
    }
}
