//! Real-time driver for a [`WorkoutSession`].
//!
//! One tokio task owns the session. It multiplexes a one-second interval
//! with a command channel, so every tick and every command runs to
//! completion before the next one is looked at. Nothing else ever touches
//! the session while the runner is alive.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::session::{SessionPhase, SessionSnapshot, WorkoutSession};
use crate::sink::NotificationSink;

const COMMAND_BUFFER: usize = 16;

enum Command {
    Start(oneshot::Sender<Result<SessionEvent, SessionError>>),
    Reset(oneshot::Sender<SessionEvent>),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}

/// Spawns the task that drives a session.
pub struct SessionRunner<S> {
    session: WorkoutSession<S>,
    tick_period: Duration,
}

impl<S> SessionRunner<S>
where
    S: NotificationSink + Send + 'static,
{
    pub fn new(session: WorkoutSession<S>) -> Self {
        Self {
            session,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Override the tick period. One tick is always one countdown second.
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Spawn the runner on the current tokio runtime.
    pub fn spawn(self) -> SessionHandle<S> {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (phase_tx, phase_rx) = watch::channel(self.session.phase());
        let task = tokio::spawn(run(self.session, self.tick_period, commands_rx, phase_tx));
        SessionHandle {
            commands: commands_tx,
            phase: phase_rx,
            task,
        }
    }
}

/// Control side of a spawned session.
pub struct SessionHandle<S> {
    commands: mpsc::Sender<Command>,
    phase: watch::Receiver<SessionPhase>,
    task: JoinHandle<WorkoutSession<S>>,
}

impl<S> SessionHandle<S> {
    /// # Errors
    ///
    /// `AlreadyStarted` if the session is not idle, `RunnerStopped` if the
    /// runner task is gone.
    pub async fn start(&self) -> Result<SessionEvent, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Start(tx)).await?;
        rx.await.map_err(|_| SessionError::RunnerStopped)?
    }

    pub async fn reset(&self) -> Result<SessionEvent, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Reset(tx)).await?;
        rx.await.map_err(|_| SessionError::RunnerStopped)
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| SessionError::RunnerStopped)
    }

    /// Latest phase published by the runner.
    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    /// A receiver that sees every phase change.
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.clone()
    }

    /// Resolves once the session reaches `Complete`.
    pub async fn wait_until_complete(&self) -> Result<(), SessionError> {
        let mut phase = self.phase.clone();
        phase
            .wait_for(|p| *p == SessionPhase::Complete)
            .await
            .map(|_| ())
            .map_err(|_| SessionError::RunnerStopped)
    }

    /// Stop the runner and take the session back.
    pub async fn shutdown(self) -> Result<WorkoutSession<S>, SessionError> {
        // The runner may already have exited; joining reports that.
        let _ = self.commands.send(Command::Shutdown).await;
        self.task.await.map_err(|_| SessionError::RunnerStopped)
    }

    async fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::RunnerStopped)
    }
}

async fn run<S: NotificationSink>(
    mut session: WorkoutSession<S>,
    tick_period: Duration,
    mut commands: mpsc::Receiver<Command>,
    phase: watch::Sender<SessionPhase>,
) -> WorkoutSession<S> {
    let mut ticker = time::interval(tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // No tick at spawn time, even for a session started before `spawn`.
    ticker.reset();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Start(reply)) => {
                    let result = session.start();
                    // First decrement lands one full period after the start.
                    if result.is_ok() {
                        ticker.reset();
                    }
                    let _ = reply.send(result);
                }
                Some(Command::Reset(reply)) => {
                    let _ = reply.send(session.reset());
                }
                Some(Command::Snapshot(reply)) => {
                    let _ = reply.send(session.snapshot());
                }
                Some(Command::Shutdown) | None => {
                    session.reset();
                    phase.send_replace(session.phase());
                    break;
                }
            },
            _ = ticker.tick(), if session.is_running() => {
                if let Some(event) = session.tick() {
                    tracing::trace!(?event, "session transition");
                }
            }
        }
        phase.send_if_modified(|current| {
            let next = session.phase();
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    session
}
