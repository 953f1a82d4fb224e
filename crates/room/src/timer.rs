use super::error::TimerError;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Instant;

/// A single in-flight countdown running in its own task.
///
/// Each [`set`](Timer::set) replaces whatever was pending; when a deadline
/// passes, its payload is delivered exactly once on the expiry channel
/// handed to [`Timer::new`]. Payloads that arrive after the owner has moved
/// on are the owner's to ignore.
#[derive(Debug)]
pub struct Timer<T> {
    expiries: UnboundedSender<T>,
    commands: Option<UnboundedSender<(Instant, T)>>,
}

impl<T> Timer<T>
where
    T: Send + 'static,
{
    pub fn new(expiries: UnboundedSender<T>) -> Self {
        Self {
            expiries,
            commands: None,
        }
    }
    pub fn running(&self) -> bool {
        self.commands.is_some()
    }
    /// Spawns the countdown task, idle until the first `set`.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.running() {
            return Err(TimerError::AlreadyStarted);
        }
        let (tx, rx) = unbounded_channel();
        tokio::spawn(Self::tick(rx, self.expiries.clone()));
        self.commands = Some(tx);
        Ok(())
    }
    /// Arms the countdown, replacing any pending deadline.
    pub fn set(&self, after: Duration, payload: T) -> Result<(), TimerError> {
        let commands = self.commands.as_ref().ok_or(TimerError::NotRunning)?;
        commands
            .send((Instant::now() + after, payload))
            .map_err(|_| TimerError::NotRunning)
    }
    /// Cancels any pending deadline and ends the task.
    pub fn stop(&mut self) -> Result<(), TimerError> {
        self.commands
            .take()
            .map(drop)
            .ok_or(TimerError::NotRunning)
    }

    async fn tick(mut commands: UnboundedReceiver<(Instant, T)>, expiries: UnboundedSender<T>) {
        let mut pending: Option<(Instant, T)> = None;
        loop {
            let deadline = pending
                .as_ref()
                .map(|(deadline, _)| *deadline)
                .unwrap_or_else(Instant::now);
            tokio::select! {
                command = commands.recv() => match command {
                    Some(armed) => pending = Some(armed),
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline), if pending.is_some() => {
                    if let Some((_, payload)) = pending.take() {
                        log::trace!("[timer] expired");
                        if expiries.send(payload).is_err() {
                            break;
                        }
                    }
                }
            }
        }
        log::trace!("[timer] stopped");
    }
}
