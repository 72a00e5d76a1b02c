//! Idle-timeout monitor.
//!
//! The monitor owns a single timer task. Every input event pushes the
//! idle deadline forward; when the deadline passes with no input the
//! handler runs once. The task lives between `start()` and `stop()` (or
//! drop), so no timer can fire after teardown.

use super::InactivityHandler;
use crate::config::SessionSettings;
use client_core::ClientError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityConfig {
    pub timeout: Duration,
    /// An input event after the timer fired re-arms it.
    pub restart_on_activity_after_expiry: bool,
    /// Re-arm automatically after every fire.
    pub loop_timer: bool,
}

impl Default for InactivityConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(300_000),
            restart_on_activity_after_expiry: true,
            loop_timer: false,
        }
    }
}

impl From<&SessionSettings> for InactivityConfig {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            timeout: settings.inactivity_timeout(),
            restart_on_activity_after_expiry: settings.restart_on_activity_after_expiry,
            loop_timer: settings.loop_timer,
        }
    }
}

/// Observable monitor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactivityState {
    Stopped,
    Idle { elapsed: Duration },
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle { since: Instant },
    Fired,
}

struct Running {
    phase: Arc<watch::Sender<Phase>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

pub struct InactivityMonitor {
    config: InactivityConfig,
    handler: Arc<dyn InactivityHandler>,
    running: Option<Running>,
}

impl InactivityMonitor {
    pub fn new(config: InactivityConfig, handler: Arc<dyn InactivityHandler>) -> Self {
        Self {
            config,
            handler,
            running: None,
        }
    }

    pub fn config(&self) -> &InactivityConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.task.is_finished())
    }

    /// Arm the timer at `Idle(0)`. Must be called inside a tokio runtime.
    ///
    /// Starting a monitor that is already running, or one with a zero
    /// timeout, is rejected.
    pub fn start(&mut self) -> Result<(), ClientError> {
        if self.config.timeout.is_zero() {
            return Err(ClientError::BadRequest(anyhow::anyhow!(
                "Inactivity timeout must be greater than zero"
            )));
        }
        if self.is_running() {
            return Err(ClientError::Conflict(anyhow::anyhow!(
                "Inactivity monitor is already running"
            )));
        }

        let (tx, rx) = watch::channel(Phase::Idle {
            since: Instant::now(),
        });
        let phase = Arc::new(tx);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run_timer(
            self.config,
            self.handler.clone(),
            phase.clone(),
            rx,
            cancel.clone(),
        ));

        tracing::debug!(timeout_ms = self.config.timeout.as_millis() as u64, "Inactivity monitor started");

        self.running = Some(Running {
            phase,
            cancel,
            task,
        });
        Ok(())
    }

    /// Cancel the timer. A pending fire never happens.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.cancel.cancel();
            tracing::debug!("Inactivity monitor stopped");
        }
    }

    /// Record a user input event.
    ///
    /// While idle this restarts the count at zero. After the timer fired it
    /// re-arms only when `restart_on_activity_after_expiry` is set.
    pub fn record_activity(&self) {
        let Some(running) = &self.running else {
            return;
        };
        let restart = self.config.restart_on_activity_after_expiry;

        running.phase.send_if_modified(|phase| match phase {
            Phase::Idle { .. } => {
                *phase = Phase::Idle {
                    since: Instant::now(),
                };
                true
            }
            Phase::Fired if restart => {
                tracing::debug!("Activity after expiry, re-arming inactivity timer");
                *phase = Phase::Idle {
                    since: Instant::now(),
                };
                true
            }
            Phase::Fired => false,
        });
    }

    /// Force the timer back to `Idle(0)` from any state.
    pub fn reset(&self) {
        if let Some(running) = &self.running {
            running.phase.send_replace(Phase::Idle {
                since: Instant::now(),
            });
        }
    }

    pub fn state(&self) -> InactivityState {
        match &self.running {
            None => InactivityState::Stopped,
            Some(running) => match *running.phase.borrow() {
                Phase::Idle { since } => InactivityState::Idle {
                    elapsed: since.elapsed(),
                },
                Phase::Fired => InactivityState::Fired,
            },
        }
    }
}

impl Drop for InactivityMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_timer(
    config: InactivityConfig,
    handler: Arc<dyn InactivityHandler>,
    phase: Arc<watch::Sender<Phase>>,
    mut rx: watch::Receiver<Phase>,
    cancel: CancellationToken,
) {
    loop {
        let current = *rx.borrow_and_update();

        match current {
            Phase::Idle { since } => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep_until(since + config.timeout) => {
                        let next = if config.loop_timer {
                            Phase::Idle { since: Instant::now() }
                        } else {
                            Phase::Fired
                        };
                        // Activity may have landed after the sleep completed.
                        let fired = phase.send_if_modified(|p| {
                            if *p == current {
                                *p = next;
                                true
                            } else {
                                false
                            }
                        });

                        if fired {
                            tracing::info!(
                                timeout_ms = config.timeout.as_millis() as u64,
                                looping = config.loop_timer,
                                "Inactivity timeout reached"
                            );
                            handler.on_inactive().await;
                        }
                    }
                }
            }
            Phase::Fired => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}
