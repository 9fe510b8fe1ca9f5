//! Hero call-to-action reveal gate.
//!
//! A one-shot countdown: the primary call-to-action stays hidden until the
//! gate reaches [`RevealGate::Revealed`]. Each page load gets its own gate;
//! nothing is persisted and the countdown cannot be restarted.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Countdown length used when none is configured.
pub const DEFAULT_REVEAL_SECS: u32 = 60;

/// One tick per second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Reveal gate state machine.
///
/// `Counting { n }` moves to `Counting { n - 1 }` on each tick; the tick that
/// brings the counter to zero yields `Revealed`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RevealGate {
    Counting { seconds_remaining: u32 },
    Revealed,
}

impl Default for RevealGate {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_SECS)
    }
}

impl RevealGate {
    /// A gate that reveals after `seconds` ticks. Zero starts revealed.
    pub fn new(seconds: u32) -> Self {
        if seconds == 0 {
            RevealGate::Revealed
        } else {
            RevealGate::Counting {
                seconds_remaining: seconds,
            }
        }
    }

    /// Advance by one tick.
    #[must_use]
    pub fn tick(self) -> Self {
        match self {
            RevealGate::Counting { seconds_remaining } if seconds_remaining > 1 => {
                RevealGate::Counting {
                    seconds_remaining: seconds_remaining - 1,
                }
            }
            _ => RevealGate::Revealed,
        }
    }

    pub fn is_revealed(self) -> bool {
        matches!(self, RevealGate::Revealed)
    }

    pub fn seconds_remaining(self) -> u32 {
        match self {
            RevealGate::Counting { seconds_remaining } => seconds_remaining,
            RevealGate::Revealed => 0,
        }
    }
}

/// Drive `gate` to completion, publishing every new state on `tx`.
///
/// Ticks once per `period`. Returns when the gate is revealed or when every
/// receiver has been dropped; an in-flight tick is never interrupted, future
/// ticks are simply not scheduled.
pub async fn run_countdown(gate: RevealGate, period: Duration, tx: watch::Sender<RevealGate>) {
    let mut state = gate;
    let mut interval = tokio::time::interval(period);
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;

    while !state.is_revealed() {
        tokio::select! {
            _ = interval.tick() => {}
            () = tx.closed() => {
                tracing::debug!(
                    seconds_remaining = state.seconds_remaining(),
                    "Reveal countdown abandoned",
                );
                return;
            }
        }

        state = state.tick();
        if tx.send(state).is_err() {
            return;
        }
    }

    tracing::debug!("Reveal countdown finished");
}

/// Spawn a countdown task and return a receiver that observes it.
///
/// The receiver starts at `gate`. Dropping every receiver stops the task.
pub fn spawn_countdown(
    gate: RevealGate,
    period: Duration,
) -> (watch::Receiver<RevealGate>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(gate);
    let handle = tokio::spawn(run_countdown(gate, period, tx));
    (rx, handle)
}
