use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Interval between countdown recomputations
pub const TICK: Duration = Duration::from_secs(1);

/// Source of the current wall-clock time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Remaining time until a target instant, split into display units
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownSnapshot {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownSnapshot {
    /// Decompose `target - now` with floor division.
    ///
    /// Returns `None` once the target has passed.
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let distance = (target - now).num_milliseconds();
        if distance < 0 {
            return None;
        }

        Some(Self {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }
}

/// Periodic countdown owned by a single consumer
///
/// The first recomputation happens one tick after `start`; until then the
/// published snapshot is all zeros. Once the target passes the task stops and
/// the last snapshot stays published. Dropping the timer cancels the task.
pub struct CountdownTimer {
    target: DateTime<Utc>,
    rx: watch::Receiver<CountdownSnapshot>,
    task: JoinHandle<()>,
}

impl CountdownTimer {
    pub fn start(target: DateTime<Utc>, clock: Clock) -> Self {
        let (tx, rx) = watch::channel(CountdownSnapshot::default());

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match CountdownSnapshot::between(target, clock()) {
                    Some(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    None => {
                        debug!("Countdown reached {}, timer stopped", target);
                        break;
                    }
                }
            }
        });

        Self { target, rx, task }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> CountdownSnapshot {
        *self.rx.borrow()
    }

    /// Receiver notified on every tick; closed when the timer stops
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
