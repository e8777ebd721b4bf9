use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Stopwatch and delay source shared by every task in a run.
///
/// Nominal phase durations are given in seconds and multiplied by the
/// time scale factor before suspending, so a whole run can be sped up or
/// slowed down without changing the proportions between phases.
pub struct Clock {
    started: Instant,
    time_scale: f32,
    interrupt: CancellationToken,
}

impl Clock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            started: Instant::now(),
            time_scale,
            interrupt: CancellationToken::new(),
        }
    }

    /// Time since the run started. Monotonic.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn scaled(&self, nominal_seconds: f32) -> Duration {
        Duration::from_secs_f32(nominal_seconds * self.time_scale)
    }

    /// Suspend for a scaled nominal duration. Resolves with
    /// `TaskError::DelayInterrupted` if the clock is interrupted mid-wait.
    pub async fn delay(&self, nominal_seconds: f32) -> Result<(), TaskError> {
        let duration = self.scaled(nominal_seconds);
        tokio::select! {
            _ = sleep(duration) => Ok(()),
            _ = self.interrupt.cancelled() => Err(TaskError::DelayInterrupted),
        }
    }

    /// Interrupt every pending and future delay on this clock.
    pub fn interrupt(&self) {
        self.interrupt.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_scaled_multiplies_nominal_seconds() {
        let clock = Clock::new(0.5);
        assert_eq!(clock.scaled(4.0), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_delay_completes_after_scaled_duration() {
        let clock = Clock::new(0.1);
        let before = Instant::now();
        clock.delay(1.0).await.expect("delay interrupted");
        assert!(before.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_elapsed_is_monotonic() {
        let clock = Clock::new(1.0);
        let first = clock.elapsed();
        sleep(Duration::from_millis(10)).await;
        assert!(clock.elapsed() >= first);
    }

    #[tokio::test]
    async fn test_interrupt_fails_pending_delay() {
        let clock = Arc::new(Clock::new(1.0));
        let waiting = tokio::spawn({
            let clock = clock.clone();
            async move { clock.delay(60.0).await }
        });

        sleep(Duration::from_millis(20)).await;
        clock.interrupt();

        let result = waiting.await.expect("delay task panicked");
        assert_eq!(result, Err(TaskError::DelayInterrupted));
    }

    #[tokio::test]
    async fn test_interrupted_clock_fails_future_delays() {
        let clock = Clock::new(1.0);
        clock.interrupt();
        assert_eq!(clock.delay(60.0).await, Err(TaskError::DelayInterrupted));
    }
}
