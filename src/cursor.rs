use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Blinking caret for the bottom bar. A background task flips the flag once
/// per period until the blink is stopped or dropped.
pub struct CursorBlink {
    visible: watch::Receiver<bool>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CursorBlink {
    /// Spawns the timer on the current tokio runtime. `period` must be non-zero.
    pub fn start(period: Duration) -> Self {
        let (tx, visible) = watch::channel(true);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => tx.send_modify(|on| *on = !*on),
                }
            }
        });

        Self {
            visible,
            cancel,
            task: Some(task),
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// A receiver that is notified on every flip and closes once the timer stops.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the timer. The flag keeps its last value.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        self.task.take();
    }
}

impl Drop for CursorBlink {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(530);

    #[tokio::test(start_paused = true)]
    async fn flips_once_per_period() {
        let blink = CursorBlink::start(PERIOD);
        let mut rx = blink.subscribe();
        assert!(blink.is_visible());

        let started = Instant::now();
        let mut seen = Vec::new();
        for _ in 0..4 {
            rx.changed().await.unwrap();
            seen.push(*rx.borrow_and_update());
        }
        assert_eq!(seen, [false, true, false, true]);
        let elapsed = started.elapsed();
        assert!(elapsed >= PERIOD * 4 && elapsed < PERIOD * 5, "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_timer() {
        let mut blink = CursorBlink::start(PERIOD);
        let mut rx = blink.subscribe();
        rx.changed().await.unwrap();
        assert!(!blink.is_visible());

        blink.stop();
        assert!(rx.changed().await.is_err());
        tokio::time::sleep(PERIOD * 5).await;
        assert!(!blink.is_visible());
        assert!(!blink.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_the_task() {
        let blink = CursorBlink::start(PERIOD);
        let mut rx = blink.subscribe();
        drop(blink);
        assert!(rx.changed().await.is_err());
    }
}
