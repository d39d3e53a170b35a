//! Debounced propagation for style-parameter changes.
//!
//! Dragging a margin slider fires an update per pixel; re-laying out the
//! page on every one would thrash the renderer. `Debouncer` is an explicit
//! "pending value + reset-on-new-input timer" primitive: each push replaces
//! the pending value and restarts the timer, and only the value still
//! pending after the full quiet period reaches the sink. The controller's
//! own state updates immediately — only downstream propagation is delayed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Quiet period before a pending style change propagates downstream.
pub const STYLE_DEBOUNCE: Duration = Duration::from_millis(500);

struct Inner<T> {
    pending: Option<T>,
    /// Bumped on every push; a sleeping timer task only fires if the
    /// generation it captured is still current when it wakes.
    generation: u64,
}

/// Timer-based coalescing of rapid updates.
///
/// Guarantees: within one burst, exactly the latest pushed value reaches
/// the sink, exactly once, after `delay` of inactivity. The final value of
/// a burst is never dropped.
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    sink: Arc<dyn Fn(T) + Send + Sync>,
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, sink: impl Fn(T) + Send + Sync + 'static) -> Self {
        Debouncer {
            delay,
            sink: Arc::new(sink),
            inner: Arc::new(Mutex::new(Inner {
                pending: None,
                generation: 0,
            })),
        }
    }

    /// Replaces the pending value and restarts the quiet-period timer.
    /// Must be called from within a tokio runtime.
    pub fn push(&self, value: T) {
        let my_generation = {
            let mut inner = self.inner.lock().expect("debouncer lock poisoned");
            inner.pending = Some(value);
            inner.generation += 1;
            inner.generation
        };

        let inner = Arc::clone(&self.inner);
        let sink = Arc::clone(&self.sink);
        // The quiet period is anchored here, not at the task's first poll:
        // time may advance before the spawned task ever runs.
        let deadline = tokio::time::Instant::now() + self.delay;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let fired = {
                let mut inner = inner.lock().expect("debouncer lock poisoned");
                if inner.generation == my_generation {
                    inner.pending.take()
                } else {
                    // A newer push restarted the window; its timer owns the value.
                    None
                }
            };
            if let Some(value) = fired {
                sink(value);
            }
        });
    }

    /// Discards the pending value, if any. A sleeping timer task wakes to
    /// a newer generation and fires nothing.
    pub fn cancel(&self) {
        let mut inner = self.inner.lock().expect("debouncer lock poisoned");
        inner.pending = None;
        inner.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn collector() -> (Arc<StdMutex<Vec<f32>>>, impl Fn(f32) + Send + Sync) {
        let seen: Arc<StdMutex<Vec<f32>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        (seen, move |v: f32| sink_seen.lock().unwrap().push(v))
    }

    async fn settle() {
        // Let spawned timer tasks run to completion under the paused clock.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_coalesces_to_latest_value() {
        let (seen, sink) = collector();
        let debouncer = Debouncer::new(STYLE_DEBOUNCE, sink);

        for v in [10.0, 20.0, 30.0] {
            debouncer.push(v);
            tokio::time::advance(Duration::from_millis(50)).await;
        }

        tokio::time::advance(STYLE_DEBOUNCE).await;
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![30.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_push_propagates_after_delay() {
        let (seen, sink) = collector();
        let debouncer = Debouncer::new(STYLE_DEBOUNCE, sink);

        debouncer.push(12.5);
        tokio::time::advance(Duration::from_millis(499)).await;
        settle().await;
        assert!(seen.lock().unwrap().is_empty(), "must wait the full window");

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![12.5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_propagate() {
        let (seen, sink) = collector();
        let debouncer = Debouncer::new(STYLE_DEBOUNCE, sink);

        debouncer.push(1.0);
        tokio::time::advance(STYLE_DEBOUNCE + Duration::from_millis(10)).await;
        settle().await;

        debouncer.push(2.0);
        tokio::time::advance(STYLE_DEBOUNCE + Duration::from_millis(10)).await;
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![1.0, 2.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let (seen, sink) = collector();
        let debouncer = Debouncer::new(STYLE_DEBOUNCE, sink);

        debouncer.push(5.0);
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.cancel();
        tokio::time::advance(STYLE_DEBOUNCE).await;
        settle().await;

        assert!(seen.lock().unwrap().is_empty(), "cancelled value must not fire");

        // The debouncer still works after a cancel.
        debouncer.push(6.0);
        tokio::time::advance(STYLE_DEBOUNCE + Duration::from_millis(10)).await;
        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![6.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_value_never_dropped() {
        let (seen, sink) = collector();
        let debouncer = Debouncer::new(STYLE_DEBOUNCE, sink);

        // A long stream of pushes, each inside the previous window.
        for i in 0..20 {
            debouncer.push(i as f32);
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        tokio::time::advance(STYLE_DEBOUNCE).await;
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![19.0]);
    }
}
