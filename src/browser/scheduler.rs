//! Fixed-delay tickers
//!
//! Each [`Ticker`] owns one thread. It fires immediately, then waits a fixed
//! delay after each tick finishes before firing again. The delay is drawn
//! once from an [`Interval`] when the ticker is started, not on every tick.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{Error, Result};

/// Half-open range of milliseconds, `[min_ms, max_ms)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Interval {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Always yields the same duration
    pub const fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    /// Draw a duration; a degenerate range yields `min_ms`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        let ms = if self.max_ms > self.min_ms {
            rng.random_range(self.min_ms..self.max_ms)
        } else {
            self.min_ms
        };
        Duration::from_millis(ms)
    }
}

/// A named thread running a callback on a fixed delay
#[derive(Debug)]
pub struct Ticker {
    name: &'static str,
    delay: Duration,
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker that calls `tick` right away and then every `delay`
    /// after the previous call returns
    pub fn spawn<F>(name: &'static str, delay: Duration, mut tick: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (shutdown, rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name(format!("iam-working-{}", name))
            .spawn(move || loop {
                tick();
                // Dropping the sender disconnects the channel and ends the loop
                match rx.recv_timeout(delay) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|source| Error::Spawn { name, source })?;

        tracing::debug!(name, delay_ms = delay.as_millis() as u64, "Ticker started");

        Ok(Self {
            name,
            delay,
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Stop ticking and wait for an in-progress tick to return
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        drop(self.shutdown.take());
        if let Some(handle) = self.handle.take() {
            // A tick calling stop on its own ticker must not join itself
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                tracing::warn!(name = self.name, "Ticker thread panicked");
            }
            tracing::debug!(name = self.name, "Ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_interval_sample_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let interval = Interval::new(3000, 15000);
        for _ in 0..500 {
            let d = interval.sample(&mut rng);
            assert!(d >= Duration::from_millis(3000));
            assert!(d < Duration::from_millis(15000));
        }
    }

    #[test]
    fn test_interval_degenerate() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Interval::fixed(0).sample(&mut rng), Duration::ZERO);
        assert_eq!(
            Interval::new(50, 10).sample(&mut rng),
            Duration::from_millis(50)
        );
    }

    #[test]
    fn test_ticker_fires_immediately() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let ticker = Ticker::spawn("test", Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while count.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Stopping interrupts the 60s wait
        let started = Instant::now();
        ticker.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ticker_repeats_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let ticker = Ticker::spawn("test", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        assert_eq!(ticker.delay(), Duration::from_millis(5));

        let deadline = Instant::now() + Duration::from_secs(5);
        while count.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        ticker.stop();

        let stopped_at = count.load(Ordering::SeqCst);
        assert!(stopped_at >= 3);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), stopped_at);
    }
}
