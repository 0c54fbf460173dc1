//! File browsing simulator
//!
//! Two schedulers share one current view:
//!
//! - the activity scheduler picks a random candidate file and opens it
//! - the scroll scheduler moves the caret around whatever file is open
//!
//! Both check the running flag before acting and degrade every failure to
//! "do nothing this tick". Host mutations always run on the [`UiContext`].

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread;

use super::extensions::ExtensionSet;
use super::host::{Host, ViewHandle};
use super::scheduler::{Interval, Ticker};
use super::selector;
use super::strategy;
use super::ui::UiContext;
use crate::error::{HostError, Result};

/// Timing ranges, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Delay between file opens
    pub file_interval: Interval,
    /// Delay between caret moves
    pub scroll_interval: Interval,
    /// Pause on the UI context after each move
    pub settle: Interval,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            file_interval: Interval::new(3000, 15000),
            scroll_interval: Interval::new(1500, 5000),
            settle: Interval::new(100, 300),
        }
    }
}

type CurrentView = Option<Box<dyn ViewHandle>>;

/// State shared between the caller, both tickers and the UI context
struct Shared {
    host: Arc<dyn Host>,
    ui: Arc<dyn UiContext>,
    settle: Interval,
    extensions: RwLock<ExtensionSet>,
    running: AtomicBool,
    current: Mutex<CurrentView>,
}

impl Shared {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn current(&self) -> MutexGuard<'_, CurrentView> {
        // A panicking tick cannot leave the slot half-written
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn extensions(&self) -> ExtensionSet {
        self.extensions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Activity tick, runs on the activity ticker thread
    fn activity_tick(self: &Arc<Self>) {
        if !self.is_running() {
            return;
        }
        let Some(root) = self.host.project_root() else {
            tracing::debug!("No project root, skipping tick");
            return;
        };

        let candidates = selector::find_files(&root, &self.extensions());
        let Some(path) = candidates.choose(&mut rand::rng()).cloned() else {
            tracing::debug!(root = %root.display(), "No candidate files");
            return;
        };
        tracing::debug!(
            candidates = candidates.len(),
            path = %path.display(),
            "Picked file"
        );

        let shared = Arc::clone(self);
        self.ui.invoke_later(Box::new(move || shared.open_file(path)));
    }

    /// Open `path` and position the caret, runs on the UI context
    fn open_file(&self, path: PathBuf) {
        if !self.is_running() {
            return;
        }

        let mut view = match self.host.open_document(&path) {
            Ok(view) => view,
            Err(err) => {
                tracing::debug!("Open failed, skipping tick: {}", err);
                return;
            }
        };

        let mut rng = rand::rng();
        if let Some(line) = strategy::initial_line(view.line_count(), &mut rng) {
            if let Err(err) = self.move_to_line(&mut *view, line) {
                tracing::debug!("Initial positioning failed: {}", err);
            }
        }

        let mut current = self.current();
        // stop() may have run while the document was opening
        if self.is_running() {
            *current = Some(view);
        }
    }

    /// Scroll tick, runs on the scroll ticker thread
    fn scroll_tick(self: &Arc<Self>) {
        if !self.is_running() || self.current().is_none() {
            return;
        }
        let shared = Arc::clone(self);
        self.ui.invoke_later(Box::new(move || shared.scroll()));
    }

    /// Move the caret once within the current view, runs on the UI context
    fn scroll(&self) {
        if !self.is_running() {
            return;
        }
        let mut current = self.current();
        let Some(view) = current.as_mut() else {
            return;
        };
        if !view.is_valid() {
            tracing::debug!("Current view is stale, skipping tick");
            return;
        }

        let line_count = view.line_count();
        let current_line = view.caret_line();
        let Some(line) = strategy::next_line(current_line, line_count, &mut rand::rng()) else {
            return;
        };
        tracing::trace!(line_count, from = current_line, to = line, "Scrolling");

        if let Err(err) = self.move_to_line(&mut **view, line) {
            tracing::debug!("Scroll failed: {}", err);
        }
    }

    /// Put the caret at a random column of `line`, center it, then pause
    fn move_to_line(
        &self,
        view: &mut dyn ViewHandle,
        line: usize,
    ) -> std::result::Result<(), HostError> {
        if line >= view.line_count() {
            return Ok(());
        }
        let mut rng = rand::rng();

        let start = view.line_start_offset(line);
        let length = view.line_end_offset(line).saturating_sub(start);
        let column = strategy::column(length, &mut rng);

        view.move_caret(start + column)?;
        view.scroll_to_caret_centered()?;

        // Blocks the UI context on purpose so moves do not look instantaneous
        thread::sleep(self.settle.sample(&mut rng));
        Ok(())
    }
}

struct Tickers {
    activity: Ticker,
    scroll: Ticker,
}

/// Opens random project files and browses around in them until stopped
pub struct Simulator {
    shared: Arc<Shared>,
    timing: Timing,
    tickers: Mutex<Option<Tickers>>,
}

impl Simulator {
    pub fn new(
        host: Arc<dyn Host>,
        ui: Arc<dyn UiContext>,
        timing: Timing,
        extensions: ExtensionSet,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                host,
                ui,
                settle: timing.settle,
                extensions: RwLock::new(extensions),
                running: AtomicBool::new(false),
                current: Mutex::new(None),
            }),
            timing,
            tickers: Mutex::new(None),
        }
    }

    /// Start both schedulers
    ///
    /// Returns `Ok(false)` if already running. Each scheduler's delay is
    /// drawn once here and reused for every tick until the next start.
    pub fn start(&self) -> Result<bool> {
        let mut tickers = self.tickers.lock().unwrap_or_else(|e| e.into_inner());
        if tickers.is_some() {
            return Ok(false);
        }

        let mut rng = rand::rng();
        let file_delay = self.timing.file_interval.sample(&mut rng);
        let scroll_delay = self.timing.scroll_interval.sample(&mut rng);

        self.shared.running.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        let activity = Ticker::spawn("activity", file_delay, move || shared.activity_tick());
        let activity = match activity {
            Ok(ticker) => ticker,
            Err(err) => {
                self.shared.running.store(false, Ordering::SeqCst);
                return Err(err);
            }
        };

        let shared = Arc::clone(&self.shared);
        let scroll = match Ticker::spawn("scroll", scroll_delay, move || shared.scroll_tick()) {
            Ok(ticker) => ticker,
            Err(err) => {
                self.shared.running.store(false, Ordering::SeqCst);
                activity.stop();
                return Err(err);
            }
        };

        tracing::info!(
            file_delay_ms = file_delay.as_millis() as u64,
            scroll_delay_ms = scroll_delay.as_millis() as u64,
            "Simulator started"
        );
        *tickers = Some(Tickers { activity, scroll });
        Ok(true)
    }

    /// Stop both schedulers and forget the current view
    ///
    /// Returns `false` if already stopped. Jobs already queued on the UI
    /// context see the cleared flag and do nothing.
    pub fn stop(&self) -> bool {
        let mut tickers = self.tickers.lock().unwrap_or_else(|e| e.into_inner());
        let Some(Tickers { activity, scroll }) = tickers.take() else {
            return false;
        };

        self.shared.running.store(false, Ordering::SeqCst);
        activity.stop();
        scroll.stop();
        *self.shared.current() = None;

        tracing::info!("Simulator stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    pub fn has_current_view(&self) -> bool {
        self.shared.current().is_some()
    }

    /// Replace the extension set; the next activity tick picks it up
    pub fn set_extensions(&self, extensions: ExtensionSet) {
        *self
            .shared
            .extensions
            .write()
            .unwrap_or_else(|e| e.into_inner()) = extensions;
    }

    pub fn extensions(&self) -> ExtensionSet {
        self.shared.extensions()
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        self.stop();
    }
}
