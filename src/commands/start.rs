//! Start command - Browse the project until told to stop

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::utils;
use iam_working::browser::{DiskHost, Simulator, UiThread, ViewEvent};
use iam_working::config::Settings;

/// Options for a browsing session
#[derive(Debug, Default)]
pub struct StartOptions {
    /// Project root (current directory if omitted)
    pub project: Option<String>,
    /// Stop after this long instead of waiting for Enter
    pub duration: Option<Duration>,
    /// Extensions overriding the saved settings
    pub extensions: Vec<String>,
}

/// Execute the start command
pub fn execute(options: StartOptions) -> Result<()> {
    let root = utils::resolve_project(options.project.as_deref())?;
    let settings = Settings::load().context("Failed to load settings")?;
    let extensions = utils::resolve_extensions(&options.extensions, &settings);

    if extensions.is_empty() {
        println!(
            "{}",
            "No file types selected, nothing will be opened. See `iam-working types`.".yellow()
        );
    }

    let printer_root = root.clone();
    let host = DiskHost::new(&root).with_observer(Arc::new(move |event: &ViewEvent| {
        println!(
            "{} {}",
            format!("[{}]", timestamp(Local::now())).dimmed(),
            format_event(&printer_root, event)
        );
    }));
    let ui = UiThread::spawn().context("Failed to start UI thread")?;

    let simulator = Simulator::new(Arc::new(host), Arc::new(ui), settings.timing, extensions);
    simulator.start().context("Failed to start browsing")?;

    println!("{}", "Started working!".green());
    println!("Browsing {}", root.display());
    match options.duration {
        Some(d) => println!("Press Enter to stop (stops by itself after {}s)", d.as_secs()),
        None => println!("Press Enter to stop"),
    }

    let reason = wait_for_stop(io::stdin(), options.duration);
    tracing::debug!(?reason, "Stopping");

    simulator.stop();
    println!("{}", "Stopped working!".green());
    Ok(())
}

/// Why a browsing session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A line was read from the input
    Enter,
    /// The duration ran out
    Elapsed,
}

/// Block until a line arrives on `input` or `duration` elapses
///
/// A closed input (EOF or read error) never counts as Enter. Without a
/// duration and with nothing left to read, this waits until the process is
/// interrupted.
pub fn wait_for_stop<R>(input: R, duration: Option<Duration>) -> StopReason
where
    R: Read + Send + 'static,
{
    let deadline = duration.map(|d| Instant::now() + d);
    let (tx, rx) = mpsc::channel();
    // Left detached: blocking reads cannot be interrupted
    thread::spawn(move || {
        let mut line = String::new();
        if let Ok(n) = BufReader::new(input).read_line(&mut line) {
            if n > 0 {
                let _ = tx.send(());
            }
        }
    });

    let Some(deadline) = deadline else {
        if rx.recv().is_ok() {
            return StopReason::Enter;
        }
        println!(
            "{}",
            "Input is closed, running until interrupted. Use --duration for unattended runs."
                .yellow()
        );
        loop {
            thread::park();
        }
    };

    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(()) => StopReason::Enter,
        Err(RecvTimeoutError::Timeout) => StopReason::Elapsed,
        Err(RecvTimeoutError::Disconnected) => {
            thread::sleep(deadline.saturating_duration_since(Instant::now()));
            StopReason::Elapsed
        }
    }
}

/// One line describing a host event
pub fn format_event(root: &Path, event: &ViewEvent) -> String {
    match event {
        ViewEvent::Opened { path, line_count } => format!(
            "Opened {} ({} lines)",
            utils::relative_display(root, path).bold(),
            line_count
        ),
        ViewEvent::Moved {
            path,
            line,
            column,
            preview,
        } => format!(
            "  {}:{}:{}  {}",
            display_name(path),
            line + 1,
            column + 1,
            preview.dimmed()
        ),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a `--duration` value in seconds
pub fn parse_duration(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn timestamp(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}
