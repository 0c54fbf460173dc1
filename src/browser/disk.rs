//! File-backed host
//!
//! Stands in for an editor: "opening" a file reads it into memory, and the
//! caret/scroll state is tracked per view. Only the most recently opened view
//! stays valid, like a single editor tab that gets reused.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::host::{Host, ViewHandle};
use crate::error::HostError;

/// Characters of the caret line reported in [`ViewEvent::Moved`]
const PREVIEW_CHARS: usize = 60;

/// Something visible happened in the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Opened {
        path: PathBuf,
        line_count: usize,
    },
    Moved {
        path: PathBuf,
        line: usize,
        column: usize,
        preview: String,
    },
}

pub type Observer = Arc<dyn Fn(&ViewEvent) + Send + Sync>;

/// A host that opens documents straight from disk
pub struct DiskHost {
    root: PathBuf,
    generation: Arc<AtomicU64>,
    observer: Option<Observer>,
}

impl DiskHost {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            generation: Arc::new(AtomicU64::new(0)),
            observer: None,
        }
    }

    /// Report opened/moved events to `observer`
    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Invalidate every view handed out so far
    pub fn close_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn emit(&self, event: ViewEvent) {
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }
}

impl Host for DiskHost {
    fn project_root(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }

    fn open_document(&self, path: &Path) -> Result<Box<dyn ViewHandle>, HostError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => HostError::NotFound(path.to_path_buf()),
            _ => HostError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let text =
            String::from_utf8(bytes).map_err(|_| HostError::Unsupported(path.to_path_buf()))?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let view = DiskView::new(
            path.to_path_buf(),
            &text,
            Arc::clone(&self.generation),
            generation,
            self.observer.clone(),
        );

        self.emit(ViewEvent::Opened {
            path: path.to_path_buf(),
            line_count: view.line_count(),
        });

        Ok(Box::new(view))
    }
}

/// A view into a document opened by [`DiskHost`]
pub struct DiskView {
    path: PathBuf,
    lines: Vec<String>,
    /// Character offset of the first character of each line
    starts: Vec<usize>,
    length: usize,
    caret: usize,
    host_generation: Arc<AtomicU64>,
    generation: u64,
    observer: Option<Observer>,
}

impl DiskView {
    fn new(
        path: PathBuf,
        text: &str,
        host_generation: Arc<AtomicU64>,
        generation: u64,
        observer: Option<Observer>,
    ) -> Self {
        // An empty document has no lines; otherwise a trailing newline opens one more
        let lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect()
        };

        let mut starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for (i, raw) in text.split('\n').enumerate() {
            if i >= lines.len() {
                break;
            }
            starts.push(offset);
            offset += raw.chars().count() + 1;
        }

        Self {
            path,
            lines,
            starts,
            length: text.chars().count(),
            caret: 0,
            host_generation,
            generation,
            observer,
        }
    }

    fn ensure_open(&self) -> Result<(), HostError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(HostError::Closed)
        }
    }
}

impl ViewHandle for DiskView {
    fn is_valid(&self) -> bool {
        self.host_generation.load(Ordering::SeqCst) == self.generation
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.starts.get(line).copied().unwrap_or(self.length)
    }

    fn line_end_offset(&self, line: usize) -> usize {
        match self.lines.get(line) {
            Some(text) => self.line_start_offset(line) + text.chars().count(),
            None => self.length,
        }
    }

    fn text_length(&self) -> usize {
        self.length
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        // Index of the last line starting at or before offset
        self.starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    fn move_caret(&mut self, offset: usize) -> Result<(), HostError> {
        self.ensure_open()?;
        self.caret = offset.min(self.length);
        Ok(())
    }

    fn scroll_to_caret_centered(&mut self) -> Result<(), HostError> {
        self.ensure_open()?;
        let Some(observer) = &self.observer else {
            return Ok(());
        };

        let line = self.caret_line();
        let column = self.caret - self.line_start_offset(line);
        let preview: String = self
            .lines
            .get(line)
            .map(|l| l.trim().chars().take(PREVIEW_CHARS).collect())
            .unwrap_or_default();

        observer(&ViewEvent::Moved {
            path: self.path.clone(),
            line,
            column,
            preview,
        });
        Ok(())
    }
}
