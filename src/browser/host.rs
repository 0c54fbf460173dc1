//! Host editor collaborator interfaces
//!
//! The simulator never keeps document content of its own. Everything it
//! knows about a document comes through a [`ViewHandle`] handed out by the
//! [`Host`].

use std::path::{Path, PathBuf};

use crate::error::HostError;

/// The editor that owns documents and views
pub trait Host: Send + Sync {
    /// Root directory of the open project, if any
    fn project_root(&self) -> Option<PathBuf>;

    /// Open `path` as the active document and return a view into it
    fn open_document(&self, path: &Path) -> Result<Box<dyn ViewHandle>, HostError>;
}

/// A host-managed open document plus its caret and scroll state
///
/// Offsets are positions in the document text; lines are zero-based.
pub trait ViewHandle: Send {
    /// False once the host has closed or replaced this view
    fn is_valid(&self) -> bool;

    fn line_count(&self) -> usize;

    fn line_start_offset(&self, line: usize) -> usize;

    /// Offset of the end of `line`, excluding the line terminator
    fn line_end_offset(&self, line: usize) -> usize;

    fn text_length(&self) -> usize;

    fn caret_offset(&self) -> usize;

    fn line_of_offset(&self, offset: usize) -> usize;

    fn move_caret(&mut self, offset: usize) -> Result<(), HostError>;

    /// Scroll so the caret sits in the middle of the viewport
    fn scroll_to_caret_centered(&mut self) -> Result<(), HostError>;

    /// Line the caret is on
    fn caret_line(&self) -> usize {
        self.line_of_offset(self.caret_offset())
    }
}
