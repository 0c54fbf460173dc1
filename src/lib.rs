//! iam-working library
//!
//! Simulates someone reading code: a project file is opened every few
//! seconds and the caret wanders around inside it, so an idle workspace
//! looks like it is being used.
//!
//! The editor itself is abstracted behind [`browser::Host`] and
//! [`browser::ViewHandle`]; [`browser::DiskHost`] is a file-backed stand-in.

pub mod browser;
pub mod config;
pub mod error;
