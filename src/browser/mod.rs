//! Core browsing simulation

pub mod disk;
pub mod extensions;
pub mod host;
pub mod scheduler;
pub mod selector;
pub mod simulator;
pub mod strategy;
pub mod ui;

// Re-exports for library consumers
pub use disk::{DiskHost, ViewEvent};
pub use extensions::ExtensionSet;
pub use host::{Host, ViewHandle};
pub use scheduler::Interval;
pub use simulator::{Simulator, Timing};
pub use ui::{Inline, UiContext, UiThread};
