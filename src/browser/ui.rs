//! UI execution contexts
//!
//! Editor hosts only allow document mutations from a single UI-owned thread.
//! Timer threads decide what to do and hand the work to a [`UiContext`].

use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};

/// A unit of work to run on the UI context
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Marshals callbacks onto the host's UI execution context
pub trait UiContext: Send + Sync {
    /// Queue `job`; it runs later, in submission order
    fn invoke_later(&self, job: UiJob);
}

/// Runs jobs immediately on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct Inline;

impl UiContext for Inline {
    fn invoke_later(&self, job: UiJob) {
        job();
    }
}

/// A dedicated thread that runs jobs one at a time
pub struct UiThread {
    sender: Mutex<Option<Sender<UiJob>>>,
    handle: Option<JoinHandle<()>>,
}

impl UiThread {
    pub fn spawn() -> Result<Self> {
        let (sender, rx) = mpsc::channel::<UiJob>();
        let handle = thread::Builder::new()
            .name("iam-working-ui".to_string())
            .spawn(move || {
                for job in rx {
                    job();
                }
            })
            .map_err(|source| Error::Spawn { name: "ui", source })?;

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            handle: Some(handle),
        })
    }

    /// Block until every job queued so far has run
    pub fn flush(&self) {
        let (done, wait) = mpsc::channel::<()>();
        self.invoke_later(Box::new(move || {
            let _ = done.send(());
        }));
        let _ = wait.recv();
    }
}

impl UiContext for UiThread {
    fn invoke_later(&self, job: UiJob) {
        let sender = self.sender.lock().unwrap_or_else(|e| e.into_inner());
        match sender.as_ref() {
            Some(sender) => {
                if sender.send(job).is_err() {
                    tracing::debug!("UI thread is gone, dropping job");
                }
            }
            None => tracing::debug!("UI thread shut down, dropping job"),
        }
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        let sender = self.sender.get_mut().unwrap_or_else(|e| e.into_inner());
        drop(sender.take());
        if let Some(handle) = self.handle.take() {
            // The last job can be the one holding the last reference
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                tracing::warn!("UI thread panicked");
            }
        }
    }
}
