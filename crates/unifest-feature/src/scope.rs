//! [`ScreenScope`]: background tasks tied to a screen's lifetime.

use std::{
  future::Future,
  sync::{Mutex, PoisonError},
};

use tokio::task::JoinSet;

/// Owns a screen's live-sequence subscriptions. Closing or dropping the
/// scope aborts every task still running in it.
///
/// Must be used from within a Tokio runtime.
#[derive(Default)]
pub struct ScreenScope {
  tasks: Mutex<JoinSet<()>>,
}

impl ScreenScope {
  pub fn new() -> Self { Self::default() }

  pub fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
    self.tasks.lock().unwrap_or_else(PoisonError::into_inner).spawn(task);
  }

  /// Abort everything; called on screen teardown.
  pub fn close(&self) {
    self.tasks.lock().unwrap_or_else(PoisonError::into_inner).abort_all();
  }
}
