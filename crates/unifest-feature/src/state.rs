//! [`StateFlow`]: the replayed screen-state channel.

use std::sync::Arc;

use tokio::sync::watch;
use unifest_core::live::LiveSequence;

/// Holds the current `UiState` of one screen. Observers always get the
/// latest snapshot first; updates that leave the snapshot unchanged wake no
/// one.
pub struct StateFlow<T> {
  tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateFlow<T> {
  fn clone(&self) -> Self { Self { tx: Arc::clone(&self.tx) } }
}

impl<T> StateFlow<T>
where
  T: Clone + PartialEq + Send + Sync + 'static,
{
  pub fn new(initial: T) -> Self {
    let (tx, _) = watch::channel(initial);
    Self { tx: Arc::new(tx) }
  }

  pub fn value(&self) -> T { self.tx.borrow().clone() }

  /// Compute the next snapshot from the current one. Concurrent updates are
  /// applied one at a time, each against the result of the previous.
  pub fn update(&self, f: impl FnOnce(&mut T)) {
    self.tx.send_if_modified(|state| {
      let before = state.clone();
      f(state);
      *state != before
    });
  }

  pub fn subscribe(&self) -> LiveSequence<T> {
    LiveSequence::new(self.tx.subscribe())
  }
}
