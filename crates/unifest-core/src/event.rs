//! One-shot UI events (navigation, transient messages).
//!
//! Unlike screen state, events are not replayed: each event is handed to
//! exactly one receiver and is gone once taken. Events sent before anyone
//! listens wait in the queue for the first receiver.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

/// Create a connected sender/receiver pair.
pub fn channel<E>() -> (EventSender<E>, EventReceiver<E>) {
  let (tx, rx) = mpsc::unbounded_channel();
  (
    EventSender { tx },
    EventReceiver { rx: Arc::new(Mutex::new(rx)) },
  )
}

#[derive(Debug)]
pub struct EventSender<E> {
  tx: mpsc::UnboundedSender<E>,
}

impl<E> Clone for EventSender<E> {
  fn clone(&self) -> Self { Self { tx: self.tx.clone() } }
}

impl<E> EventSender<E> {
  pub fn send(&self, event: E) {
    if self.tx.send(event).is_err() {
      tracing::debug!("ui event dropped: receiver closed");
    }
  }
}

/// The receiving half. Clones share one queue, so concurrent receivers
/// compete for events rather than each seeing every event.
#[derive(Debug)]
pub struct EventReceiver<E> {
  rx: Arc<Mutex<mpsc::UnboundedReceiver<E>>>,
}

impl<E> Clone for EventReceiver<E> {
  fn clone(&self) -> Self { Self { rx: Arc::clone(&self.rx) } }
}

impl<E> EventReceiver<E> {
  /// Wait for the next event. Returns `None` once every sender is gone and
  /// the queue is drained.
  pub async fn recv(&self) -> Option<E> { self.rx.lock().await.recv().await }

  /// Take a queued event without waiting.
  pub fn try_recv(&self) -> Option<E> {
    self.rx.try_lock().ok()?.try_recv().ok()
  }
}
