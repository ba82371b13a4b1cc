//! Live sequences: observable snapshots with replay-of-one semantics.
//!
//! A [`Publisher`] owns the latest snapshot of a collection. Every
//! [`LiveSequence`] subscribed to it yields that snapshot first, then one
//! snapshot per committed change. A subscriber that falls behind skips
//! straight to the newest snapshot; it never observes changes out of order.

use std::sync::Arc;

use tokio::sync::watch;

// ─── Publisher ───────────────────────────────────────────────────────────────

/// The writing half. Owned by the store; publishes after every commit.
#[derive(Debug)]
pub struct Publisher<S> {
  tx: watch::Sender<S>,
}

impl<S> Publisher<S>
where
  S: PartialEq + Clone + Send + Sync + 'static,
{
  pub fn new(initial: S) -> Self {
    let (tx, _) = watch::channel(initial);
    Self { tx }
  }

  /// Replace the snapshot. Subscribers are only woken when `next` differs from
  /// the current snapshot. Returns whether they were woken.
  pub fn publish(&self, next: S) -> bool {
    self.tx.send_if_modified(|current| {
      if *current == next {
        false
      } else {
        *current = next;
        true
      }
    })
  }

  pub fn subscribe(&self) -> LiveSequence<S> {
    LiveSequence::new(self.tx.subscribe())
  }
}

// ─── LiveSequence ────────────────────────────────────────────────────────────

/// The reading half: an infinite, restartable sequence of snapshots of `S`,
/// projected to `T`.
pub struct LiveSequence<S, T = S> {
  rx:      watch::Receiver<S>,
  project: Arc<dyn Fn(&S) -> T + Send + Sync>,
  primed:  bool,
}

impl<S> LiveSequence<S>
where
  S: Clone + Send + Sync + 'static,
{
  pub fn new(rx: watch::Receiver<S>) -> Self {
    Self { rx, project: Arc::new(S::clone), primed: false }
  }
}

impl<S, T> LiveSequence<S, T>
where
  S: Send + Sync + 'static,
  T: 'static,
{
  /// Project every snapshot through `f`.
  pub fn map<U>(
    self,
    f: impl Fn(T) -> U + Send + Sync + 'static,
  ) -> LiveSequence<S, U> {
    let project = self.project;
    LiveSequence {
      rx:      self.rx,
      project: Arc::new(move |s: &S| f(project(s))),
      primed:  self.primed,
    }
  }

  /// The snapshot as of now, without consuming an emission.
  pub fn current(&self) -> T { (self.project)(&self.rx.borrow()) }

  /// The next snapshot. The first call resolves immediately with the current
  /// snapshot. Returns `None` once the publisher is gone.
  pub async fn next(&mut self) -> Option<T> {
    if !self.primed {
      self.primed = true;
      return Some((self.project)(&self.rx.borrow_and_update()));
    }
    self.rx.changed().await.ok()?;
    Some((self.project)(&self.rx.borrow_and_update()))
  }
}

impl<S, T> Clone for LiveSequence<S, T> {
  /// The clone starts over: its first `next` replays the current snapshot.
  fn clone(&self) -> Self {
    Self {
      rx:      self.rx.clone(),
      project: Arc::clone(&self.project),
      primed:  false,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[tokio::test]
  async fn first_next_replays_current_snapshot() {
    let publisher = Publisher::new(vec![1, 2]);
    let mut seq = publisher.subscribe();
    assert_eq!(seq.next().await, Some(vec![1, 2]));
  }

  #[tokio::test]
  async fn late_subscriber_sees_latest_not_history() {
    let publisher = Publisher::new(vec![1]);
    publisher.publish(vec![1, 2]);
    publisher.publish(vec![1, 2, 3]);
    let mut seq = publisher.subscribe();
    assert_eq!(seq.next().await, Some(vec![1, 2, 3]));
  }

  #[tokio::test]
  async fn emits_once_per_change() {
    let publisher = Publisher::new(Vec::<i32>::new());
    let mut seq = publisher.subscribe();
    assert_eq!(seq.next().await, Some(vec![]));

    assert!(publisher.publish(vec![7]));
    assert_eq!(seq.next().await, Some(vec![7]));
  }

  #[tokio::test]
  async fn equal_snapshot_does_not_wake_subscribers() {
    let publisher = Publisher::new(vec![7]);
    let mut seq = publisher.subscribe();
    seq.next().await;

    assert!(!publisher.publish(vec![7]));
    let woke = tokio::time::timeout(Duration::from_millis(50), seq.next()).await;
    assert!(woke.is_err());
  }

  #[tokio::test]
  async fn map_projects_every_snapshot() {
    let publisher = Publisher::new(vec![1, 2, 3]);
    let mut lens = publisher.subscribe().map(|v| v.len());
    assert_eq!(lens.current(), 3);
    assert_eq!(lens.next().await, Some(3));
    publisher.publish(vec![1]);
    assert_eq!(lens.next().await, Some(1));
  }

  #[tokio::test]
  async fn ends_when_publisher_drops() {
    let publisher = Publisher::new(0u8);
    let mut seq = publisher.subscribe();
    seq.next().await;
    drop(publisher);
    assert_eq!(seq.next().await, None);
  }
}
