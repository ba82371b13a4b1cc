use std::{sync::Arc, time::Duration};

use unifest_core::{event::EventReceiver, live::LiveSequence};
use unifest_data::testing::StubGateway;
use unifest_store_sqlite::SqliteStore;

use crate::Repositories;

pub async fn repos(
  gateway: &StubGateway,
) -> (Repositories<StubGateway, SqliteStore>, Arc<SqliteStore>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let repos = Repositories::new(Arc::new(gateway.clone()), Arc::clone(&store));
  (repos, store)
}

/// Wait for the first snapshot satisfying `pred`.
pub async fn wait_for<T: Clone + Send + Sync + 'static>(
  seq: &mut LiveSequence<T>,
  pred: impl Fn(&T) -> bool,
) -> T {
  tokio::time::timeout(Duration::from_secs(2), async {
    loop {
      let state = seq.next().await.expect("state channel closed");
      if pred(&state) {
        return state;
      }
    }
  })
  .await
  .expect("state never matched")
}

pub async fn next_event<E>(events: &EventReceiver<E>) -> E {
  tokio::time::timeout(Duration::from_secs(2), events.recv())
    .await
    .expect("no event")
    .expect("event channel closed")
}
