//! [`LikedBoothRepository`]: the user's bookmarked booths.
//!
//! Membership in the store is the liked state: a stored booth is liked, an
//! absent one is not.

use std::sync::Arc;

use unifest_core::{
  Error, Result,
  booth::{BoothDetail, BoothSummary},
  live::LiveSequence,
  store::FavoritesStore,
};

use crate::mapper;

pub struct LikedBoothRepository<S> {
  store: Arc<S>,
}

impl<S> Clone for LikedBoothRepository<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: FavoritesStore> LikedBoothRepository<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// One-shot snapshot of the liked booths, for marking booths shown
  /// elsewhere.
  pub async fn get_liked_booth_ids(&self) -> Result<Vec<BoothSummary>> {
    let booths = self.store.list_booths().await.map_err(Error::store)?;
    Ok(booths.iter().map(mapper::detail_to_summary).collect())
  }

  pub fn observe_liked_booth_list(&self) -> LiveSequence<Vec<BoothDetail>> {
    self.store.watch_booths()
  }

  pub async fn insert(&self, booth: &BoothDetail) -> Result<()> {
    let liked = BoothDetail { is_liked: true, ..booth.clone() };
    self.store.upsert_booth(liked).await.map_err(Error::store)
  }

  /// Upsert by id.
  pub async fn update(&self, booth: &BoothDetail) -> Result<()> {
    self.store.upsert_booth(booth.clone()).await.map_err(Error::store)
  }

  /// Unlike by id. Unliking a booth that is not liked does nothing.
  pub async fn delete(&self, booth: &BoothDetail) -> Result<()> {
    let removed = self.store.delete_booth(booth.id).await.map_err(Error::store)?;
    if !removed {
      tracing::debug!(booth_id = booth.id, "unlike of booth that was not liked");
    }
    Ok(())
  }

  pub async fn is_liked(&self, booth: &BoothDetail) -> Result<bool> {
    self.store.contains_booth(booth.id).await.map_err(Error::store)
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use unifest_core::booth::BoothCategory;
  use unifest_store_sqlite::SqliteStore;

  use super::*;

  async fn repo() -> LikedBoothRepository<SqliteStore> {
    LikedBoothRepository::new(Arc::new(SqliteStore::open_in_memory().await.unwrap()))
  }

  fn booth(id: i64) -> BoothDetail {
    BoothDetail {
      id,
      name:        format!("booth {id}"),
      category:    BoothCategory::Event,
      description: String::new(),
      thumbnail:   String::new(),
      warning:     String::new(),
      location:    String::new(),
      latitude:    37.54,
      longitude:   127.07,
      menus:       Vec::new(),
      like_count:  0,
      is_liked:    false,
    }
  }

  #[tokio::test]
  async fn is_liked_tracks_insert_then_delete() {
    let r = repo().await;
    let b = booth(3);

    r.insert(&b).await.unwrap();
    assert!(r.is_liked(&b).await.unwrap());

    r.delete(&b).await.unwrap();
    assert!(!r.is_liked(&b).await.unwrap());
  }

  #[tokio::test]
  async fn delete_of_unliked_booth_is_silent() {
    let r = repo().await;
    r.insert(&booth(1)).await.unwrap();

    let mut seq = r.observe_liked_booth_list();
    assert_eq!(seq.next().await.unwrap().len(), 1);

    r.delete(&booth(2)).await.unwrap();
    let next = tokio::time::timeout(Duration::from_millis(50), seq.next()).await;
    assert!(next.is_err());
  }

  #[tokio::test]
  async fn liked_ids_come_back_marked_liked() {
    let r = repo().await;
    r.insert(&booth(5)).await.unwrap();
    r.insert(&booth(6)).await.unwrap();

    let liked = r.get_liked_booth_ids().await.unwrap();
    assert_eq!(liked.iter().map(|b| b.id).collect::<Vec<_>>(), vec![5, 6]);
    assert!(liked.iter().all(|b| b.is_liked));
  }

  #[tokio::test]
  async fn update_is_an_upsert() {
    let r = repo().await;
    let mut b = booth(9);
    b.like_count = 10;
    r.update(&b).await.unwrap();
    b.like_count = 11;
    r.update(&b).await.unwrap();

    let list = r.observe_liked_booth_list().current();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].like_count, 11);
  }
}
