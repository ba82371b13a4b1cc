//! [`LikedFestivalRepository`]: the user's pinned festivals.
//!
//! Upsert-by-id is the only way a liked festival is written, so the observed
//! collection never holds two records with the same `festival_id`. Network
//! refreshes never touch this collection.

use std::sync::Arc;

use unifest_core::{
  Error, Result,
  festival::{FestivalSummary, FestivalToday, LikedFestival},
  live::LiveSequence,
  preference::RECENT_LIKED_SCHOOL_KEY,
  store::{FavoritesStore, PreferenceStore},
};

use crate::mapper;

/// Live view of the liked festivals as domain summaries.
pub type LikedFestivals = LiveSequence<Vec<LikedFestival>, Vec<FestivalSummary>>;

pub struct LikedFestivalRepository<S> {
  store: Arc<S>,
}

impl<S> Clone for LikedFestivalRepository<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S> LikedFestivalRepository<S>
where
  S: FavoritesStore + PreferenceStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Replays the current collection on first poll, then emits once per
  /// committed change.
  pub fn observe_liked_festivals(&self) -> LikedFestivals {
    self
      .store
      .watch_festivals()
      .map(|list| list.into_iter().map(mapper::liked_to_summary).collect())
  }

  /// Like a festival from its detail view; the line-up is stored with it.
  pub async fn add_festival_from_detail_view(&self, festival: &FestivalToday) -> Result<()> {
    self.store.upsert_festival(mapper::today_to_liked(festival)).await.map_err(Error::store)
  }

  /// Like a festival from a search list; any stored line-up is dropped.
  pub async fn add_festival_from_search(&self, festival: &FestivalSummary) -> Result<()> {
    self.store.upsert_festival(mapper::summary_to_liked(festival)).await.map_err(Error::store)
  }

  /// Unlike by id. Unliking a festival that is not liked does nothing.
  pub async fn remove_festival(&self, festival: &FestivalSummary) -> Result<()> {
    let removed = self.store.delete_festival(festival.festival_id).await.map_err(Error::store)?;
    if !removed {
      tracing::debug!(festival_id = festival.festival_id, "unlike of festival that was not liked");
    }
    Ok(())
  }

  pub async fn remove_all_festivals(&self) -> Result<usize> {
    self.store.clear_festivals().await.map_err(Error::store)
  }

  /// Empty until a school has been liked.
  pub async fn get_recently_liked_school_name(&self) -> Result<String> {
    let name = self.store.get_string(RECENT_LIKED_SCHOOL_KEY).await.map_err(Error::store)?;
    Ok(name.unwrap_or_default())
  }

  pub async fn set_recently_liked_school_name(&self, name: &str) -> Result<()> {
    self.store.set_string(RECENT_LIKED_SCHOOL_KEY, name.to_owned()).await.map_err(Error::store)
  }
}
