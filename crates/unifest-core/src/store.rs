//! Storage traits for the liked collections and preference slots.
//!
//! Implemented by storage backends (e.g. `unifest-store-sqlite`). Repositories
//! depend on these abstractions, not on a concrete backend.

use std::future::Future;

use crate::{
  booth::BoothDetail,
  festival::LikedFestival,
  live::LiveSequence,
  preference::OnboardingFlag,
};

// ─── Liked collections ───────────────────────────────────────────────────────

/// The persisted liked-festival and liked-booth collections.
///
/// Every write is an upsert or a delete keyed by entity id, so neither
/// collection can hold two records with the same id. After each committed
/// write that changes a collection, the store publishes the new collection to
/// its live sequence before the write's future resolves.
///
/// All methods return `Send` futures so the trait can be used from tasks
/// spawned on a multi-threaded runtime.
pub trait FavoritesStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Festivals ─────────────────────────────────────────────────────────

  /// Insert `record`, replacing any record with the same `festival_id`.
  fn upsert_festival(
    &self,
    record: LikedFestival,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete by id. Returns `false` (not an error) when nothing matched.
  fn delete_festival(
    &self,
    festival_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete every liked festival. Returns how many were removed.
  fn clear_festivals(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn list_festivals(
    &self,
  ) -> impl Future<Output = Result<Vec<LikedFestival>, Self::Error>> + Send + '_;

  /// Live view of the liked festivals, in the store's natural order.
  fn watch_festivals(&self) -> LiveSequence<Vec<LikedFestival>>;

  // ── Booths ────────────────────────────────────────────────────────────

  /// Insert `booth`, replacing any record with the same id.
  fn upsert_booth(
    &self,
    booth: BoothDetail,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete by id. Returns `false` (not an error) when nothing matched.
  fn delete_booth(
    &self,
    booth_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn contains_booth(
    &self,
    booth_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All liked booths. Every returned booth has `is_liked == true`.
  fn list_booths(
    &self,
  ) -> impl Future<Output = Result<Vec<BoothDetail>, Self::Error>> + Send + '_;

  /// Live view of the liked booths, in the store's natural order.
  fn watch_booths(&self) -> LiveSequence<Vec<BoothDetail>>;
}

// ─── Preferences ─────────────────────────────────────────────────────────────

/// Independent preference slots. Unset flags read as `false`, unset strings
/// as `None`.
pub trait PreferenceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get_flag(
    &self,
    flag: OnboardingFlag,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn set_flag(
    &self,
    flag: OnboardingFlag,
    value: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_string<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  fn set_string<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
