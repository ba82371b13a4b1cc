//! Integration tests for `SqliteStore` against an in-memory database.

use std::time::Duration;

use chrono::NaiveDate;
use unifest_core::{
  booth::{BoothCategory, BoothDetail, Menu},
  festival::{LikedFestival, StarInfo},
  preference::{OnboardingFlag, RECENT_LIKED_SCHOOL_KEY},
  store::{FavoritesStore, PreferenceStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 5, d).unwrap() }

fn festival(id: i64, school: &str) -> LikedFestival {
  LikedFestival {
    festival_id:   id,
    school_id:     id * 10,
    school_name:   school.into(),
    festival_name: format!("{school} festival"),
    thumbnail:     "https://img.example/thumb.png".into(),
    begin_date:    day(6),
    end_date:      day(8),
    stars:         Vec::new(),
    region:        Some("서울".into()),
    latitude:      Some(37.46),
    longitude:     Some(126.95),
  }
}

fn booth(id: i64) -> BoothDetail {
  BoothDetail {
    id,
    name:        format!("booth {id}"),
    category:    BoothCategory::Food,
    description: "tteokbokki".into(),
    thumbnail:   String::new(),
    warning:     "spicy".into(),
    location:    "main field".into(),
    latitude:    37.5445,
    longitude:   127.0761,
    menus:       vec![Menu {
      id:        1,
      name:      "tteokbokki".into(),
      price:     4000,
      image_url: String::new(),
    }],
    like_count:  12,
    is_liked:    true,
  }
}

fn ids(list: &[LikedFestival]) -> Vec<i64> { list.iter().map(|f| f.festival_id).collect() }

// ─── Liked festivals ─────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_and_list_festival() {
  let s = store().await;
  s.upsert_festival(festival(1, "Seoul Univ")).await.unwrap();

  let all = s.list_festivals().await.unwrap();
  assert_eq!(all, vec![festival(1, "Seoul Univ")]);
}

#[tokio::test]
async fn upsert_same_id_replaces_instead_of_duplicating() {
  let s = store().await;
  s.upsert_festival(festival(42, "Seoul Univ")).await.unwrap();
  s.upsert_festival(festival(42, "Seoul Univ (renamed)")).await.unwrap();

  let all = s.list_festivals().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].school_name, "Seoul Univ (renamed)");
}

#[tokio::test]
async fn upsert_replaces_star_list_wholesale() {
  let s = store().await;
  let mut first = festival(5, "Korea Univ");
  first.stars = vec![
    StarInfo { name: "A".into(), image_url: "a.png".into() },
    StarInfo { name: "B".into(), image_url: "b.png".into() },
  ];
  s.upsert_festival(first).await.unwrap();

  let mut second = festival(5, "Korea Univ");
  second.stars = vec![StarInfo { name: "C".into(), image_url: "c.png".into() }];
  s.upsert_festival(second.clone()).await.unwrap();

  let all = s.list_festivals().await.unwrap();
  assert_eq!(all, vec![second]);
}

#[tokio::test]
async fn optional_columns_round_trip_as_none() {
  let s = store().await;
  let mut f = festival(9, "Konkuk Univ");
  f.region = None;
  f.latitude = None;
  f.longitude = None;
  s.upsert_festival(f.clone()).await.unwrap();

  assert_eq!(s.list_festivals().await.unwrap(), vec![f]);
}

#[tokio::test]
async fn delete_missing_festival_is_not_an_error() {
  let s = store().await;
  s.upsert_festival(festival(1, "Seoul Univ")).await.unwrap();

  let removed = s.delete_festival(99).await.unwrap();
  assert!(!removed);
  assert_eq!(ids(&s.list_festivals().await.unwrap()), vec![1]);
}

#[tokio::test]
async fn clear_festivals_removes_everything() {
  let s = store().await;
  s.upsert_festival(festival(1, "A")).await.unwrap();
  s.upsert_festival(festival(2, "B")).await.unwrap();

  assert_eq!(s.clear_festivals().await.unwrap(), 2);
  assert!(s.list_festivals().await.unwrap().is_empty());
}

#[tokio::test]
async fn festivals_listed_in_id_order() {
  let s = store().await;
  for id in [3, 1, 2] {
    s.upsert_festival(festival(id, "X")).await.unwrap();
  }
  assert_eq!(ids(&s.list_festivals().await.unwrap()), vec![1, 2, 3]);
}

// ─── Live sequences ──────────────────────────────────────────────────────────

#[tokio::test]
async fn watch_replays_current_then_each_commit() {
  let s = store().await;
  s.upsert_festival(festival(1, "A")).await.unwrap();

  let mut seq = s.watch_festivals();
  assert_eq!(ids(&seq.next().await.unwrap()), vec![1]);

  s.upsert_festival(festival(2, "B")).await.unwrap();
  assert_eq!(ids(&seq.next().await.unwrap()), vec![1, 2]);

  s.delete_festival(1).await.unwrap();
  assert_eq!(ids(&seq.next().await.unwrap()), vec![2]);
}

#[tokio::test]
async fn deleting_missing_id_does_not_emit() {
  let s = store().await;
  let mut seq = s.watch_festivals();
  assert!(seq.next().await.unwrap().is_empty());

  s.delete_festival(42).await.unwrap();
  let next = tokio::time::timeout(Duration::from_millis(50), seq.next()).await;
  assert!(next.is_err(), "no emission expected");
}

#[tokio::test]
async fn clones_share_the_same_live_collection() {
  let s = store().await;
  let other = s.clone();
  let mut seq = other.watch_festivals();
  seq.next().await;

  s.upsert_festival(festival(7, "Yonsei Univ")).await.unwrap();
  assert_eq!(ids(&seq.next().await.unwrap()), vec![7]);
}

#[tokio::test]
async fn reopening_file_store_restores_collections() {
  let dir = std::env::temp_dir().join(format!(
    "unifest-store-test-{}-{:?}",
    std::process::id(),
    std::thread::current().id()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("favorites.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert_festival(festival(4, "Sogang Univ")).await.unwrap();
    s.upsert_booth(booth(8)).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let mut seq = s.watch_festivals();
  assert_eq!(ids(&seq.next().await.unwrap()), vec![4]);
  assert!(s.contains_booth(8).await.unwrap());

  let _ = std::fs::remove_dir_all(&dir);
}

// ─── Liked booths ────────────────────────────────────────────────────────────

#[tokio::test]
async fn contains_booth_follows_insert_and_delete() {
  let s = store().await;
  assert!(!s.contains_booth(3).await.unwrap());

  s.upsert_booth(booth(3)).await.unwrap();
  assert!(s.contains_booth(3).await.unwrap());

  assert!(s.delete_booth(3).await.unwrap());
  assert!(!s.contains_booth(3).await.unwrap());
}

#[tokio::test]
async fn stored_booths_read_back_as_liked() {
  let s = store().await;
  let mut b = booth(1);
  b.is_liked = false;
  s.upsert_booth(b).await.unwrap();

  let all = s.list_booths().await.unwrap();
  assert_eq!(all.len(), 1);
  assert!(all[0].is_liked);
  assert_eq!(all[0].menus.len(), 1);
  assert_eq!(all[0].category, BoothCategory::Food);
}

#[tokio::test]
async fn booth_upsert_replaces_fields() {
  let s = store().await;
  s.upsert_booth(booth(1)).await.unwrap();
  let mut updated = booth(1);
  updated.like_count = 13;
  updated.menus.clear();
  s.upsert_booth(updated.clone()).await.unwrap();

  assert_eq!(s.list_booths().await.unwrap(), vec![updated]);
}

#[tokio::test]
async fn watch_booths_emits_on_delete() {
  let s = store().await;
  s.upsert_booth(booth(1)).await.unwrap();
  s.upsert_booth(booth(2)).await.unwrap();

  let mut seq = s.watch_booths();
  assert_eq!(seq.next().await.unwrap().len(), 2);

  s.delete_booth(1).await.unwrap();
  let next = seq.next().await.unwrap();
  assert_eq!(next.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2]);
}

// ─── Preferences ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn flags_default_to_false_and_are_independent() {
  let s = store().await;
  assert!(!s.get_flag(OnboardingFlag::Intro).await.unwrap());

  s.set_flag(OnboardingFlag::MapOnboarding, true).await.unwrap();
  assert!(s.get_flag(OnboardingFlag::MapOnboarding).await.unwrap());
  assert!(!s.get_flag(OnboardingFlag::Intro).await.unwrap());
  assert!(!s.get_flag(OnboardingFlag::FestivalOnboarding).await.unwrap());

  s.set_flag(OnboardingFlag::MapOnboarding, false).await.unwrap();
  assert!(!s.get_flag(OnboardingFlag::MapOnboarding).await.unwrap());
}

#[tokio::test]
async fn string_slot_is_last_write_wins() {
  let s = store().await;
  assert_eq!(s.get_string(RECENT_LIKED_SCHOOL_KEY).await.unwrap(), None);

  s.set_string(RECENT_LIKED_SCHOOL_KEY, "Seoul Univ".into()).await.unwrap();
  s.set_string(RECENT_LIKED_SCHOOL_KEY, "Yonsei Univ".into()).await.unwrap();
  assert_eq!(
    s.get_string(RECENT_LIKED_SCHOOL_KEY).await.unwrap().as_deref(),
    Some("Yonsei Univ")
  );
}
