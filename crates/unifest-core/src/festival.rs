//! Festival types: what the server lists and what the user pins.
//!
//! A [`FestivalSummary`] and a [`LikedFestival`] sharing a `festival_id` are the
//! same festival at two lifecycle stages: fetched from the server vs. pinned in
//! the local store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ─── Region ──────────────────────────────────────────────────────────────────

/// A region tab on the festival search screens. The string form is the name
/// the server expects in `?region=`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumIter,
  EnumString,
)]
pub enum Region {
  /// Not a server region: selecting it reloads every festival.
  #[default]
  #[strum(serialize = "전체")]
  All,
  #[strum(serialize = "서울")]
  Seoul,
  #[strum(serialize = "경기/인천")]
  GyeonggiIncheon,
  #[strum(serialize = "강원")]
  Gangwon,
  #[strum(serialize = "대전/충청")]
  DaejeonChungcheong,
  #[strum(serialize = "광주/전라")]
  GwangjuJeolla,
  #[strum(serialize = "부산/울산")]
  BusanUlsan,
  #[strum(serialize = "대구/경북")]
  DaeguGyeongbuk,
}

// ─── Remote shapes ───────────────────────────────────────────────────────────

/// A festival as listed by search and region queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalSummary {
  pub festival_id:   i64,
  pub school_id:     i64,
  pub school_name:   String,
  pub festival_name: String,
  pub thumbnail:     String,
  pub begin_date:    NaiveDate,
  pub end_date:      NaiveDate,
  pub latitude:      f32,
  pub longitude:     f32,
  /// Free-text region name as reported by the server; may be empty.
  pub region:        String,
}

/// A performer appearing at a festival.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarInfo {
  pub name:      String,
  #[serde(rename = "imgUrl")]
  pub image_url: String,
}

/// A festival as shown on the detail/home view: the summary fields plus the
/// line-up. Carries no region or coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalToday {
  pub festival_id:   i64,
  pub school_id:     i64,
  pub school_name:   String,
  pub festival_name: String,
  pub thumbnail:     String,
  pub begin_date:    NaiveDate,
  pub end_date:      NaiveDate,
  pub stars:         Vec<StarInfo>,
}

// ─── Persisted record ────────────────────────────────────────────────────────

/// A pinned festival. `festival_id` is the primary key; writing a record with
/// an existing id replaces every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedFestival {
  pub festival_id:   i64,
  pub school_id:     i64,
  pub school_name:   String,
  pub festival_name: String,
  pub thumbnail:     String,
  pub begin_date:    NaiveDate,
  pub end_date:      NaiveDate,
  pub stars:         Vec<StarInfo>,
  pub region:        Option<String>,
  pub latitude:      Option<f32>,
  pub longitude:     Option<f32>,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn region_uses_server_names() {
    assert_eq!(Region::Seoul.to_string(), "서울");
    assert_eq!(Region::from_str("대전/충청").unwrap(), Region::DaejeonChungcheong);
    assert_eq!(Region::default(), Region::All);
    assert!(Region::from_str("Seoul").is_err());
  }

  #[test]
  fn every_region_round_trips_through_its_name() {
    for region in Region::iter() {
      assert_eq!(Region::from_str(region.as_ref()).unwrap(), region);
    }
  }
}
