//! Booth types.
//!
//! The server never reports whether a booth is liked; `is_liked` is always
//! derived from membership in the local liked-booth collection.

use std::str::FromStr as _;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ─── Category ────────────────────────────────────────────────────────────────

/// Booth category as reported by the server (`"BAR"`, `"FOOD"`, …).
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
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BoothCategory {
  Bar,
  Food,
  Event,
  #[default]
  Normal,
  Medical,
  Toilet,
}

impl BoothCategory {
  /// Lenient parse: anything unrecognised is treated as [`Self::Normal`].
  pub fn parse(value: &str) -> Self {
    Self::from_str(value).unwrap_or_default()
  }
}

// ─── Menu ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
  pub id:        i64,
  pub name:      String,
  pub price:     i32,
  pub image_url: String,
}

// ─── Booths ──────────────────────────────────────────────────────────────────

/// The list projection of a booth, as shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothSummary {
  pub id:          i64,
  pub name:        String,
  pub category:    BoothCategory,
  pub description: String,
  pub thumbnail:   String,
  /// Free-text location, e.g. "Student hall, 2F".
  pub location:    String,
  pub latitude:    f32,
  pub longitude:   f32,
  pub is_liked:    bool,
}

/// Everything known about a booth. Also the shape of a liked-booth record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothDetail {
  pub id:          i64,
  pub name:        String,
  pub category:    BoothCategory,
  pub description: String,
  pub thumbnail:   String,
  pub warning:     String,
  pub location:    String,
  pub latitude:    f32,
  pub longitude:   f32,
  pub menus:       Vec<Menu>,
  pub like_count:  i32,
  pub is_liked:    bool,
}
