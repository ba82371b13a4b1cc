//! Wire shapes of the Unifest REST API.
//!
//! Every response body is an [`Envelope`]; the payload lives under `data`.
//! Dates stay strings here and are parsed by the mapping layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
  /// Application status code; the server sends it as a string or a number.
  #[serde(default)]
  pub code:    Option<serde_json::Value>,
  #[serde(default)]
  pub message: Option<String>,
  pub data:    Option<T>,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self { code: None, message: None, data: Some(data) }
  }
}

// ─── Festivals ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalResponse {
  pub festival_id:   i64,
  pub school_id:     i64,
  #[serde(default)]
  pub thumbnail:     String,
  pub school_name:   String,
  #[serde(default)]
  pub region:        String,
  pub festival_name: String,
  pub begin_date:    String,
  pub end_date:      String,
  #[serde(default)]
  pub latitude:      f32,
  #[serde(default)]
  pub longitude:     f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarResponse {
  pub name: String,
  #[serde(default)]
  pub img:  String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalTodayResponse {
  pub festival_id:   i64,
  pub school_id:     i64,
  pub school_name:   String,
  pub festival_name: String,
  #[serde(default)]
  pub thumbnail:     String,
  pub begin_date:    String,
  pub end_date:      String,
  #[serde(default)]
  pub star_info:     Vec<StarResponse>,
}

// ─── Booths ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothResponse {
  pub id:          i64,
  pub name:        String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub thumbnail:   String,
  #[serde(default)]
  pub location:    String,
  pub latitude:    f32,
  pub longitude:   f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
  pub id:      i64,
  pub name:    String,
  pub price:   i32,
  #[serde(default)]
  pub img_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothDetailResponse {
  pub id:          i64,
  pub name:        String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub thumbnail:   String,
  #[serde(default)]
  pub warning:     String,
  #[serde(default)]
  pub location:    String,
  pub latitude:    f32,
  pub longitude:   f32,
  #[serde(default)]
  pub menus:       Vec<MenuResponse>,
  #[serde(default)]
  pub likes:       i32,
}
