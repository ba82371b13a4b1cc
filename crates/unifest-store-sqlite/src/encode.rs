//! Encoding and decoding helpers between domain records and the plain
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings. Nested lists (stars, menus) are
//! stored as compact JSON. Coordinates are widened to `REAL`.

use chrono::NaiveDate;
use unifest_core::{
  booth::{BoothCategory, BoothDetail, Menu},
  festival::{LikedFestival, StarInfo},
};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Nested lists ────────────────────────────────────────────────────────────

pub fn encode_stars(stars: &[StarInfo]) -> Result<String> {
  Ok(serde_json::to_string(stars)?)
}

pub fn decode_stars(s: &str) -> Result<Vec<StarInfo>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_menus(menus: &[Menu]) -> Result<String> {
  Ok(serde_json::to_string(menus)?)
}

pub fn decode_menus(s: &str) -> Result<Vec<Menu>> {
  Ok(serde_json::from_str(s)?)
}

/// Lift a decode failure into the error type `tokio_rusqlite` closures return.
pub fn in_call(e: Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values of one `liked_festival` row.
pub struct RawLikedFestival {
  pub festival_id:   i64,
  pub school_id:     i64,
  pub school_name:   String,
  pub festival_name: String,
  pub thumbnail:     String,
  pub region:        Option<String>,
  pub begin_date:    String,
  pub end_date:      String,
  pub star_list:     String,
  pub latitude:      Option<f64>,
  pub longitude:     Option<f64>,
}

impl RawLikedFestival {
  pub const COLUMNS: &'static str = "festival_id, school_id, school_name, \
    festival_name, thumbnail, region, begin_date, end_date, star_list, \
    latitude, longitude";

  pub fn from_record(r: &LikedFestival) -> Result<Self> {
    Ok(Self {
      festival_id:   r.festival_id,
      school_id:     r.school_id,
      school_name:   r.school_name.clone(),
      festival_name: r.festival_name.clone(),
      thumbnail:     r.thumbnail.clone(),
      region:        r.region.clone(),
      begin_date:    encode_date(r.begin_date),
      end_date:      encode_date(r.end_date),
      star_list:     encode_stars(&r.stars)?,
      latitude:      r.latitude.map(f64::from),
      longitude:     r.longitude.map(f64::from),
    })
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      festival_id:   row.get(0)?,
      school_id:     row.get(1)?,
      school_name:   row.get(2)?,
      festival_name: row.get(3)?,
      thumbnail:     row.get(4)?,
      region:        row.get(5)?,
      begin_date:    row.get(6)?,
      end_date:      row.get(7)?,
      star_list:     row.get(8)?,
      latitude:      row.get(9)?,
      longitude:     row.get(10)?,
    })
  }

  pub fn into_record(self) -> Result<LikedFestival> {
    Ok(LikedFestival {
      festival_id:   self.festival_id,
      school_id:     self.school_id,
      school_name:   self.school_name,
      festival_name: self.festival_name,
      thumbnail:     self.thumbnail,
      begin_date:    decode_date(&self.begin_date)?,
      end_date:      decode_date(&self.end_date)?,
      stars:         decode_stars(&self.star_list)?,
      region:        self.region,
      latitude:      self.latitude.map(|v| v as f32),
      longitude:     self.longitude.map(|v| v as f32),
    })
  }
}

/// Column values of one `liked_booth` row.
pub struct RawLikedBooth {
  pub booth_id:    i64,
  pub name:        String,
  pub category:    String,
  pub description: String,
  pub thumbnail:   String,
  pub warning:     String,
  pub location:    String,
  pub latitude:    f64,
  pub longitude:   f64,
  pub menus:       String,
  pub like_count:  i32,
}

impl RawLikedBooth {
  pub const COLUMNS: &'static str = "booth_id, name, category, description, \
    thumbnail, warning, location, latitude, longitude, menus, like_count";

  pub fn from_record(b: &BoothDetail) -> Result<Self> {
    Ok(Self {
      booth_id:    b.id,
      name:        b.name.clone(),
      category:    b.category.to_string(),
      description: b.description.clone(),
      thumbnail:   b.thumbnail.clone(),
      warning:     b.warning.clone(),
      location:    b.location.clone(),
      latitude:    f64::from(b.latitude),
      longitude:   f64::from(b.longitude),
      menus:       encode_menus(&b.menus)?,
      like_count:  b.like_count,
    })
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      booth_id:    row.get(0)?,
      name:        row.get(1)?,
      category:    row.get(2)?,
      description: row.get(3)?,
      thumbnail:   row.get(4)?,
      warning:     row.get(5)?,
      location:    row.get(6)?,
      latitude:    row.get(7)?,
      longitude:   row.get(8)?,
      menus:       row.get(9)?,
      like_count:  row.get(10)?,
    })
  }

  /// Stored booths are liked by definition.
  pub fn into_record(self) -> Result<BoothDetail> {
    Ok(BoothDetail {
      id:          self.booth_id,
      name:        self.name,
      category:    BoothCategory::parse(&self.category),
      description: self.description,
      thumbnail:   self.thumbnail,
      warning:     self.warning,
      location:    self.location,
      latitude:    self.latitude as f32,
      longitude:   self.longitude as f32,
      menus:       decode_menus(&self.menus)?,
      like_count:  self.like_count,
      is_liked:    true,
    })
  }
}
