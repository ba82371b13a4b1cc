//! Pure conversions between wire records, persisted records and domain
//! records.
//!
//! Fields two shapes share are carried over unchanged; fields only the
//! target has are defaulted.

use chrono::NaiveDate;
use unifest_api::response::{
  BoothDetailResponse, BoothResponse, FestivalResponse, FestivalTodayResponse,
  MenuResponse, StarResponse,
};
use unifest_core::{
  Error, Result,
  booth::{BoothCategory, BoothDetail, BoothSummary, Menu},
  festival::{FestivalSummary, FestivalToday, LikedFestival, StarInfo},
};

// ─── Wire → domain ───────────────────────────────────────────────────────────

/// Parse a server date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::MalformedResponse(format!("bad date {s:?}: {e}")))
}

pub fn festival_summary(r: FestivalResponse) -> Result<FestivalSummary> {
  Ok(FestivalSummary {
    festival_id:   r.festival_id,
    school_id:     r.school_id,
    school_name:   r.school_name,
    festival_name: r.festival_name,
    thumbnail:     r.thumbnail,
    begin_date:    parse_date(&r.begin_date)?,
    end_date:      parse_date(&r.end_date)?,
    latitude:      r.latitude,
    longitude:     r.longitude,
    region:        r.region,
  })
}

pub fn star(r: StarResponse) -> StarInfo {
  StarInfo { name: r.name, image_url: r.img }
}

pub fn festival_today(r: FestivalTodayResponse) -> Result<FestivalToday> {
  Ok(FestivalToday {
    festival_id:   r.festival_id,
    school_id:     r.school_id,
    school_name:   r.school_name,
    festival_name: r.festival_name,
    thumbnail:     r.thumbnail,
    begin_date:    parse_date(&r.begin_date)?,
    end_date:      parse_date(&r.end_date)?,
    stars:         r.star_info.into_iter().map(star).collect(),
  })
}

pub fn menu(r: MenuResponse) -> Menu {
  Menu { id: r.id, name: r.name, price: r.price, image_url: r.img_url }
}

pub fn booth_summary(r: BoothResponse) -> BoothSummary {
  BoothSummary {
    id:          r.id,
    name:        r.name,
    category:    BoothCategory::parse(&r.category),
    description: r.description,
    thumbnail:   r.thumbnail,
    location:    r.location,
    latitude:    r.latitude,
    longitude:   r.longitude,
    is_liked:    false,
  }
}

/// `is_liked` starts false; callers consult the liked-booth store.
pub fn booth_detail(r: BoothDetailResponse) -> BoothDetail {
  BoothDetail {
    id:          r.id,
    name:        r.name,
    category:    BoothCategory::parse(&r.category),
    description: r.description,
    thumbnail:   r.thumbnail,
    warning:     r.warning,
    location:    r.location,
    latitude:    r.latitude,
    longitude:   r.longitude,
    menus:       r.menus.into_iter().map(menu).collect(),
    like_count:  r.likes,
    is_liked:    false,
  }
}

// ─── Persisted ↔ domain ──────────────────────────────────────────────────────

pub fn liked_to_summary(r: LikedFestival) -> FestivalSummary {
  FestivalSummary {
    festival_id:   r.festival_id,
    school_id:     r.school_id,
    school_name:   r.school_name,
    festival_name: r.festival_name,
    thumbnail:     r.thumbnail,
    begin_date:    r.begin_date,
    end_date:      r.end_date,
    latitude:      r.latitude.unwrap_or(0.0),
    longitude:     r.longitude.unwrap_or(0.0),
    region:        r.region.unwrap_or_default(),
  }
}

/// A festival liked from a search list carries no line-up.
pub fn summary_to_liked(f: &FestivalSummary) -> LikedFestival {
  LikedFestival {
    festival_id:   f.festival_id,
    school_id:     f.school_id,
    school_name:   f.school_name.clone(),
    festival_name: f.festival_name.clone(),
    thumbnail:     f.thumbnail.clone(),
    begin_date:    f.begin_date,
    end_date:      f.end_date,
    stars:         Vec::new(),
    region:        (!f.region.is_empty()).then(|| f.region.clone()),
    latitude:      Some(f.latitude),
    longitude:     Some(f.longitude),
  }
}

pub fn today_to_liked(f: &FestivalToday) -> LikedFestival {
  LikedFestival {
    festival_id:   f.festival_id,
    school_id:     f.school_id,
    school_name:   f.school_name.clone(),
    festival_name: f.festival_name.clone(),
    thumbnail:     f.thumbnail.clone(),
    begin_date:    f.begin_date,
    end_date:      f.end_date,
    stars:         f.stars.clone(),
    region:        None,
    latitude:      None,
    longitude:     None,
  }
}

pub fn detail_to_summary(b: &BoothDetail) -> BoothSummary {
  BoothSummary {
    id:          b.id,
    name:        b.name.clone(),
    category:    b.category,
    description: b.description.clone(),
    thumbnail:   b.thumbnail.clone(),
    location:    b.location.clone(),
    latitude:    b.latitude,
    longitude:   b.longitude,
    is_liked:    b.is_liked,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn response() -> FestivalResponse {
    FestivalResponse {
      festival_id:   42,
      school_id:     7,
      thumbnail:     "t.png".into(),
      school_name:   "Seoul Univ".into(),
      region:        "서울".into(),
      festival_name: "Spring".into(),
      begin_date:    "2024-05-06".into(),
      end_date:      "2024-05-08".into(),
      latitude:      37.46,
      longitude:     126.95,
    }
  }

  #[test]
  fn summary_survives_a_trip_through_the_store_shape() {
    let summary = festival_summary(response()).unwrap();
    assert_eq!(liked_to_summary(summary_to_liked(&summary)), summary);
  }

  #[test]
  fn empty_region_round_trips() {
    let mut r = response();
    r.region = String::new();
    let summary = festival_summary(r).unwrap();
    let liked = summary_to_liked(&summary);
    assert_eq!(liked.region, None);
    assert_eq!(liked_to_summary(liked).region, "");
  }

  #[test]
  fn bad_date_is_malformed() {
    let mut r = response();
    r.end_date = "05.08".into();
    assert!(matches!(festival_summary(r), Err(Error::MalformedResponse(_))));
  }

  #[test]
  fn today_keeps_stars_and_defaults_location() {
    let today = festival_today(FestivalTodayResponse {
      festival_id:   3,
      school_id:     3,
      school_name:   "Korea Univ".into(),
      festival_name: "Ipselenti".into(),
      thumbnail:     String::new(),
      begin_date:    "2024-05-22".into(),
      end_date:      "2024-05-24".into(),
      star_info:     vec![StarResponse { name: "IU".into(), img: "iu.png".into() }],
    })
    .unwrap();

    let liked = today_to_liked(&today);
    assert_eq!(liked.stars, vec![StarInfo { name: "IU".into(), image_url: "iu.png".into() }]);

    let back = liked_to_summary(liked);
    assert_eq!(back.region, "");
    assert_eq!((back.latitude, back.longitude), (0.0, 0.0));
  }

  #[test]
  fn booth_detail_is_not_liked_and_parses_category() {
    let detail = booth_detail(BoothDetailResponse {
      id:          1,
      name:        "Clinic".into(),
      category:    "MEDICAL".into(),
      description: String::new(),
      thumbnail:   String::new(),
      warning:     String::new(),
      location:    String::new(),
      latitude:    0.0,
      longitude:   0.0,
      menus:       vec![MenuResponse {
        id:      5,
        name:    "bandage".into(),
        price:   0,
        img_url: "b.png".into(),
      }],
      likes:       2,
    });
    assert!(!detail.is_liked);
    assert_eq!(detail.category, BoothCategory::Medical);
    assert_eq!(detail.like_count, 2);
    assert_eq!(detail.menus[0].image_url, "b.png");
  }
}
