//! Enum → asset-identifier lookup tables for the presentation layer.

use unifest_core::{booth::BoothCategory, festival::Region};

/// `(category, idle icon, selected icon)`.
const MARKER_ICONS: &[(BoothCategory, &str, &str)] = &[
  (BoothCategory::Bar, "ic_marker_bar", "ic_marker_bar_selected"),
  (BoothCategory::Food, "ic_marker_food", "ic_marker_food_selected"),
  (BoothCategory::Event, "ic_marker_event", "ic_marker_event_selected"),
  (BoothCategory::Normal, "ic_marker_normal", "ic_marker_normal_selected"),
  (BoothCategory::Medical, "ic_marker_medical", "ic_marker_medical_selected"),
  (BoothCategory::Toilet, "ic_marker_toilet", "ic_marker_toilet_selected"),
];

const REGION_ICONS: &[(Region, &str)] = &[
  (Region::All, "ic_region_all"),
  (Region::Seoul, "ic_region_seoul"),
  (Region::GyeonggiIncheon, "ic_region_gyeonggi_incheon"),
  (Region::Gangwon, "ic_region_gangwon"),
  (Region::DaejeonChungcheong, "ic_region_daejeon_chungcheong"),
  (Region::GwangjuJeolla, "ic_region_gwangju_jeolla"),
  (Region::BusanUlsan, "ic_region_busan_ulsan"),
  (Region::DaeguGyeongbuk, "ic_region_daegu_gyeongbuk"),
];

const FALLBACK_MARKER: &str = "ic_marker_normal";

pub fn marker_icon(category: BoothCategory, selected: bool) -> &'static str {
  MARKER_ICONS
    .iter()
    .find(|(c, ..)| *c == category)
    .map(|&(_, idle, active)| if selected { active } else { idle })
    .unwrap_or(FALLBACK_MARKER)
}

pub fn region_icon(region: Region) -> &'static str {
  REGION_ICONS
    .iter()
    .find(|(r, _)| *r == region)
    .map(|&(_, icon)| icon)
    .unwrap_or("ic_region_all")
}
