//! Composition root: builds the gateway, store and repositories once and
//! runs each command through the matching screen's state holder.

use std::{str::FromStr as _, sync::Arc};

use anyhow::{Context as _, bail};
use chrono::NaiveDate;
use unifest_api::HttpGateway;
use unifest_core::{
  booth::{BoothDetail, BoothSummary},
  festival::{FestivalSummary, Region},
};
use unifest_feature::{
  ButtonType, Repositories,
  screen::{
    booth::{BoothHolder, BoothUiAction},
    home::HomeHolder,
    intro::{IntroHolder, IntroUiAction, IntroUiState},
    liked_booth::LikedBoothHolder,
    map::MapHolder,
    menu::{MenuHolder, MenuUiAction},
  },
};
use unifest_store_sqlite::SqliteStore;

use crate::config::{AppConfig, expand_tilde};

pub struct App {
  repos:       Repositories<HttpGateway, SqliteStore>,
  festival_id: i64,
}

impl App {
  pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
    let store_path = expand_tilde(&config.store_path);
    if let Some(parent) = store_path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let store = SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?;
    let gateway = HttpGateway::new(config.gateway()).context("failed to build HTTP client")?;

    tracing::debug!(api = %config.api_base_url, store = ?store_path, "app ready");
    Ok(Self {
      repos:       Repositories::new(Arc::new(gateway), Arc::new(store)),
      festival_id: config.festival_id,
    })
  }

  // ── Festivals ─────────────────────────────────────────────────────────

  pub async fn festivals(
    &self,
    search: Option<String>,
    region: Option<String>,
  ) -> anyhow::Result<()> {
    let intro = IntroHolder::new(&self.repos);
    if let Some(name) = search {
      intro.on_action(IntroUiAction::SearchTextUpdated(name)).await;
      intro.on_action(IntroUiAction::Search).await;
    } else if let Some(region) = region {
      let region = Region::from_str(&region)
        .map_err(|_| anyhow::anyhow!("unknown region {region:?}"))?;
      intro.on_action(IntroUiAction::RegionTabClicked(region)).await;
    } else {
      intro.on_action(IntroUiAction::RegionTabClicked(Region::All)).await;
    }

    let state = intro.current();
    check_dialogs(&state)?;
    print_festivals(&state.festivals);
    Ok(())
  }

  pub async fn today(&self, date: NaiveDate) -> anyhow::Result<()> {
    let home = HomeHolder::new(&self.repos);
    home.start(date).await;
    let state = home.current();
    if state.is_network_error_dialog_visible || state.is_server_error_dialog_visible {
      bail!("could not load festivals for {date}");
    }
    for f in &state.today_festivals {
      let stars: Vec<_> = f.stars.iter().map(|s| s.name.as_str()).collect();
      println!(
        "{:>5}  {}  {}  [{}]",
        f.festival_id,
        f.school_name,
        f.festival_name,
        stars.join(", ")
      );
    }
    Ok(())
  }

  // ── Liked festivals ───────────────────────────────────────────────────

  pub fn liked_list(&self) {
    let liked = self.repos.liked_festival.observe_liked_festivals().current();
    print_festivals(&liked);
  }

  pub async fn liked_add(&self, festival_id: i64) -> anyhow::Result<()> {
    let all = self.repos.festival.get_all_festivals().await?;
    let festival = all
      .into_iter()
      .find(|f| f.festival_id == festival_id)
      .with_context(|| format!("no festival with id {festival_id}"))?;

    let menu = MenuHolder::new(&self.repos);
    menu.on_action(MenuUiAction::AddFestival(festival.clone())).await;
    menu.close();
    self.ensure_liked(festival_id, true)?;
    self.repos.liked_festival.set_recently_liked_school_name(&festival.school_name).await?;
    println!("liked {} ({})", festival.festival_name, festival.school_name);
    Ok(())
  }

  pub async fn liked_remove(&self, festival_id: i64) -> anyhow::Result<()> {
    let liked = self.repos.liked_festival.observe_liked_festivals().current();
    let Some(festival) = liked.into_iter().find(|f| f.festival_id == festival_id) else {
      println!("festival {festival_id} is not liked");
      return Ok(());
    };

    let menu = MenuHolder::new(&self.repos);
    menu.on_action(MenuUiAction::EnterEditMode).await;
    menu.on_action(MenuUiAction::LikedFestivalTapped(festival)).await;
    menu.on_action(MenuUiAction::DeleteDialog(ButtonType::Confirm)).await;
    menu.on_action(MenuUiAction::EditDone).await;
    menu.close();
    self.ensure_liked(festival_id, false)?;
    println!("removed festival {festival_id}");
    Ok(())
  }

  pub async fn liked_clear(&self) -> anyhow::Result<()> {
    let count = self.repos.liked_festival.observe_liked_festivals().current().len();
    let menu = MenuHolder::new(&self.repos);
    menu.on_action(MenuUiAction::EnterEditMode).await;
    menu.on_action(MenuUiAction::DeleteAllClick).await;
    menu.on_action(MenuUiAction::DeleteDialog(ButtonType::Confirm)).await;
    menu.close();
    let left = self.repos.liked_festival.observe_liked_festivals().current().len();
    if left > 0 {
      bail!("failed to clear liked festivals: {left} still stored");
    }
    println!("removed {count} liked festivals");
    Ok(())
  }

  /// The menu screen only logs store failures; the command has to report
  /// them, so check what actually landed.
  fn ensure_liked(&self, festival_id: i64, expected: bool) -> anyhow::Result<()> {
    let liked = self.repos.liked_festival.observe_liked_festivals().current();
    let present = liked.iter().any(|f| f.festival_id == festival_id);
    match (expected, present) {
      (true, false) => bail!("failed to like festival {festival_id}; see the log"),
      (false, true) => bail!("failed to remove festival {festival_id}; see the log"),
      _ => Ok(()),
    }
  }

  // ── Booths ────────────────────────────────────────────────────────────

  pub async fn booths(&self) -> anyhow::Result<()> {
    let map = MapHolder::new(&self.repos, self.festival_id);
    map.start().await;
    map.close();
    let state = map.current();
    if state.is_network_error_dialog_visible || state.is_server_error_dialog_visible {
      bail!("could not load booths for festival {}", self.festival_id);
    }
    for booth in &state.booths {
      print_booth(booth, state.marker_icon(booth));
    }
    Ok(())
  }

  pub async fn booth(&self, booth_id: i64, toggle_like: bool) -> anyhow::Result<()> {
    let holder = BoothHolder::new(&self.repos, booth_id);
    holder.start().await;
    if toggle_like {
      holder.on_action(BoothUiAction::ToggleBookmark).await;
    }
    let state = holder.current();
    let booth = state
      .booth
      .with_context(|| format!("could not load booth {booth_id}"))?;
    print_detail(&booth);
    Ok(())
  }

  pub async fn liked_booths(&self) -> anyhow::Result<()> {
    let holder = LikedBoothHolder::new(self.repos.liked_booth.clone());
    let expected = self.repos.liked_booth.get_liked_booth_ids().await?.len();
    let mut states = holder.state();
    while let Some(state) = states.next().await {
      if state.liked_booths.len() == expected {
        state.liked_booths.iter().for_each(print_detail);
        break;
      }
    }
    holder.close();
    Ok(())
  }

  pub async fn onboarding(&self) -> anyhow::Result<()> {
    let onboarding = &self.repos.onboarding;
    println!("intro:    {}", onboarding.check_intro_completion().await?);
    println!("map:      {}", onboarding.check_map_onboarding_completion().await?);
    println!("festival: {}", onboarding.check_festival_onboarding_completion().await?);
    let school = self.repos.liked_festival.get_recently_liked_school_name().await?;
    if !school.is_empty() {
      println!("recently liked school: {school}");
    }
    Ok(())
  }
}

fn check_dialogs(state: &IntroUiState) -> anyhow::Result<()> {
  if state.is_network_error_dialog_visible {
    bail!("network error: the festival server is unreachable");
  }
  if state.is_server_error_dialog_visible {
    bail!("server error: the festival server rejected the request");
  }
  Ok(())
}

fn print_festivals(festivals: &[FestivalSummary]) {
  for f in festivals {
    println!(
      "{:>5}  {:<20}  {:<20}  {} ~ {}  {}",
      f.festival_id, f.school_name, f.festival_name, f.begin_date, f.end_date, f.region
    );
  }
}

fn print_booth(booth: &BoothSummary, icon: &str) {
  let heart = if booth.is_liked { "♥" } else { " " };
  println!("{heart} {:>5}  {:<8}  {:<24}  {}  ({icon})", booth.id, booth.category, booth.name, booth.location);
}

fn print_detail(booth: &BoothDetail) {
  let heart = if booth.is_liked { "♥" } else { " " };
  println!(
    "{heart} {:>5}  {:<8}  {}  likes={}  {}",
    booth.id, booth.category, booth.name, booth.like_count, booth.location
  );
  for menu in &booth.menus {
    println!("         - {} {}원", menu.name, menu.price);
  }
}
