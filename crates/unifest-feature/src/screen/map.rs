//! Map screen: every booth of the festival, with liked booths marked.
//!
//! Name search on this screen filters the loaded booths locally; it never
//! calls the server.

use std::collections::{BTreeMap, BTreeSet};

use unifest_api::RemoteGateway;
use unifest_core::{
  booth::BoothSummary,
  event::{self, EventReceiver, EventSender},
  live::LiveSequence,
};
use unifest_data::{BoothRepository, LikedBoothRepository, OnboardingRepository};

use crate::{
  Repositories, Store,
  assets,
  error::{ErrorType, RetrySlot, dismiss_error, handle_error, impl_error_dialogs},
  scope::ScreenScope,
  state::StateFlow,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapUiState {
  pub festival_id:                     i64,
  pub is_loading:                      bool,
  pub booths:                          Vec<BoothSummary>,
  pub search_text:                     String,
  /// Loaded booths whose name contains `search_text`.
  pub search_results:                  Vec<BoothSummary>,
  pub selected_booths:                 Vec<BoothSummary>,
  pub is_popular_mode:                 bool,
  /// Loaded booths by like count, highest first. Booths with no known
  /// count come last in load order.
  pub popular_booths:                  Vec<BoothSummary>,
  pub like_counts:                     BTreeMap<i64, i32>,
  pub is_map_onboarding_completed:     bool,
  pub is_network_error_dialog_visible: bool,
  pub is_server_error_dialog_visible:  bool,
}

impl_error_dialogs!(MapUiState);

impl MapUiState {
  /// Marker icon for a loaded booth.
  pub fn marker_icon(&self, booth: &BoothSummary) -> &'static str {
    let selected = self.selected_booths.iter().any(|b| b.id == booth.id);
    assets::marker_icon(booth.category, selected)
  }

  fn refresh(&mut self) {
    self.search_results = if self.search_text.is_empty() {
      Vec::new()
    } else {
      self
        .booths
        .iter()
        .filter(|b| b.name.contains(self.search_text.as_str()))
        .cloned()
        .collect()
    };

    let mut popular = self.booths.clone();
    popular.sort_by_key(|b| std::cmp::Reverse(self.like_counts.get(&b.id).copied().unwrap_or(-1)));
    self.popular_booths = popular;

    let booths = &self.booths;
    for selected in &mut self.selected_booths {
      if let Some(fresh) = booths.iter().find(|b| b.id == selected.id) {
        *selected = fresh.clone();
      }
    }
  }

  fn mark_liked(&mut self, liked: &BTreeSet<i64>) {
    for booth in &mut self.booths {
      booth.is_liked = liked.contains(&booth.id);
    }
    self.refresh();
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapUiAction {
  SearchTextUpdated(String),
  SearchTextCleared,
  BoothMarkerClick(Vec<i64>),
  TogglePopularBooth,
  TooltipClick,
  BoothItemClick(i64),
  Retry(ErrorType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapUiEvent {
  NavigateToBoothDetail(i64),
}

pub struct MapHolder<G, S> {
  booths:       BoothRepository<G>,
  liked_booths: LikedBoothRepository<S>,
  onboarding:   OnboardingRepository<S>,
  state:        StateFlow<MapUiState>,
  events:       EventSender<MapUiEvent>,
  receiver:     EventReceiver<MapUiEvent>,
  retry:        RetrySlot<()>,
  scope:        ScreenScope,
}

impl<G, S> MapHolder<G, S>
where
  G: RemoteGateway + 'static,
  S: Store,
{
  pub fn new(repos: &Repositories<G, S>, festival_id: i64) -> Self {
    let (events, receiver) = event::channel();
    let holder = Self {
      booths: repos.booth.clone(),
      liked_booths: repos.liked_booth.clone(),
      onboarding: repos.onboarding.clone(),
      state: StateFlow::new(MapUiState { festival_id, ..Default::default() }),
      events,
      receiver,
      retry: RetrySlot::default(),
      scope: ScreenScope::new(),
    };

    // Bookmarks toggled on other screens show up here.
    let mut liked = holder.liked_booths.observe_liked_booth_list();
    let state = holder.state.clone();
    holder.scope.spawn(async move {
      while let Some(list) = liked.next().await {
        let ids: BTreeSet<i64> = list.iter().map(|b| b.id).collect();
        state.update(|s| {
          s.like_counts = list.iter().map(|b| (b.id, b.like_count)).collect();
          s.mark_liked(&ids);
        });
      }
    });

    holder
  }

  pub fn state(&self) -> LiveSequence<MapUiState> { self.state.subscribe() }

  pub fn current(&self) -> MapUiState { self.state.value() }

  pub fn events(&self) -> EventReceiver<MapUiEvent> { self.receiver.clone() }

  pub fn close(&self) { self.scope.close(); }

  pub async fn start(&self) {
    match self.onboarding.check_map_onboarding_completion().await {
      Ok(done) => self.state.update(|s| s.is_map_onboarding_completed = done),
      Err(e) => tracing::error!(error = %e, "failed to read map onboarding flag"),
    }
    self.load().await;
  }

  pub async fn on_action(&self, action: MapUiAction) {
    match action {
      MapUiAction::SearchTextUpdated(text) => self.state.update(|s| {
        s.search_text = text;
        s.refresh();
      }),
      MapUiAction::SearchTextCleared => self.state.update(|s| {
        s.search_text.clear();
        s.refresh();
      }),
      MapUiAction::BoothMarkerClick(ids) => self.state.update(|s| {
        s.selected_booths = s.booths.iter().filter(|b| ids.contains(&b.id)).cloned().collect();
      }),
      MapUiAction::TogglePopularBooth => self.state.update(|s| s.is_popular_mode = !s.is_popular_mode),
      MapUiAction::TooltipClick => match self.onboarding.complete_map_onboarding(true).await {
        Ok(()) => self.state.update(|s| s.is_map_onboarding_completed = true),
        Err(e) => tracing::error!(error = %e, "failed to complete map onboarding"),
      },
      MapUiAction::BoothItemClick(id) => self.events.send(MapUiEvent::NavigateToBoothDetail(id)),
      MapUiAction::Retry(error) => {
        dismiss_error(&self.state, error);
        if self.retry.take().is_some() {
          self.load().await;
        }
      }
    }
  }

  async fn load(&self) {
    let festival_id = self.state.value().festival_id;
    self.state.update(|s| s.is_loading = true);
    match self.booths.get_all_booths(festival_id).await {
      Ok(booths) => {
        let liked = match self.liked_booths.get_liked_booth_ids().await {
          Ok(liked) => liked.into_iter().map(|b| b.id).collect(),
          Err(e) => {
            tracing::error!(error = %e, "failed to read liked booths");
            BTreeSet::new()
          }
        };
        self.state.update(|s| {
          s.booths = booths;
          s.mark_liked(&liked);
        });
      }
      Err(e) => {
        self.retry.remember(());
        handle_error(&self.state, &e);
      }
    }
    self.state.update(|s| s.is_loading = false);
  }
}

#[cfg(test)]
mod tests {
  use unifest_data::{
    mapper,
    testing::{Failure, StubGateway, booth},
  };

  use super::*;
  use crate::test_support::{next_event, repos, wait_for};

  fn gateway() -> StubGateway {
    let mut popular = booth(2, "FOOD", 40);
    popular.name = "Tteokbokki".into();
    StubGateway::new().with_booths(vec![booth(1, "BAR", 5), popular, booth(3, "TOILET", 0)])
  }

  #[tokio::test]
  async fn liked_booths_are_marked_on_load() {
    let gw = gateway();
    let (repos, _) = repos(&gw).await;
    repos.liked_booth.insert(&mapper::booth_detail(booth(3, "TOILET", 0))).await.unwrap();

    let holder = MapHolder::new(&repos, 9);
    holder.start().await;

    let state = holder.current();
    let liked: Vec<_> = state.booths.iter().filter(|b| b.is_liked).map(|b| b.id).collect();
    assert_eq!(liked, vec![3]);
    assert_eq!(gw.calls(), vec!["booths:9"]);
  }

  #[tokio::test]
  async fn search_filters_loaded_booths_locally() {
    let gw = gateway();
    let (repos, _) = repos(&gw).await;
    let holder = MapHolder::new(&repos, 9);
    holder.start().await;

    holder.on_action(MapUiAction::SearchTextUpdated("Tteok".into())).await;
    let hits: Vec<_> = holder.current().search_results.iter().map(|b| b.id).collect();
    assert_eq!(hits, vec![2]);

    holder.on_action(MapUiAction::SearchTextCleared).await;
    assert!(holder.current().search_results.is_empty());
    assert_eq!(gw.calls(), vec!["booths:9"]);
  }

  #[tokio::test]
  async fn popular_order_uses_known_like_counts() {
    let gw = gateway();
    let (repos, _) = repos(&gw).await;
    repos.liked_booth.insert(&mapper::booth_detail(booth(1, "BAR", 5))).await.unwrap();
    repos.liked_booth.insert(&mapper::booth_detail(booth(2, "FOOD", 40))).await.unwrap();

    let holder = MapHolder::new(&repos, 9);
    holder.start().await;
    holder.on_action(MapUiAction::TogglePopularBooth).await;

    let state = wait_for(&mut holder.state(), |s| s.like_counts.len() == 2).await;
    assert!(state.is_popular_mode);
    let order: Vec<_> = state.popular_booths.iter().map(|b| b.id).collect();
    assert_eq!(order, vec![2, 1, 3]);
  }

  #[tokio::test]
  async fn selected_marker_uses_selected_icon() {
    let (repos, _) = repos(&gateway()).await;
    let holder = MapHolder::new(&repos, 9);
    holder.start().await;
    holder.on_action(MapUiAction::BoothMarkerClick(vec![1])).await;

    let state = holder.current();
    assert_eq!(state.selected_booths.len(), 1);
    assert_eq!(state.marker_icon(&state.booths[0]), "ic_marker_bar_selected");
    assert_eq!(state.marker_icon(&state.booths[2]), "ic_marker_toilet");
  }

  #[tokio::test]
  async fn server_error_then_retry_loads() {
    let gw = gateway();
    let (repos, _) = repos(&gw).await;
    let holder = MapHolder::new(&repos, 9);

    gw.fail_next(Failure::Server(500));
    holder.start().await;
    assert!(holder.current().is_server_error_dialog_visible);
    assert!(holder.current().booths.is_empty());

    holder.on_action(MapUiAction::Retry(ErrorType::Server)).await;
    assert_eq!(holder.current().booths.len(), 3);
  }

  #[tokio::test]
  async fn tooltip_and_navigation() {
    let (repos, _) = repos(&gateway()).await;
    let holder = MapHolder::new(&repos, 9);
    holder.on_action(MapUiAction::TooltipClick).await;
    assert!(repos.onboarding.check_map_onboarding_completion().await.unwrap());

    holder.on_action(MapUiAction::BoothItemClick(2)).await;
    assert_eq!(next_event(&holder.events()).await, MapUiEvent::NavigateToBoothDetail(2));
  }
}
