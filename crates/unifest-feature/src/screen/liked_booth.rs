//! Liked-booth list screen.

use std::{collections::BTreeSet, time::Duration};

use unifest_core::{
  booth::BoothDetail,
  event::{self, EventReceiver, EventSender},
  live::LiveSequence,
  store::FavoritesStore,
};
use unifest_data::LikedBoothRepository;

use crate::{
  bookmark::{self, LikedBoothList, UNLIKE_ANIMATION_DELAY},
  message::UiMessage,
  scope::ScreenScope,
  state::StateFlow,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikedBoothUiState {
  pub liked_booths:   Vec<BoothDetail>,
  pub pending_unlike: BTreeSet<i64>,
}

impl LikedBoothList for LikedBoothUiState {
  fn liked_booths_mut(&mut self) -> &mut Vec<BoothDetail> { &mut self.liked_booths }

  fn pending_unlike_mut(&mut self) -> &mut BTreeSet<i64> { &mut self.pending_unlike }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LikedBoothUiAction {
  BackClick,
  LikedBoothItemClick(i64),
  ToggleBookmark(BoothDetail),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikedBoothUiEvent {
  NavigateBack,
  NavigateToBoothDetail(i64),
  ShowSnackbar(UiMessage),
}

pub struct LikedBoothHolder<S> {
  liked_booths: LikedBoothRepository<S>,
  state:        StateFlow<LikedBoothUiState>,
  events:       EventSender<LikedBoothUiEvent>,
  receiver:     EventReceiver<LikedBoothUiEvent>,
  unlike_delay: Duration,
  scope:        ScreenScope,
}

impl<S: FavoritesStore + 'static> LikedBoothHolder<S> {
  pub fn new(liked_booths: LikedBoothRepository<S>) -> Self {
    let (events, receiver) = event::channel();
    let holder = Self {
      liked_booths,
      state: StateFlow::new(LikedBoothUiState::default()),
      events,
      receiver,
      unlike_delay: UNLIKE_ANIMATION_DELAY,
      scope: ScreenScope::new(),
    };

    let mut booths = holder.liked_booths.observe_liked_booth_list();
    let state = holder.state.clone();
    holder.scope.spawn(async move {
      while let Some(list) = booths.next().await {
        state.update(|s| bookmark::apply_liked_booths(s, list));
      }
    });

    holder
  }

  pub fn with_unlike_delay(mut self, delay: Duration) -> Self {
    self.unlike_delay = delay;
    self
  }

  pub fn state(&self) -> LiveSequence<LikedBoothUiState> { self.state.subscribe() }

  pub fn current(&self) -> LikedBoothUiState { self.state.value() }

  pub fn events(&self) -> EventReceiver<LikedBoothUiEvent> { self.receiver.clone() }

  pub fn close(&self) { self.scope.close(); }

  pub async fn on_action(&self, action: LikedBoothUiAction) {
    match action {
      LikedBoothUiAction::BackClick => self.events.send(LikedBoothUiEvent::NavigateBack),
      LikedBoothUiAction::LikedBoothItemClick(id) => {
        self.events.send(LikedBoothUiEvent::NavigateToBoothDetail(id))
      }
      LikedBoothUiAction::ToggleBookmark(booth) => bookmark::unlike_booth(
        self.liked_booths.clone(),
        self.state.clone(),
        self.events.clone(),
        booth,
        self.unlike_delay,
        LikedBoothUiEvent::ShowSnackbar(UiMessage::BoothBookmarkRemoved),
      ),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use unifest_core::booth::BoothCategory;
  use unifest_store_sqlite::SqliteStore;

  use super::*;
  use crate::test_support::{next_event, wait_for};

  fn detail(id: i64) -> BoothDetail {
    BoothDetail {
      id,
      name:        format!("booth {id}"),
      category:    BoothCategory::Food,
      description: String::new(),
      thumbnail:   String::new(),
      warning:     String::new(),
      location:    String::new(),
      latitude:    37.54,
      longitude:   127.07,
      menus:       Vec::new(),
      like_count:  3,
      is_liked:    true,
    }
  }

  async fn repo() -> LikedBoothRepository<SqliteStore> {
    LikedBoothRepository::new(Arc::new(SqliteStore::open_in_memory().await.unwrap()))
  }

  #[tokio::test]
  async fn list_follows_store() {
    let repo = repo().await;
    let holder = LikedBoothHolder::new(repo.clone());
    wait_for(&mut holder.state(), |s| s.liked_booths.is_empty()).await;

    repo.insert(&detail(1)).await.unwrap();
    repo.insert(&detail(2)).await.unwrap();
    let state = wait_for(&mut holder.state(), |s| s.liked_booths.len() == 2).await;
    assert!(state.liked_booths.iter().all(|b| b.is_liked));
  }

  #[tokio::test]
  async fn unlike_removes_only_that_booth() {
    let repo = repo().await;
    repo.insert(&detail(1)).await.unwrap();
    repo.insert(&detail(2)).await.unwrap();
    let holder = LikedBoothHolder::new(repo.clone()).with_unlike_delay(Duration::ZERO);
    wait_for(&mut holder.state(), |s| s.liked_booths.len() == 2).await;

    holder.on_action(LikedBoothUiAction::ToggleBookmark(detail(1))).await;
    assert_eq!(
      next_event(&holder.events()).await,
      LikedBoothUiEvent::ShowSnackbar(UiMessage::BoothBookmarkRemoved)
    );

    let state = wait_for(&mut holder.state(), |s| s.liked_booths.len() == 1).await;
    assert_eq!(state.liked_booths[0].id, 2);
    assert!(state.pending_unlike.is_empty());
    assert!(repo.is_liked(&detail(2)).await.unwrap());
  }

  #[tokio::test]
  async fn navigation_events_are_one_shot() {
    let holder = LikedBoothHolder::new(repo().await);
    holder.on_action(LikedBoothUiAction::LikedBoothItemClick(5)).await;
    holder.on_action(LikedBoothUiAction::BackClick).await;

    let events = holder.events();
    assert_eq!(events.try_recv(), Some(LikedBoothUiEvent::NavigateToBoothDetail(5)));
    assert_eq!(events.try_recv(), Some(LikedBoothUiEvent::NavigateBack));
    assert_eq!(holder.events().try_recv(), None);
  }
}
