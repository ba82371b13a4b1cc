//! Home screen: today's festivals and their line-ups.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use unifest_api::RemoteGateway;
use unifest_core::{
  event::{self, EventReceiver, EventSender},
  festival::FestivalToday,
  live::LiveSequence,
};
use unifest_data::{FestivalRepository, LikedFestivalRepository};

use crate::{
  Repositories, Store,
  error::{ErrorType, RetrySlot, dismiss_error, handle_error, impl_error_dialogs},
  message::UiMessage,
  scope::ScreenScope,
  state::StateFlow,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeUiState {
  pub is_loading:                      bool,
  pub selected_date:                   Option<NaiveDate>,
  pub today_festivals:                 Vec<FestivalToday>,
  /// Ids of the festivals currently liked, for the heart on each card.
  pub liked_festival_ids:              BTreeSet<i64>,
  pub is_network_error_dialog_visible: bool,
  pub is_server_error_dialog_visible:  bool,
}

impl_error_dialogs!(HomeUiState);

#[derive(Debug, Clone, PartialEq)]
pub enum HomeUiAction {
  DateSelected(NaiveDate),
  AddLikedFestival(FestivalToday),
  Retry(ErrorType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeUiEvent {
  ShowSnackbar(UiMessage),
}

pub struct HomeHolder<G, S> {
  festivals: FestivalRepository<G>,
  liked:     LikedFestivalRepository<S>,
  state:     StateFlow<HomeUiState>,
  events:    EventSender<HomeUiEvent>,
  receiver:  EventReceiver<HomeUiEvent>,
  retry:     RetrySlot<NaiveDate>,
  scope:     ScreenScope,
}

impl<G, S> HomeHolder<G, S>
where
  G: RemoteGateway + 'static,
  S: Store,
{
  pub fn new(repos: &Repositories<G, S>) -> Self {
    let (events, receiver) = event::channel();
    let holder = Self {
      festivals: repos.festival.clone(),
      liked: repos.liked_festival.clone(),
      state: StateFlow::new(HomeUiState::default()),
      events,
      receiver,
      retry: RetrySlot::default(),
      scope: ScreenScope::new(),
    };

    let mut liked = holder.liked.observe_liked_festivals();
    let state = holder.state.clone();
    holder.scope.spawn(async move {
      while let Some(festivals) = liked.next().await {
        state.update(|s| {
          s.liked_festival_ids = festivals.iter().map(|f| f.festival_id).collect()
        });
      }
    });

    holder
  }

  pub fn state(&self) -> LiveSequence<HomeUiState> { self.state.subscribe() }

  pub fn current(&self) -> HomeUiState { self.state.value() }

  pub fn events(&self) -> EventReceiver<HomeUiEvent> { self.receiver.clone() }

  pub async fn start(&self, today: NaiveDate) { self.load(today).await; }

  pub async fn on_action(&self, action: HomeUiAction) {
    match action {
      HomeUiAction::DateSelected(date) => self.load(date).await,
      HomeUiAction::AddLikedFestival(festival) => {
        match self.liked.add_festival_from_detail_view(&festival).await {
          Ok(()) => {
            if let Err(e) = self.liked.set_recently_liked_school_name(&festival.school_name).await {
              tracing::error!(error = %e, "failed to store recently liked school");
            }
            self.events.send(HomeUiEvent::ShowSnackbar(UiMessage::FestivalLiked));
          }
          Err(e) => {
            tracing::error!(festival_id = festival.festival_id, error = %e, "failed to like festival")
          }
        }
      }
      HomeUiAction::Retry(error) => {
        dismiss_error(&self.state, error);
        if let Some(date) = self.retry.take() {
          self.load(date).await;
        }
      }
    }
  }

  async fn load(&self, date: NaiveDate) {
    self.state.update(|s| {
      s.is_loading = true;
      s.selected_date = Some(date);
    });
    match self.festivals.get_today_festivals(date).await {
      Ok(festivals) => self.state.update(|s| s.today_festivals = festivals),
      Err(e) => {
        self.retry.remember(date);
        handle_error(&self.state, &e);
      }
    }
    self.state.update(|s| s.is_loading = false);
  }
}
