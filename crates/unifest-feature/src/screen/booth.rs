//! Booth detail screen.

use unifest_api::RemoteGateway;
use unifest_core::{
  booth::{BoothDetail, Menu},
  event::{self, EventReceiver, EventSender},
  live::LiveSequence,
};
use unifest_data::{BoothRepository, LikedBoothRepository};

use crate::{
  Repositories, Store,
  error::{ErrorType, RetrySlot, dismiss_error, handle_error, impl_error_dialogs},
  message::UiMessage,
  state::StateFlow,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoothUiState {
  pub is_loading:                      bool,
  pub booth:                           Option<BoothDetail>,
  pub is_menu_image_dialog_visible:    bool,
  pub selected_menu:                   Option<Menu>,
  pub is_network_error_dialog_visible: bool,
  pub is_server_error_dialog_visible:  bool,
}

impl_error_dialogs!(BoothUiState);

impl BoothUiState {
  pub fn is_liked(&self) -> bool { self.booth.as_ref().is_some_and(|b| b.is_liked) }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoothUiAction {
  BackClick,
  CheckLocationClick,
  ToggleBookmark,
  MenuImageClick(Menu),
  MenuImageDialogDismiss,
  Retry(ErrorType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoothUiEvent {
  NavigateBack,
  /// Show the booth on the map.
  NavigateToBoothLocation { booth_id: i64 },
  ShowSnackbar(UiMessage),
}

pub struct BoothHolder<G, S> {
  booths:       BoothRepository<G>,
  liked_booths: LikedBoothRepository<S>,
  booth_id:     i64,
  state:        StateFlow<BoothUiState>,
  events:       EventSender<BoothUiEvent>,
  receiver:     EventReceiver<BoothUiEvent>,
  retry:        RetrySlot<()>,
}

impl<G, S> BoothHolder<G, S>
where
  G: RemoteGateway + 'static,
  S: Store,
{
  pub fn new(repos: &Repositories<G, S>, booth_id: i64) -> Self {
    let (events, receiver) = event::channel();
    Self {
      booths: repos.booth.clone(),
      liked_booths: repos.liked_booth.clone(),
      booth_id,
      state: StateFlow::new(BoothUiState::default()),
      events,
      receiver,
      retry: RetrySlot::default(),
    }
  }

  pub fn state(&self) -> LiveSequence<BoothUiState> { self.state.subscribe() }

  pub fn current(&self) -> BoothUiState { self.state.value() }

  pub fn events(&self) -> EventReceiver<BoothUiEvent> { self.receiver.clone() }

  pub async fn start(&self) { self.load().await; }

  pub async fn on_action(&self, action: BoothUiAction) {
    match action {
      BoothUiAction::BackClick => self.events.send(BoothUiEvent::NavigateBack),
      BoothUiAction::CheckLocationClick => {
        self.events.send(BoothUiEvent::NavigateToBoothLocation { booth_id: self.booth_id })
      }
      BoothUiAction::ToggleBookmark => self.toggle_bookmark().await,
      BoothUiAction::MenuImageClick(menu) => self.state.update(|s| {
        s.selected_menu = Some(menu);
        s.is_menu_image_dialog_visible = true;
      }),
      BoothUiAction::MenuImageDialogDismiss => self.state.update(|s| {
        s.selected_menu = None;
        s.is_menu_image_dialog_visible = false;
      }),
      BoothUiAction::Retry(error) => {
        dismiss_error(&self.state, error);
        if self.retry.take().is_some() {
          self.load().await;
        }
      }
    }
  }

  async fn load(&self) {
    self.state.update(|s| s.is_loading = true);
    match self.booths.get_booth_detail(self.booth_id).await {
      Ok(detail) => {
        let is_liked = self.liked_booths.is_liked(&detail).await.unwrap_or_else(|e| {
          tracing::error!(booth_id = self.booth_id, error = %e, "failed to read bookmark");
          false
        });
        self.state.update(|s| s.booth = Some(BoothDetail { is_liked, ..detail }));
      }
      Err(e) => {
        self.retry.remember(());
        handle_error(&self.state, &e);
      }
    }
    self.state.update(|s| s.is_loading = false);
  }

  /// Bookmark or unbookmark the shown booth. The like count moves with it.
  /// A failed store write leaves the screen as it was.
  async fn toggle_bookmark(&self) {
    let Some(current) = self.state.value().booth else {
      return;
    };

    let (next, result, message) = if current.is_liked {
      let next = BoothDetail {
        is_liked: false,
        like_count: (current.like_count - 1).max(0),
        ..current
      };
      let result = self.liked_booths.delete(&next).await;
      (next, result, UiMessage::BoothBookmarkRemoved)
    } else {
      let next = BoothDetail { is_liked: true, like_count: current.like_count + 1, ..current };
      let result = self.liked_booths.insert(&next).await;
      (next, result, UiMessage::BoothBookmarked)
    };

    match result {
      Ok(()) => {
        self.state.update(|s| s.booth = Some(next));
        self.events.send(BoothUiEvent::ShowSnackbar(message));
      }
      Err(e) => tracing::error!(booth_id = self.booth_id, error = %e, "failed to toggle bookmark"),
    }
  }
}
