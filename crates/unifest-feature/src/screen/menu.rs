//! Menu screen: liked festivals, liked booths and the festival search sheet.
//!
//! Edit mode only changes what tapping a liked festival does: outside edit
//! mode the festival is picked, inside it a delete dialog opens. Edit mode
//! stays on across any number of deletes until `EditDone`.

use std::{collections::BTreeSet, time::Duration};

use unifest_api::RemoteGateway;
use unifest_core::{
  booth::BoothDetail,
  event::{self, EventReceiver, EventSender},
  festival::FestivalSummary,
  live::LiveSequence,
};
use unifest_data::{
  FestivalRepository, LikedBoothRepository, LikedFestivalRepository,
  OnboardingRepository,
};

use crate::{
  Repositories, Store,
  bookmark::{self, LikedBoothList, UNLIKE_ANIMATION_DELAY},
  error::{ButtonType, ErrorType, RetrySlot, dismiss_error, handle_error, impl_error_dialogs},
  message::UiMessage,
  scope::ScreenScope,
  state::StateFlow,
};

/// What the delete dialog removes on confirm.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
  One(FestivalSummary),
  All,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuUiState {
  pub liked_festivals:                  Vec<FestivalSummary>,
  pub liked_booths:                     Vec<BoothDetail>,
  pub pending_unlike:                   BTreeSet<i64>,
  pub is_search_sheet_visible:          bool,
  pub is_search_mode:                   bool,
  pub is_search_loading:                bool,
  pub search_text:                      String,
  /// What the search sheet lists: every festival, or the latest search hits.
  pub search_results:                   Vec<FestivalSummary>,
  /// `search_results` as it was before the first keystroke of the current
  /// search.
  pub search_baseline:                  Option<Vec<FestivalSummary>>,
  pub is_edit_mode:                     bool,
  pub delete_target:                    Option<DeleteTarget>,
  pub is_delete_dialog_visible:         bool,
  pub is_festival_onboarding_completed: bool,
  pub is_network_error_dialog_visible:  bool,
  pub is_server_error_dialog_visible:   bool,
}

impl_error_dialogs!(MenuUiState);

impl LikedBoothList for MenuUiState {
  fn liked_booths_mut(&mut self) -> &mut Vec<BoothDetail> { &mut self.liked_booths }

  fn pending_unlike_mut(&mut self) -> &mut BTreeSet<i64> { &mut self.pending_unlike }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuUiAction {
  // ── Search sheet ──────────────────────────────────────────────────────
  ShowSearchSheet,
  DismissSearchSheet,
  EnableSearchMode(bool),
  SearchTextUpdated(String),
  SearchTextCleared,
  AddFestival(FestivalSummary),
  TooltipClick,

  // ── Liked festivals ───────────────────────────────────────────────────
  EnterEditMode,
  EditDone,
  LikedFestivalTapped(FestivalSummary),
  DeleteAllClick,
  DeleteDialog(ButtonType),

  // ── Liked booths ──────────────────────────────────────────────────────
  ShowMoreLikedBooths,
  LikedBoothTapped(i64),
  ToggleBoothBookmark(BoothDetail),

  ContactClick,
  Retry(ErrorType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuUiEvent {
  FestivalPicked(i64),
  NavigateToLikedBooth,
  NavigateToBoothDetail(i64),
  NavigateToContact,
  ShowSnackbar(UiMessage),
}

#[derive(Debug, Clone)]
enum Request {
  All,
  Search(String),
}

pub struct MenuHolder<G, S> {
  festivals:    FestivalRepository<G>,
  liked:        LikedFestivalRepository<S>,
  liked_booths: LikedBoothRepository<S>,
  onboarding:   OnboardingRepository<S>,
  state:        StateFlow<MenuUiState>,
  events:       EventSender<MenuUiEvent>,
  receiver:     EventReceiver<MenuUiEvent>,
  retry:        RetrySlot<Request>,
  unlike_delay: Duration,
  scope:        ScreenScope,
}

impl<G, S> MenuHolder<G, S>
where
  G: RemoteGateway + 'static,
  S: Store,
{
  pub fn new(repos: &Repositories<G, S>) -> Self {
    let (events, receiver) = event::channel();
    let holder = Self {
      festivals: repos.festival.clone(),
      liked: repos.liked_festival.clone(),
      liked_booths: repos.liked_booth.clone(),
      onboarding: repos.onboarding.clone(),
      state: StateFlow::new(MenuUiState::default()),
      events,
      receiver,
      retry: RetrySlot::default(),
      unlike_delay: UNLIKE_ANIMATION_DELAY,
      scope: ScreenScope::new(),
    };

    let mut festivals = holder.liked.observe_liked_festivals();
    let state = holder.state.clone();
    holder.scope.spawn(async move {
      while let Some(list) = festivals.next().await {
        state.update(|s| s.liked_festivals = list);
      }
    });

    let mut booths = holder.liked_booths.observe_liked_booth_list();
    let state = holder.state.clone();
    holder.scope.spawn(async move {
      while let Some(list) = booths.next().await {
        state.update(|s| bookmark::apply_liked_booths(s, list));
      }
    });

    holder
  }

  /// How long an unliked booth stays visible before it is removed.
  pub fn with_unlike_delay(mut self, delay: Duration) -> Self {
    self.unlike_delay = delay;
    self
  }

  pub fn state(&self) -> LiveSequence<MenuUiState> { self.state.subscribe() }

  pub fn current(&self) -> MenuUiState { self.state.value() }

  pub fn events(&self) -> EventReceiver<MenuUiEvent> { self.receiver.clone() }

  pub async fn start(&self) {
    match self.onboarding.check_festival_onboarding_completion().await {
      Ok(done) => self.state.update(|s| s.is_festival_onboarding_completed = done),
      Err(e) => tracing::error!(error = %e, "failed to read festival onboarding flag"),
    }
  }

  /// Stop observing the liked collections.
  pub fn close(&self) { self.scope.close(); }

  pub async fn on_action(&self, action: MenuUiAction) {
    match action {
      MenuUiAction::ShowSearchSheet => {
        self.state.update(|s| s.is_search_sheet_visible = true);
        self.load(Request::All).await;
      }
      MenuUiAction::DismissSearchSheet => self.state.update(|s| {
        s.is_search_sheet_visible = false;
        s.is_search_mode = false;
      }),
      MenuUiAction::EnableSearchMode(flag) => self.state.update(|s| s.is_search_mode = flag),
      MenuUiAction::SearchTextUpdated(text) => self.update_search_text(text).await,
      MenuUiAction::SearchTextCleared => self.state.update(restore_baseline),
      MenuUiAction::AddFestival(festival) => {
        if let Err(e) = self.liked.add_festival_from_search(&festival).await {
          tracing::error!(festival_id = festival.festival_id, error = %e, "failed to like festival");
        }
      }
      MenuUiAction::TooltipClick => match self.onboarding.complete_festival_onboarding(true).await {
        Ok(()) => self.state.update(|s| s.is_festival_onboarding_completed = true),
        Err(e) => tracing::error!(error = %e, "failed to complete festival onboarding"),
      },

      MenuUiAction::EnterEditMode => self.state.update(|s| s.is_edit_mode = true),
      MenuUiAction::EditDone => self.state.update(|s| s.is_edit_mode = false),
      MenuUiAction::LikedFestivalTapped(festival) => self.tap_liked_festival(festival).await,
      MenuUiAction::DeleteAllClick => self.state.update(|s| {
        s.delete_target = Some(DeleteTarget::All);
        s.is_delete_dialog_visible = true;
      }),
      MenuUiAction::DeleteDialog(button) => self.close_delete_dialog(button).await,

      MenuUiAction::ShowMoreLikedBooths => self.events.send(MenuUiEvent::NavigateToLikedBooth),
      MenuUiAction::LikedBoothTapped(id) => self.events.send(MenuUiEvent::NavigateToBoothDetail(id)),
      MenuUiAction::ToggleBoothBookmark(booth) => bookmark::unlike_booth(
        self.liked_booths.clone(),
        self.state.clone(),
        self.events.clone(),
        booth,
        self.unlike_delay,
        MenuUiEvent::ShowSnackbar(UiMessage::BoothBookmarkRemoved),
      ),

      MenuUiAction::ContactClick => self.events.send(MenuUiEvent::NavigateToContact),
      MenuUiAction::Retry(error) => {
        dismiss_error(&self.state, error);
        if let Some(request) = self.retry.take() {
          self.load(request).await;
        }
      }
    }
  }

  async fn update_search_text(&self, text: String) {
    if text.is_empty() {
      self.state.update(restore_baseline);
      return;
    }
    self.state.update(|s| {
      if s.search_baseline.is_none() {
        s.search_baseline = Some(s.search_results.clone());
      }
      s.search_text = text.clone();
    });
    self.load(Request::Search(text)).await;
  }

  async fn load(&self, request: Request) {
    self.state.update(|s| {
      if s.is_current(&request) {
        s.is_search_loading = true;
      }
    });
    let result = match &request {
      Request::All => self.festivals.get_all_festivals().await,
      Request::Search(name) => self.festivals.search_school(name).await,
    };
    // A reply to an earlier keystroke must not touch the results or the
    // spinner of the current search.
    let mut current = false;
    match result {
      Ok(festivals) => self.state.update(|s| {
        current = s.is_current(&request);
        if current {
          s.search_results = festivals;
          s.is_search_loading = false;
        }
      }),
      Err(e) => {
        self.state.update(|s| {
          current = s.is_current(&request);
          if current {
            s.is_search_loading = false;
          }
        });
        if current {
          self.retry.remember(request);
          handle_error(&self.state, &e);
          return;
        }
      }
    }
    if !current {
      tracing::debug!(?request, "dropped stale festival reply");
    }
  }

  async fn tap_liked_festival(&self, festival: FestivalSummary) {
    if self.state.value().is_edit_mode {
      self.state.update(|s| {
        s.delete_target = Some(DeleteTarget::One(festival));
        s.is_delete_dialog_visible = true;
      });
      return;
    }
    if let Err(e) = self.liked.set_recently_liked_school_name(&festival.school_name).await {
      tracing::error!(error = %e, "failed to store recently liked school");
    }
    self.state.update(|s| s.is_search_sheet_visible = false);
    self.events.send(MenuUiEvent::FestivalPicked(festival.festival_id));
  }

  async fn close_delete_dialog(&self, button: ButtonType) {
    let mut target = None;
    self.state.update(|s| {
      s.is_delete_dialog_visible = false;
      target = s.delete_target.take();
    });
    if button == ButtonType::Cancel {
      return;
    }
    let result = match target {
      Some(DeleteTarget::One(festival)) => self.liked.remove_festival(&festival).await,
      Some(DeleteTarget::All) => self.liked.remove_all_festivals().await.map(|_| ()),
      None => Ok(()),
    };
    if let Err(e) = result {
      tracing::error!(error = %e, "failed to remove liked festival");
    }
  }
}

impl MenuUiState {
  /// Whether a reply to `request` still matches what the sheet shows.
  fn is_current(&self, request: &Request) -> bool {
    match request {
      Request::All => self.search_baseline.is_none(),
      Request::Search(name) => self.search_text == *name,
    }
  }
}

fn restore_baseline(s: &mut MenuUiState) {
  s.search_text.clear();
  s.is_search_loading = false;
  if let Some(baseline) = s.search_baseline.take() {
    s.search_results = baseline;
  }
}
