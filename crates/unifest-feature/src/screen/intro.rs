//! First-launch screen: pick the festivals to follow.

use unifest_api::RemoteGateway;
use unifest_core::{
  event::{self, EventReceiver, EventSender},
  festival::{FestivalSummary, Region},
  live::LiveSequence,
};
use unifest_data::{FestivalRepository, LikedFestivalRepository, OnboardingRepository};

use crate::{
  Repositories, Store,
  error::{ErrorType, RetrySlot, dismiss_error, handle_error, impl_error_dialogs},
  state::StateFlow,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntroUiState {
  pub is_loading:                      bool,
  pub is_search_loading:               bool,
  pub search_text:                     String,
  pub festivals:                       Vec<FestivalSummary>,
  pub selected_region:                 Region,
  pub selected_festivals:              Vec<FestivalSummary>,
  pub is_network_error_dialog_visible: bool,
  pub is_server_error_dialog_visible:  bool,
}

impl_error_dialogs!(IntroUiState);

#[derive(Debug, Clone, PartialEq)]
pub enum IntroUiAction {
  SearchTextUpdated(String),
  SearchTextCleared,
  Search,
  RegionTabClicked(Region),
  FestivalSelected(FestivalSummary),
  FestivalDeselected(FestivalSummary),
  ClearSelection,
  AddComplete,
  Retry(ErrorType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntroUiEvent {
  NavigateToMain,
}

#[derive(Debug, Clone)]
enum Request {
  All,
  Search(String),
  Region(Region),
}

pub struct IntroHolder<G, S> {
  festivals:  FestivalRepository<G>,
  liked:      LikedFestivalRepository<S>,
  onboarding: OnboardingRepository<S>,
  state:      StateFlow<IntroUiState>,
  events:     EventSender<IntroUiEvent>,
  receiver:   EventReceiver<IntroUiEvent>,
  retry:      RetrySlot<Request>,
}

impl<G, S> IntroHolder<G, S>
where
  G: RemoteGateway + 'static,
  S: Store,
{
  pub fn new(repos: &Repositories<G, S>) -> Self {
    let (events, receiver) = event::channel();
    Self {
      festivals: repos.festival.clone(),
      liked: repos.liked_festival.clone(),
      onboarding: repos.onboarding.clone(),
      state: StateFlow::new(IntroUiState::default()),
      events,
      receiver,
      retry: RetrySlot::default(),
    }
  }

  pub fn state(&self) -> LiveSequence<IntroUiState> { self.state.subscribe() }

  pub fn current(&self) -> IntroUiState { self.state.value() }

  pub fn events(&self) -> EventReceiver<IntroUiEvent> { self.receiver.clone() }

  /// Load every festival, then skip straight to main when the intro was
  /// already completed.
  pub async fn start(&self) {
    self.state.update(|s| s.is_loading = true);
    self.load(Request::All).await;
    match self.onboarding.check_intro_completion().await {
      Ok(true) => self.events.send(IntroUiEvent::NavigateToMain),
      Ok(false) => self.state.update(|s| s.is_loading = false),
      Err(e) => {
        tracing::error!(error = %e, "failed to read intro flag");
        self.state.update(|s| s.is_loading = false);
      }
    }
  }

  pub async fn on_action(&self, action: IntroUiAction) {
    match action {
      IntroUiAction::SearchTextUpdated(text) => self.state.update(|s| s.search_text = text),
      IntroUiAction::SearchTextCleared => self.state.update(|s| s.search_text.clear()),
      IntroUiAction::Search => self.search().await,
      IntroUiAction::RegionTabClicked(region) => {
        self.state.update(|s| s.selected_region = region);
        self.load(Request::Region(region)).await;
      }
      IntroUiAction::FestivalSelected(festival) => self.state.update(|s| {
        if !s.selected_festivals.iter().any(|f| f.festival_id == festival.festival_id) {
          s.selected_festivals.push(festival);
        }
      }),
      IntroUiAction::FestivalDeselected(festival) => self.state.update(|s| {
        s.selected_festivals.retain(|f| f.festival_id != festival.festival_id)
      }),
      IntroUiAction::ClearSelection => self.state.update(|s| s.selected_festivals.clear()),
      IntroUiAction::AddComplete => self.add_complete().await,
      IntroUiAction::Retry(error) => {
        dismiss_error(&self.state, error);
        if let Some(request) = self.retry.take() {
          self.load(request).await;
        }
      }
    }
  }

  async fn search(&self) {
    let text = self.state.value().search_text;
    if text.is_empty() {
      return;
    }
    self.state.update(|s| s.is_search_loading = true);
    self.load(Request::Search(text)).await;
    self.state.update(|s| s.is_search_loading = false);
  }

  async fn load(&self, request: Request) {
    let result = match &request {
      Request::All => self.festivals.get_all_festivals().await,
      Request::Search(name) => self.festivals.search_school(name).await,
      Request::Region(region) => self.festivals.search_region(*region).await,
    };
    match result {
      Ok(festivals) => self.state.update(|s| s.festivals = festivals),
      Err(e) => {
        self.retry.remember(request);
        handle_error(&self.state, &e);
      }
    }
  }

  async fn add_complete(&self) {
    let selected = self.state.value().selected_festivals;
    for festival in &selected {
      if let Err(e) = self.liked.add_festival_from_search(festival).await {
        tracing::error!(festival_id = festival.festival_id, error = %e, "failed to like festival");
      }
    }
    if let Some(last) = selected.last() {
      if let Err(e) = self.liked.set_recently_liked_school_name(&last.school_name).await {
        tracing::error!(error = %e, "failed to store recently liked school");
      }
    }
    if let Err(e) = self.onboarding.complete_intro(true).await {
      tracing::error!(error = %e, "failed to complete intro");
    }
    self.events.send(IntroUiEvent::NavigateToMain);
  }
}
