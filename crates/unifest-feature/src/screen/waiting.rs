//! Waiting (line-up reservation) screen. Not open yet: it shows a fixed
//! notice and can only go back.

use unifest_core::event::{self, EventReceiver, EventSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingUiState {
  pub title:   &'static str,
  pub notice:  &'static str,
  pub is_open: bool,
}

impl Default for WaitingUiState {
  fn default() -> Self {
    Self { title: "웨이팅", notice: "준비 중인 서비스입니다", is_open: false }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitingUiAction {
  BackClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitingUiEvent {
  NavigateBack,
}

pub struct WaitingHolder {
  state:    WaitingUiState,
  events:   EventSender<WaitingUiEvent>,
  receiver: EventReceiver<WaitingUiEvent>,
}

impl Default for WaitingHolder {
  fn default() -> Self { Self::new() }
}

impl WaitingHolder {
  pub fn new() -> Self {
    let (events, receiver) = event::channel();
    Self { state: WaitingUiState::default(), events, receiver }
  }

  pub fn current(&self) -> WaitingUiState { self.state.clone() }

  pub fn events(&self) -> EventReceiver<WaitingUiEvent> { self.receiver.clone() }

  pub fn on_action(&self, action: WaitingUiAction) {
    match action {
      WaitingUiAction::BackClick => self.events.send(WaitingUiEvent::NavigateBack),
    }
  }
}
