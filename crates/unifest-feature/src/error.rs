//! Error-dialog handling shared by the screens.
//!
//! A failed request shows exactly one dialog for its category: network
//! failures the network dialog, server failures the server dialog. Every
//! other failure is only logged. The dialog's retry re-issues the request
//! that failed.

use std::sync::{Mutex, PoisonError};

use unifest_core::{Error, ErrorKind};

use crate::state::StateFlow;

/// Which error dialog a retry action dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
  Network,
  Server,
}

/// Confirm/cancel on a two-button dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
  Confirm,
  Cancel,
}

/// Implemented by every `UiState` that carries the two error dialogs.
pub trait ErrorDialogs {
  fn set_error_dialog_visible(&mut self, error: ErrorType, visible: bool);
}

macro_rules! impl_error_dialogs {
  ($($state:ty),* $(,)?) => {
    $(
      impl $crate::error::ErrorDialogs for $state {
        fn set_error_dialog_visible(
          &mut self,
          error: $crate::error::ErrorType,
          visible: bool,
        ) {
          match error {
            $crate::error::ErrorType::Network => {
              self.is_network_error_dialog_visible = visible
            }
            $crate::error::ErrorType::Server => {
              self.is_server_error_dialog_visible = visible
            }
          }
        }
      }
    )*
  };
}

pub(crate) use impl_error_dialogs;

/// Show the dialog for `err`'s category, or log it when there is none.
pub fn handle_error<T>(state: &StateFlow<T>, err: &Error)
where
  T: ErrorDialogs + Clone + PartialEq + Send + Sync + 'static,
{
  match err.kind() {
    ErrorKind::Network => {
      tracing::warn!(error = %err, "request failed: network");
      state.update(|s| s.set_error_dialog_visible(ErrorType::Network, true));
    }
    ErrorKind::Server => {
      tracing::warn!(error = %err, "request failed: server");
      state.update(|s| s.set_error_dialog_visible(ErrorType::Server, true));
    }
    ErrorKind::Other => tracing::error!(error = %err, "request failed"),
  }
}

pub fn dismiss_error<T>(state: &StateFlow<T>, error: ErrorType)
where
  T: ErrorDialogs + Clone + PartialEq + Send + Sync + 'static,
{
  state.update(|s| s.set_error_dialog_visible(error, false));
}

/// The most recent failed request of a screen, kept for its retry action.
pub struct RetrySlot<R> {
  last: Mutex<Option<R>>,
}

impl<R> Default for RetrySlot<R> {
  fn default() -> Self { Self { last: Mutex::new(None) } }
}

impl<R> RetrySlot<R> {
  pub fn remember(&self, request: R) {
    *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(request);
  }

  pub fn take(&self) -> Option<R> {
    self.last.lock().unwrap_or_else(PoisonError::into_inner).take()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, Default, PartialEq)]
  struct Dialogs {
    is_network_error_dialog_visible: bool,
    is_server_error_dialog_visible:  bool,
  }

  impl_error_dialogs!(Dialogs);

  #[test]
  fn each_kind_opens_its_own_dialog() {
    let state = StateFlow::new(Dialogs::default());

    handle_error(&state, &Error::Network("reset".into()));
    assert!(state.value().is_network_error_dialog_visible);
    assert!(!state.value().is_server_error_dialog_visible);

    handle_error(&state, &Error::Server { status: 500, message: "boom".into() });
    assert!(state.value().is_server_error_dialog_visible);

    dismiss_error(&state, ErrorType::Network);
    dismiss_error(&state, ErrorType::Server);
    handle_error(&state, &Error::MalformedResponse("bad date".into()));
    assert_eq!(state.value(), Dialogs::default());
  }

  #[test]
  fn retry_slot_hands_out_last_request_once() {
    let slot = RetrySlot::default();
    slot.remember("all");
    slot.remember("search:Seoul");
    assert_eq!(slot.take(), Some("search:Seoul"));
    assert_eq!(slot.take(), None);
  }
}
