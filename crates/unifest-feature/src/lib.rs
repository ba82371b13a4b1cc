//! Per-screen state holders.
//!
//! Every holder publishes an immutable `UiState` snapshot through a
//! [`StateFlow`], hands out one-shot `UiEvent`s through an
//! [`unifest_core::event`] channel, and takes user input through an async
//! `on_action`. Holders that observe the liked collections keep those
//! subscriptions in a [`ScreenScope`], so dropping the holder stops them.

use std::sync::Arc;

use unifest_api::RemoteGateway;
use unifest_core::store::{FavoritesStore, PreferenceStore};
use unifest_data::{
  BoothRepository, FestivalRepository, LikedBoothRepository,
  LikedFestivalRepository, OnboardingRepository,
};

pub mod assets;
mod bookmark;
pub mod error;
pub mod message;
pub mod scope;
pub mod screen;
pub mod state;

#[cfg(test)]
mod test_support;

pub use bookmark::UNLIKE_ANIMATION_DELAY;
pub use error::{ButtonType, ErrorType};
pub use message::UiMessage;
pub use scope::ScreenScope;
pub use state::StateFlow;

/// Any backend that can hold both the liked collections and the preference
/// slots.
pub trait Store: FavoritesStore + PreferenceStore + 'static {}

impl<T: FavoritesStore + PreferenceStore + 'static> Store for T {}

/// The five repositories, built once at the composition root and handed to
/// each screen.
pub struct Repositories<G, S> {
  pub festival:       FestivalRepository<G>,
  pub booth:          BoothRepository<G>,
  pub liked_festival: LikedFestivalRepository<S>,
  pub liked_booth:    LikedBoothRepository<S>,
  pub onboarding:     OnboardingRepository<S>,
}

impl<G, S> Clone for Repositories<G, S> {
  fn clone(&self) -> Self {
    Self {
      festival:       self.festival.clone(),
      booth:          self.booth.clone(),
      liked_festival: self.liked_festival.clone(),
      liked_booth:    self.liked_booth.clone(),
      onboarding:     self.onboarding.clone(),
    }
  }
}

impl<G, S> Repositories<G, S>
where
  G: RemoteGateway + 'static,
  S: Store,
{
  pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
    Self {
      festival:       FestivalRepository::new(Arc::clone(&gateway)),
      booth:          BoothRepository::new(gateway),
      liked_festival: LikedFestivalRepository::new(Arc::clone(&store)),
      liked_booth:    LikedBoothRepository::new(Arc::clone(&store)),
      onboarding:     OnboardingRepository::new(store),
    }
  }
}
