//! [`OnboardingRepository`]: one-time intro and tooltip completion flags.

use std::sync::Arc;

use unifest_core::{
  Error, Result,
  preference::OnboardingFlag,
  store::PreferenceStore,
};

pub struct OnboardingRepository<S> {
  store: Arc<S>,
}

impl<S> Clone for OnboardingRepository<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PreferenceStore> OnboardingRepository<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  async fn check(&self, flag: OnboardingFlag) -> Result<bool> {
    self.store.get_flag(flag).await.map_err(Error::store)
  }

  async fn complete(&self, flag: OnboardingFlag, value: bool) -> Result<()> {
    self.store.set_flag(flag, value).await.map_err(Error::store)
  }

  pub async fn check_intro_completion(&self) -> Result<bool> {
    self.check(OnboardingFlag::Intro).await
  }

  pub async fn complete_intro(&self, flag: bool) -> Result<()> {
    self.complete(OnboardingFlag::Intro, flag).await
  }

  pub async fn check_map_onboarding_completion(&self) -> Result<bool> {
    self.check(OnboardingFlag::MapOnboarding).await
  }

  pub async fn complete_map_onboarding(&self, flag: bool) -> Result<()> {
    self.complete(OnboardingFlag::MapOnboarding, flag).await
  }

  pub async fn check_festival_onboarding_completion(&self) -> Result<bool> {
    self.check(OnboardingFlag::FestivalOnboarding).await
  }

  pub async fn complete_festival_onboarding(&self, flag: bool) -> Result<()> {
    self.complete(OnboardingFlag::FestivalOnboarding, flag).await
  }
}
