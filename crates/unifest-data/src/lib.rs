//! Repositories: the layer between the remote gateway / local store and the
//! screens.
//!
//! Remote repositories map wire records into domain records and surface
//! failures unchanged. Liked repositories own the only mutation paths into the
//! persisted liked collections.

pub mod mapper;
pub mod repository;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use repository::{
  booth::BoothRepository,
  festival::FestivalRepository,
  liked_booth::LikedBoothRepository,
  liked_festival::{LikedFestivalRepository, LikedFestivals},
  onboarding::OnboardingRepository,
};
