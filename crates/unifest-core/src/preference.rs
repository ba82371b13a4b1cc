//! Preference slots: the onboarding flags and the recently liked school.

use strum::{AsRefStr, Display, EnumIter};

/// A one-time onboarding step. Each flag is read and written on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum OnboardingFlag {
  #[strum(serialize = "intro_complete")]
  Intro,
  #[strum(serialize = "map_onboarding_complete")]
  MapOnboarding,
  #[strum(serialize = "festival_onboarding_complete")]
  FestivalOnboarding,
}

/// Key of the single string slot holding the most recently liked school.
pub const RECENT_LIKED_SCHOOL_KEY: &str = "recent_liked_school_name";

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn flag_keys_are_distinct() {
    let keys: Vec<String> = OnboardingFlag::iter().map(|f| f.to_string()).collect();
    assert_eq!(
      keys,
      ["intro_complete", "map_onboarding_complete", "festival_onboarding_complete"]
    );
    assert!(!keys.iter().any(|k| k == RECENT_LIKED_SCHOOL_KEY));
  }
}
