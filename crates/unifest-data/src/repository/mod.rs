//! One repository per concern. Each is cheap to clone and shares its
//! backend through an `Arc`.

pub mod booth;
pub mod festival;
pub mod liked_booth;
pub mod liked_festival;
pub mod onboarding;
