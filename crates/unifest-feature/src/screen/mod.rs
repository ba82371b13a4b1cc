//! One state holder per screen.

pub mod booth;
pub mod home;
pub mod intro;
pub mod liked_booth;
pub mod map;
pub mod menu;
pub mod waiting;
