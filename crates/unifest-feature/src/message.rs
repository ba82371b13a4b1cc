//! Transient messages shown in a snackbar.

use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UiMessage {
  #[strum(to_string = "관심 부스에 추가되었어요")]
  BoothBookmarked,
  #[strum(to_string = "관심 부스에서 삭제되었어요")]
  BoothBookmarkRemoved,
  #[strum(to_string = "관심 축제에 추가되었어요")]
  FestivalLiked,
}
