//! Two-step booth unlike for list screens.
//!
//! The row is first marked unliked in the screen state, then removed from
//! the store after [`UNLIKE_ANIMATION_DELAY`]. The removal runs as a detached
//! task, so it completes even if the screen is torn down in between. If the
//! removal fails the row is marked liked again. A second unlike of a row
//! whose removal is still pending does nothing.

use std::{collections::BTreeSet, time::Duration};

use unifest_core::{booth::BoothDetail, event::EventSender, store::FavoritesStore};
use unifest_data::LikedBoothRepository;

use crate::state::StateFlow;

/// Time the unliked row stays visible before it leaves the list.
pub const UNLIKE_ANIMATION_DELAY: Duration = Duration::from_millis(500);

/// A `UiState` that shows the liked booths.
pub(crate) trait LikedBoothList {
  fn liked_booths_mut(&mut self) -> &mut Vec<BoothDetail>;

  /// Ids marked unliked whose removal has not finished yet.
  fn pending_unlike_mut(&mut self) -> &mut BTreeSet<i64>;
}

fn mark<T: LikedBoothList>(state: &mut T, booth_id: i64, liked: bool) {
  for booth in state.liked_booths_mut().iter_mut().filter(|b| b.id == booth_id) {
    booth.is_liked = liked;
  }
}

/// Replace the shown list with a fresh store snapshot, keeping pending
/// unlikes marked.
pub(crate) fn apply_liked_booths<T: LikedBoothList>(
  state: &mut T,
  booths: Vec<BoothDetail>,
) {
  let pending = state.pending_unlike_mut().clone();
  *state.liked_booths_mut() = booths
    .into_iter()
    .map(|b| BoothDetail { is_liked: !pending.contains(&b.id), ..b })
    .collect();
}

pub(crate) fn unlike_booth<T, S, E>(
  repo: LikedBoothRepository<S>,
  state: StateFlow<T>,
  events: EventSender<E>,
  booth: BoothDetail,
  delay: Duration,
  removed: E,
) where
  T: LikedBoothList + Clone + PartialEq + Send + Sync + 'static,
  S: FavoritesStore + 'static,
  E: Send + 'static,
{
  let booth_id = booth.id;
  let mut started = false;
  state.update(|s| {
    started = s.pending_unlike_mut().insert(booth_id);
    mark(s, booth_id, false);
  });
  if !started {
    tracing::debug!(booth_id, "unlike already pending");
    return;
  }

  tokio::spawn(async move {
    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }
    let result = repo.delete(&booth).await;
    state.update(|s| {
      s.pending_unlike_mut().remove(&booth_id);
    });
    match result {
      Ok(()) => events.send(removed),
      Err(e) => {
        tracing::error!(booth_id, error = %e, "failed to unlike booth; restoring");
        state.update(|s| mark(s, booth_id, true));
      }
    }
  });
}
