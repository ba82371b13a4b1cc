//! [`BoothRepository`]: booth lists and details from the server.

use std::sync::Arc;

use unifest_api::RemoteGateway;
use unifest_core::{
  Result,
  booth::{BoothDetail, BoothSummary},
};

use crate::mapper;

pub struct BoothRepository<G> {
  gateway: Arc<G>,
}

impl<G> Clone for BoothRepository<G> {
  fn clone(&self) -> Self { Self { gateway: Arc::clone(&self.gateway) } }
}

impl<G: RemoteGateway> BoothRepository<G> {
  pub fn new(gateway: Arc<G>) -> Self { Self { gateway } }

  /// Every booth of a festival. None is marked liked.
  pub async fn get_all_booths(&self, festival_id: i64) -> Result<Vec<BoothSummary>> {
    let list = self.gateway.fetch_all_booths(festival_id).await?;
    Ok(list.into_iter().map(mapper::booth_summary).collect())
  }

  /// Booth detail; `is_liked` is false until cross-checked with the store.
  pub async fn get_booth_detail(&self, booth_id: i64) -> Result<BoothDetail> {
    let detail = self.gateway.fetch_booth_detail(booth_id).await?;
    Ok(mapper::booth_detail(detail))
  }
}
