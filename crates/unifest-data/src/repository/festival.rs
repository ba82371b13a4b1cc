//! [`FestivalRepository`]: festival lists from the server.

use std::sync::Arc;

use chrono::NaiveDate;
use unifest_api::RemoteGateway;
use unifest_core::{
  Result,
  festival::{FestivalSummary, FestivalToday, Region},
};

use crate::mapper;

pub struct FestivalRepository<G> {
  gateway: Arc<G>,
}

impl<G> Clone for FestivalRepository<G> {
  fn clone(&self) -> Self { Self { gateway: Arc::clone(&self.gateway) } }
}

impl<G: RemoteGateway> FestivalRepository<G> {
  pub fn new(gateway: Arc<G>) -> Self { Self { gateway } }

  pub async fn get_all_festivals(&self) -> Result<Vec<FestivalSummary>> {
    let list = self.gateway.fetch_all_festivals().await?;
    list.into_iter().map(mapper::festival_summary).collect()
  }

  /// Network search by school name.
  pub async fn search_school(&self, name: &str) -> Result<Vec<FestivalSummary>> {
    let list = self.gateway.search_schools(name).await?;
    list.into_iter().map(mapper::festival_summary).collect()
  }

  /// Festivals in `region`; [`Region::All`] lists every festival.
  pub async fn search_region(&self, region: Region) -> Result<Vec<FestivalSummary>> {
    if region == Region::All {
      return self.get_all_festivals().await;
    }
    let list = self.gateway.search_by_region(region.as_ref()).await?;
    list.into_iter().map(mapper::festival_summary).collect()
  }

  pub async fn get_today_festivals(&self, date: NaiveDate) -> Result<Vec<FestivalToday>> {
    let list = self.gateway.fetch_today_festivals(date).await?;
    list.into_iter().map(mapper::festival_today).collect()
  }
}

#[cfg(test)]
mod tests {
  use unifest_core::{Error, ErrorKind};

  use super::*;
  use crate::testing::{Failure, StubGateway, festival};

  fn repo(gw: &StubGateway) -> FestivalRepository<StubGateway> {
    FestivalRepository::new(Arc::new(gw.clone()))
  }

  #[tokio::test]
  async fn search_region_all_lists_everything() {
    let gw = StubGateway::new().with_festivals(vec![
      festival(1, "Seoul Univ", "서울"),
      festival(2, "Pusan Univ", "부산/울산"),
    ]);
    let list = repo(&gw).search_region(Region::All).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(gw.calls(), vec!["all"]);
  }

  #[tokio::test]
  async fn search_region_sends_server_name() {
    let gw = StubGateway::new().with_festivals(vec![
      festival(1, "Seoul Univ", "서울"),
      festival(2, "Pusan Univ", "부산/울산"),
    ]);
    let list = repo(&gw).search_region(Region::BusanUlsan).await.unwrap();
    assert_eq!(list.iter().map(|f| f.festival_id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(gw.calls(), vec!["region:부산/울산"]);
  }

  #[tokio::test]
  async fn failure_kind_passes_through_unchanged() {
    let gw = StubGateway::new();
    gw.fail_next(Failure::Server(500));
    let err = repo(&gw).search_school("Seoul").await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 500, .. }));

    gw.fail_next(Failure::Network);
    let err = repo(&gw).get_all_festivals().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
  }

  #[tokio::test]
  async fn malformed_date_fails_the_whole_list() {
    let mut bad = festival(3, "Korea Univ", "서울");
    bad.begin_date = "soon".into();
    let gw = StubGateway::new().with_festivals(vec![festival(1, "A", "서울"), bad]);
    let err = repo(&gw).get_all_festivals().await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
  }
}
