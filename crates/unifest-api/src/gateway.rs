//! The [`RemoteGateway`] contract and its HTTP implementation.

use std::{future::Future, time::Duration};

use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
  error::{Error, Result},
  response::{
    BoothDetailResponse, BoothResponse, Envelope, FestivalResponse,
    FestivalTodayResponse,
  },
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Stateless request/response calls against the festival server.
///
/// Every call resolves to a success value or a classified [`Error`]; none
/// retries.
pub trait RemoteGateway: Send + Sync {
  /// `GET /festival/all`
  fn fetch_all_festivals(
    &self,
  ) -> impl Future<Output = Result<Vec<FestivalResponse>>> + Send + '_;

  /// `GET /festival/search?name=<query>`
  fn search_schools<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<FestivalResponse>>> + Send + 'a;

  /// `GET /festival/region?region=<region>`
  fn search_by_region<'a>(
    &'a self,
    region: &'a str,
  ) -> impl Future<Output = Result<Vec<FestivalResponse>>> + Send + 'a;

  /// `GET /festival/today?date=<YYYY-MM-DD>`
  fn fetch_today_festivals(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<FestivalTodayResponse>>> + Send + '_;

  /// `GET /festival/{festival_id}/booths`
  fn fetch_all_booths(
    &self,
    festival_id: i64,
  ) -> impl Future<Output = Result<Vec<BoothResponse>>> + Send + '_;

  /// `GET /booths/{booth_id}`
  fn fetch_booth_detail(
    &self,
    booth_id: i64,
  ) -> impl Future<Output = Result<BoothDetailResponse>> + Send + '_;
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

/// Connection settings for the festival server.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
  pub base_url: String,
  /// Applied per request; an elapsed timeout is reported as a network error.
  pub timeout:  Duration,
}

/// Async HTTP client for the Unifest REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpGateway {
  client: Client,
  config: GatewayConfig,
}

impl HttpGateway {
  pub fn new(config: GatewayConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Issue a GET and unwrap the envelope's `data`.
  async fn get<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<T> {
    let url = self.url(path);
    tracing::debug!(%url, "GET");

    let network = |source: reqwest::Error| Error::Network {
      path:   path.to_owned(),
      source: Box::new(source),
    };

    let resp = self
      .client
      .get(&url)
      .query(query)
      .send()
      .await
      .map_err(network)?;

    let status = resp.status();
    if !status.is_success() {
      tracing::warn!(%url, %status, "request rejected");
      return Err(Error::Status { path: path.to_owned(), status: status.as_u16() });
    }

    let body = resp.bytes().await.map_err(network)?;
    let envelope: Envelope<T> =
      serde_json::from_slice(&body).map_err(|e| Error::Malformed {
        path:   path.to_owned(),
        reason: e.to_string(),
      })?;

    envelope.data.ok_or_else(|| Error::Malformed {
      path:   path.to_owned(),
      reason: "missing `data`".to_owned(),
    })
  }
}

impl RemoteGateway for HttpGateway {
  async fn fetch_all_festivals(&self) -> Result<Vec<FestivalResponse>> {
    self.get("/festival/all", &[]).await
  }

  async fn search_schools(&self, query: &str) -> Result<Vec<FestivalResponse>> {
    self.get("/festival/search", &[("name", query.to_owned())]).await
  }

  async fn search_by_region(&self, region: &str) -> Result<Vec<FestivalResponse>> {
    self.get("/festival/region", &[("region", region.to_owned())]).await
  }

  async fn fetch_today_festivals(
    &self,
    date: NaiveDate,
  ) -> Result<Vec<FestivalTodayResponse>> {
    self
      .get("/festival/today", &[("date", date.format("%Y-%m-%d").to_string())])
      .await
  }

  async fn fetch_all_booths(&self, festival_id: i64) -> Result<Vec<BoothResponse>> {
    self.get(&format!("/festival/{festival_id}/booths"), &[]).await
  }

  async fn fetch_booth_detail(&self, booth_id: i64) -> Result<BoothDetailResponse> {
    self.get(&format!("/booths/{booth_id}"), &[]).await
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
  };
  use tokio::net::TcpListener;

  use super::*;

  fn festival(id: i64, school: &str) -> FestivalResponse {
    FestivalResponse {
      festival_id:   id,
      school_id:     id,
      thumbnail:     String::new(),
      school_name:   school.into(),
      region:        "서울".into(),
      festival_name: "Spring".into(),
      begin_date:    "2024-05-06".into(),
      end_date:      "2024-05-08".into(),
      latitude:      37.46,
      longitude:     126.95,
    }
  }

  async fn all() -> Json<Envelope<Vec<FestivalResponse>>> {
    Json(Envelope::ok(vec![festival(1, "Seoul Univ"), festival(2, "Yonsei Univ")]))
  }

  async fn search(
    Query(q): Query<HashMap<String, String>>,
  ) -> Json<Envelope<Vec<FestivalResponse>>> {
    let name = q.get("name").cloned().unwrap_or_default();
    Json(Envelope::ok(vec![festival(9, &name)]))
  }

  async fn booth(Path(id): Path<i64>) -> Json<Envelope<BoothDetailResponse>> {
    Json(Envelope::ok(BoothDetailResponse {
      id,
      name:        "Cocktail bar".into(),
      category:    "BAR".into(),
      description: String::new(),
      thumbnail:   String::new(),
      warning:     String::new(),
      location:    "B hall".into(),
      latitude:    37.54,
      longitude:   127.07,
      menus:       Vec::new(),
      likes:       4,
    }))
  }

  async fn serve() -> HttpGateway {
    let router = Router::new()
      .route("/festival/all", get(all))
      .route("/festival/search", get(search))
      .route("/booths/{id}", get(booth))
      .route("/festival/{id}/booths", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
      .route("/festival/region", get(|| async { "<html>not json</html>" }))
      .route(
        "/festival/today",
        get(|| async { Json(serde_json::json!({ "code": 404, "message": "none" })) }),
      );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    HttpGateway::new(GatewayConfig {
      base_url: format!("http://{addr}/"),
      timeout:  Duration::from_secs(5),
    })
    .unwrap()
  }

  #[tokio::test]
  async fn fetches_and_unwraps_festival_list() {
    let gw = serve().await;
    let list = gw.fetch_all_festivals().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].school_name, "Yonsei Univ");
  }

  #[tokio::test]
  async fn passes_search_query() {
    let gw = serve().await;
    let list = gw.search_schools("Korea Univ").await.unwrap();
    assert_eq!(list[0].school_name, "Korea Univ");
  }

  #[tokio::test]
  async fn fetches_booth_detail_by_id() {
    let gw = serve().await;
    let detail = gw.fetch_booth_detail(31).await.unwrap();
    assert_eq!(detail.id, 31);
    assert_eq!(detail.likes, 4);
  }

  #[tokio::test]
  async fn non_success_status_is_a_status_error() {
    let gw = serve().await;
    let err = gw.fetch_all_booths(1).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 503, .. }), "{err:?}");
  }

  #[tokio::test]
  async fn undecodable_body_is_malformed() {
    let gw = serve().await;
    let err = gw.search_by_region("서울").await.unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }), "{err:?}");
  }

  #[tokio::test]
  async fn missing_data_is_malformed() {
    let gw = serve().await;
    let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    let err = gw.fetch_today_festivals(date).await.unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }), "{err:?}");
  }

  #[tokio::test]
  async fn unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gw = HttpGateway::new(GatewayConfig {
      base_url: format!("http://{addr}"),
      timeout:  Duration::from_secs(2),
    })
    .unwrap();

    let err = gw.fetch_all_festivals().await.unwrap_err();
    assert!(matches!(err, Error::Network { .. }), "{err:?}");
    assert_eq!(
      unifest_core::Error::from(err).kind(),
      unifest_core::ErrorKind::Network
    );
  }
}
