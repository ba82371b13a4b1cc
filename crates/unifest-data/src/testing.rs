//! An in-process [`RemoteGateway`] with canned responses, for tests.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, MutexGuard},
  time::Duration,
};

use chrono::NaiveDate;
use unifest_api::{
  Error, RemoteGateway, Result,
  response::{
    BoothDetailResponse, BoothResponse, FestivalResponse, FestivalTodayResponse,
  },
};

/// How the next call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
  Network,
  Server(u16),
}

#[derive(Default)]
struct Canned {
  festivals: Vec<FestivalResponse>,
  today:     Vec<FestivalTodayResponse>,
  booths:    Vec<BoothDetailResponse>,
  failures:  Vec<Failure>,
  delays:    HashMap<String, Duration>,
  calls:     Vec<String>,
}

/// Serves festivals and booths from memory. Searches filter the canned
/// festivals by school-name substring or exact region.
#[derive(Clone, Default)]
pub struct StubGateway {
  canned: Arc<Mutex<Canned>>,
}

impl StubGateway {
  pub fn new() -> Self { Self::default() }

  fn canned(&self) -> MutexGuard<'_, Canned> {
    self.canned.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  pub fn with_festivals(self, festivals: Vec<FestivalResponse>) -> Self {
    self.canned().festivals = festivals;
    self
  }

  pub fn with_today(self, today: Vec<FestivalTodayResponse>) -> Self {
    self.canned().today = today;
    self
  }

  pub fn with_booths(self, booths: Vec<BoothDetailResponse>) -> Self {
    self.canned().booths = booths;
    self
  }

  /// Make the next call fail. Queued failures are consumed in order.
  pub fn fail_next(&self, failure: Failure) { self.canned().failures.push(failure); }

  /// Hold the reply to `call` (a `"name:arg"` string) for `delay`.
  pub fn delay(&self, call: &str, delay: Duration) {
    self.canned().delays.insert(call.to_owned(), delay);
  }

  /// The calls made so far, as `"name:arg"` strings.
  pub fn calls(&self) -> Vec<String> { self.canned().calls.clone() }

  async fn begin(&self, call: String) -> Result<MutexGuard<'_, Canned>> {
    let delay = {
      let mut canned = self.canned();
      canned.calls.push(call.clone());
      canned.delays.get(&call).copied()
    };
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    let mut canned = self.canned();
    if canned.failures.is_empty() {
      return Ok(canned);
    }
    match canned.failures.remove(0) {
      Failure::Network => Err(Error::Network {
        path:   call,
        source: Box::new(std::io::Error::from(std::io::ErrorKind::ConnectionRefused)),
      }),
      Failure::Server(status) => Err(Error::Status { path: call, status }),
    }
  }
}

pub fn festival(id: i64, school: &str, region: &str) -> FestivalResponse {
  FestivalResponse {
    festival_id:   id,
    school_id:     id * 100,
    thumbnail:     format!("https://img.example/{id}.png"),
    school_name:   school.to_owned(),
    region:        region.to_owned(),
    festival_name: format!("{school} festival"),
    begin_date:    "2024-05-06".to_owned(),
    end_date:      "2024-05-08".to_owned(),
    latitude:      37.5,
    longitude:     127.0,
  }
}

pub fn booth(id: i64, category: &str, likes: i32) -> BoothDetailResponse {
  BoothDetailResponse {
    id,
    name:        format!("booth {id}"),
    category:    category.to_owned(),
    description: String::new(),
    thumbnail:   String::new(),
    warning:     String::new(),
    location:    format!("tent {id}"),
    latitude:    37.54,
    longitude:   127.07,
    menus:       Vec::new(),
    likes,
  }
}

impl RemoteGateway for StubGateway {
  async fn fetch_all_festivals(&self) -> Result<Vec<FestivalResponse>> {
    Ok(self.begin("all".into()).await?.festivals.clone())
  }

  async fn search_schools(&self, query: &str) -> Result<Vec<FestivalResponse>> {
    let canned = self.begin(format!("search:{query}")).await?;
    Ok(
      canned
        .festivals
        .iter()
        .filter(|f| f.school_name.contains(query))
        .cloned()
        .collect(),
    )
  }

  async fn search_by_region(&self, region: &str) -> Result<Vec<FestivalResponse>> {
    let canned = self.begin(format!("region:{region}")).await?;
    Ok(
      canned
        .festivals
        .iter()
        .filter(|f| f.region == region)
        .cloned()
        .collect(),
    )
  }

  async fn fetch_today_festivals(
    &self,
    date: NaiveDate,
  ) -> Result<Vec<FestivalTodayResponse>> {
    Ok(self.begin(format!("today:{date}")).await?.today.clone())
  }

  async fn fetch_all_booths(&self, festival_id: i64) -> Result<Vec<BoothResponse>> {
    let canned = self.begin(format!("booths:{festival_id}")).await?;
    Ok(
      canned
        .booths
        .iter()
        .map(|b| BoothResponse {
          id:          b.id,
          name:        b.name.clone(),
          category:    b.category.clone(),
          description: b.description.clone(),
          thumbnail:   b.thumbnail.clone(),
          location:    b.location.clone(),
          latitude:    b.latitude,
          longitude:   b.longitude,
        })
        .collect(),
    )
  }

  async fn fetch_booth_detail(&self, booth_id: i64) -> Result<BoothDetailResponse> {
    let path = format!("booth:{booth_id}");
    let canned = self.begin(path.clone()).await?;
    canned
      .booths
      .iter()
      .find(|b| b.id == booth_id)
      .cloned()
      .ok_or(Error::Status { path, status: 404 })
  }
}
