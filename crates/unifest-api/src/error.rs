//! Error type for `unifest-api`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  /// Transport failure, including timeouts.
  #[error("GET {path} failed: {source}")]
  Network {
    path:   String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("GET {path} → {status}")]
  Status { path: String, status: u16 },

  #[error("malformed response from {path}: {reason}")]
  Malformed { path: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for unifest_core::Error {
  fn from(e: Error) -> Self {
    let message = e.to_string();
    match e {
      Error::Client(_) | Error::Network { .. } => Self::Network(message),
      Error::Status { status, .. } => Self::Server { status, message },
      Error::Malformed { .. } => Self::MalformedResponse(message),
    }
  }
}
