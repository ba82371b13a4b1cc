//! Error taxonomy shared by repositories and screens.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The transport failed: unreachable host, connection reset, timeout.
  #[error("network error: {0}")]
  Network(String),

  /// The server answered with a non-success status.
  #[error("server error {status}: {message}")]
  Server { status: u16, message: String },

  /// A targeted record does not exist. Deletes never raise this.
  #[error("not found: {0}")]
  NotFound(String),

  /// The payload could not be decoded or mapped into a domain record.
  #[error("malformed response: {0}")]
  MalformedResponse(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The coarse category a screen uses to pick an error dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Network,
  Server,
  Other,
}

impl Error {
  /// Wrap any backend error as [`Error::Store`].
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Network(_) => ErrorKind::Network,
      Self::Server { .. } => ErrorKind::Server,
      Self::NotFound(_) | Self::MalformedResponse(_) | Self::Store(_) => {
        ErrorKind::Other
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_groups_variants_by_dialog() {
    assert_eq!(Error::Network("down".into()).kind(), ErrorKind::Network);
    assert_eq!(
      Error::Server { status: 503, message: "busy".into() }.kind(),
      ErrorKind::Server
    );
    assert_eq!(Error::NotFound("booth 3".into()).kind(), ErrorKind::Other);
    assert_eq!(
      Error::MalformedResponse("bad date".into()).kind(),
      ErrorKind::Other
    );
  }
}
