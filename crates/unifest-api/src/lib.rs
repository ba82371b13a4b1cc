//! Remote gateway for the Unifest REST API.
//!
//! [`RemoteGateway`] is the call contract the repositories consume;
//! [`HttpGateway`] implements it over HTTP/JSON. Responses are returned in
//! their wire shape. Mapping into domain records happens in `unifest-data`.

pub mod error;
pub mod gateway;
pub mod response;

pub use error::{Error, Result};
pub use gateway::{GatewayConfig, HttpGateway, RemoteGateway};
