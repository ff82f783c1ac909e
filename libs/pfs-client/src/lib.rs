//! Session client for the Platform for Science OData API.
//!
//! [`PfsSession`] composes request URLs with `odata-core`, sends them through a
//! [`Transport`], and turns response bodies into typed `pfs-model` records.

mod config;
mod error;
mod result;
pub mod session;
pub mod transport;

pub use config::SessionConfig;
pub use error::PfsError;
pub use result::HttpResult;
pub use session::{format_experiment_name, PfsSession};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
