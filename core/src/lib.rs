//! Blocking client library for the AdSel admissions-selection services.
//!
//! # Overview
//! Three deployments are covered: the primary AdSel service (`AdSel`), the
//! Azure assignment service (`AdSelAzure`) and the Azure merge service
//! (`AdSelAzureMerge`). Each client builds `HttpRequest` values, hands them to
//! a `Transport`, and maps the `HttpResponse` into typed records.
//!
//! # Design
//! - The transport is the only thing that touches the outside world. Mock data
//!   files (`FixtureTransport`) and a live HTTP agent (`HttpTransport`) are
//!   interchangeable; `config::build_transport` picks one from the environment.
//! - Any status outside an operation's success set becomes
//!   `AdSelError::DataFailure`. Only the filtered activity listing swallows it.
//! - Wire mappings are explicit per record, so unknown response keys are
//!   ignored and each endpoint keeps its own key casing.

pub mod azure;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pagination;
mod resource;
pub mod transport;
pub mod types;
pub mod wire;

pub use azure::{AdSelAzure, AdSelAzureMerge};
pub use client::AdSel;
pub use config::{build_transport, AdSelConfig, DaoMode};
pub use error::{AdSelError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{FixtureTransport, HttpTransport, Service, ServiceHosts, Transport};
