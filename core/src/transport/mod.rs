//! Transport seam between the clients and the outside world.
//!
//! # Design
//! A `Service` names which AdSel deployment a request is meant for; the
//! transport decides what that means. `FixtureTransport` maps it to a directory
//! of mock data files, `HttpTransport` to a base URL. The clients only ever see
//! the `Transport` trait, so the same client code runs against either.

mod fixture;
mod live;

pub use fixture::FixtureTransport;
pub use live::{HttpTransport, ServiceHosts};

use std::fmt;

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Logical AdSel deployments the clients talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// The primary AdSel web service.
    AdSel,
    /// Azure-hosted assignment submission.
    AzureAssign,
    /// Azure-hosted workspace conflict checks and merges.
    AzureMerge,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::AdSel => "adsel",
            Service::AzureAssign => "adsel_azure_assign",
            Service::AzureMerge => "adsel_azure_merge",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Executes a request against a service and returns whatever it answered.
///
/// Implementations return non-success statuses as data; only failures to
/// obtain a response at all are errors.
pub trait Transport {
    fn execute(&self, service: Service, request: &HttpRequest) -> Result<HttpResponse>;

    /// Whether the backing service evaluates query filters itself. Mock data
    /// files cannot, so their results may be broader than requested.
    fn computes_filters(&self) -> bool {
        true
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, service: Service, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(service, request)
    }

    fn computes_filters(&self) -> bool {
        (**self).computes_filters()
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, service: Service, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(service, request)
    }

    fn computes_filters(&self) -> bool {
        (**self).computes_filters()
    }
}
