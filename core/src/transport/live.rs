//! Network transport over a blocking `ureq` agent.

use std::time::Duration;

use tracing::debug;
use ureq::{Agent, RequestBuilder};

use super::{Service, Transport};
use crate::error::{AdSelError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const AUTHORIZATION: &str = "Authorization";

/// Base URLs of the live deployments. A service without a host cannot be
/// reached through this transport.
#[derive(Debug, Clone, Default)]
pub struct ServiceHosts {
    pub adsel: Option<String>,
    pub azure_assign: Option<String>,
    pub azure_merge: Option<String>,
}

impl ServiceHosts {
    /// Every service served from one host, as the mock server does.
    pub fn single(host: &str) -> Self {
        Self {
            adsel: Some(host.to_string()),
            azure_assign: Some(host.to_string()),
            azure_merge: Some(host.to_string()),
        }
    }

    fn host_for(&self, service: Service) -> Option<&str> {
        match service {
            Service::AdSel => self.adsel.as_deref(),
            Service::AzureAssign => self.azure_assign.as_deref(),
            Service::AzureMerge => self.azure_merge.as_deref(),
        }
    }
}

/// Issues one HTTP request per call. 4xx/5xx answers come back as responses
/// so the client can report them with the URL and body.
#[derive(Clone)]
pub struct HttpTransport {
    agent: Agent,
    hosts: ServiceHosts,
    token: Option<String>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("hosts", &self.hosts)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpTransport {
    pub fn new(hosts: ServiceHosts, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            hosts,
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url_for(&self, service: Service, path: &str) -> Result<String> {
        let host = self
            .hosts
            .host_for(service)
            .ok_or_else(|| {
                AdSelError::config(format!("no host configured for service {service}"))
            })?;
        let joined = format!("{}{}", host.trim_end_matches('/'), path);
        // Parsing percent-encodes path characters such as the space in "0_C SCI_00_1_5".
        url::Url::parse(&joined)
            .map(String::from)
            .map_err(|e| AdSelError::config(format!("invalid url {joined}: {e}")))
    }

    fn with_headers<B>(
        &self,
        mut builder: RequestBuilder<B>,
        request: &HttpRequest,
    ) -> RequestBuilder<B> {
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}").as_str());
        }
        builder
    }
}

impl Transport for HttpTransport {
    fn execute(&self, service: Service, request: &HttpRequest) -> Result<HttpResponse> {
        let url = self.url_for(service, &request.path)?;
        debug!(%service, method = request.method.as_str(), %url, "sending request");

        let body = request.body.as_deref().unwrap_or_default();
        let result = match (request.method, request.body.is_some()) {
            (HttpMethod::Get, false) => self.with_headers(self.agent.get(&url), request).call(),
            (HttpMethod::Get, true) => self
                .with_headers(self.agent.get(&url), request)
                .force_send_body()
                .send(body.as_bytes()),
            (HttpMethod::Post, _) => self
                .with_headers(self.agent.post(&url), request)
                .send(body.as_bytes()),
            (HttpMethod::Put, _) => self
                .with_headers(self.agent.put(&url), request)
                .send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| AdSelError::Transport(format!("{url}: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| AdSelError::Transport(format!("{url}: {e}")))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_host_and_path_without_double_slash() {
        let transport = HttpTransport::new(
            ServiceHosts::single("http://localhost:3000/"),
            Duration::from_secs(1),
        );
        assert_eq!(
            transport.url_for(Service::AdSel, "/api/v1/academicqtr").unwrap(),
            "http://localhost:3000/api/v1/academicqtr"
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let transport = HttpTransport::new(
            ServiceHosts::single("http://localhost:3000"),
            Duration::from_secs(1),
        );
        assert_eq!(
            transport
                .url_for(Service::AdSel, "/api/v1/majors/details/1/0_C SCI_00_1_5")
                .unwrap(),
            "http://localhost:3000/api/v1/majors/details/1/0_C%20SCI_00_1_5"
        );
    }

    #[test]
    fn unconfigured_service_is_a_config_error() {
        let hosts = ServiceHosts {
            adsel: Some("http://localhost:3000".to_string()),
            ..ServiceHosts::default()
        };
        let transport = HttpTransport::new(hosts, Duration::from_secs(1));
        let err = transport
            .execute(Service::AzureMerge, &HttpRequest::get("/api/v1/merge"))
            .unwrap_err();
        assert!(matches!(err, AdSelError::Config { .. }));
    }

    #[test]
    fn debug_output_redacts_token() {
        let transport = HttpTransport::new(ServiceHosts::default(), Duration::from_secs(1))
            .with_token("secret-token");
        let rendered = format!("{transport:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
