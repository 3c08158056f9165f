//! Mock-data-file transport.
//!
//! Files live under `<root>/<service>/file/<path>`. Query strings are folded
//! into the file name, non-GET requests add a `.<METHOD>` suffix, and an
//! optional `<file>.http-headers` JSON document overrides the status code.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{Service, Transport};
use crate::error::{AdSelError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const UNSAFE_CHARS: &[char] = &[
    '?', '|', '<', '>', '=', ':', '*', ',', ';', '+', '&', '"', '@', '$',
];

#[derive(Debug, Deserialize)]
struct FixtureHeaders {
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
}

/// Serves responses from static files. Request bodies are ignored.
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    root: PathBuf,
}

impl FixtureTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Transport over the mock data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(bundled_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a request resolves to.
    pub fn resolve(&self, service: Service, request: &HttpRequest) -> PathBuf {
        let mut name = platform_safe(request.path.trim_start_matches('/'));
        if request.method != HttpMethod::Get {
            name.push('.');
            name.push_str(request.method.as_str());
        }
        self.root.join(service.name()).join("file").join(name)
    }
}

/// Directory holding the mock data bundled with the crate.
pub(crate) fn bundled_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))
}

fn platform_safe(path: &str) -> String {
    path.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// A directory on the request path is a missing resource, not an I/O failure.
fn read_optional(path: &Path) -> Result<Option<String>> {
    if path.is_dir() {
        return Ok(None);
    }
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Transport for FixtureTransport {
    fn execute(&self, service: Service, request: &HttpRequest) -> Result<HttpResponse> {
        let file = self.resolve(service, request);
        debug!(
            %service,
            method = request.method.as_str(),
            file = %file.display(),
            "loading mock resource"
        );

        let mut header_path = file.clone().into_os_string();
        header_path.push(".http-headers");
        let overrides = match read_optional(Path::new(&header_path))? {
            Some(raw) => Some(
                serde_json::from_str::<FixtureHeaders>(&raw)
                    .map_err(|e| AdSelError::Deserialization(e.to_string()))?,
            ),
            None => None,
        };
        let body = read_optional(&file)?;

        if body.is_none() && overrides.is_none() {
            return Ok(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: String::new(),
            });
        }

        let (status, headers) = match overrides {
            Some(o) => (o.status.unwrap_or(200), o.headers.into_iter().collect()),
            None => (200, Vec::new()),
        };

        Ok(HttpResponse {
            status,
            headers,
            body: body.unwrap_or_default(),
        })
    }

    fn computes_filters(&self) -> bool {
        false
    }
}
