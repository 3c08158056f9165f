//! HTTP request and response types exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. The clients build an `HttpRequest`
//! holding a service-relative path (`/api/v1/...`), hand it to whichever
//! transport is configured, and interpret the returned `HttpResponse`
//! themselves. Status codes are never turned into errors by a transport.

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// Statuses treated as success: reads accept only 200, writes also 201.
    pub fn success_statuses(&self) -> &'static [u16] {
        match self {
            HttpMethod::Get => &[200],
            HttpMethod::Post | HttpMethod::Put => &[200, 201],
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: vec![(ACCEPT.to_string(), APPLICATION_JSON.to_string())],
            body: None,
        }
    }

    /// GET carrying a JSON body, as the merge service's conflict checks expect.
    pub fn get_with_body(path: impl Into<String>, body: String) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: vec![
                (ACCEPT.to_string(), APPLICATION_JSON.to_string()),
                (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
            ],
            body: Some(body),
        }
    }

    pub fn post(path: impl Into<String>, body: String) -> Self {
        Self::write(HttpMethod::Post, path.into(), body)
    }

    pub fn put(path: impl Into<String>, body: String) -> Self {
        Self::write(HttpMethod::Put, path.into(), body)
    }

    fn write(method: HttpMethod, path: String, body: String) -> Self {
        Self {
            method,
            path,
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            body: Some(body),
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success_for(&self, method: HttpMethod) -> bool {
        method.success_statuses().contains(&self.status)
    }
}
