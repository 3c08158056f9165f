//! Status checking and JSON decoding shared by every client.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::error::{AdSelError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Service, Transport};

/// One service reached through a transport.
#[derive(Debug, Clone)]
pub(crate) struct Resource<T> {
    transport: T,
    service: Service,
}

impl<T: Transport> Resource<T> {
    pub(crate) fn new(transport: T, service: Service) -> Self {
        Self { transport, service }
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes `request`; anything outside the method's success set is
    /// logged and returned as `DataFailure`.
    pub(crate) fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.transport.execute(self.service, &request)?;
        if !response.is_success_for(request.method) {
            error!(
                service = %self.service,
                "{} ==> status:{} data:{}",
                request.path,
                response.status,
                response.body
            );
            return Err(AdSelError::DataFailure {
                url: request.path,
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    pub(crate) fn get(&self, path: &str) -> Result<Value> {
        decode_body(&self.send(HttpRequest::get(path))?)
    }

    pub(crate) fn get_as<D: DeserializeOwned>(&self, path: &str) -> Result<D> {
        from_json(self.get(path)?)
    }

    pub(crate) fn post(&self, path: &str, body: &Value) -> Result<HttpResponse> {
        self.send(HttpRequest::post(path, encode(body)?))
    }

    pub(crate) fn put(&self, path: &str, body: &Value) -> Result<HttpResponse> {
        self.send(HttpRequest::put(path, encode(body)?))
    }

    pub(crate) fn get_with_body(&self, path: &str, body: &Value) -> Result<HttpResponse> {
        self.send(HttpRequest::get_with_body(path, encode(body)?))
    }
}

fn encode(body: &Value) -> Result<String> {
    serde_json::to_string(body).map_err(|e| AdSelError::Serialization(e.to_string()))
}

/// Parses a response body; an empty body decodes to `null`.
pub(crate) fn decode_body(response: &HttpResponse) -> Result<Value> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| AdSelError::Deserialization(e.to_string()))
}

pub(crate) fn from_json<D: DeserializeOwned>(value: Value) -> Result<D> {
    serde_json::from_value(value).map_err(|e| AdSelError::Deserialization(e.to_string()))
}

pub(crate) fn to_json<S: serde::Serialize>(value: &S) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| AdSelError::Serialization(e.to_string()))
}
