//! `gloo-net` implementation of [`Transport`].

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::core::transport::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Fetch-backed transport.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(content_type) = request.body.content_type() {
            builder = builder.header("Content-Type", content_type);
        }
        if let Some(body) = request.body.as_str() {
            builder = builder.body(body.to_string());
        }
        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::NoResponse(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

fn classify(err: gloo_net::Error) -> TransportError {
    match err {
        gloo_net::Error::JsError(js) => TransportError::NoResponse(js.to_string()),
        other => TransportError::Build(other.to_string()),
    }
}
