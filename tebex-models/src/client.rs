//! HTTP collaborator for the Tebex APIs
//!
//! [`Transport`] is the seam between the codec and the network. The
//! [`ApiClient`] serializes request bodies and deserializes responses through
//! the wire codec; the transport only moves JSON.

use crate::config::ClientConfig;
use crate::descriptor::Descriptor;
use crate::error::{ApiError, ApiResult};
use crate::registry::{Described, Registry};
use crate::value::Model;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// HTTP method of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request in wire form
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the configured base URL
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set the wire body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response in wire form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON. An empty body is undefined.
    pub fn json(&self) -> ApiResult<Option<Value>> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

/// Moves wire requests to the API and back
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// [`Transport`] backed by reqwest, authenticating with HTTP basic auth
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, request: &ApiRequest) -> ApiResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, request.path))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.url(&request)?;
        debug!(method = request.method.as_str(), url = %url, "Sending API request");

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), url)
            .header("Accept", "application/json");

        if self.config.has_credentials() {
            builder = builder.basic_auth(
                &self.config.project_id,
                Some(self.config.private_key.expose_secret()),
            );
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

/// Runs API calls through the wire codec
#[derive(Debug)]
pub struct ApiClient<T: Transport> {
    transport: T,
    registry: &'static Registry,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, registry: &'static Registry) -> Self {
        Self {
            transport,
            registry,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Send a request and decode the response with `response_type`.
    ///
    /// Returns `None` when the response has no body.
    pub async fn call(
        &self,
        request: ApiRequest,
        response_type: &Descriptor,
    ) -> ApiResult<Option<Model>> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.execute(request).await?;
        let response = self.check(method, &path, response)?;

        let wire = response.json()?;
        Ok(self.registry.codec().deserialize(wire.as_ref(), response_type))
    }

    /// Send a domain value as the body of a request
    pub async fn call_with_body(
        &self,
        request: ApiRequest,
        body: &Model,
        body_type: &Descriptor,
        response_type: &Descriptor,
    ) -> ApiResult<Option<Model>> {
        let request = match self.registry.codec().serialize(Some(body), body_type) {
            Some(wire) => request.body(wire),
            None => request,
        };
        self.call(request, response_type).await
    }

    /// GET a typed model
    pub async fn get<R>(&self, path: &str) -> ApiResult<R>
    where
        R: Described + DeserializeOwned,
    {
        let response = self
            .transport
            .execute(ApiRequest::get(path))
            .await
            .and_then(|response| self.check(HttpMethod::Get, path, response))?;
        self.decode_body(&response)
    }

    /// POST a typed model and decode a typed response
    pub async fn post<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Described + Serialize,
        R: Described + DeserializeOwned,
    {
        let wire = self.registry.codec().encode(body)?;
        let response = self
            .transport
            .execute(ApiRequest::post(path).body(wire))
            .await
            .and_then(|response| self.check(HttpMethod::Post, path, response))?;
        self.decode_body(&response)
    }

    /// DELETE a resource, ignoring any response body
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.transport.execute(ApiRequest::delete(path)).await?;
        self.check(HttpMethod::Delete, path, response).map(|_| ())
    }

    fn check(&self, method: HttpMethod, path: &str, response: ApiResponse) -> ApiResult<ApiResponse> {
        if response.is_success() {
            return Ok(response);
        }
        warn!(
            method = method.as_str(),
            path,
            status = response.status,
            "API call failed"
        );
        Err(ApiError::Status {
            status: response.status,
            body: response.body,
        })
    }

    fn decode_body<R>(&self, response: &ApiResponse) -> ApiResult<R>
    where
        R: Described + DeserializeOwned,
    {
        let wire = response.json()?.unwrap_or(Value::Null);
        Ok(self.registry.codec().decode(&wire)?)
    }
}
