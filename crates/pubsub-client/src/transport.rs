//! Signed request dispatch.
//!
//! [`Transport::send`] assembles the request path from the resource path, the
//! encoded query parameters and an optional pre-encoded fragment, signs it
//! with SigV2 and hands it to an [`HttpBackend`]. Every request carries an
//! empty body and exactly the `Authorization`, `Date` and `Host` headers.
//!
//! The transport does not retry, pool connections or interpret status codes:
//! the caller receives whatever the gateway answered, and network faults come
//! back as [`ClientError::Transport`] untouched.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use pubsub_auth::{Signer, SigningRequest};
use tracing::debug;

use crate::config::{Connection, TransportConfig};
use crate::error::{ClientError, ClientResult};
use crate::query::{QueryParams, build_query};

/// A request against one resource of the gateway, before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Resource path, e.g. `/topics/mytopic`.
    pub resource: String,
    /// Query parameters encoded by the transport.
    pub params: Option<QueryParams>,
    /// Pre-encoded query fragment appended verbatim.
    pub extra: Option<String>,
    /// Whether the query string takes part in the signature.
    pub sign_params: bool,
}

impl ApiRequest {
    /// A request with no query string.
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            params: None,
            extra: None,
            sign_params: false,
        }
    }

    /// Attach query parameters.
    #[must_use]
    pub fn params(mut self, params: Option<QueryParams>) -> Self {
        self.params = params;
        self
    }

    /// Attach a pre-encoded query fragment.
    #[must_use]
    pub fn extra(mut self, extra: Option<String>) -> Self {
        self.extra = extra;
        self
    }

    /// Include the query string in the signature.
    #[must_use]
    pub fn sign_params(mut self, sign: bool) -> Self {
        self.sign_params = sign;
        self
    }

    /// Encoded query string including the leading `?`, or empty.
    #[must_use]
    pub fn query_string(&self) -> String {
        build_query(self.params.as_ref(), self.extra.as_deref())
    }
}

/// A signed request ready to go on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL (`http://host:port/path?query`).
    pub url: String,
    /// Request target as it appears on the request line.
    pub path_and_query: String,
    /// `Authorization`, `Date` and `Host`.
    pub headers: HeaderMap,
}

/// Status, headers and body of a gateway response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Full response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body decoded as UTF-8, lossily.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Split into `(body, status)`.
    #[must_use]
    pub fn into_parts(self) -> (Bytes, StatusCode) {
        (self.body, self.status)
    }
}

/// Executes one signed request and reads the whole response.
#[async_trait]
pub trait HttpBackend: Send + Sync + fmt::Debug {
    /// Send `request` and wait for the complete response.
    async fn execute(&self, request: HttpRequest) -> ClientResult<RawResponse>;
}

/// [`HttpBackend`] on top of `reqwest` that never keeps idle connections.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Build a backend whose connections are closed after every response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new() -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: HttpRequest) -> ClientResult<RawResponse> {
        let url = reqwest::Url::parse(&request.url).map_err(|e| ClientError::InvalidEndpoint {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;
        let response = self
            .client
            .request(request.method, url)
            .headers(request.headers)
            .body(Vec::new())
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Signs requests for one connection and dispatches them.
#[derive(Debug, Clone)]
pub struct Transport {
    connection: Arc<Connection>,
    signer: Signer,
    backend: Arc<dyn HttpBackend>,
    config: TransportConfig,
}

impl Transport {
    /// A transport over a fresh [`ReqwestBackend`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(connection: Arc<Connection>, config: TransportConfig) -> ClientResult<Self> {
        let backend = Arc::new(ReqwestBackend::new()?);
        Ok(Self::with_backend(connection, config, backend))
    }

    /// A transport over the given backend.
    #[must_use]
    pub fn with_backend(
        connection: Arc<Connection>,
        config: TransportConfig,
        backend: Arc<dyn HttpBackend>,
    ) -> Self {
        let signer = Signer::new(connection.access_key(), connection.secret_key());
        Self {
            connection,
            signer,
            backend,
            config,
        }
    }

    /// The connection descriptor requests are sent to.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Sign `request` and send it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if a signed header value is not
    /// representable, or whatever the backend fails with.
    pub async fn send(&self, request: &ApiRequest) -> ClientResult<RawResponse> {
        let http_request = self.prepare(request)?;
        let method = http_request.method.clone();
        let path_and_query = http_request.path_and_query.clone();

        if self.config.wire_trace {
            trace_request(&http_request);
        }

        let response = self.backend.execute(http_request).await?;

        if self.config.wire_trace {
            trace_response(&response);
        }
        debug!(%method, path = %path_and_query, status = %response.status, "pub-sub request completed");

        Ok(response)
    }

    fn prepare(&self, request: &ApiRequest) -> ClientResult<HttpRequest> {
        let query = request.query_string();
        let signing = SigningRequest::new(request.method.as_str(), &request.resource)
            .with_query(&query, request.sign_params);
        let signed = self.signer.sign(&signing, Utc::now());

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&signed.authorization)?,
        );
        headers.insert(header::DATE, HeaderValue::from_str(&signed.date)?);
        headers.insert(
            header::HOST,
            HeaderValue::from_str(&self.connection.host_header())?,
        );

        let path_and_query = format!("{}{query}", request.resource);
        Ok(HttpRequest {
            method: request.method.clone(),
            url: format!("{}{path_and_query}", self.connection.endpoint_url()),
            path_and_query,
            headers,
        })
    }
}

fn trace_request(request: &HttpRequest) {
    debug!("> {} {} HTTP/1.1", request.method, request.path_and_query);
    for (name, value) in &request.headers {
        debug!("> {name}: {}", value.to_str().unwrap_or("<binary>"));
    }
}

fn trace_response(response: &RawResponse) {
    debug!("< HTTP/1.1 {}", response.status);
    for (name, value) in &response.headers {
        debug!("< {name}: {}", value.to_str().unwrap_or("<binary>"));
    }
    debug!("< ({} body bytes)", response.body.len());
}
