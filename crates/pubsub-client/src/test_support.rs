//! In-memory doubles shared by the unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use parking_lot::Mutex;

use crate::config::{Connection, TransportConfig};
use crate::error::ClientResult;
use crate::transport::{HttpBackend, HttpRequest, RawResponse, Transport};

/// Records every request and answers with a canned response.
#[derive(Debug, Clone)]
pub(crate) struct RecordingBackend {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    status: StatusCode,
    body: Bytes,
}

impl RecordingBackend {
    pub(crate) fn ok(body: &str) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub(crate) fn with_status(status: StatusCode, body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("at least one request was sent")
    }

    pub(crate) fn count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpBackend for RecordingBackend {
    async fn execute(&self, request: HttpRequest) -> ClientResult<RawResponse> {
        self.requests.lock().push(request);
        Ok(RawResponse {
            status: self.status,
            headers: HeaderMap::new(),
            body: self.body.clone(),
        })
    }
}

/// A transport for `ak`/`sk` at `localhost:8000` over `backend`.
pub(crate) fn transport_with(backend: &RecordingBackend) -> Arc<Transport> {
    let connection = Arc::new(Connection::new("localhost", 8000, "ak", "sk"));
    Arc::new(Transport::with_backend(
        connection,
        TransportConfig::default(),
        Arc::new(backend.clone()),
    ))
}
