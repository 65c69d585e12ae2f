// ims-client/src/client/http_oneshot.rs
// Oneshot HTTP transport - in-memory calls (requires "in-process" feature)

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, header};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::http::{HttpClient, UploadFile, error_from_status};
use crate::session::SessionContext;
use crate::{ClientError, ClientResult};

const MULTIPART_BOUNDARY: &str = "ims-client-boundary-7d1c";

/// Oneshot HTTP transport (in-memory calls)
///
/// Drives an axum `Router` through Tower's `oneshot`, without a socket.
/// Used to run the console against an in-process backend, most notably
/// mock backends in tests.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use ims_client::{OneshotHttpClient, SessionContext};
///
/// let router: Router = mock_backend();
/// let client = OneshotHttpClient::new(router, SessionContext::new());
///
/// let resources: ApiResponse<Vec<Resource>> = client.get("/api/resources").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    session: SessionContext,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - Router with state already applied
    /// * `session` - Session providing the bearer token
    pub fn new(router: Router, session: SessionContext) -> Self {
        Self { router, session }
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = self.session.token() {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    fn json_request<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Request<Body>> {
        let bytes = serde_json::to_vec(body)?;
        self.build_request(method, path, Some("application/json"), Body::from(bytes))
    }

    async fn send(&self, request: Request<Body>) -> ClientResult<Vec<u8>> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes);
            return Err(error_from_status(status, &text));
        }
        Ok(body_bytes.to_vec())
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let bytes = self.send(request).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

fn encode_multipart(fields: &[(String, String)], file: &UploadFile) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file.file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let request = self.build_request(Method::GET, path, None, Body::empty())?;
        self.send(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::POST, path, body)?;
        self.execute(request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::POST, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::PUT, path, body)?;
        self.execute(request).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::PATCH, path, body)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::DELETE, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: UploadFile,
    ) -> ClientResult<T> {
        let body = encode_multipart(&fields, &file);
        let content_type = format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}");
        let request =
            self.build_request(Method::POST, path, Some(&content_type), Body::from(body))?;
        self.execute(request).await
    }

    fn session(&self) -> &SessionContext {
        &self.session
    }
}
