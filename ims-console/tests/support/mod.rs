// ims-console/tests/support/mod.rs
// In-process mock backend shared by the page tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use ims_client::{ImsClient, OneshotHttpClient, SessionContext};
use ims_console::Notifier;
use serde_json::{Value, json};

pub type TestClientTransport = OneshotHttpClient;
pub type TestClient = ImsClient<TestClientTransport>;

#[derive(Debug, Default)]
pub struct Inner {
    pub resources: Vec<Value>,
    pub users: Vec<Value>,
    pub batches: Vec<Value>,
    /// `"METHOD /path"` of every request, in order
    pub calls: Vec<String>,
    /// Bodies of writes, keyed like `calls`
    pub bodies: Vec<(String, Value)>,
    pub auth_headers: Vec<Option<String>>,
    /// Raw multipart bodies of spreadsheet uploads
    pub uploads: Vec<String>,
    /// When set, every write answers `success: false` with this message
    pub reject_writes: Option<Option<String>>,
    /// Added before `GET /api/resources/{id}` answers
    pub lookup_delay: Duration,
    next_id: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut inner = backend.lock();
            inner.resources = vec![resource_json("1", "Dell"), resource_json("2", "Lenovo")];
            inner.users = vec![
                json!({
                    "id": 1, "username": "alice", "email": "alice@example.com", "role": "ADMIN"
                }),
                json!({"id": 2, "username": "bob", "email": "bob@example.com", "role": "USER"}),
            ];
            inner.batches = vec![json!({
                "batchId": 10, "batchCode": "B-0010", "resourceType": "Laptop", "quantity": 5
            })];
            inner.next_id = 100;
        }
        backend
    }

    pub fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn last_body(&self, call: &str) -> Option<Value> {
        self.lock()
            .bodies
            .iter()
            .rev()
            .find(|(c, _)| c == call)
            .map(|(_, body)| body.clone())
    }

    pub fn reject_writes(&self, message: Option<&str>) {
        self.lock().reject_writes = Some(message.map(str::to_string));
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/refresh", post(refresh))
            .route("/api/resources", get(list_resources).post(create_resources))
            .route("/api/resources/filter", get(filter_resources))
            .route("/api/resources/upload-excel", post(upload_excel))
            .route(
                "/api/resources/{id}",
                get(get_resource).patch(patch_resource).delete(delete_resource),
            )
            .route("/api/resources/{id}/barcode", get(barcode))
            .route("/api/master/{kind}", get(list_master))
            .route("/api/batches", get(list_batches).post(create_batch))
            .route("/api/admin/users", get(list_users))
            .route("/api/admin/users/{id}", axum::routing::put(put_user).delete(delete_user))
            .route("/api/admin/dashboard/{metric}", get(dashboard))
            .with_state(self.clone())
    }

    pub fn client(&self, session: SessionContext) -> TestClient {
        ImsClient::new(OneshotHttpClient::new(self.router(), session))
    }

    fn record(&self, call: String, body: Option<Value>, headers: Option<&HeaderMap>) {
        let mut inner = self.lock();
        if let Some(body) = body {
            inner.bodies.push((call.clone(), body));
        }
        if let Some(headers) = headers {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            inner.auth_headers.push(auth);
        }
        inner.calls.push(call);
    }

    fn rejection(&self) -> Option<Json<Value>> {
        self.lock().reject_writes.clone().map(|message| match message {
            Some(message) => Json(json!({"success": false, "message": message})),
            None => Json(json!({"success": false})),
        })
    }
}

pub fn notifier() -> Notifier {
    Notifier::new()
}

pub fn resource_json(id: &str, brand: &str) -> Value {
    json!({
        "resourceId": id,
        "brand": brand,
        "model": "T14",
        "specification": "32GB / 1TB",
        "resourceType": "Laptop",
        "resourceClass": "IT Equipment",
        "resourceStatus": "AVAILABLE",
        "serialNumber": format!("SN-{id}"),
        "unitPrice": 999.0,
        "purchaseDate": "2024-01-15",
        "remarks": "spare"
    })
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({"success": true, "data": data}))
}

async fn login(State(b): State<MockBackend>, Json(body): Json<Value>) -> Json<Value> {
    b.record("POST /api/auth/login".into(), Some(body.clone()), None);
    let role = match (body["username"].as_str(), body["password"].as_str()) {
        (Some("alice"), Some("secret")) => "ADMIN",
        (Some("bob"), Some("secret")) => "USER",
        _ => return Json(json!({"success": false, "message": "Invalid credentials"})),
    };
    ok(json!({"accessToken": "tok-1", "refreshToken": "ref-1", "role": role}))
}

async fn refresh(State(b): State<MockBackend>, Json(body): Json<Value>) -> Json<Value> {
    b.record("POST /api/auth/refresh".into(), Some(body), None);
    ok(json!({"accessToken": "tok-2"}))
}

async fn list_resources(State(b): State<MockBackend>, headers: HeaderMap) -> Json<Value> {
    b.record("GET /api/resources".into(), None, Some(&headers));
    ok(Value::Array(b.lock().resources.clone()))
}

async fn create_resources(State(b): State<MockBackend>, Json(body): Json<Value>) -> Json<Value> {
    b.record("POST /api/resources".into(), Some(body.clone()), None);
    if let Some(rejection) = b.rejection() {
        return rejection;
    }
    let mut inner = b.lock();
    for item in body.as_array().cloned().unwrap_or_default() {
        inner.next_id += 1;
        let mut item = item;
        item["resourceId"] = json!(inner.next_id.to_string());
        inner.resources.push(item);
    }
    ok(Value::Null)
}

async fn filter_resources(
    State(b): State<MockBackend>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    let query = query.unwrap_or_default();
    b.record(format!("GET /api/resources/filter?{query}"), None, None);
    let brand = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("brand="))
        .map(str::to_string);
    let hits: Vec<Value> = b
        .lock()
        .resources
        .iter()
        .filter(|r| brand.as_deref().is_none_or(|brand| r["brand"] == brand))
        .cloned()
        .collect();
    ok(Value::Array(hits))
}

async fn upload_excel(State(b): State<MockBackend>, body: Bytes) -> Json<Value> {
    b.record("POST /api/resources/upload-excel".into(), None, None);
    if let Some(rejection) = b.rejection() {
        return rejection;
    }
    let text = String::from_utf8_lossy(&body).into_owned();
    let mut inner = b.lock();
    inner.uploads.push(text);
    inner.next_id += 1;
    let id = inner.next_id.to_string();
    inner.resources.push(resource_json(&id, "Imported"));
    ok(Value::Null)
}

async fn get_resource(
    State(b): State<MockBackend>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    b.record(format!("GET /api/resources/{id}"), None, None);
    let delay = b.lock().lookup_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let found = b.lock().resources.iter().find(|r| r["resourceId"] == id.as_str()).cloned();
    match found {
        Some(resource) => (StatusCode::OK, ok(resource)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Resource not found"})),
        ),
    }
}

async fn patch_resource(
    State(b): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    b.record(format!("PATCH /api/resources/{id}"), Some(body.clone()), None);
    if let Some(rejection) = b.rejection() {
        return rejection;
    }
    let mut inner = b.lock();
    if let (Some(resource), Some(changes)) = (
        inner.resources.iter_mut().find(|r| r["resourceId"] == id.as_str()),
        body.as_object(),
    ) {
        for (key, value) in changes {
            resource[key] = value.clone();
        }
    }
    ok(Value::Null)
}

async fn delete_resource(State(b): State<MockBackend>, Path(id): Path<String>) -> Json<Value> {
    b.record(format!("DELETE /api/resources/{id}"), None, None);
    if let Some(rejection) = b.rejection() {
        return rejection;
    }
    b.lock().resources.retain(|r| r["resourceId"] != id.as_str());
    ok(Value::Null)
}

async fn barcode(State(b): State<MockBackend>, Path(id): Path<String>) -> Vec<u8> {
    b.record(format!("GET /api/resources/{id}/barcode"), None, None);
    let mut png = vec![0x89, b'P', b'N', b'G'];
    png.extend_from_slice(id.as_bytes());
    png
}

async fn list_master(State(b): State<MockBackend>, Path(kind): Path<String>) -> Json<Value> {
    b.record(format!("GET /api/master/{kind}"), None, None);
    let names: &[&str] = match kind.as_str() {
        "resource-class" => &["IT Equipment", "Furniture"],
        "resource-type" => &["Laptop", "Monitor"],
        "resource-status" => &["AVAILABLE", "IN_USE", "RETIRED"],
        _ => &[],
    };
    let records: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": i + 1, "name": name}))
        .collect();
    ok(Value::Array(records))
}

async fn list_batches(State(b): State<MockBackend>) -> Json<Value> {
    b.record("GET /api/batches".into(), None, None);
    ok(Value::Array(b.lock().batches.clone()))
}

async fn create_batch(State(b): State<MockBackend>, Json(body): Json<Value>) -> Json<Value> {
    b.record("POST /api/batches".into(), Some(body.clone()), None);
    if let Some(rejection) = b.rejection() {
        return rejection;
    }
    let mut inner = b.lock();
    inner.next_id += 1;
    let id = inner.next_id;
    inner.batches.push(json!({
        "batchId": id,
        "batchCode": format!("B-{id:04}"),
        "resourceType": body["resourceType"],
        "quantity": body["quantity"],
        "description": body["description"],
    }));
    ok(Value::Null)
}

async fn list_users(State(b): State<MockBackend>) -> Json<Value> {
    b.record("GET /api/admin/users".into(), None, None);
    ok(Value::Array(b.lock().users.clone()))
}

async fn put_user(
    State(b): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    b.record(format!("PUT /api/admin/users/{id}"), Some(body.clone()), None);
    if let Some(rejection) = b.rejection() {
        return rejection;
    }
    let mut inner = b.lock();
    if let (Some(user), Some(changes)) = (
        inner.users.iter_mut().find(|u| u["id"].to_string() == id),
        body.as_object(),
    ) {
        for (key, value) in changes {
            user[key] = value.clone();
        }
    }
    ok(Value::Null)
}

async fn delete_user(State(b): State<MockBackend>, Path(id): Path<String>) -> Json<Value> {
    b.record(format!("DELETE /api/admin/users/{id}"), None, None);
    b.lock().users.retain(|u| u["id"].to_string() != id);
    ok(Value::Null)
}

async fn dashboard(
    State(b): State<MockBackend>,
    Path(metric): Path<String>,
) -> (StatusCode, Json<Value>) {
    b.record(format!("GET /api/admin/dashboard/{metric}"), None, None);
    match metric.as_str() {
        "count-by-model" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false})),
        ),
        "count-by-brand" => (
            StatusCode::OK,
            ok(json!([{"brand": "Dell", "count": 1}, {"brand": "Lenovo", "count": 1}])),
        ),
        _ => (StatusCode::OK, ok(json!([{"name": "other", "count": 2}]))),
    }
}
