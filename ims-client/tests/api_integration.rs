// ims-client/tests/api_integration.rs
// Integration tests against an in-process mock backend

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use ims_client::{ClientError, ImsClient, OneshotHttpClient, Session, SessionContext, UploadFile};
use serde_json::{Value, json};
use shared::models::{CountDimension, MasterForm, MasterKind, ResourceFilter, ResourceForm, Role};

#[derive(Default)]
struct Seen {
    auth_headers: Vec<Option<String>>,
    bodies: Vec<Value>,
    queries: Vec<Option<String>>,
    upload: Option<Vec<u8>>,
}

fn resource_json(id: &str) -> Value {
    json!({
        "resourceId": id,
        "brand": "Lenovo",
        "model": "T14",
        "specification": "32GB",
        "resourceType": "Laptop",
        "resourceClass": "IT",
        "resourceStatus": "AVAILABLE",
        "serialNumber": format!("SN-{id}"),
        "unitPrice": 999.0,
        "purchaseDate": "2024-01-15"
    })
}

fn mock_backend(seen: Arc<Mutex<Seen>>) -> Router {
    let list_seen = seen.clone();
    let create_seen = seen.clone();
    let filter_seen = seen.clone();
    let upload_seen = seen.clone();
    let master_seen = seen;

    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "success": true,
                            "data": {"accessToken": "tok-1", "role": "ADMIN"}
                        })),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"success": false, "message": "Invalid credentials"})),
                    )
                }
            }),
        )
        .route(
            "/api/resources",
            get(move |headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                list_seen.lock().unwrap().auth_headers.push(auth);
                Json(json!({"success": true, "data": [resource_json("1"), resource_json("2")]}))
            })
            .post(move |Json(body): Json<Value>| async move {
                create_seen.lock().unwrap().bodies.push(body);
                Json(json!({"success": true, "data": null, "message": "created"}))
            }),
        )
        .route(
            "/api/resources/filter",
            get(move |RawQuery(query): RawQuery| async move {
                filter_seen.lock().unwrap().queries.push(query);
                Json(json!({"success": true, "data": [resource_json("7")]}))
            }),
        )
        .route(
            "/api/resources/upload-excel",
            post(move |body: Bytes| async move {
                upload_seen.lock().unwrap().upload = Some(body.to_vec());
                Json(json!({"success": true}))
            }),
        )
        .route(
            "/api/resources/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "RES-404" {
                    (StatusCode::NOT_FOUND, Json(json!({"success": false})))
                } else {
                    (StatusCode::OK, Json(json!({"success": true, "data": resource_json(&id)})))
                }
            })
            .patch(|| async {
                Json(json!({"success": false, "message": "Serial number already exists"}))
            }),
        )
        .route(
            "/api/resources/{id}/barcode",
            get(|| async { vec![0x89u8, b'P', b'N', b'G'] }),
        )
        .route(
            "/api/master/resource-status",
            get(|| async {
                Json(json!({"success": true, "data": [{"id": 1, "name": "AVAILABLE"}]}))
            })
            .post(move |Json(body): Json<Value>| async move {
                master_seen.lock().unwrap().bodies.push(body);
                Json(json!({"success": true}))
            }),
        )
        .route(
            "/api/admin/dashboard/count-by-brand",
            get(|| async {
                Json(json!({"success": true, "data": [{"brand": "Lenovo", "count": 2}]}))
            }),
        )
}

fn client(seen: Arc<Mutex<Seen>>, session: SessionContext) -> ImsClient<OneshotHttpClient> {
    ImsClient::new(OneshotHttpClient::new(mock_backend(seen), session))
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let client = client(Arc::default(), SessionContext::new());

    let resp = client.auth().login("alice", "secret").await.unwrap();
    assert_eq!(resp.access_token, "tok-1");
    assert_eq!(resp.role, Role::Admin);

    let err = client.auth().login("alice", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[tokio::test]
async fn test_bearer_token_comes_from_session() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let session = SessionContext::new();
    let client = client(seen.clone(), session.clone());

    client.resources().list().await.unwrap();
    session.sign_in(Session {
        access_token: "tok-9".into(),
        refresh_token: None,
        username: None,
        role: Role::User,
    });
    let resources = client.resources().list().await.unwrap();
    assert_eq!(resources.len(), 2);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.auth_headers[0], None);
    assert_eq!(seen.auth_headers[1].as_deref(), Some("Bearer tok-9"));
}

#[tokio::test]
async fn test_create_sends_list_of_one() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let client = client(seen.clone(), SessionContext::new());

    let form = ResourceForm {
        brand: "Lenovo".into(),
        serial_number: "SN-9".into(),
        ..Default::default()
    };
    client.resources().create(&form).await.unwrap();

    let body = seen.lock().unwrap().bodies[0].clone();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["brand"], "Lenovo");
    assert_eq!(items[0]["serialNumber"], "SN-9");
}

#[tokio::test]
async fn test_success_false_is_an_error() {
    let client = client(Arc::default(), SessionContext::new());
    let err = client
        .resources()
        .update("1", &json!({"serialNumber": "dup"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected { .. }));
    assert_eq!(err.user_message("Update failed"), "Serial number already exists");
}

#[tokio::test]
async fn test_not_found_without_message() {
    let client = client(Arc::default(), SessionContext::new());
    let err = client.resources().get("RES-404").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message("failed"), "failed");

    let found = client.resources().get("RES-5").await.unwrap();
    assert_eq!(found.resource_id, "RES-5");
}

#[tokio::test]
async fn test_filter_query_string() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let client = client(seen.clone(), SessionContext::new());

    let filter = ResourceFilter {
        brand: Some("HP Inc".into()),
        resource_status: Some("IN_USE".into()),
        ..Default::default()
    };
    let results = client.resources().filter(&filter).await.unwrap();
    assert_eq!(results[0].resource_id, "7");

    client.resources().filter(&ResourceFilter::default()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.queries[0].as_deref(),
        Some("brand=HP%20Inc&resourceStatus=IN_USE")
    );
    assert_eq!(seen.queries[1], None);
}

#[tokio::test]
async fn test_upload_and_barcode() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let client = client(seen.clone(), SessionContext::new());

    client
        .resources()
        .upload_excel(UploadFile::spreadsheet("batch.xlsx", b"sheet".to_vec()), Some("B-3"))
        .await
        .unwrap();
    let upload = seen.lock().unwrap().upload.clone().unwrap();
    let text = String::from_utf8_lossy(&upload);
    assert!(text.contains("name=\"batchId\"\r\n\r\nB-3"));
    assert!(text.contains("filename=\"batch.xlsx\""));
    assert!(text.contains("sheet"));

    let png = client.resources().barcode("RES-1").await.unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[tokio::test]
async fn test_master_and_dashboard() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let client = client(seen.clone(), SessionContext::new());

    let statuses = client.master(MasterKind::ResourceStatus).list().await.unwrap();
    assert_eq!(statuses[0].name, "AVAILABLE");

    client
        .master(MasterKind::ResourceStatus)
        .create(&MasterForm {
            name: "RETIRED".into(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(seen.lock().unwrap().bodies[0]["name"], "RETIRED");

    let counts = client.dashboard().count_by(CountDimension::Brand).await.unwrap();
    assert_eq!(counts[0].name, "Lenovo");
    assert_eq!(counts[0].count, 2);
}
