// ims-console/tests/crud_pages.rs
// List pages against the mock backend: re-read after write, local validation, diffs

mod support;

use chrono::NaiveDate;
use ims_client::{SessionContext, UploadFile};
use ims_console::ConsoleError;
use ims_console::pages::{
    BatchesPage, CountState, DashboardPage, FiltersPage, InventoryPage, MasterDataPage, ModalMode,
    PageState, users_page,
};
use ims_console::ToastLevel;
use rust_decimal::Decimal;
use serde_json::json;
use shared::models::{
    BatchForm, CountDimension, MasterForm, MasterKind, ResourceFilter, ResourceForm,
};
use support::{MockBackend, notifier};

fn valid_form() -> ResourceForm {
    ResourceForm {
        brand: "HP".into(),
        model: "EliteBook 840".into(),
        specification: "16GB / 512GB".into(),
        resource_type: "Laptop".into(),
        resource_class: "IT Equipment".into(),
        resource_status: "AVAILABLE".into(),
        serial_number: "SN-NEW".into(),
        unit_price: Some(Decimal::new(120000, 2)),
        purchase_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_mount_loads_list_and_master_options() {
    let backend = MockBackend::new();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier());

    page.mount().await.unwrap();

    assert_eq!(*page.list().state(), PageState::Loaded);
    assert_eq!(page.list().records().len(), 2);
    assert_eq!(page.options().types, vec!["Laptop", "Monitor"]);
    assert_eq!(page.options().get(MasterKind::ResourceStatus).len(), 3);
    assert_eq!(backend.count("GET /api/resources"), 1);
}

#[tokio::test]
async fn test_create_is_followed_by_refetch() {
    let backend = MockBackend::new();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier());
    page.mount().await.unwrap();

    let list = page.list_mut();
    list.open_create();
    list.submit_create(valid_form()).await.unwrap();

    let calls = backend.calls();
    let post = calls.iter().position(|c| c == "POST /api/resources").unwrap();
    assert_eq!(calls[post + 1], "GET /api/resources");

    // A list of one resource goes over the wire
    let body = backend.last_body("POST /api/resources").unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["brand"], "HP");

    // Displayed list equals what the backend now holds
    assert_eq!(page.list().records().len(), 3);
    assert_eq!(page.list().records()[2].brand, "HP");
    assert!(!page.list().modal().is_open());
}

#[tokio::test]
async fn test_empty_brand_is_rejected_without_network_call() {
    let backend = MockBackend::new();
    let notifier = notifier();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier.clone());
    page.mount().await.unwrap();
    let before = backend.calls().len();

    let list = page.list_mut();
    list.open_create();
    let err = list
        .submit_create(ResourceForm {
            brand: "  ".into(),
            ..valid_form()
        })
        .await
        .unwrap_err();

    let ConsoleError::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.get("brand"), Some("Brand is required"));
    assert_eq!(errors.len(), 1);
    assert_eq!(backend.calls().len(), before);
    assert_eq!(page.list().modal().mode(), Some(ModalMode::Create));
    assert!(page.list().modal().field_errors().unwrap().contains("brand"));
}

#[tokio::test]
async fn test_edit_sends_only_changed_fields() {
    let backend = MockBackend::new();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier());
    page.mount().await.unwrap();

    let list = page.list_mut();
    let mut form = list.open_edit("1").await.unwrap();
    form.brand = "HP".into();
    form.remarks = None;
    assert!(list.submit_edit(form).await.unwrap());

    assert_eq!(
        backend.last_body("PATCH /api/resources/1").unwrap(),
        json!({"brand": "HP", "remarks": null})
    );
    let calls = backend.calls();
    assert_eq!(calls.last().unwrap(), "GET /api/resources");
    assert_eq!(page.list().records()[0].brand, "HP");
}

#[tokio::test]
async fn test_unchanged_edit_makes_no_request() {
    let backend = MockBackend::new();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier());
    page.mount().await.unwrap();

    let list = page.list_mut();
    let form = list.open_edit("2").await.unwrap();
    assert!(!list.submit_edit(form).await.unwrap());
    assert_eq!(backend.count("PATCH /api/resources/2"), 0);
    assert!(!page.list().modal().is_open());
}

#[tokio::test]
async fn test_failed_update_keeps_list_and_shows_backend_message() {
    let backend = MockBackend::new();
    let notifier = notifier();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier.clone());
    page.mount().await.unwrap();
    let before = page.list().records().to_vec();
    backend.reject_writes(Some("Serial number already exists"));

    let list = page.list_mut();
    let mut form = list.open_edit("1").await.unwrap();
    form.serial_number = "SN-2".into();
    assert!(list.submit_edit(form).await.is_err());

    assert_eq!(page.list().records(), before.as_slice());
    assert_eq!(backend.count("GET /api/resources"), 1);
    assert_eq!(page.list().modal().error(), Some("Serial number already exists"));
    let toast = notifier.last().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "Serial number already exists");
}

#[tokio::test]
async fn test_failed_delete_without_message_uses_fallback() {
    let backend = MockBackend::new();
    let notifier = notifier();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier.clone());
    page.mount().await.unwrap();
    backend.reject_writes(None);

    let list = page.list_mut();
    list.request_delete("1");
    assert!(list.confirm_delete().await.is_err());

    assert_eq!(page.list().records().len(), 2);
    assert_eq!(notifier.last().unwrap().message, "Failed to delete resource");
}

#[tokio::test]
async fn test_delete_goes_through_confirmation() {
    let backend = MockBackend::new();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier());
    page.mount().await.unwrap();

    let list = page.list_mut();
    list.request_delete("2");
    assert_eq!(backend.count("DELETE /api/resources/2"), 0);
    list.confirm_delete().await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls[calls.len() - 2], "DELETE /api/resources/2");
    assert_eq!(calls[calls.len() - 1], "GET /api/resources");
    assert_eq!(page.list().records().len(), 1);
}

#[tokio::test]
async fn test_search_and_pagination() {
    let backend = MockBackend::new();
    let mut page =
        InventoryPage::new(backend.client(SessionContext::new()), notifier()).with_page_size(1);
    page.mount().await.unwrap();

    let list = page.list_mut();
    list.set_page(2);
    let visible = list.visible();
    assert_eq!(visible.total_pages, 2);
    assert_eq!(visible.items[0].brand, "Lenovo");

    list.set_search("dell");
    let visible = list.visible();
    assert_eq!(visible.page, 1);
    assert_eq!(visible.total, 1);
}

#[tokio::test]
async fn test_upload_refetches_inventory() {
    let backend = MockBackend::new();
    let mut page = InventoryPage::new(backend.client(SessionContext::new()), notifier());
    page.mount().await.unwrap();

    let file = UploadFile::spreadsheet("resources.xlsx", b"PK\x03\x04".to_vec());
    page.upload_spreadsheet(file).await.unwrap();

    assert_eq!(backend.count("GET /api/resources"), 2);
    assert_eq!(page.list().records().len(), 3);
    assert!(backend.lock().uploads[0].contains("resources.xlsx"));

    backend.reject_writes(Some("Invalid spreadsheet"));
    let file = UploadFile::spreadsheet("broken.xlsx", vec![0]);
    assert!(page.upload_spreadsheet(file).await.is_err());
    assert_eq!(backend.count("GET /api/resources"), 2);
}

#[tokio::test]
async fn test_barcode_bytes() {
    let backend = MockBackend::new();
    let page = InventoryPage::new(backend.client(SessionContext::new()), notifier());

    let png = page.barcode("1").await.unwrap();
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    assert_eq!(backend.count("GET /api/resources/1/barcode"), 1);
}

#[tokio::test]
async fn test_user_update_sends_partial_put() {
    let backend = MockBackend::new();
    let mut page = users_page(backend.client(SessionContext::new()), notifier());
    page.load().await.unwrap();

    let mut form = page.open_edit("2").await.unwrap();
    form.email = "robert@example.com".into();
    assert!(page.submit_edit(form).await.unwrap());

    assert_eq!(
        backend.last_body("PUT /api/admin/users/2").unwrap(),
        json!({"email": "robert@example.com"})
    );
    assert_eq!(backend.count("GET /api/admin/users"), 2);
    assert_eq!(page.records()[1].email, "robert@example.com");
}

#[tokio::test]
async fn test_invalid_user_email_is_not_sent() {
    let backend = MockBackend::new();
    let mut page = users_page(backend.client(SessionContext::new()), notifier());
    page.load().await.unwrap();

    let mut form = page.open_edit("1").await.unwrap();
    form.email = "not-an-email".into();
    let err = page.submit_edit(form).await.unwrap_err();
    assert!(err.field_errors().unwrap().contains("email"));
    assert_eq!(backend.count("PUT /api/admin/users/1"), 0);
}

#[tokio::test]
async fn test_batch_create_and_refetch() {
    let backend = MockBackend::new();
    let mut page = BatchesPage::new(backend.client(SessionContext::new()), notifier());
    page.mount().await.unwrap();

    let list = page.list_mut();
    list.open_create();
    list.submit_create(BatchForm {
        resource_type: "Monitor".into(),
        quantity: 3,
        description: Some("  ".into()),
    })
    .await
    .unwrap();

    assert_eq!(backend.count("GET /api/batches"), 2);
    assert_eq!(page.list().records().len(), 2);
    assert_eq!(page.list().records()[1].resource_type, "Monitor");
    assert_eq!(
        backend.last_body("POST /api/batches").unwrap(),
        json!({"resourceType": "Monitor", "quantity": 3, "description": null})
    );

    let err = page
        .upload_spreadsheet(" ", UploadFile::spreadsheet("b.xlsx", vec![1]))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::InvalidState(_)));
}

#[tokio::test]
async fn test_master_tabs_create_independently() {
    let backend = MockBackend::new();
    let mut page = MasterDataPage::new(backend.client(SessionContext::new()), notifier());
    page.mount().await.unwrap();
    assert_eq!(page.tab(MasterKind::ResourceClass).records().len(), 2);

    let tab = page.tab_mut(MasterKind::ResourceType);
    tab.open_create();
    let err = tab.submit_create(MasterForm::default()).await.unwrap_err();
    assert!(err.field_errors().unwrap().contains("name"));
    assert_eq!(backend.count("POST /api/master/resource-type"), 0);
}

#[tokio::test]
async fn test_filter_rerun_after_edit() {
    let backend = MockBackend::new();
    let mut page = FiltersPage::new(backend.client(SessionContext::new()), notifier());

    page.search(ResourceFilter {
        brand: Some("Dell".into()),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(page.results().records().len(), 1);

    let results = page.results_mut();
    let mut form = results.open_edit("1").await.unwrap();
    form.resource_status = "IN_USE".into();
    results.submit_edit(form).await.unwrap();

    assert_eq!(backend.count("GET /api/resources/filter?brand=Dell"), 2);
    assert_eq!(page.results().records()[0].resource_status, "IN_USE");

    page.clear().await.unwrap();
    assert_eq!(page.results().records().len(), 2);
}

#[tokio::test]
async fn test_dashboard_dimensions_fail_independently() {
    let backend = MockBackend::new();
    let mut page = DashboardPage::new(backend.client(SessionContext::new()));
    page.load().await;

    match page.count(CountDimension::Brand).unwrap() {
        CountState::Loaded(entries) => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].name, "Dell");
        }
        other => panic!("unexpected brand state {other:?}"),
    }
    assert!(matches!(
        page.count(CountDimension::Model),
        Some(CountState::Error(_))
    ));
    assert!(matches!(
        page.count(CountDimension::Specification),
        Some(CountState::Loaded(_))
    ));
}
