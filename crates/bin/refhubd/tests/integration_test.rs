//! End-to-end smoke tests for the full refhubd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repo,
//! real service, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`. No TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use refhub_adapter_http_axum::router;
use refhub_adapter_http_axum::state::AppState;
use refhub_adapter_storage_sqlite_sqlx::{Config, SqliteRegionRepository};
use refhub_app::services::region_service::RegionService;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config::new("sqlite::memory:")
        .build()
        .await
        .expect("in-memory database should initialise");

    let repo = SqliteRegionRepository::new(db.pool().clone());
    router::build(AppState::new(RegionService::new(repo)))
}

async fn call(app: &axum::Router, operation: &str, body: Value) -> Value {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/regionService/{operation}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn save(app: &axum::Router, entity: Value) -> Value {
    let result = call(app, "save", json!({ "entity": entity })).await;
    assert_eq!(result["isSuccess"], json!(true), "{result}");
    result["data"].clone()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Region endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_save_and_get_region_by_id() {
    let app = app().await;
    let saved = save(
        &app,
        json!({
            "name": "Southern Africa",
            "translations": [
                { "iso3Language": "eng", "name": "Southern Africa", "isDefault": true },
                { "iso3Language": "por", "name": "África Austral" }
            ]
        }),
    )
    .await;

    let result = call(
        &app,
        "getById",
        json!({ "id": saved["id"], "queryIso3Language": "por" }),
    )
    .await;

    assert_eq!(result["isSuccess"], json!(true));
    assert_eq!(result["data"]["id"], saved["id"]);
    assert_eq!(result["data"]["name"], json!("Southern Africa"));
    assert_eq!(result["data"]["displayName"], json!("África Austral"));
    assert_eq!(result["data"]["translations"], saved["translations"]);
}

#[tokio::test]
async fn should_update_existing_region_and_keep_created() {
    let app = app().await;
    let created = save(&app, json!({ "name": "Middle Africa" })).await;

    let updated = save(
        &app,
        json!({ "id": created["id"], "name": "Central Africa", "isActive": false }),
    )
    .await;

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created"], created["created"]);

    let fetched = call(&app, "getById", json!({ "id": created["id"] })).await;
    assert_eq!(fetched["data"]["name"], json!("Central Africa"));
    assert_eq!(fetched["data"]["isActive"], json!(false));
}

#[tokio::test]
async fn should_report_not_found_after_delete() {
    let app = app().await;
    let saved = save(&app, json!({ "name": "Antarctica" })).await;

    let deleted = call(&app, "delete", json!({ "id": saved["id"] })).await;
    assert_eq!(deleted["isSuccess"], json!(true));
    assert_eq!(deleted["data"], Value::Null);

    let fetched = call(&app, "getById", json!({ "id": saved["id"] })).await;
    assert_eq!(fetched["isSuccess"], json!(false));
    assert_eq!(fetched["errorKind"], json!("not_found"));

    let deleted_again = call(&app, "delete", json!({ "id": saved["id"] })).await;
    assert_eq!(deleted_again["errorKind"], json!("not_found"));
}

#[tokio::test]
async fn should_page_through_matches_and_agree_with_count() {
    let app = app().await;
    for name in [
        "Northern America",
        "Central America",
        "South America",
        "Caribbean",
        "Western Asia",
    ] {
        save(&app, json!({ "name": name })).await;
    }

    let page = call(
        &app,
        "findAnyMatching",
        json!({
            "filter": "america",
            "pageable": { "page": 1, "size": 2, "sort": [{ "property": "name", "direction": "ASC" }] }
        }),
    )
    .await;
    let count = call(&app, "countAnyMatching", json!({ "filter": "america" })).await;

    assert_eq!(page["isSuccess"], json!(true));
    assert_eq!(page["data"]["totalElements"], json!(3));
    assert_eq!(page["data"]["totalPages"], json!(2));
    assert_eq!(page["data"]["number"], json!(1));
    assert_eq!(page["data"]["content"][0]["name"], json!("South America"));
    assert_eq!(count["data"], page["data"]["totalElements"]);
}

#[tokio::test]
async fn should_search_translations_in_requested_language() {
    let app = app().await;
    save(
        &app,
        json!({
            "name": "Eastern Asia",
            "translations": [{ "iso3Language": "fra", "name": "Asie de l'Est" }]
        }),
    )
    .await;

    let in_french = call(
        &app,
        "countAnyMatching",
        json!({ "filter": "asie", "iso3Language": "fra" }),
    )
    .await;
    let in_spanish = call(
        &app,
        "countAnyMatching",
        json!({ "filter": "asie", "iso3Language": "spa" }),
    )
    .await;

    assert_eq!(in_french["data"], json!(1));
    assert_eq!(in_spanish["data"], json!(0));
}

#[tokio::test]
async fn should_wrap_validation_failures_in_error_envelope() {
    let app = app().await;

    let unknown_sort = call(
        &app,
        "findAnyMatching",
        json!({ "pageable": { "sort": [{ "property": "secret" }] } }),
    )
    .await;
    let bad_id = call(&app, "getById", json!({ "id": "not-a-uuid" })).await;
    let empty_name = call(&app, "save", json!({ "entity": { "name": "" } })).await;

    for result in [unknown_sort, bad_id, empty_name] {
        assert_eq!(result["isSuccess"], json!(false));
        assert_eq!(result["errorKind"], json!("validation"));
        assert_eq!(result["data"], Value::Null);
    }
}

#[tokio::test]
async fn should_find_non_ascii_names_regardless_of_case() {
    let app = app().await;
    save(
        &app,
        json!({
            "name": "Östliches Afrika",
            "translations": [{ "iso3Language": "fra", "name": "Afrique de l'Est" }]
        }),
    )
    .await;

    for filter in ["Östliches", "östliches", "ÖSTLICHES AFRIKA"] {
        let found = call(&app, "findAnyMatching", json!({ "filter": filter })).await;
        let counted = call(&app, "countAnyMatching", json!({ "filter": filter })).await;

        assert_eq!(found["data"]["totalElements"], json!(1), "{filter}");
        assert_eq!(found["data"]["content"][0]["name"], json!("Östliches Afrika"));
        assert_eq!(counted["data"], json!(1), "{filter}");
    }
}
