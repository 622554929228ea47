use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::io::Write;
use tower::util::ServiceExt;
use tyche::adapters::api_handler::AppState;
use tyche::adapters::store::MockStore;
use tyche::schema::loader;

const DOCUMENT: &str = r#"
schemas:
  User:
    fields:
      - name: id
        type: int
      - name: name
        type: str
      - name: is_active
        type: bool
"#;

async fn app_with(instances: Vec<Value>) -> (tempfile::NamedTempFile, Router) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DOCUMENT.as_bytes()).unwrap();
    let reference = format!("{}:User", file.path().display());
    let handle = loader::resolve(&reference).unwrap();

    let store = MockStore::new();
    let state = AppState::new(handle, store.clone());
    store.populate(&state.resource, instances).await;

    (file, tyche::create_app(state))
}

fn seed_items() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Ada", "is_active": true}),
        json!({"id": 2, "name": "Brian", "is_active": false}),
        json!({"id": 3, "name": "Grace", "is_active": true}),
        json!({"id": 4, "name": "Edsger", "is_active": false}),
        json!({"id": 5, "name": "Barbara", "is_active": true}),
    ]
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_and_health() {
    let (_file, app) = app_with(seed_items()).await;

    let response = app.clone().oneshot(get("/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 5);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["resource"], "users");
    assert_eq!(health["instances"], 5);
}

#[tokio::test]
async fn test_boolean_filter() {
    let (_file, app) = app_with(seed_items()).await;

    let response = app
        .clone()
        .oneshot(get("/users?is_active=true"))
        .await
        .unwrap();
    let active = body_json(response).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 3);
    assert!(active.iter().all(|item| item["is_active"] == json!(true)));

    let response = app.oneshot(get("/users?is_active=0")).await.unwrap();
    let inactive = body_json(response).await;
    assert_eq!(inactive.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_crud_end_to_end() {
    let (_file, app) = app_with(seed_items()).await;

    // Create without an id: next integer id is assigned
    let payload = json!({"name": "Donald", "is_active": true});
    let response = app
        .clone()
        .oneshot(with_json("POST", "/users", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["id"], 6);

    // The created item is retrievable by its id
    let response = app.clone().oneshot(get("/users/6")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["name"], "Donald");

    // PUT with a conflicting id in the payload preserves the original
    let payload = json!({"id": 999, "name": "Donald K.", "is_active": false});
    let response = app
        .clone()
        .oneshot(with_json("PUT", "/users/6", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["id"], 6);
    assert_eq!(updated["name"], "Donald K.");

    // Delete, then the id no longer resolves
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/6")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/users/6")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_by_positional_index() {
    let (_file, app) = app_with(vec![
        json!({"name": "no-id-a", "is_active": true}),
        json!({"name": "no-id-b", "is_active": false}),
    ])
    .await;

    // No stored item has an id value, so the identifier falls back to a
    // zero-based index
    let response = app.clone().oneshot(get("/users/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await;
    assert_eq!(item["name"], "no-id-b");

    let response = app.oneshot(get("/users/7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_resource_404() {
    let (_file, app) = app_with(seed_items()).await;

    let response = app.clone().oneshot(get("/widgets")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("widgets"));

    let response = app
        .oneshot(with_json("POST", "/widgets", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_miss_404() {
    let (_file, app) = app_with(seed_items()).await;

    let payload = json!({"name": "Nobody", "is_active": false});
    let response = app
        .oneshot(with_json("PUT", "/users/404", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_non_object_payload_rejected() {
    let (_file, app) = app_with(seed_items()).await;

    let response = app
        .oneshot(with_json("POST", "/users", &json!([1, 2, 3])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
