//! In-memory stand-in for the Pipedrive v1 API.
//!
//! Serves the persons and users endpoints under `/v1`, wraps every reply in
//! the `{success, data, error, errorCode}` envelope, checks the `api_token`
//! query parameter and reports a shrinking daily quota through the
//! `x-daily-requests-left` header.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const DAILY_QUOTA: u32 = 10_000;

#[derive(Default)]
struct Store {
    persons: BTreeMap<u64, Map<String, Value>>,
    next_id: u64,
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    remaining: Arc<AtomicU32>,
    store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::from(token),
            remaining: Arc::new(AtomicU32::new(DAILY_QUOTA)),
            store: Arc::new(RwLock::new(Store::default())),
        }
    }
}

#[derive(Deserialize)]
struct Auth {
    api_token: Option<String>,
}

#[derive(Deserialize)]
struct Page {
    start: Option<usize>,
    limit: Option<usize>,
}

pub fn app(token: &str) -> Router {
    let state = AppState::new(token);
    let api = Router::new()
        .route("/persons", get(list_persons).post(add_person))
        .route(
            "/persons/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize))
        .with_state(state);
    Router::new().nest("/v1", api)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn failure(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "success": false,
        "error": message,
        "errorCode": status.as_u16(),
    });
    (status, Json(body)).into_response()
}

fn success(status: StatusCode, data: Value) -> Response {
    (status, Json(json!({ "success": true, "data": data }))).into_response()
}

async fn authorize(
    State(state): State<AppState>,
    Query(auth): Query<Auth>,
    request: Request,
    next: Next,
) -> Response {
    let remaining = state
        .remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .map(|previous| previous - 1)
        .unwrap_or(0);

    let mut response = if auth.api_token.as_deref() != Some(&*state.token) {
        tracing::debug!(path = %request.uri().path(), "rejected request without valid token");
        failure(
            StatusCode::UNAUTHORIZED,
            "You need to be authorized to make this request.",
        )
    } else {
        next.run(request).await
    };

    response
        .headers_mut()
        .insert("x-daily-requests-left", HeaderValue::from(remaining));
    response
}

async fn list_persons(State(state): State<AppState>, Query(page): Query<Page>) -> Response {
    let store = state.store.read().await;
    let persons: Vec<Value> = store
        .persons
        .values()
        .skip(page.start.unwrap_or(0))
        .take(page.limit.filter(|l| *l > 0).unwrap_or(usize::MAX))
        .cloned()
        .map(Value::Object)
        .collect();
    if persons.is_empty() {
        // The real API reports an empty page as `data: null`.
        return success(StatusCode::OK, Value::Null);
    }
    success(StatusCode::OK, Value::Array(persons))
}

async fn add_person(
    State(state): State<AppState>,
    Json(mut fields): Json<Map<String, Value>>,
) -> Response {
    let named = matches!(fields.get("name"), Some(Value::String(n)) if !n.trim().is_empty());
    if !named {
        return failure(StatusCode::BAD_REQUEST, "Name must be given.");
    }

    let mut store = state.store.write().await;
    store.next_id += 1;
    let id = store.next_id;
    fields.insert("id".to_string(), json!(id));
    store.persons.insert(id, fields.clone());
    success(StatusCode::CREATED, Value::Object(fields))
}

async fn get_person(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let store = state.store.read().await;
    match store.persons.get(&id) {
        Some(person) => success(StatusCode::OK, Value::Object(person.clone())),
        None => failure(StatusCode::NOT_FOUND, "Person not found"),
    }
}

async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(fields): Json<Map<String, Value>>,
) -> Response {
    let mut store = state.store.write().await;
    let Some(person) = store.persons.get_mut(&id) else {
        return failure(StatusCode::NOT_FOUND, "Person not found");
    };
    for (key, value) in fields {
        if key != "id" {
            person.insert(key, value);
        }
    }
    success(StatusCode::OK, Value::Object(person.clone()))
}

async fn delete_person(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut store = state.store.write().await;
    match store.persons.remove(&id) {
        Some(_) => success(StatusCode::OK, json!({ "id": id })),
        None => failure(StatusCode::NOT_FOUND, "Person not found"),
    }
}

async fn list_users() -> Response {
    success(
        StatusCode::OK,
        json!([{ "id": 1, "name": "Account Owner", "is_admin": 1, "active_flag": true }]),
    )
}
