// In-process stand-in for the REST API, served by axum on an ephemeral port.
use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use crate::models::EntityKind;

#[derive(Default)]
struct FakeState {
    records: HashMap<EntityKind, Vec<Value>>,
    authorizations: Vec<Option<String>>,
    rejected_tokens: HashMap<String, StatusCode>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn seed(&self, kind: EntityKind, record: Value) {
        let mut state = self.state.lock().unwrap();
        state.records.entry(kind).or_default().push(record);
    }

    pub fn records(&self, kind: EntityKind) -> Vec<Value> {
        let state = self.state.lock().unwrap();
        state.records.get(&kind).cloned().unwrap_or_default()
    }

    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().authorizations.clone()
    }

    /// Every request carrying `token` is answered with `status`.
    pub fn reject_token(&self, token: &str, status: StatusCode) {
        let mut state = self.state.lock().unwrap();
        state.rejected_tokens.insert(format!("Bearer {}", token), status);
    }

    fn insert(&self, kind: EntityKind, mut record: Value) -> Value {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("{}-{}", kind.singular(), state.next_id);
        if let Some(object) = record.as_object_mut() {
            object.entry("id").or_insert(Value::String(id));
        }
        state.records.entry(kind).or_default().push(record.clone());
        record
    }

    fn find(&self, kind: EntityKind, id: &str) -> Option<Value> {
        self.records(kind).into_iter().find(|r| r["id"] == id)
    }
}

pub async fn spawn_fake_api(fake: FakeApi) -> (String, FakeApi) {
    let mut app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/tasks/listByUser/:user_id", get(list_tasks_by_user));
    for kind in EntityKind::ALL {
        app = app.merge(resource_routes(kind));
    }
    let app = app
        .layer(from_fn_with_state(fake.clone(), record_authorization))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), fake)
}

fn resource_routes(kind: EntityKind) -> Router<FakeApi> {
    let resource = kind.resource();
    Router::new()
        .route(
            &format!("/{}/create", resource),
            post(move |State(fake): State<FakeApi>, Json(body): Json<Value>| async move {
                Json(fake.insert(kind, body))
            }),
        )
        .route(
            &format!("/{}/list", resource),
            get(
                move |State(fake): State<FakeApi>, Query(query): Query<HashMap<String, String>>| async move {
                    let records: Vec<Value> = fake
                        .records(kind)
                        .into_iter()
                        .filter(|r| match query.get("user_id") {
                            Some(user_id) => r["user_id"] == user_id.as_str(),
                            None => true,
                        })
                        .collect();
                    Json(Value::Array(records))
                },
            ),
        )
        .route(
            &format!("/{}/get/:id", resource),
            get(move |State(fake): State<FakeApi>, Path(id): Path<String>| async move {
                match fake.find(kind, &id) {
                    Some(record) if kind == EntityKind::Tasks => {
                        Json(json!({ "task": record, "subtasks": null })).into_response()
                    }
                    Some(record) => Json(record).into_response(),
                    None => (StatusCode::NOT_FOUND, "not found").into_response(),
                }
            }),
        )
        .route(
            &format!("/{}/update/:id", resource),
            put(
                move |State(fake): State<FakeApi>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    let mut state = fake.state.lock().unwrap();
                    let records = state.records.entry(kind).or_default();
                    match records.iter_mut().find(|r| r["id"] == id.as_str()) {
                        Some(record) => {
                            if let (Some(target), Some(patch)) = (record.as_object_mut(), body.as_object()) {
                                for (k, v) in patch {
                                    target.insert(k.clone(), v.clone());
                                }
                            }
                            Json(record.clone()).into_response()
                        }
                        None => (StatusCode::NOT_FOUND, "not found").into_response(),
                    }
                },
            ),
        )
        .route(
            &format!("/{}/remove/:id", resource),
            delete(move |State(fake): State<FakeApi>, Path(id): Path<String>| async move {
                let mut state = fake.state.lock().unwrap();
                let records = state.records.entry(kind).or_default();
                let before = records.len();
                records.retain(|r| r["id"] != id.as_str());
                if records.len() == before {
                    (StatusCode::NOT_FOUND, "not found").into_response()
                } else {
                    StatusCode::OK.into_response()
                }
            }),
        )
}

async fn record_authorization(State(fake): State<FakeApi>, req: Request, next: Next) -> Response {
    let auth = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let rejected = {
        let mut state = fake.state.lock().unwrap();
        state.authorizations.push(auth.clone());
        let status = auth.and_then(|a| state.rejected_tokens.get(&a).copied());
        status
    };
    match rejected {
        Some(status) => (status, "token rejected").into_response(),
        None => next.run(req).await,
    }
}

// Tasks with no owner come back as `null`, like the Go service's nil slice.
async fn list_tasks_by_user(State(fake): State<FakeApi>, Path(user_id): Path<String>) -> Json<Value> {
    let tasks: Vec<Value> = fake
        .records(EntityKind::Tasks)
        .into_iter()
        .filter(|t| t["assigned_to"] == user_id.as_str())
        .collect();
    if tasks.is_empty() {
        Json(Value::Null)
    } else {
        Json(Value::Array(tasks))
    }
}

// Two JSON documents back to back, the way the user service writes them.
async fn login(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let user = fake.records(EntityKind::Users).into_iter().find(|u| {
        u["username"] == body["username"] && u["password"] == body["password"]
    });
    match user {
        Some(user) => {
            let token = json!({ "token": format!("tok-{}", user["id"].as_str().unwrap_or("")) });
            let body = format!("{}\n{}\n", token, user);
            ([("content-type", "application/json")], body).into_response()
        }
        None => (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response(),
    }
}

async fn register(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    match body["role"].as_str() {
        Some("admin") | Some("regular") => Json(fake.insert(EntityKind::Users, body)).into_response(),
        _ => (StatusCode::BAD_REQUEST, "Invalid user role").into_response(),
    }
}
