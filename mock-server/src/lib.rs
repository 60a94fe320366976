use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub id: Option<u64>,
}

pub type Db = Arc<BTreeMap<u64, User>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    api_token: Option<Arc<str>>,
}

pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 7,
            name: "Grace".to_string(),
        },
        User {
            id: 42,
            name: "Ana".to_string(),
        },
    ]
}

/// Router for the mock API. With `api_token` set, every route answers 401
/// unless the `Authorization` header carries exactly that value.
pub fn app(api_token: Option<String>) -> Router {
    let db: Db = Arc::new(seed_users().into_iter().map(|user| (user.id, user)).collect());
    let state = AppState {
        db,
        api_token: api_token.map(Arc::from),
    };
    Router::new()
        .route("/users", get(get_users))
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/malformed", get(malformed))
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_token: Option<String>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(expected) = state.api_token.as_deref() {
        let provided = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected) {
            debug!(uri = %request.uri(), "rejecting request with missing or wrong token");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }
    next.run(request).await
}

async fn get_users(State(state): State<AppState>, Query(query): Query<UserQuery>) -> Response {
    match query.id {
        None => Json(state.db.values().cloned().collect::<Vec<_>>()).into_response(),
        Some(id) => match state.db.get(&id) {
            Some(user) => Json(user.clone()).into_response(),
            None => {
                debug!(id, "unknown user");
                StatusCode::NOT_FOUND.into_response()
            }
        },
    }
}

async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
    })
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, Json(serde_json::json!({ "status": code }))).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn malformed() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>not json</body></html>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_to_json() {
        let user = User {
            id: 42,
            name: "Ana".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 42, "name": "Ana" }));
    }

    #[test]
    fn seed_contains_ana() {
        assert!(seed_users().iter().any(|user| user.id == 42 && user.name == "Ana"));
    }

    #[test]
    fn user_query_id_is_optional() {
        let query: UserQuery = serde_json::from_str(r#"{}"#).unwrap();
        assert!(query.id.is_none());
    }

    #[test]
    fn echo_query_serializes_as_ordered_pairs() {
        let echo = Echo {
            method: "GET".to_string(),
            query: vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
            ],
            headers: BTreeMap::new(),
        };
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["query"], serde_json::json!([["b", "2"], ["a", "1"]]));
    }
}
