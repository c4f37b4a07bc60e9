use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{items, trades, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolves the current user from Basic auth credentials.
///
/// Credentials are verified through the engine on every request, which keeps
/// the server free of any session state; the resolved user rides along in the
/// request extensions.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .engine
        .authenticate(auth_header.username(), auth_header.password())
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/user", get(users::get))
        .route("/catalog", get(items::catalog))
        .route("/items", get(items::owned))
        .route("/buy", post(trades::buy))
        .route("/sell", post(trades::sell))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/register", post(users::register))
        .merge(protected)
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::Database;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = engine::Engine::builder().database(db).build().await.unwrap();

        engine
            .new_item("Cheap", 500, "986489354231", "A bargain off the shelf")
            .await
            .unwrap();
        engine
            .new_item("Expensive", 10000, "893212299897", "A luxury nobody needs")
            .await
            .unwrap();

        router(ServerState {
            engine: Arc::new(engine),
        })
    }

    fn basic_auth(username: &str, password: &str) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        format!("Basic {encoded}")
    }

    fn register_request(username: &str, email: &str, password: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({
                    "username": username,
                    "email_address": email,
                    "password": password,
                })
                .to_string(),
            ))
            .unwrap()
    }

    fn trade_request(path: &str, user: &str, password: &str, item: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, basic_auth(user, password))
            .body(Body::from(serde_json::json!({ "item": item }).to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_buy_sell_round_trip() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(register_request("alice", "alice@example.com", "s3cret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["budget"], "1,000$");

        let response = router
            .clone()
            .oneshot(trade_request("/buy", "alice", "s3cret", "Cheap"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let receipt = body_json(response).await;
        assert_eq!(receipt["item"], "Cheap");
        assert_eq!(receipt["budget"], "500$");

        let response = router
            .clone()
            .oneshot(trade_request("/sell", "alice", "s3cret", "Cheap"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let receipt = body_json(response).await;
        assert_eq!(receipt["budget"], "1,000$");
    }

    #[tokio::test]
    async fn register_conflict_maps_to_409() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(register_request("alice", "alice@example.com", "s3cret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .clone()
            .oneshot(register_request("alice", "other@example.com", "s3cret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn protected_routes_require_credentials() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/catalog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(register_request("alice", "alice@example.com", "s3cret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/catalog")
                    .header(header::AUTHORIZATION, basic_auth("alice", "wrong"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn buy_with_insufficient_funds_maps_to_422() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(register_request("alice", "alice@example.com", "s3cret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .clone()
            .oneshot(trade_request("/buy", "alice", "s3cret", "Expensive"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
