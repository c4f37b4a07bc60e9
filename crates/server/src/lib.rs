use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod items;
mod server;
mod trades;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{RegisterUser, UserView};
    }

    pub mod item {
        pub use api_types::item::{ItemView, ItemsResponse};
    }

    pub mod trade {
        pub use api_types::trade::{TradeReceipt, TradeRequest};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::AuthFailure => StatusCode::UNAUTHORIZED,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ConstraintViolation(_) => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::PasswordHash(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::PurchaseDenied(_) | EngineError::SaleDenied(_) | EngineError::InvalidInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
