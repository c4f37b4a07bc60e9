//! Trade API endpoints

use api_types::trade::{TradeReceipt, TradeRequest};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for buying a catalog item
pub async fn buy(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<TradeRequest>,
) -> Result<Json<TradeReceipt>, ServerError> {
    let item = state.engine.purchase(&user.username, &payload.item).await?;
    let user = state.engine.user(&user.username).await?;

    Ok(Json(TradeReceipt {
        item: item.name,
        price: item.price,
        budget: user.pretty_budget(),
    }))
}

/// Handle requests for selling an owned item back to the catalog
pub async fn sell(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<TradeRequest>,
) -> Result<Json<TradeReceipt>, ServerError> {
    let item = state.engine.sell(&user.username, &payload.item).await?;
    let user = state.engine.user(&user.username).await?;

    Ok(Json(TradeReceipt {
        item: item.name,
        price: item.price,
        budget: user.pretty_budget(),
    }))
}
