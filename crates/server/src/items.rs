//! Catalog API endpoints

use api_types::item::{ItemView, ItemsResponse};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState};

fn view(item: engine::Item) -> ItemView {
    ItemView {
        name: item.name,
        price: item.price,
        barcode: item.barcode,
        description: item.description,
    }
}

/// Handle requests for listing the items available to buy
pub async fn catalog(
    _: Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<ItemsResponse>, ServerError> {
    let items = state.engine.catalog().await?;

    Ok(Json(ItemsResponse {
        items: items.into_iter().map(view).collect(),
    }))
}

/// Handle requests for listing the items the caller owns
pub async fn owned(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<ItemsResponse>, ServerError> {
    let items = state.engine.owned_items(&user.username).await?;

    Ok(Json(ItemsResponse {
        items: items.into_iter().map(view).collect(),
    }))
}
