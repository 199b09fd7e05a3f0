// src/web/pedido_handlers.rs
use crate::{error::AppResult, services::pedido_service, state::AppState};
use axum::{extract::State, response::IntoResponse, Json};

// GET /api/auth/pedidos
pub async fn listar_pedidos(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pedidos = pedido_service::listar_pedidos(&state.db_pool).await?;
    Ok(Json(pedidos))
}
