// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, pedido_handlers, user_handlers},
};
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub fn create_router(app_state: AppState) -> Router {
    // Tudo o que o painel consome vive debaixo de /api/auth (herança do
    // servidor antigo, que pendurava até os pedidos neste router)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::handle_register))
        .route("/login", post(auth_handlers::handle_login))
        .route("/users", get(user_handlers::listar_utilizadores))
        .route(
            "/users/{usuario}/permissions",
            put(user_handlers::atualizar_permissoes),
        )
        .route(
            "/users/{usuario}/comissao",
            put(user_handlers::atualizar_comissao),
        )
        .route("/pedidos", get(pedido_handlers::listar_pedidos));

    Router::new()
        .nest("/api/auth", auth_routes)
        .route("/api/health", get(health))
        .with_state(app_state)
}
