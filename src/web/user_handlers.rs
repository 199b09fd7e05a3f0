// src/web/user_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{ComissaoPayload, PermissoesPayload},
    services::user_service,
    state::AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use serde_json::json;

// GET /api/auth/users
pub async fn listar_utilizadores(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let utilizadores = user_service::listar_utilizadores(&state.db_pool).await?;
    Ok(Json(utilizadores))
}

// PUT /api/auth/users/{usuario}/permissions
//
// Nota: tal como no sistema antigo, não há verificação de que QUEM chama
// tem grau 'S'. A UI esconde os controlos, mas o endpoint em si aceita
// qualquer chamador. Lacuna conhecida, documentada em DESIGN.md.
pub async fn atualizar_permissoes(
    State(state): State<AppState>,
    Path(usuario): Path<String>,
    Json(payload): Json<PermissoesPayload>,
) -> AppResult<impl IntoResponse> {
    user_service::atualizar_permissoes(&state.db_pool, &usuario, &payload.permissoes).await?;
    Ok(Json(json!({ "message": "Permissões atualizadas com sucesso" })))
}

// PUT /api/auth/users/{usuario}/comissao
pub async fn atualizar_comissao(
    State(state): State<AppState>,
    Path(usuario): Path<String>,
    Json(payload): Json<ComissaoPayload>,
) -> AppResult<impl IntoResponse> {
    // A validação de tipo é nossa (não do desserializador) para a resposta
    // ser o 400 com a mensagem de sempre
    let comissao = payload
        .comissao
        .as_f64()
        .ok_or_else(|| AppError::Validacao("A comissão deve ser um número".to_string()))?;

    user_service::atualizar_comissao(&state.db_pool, &usuario, comissao).await?;
    Ok(Json(json!({ "message": "Comissão atualizada com sucesso" })))
}
