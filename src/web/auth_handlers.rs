// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::CredenciaisPayload,
    services::auth_service,
    state::AppState,
};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

// Os dois campos têm de vir preenchidos; string vazia conta como ausente
fn campos_obrigatorios(payload: CredenciaisPayload) -> AppResult<(String, String)> {
    let usuario = payload.usuario.filter(|u| !u.is_empty());
    let senha = payload.senha.filter(|s| !s.is_empty());
    match (usuario, senha) {
        (Some(u), Some(s)) => Ok((u, s)),
        _ => Err(AppError::Validacao(
            "Todos os campos são obrigatórios".to_string(),
        )),
    }
}

// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(payload): Json<CredenciaisPayload>,
) -> AppResult<impl IntoResponse> {
    let (usuario, senha) = campos_obrigatorios(payload)?;
    tracing::info!("Tentativa de registo para usuário: {}", usuario);

    let criado = auth_service::registar(&state.db_pool, &usuario, &senha).await?;

    // 201 com o registo completo (sem hash); o cliente guarda isto como
    // sessão, não há token nenhum do lado do servidor
    Ok((StatusCode::CREATED, Json(criado)))
}

// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<CredenciaisPayload>,
) -> AppResult<impl IntoResponse> {
    let (usuario, senha) = campos_obrigatorios(payload)?;
    tracing::info!("Tentativa de login para usuário: {}", usuario);

    let autenticado = auth_service::login(&state.db_pool, &usuario, &senha).await?;

    Ok(Json(autenticado))
}
