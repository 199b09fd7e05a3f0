// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    // Entrada malformada, corrigível pelo utilizador; a mensagem segue
    // tal e qual para o cliente.
    #[error("{0}")]
    Validacao(String),

    #[error("Usuário já cadastrado")]
    UsuarioDuplicado,

    // Mensagem única para utilizador inexistente E senha errada, para não
    // permitir enumeração de usuários.
    #[error("Usuário ou senha inválidos")]
    CredenciaisInvalidas,

    #[error("Usuário bloqueado. Contacte o administrador.")]
    UsuarioBloqueado,

    #[error("{0}")]
    NaoEncontrado(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Como converter AppError numa resposta HTTP (JSON, como o resto da API)
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor; o cliente só recebe a
        // mensagem abaixo (nunca texto interno do driver).
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro interno do servidor".to_string(),
            ),
            AppError::EnvVarError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro de configuração.".to_string(),
            ),
            AppError::PasswordHashingError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar credenciais.".to_string(),
            ),
            AppError::Validacao(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UsuarioDuplicado => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::CredenciaisInvalidas => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::UsuarioBloqueado => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::NaoEncontrado(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro interno do servidor".to_string(),
            ),
        };

        (status, Json(json!({ "error": user_message }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
