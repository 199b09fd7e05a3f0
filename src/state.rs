// src/state.rs
use sqlx::SqlitePool;

// Estado partilhado por todos os handlers. Apenas o pool: os handlers são
// stateless e cada pedido faz as suas próprias leituras/escritas.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
