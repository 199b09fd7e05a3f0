// src/services/pedido_service.rs
use crate::{error::AppResult, models::pedido::Pedido};
use sqlx::SqlitePool;

/// Busca os 50 pedidos mais recentes para o painel.
pub async fn listar_pedidos(db_pool: &SqlitePool) -> AppResult<Vec<Pedido>> {
    tracing::debug!("Buscando pedidos recentes...");
    let pedidos = sqlx::query_as::<_, Pedido>(
        r#"
        SELECT numero, cliente, emissao, status, valor
        FROM cabpdv
        ORDER BY emissao DESC
        LIMIT 50
        "#,
    )
    .fetch_all(db_pool)
    .await?;

    tracing::debug!("Encontrados {} pedidos.", pedidos.len());
    Ok(pedidos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testes::pool_de_teste;

    async fn inserir_pedido(pool: &SqlitePool, cliente: &str, emissao: &str, status: &str, valor: f64) {
        sqlx::query("INSERT INTO cabpdv (cliente, emissao, status, valor) VALUES (?1, ?2, ?3, ?4)")
            .bind(cliente)
            .bind(emissao)
            .bind(status)
            .bind(valor)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn lista_do_mais_recente_para_o_mais_antigo() {
        let pool = pool_de_teste().await;
        inserir_pedido(&pool, "Cliente A", "2025-01-10", "L", 100.0).await;
        inserir_pedido(&pool, "Cliente B", "2025-03-02", "B", 50.0).await;
        inserir_pedido(&pool, "Cliente C", "2025-02-20", "R", 30.0).await;

        let pedidos = listar_pedidos(&pool).await.unwrap();
        assert_eq!(pedidos.len(), 3);
        assert_eq!(pedidos[0].cliente, "Cliente B");
        assert_eq!(pedidos[1].cliente, "Cliente C");
        assert_eq!(pedidos[2].cliente, "Cliente A");
    }

    #[tokio::test]
    async fn lista_vazia_sem_pedidos() {
        let pool = pool_de_teste().await;
        let pedidos = listar_pedidos(&pool).await.unwrap();
        assert!(pedidos.is_empty());
    }
}
