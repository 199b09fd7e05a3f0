// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{Permissoes, ResumoUtilizador, Utilizador},
};
use sqlx::SqlitePool;

// 'S'/'N' como a tabela guarda os booleanos de permissão
fn sim_nao(valor: bool) -> &'static str {
    if valor {
        "S"
    } else {
        "N"
    }
}

/// Busca um utilizador (linha completa, com hash) pelo nome de usuário.
pub async fn buscar_por_usuario(
    db_pool: &SqlitePool,
    usuario: &str,
) -> AppResult<Option<Utilizador>> {
    tracing::debug!("Buscando utilizador por usuário: {}", usuario);
    let encontrado = sqlx::query_as::<_, Utilizador>(
        r#"
        SELECT usuario, senha, nome, grau, lojas, modulo, bancos,
               limicp, ccusto, armazen, comissao, bloqueado
        FROM senhas
        WHERE usuario = ?1
        "#,
    )
    .bind(usuario)
    .fetch_optional(db_pool)
    .await?;

    Ok(encontrado)
}

/// Lista todos os utilizadores para o ecrã de gestão, ordenados por nome.
/// Sem paginação: a tabela de utilizadores é pequena por natureza.
pub async fn listar_utilizadores(db_pool: &SqlitePool) -> AppResult<Vec<ResumoUtilizador>> {
    tracing::debug!("Buscando todos os utilizadores...");
    let utilizadores = sqlx::query_as::<_, ResumoUtilizador>(
        r#"
        SELECT usuario,
               COALESCE(NULLIF(nome, ''), usuario) AS nome,
               COALESCE(comissao, 0.0) AS comissao,
               grau
        FROM senhas
        ORDER BY nome ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;

    tracing::debug!("Encontrados {} utilizadores.", utilizadores.len());
    Ok(utilizadores)
}

/// Atualiza o conjunto de permissões de um utilizador. O grau é recalculado
/// a partir da flag de sistema completo: 'S' quando ativa, senão 'V'.
pub async fn atualizar_permissoes(
    db_pool: &SqlitePool,
    usuario: &str,
    permissoes: &Permissoes,
) -> AppResult<()> {
    let grau = if permissoes.sistema_completo { "S" } else { "V" };
    tracing::info!(
        "Atualizando permissões de '{}' (novo grau: {})",
        usuario,
        grau
    );

    let rows_affected = sqlx::query(
        r#"
        UPDATE senhas
        SET grau = ?1,
            lojas = ?2,
            modulo = ?3,
            bancos = ?4,
            limicp = ?5,
            ccusto = ?6,
            armazen = ?7
        WHERE usuario = ?8
        "#,
    )
    .bind(grau)
    .bind(sim_nao(permissoes.lojas))
    .bind(sim_nao(permissoes.modulo))
    .bind(sim_nao(permissoes.bancos))
    .bind(sim_nao(permissoes.limicp))
    .bind(sim_nao(permissoes.ccusto))
    .bind(sim_nao(permissoes.armazen))
    .bind(usuario)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Permissões não atualizadas: '{}' não encontrado.", usuario);
        return Err(AppError::NaoEncontrado("Usuário não encontrado".to_string()));
    }

    tracing::info!("✅ Permissões atualizadas com sucesso para '{}'.", usuario);
    Ok(())
}

/// Atualiza a comissão de um utilizador. O valor é validado antes de
/// qualquer escrita; 0 e 100 são aceites (limites inclusivos).
pub async fn atualizar_comissao(
    db_pool: &SqlitePool,
    usuario: &str,
    comissao: f64,
) -> AppResult<()> {
    if !(0.0..=100.0).contains(&comissao) {
        return Err(AppError::Validacao(
            "A comissão deve estar entre 0 e 100".to_string(),
        ));
    }

    tracing::info!("Atualizando comissão de '{}' para {}", usuario, comissao);

    let rows_affected = sqlx::query("UPDATE senhas SET comissao = ?1 WHERE usuario = ?2")
        .bind(comissao)
        .bind(usuario)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Comissão não atualizada: '{}' não encontrado.", usuario);
        return Err(AppError::NaoEncontrado("Usuário não encontrado".to_string()));
    }

    tracing::info!("✅ Comissão atualizada com sucesso para '{}'.", usuario);
    Ok(())
}
