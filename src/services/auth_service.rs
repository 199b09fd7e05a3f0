// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::UtilizadorPublico,
    services::user_service,
};
use sqlx::SqlitePool;

// Custo fixo do bcrypt, o mesmo que o sistema legado sempre usou. Mudar
// isto não invalida hashes antigos (o custo vai embutido no hash).
const CUSTO_BCRYPT: u32 = 10;

const SENHA_MIN: usize = 6;
const SENHA_MAX: usize = 20;
const USUARIO_MAX: usize = 50;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt...");
        bcrypt::hash(&password, CUSTO_BCRYPT)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Regista um novo utilizador. A verificação prévia de duplicado serve só
/// para a mensagem amigável; quem garante a unicidade é a PRIMARY KEY, e
/// uma violação na inserção é convertida no mesmo erro.
pub async fn registar(
    db_pool: &SqlitePool,
    usuario: &str,
    senha: &str,
) -> AppResult<UtilizadorPublico> {
    // 1. Validações de entrada (limites inclusivos: 6 e 20 passam)
    let tamanho_senha = senha.chars().count();
    if tamanho_senha < SENHA_MIN {
        return Err(AppError::Validacao(
            "A senha deve ter pelo menos 6 caracteres".to_string(),
        ));
    }
    if tamanho_senha > SENHA_MAX {
        return Err(AppError::Validacao(
            "A senha deve ter no máximo 20 caracteres".to_string(),
        ));
    }
    if usuario.chars().count() > USUARIO_MAX {
        // Equivalente ao limite de tamanho da coluna no sistema antigo,
        // validado aqui para não depender de erros do driver.
        return Err(AppError::Validacao(
            "Dados fornecidos excedem o tamanho máximo permitido".to_string(),
        ));
    }

    // 2. Verificação prévia de duplicado (caminho rápido)
    if user_service::buscar_por_usuario(db_pool, usuario).await?.is_some() {
        tracing::warn!("Registo recusado: usuário '{}' já existe.", usuario);
        return Err(AppError::UsuarioDuplicado);
    }

    // 3. Hash da senha
    let senha_hash = hash_password(senha).await?;

    // 4. Inserção; NOME começa igual ao usuário e o grau base é 'U'
    let resultado = sqlx::query(
        r#"
        INSERT INTO senhas (usuario, senha, nome, grau, bloqueado)
        VALUES (?1, ?2, ?3, 'U', 0)
        "#,
    )
    .bind(usuario)
    .bind(&senha_hash)
    .bind(usuario)
    .execute(db_pool)
    .await;

    // Violação de UNIQUE (códigos 19/1555/2067 no SQLite): outro pedido
    // ganhou a corrida entre a verificação e a inserção.
    if let Err(sqlx::Error::Database(db_err)) = &resultado {
        if db_err
            .code()
            .map_or(false, |c| c == "19" || c == "2067" || c == "1555")
        {
            tracing::warn!("Registo recusado na inserção: usuário '{}' já existe.", usuario);
            return Err(AppError::UsuarioDuplicado);
        }
    }
    resultado?;

    // 5. Relê a linha criada para devolver a resposta completa (sem hash)
    let criado = user_service::buscar_por_usuario(db_pool, usuario)
        .await?
        .ok_or(AppError::InternalServerError)?;

    tracing::info!("✅ Usuário '{}' registado com sucesso.", usuario);
    Ok(UtilizadorPublico::from(criado))
}

/// Autentica um utilizador. Usuário inexistente e senha errada produzem
/// exatamente o mesmo erro; uma conta bloqueada é recusada antes de sequer
/// comparar a senha.
pub async fn login(
    db_pool: &SqlitePool,
    usuario: &str,
    senha: &str,
) -> AppResult<UtilizadorPublico> {
    let encontrado = match user_service::buscar_por_usuario(db_pool, usuario).await? {
        Some(u) => u,
        None => {
            tracing::warn!("Login falhou: usuário '{}' não encontrado.", usuario);
            return Err(AppError::CredenciaisInvalidas);
        }
    };

    if encontrado.bloqueado {
        tracing::warn!("Login recusado: usuário '{}' está bloqueado.", usuario);
        return Err(AppError::UsuarioBloqueado);
    }

    if !verify_password(senha, &encontrado.senha).await? {
        tracing::warn!("Login falhou: senha incorreta para '{}'.", usuario);
        return Err(AppError::CredenciaisInvalidas);
    }

    tracing::info!("✅ Login bem-sucedido para: {}", usuario);
    // Resposta total: campos opcionais da linha já saem com defaults
    Ok(UtilizadorPublico::from(encontrado))
}
