//! Testes de integração da API, do router para dentro.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use painel_emporio::state::AppState;
use painel_emporio::web::routes::create_router;

struct TestApp {
    router: Router,
    db_pool: SqlitePool,
}

impl TestApp {
    async fn new() -> Self {
        // Base em memória com uma única conexão, senão cada conexão do
        // pool veria uma base diferente
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("falha ao criar pool em memória");

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .expect("falha ao aplicar migrações");

        let router = create_router(AppState {
            db_pool: db_pool.clone(),
        });

        Self { router, db_pool }
    }

    async fn request(
        &self,
        metodo: &str,
        caminho: &str,
        corpo: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(metodo).uri(caminho);

        let corpo = match corpo {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let resposta = self
            .router
            .clone()
            .oneshot(builder.body(corpo).expect("pedido inválido"))
            .await
            .expect("o router nunca falha");

        let status = resposta.status();
        let bytes = axum::body::to_bytes(resposta.into_body(), usize::MAX)
            .await
            .expect("falha ao ler o corpo");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("resposta não é JSON")
        };

        (status, json)
    }

    async fn registar(&self, usuario: &str, senha: &str) -> Value {
        let (status, corpo) = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({ "usuario": usuario, "senha": senha })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registo falhou: {corpo}");
        corpo
    }
}

#[tokio::test]
async fn health_responde_ok() {
    let app = TestApp::new().await;
    let (status, corpo) = app.request("GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(corpo, json!({ "status": "ok" }));
}

#[tokio::test]
async fn registo_devolve_registo_completo_sem_senha() {
    let app = TestApp::new().await;
    let corpo = app.registar("maria", "segredo1").await;

    assert_eq!(corpo["USUARIO"], "maria");
    assert_eq!(corpo["NOME"], "maria"); // sem nome próprio, espelha o usuário
    assert_eq!(corpo["GRAU"], "U");
    assert_eq!(corpo["COMISSAO"], 0.0);
    // Resposta total: as flags saem sempre, com default 'N'
    for flag in ["LOJAS", "MODULO", "BANCOS", "LIMICP", "CCUSTO", "ARMAZEN"] {
        assert_eq!(corpo[flag], "N", "flag {flag} em falta ou errada");
    }
    // E o hash nunca aparece
    assert!(corpo.get("SENHA").is_none());
}

#[tokio::test]
async fn registo_valida_os_limites_da_senha() {
    let app = TestApp::new().await;

    let (status, corpo) = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "usuario": "u1", "senha": "12345" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(corpo["error"], "A senha deve ter pelo menos 6 caracteres");

    let (status, corpo) = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "usuario": "u2", "senha": "123456789012345678901" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(corpo["error"], "A senha deve ter no máximo 20 caracteres");

    // Limites inclusivos: 6 e 20 passam
    app.registar("u3", "123456").await;
    app.registar("u4", "12345678901234567890").await;
}

#[tokio::test]
async fn registo_exige_todos_os_campos() {
    let app = TestApp::new().await;

    for corpo in [
        json!({ "usuario": "maria" }),
        json!({ "senha": "segredo1" }),
        json!({ "usuario": "", "senha": "segredo1" }),
        json!({}),
    ] {
        let (status, resposta) = app.request("POST", "/api/auth/register", Some(corpo)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resposta["error"], "Todos os campos são obrigatórios");
    }
}

#[tokio::test]
async fn registo_duplicado_e_recusado() {
    let app = TestApp::new().await;
    app.registar("ana", "segredo1").await;

    let (status, corpo) = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "usuario": "ana", "senha": "outrasenha" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(corpo["error"], "Usuário já cadastrado");
}

#[tokio::test]
async fn login_depois_do_registo() {
    let app = TestApp::new().await;
    let registado = app.registar("carla", "segredo1").await;

    let (status, autenticado) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "usuario": "carla", "senha": "segredo1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(autenticado, registado);
}

#[tokio::test]
async fn falhas_de_login_sao_indistinguiveis() {
    let app = TestApp::new().await;
    app.registar("rui", "segredo1").await;

    let (status_inexistente, corpo_inexistente) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "usuario": "ninguem", "senha": "segredo1" })),
        )
        .await;
    let (status_errada, corpo_errada) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "usuario": "rui", "senha": "errada99" })),
        )
        .await;

    assert_eq!(status_inexistente, StatusCode::UNAUTHORIZED);
    assert_eq!(status_errada, StatusCode::UNAUTHORIZED);
    // Corpos byte a byte iguais: nada denuncia se o usuário existe
    assert_eq!(corpo_inexistente, corpo_errada);
}

#[tokio::test]
async fn conta_bloqueada_nao_entra_nem_com_senha_certa() {
    let app = TestApp::new().await;
    app.registar("bruno", "segredo1").await;

    sqlx::query("UPDATE senhas SET bloqueado = 1 WHERE usuario = ?1")
        .bind("bruno")
        .execute(&app.db_pool)
        .await
        .unwrap();

    let (status, corpo) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "usuario": "bruno", "senha": "segredo1" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // Mensagem própria, diferente da de credenciais inválidas
    assert_eq!(corpo["error"], "Usuário bloqueado. Contacte o administrador.");
}

#[tokio::test]
async fn listagem_de_utilizadores_ordenada_por_nome() {
    let app = TestApp::new().await;
    app.registar("zulmira", "segredo1").await;
    app.registar("alberto", "segredo1").await;

    let (status, corpo) = app.request("GET", "/api/auth/users", None).await;
    assert_eq!(status, StatusCode::OK);

    let lista = corpo.as_array().unwrap();
    assert_eq!(lista.len(), 2);
    assert_eq!(lista[0]["USUARIO"], "alberto");
    assert_eq!(lista[1]["USUARIO"], "zulmira");
    // O ecrã de gestão precisa do grau para a checkbox de sistema completo
    assert_eq!(lista[0]["GRAU"], "U");
    assert_eq!(lista[0]["COMISSAO"], 0.0);
}

#[tokio::test]
async fn permissoes_recalculam_o_grau() {
    let app = TestApp::new().await;
    app.registar("gestora", "segredo1").await;

    let (status, corpo) = app
        .request(
            "PUT",
            "/api/auth/users/gestora/permissions",
            Some(json!({ "permissoes": { "sistema_completo": true, "lojas": true } })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(corpo["message"], "Permissões atualizadas com sucesso");

    let (_, lista) = app.request("GET", "/api/auth/users", None).await;
    assert_eq!(lista[0]["GRAU"], "S");

    // Sem sistema completo, desce para visualização
    let (status, _) = app
        .request(
            "PUT",
            "/api/auth/users/gestora/permissions",
            Some(json!({ "permissoes": { "sistema_completo": false } })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, lista) = app.request("GET", "/api/auth/users", None).await;
    assert_eq!(lista[0]["GRAU"], "V");

    // E o login devolve as flags tal como ficaram gravadas
    let (_, autenticado) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "usuario": "gestora", "senha": "segredo1" })),
        )
        .await;
    assert_eq!(autenticado["LOJAS"], "N");
    assert_eq!(autenticado["GRAU"], "V");
}

#[tokio::test]
async fn permissoes_de_desconhecido_dao_404() {
    let app = TestApp::new().await;
    let (status, corpo) = app
        .request(
            "PUT",
            "/api/auth/users/fantasma/permissions",
            Some(json!({ "permissoes": { "sistema_completo": true } })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(corpo["error"], "Usuário não encontrado");
}

#[tokio::test]
async fn comissao_valida_tipo_e_intervalo() {
    let app = TestApp::new().await;
    app.registar("vendedor", "segredo1").await;

    // Limites inclusivos
    for valor in [json!(0), json!(100)] {
        let (status, _) = app
            .request(
                "PUT",
                "/api/auth/users/vendedor/comissao",
                Some(json!({ "comissao": valor })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    for valor in [json!(-0.01), json!(100.01)] {
        let (status, corpo) = app
            .request(
                "PUT",
                "/api/auth/users/vendedor/comissao",
                Some(json!({ "comissao": valor })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(corpo["error"], "A comissão deve estar entre 0 e 100");
    }

    for valor in [json!("dez"), json!(true), Value::Null] {
        let (status, corpo) = app
            .request(
                "PUT",
                "/api/auth/users/vendedor/comissao",
                Some(json!({ "comissao": valor })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(corpo["error"], "A comissão deve ser um número");
    }

    // O último valor aceite ficou gravado
    let (_, lista) = app.request("GET", "/api/auth/users", None).await;
    assert_eq!(lista[0]["COMISSAO"], 100.0);
}

#[tokio::test]
async fn comissao_de_desconhecido_da_404() {
    let app = TestApp::new().await;
    let (status, corpo) = app
        .request(
            "PUT",
            "/api/auth/users/fantasma/comissao",
            Some(json!({ "comissao": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(corpo["error"], "Usuário não encontrado");
}

#[tokio::test]
async fn pedidos_saem_do_mais_recente_para_o_mais_antigo() {
    let app = TestApp::new().await;

    for (cliente, emissao, status, valor) in [
        ("Cliente A", "2025-01-10", "L", 100.0),
        ("Cliente B", "2025-03-02", "B", 50.0),
        ("Cliente C", "2025-02-20", "R", 30.0),
    ] {
        sqlx::query("INSERT INTO cabpdv (cliente, emissao, status, valor) VALUES (?1, ?2, ?3, ?4)")
            .bind(cliente)
            .bind(emissao)
            .bind(status)
            .bind(valor)
            .execute(&app.db_pool)
            .await
            .unwrap();
    }

    let (status, corpo) = app.request("GET", "/api/auth/pedidos", None).await;
    assert_eq!(status, StatusCode::OK);

    let pedidos = corpo.as_array().unwrap();
    assert_eq!(pedidos.len(), 3);
    assert_eq!(pedidos[0]["cliente"], "Cliente B");
    assert_eq!(pedidos[1]["cliente"], "Cliente C");
    assert_eq!(pedidos[2]["cliente"], "Cliente A");
    assert_eq!(pedidos[0]["status"], "B");
    assert_eq!(pedidos[0]["valor"], 50.0);
}
