// src/client/api.rs
use crate::client::{ClientError, ClientResult};
use crate::models::pedido::Pedido;
use crate::models::user::{Permissoes, ResumoUtilizador, UtilizadorPublico};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
struct ErroApi {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MensagemApi {
    message: String,
}

#[derive(Debug, Deserialize)]
struct EstadoApi {
    status: String,
}

// Converte uma resposta HTTP no tipo esperado; respostas não-2xx são
// convertidas num ClientError::Api com a mensagem do corpo. Não há
// nenhuma repetição automática de pedidos falhados.
async fn descodificar<T: DeserializeOwned>(resposta: reqwest::Response) -> ClientResult<T> {
    if resposta.status().is_success() {
        return Ok(resposta.json::<T>().await?);
    }

    let status = resposta.status().as_u16();
    let corpo: ErroApi = resposta.json().await.unwrap_or_default();
    Err(ClientError::Api {
        status,
        mensagem: corpo
            .error
            .unwrap_or_else(|| "Erro ao comunicar com o servidor".to_string()),
    })
}

/// Cliente tipado da API do painel. Um por aplicação chega; o reqwest
/// reutiliza as conexões por baixo.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, caminho: &str) -> String {
        format!("{}{}", self.base_url, caminho)
    }

    /// POST /api/auth/register. Devolve o registo criado, pronto a ser
    /// guardado na cache de sessão.
    pub async fn registar(&self, usuario: &str, senha: &str) -> ClientResult<UtilizadorPublico> {
        let resposta = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&json!({ "usuario": usuario, "senha": senha }))
            .send()
            .await?;
        descodificar(resposta).await
    }

    /// POST /api/auth/login
    pub async fn login(&self, usuario: &str, senha: &str) -> ClientResult<UtilizadorPublico> {
        let resposta = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "usuario": usuario, "senha": senha }))
            .send()
            .await?;
        descodificar(resposta).await
    }

    /// GET /api/auth/users
    pub async fn listar_utilizadores(&self) -> ClientResult<Vec<ResumoUtilizador>> {
        let resposta = self.http.get(self.url("/api/auth/users")).send().await?;
        descodificar(resposta).await
    }

    /// PUT /api/auth/users/{usuario}/permissions
    pub async fn atualizar_permissoes(
        &self,
        usuario: &str,
        permissoes: &Permissoes,
    ) -> ClientResult<String> {
        let caminho = format!("/api/auth/users/{}/permissions", usuario);
        let resposta = self
            .http
            .put(self.url(&caminho))
            .json(&json!({ "permissoes": permissoes }))
            .send()
            .await?;
        let mensagem: MensagemApi = descodificar(resposta).await?;
        Ok(mensagem.message)
    }

    /// PUT /api/auth/users/{usuario}/comissao
    pub async fn atualizar_comissao(&self, usuario: &str, comissao: f64) -> ClientResult<String> {
        let caminho = format!("/api/auth/users/{}/comissao", usuario);
        let resposta = self
            .http
            .put(self.url(&caminho))
            .json(&json!({ "comissao": comissao }))
            .send()
            .await?;
        let mensagem: MensagemApi = descodificar(resposta).await?;
        Ok(mensagem.message)
    }

    /// GET /api/auth/pedidos. Devolve as linhas cruas da tabela; o
    /// mapeamento de status fica a cargo de client::metrics.
    pub async fn listar_pedidos(&self) -> ClientResult<Vec<Pedido>> {
        let resposta = self.http.get(self.url("/api/auth/pedidos")).send().await?;
        descodificar(resposta).await
    }

    /// GET /api/health
    pub async fn servidor_disponivel(&self) -> ClientResult<bool> {
        let resposta = self.http.get(self.url("/api/health")).send().await?;
        let estado: EstadoApi = descodificar(resposta).await?;
        Ok(estado.status == "ok")
    }
}
