// src/client/mod.rs
//
// A metade "cliente" do painel: o wrapper HTTP sobre a API, a cache de
// sessão persistida localmente, o gate de permissões e o agregador de
// métricas de pedidos. Nada aqui toca na base de dados diretamente.
pub mod api;
pub mod gate;
pub mod metrics;
pub mod session;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Erro de rede: {0}")]
    Http(#[from] reqwest::Error),

    // Resposta não-2xx do servidor, já com a mensagem do corpo {"error"}
    #[error("{mensagem}")]
    Api { status: u16, mensagem: String },

    #[error("Erro ao aceder ao armazenamento local: {0}")]
    Armazenamento(#[from] std::io::Error),

    #[error("Erro ao serializar a sessão: {0}")]
    Serializacao(#[from] serde_json::Error),
}

pub type ClientResult<T = ()> = Result<T, ClientError>;
