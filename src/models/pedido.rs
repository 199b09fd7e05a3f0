// src/models/pedido.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Cabeçalho de pedido lido da tabela 'cabpdv'. O status vem no código cru
// da tabela ('L', 'B', 'R'); o mapeamento para os status do painel é feito
// no lado do cliente (client::metrics).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Pedido {
    pub numero: i64,
    pub cliente: String,
    pub emissao: String,
    pub status: String,
    pub valor: f64,
}
