// src/client/metrics.rs
use crate::client::api::ApiClient;
use crate::client::ClientResult;
use crate::models::pedido::Pedido;
use async_trait::async_trait;
use chrono::{Duration, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

// Status de um pedido do ponto de vista do painel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPedido {
    Faturado,
    Pendente,
    Perdido,
}

impl StatusPedido {
    /// Mapeia o código cru da tabela cabpdv. Qualquer código que não se
    /// reconheça conta como pendente.
    pub fn do_codigo(codigo: &str) -> Self {
        match codigo {
            "L" => StatusPedido::Faturado,
            "B" => StatusPedido::Pendente,
            "R" => StatusPedido::Perdido,
            _ => StatusPedido::Pendente,
        }
    }
}

/// Pedido já na forma que o painel consome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DadosPedido {
    pub id: String,
    pub cliente: String,
    pub data: String,
    pub status: StatusPedido,
    pub total: f64,
    pub itens: u32,
}

impl DadosPedido {
    /// Converte uma linha da API. A tabela não tem contagem de itens, por
    /// isso sai sempre 1.
    pub fn do_registo(pedido: &Pedido) -> Self {
        Self {
            id: pedido.numero.to_string(),
            cliente: pedido.cliente.clone(),
            data: pedido.emissao.clone(),
            status: StatusPedido::do_codigo(&pedido.status),
            total: pedido.valor,
            itens: 1,
        }
    }
}

/// Contagens por status e faturamento (só pedidos faturados somam).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricasPedidos {
    pub pedidos_faturados: usize,
    pub pedidos_pendentes: usize,
    pub pedidos_perdidos: usize,
    pub faturamento_total: f64,
}

pub fn calcular_metricas(pedidos: &[DadosPedido]) -> MetricasPedidos {
    let mut metricas = MetricasPedidos::default();
    for pedido in pedidos {
        match pedido.status {
            StatusPedido::Faturado => {
                metricas.pedidos_faturados += 1;
                metricas.faturamento_total += pedido.total;
            }
            StatusPedido::Pendente => metricas.pedidos_pendentes += 1,
            StatusPedido::Perdido => metricas.pedidos_perdidos += 1,
        }
    }
    metricas
}

/// Percentagens inteiras por status, para o gráfico circular.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DistribuicaoStatus {
    pub faturados: u32,
    pub pendentes: u32,
    pub perdidos: u32,
}

pub fn distribuicao_por_status(metricas: &MetricasPedidos) -> DistribuicaoStatus {
    let total = metricas.pedidos_faturados + metricas.pedidos_pendentes + metricas.pedidos_perdidos;
    if total == 0 {
        // Sem pedidos: tudo a zero em vez de dividir por zero
        return DistribuicaoStatus::default();
    }

    let percentagem = |parte: usize| ((parte as f64 / total as f64) * 100.0).round() as u32;
    DistribuicaoStatus {
        faturados: percentagem(metricas.pedidos_faturados),
        pendentes: percentagem(metricas.pedidos_pendentes),
        perdidos: percentagem(metricas.pedidos_perdidos),
    }
}

/// Um dia da série temporal do gráfico de histórico.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DadosDiarios {
    pub data: String,
    pub pedidos_faturados: u32,
    pub pedidos_pendentes: u32,
    pub pedidos_perdidos: u32,
    pub faturamento: f64,
}

/// De onde vêm os pedidos do painel. A fonte real (API) e a simulada são
/// intercambiáveis sem tocar no agregador.
#[async_trait]
pub trait FonteDadosPedidos: Send + Sync {
    async fn buscar_pedidos(&self) -> ClientResult<Vec<DadosPedido>>;

    async fn dados_diarios(&self, dias: u32) -> ClientResult<Vec<DadosDiarios>>;

    async fn metricas(&self) -> ClientResult<MetricasPedidos> {
        Ok(calcular_metricas(&self.buscar_pedidos().await?))
    }

    async fn distribuicao(&self) -> ClientResult<DistribuicaoStatus> {
        Ok(distribuicao_por_status(&self.metricas().await?))
    }
}

/// Fonte real: pedidos vindos da API do painel.
pub struct FonteApi {
    cliente: ApiClient,
}

impl FonteApi {
    pub fn new(cliente: ApiClient) -> Self {
        Self { cliente }
    }
}

#[async_trait]
impl FonteDadosPedidos for FonteApi {
    async fn buscar_pedidos(&self) -> ClientResult<Vec<DadosPedido>> {
        let linhas = self.cliente.listar_pedidos().await?;
        Ok(linhas.iter().map(DadosPedido::do_registo).collect())
    }

    async fn dados_diarios(&self, dias: u32) -> ClientResult<Vec<DadosDiarios>> {
        // Ainda não existe consulta agregada por dia no servidor; a série
        // diária continua simulada, como no painel antigo.
        Ok(gerar_dados_diarios(dias))
    }
}

/// Fonte simulada, para desenvolvimento e demonstração sem servidor.
pub struct FonteSimulada;

#[async_trait]
impl FonteDadosPedidos for FonteSimulada {
    async fn buscar_pedidos(&self) -> ClientResult<Vec<DadosPedido>> {
        Ok(gerar_pedidos_simulados())
    }

    async fn dados_diarios(&self, dias: u32) -> ClientResult<Vec<DadosDiarios>> {
        Ok(gerar_dados_diarios(dias))
    }
}

/// Gera 50 pedidos de exemplo. Os primeiros saem todos faturados e os
/// status vão diversificando ao longo da lista, para os gráficos não
/// ficarem nem vazios nem uniformes.
pub fn gerar_pedidos_simulados() -> Vec<DadosPedido> {
    let mut rng = rand::thread_rng();
    let hoje = Local::now();

    (0..50)
        .map(|i| {
            let variantes = if i > 40 {
                3
            } else if i > 20 {
                2
            } else {
                1
            };
            let status = match rng.gen_range(0..variantes) {
                0 => StatusPedido::Faturado,
                1 => StatusPedido::Pendente,
                _ => StatusPedido::Perdido,
            };
            let dias_atras: i64 = rng.gen_range(0..30);

            DadosPedido {
                id: format!("ORD-{}", 1000 + i),
                cliente: format!("Cliente {}", i + 1),
                data: (hoje - Duration::days(dias_atras)).format("%d/%m/%Y").to_string(),
                status,
                total: rng.gen_range(1000..11000) as f64,
                itens: rng.gen_range(1..=10),
            }
        })
        .collect()
}

/// Série diária simulada para os últimos `dias` dias, do mais antigo para
/// o mais recente.
pub fn gerar_dados_diarios(dias: u32) -> Vec<DadosDiarios> {
    let mut rng = rand::thread_rng();
    let hoje = Local::now();

    (0..dias)
        .map(|i| {
            let data = hoje - Duration::days((dias - i - 1) as i64);
            DadosDiarios {
                data: data.format("%d/%m/%Y").to_string(),
                pedidos_faturados: rng.gen_range(10..35),
                pedidos_pendentes: rng.gen_range(5..20),
                pedidos_perdidos: rng.gen_range(1..6),
                faturamento: rng.gen_range(5000..20000) as f64,
            }
        })
        .collect()
}
