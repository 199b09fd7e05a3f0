// src/models/user.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Representa uma linha da tabela 'senhas'. As colunas de permissões e a
// comissão são opcionais na tabela (linhas antigas podem nunca ter sido
// tocadas pelo ecrã de permissões); a resposta pública é que é total.
#[derive(Debug, Clone, FromRow)]
pub struct Utilizador {
    pub usuario: String,
    pub senha: String, // hash bcrypt, nunca sai numa resposta
    pub nome: Option<String>,
    pub grau: String, // 'U', 'V' ou 'S'
    pub lojas: Option<String>,
    pub modulo: Option<String>,
    pub bancos: Option<String>,
    pub limicp: Option<String>,
    pub ccusto: Option<String>,
    pub armazen: Option<String>,
    pub comissao: Option<f64>,
    pub bloqueado: bool,
}

// Resposta pública de um utilizador: todos os campos sempre preenchidos
// (os defaults são aplicados aqui, uma única vez, e não espalhados pelos
// handlers) e sem o hash da senha. A serialização usa os nomes legados em
// maiúsculas que o cliente espera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct UtilizadorPublico {
    pub usuario: String,
    pub nome: String,
    pub grau: String,
    pub lojas: String,
    pub modulo: String,
    pub bancos: String,
    pub limicp: String,
    pub ccusto: String,
    pub armazen: String,
    pub comissao: f64,
}

// 'S'/'N' guardado como texto; vazio ou ausente conta como 'N'.
fn flag_ou_nao(valor: Option<String>) -> String {
    match valor {
        Some(v) if !v.is_empty() => v,
        _ => "N".to_string(),
    }
}

impl From<Utilizador> for UtilizadorPublico {
    fn from(u: Utilizador) -> Self {
        let nome = match u.nome {
            Some(n) if !n.is_empty() => n,
            _ => u.usuario.clone(), // sem nome próprio, mostra o usuário
        };
        Self {
            usuario: u.usuario,
            nome,
            grau: u.grau,
            lojas: flag_ou_nao(u.lojas),
            modulo: flag_ou_nao(u.modulo),
            bancos: flag_ou_nao(u.bancos),
            limicp: flag_ou_nao(u.limicp),
            ccusto: flag_ou_nao(u.ccusto),
            armazen: flag_ou_nao(u.armazen),
            comissao: u.comissao.unwrap_or(0.0),
        }
    }
}

// Linha da listagem de utilizadores (GET /api/auth/users). O GRAU entra
// porque o ecrã de gestão deriva dele o estado da checkbox de sistema
// completo.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ResumoUtilizador {
    pub usuario: String,
    pub nome: String,
    pub comissao: f64,
    pub grau: String,
}

// Corpo de POST /register e POST /login. Os campos são opcionais de
// propósito: a falta deles é um erro de validação nosso (400 com mensagem
// própria), não uma rejeição do desserializador.
#[derive(Debug, Deserialize)]
pub struct CredenciaisPayload {
    pub usuario: Option<String>,
    pub senha: Option<String>,
}

// Conjunto de permissões recebido em PUT /users/{usuario}/permissions.
// Também é serializável: o cliente da API envia exatamente esta forma.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Permissoes {
    #[serde(default)]
    pub sistema_completo: bool,
    #[serde(default)]
    pub lojas: bool,
    #[serde(default)]
    pub modulo: bool,
    #[serde(default)]
    pub bancos: bool,
    #[serde(default)]
    pub limicp: bool,
    #[serde(default)]
    pub ccusto: bool,
    #[serde(default)]
    pub armazen: bool,
}

#[derive(Debug, Deserialize)]
pub struct PermissoesPayload {
    #[serde(default)]
    pub permissoes: Permissoes,
}

// Corpo de PUT /users/{usuario}/comissao. Fica como valor JSON cru para a
// validação de tipo ("deve ser um número") ser nossa e não do extractor.
#[derive(Debug, Deserialize)]
pub struct ComissaoPayload {
    #[serde(default)]
    pub comissao: serde_json::Value,
}
