// src/client/session.rs
use crate::client::ClientResult;
use crate::models::user::UtilizadorPublico;
use std::fs;
use std::path::PathBuf;

// Estado da sessão do lado do cliente. Enquanto está Desconhecido (ainda
// não se leu o armazenamento) a UI dependente de autenticação tem de ficar
// suspensa: nem mostrar o painel nem mandar para o login, senão há um
// flash do ecrã errado no arranque.
#[derive(Debug, Clone, PartialEq)]
pub enum EstadoSessao {
    Desconhecido,
    Autenticado(UtilizadorPublico),
    Anonimo,
}

/// Cache da última resposta de login/registo, persistida num ficheiro JSON
/// (o equivalente ao localStorage do painel antigo). Sem expiração e sem
/// revalidação no servidor: terminar sessão é puramente local.
#[derive(Debug)]
pub struct CacheSessao {
    caminho: PathBuf,
    estado: EstadoSessao,
}

impl CacheSessao {
    pub fn new(caminho: impl Into<PathBuf>) -> Self {
        Self {
            caminho: caminho.into(),
            estado: EstadoSessao::Desconhecido,
        }
    }

    /// Lê o armazenamento persistido, uma única vez, no arranque. Ficheiro
    /// ausente ou ilegível significa "sem sessão", nunca um erro para a UI;
    /// conteúdo corrompido é apagado para não voltar a tropeçar nele.
    pub fn carregar(&mut self) {
        if self.estado != EstadoSessao::Desconhecido {
            // Já saímos de Desconhecido; não há transição de volta
            return;
        }

        let conteudo = match fs::read_to_string(&self.caminho) {
            Ok(c) => c,
            Err(_) => {
                self.estado = EstadoSessao::Anonimo;
                return;
            }
        };

        match serde_json::from_str::<UtilizadorPublico>(&conteudo) {
            Ok(utilizador) => {
                tracing::debug!("Sessão restaurada para '{}'.", utilizador.usuario);
                self.estado = EstadoSessao::Autenticado(utilizador);
            }
            Err(e) => {
                tracing::warn!("Sessão persistida corrompida ({}); a limpar.", e);
                let _ = fs::remove_file(&self.caminho);
                self.estado = EstadoSessao::Anonimo;
            }
        }
    }

    /// Guarda a resposta de um login/registo bem-sucedido como sessão
    /// atual e persiste-a. O registo já vem sem hash do servidor.
    pub fn autenticar(&mut self, utilizador: UtilizadorPublico) -> ClientResult<()> {
        let serializado = serde_json::to_string(&utilizador)?;
        fs::write(&self.caminho, serializado)?;
        self.estado = EstadoSessao::Autenticado(utilizador);
        Ok(())
    }

    /// Termina a sessão: limpa o estado e remove o ficheiro. Não há nada
    /// para invalidar no servidor.
    pub fn terminar(&mut self) {
        if let EstadoSessao::Autenticado(u) = &self.estado {
            tracing::info!("🚪 Sessão de '{}' terminada.", u.usuario);
        }
        self.estado = EstadoSessao::Anonimo;
        let _ = fs::remove_file(&self.caminho);
    }

    pub fn estado(&self) -> &EstadoSessao {
        &self.estado
    }

    /// Utilizador atual, se a sessão estiver autenticada.
    pub fn utilizador(&self) -> Option<&UtilizadorPublico> {
        match &self.estado {
            EstadoSessao::Autenticado(u) => Some(u),
            _ => None,
        }
    }

    /// false enquanto o armazenamento ainda não foi lido: é o sinal de
    /// "ainda a carregar" que suspende a UI dependente de autenticação.
    pub fn pronta(&self) -> bool {
        self.estado != EstadoSessao::Desconhecido
    }
}
