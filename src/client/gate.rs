// src/client/gate.rs
use crate::models::user::UtilizadorPublico;

// Predicados puros sobre o utilizador em cache. Decidem apenas o que a UI
// mostra (gestão de utilizadores, edição de permissões); os endpoints de
// escrita do servidor não fazem esta verificação (ver DESIGN.md).

/// Grau 'S' = acesso a sistema completo (administração).
pub fn acesso_total(utilizador: &UtilizadorPublico) -> bool {
    utilizador.grau == "S"
}

/// Interpreta uma flag de permissão guardada como 'S'/'N'.
pub fn flag_ativa(valor: &str) -> bool {
    valor.eq_ignore_ascii_case("S")
}
