// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs du noyau.
///
/// L'affichage (`Display`) est le contrat utilisateur : la façade se contente
/// de préfixer par « Error: ». Le détail porté par `Syntaxe` sert au
/// diagnostic et aux tests, jamais à l'affichage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErreurNoyau {
    /// Entrée mal formée : caractère inattendu, identifiant inconnu,
    /// parenthèses déséquilibrées, arité fausse.
    #[error("Invalid syntax")]
    Syntaxe(String),

    /// Diviseur (ou module) qui se réduit exactement à zéro.
    #[error("Division by zero")]
    DivisionParZero,

    /// Tout autre échec de réduction : domaine invalide, borne dépassée…
    /// Le message est montré tel quel.
    #[error("{0}")]
    Evaluation(String),
}

impl ErreurNoyau {
    pub fn syntaxe(detail: impl Into<String>) -> Self {
        Self::Syntaxe(detail.into())
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }
}

pub type Resultat<T> = std::result::Result<T, ErreurNoyau>;

#[cfg(test)]
mod tests {
    use super::ErreurNoyau;

    #[test]
    fn affichage_fixe_pour_la_syntaxe() {
        let e = ErreurNoyau::syntaxe("parenthèses non fermées");
        assert_eq!(e.to_string(), "Invalid syntax");
    }

    #[test]
    fn affichage_du_message_d_evaluation() {
        let e = ErreurNoyau::evaluation("square root of a negative number");
        assert_eq!(e.to_string(), "square root of a negative number");
        assert_eq!(ErreurNoyau::DivisionParZero.to_string(), "Division by zero");
    }
}
