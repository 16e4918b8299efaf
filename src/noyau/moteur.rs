// src/noyau/moteur.rs

use tracing::debug;

use super::erreur::Resultat;
use super::eval::reduit;
use super::format::formate_resultat;
use super::mode::{applique_mode, Mode};
use super::numerique::CHIFFRES_TRAVAIL;
use super::rpn::analyse;

/// Façade du moteur : détient le mode d'angle courant et enchaîne
/// analyse → transformation de mode → réduction → formatage.
///
/// Contrat d'appel : les évaluations sont séquentielles (une évaluation se
/// termine avant que la suivante ne parte) ; le mode est posé avant l'appel
/// et n'est que lu pendant. Pas de réentrance, donc pas de verrou.
#[derive(Debug, Default)]
pub struct Moteur {
    mode: Mode,
}

impl Moteur {
    /// Mode RAD par défaut.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// N'affecte que les évaluations suivantes.
    pub fn regle_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Point d'entrée unique.
    ///
    /// - entrée vide ou blanche : chaîne vide, ce n'est pas une erreur
    /// - sinon : résultat canonique, ou « Error: … » — jamais de panique,
    ///   jamais d'erreur structurée qui traverse
    pub fn evalue(&self, texte: &str) -> String {
        if texte.trim().is_empty() {
            return String::new();
        }

        match self.evalue_interne(texte) {
            Ok(resultat) => resultat,
            Err(e) => {
                debug!(entree = texte, erreur = %e, "évaluation en échec");
                format!("Error: {e}")
            }
        }
    }

    fn evalue_interne(&self, texte: &str) -> Resultat<String> {
        let arbre = analyse(texte)?;
        let arbre = applique_mode(arbre, self.mode);
        let valeur = reduit(&arbre, CHIFFRES_TRAVAIL)?;
        debug!(mode = ?self.mode, entree = texte, "réduction terminée");
        Ok(formate_resultat(&valeur))
    }
}
