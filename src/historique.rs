// src/historique.rs
//
// Journal des calculs : paires (expression, résultat), le plus récent en
// tête. Persistance en CSV à deux colonnes, en-tête « Expression,Result ».
//
// Règles :
// - un résultat qui commence par « Error » n'est jamais archivé
// - le chargement remplace le journal en mémoire, dans l'ordre du fichier

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ErreurHistorique {
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entree {
    #[serde(rename = "Expression")]
    pub expression: String,

    #[serde(rename = "Result")]
    pub resultat: String,
}

/// Journal en mémoire, le plus récent d'abord.
#[derive(Debug, Default)]
pub struct Historique {
    entrees: Vec<Entree>,
}

impl Historique {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute en tête. Les erreurs ne sont jamais archivées.
    pub fn ajoute(&mut self, expression: &str, resultat: &str) {
        if resultat.starts_with("Error") {
            return;
        }
        self.entrees.insert(
            0,
            Entree {
                expression: expression.to_string(),
                resultat: resultat.to_string(),
            },
        );
    }

    pub fn entrees(&self) -> &[Entree] {
        &self.entrees
    }

    pub fn vide(&mut self) {
        self.entrees.clear();
    }

    /// Écrit le journal tel quel (du plus récent au plus ancien).
    pub fn sauvegarde(&self, chemin: &Path) -> Result<(), ErreurHistorique> {
        let mut ecrivain = csv::Writer::from_path(chemin)?;
        for entree in &self.entrees {
            ecrivain.serialize(entree)?;
        }
        ecrivain.flush()?;
        debug!(
            chemin = %chemin.display(),
            entrees = self.entrees.len(),
            "historique sauvegardé"
        );
        Ok(())
    }

    /// Recharge le journal depuis le fichier, en conservant son ordre.
    pub fn charge(&mut self, chemin: &Path) -> Result<(), ErreurHistorique> {
        let mut lecteur = csv::Reader::from_path(chemin)?;
        let mut entrees = Vec::new();
        for ligne in lecteur.deserialize() {
            entrees.push(ligne?);
        }
        debug!(
            chemin = %chemin.display(),
            entrees = entrees.len(),
            "historique chargé"
        );
        self.entrees = entrees;
        Ok(())
    }
}
