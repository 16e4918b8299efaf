// src/noyau/symboles.rs
//
// Table de symboles fermée : seuls les noms listés ici sont appelables.
// Ajouter une fonction = ajouter un cas d'enum + une ligne de table,
// jamais un enregistrement dynamique.

/// Fonctions unaires du noyau.
///
/// `SinDeg`/`CosDeg`/`TanDeg` sont des étiquettes internes posées par la
/// phase de marquage du mode degrés (voir mode.rs) ; elles n'ont pas de nom
/// de surface et ne doivent jamais atteindre l'évaluateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Log, // logarithme népérien ; « ln » est un alias de surface
    Exp,
    Abs,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    SinDeg,
    CosDeg,
    TanDeg,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Exp => "exp",
            Fonction::Abs => "abs",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::SinDeg => "sin_deg",
            Fonction::CosDeg => "cos_deg",
            Fonction::TanDeg => "tan_deg",
        }
    }
}

/// Constantes nommées.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "π",
            Constante::E => "e",
        }
    }
}

/// Noms de fonctions reconnus (les noms arrivent déjà en minuscules).
/// « log » et « ln » partagent le même noyau népérien, distingués par le
/// nom au moment du parse seulement.
pub fn fonction_depuis_nom(nom: &str) -> Option<Fonction> {
    match nom {
        "sqrt" => Some(Fonction::Sqrt),
        "log" | "ln" => Some(Fonction::Log),
        "exp" => Some(Fonction::Exp),
        "abs" => Some(Fonction::Abs),
        "sin" => Some(Fonction::Sin),
        "cos" => Some(Fonction::Cos),
        "tan" => Some(Fonction::Tan),
        "asin" => Some(Fonction::Asin),
        "acos" => Some(Fonction::Acos),
        "atan" => Some(Fonction::Atan),
        _ => None,
    }
}

pub fn constante_depuis_nom(nom: &str) -> Option<Constante> {
    match nom {
        "pi" => Some(Constante::Pi),
        "e" => Some(Constante::E),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_fermee() {
        assert_eq!(fonction_depuis_nom("sin"), Some(Fonction::Sin));
        assert_eq!(fonction_depuis_nom("ln"), Some(Fonction::Log));
        assert_eq!(fonction_depuis_nom("log"), Some(Fonction::Log));
        assert_eq!(fonction_depuis_nom("sinh"), None);
        // les étiquettes internes n'ont pas de nom de surface
        assert_eq!(fonction_depuis_nom("sin_deg"), None);
    }

    #[test]
    fn constantes() {
        assert_eq!(constante_depuis_nom("pi"), Some(Constante::Pi));
        assert_eq!(constante_depuis_nom("e"), Some(Constante::E));
        assert_eq!(constante_depuis_nom("phi"), None);
    }
}
