// src/graphe.rs
//
// Échantillonnage d'une fonction f(x) pour le tracé.
//
// La sémantique DEG/RAD est DÉLÉGUÉE à la réécriture du noyau
// (mode::applique_mode) : une seule source de vérité, pas de conversion
// degrés re-dérivée ici. L'arbre est analysé et transformé une fois, puis
// chaque échantillon substitue x et réduit.
//
// Les flottants n'apparaissent qu'à cette frontière de tracé : les abscisses
// entrent en f64 (converties en rationnels exacts), les ordonnées sortent en
// f64. Un point dont la réduction échoue (domaine, asymptote) vaut NaN :
// trou dans la courbe, pas d'échec global.

use num_rational::BigRational;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::noyau::erreur::Resultat;
use crate::noyau::eval::reduit;
use crate::noyau::mode::{applique_mode, Mode};
use crate::noyau::numerique::CHIFFRES_TRAVAIL;
use crate::noyau::rpn::analyse_avec_variable;

/// Seul identifiant admis comme variable dans une fonction tracée.
const VARIABLE: &str = "x";

/// Échantillonne `fonction` en `nombre` abscisses régulièrement espacées sur
/// [x_min, x_max]. Une fonction inanalysable fait échouer l'appel entier ;
/// un échantillon hors domaine vaut NaN.
pub fn echantillonne(
    fonction: &str,
    x_min: f64,
    x_max: f64,
    nombre: usize,
    mode: Mode,
) -> Resultat<Vec<(f64, f64)>> {
    let arbre = analyse_avec_variable(fonction, Some(VARIABLE))?;
    let arbre = applique_mode(arbre, mode);

    let mut points = Vec::with_capacity(nombre);
    let mut hors_domaine = 0usize;

    for i in 0..nombre {
        let x = if nombre > 1 {
            x_min + (x_max - x_min) * (i as f64) / ((nombre - 1) as f64)
        } else {
            x_min
        };

        let y = match BigRational::from_float(x) {
            Some(abscisse) => match reduit(&arbre.substitue(VARIABLE, &abscisse), CHIFFRES_TRAVAIL)
            {
                Ok(valeur) => valeur.to_f64().unwrap_or(f64::NAN),
                Err(_) => f64::NAN,
            },
            None => f64::NAN,
        };

        if y.is_nan() {
            hors_domaine += 1;
        }
        points.push((x, y));
    }

    if hors_domaine > 0 {
        debug!(fonction, hors_domaine, nombre, "échantillons hors domaine");
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proche(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "a={a} b={b}");
    }

    #[test]
    fn parabole_simple() {
        let points = echantillonne("x^2", 0.0, 2.0, 3, Mode::Rad).unwrap();
        assert_eq!(points.len(), 3);
        proche(points[0].0, 0.0);
        proche(points[0].1, 0.0);
        proche(points[1].1, 1.0);
        proche(points[2].1, 4.0);
    }

    #[test]
    fn meme_semantique_deg_que_le_moteur() {
        // sin(90) en DEG vaut 1 pour l'échantillonneur comme pour le moteur
        let points = echantillonne("sin(x)", 90.0, 90.0, 1, Mode::Deg).unwrap();
        proche(points[0].1, 1.0);

        // et la réciproque déballe le résultat en degrés
        let points = echantillonne("asin(x)", 1.0, 1.0, 1, Mode::Deg).unwrap();
        proche(points[0].1, 90.0);
    }

    #[test]
    fn rad_par_defaut_du_noyau() {
        let points = echantillonne("sin(x)", 0.0, 0.0, 1, Mode::Rad).unwrap();
        proche(points[0].1, 0.0);

        let points = echantillonne("2x+1", -1.0, 1.0, 2, Mode::Rad).unwrap();
        proche(points[0].1, -1.0);
        proche(points[1].1, 3.0);
    }

    #[test]
    fn hors_domaine_vaut_nan_sans_echec_global() {
        // sqrt négative sur la moitié de l'intervalle
        let points = echantillonne("sqrt(x)", -1.0, 1.0, 5, Mode::Rad).unwrap();
        assert!(points[0].1.is_nan());
        assert!(points[1].1.is_nan());
        proche(points[2].1, 0.0);
        proche(points[4].1, 1.0);
    }

    #[test]
    fn division_par_zero_ponctuelle() {
        let points = echantillonne("1/x", -1.0, 1.0, 3, Mode::Rad).unwrap();
        proche(points[0].1, -1.0);
        assert!(points[1].1.is_nan());
        proche(points[2].1, 1.0);
    }

    #[test]
    fn fonction_inanalysable_echoue_en_bloc() {
        assert!(echantillonne("2**", 0.0, 1.0, 3, Mode::Rad).is_err());
        // un identifiant autre que x reste refusé
        assert!(echantillonne("y+1", 0.0, 1.0, 3, Mode::Rad).is_err());
    }

    #[test]
    fn nombre_degenere() {
        assert!(echantillonne("x", 0.0, 1.0, 0, Mode::Rad).unwrap().is_empty());
        let seul = echantillonne("x+1", 5.0, 9.0, 1, Mode::Rad).unwrap();
        assert_eq!(seul.len(), 1);
        proche(seul[0].0, 5.0);
        proche(seul[0].1, 6.0);
    }
}
