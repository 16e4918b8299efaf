// src/noyau/mode.rs
//
// Mode d'angle + réécriture degrés en deux phases.
//
// Le piège classique : substituer naïvement sin(x) par sin(x·π/180) fait
// re-matcher la règle sur son propre produit, indéfiniment. D'où :
// - Phase 1 (marquage) : sin/cos/tan deviennent SinDeg/CosDeg/TanDeg,
//   remontée bottom-up, argument intact, zéro arithmétique.
// - Phase 2 (résolution) : f_deg(arg) devient f(arg·(π/180)) avec des nœuds
//   neufs ; les sin/cos/tan réels n'apparaissent qu'en sortie de phase et ne
//   sont jamais revisités.
// - Les réciproques (asin/acos/atan) rendent un angle : on enveloppe le
//   RÉSULTAT, f(arg) devient f(arg)/(π/180), directement en phase 2 — elles
//   ne sont pas structurellement ambiguës avec leur propre sortie, pas
//   besoin de marquage.

use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreur::ErreurNoyau;
use super::expr::Expr;
use super::symboles::{Constante, Fonction};

/// Mode d'angle courant. RAD par défaut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    Deg,
    #[default]
    Rad,
}

impl FromStr for Mode {
    type Err = ErreurNoyau;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEG" => Ok(Mode::Deg),
            "RAD" => Ok(Mode::Rad),
            autre => Err(ErreurNoyau::evaluation(format!(
                "unknown angle mode '{autre}'"
            ))),
        }
    }
}

/// Transformation de mode : identité en RAD, réécriture deux phases en DEG.
/// Pure, sans échec ; la forme de l'arbre hors des sous-arbres trig est
/// préservée.
pub fn applique_mode(expr: Expr, mode: Mode) -> Expr {
    match mode {
        Mode::Rad => expr,
        Mode::Deg => resous_marques(marque_trig(expr)),
    }
}

/// π/180, construit neuf à chaque insertion (l'arbre reste un arbre).
fn facteur_conversion() -> Expr {
    Expr::Div(
        Box::new(Expr::Constante(Constante::Pi)),
        Box::new(Expr::Nombre(BigRational::from_integer(BigInt::from(180)))),
    )
}

/// Phase 1 : étiquette sin/cos/tan, bottom-up, sans arithmétique.
fn marque_trig(expr: Expr) -> Expr {
    use Expr::*;

    match expr {
        Appel(f, x) => {
            let x = marque_trig(*x);
            let f = match f {
                Fonction::Sin => Fonction::SinDeg,
                Fonction::Cos => Fonction::CosDeg,
                Fonction::Tan => Fonction::TanDeg,
                autre => autre,
            };
            Appel(f, Box::new(x))
        }

        Neg(x) => Neg(Box::new(marque_trig(*x))),

        Add(a, b) => Add(Box::new(marque_trig(*a)), Box::new(marque_trig(*b))),
        Sub(a, b) => Sub(Box::new(marque_trig(*a)), Box::new(marque_trig(*b))),
        Mul(a, b) => Mul(Box::new(marque_trig(*a)), Box::new(marque_trig(*b))),
        Div(a, b) => Div(Box::new(marque_trig(*a)), Box::new(marque_trig(*b))),
        Pow(a, b) => Pow(Box::new(marque_trig(*a)), Box::new(marque_trig(*b))),
        Mod(a, b) => Mod(Box::new(marque_trig(*a)), Box::new(marque_trig(*b))),

        Nombre(_) | Constante(_) | Var(_) => expr,
    }
}

/// Phase 2 : résout les étiquettes (argument converti) et enveloppe les
/// réciproques (résultat converti). Bottom-up : les nœuds produits ici ne
/// sont jamais revisités.
fn resous_marques(expr: Expr) -> Expr {
    use Expr::*;

    match expr {
        Appel(f, x) => {
            let x = resous_marques(*x);
            match f {
                Fonction::SinDeg | Fonction::CosDeg | Fonction::TanDeg => {
                    let reel = match f {
                        Fonction::SinDeg => Fonction::Sin,
                        Fonction::CosDeg => Fonction::Cos,
                        _ => Fonction::Tan,
                    };
                    // f_deg(arg) => f(arg × (π/180))
                    Appel(
                        reel,
                        Box::new(Mul(Box::new(x), Box::new(facteur_conversion()))),
                    )
                }

                Fonction::Asin | Fonction::Acos | Fonction::Atan => {
                    // f(arg) => f(arg) ÷ (π/180)
                    Div(
                        Box::new(Appel(f, Box::new(x))),
                        Box::new(facteur_conversion()),
                    )
                }

                autre => Appel(autre, Box::new(x)),
            }
        }

        Neg(x) => Neg(Box::new(resous_marques(*x))),

        Add(a, b) => Add(Box::new(resous_marques(*a)), Box::new(resous_marques(*b))),
        Sub(a, b) => Sub(Box::new(resous_marques(*a)), Box::new(resous_marques(*b))),
        Mul(a, b) => Mul(Box::new(resous_marques(*a)), Box::new(resous_marques(*b))),
        Div(a, b) => Div(Box::new(resous_marques(*a)), Box::new(resous_marques(*b))),
        Pow(a, b) => Pow(Box::new(resous_marques(*a)), Box::new(resous_marques(*b))),
        Mod(a, b) => Mod(Box::new(resous_marques(*a)), Box::new(resous_marques(*b))),

        Nombre(_) | Constante(_) | Var(_) => expr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::rpn::analyse;

    fn nb(n: i64) -> Expr {
        Expr::Nombre(BigRational::from_integer(BigInt::from(n)))
    }

    fn appel(f: Fonction, x: Expr) -> Expr {
        Expr::Appel(f, Box::new(x))
    }

    fn mul(a: Expr, b: Expr) -> Expr {
        Expr::Mul(Box::new(a), Box::new(b))
    }

    fn div(a: Expr, b: Expr) -> Expr {
        Expr::Div(Box::new(a), Box::new(b))
    }

    fn conv() -> Expr {
        div(Expr::Constante(Constante::Pi), nb(180))
    }

    #[test]
    fn rad_est_l_identite() {
        let e = analyse("sin(cos(30))+2").unwrap();
        assert_eq!(applique_mode(e.clone(), Mode::Rad), e);
    }

    #[test]
    fn deg_enveloppe_l_argument_trig() {
        let e = analyse("sin(30)").unwrap();
        assert_eq!(
            applique_mode(e, Mode::Deg),
            appel(Fonction::Sin, mul(nb(30), conv()))
        );
    }

    #[test]
    fn deg_enveloppe_le_resultat_des_reciproques() {
        let e = analyse("asin(1)").unwrap();
        assert_eq!(
            applique_mode(e, Mode::Deg),
            div(appel(Fonction::Asin, nb(1)), conv())
        );
    }

    #[test]
    fn deg_compose_en_profondeur() {
        // sin(cos(30)) : les deux appels sont convertis, l'interne d'abord
        let e = analyse("sin(cos(30))").unwrap();
        let interne = appel(Fonction::Cos, mul(nb(30), conv()));
        assert_eq!(
            applique_mode(e, Mode::Deg),
            appel(Fonction::Sin, mul(interne, conv()))
        );
    }

    #[test]
    fn deg_ne_touche_pas_le_reste_de_l_arbre() {
        let e = analyse("1+2*3^4").unwrap();
        assert_eq!(applique_mode(e.clone(), Mode::Deg), e);
    }

    #[test]
    fn deg_ne_reboucle_pas_sur_sa_sortie() {
        // une double application n'explose pas : la seconde ré-enveloppe
        // proprement (un seul niveau de plus), preuve qu'aucune règle ne
        // matche sa propre sortie pendant une passe
        let e = analyse("sin(30)").unwrap();
        let une_fois = applique_mode(e, Mode::Deg);
        let attendu = appel(
            Fonction::Sin,
            mul(mul(nb(30), conv()), conv()),
        );
        assert_eq!(applique_mode(une_fois, Mode::Deg), attendu);
    }

    #[test]
    fn analyse_du_mode_depuis_la_surface() {
        assert_eq!("DEG".parse::<Mode>().unwrap(), Mode::Deg);
        assert_eq!("rad".parse::<Mode>().unwrap(), Mode::Rad);
        assert!("GRAD".parse::<Mode>().is_err());
    }
}
