// src/noyau/eval.rs
//
// Réduction post-ordre d'un arbre d'expression en rationnel exact.
//
// - addition, soustraction, multiplication, négation, valeur absolue,
//   modulo et puissances entières : arithmétique rationnelle exacte
// - division : un diviseur qui se réduit exactement à zéro est une erreur
//   dédiée (DivisionParZero), jamais un infini
// - constantes et transcendantes : routines de numerique.rs, à la précision
//   de travail demandée
// - l'arbre d'entrée n'est jamais muté ; aucune valeur ne survit à l'appel

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::erreur::{ErreurNoyau, Resultat};
use super::expr::Expr;
use super::numerique;
use super::symboles::{Constante, Fonction};

/// Réduit l'arbre en une valeur exacte, à `chiffres` chiffres fractionnaires
/// de travail pour les routines transcendantes.
pub fn reduit(expr: &Expr, chiffres: usize) -> Resultat<BigRational> {
    use Expr::*;

    match expr {
        Nombre(r) => Ok(r.clone()),

        Constante(c) => Ok(constante_valeur(*c, chiffres)),

        // le moteur n'admet pas de variable libre ; l'échantillonneur
        // substitue avant de réduire
        Var(nom) => Err(ErreurNoyau::evaluation(format!("unknown value '{nom}'"))),

        Neg(x) => Ok(-reduit(x, chiffres)?),

        Add(a, b) => Ok(reduit(a, chiffres)? + reduit(b, chiffres)?),
        Sub(a, b) => Ok(reduit(a, chiffres)? - reduit(b, chiffres)?),
        Mul(a, b) => Ok(reduit(a, chiffres)? * reduit(b, chiffres)?),

        Div(a, b) => {
            let diviseur = reduit(b, chiffres)?;
            if diviseur.is_zero() {
                return Err(ErreurNoyau::DivisionParZero);
            }
            Ok(reduit(a, chiffres)? / diviseur)
        }

        Pow(a, b) => {
            let base = reduit(a, chiffres)?;
            let exposant = reduit(b, chiffres)?;
            numerique::puissance(&base, &exposant, chiffres)
        }

        Mod(a, b) => {
            let gauche = reduit(a, chiffres)?;
            let droite = reduit(b, chiffres)?;
            numerique::modulo(&gauche, &droite)
        }

        Appel(f, arg) => {
            let v = reduit(arg, chiffres)?;
            applique_fonction(*f, &v, chiffres)
        }
    }
}

fn constante_valeur(c: Constante, chiffres: usize) -> BigRational {
    match c {
        Constante::Pi => numerique::pi_rationnel(chiffres),
        Constante::E => numerique::e_rationnel(chiffres),
    }
}

fn applique_fonction(f: Fonction, v: &BigRational, chiffres: usize) -> Resultat<BigRational> {
    match f {
        Fonction::Sqrt => numerique::sqrt_rationnel(v, chiffres),
        Fonction::Log => numerique::ln_rationnel(v, chiffres),
        Fonction::Exp => numerique::exp_rationnel(v, chiffres),
        Fonction::Abs => Ok(v.abs()),

        Fonction::Sin => numerique::sin_rationnel(v, chiffres),
        Fonction::Cos => numerique::cos_rationnel(v, chiffres),
        Fonction::Tan => numerique::tan_rationnel(v, chiffres),

        Fonction::Asin => numerique::asin_rationnel(v, chiffres),
        Fonction::Acos => numerique::acos_rationnel(v, chiffres),
        Fonction::Atan => Ok(numerique::atan_rationnel(v, chiffres)),

        // étiquettes internes : un arbre bien formé les a résolues en
        // phase 2 de la transformation de mode
        Fonction::SinDeg | Fonction::CosDeg | Fonction::TanDeg => Err(
            ErreurNoyau::evaluation(format!("unresolved internal function '{}'", f.nom())),
        ),
    }
}
