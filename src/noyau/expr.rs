// src/noyau/expr.rs
//
// Arbre d'expression immuable.
// - Nombre    : rationnel exact (les littéraux décimaux sont exacts : 12.5 = 125/10)
// - Constante : π, e (résolues en valeur au moment de la réduction)
// - Var       : variable nommée, admise seulement par l'échantillonneur de courbes
// - Appel     : fonction unaire de la table de symboles
// - Neg       : négation unaire
// - binaires  : Add, Sub, Mul, Div, Pow, Mod
//
// IMPORTANT :
// - un arbre construit n'est jamais muté ; toute transformation reconstruit.
//   C'est ce qui garantit que la réécriture degrés ne repasse pas sur les
//   nœuds qu'elle vient de produire.

use num_rational::BigRational;
use num_traits::One;

use std::fmt;

use super::symboles::{Constante, Fonction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Nombre(BigRational),
    Constante(Constante),
    Var(String),

    Appel(Fonction, Box<Expr>),
    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Mod(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Remplace chaque `Var(nom)` par la valeur donnée.
    /// Reconstruction complète : l'arbre d'origine reste intact.
    pub fn substitue(&self, nom: &str, valeur: &BigRational) -> Expr {
        use Expr::*;

        match self {
            Var(v) if v == nom => Nombre(valeur.clone()),

            Nombre(_) | Constante(_) | Var(_) => self.clone(),

            Appel(f, x) => Appel(*f, Box::new(x.substitue(nom, valeur))),
            Neg(x) => Neg(Box::new(x.substitue(nom, valeur))),

            Add(a, b) => Add(
                Box::new(a.substitue(nom, valeur)),
                Box::new(b.substitue(nom, valeur)),
            ),
            Sub(a, b) => Sub(
                Box::new(a.substitue(nom, valeur)),
                Box::new(b.substitue(nom, valeur)),
            ),
            Mul(a, b) => Mul(
                Box::new(a.substitue(nom, valeur)),
                Box::new(b.substitue(nom, valeur)),
            ),
            Div(a, b) => Div(
                Box::new(a.substitue(nom, valeur)),
                Box::new(b.substitue(nom, valeur)),
            ),
            Pow(a, b) => Pow(
                Box::new(a.substitue(nom, valeur)),
                Box::new(b.substitue(nom, valeur)),
            ),
            Mod(a, b) => Mod(
                Box::new(a.substitue(nom, valeur)),
                Box::new(b.substitue(nom, valeur)),
            ),
        }
    }
}

/* ------------------------ Affichage debug (pas l'affichage final) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else {
                    write!(f, "{n}/{d}")
                }
            }
            Constante(c) => write!(f, "{}", c.nom()),
            Var(s) => write!(f, "{s}"),
            Appel(fonction, x) => write!(f, "{}({x})", fonction.nom()),
            Neg(x) => write!(f, "(-{x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
            Mod(a, b) => write!(f, "({a}%{b})"),
        }
    }
}
