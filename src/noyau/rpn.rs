// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif :
// - Convertir une suite de Jeton en RPN (postfix)
// - Puis reconstruire Expr en passant par la table de symboles
//
// Règles :
// - Ident(nom) :
//    - si la table le connaît comme fonction => fonction unaire (postfixée en RPN)
//    - si la table le connaît comme constante => atome
//    - si c'est la variable admise (échantillonneur) => Expr::Var
//    - sinon => erreur de syntaxe
// - Moins unaire :
//    - si '-' arrive quand on n'attend PAS une valeur, il devient MoinsUnaire
//      (préfixe, ne dépile rien) et construit Expr::Neg
//    - il lie plus fort que ^ : -2^2 se lit (-2)^2
//
// NOTE :
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreur::{ErreurNoyau, Resultat};
use super::expr::Expr;
use super::jetons::{decoupe, insere_mult_implicite, pretraite, Jeton};
use super::symboles::{constante_depuis_nom, fonction_depuis_nom};

fn precedence(j: &Jeton) -> i32 {
    match j {
        Jeton::Plus | Jeton::Moins => 1,
        Jeton::Etoile | Jeton::Barre | Jeton::Pourcent => 2,
        Jeton::Caret => 3,
        Jeton::MoinsUnaire => 4,
        _ => 0,
    }
}

fn is_right_associative(j: &Jeton) -> bool {
    matches!(j, Jeton::Caret)
}

fn est_fonction(nom: &str) -> bool {
    fonction_depuis_nom(nom).is_some()
}

/// Analyse complète : prétraitement -> jetons -> mult implicite -> RPN -> Expr.
/// Aucun identifiant libre n'est admis (contrat du moteur).
pub fn analyse(texte: &str) -> Resultat<Expr> {
    analyse_avec_variable(texte, None)
}

/// Variante pour l'échantillonneur de courbes : exactement un identifiant
/// (le nom donné) est admis comme variable.
pub fn analyse_avec_variable(texte: &str, variable: Option<&str>) -> Resultat<Expr> {
    let source = pretraite(texte);
    let jetons = insere_mult_implicite(decoupe(&source)?);
    let rpn = to_rpn(&jetons)?;
    from_rpn(&rpn, variable)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple :
///   jetons : [Ident("sin"), ParG, Ident("pi"), Barre, Nombre(2), ParD]
///   rpn    : [Ident("pi"), Nombre(2), Barre, Ident("sin")]
pub fn to_rpn(jetons: &[Jeton]) -> Resultat<Vec<Jeton>> {
    let mut out: Vec<Jeton> = Vec::new();
    let mut ops: Vec<Jeton> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for jeton in jetons.iter().cloned() {
        match jeton {
            Jeton::Nombre(_) => {
                out.push(jeton);
                prev_was_value = true;
            }

            Jeton::Ident(nom) => {
                if est_fonction(&nom) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Jeton::Ident(nom));
                    prev_was_value = false;
                } else {
                    // constante ou variable : sortie directe
                    out.push(Jeton::Ident(nom));
                    prev_was_value = true;
                }
            }

            Jeton::ParG => {
                ops.push(jeton);
                prev_was_value = false;
            }

            Jeton::ParD => {
                // dépile jusqu'à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Jeton::ParG) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurNoyau::syntaxe("parenthèse fermante orpheline"));
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Jeton::Ident(nom)) = ops.last() {
                    if est_fonction(nom.as_str()) {
                        out.push(ops.pop().unwrap());
                    }
                }

                prev_was_value = true;
            }

            Jeton::Moins if !prev_was_value => {
                // moins unaire : préfixe, ne dépile rien.
                ops.push(Jeton::MoinsUnaire);
            }

            Jeton::Plus
            | Jeton::Moins
            | Jeton::Etoile
            | Jeton::Barre
            | Jeton::Pourcent
            | Jeton::Caret => {
                // dépile tant que :
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Jeton::ParG) {
                        break;
                    }
                    if let Jeton::Ident(nom) = top {
                        if est_fonction(nom.as_str()) {
                            break;
                        }
                    }

                    let p_top = precedence(top);
                    let p_jeton = precedence(&jeton);

                    let doit_pop = if is_right_associative(&jeton) {
                        p_top > p_jeton
                    } else {
                        p_top >= p_jeton
                    };

                    if doit_pop {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(jeton);
                prev_was_value = false;
            }

            Jeton::MoinsUnaire => {
                // jamais produit par la tokenisation
                return Err(ErreurNoyau::syntaxe("jeton interne inattendu"));
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Jeton::ParG) {
            return Err(ErreurNoyau::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN.
///
/// `variable` : identifiant admis comme Expr::Var (None pour le moteur).
pub fn from_rpn(rpn: &[Jeton], variable: Option<&str>) -> Resultat<Expr> {
    let mut st: Vec<Expr> = Vec::new();

    for jeton in rpn.iter().cloned() {
        match jeton {
            Jeton::Nombre(r) => st.push(Expr::Nombre(r)),

            Jeton::MoinsUnaire => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurNoyau::syntaxe("négation sans opérande"))?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Jeton::Plus
            | Jeton::Moins
            | Jeton::Etoile
            | Jeton::Barre
            | Jeton::Pourcent
            | Jeton::Caret => {
                let b = st
                    .pop()
                    .ok_or_else(|| ErreurNoyau::syntaxe("expression invalide"))?;
                let a = st
                    .pop()
                    .ok_or_else(|| ErreurNoyau::syntaxe("expression invalide"))?;

                let e = match jeton {
                    Jeton::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Jeton::Moins => Expr::Sub(Box::new(a), Box::new(b)),
                    Jeton::Etoile => Expr::Mul(Box::new(a), Box::new(b)),
                    Jeton::Barre => Expr::Div(Box::new(a), Box::new(b)),
                    Jeton::Pourcent => Expr::Mod(Box::new(a), Box::new(b)),
                    Jeton::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Jeton::Ident(nom) => {
                if let Some(f) = fonction_depuis_nom(&nom) {
                    let x = st
                        .pop()
                        .ok_or_else(|| ErreurNoyau::syntaxe("fonction sans argument"))?;
                    st.push(Expr::Appel(f, Box::new(x)));
                } else if let Some(c) = constante_depuis_nom(&nom) {
                    st.push(Expr::Constante(c));
                } else if Some(nom.as_str()) == variable {
                    st.push(Expr::Var(nom));
                } else {
                    return Err(ErreurNoyau::syntaxe(format!("identifiant inconnu: '{nom}'")));
                }
            }

            Jeton::ParG | Jeton::ParD => {
                return Err(ErreurNoyau::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurNoyau::syntaxe("expression invalide"));
    }
    Ok(st.pop().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::symboles::{Constante, Fonction};
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn nb(n: i64) -> Expr {
        Expr::Nombre(BigRational::from_integer(BigInt::from(n)))
    }

    fn syntaxe_refusee(s: &str) {
        match analyse(s) {
            Err(ErreurNoyau::Syntaxe(_)) => {}
            autre => panic!("attendu une erreur de syntaxe pour {s:?}, obtenu {autre:?}"),
        }
    }

    #[test]
    fn analyse_simple() {
        assert_eq!(
            analyse("2+3").unwrap(),
            Expr::Add(Box::new(nb(2)), Box::new(nb(3)))
        );
    }

    #[test]
    fn appel_de_fonction() {
        assert_eq!(
            analyse("sin(pi/2)").unwrap(),
            Expr::Appel(
                Fonction::Sin,
                Box::new(Expr::Div(
                    Box::new(Expr::Constante(Constante::Pi)),
                    Box::new(nb(2)),
                )),
            )
        );
    }

    #[test]
    fn alias_ln() {
        assert_eq!(
            analyse("ln(2)").unwrap(),
            Expr::Appel(Fonction::Log, Box::new(nb(2)))
        );
    }

    #[test]
    fn mult_implicite_dans_l_analyse() {
        assert_eq!(
            analyse("2sin(3)").unwrap(),
            Expr::Mul(
                Box::new(nb(2)),
                Box::new(Expr::Appel(Fonction::Sin, Box::new(nb(3)))),
            )
        );
    }

    #[test]
    fn puissance_associative_a_droite() {
        // 2^3^2 = 2^(3^2)
        assert_eq!(
            analyse("2^3^2").unwrap(),
            Expr::Pow(
                Box::new(nb(2)),
                Box::new(Expr::Pow(Box::new(nb(3)), Box::new(nb(2)))),
            )
        );
    }

    #[test]
    fn moins_unaire_lie_plus_fort_que_la_puissance() {
        // -2^2 = (-2)^2
        assert_eq!(
            analyse("-2^2").unwrap(),
            Expr::Pow(Box::new(Expr::Neg(Box::new(nb(2)))), Box::new(nb(2)))
        );
        // 2^-3 = 2^(-3)
        assert_eq!(
            analyse("2^-3").unwrap(),
            Expr::Pow(Box::new(nb(2)), Box::new(Expr::Neg(Box::new(nb(3)))))
        );
    }

    #[test]
    fn moins_unaire_devant_fonction() {
        assert_eq!(
            analyse("-sin(3)").unwrap(),
            Expr::Neg(Box::new(Expr::Appel(Fonction::Sin, Box::new(nb(3)))))
        );
    }

    #[test]
    fn soustraction_binaire_reste_binaire() {
        assert_eq!(
            analyse("3-2").unwrap(),
            Expr::Sub(Box::new(nb(3)), Box::new(nb(2)))
        );
        // 3--2 = 3-(-2)
        assert_eq!(
            analyse("3--2").unwrap(),
            Expr::Sub(Box::new(nb(3)), Box::new(Expr::Neg(Box::new(nb(2)))))
        );
    }

    #[test]
    fn erreurs_de_syntaxe() {
        syntaxe_refusee("2+*3");
        syntaxe_refusee("(2+3");
        syntaxe_refusee(")2(");
        syntaxe_refusee("()");
        syntaxe_refusee("sin()");
        syntaxe_refusee("2+");
        syntaxe_refusee("foo(2)");
        syntaxe_refusee("x+1"); // pas de variable admise côté moteur
    }

    #[test]
    fn variable_admise_pour_l_echantillonneur() {
        assert_eq!(
            analyse_avec_variable("x+1", Some("x")).unwrap(),
            Expr::Add(Box::new(Expr::Var("x".into())), Box::new(nb(1)))
        );
        // 2x passe par la multiplication implicite
        assert_eq!(
            analyse_avec_variable("2x", Some("x")).unwrap(),
            Expr::Mul(Box::new(nb(2)), Box::new(Expr::Var("x".into())))
        );
        // mais seul le nom admis passe
        assert!(analyse_avec_variable("y+1", Some("x")).is_err());
    }
}
