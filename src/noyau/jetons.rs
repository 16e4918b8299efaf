// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::erreur::{ErreurNoyau, Resultat};
use super::symboles::constante_depuis_nom;

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre(BigRational),

    // Fonctions + constantes + variables (tout ce qui n'est pas nombre /
    // opérateur / parenthèse). Le parse (RPN->Expr) tranche via la table
    // de symboles.
    Ident(String),

    Plus,
    Moins,
    Etoile,
    Barre,
    Pourcent,
    Caret, // ^

    // Produit par to_rpn quand un '-' arrive en position préfixe.
    // La tokenisation ne l'émet jamais.
    MoinsUnaire,

    ParG,
    ParD,
}

/// Prétraitement textuel, avant tokenisation (l'ordre compte) :
/// 1) le glyphe de puissance `^` est déjà l'opérateur canonique de la
///    grammaire, rien à réécrire ;
/// 2) « ln( » devient « log( » : ln et log partagent le même noyau
///    népérien, distingués par le nom au moment du parse seulement.
pub fn pretraite(s: &str) -> String {
    s.replace("ln(", "log(")
}

/// Tokenize une chaîne en jetons.
/// Supporte :
/// - entiers et littéraux décimaux exacts (ex : 12, 12.5, .5)
/// - opérateurs + - * / % ^
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - π (équivaut à ident("pi")), √ (équivaut à ident("sqrt"))
pub fn decoupe(s: &str) -> Resultat<Vec<Jeton>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Jeton::ParG);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::ParD);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' => {
                out.push(Jeton::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Jeton::Moins);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Jeton::Etoile);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Jeton::Barre);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Jeton::Pourcent);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Jeton::Caret);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Glyphes calculatrice : π et √ passent par la table de symboles
        if c == 'π' {
            out.push(Jeton::Ident("pi".to_string()));
            i += 1;
            continue;
        }
        if c == '√' {
            out.push(Jeton::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            out.push(Jeton::Ident(mot.to_lowercase()));
            continue;
        }

        // Nombre : entier ou littéral décimal (12, 12.5, .5)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || (chars[i] == '.' && !point)) {
                if chars[i] == '.' {
                    point = true;
                }
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            if texte == "." {
                return Err(ErreurNoyau::syntaxe("point décimal isolé"));
            }

            let (ent, frac) = match texte.split_once('.') {
                Some((a, b)) => (a, b),
                None => (texte.as_str(), ""),
            };
            let mantisse = format!("{ent}{frac}");
            let n = BigInt::parse_bytes(mantisse.as_bytes(), 10)
                .ok_or_else(|| ErreurNoyau::syntaxe(format!("nombre invalide: '{texte}'")))?;

            let denom = if frac.is_empty() {
                BigInt::one()
            } else {
                BigInt::from(10).pow(frac.len() as u32)
            };
            out.push(Jeton::Nombre(BigRational::new(n, denom)));
            continue;
        }

        return Err(ErreurNoyau::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/* ------------------------ Multiplication implicite ------------------------ */

/// Fin de valeur : un jeton derrière lequel une juxtaposition forme un
/// produit. Les identifiants de fonction n'en font pas partie (sin(30)
/// n'est pas sin*(30)), seules les constantes nommées comptent.
fn fin_de_valeur(j: &Jeton) -> bool {
    match j {
        Jeton::Nombre(_) | Jeton::ParD => true,
        Jeton::Ident(nom) => constante_depuis_nom(nom).is_some(),
        _ => false,
    }
}

fn debut_de_produit(j: &Jeton) -> bool {
    matches!(j, Jeton::Nombre(_) | Jeton::Ident(_) | Jeton::ParG)
}

/// Insère un `*` entre deux jetons adjacents A, B quand aucun opérateur ne
/// les sépare et que la juxtaposition est un produit algébrique valide :
/// A ∈ {nombre, ')', constante} et B ∈ {nombre, identifiant, '('}.
/// C'est ce qui fait lire 2sin(30), 2pi ou 3(4+5) comme des produits.
pub fn insere_mult_implicite(jetons: Vec<Jeton>) -> Vec<Jeton> {
    let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());

    for jeton in jetons {
        if let Some(precedent) = out.last() {
            if fin_de_valeur(precedent) && debut_de_produit(&jeton) {
                out.push(Jeton::Etoile);
            }
        }
        out.push(jeton);
    }

    out
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for j in jetons {
        let s = match j {
            Jeton::Nombre(r) => format_rat(r),
            Jeton::Ident(nom) => nom.clone(),

            Jeton::Plus => "+".to_string(),
            Jeton::Moins => "-".to_string(),
            Jeton::Etoile => "*".to_string(),
            Jeton::Barre => "/".to_string(),
            Jeton::Pourcent => "%".to_string(),
            Jeton::Caret => "^".to_string(),
            Jeton::MoinsUnaire => "-u".to_string(),

            Jeton::ParG => "(".to_string(),
            Jeton::ParD => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn jetons(s: &str) -> Vec<Jeton> {
        insere_mult_implicite(decoupe(&pretraite(s)).unwrap())
    }

    #[test]
    fn pretraitement_ln() {
        assert_eq!(pretraite("ln(5)+ln(2)"), "log(5)+log(2)");
        // « ln » sans parenthèse n'est pas réécrit (la table le connaît aussi)
        assert_eq!(pretraite("ln"), "ln");
    }

    #[test]
    fn decimaux_exacts() {
        let js = decoupe("12.5 + .5").unwrap();
        assert_eq!(
            js,
            vec![
                Jeton::Nombre(BigRational::new(BigInt::from(125), BigInt::from(10))),
                Jeton::Plus,
                Jeton::Nombre(BigRational::new(BigInt::from(5), BigInt::from(10))),
            ]
        );
    }

    #[test]
    fn point_isole_refuse() {
        assert!(decoupe("2 + .").is_err());
        assert!(decoupe("2 @ 3").is_err());
    }

    #[test]
    fn glyphes_calculatrice() {
        assert_eq!(
            decoupe("√π").unwrap(),
            vec![
                Jeton::Ident("sqrt".into()),
                Jeton::Ident("pi".into()),
            ]
        );
    }

    #[test]
    fn mult_implicite_nombre_fonction() {
        // 2sin(30) => 2 * sin ( 30 )
        assert_eq!(format_jetons(&jetons("2sin(30)")), "2 * sin ( 30 )");
    }

    #[test]
    fn mult_implicite_nombre_parenthese() {
        assert_eq!(format_jetons(&jetons("3(4+5)")), "3 * ( 4 + 5 )");
        assert_eq!(format_jetons(&jetons("(2)(3)")), "( 2 ) * ( 3 )");
        assert_eq!(format_jetons(&jetons("(2)3")), "( 2 ) * 3");
    }

    #[test]
    fn mult_implicite_constantes() {
        assert_eq!(format_jetons(&jetons("2pi")), "2 * pi");
        assert_eq!(format_jetons(&jetons("pi(3)")), "pi * ( 3 )");
        assert_eq!(format_jetons(&jetons("2e")), "2 * e");
    }

    #[test]
    fn pas_de_mult_apres_fonction() {
        // sin n'est pas une fin de valeur : sin(30) reste un appel
        assert_eq!(format_jetons(&jetons("sin(30)")), "sin ( 30 )");
    }

    #[test]
    fn pas_de_mult_autour_des_operateurs() {
        assert_eq!(format_jetons(&jetons("2+3")), "2 + 3");
        assert_eq!(format_jetons(&jetons("2^3")), "2 ^ 3");
    }
}
