// src/noyau/format.rs
//
// Règles d'affichage du résultat numérique :
// - arrondi à 10 décimales (demi vers l'infini)
// - valeur entière après arrondi => entier nu, sans point
// - sinon virgule fixe, zéros de queue retirés, point final retiré
// - JAMAIS de notation scientifique, quelle que soit la magnitude :
//   lisibilité calculatrice avant compacité, quitte à sortir très long
// - le zéro n'est jamais signé

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::numerique::pow10;

/// Décimales maximales affichées.
pub const DECIMALES_AFFICHEES: usize = 10;

pub fn formate_resultat(r: &BigRational) -> String {
    let prec = pow10(DECIMALES_AFFICHEES);

    let negatif = r.is_negative();
    let abs = r.abs();

    // arrondi demi vers l'infini : ⌊|r|·10^10 + 1/2⌋
    let n = (abs.numer() * &prec * 2u32 + abs.denom()) / (abs.denom() * 2u32);

    if n.is_zero() {
        return "0".to_string();
    }

    let entiere = &n / &prec;
    let fraction = &n % &prec;
    let signe = if negatif { "-" } else { "" };

    if fraction.is_zero() {
        return format!("{signe}{entiere}");
    }

    let mut frac = fraction.to_str_radix(10);
    while frac.len() < DECIMALES_AFFICHEES {
        frac.insert(0, '0');
    }
    let frac = frac.trim_end_matches('0');

    format!("{signe}{entiere}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rationnel(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn entiers_nus() {
        assert_eq!(formate_resultat(&rationnel(4, 1)), "4");
        assert_eq!(formate_resultat(&rationnel(-12, 1)), "-12");
        assert_eq!(formate_resultat(&rationnel(100, 4)), "25");
    }

    #[test]
    fn zero_jamais_signe() {
        assert_eq!(formate_resultat(&rationnel(0, 1)), "0");
        assert_eq!(formate_resultat(&rationnel(-1, 1_000_000_000_000)), "0");
    }

    #[test]
    fn decimales_tronquees_a_dix_sans_zeros_de_queue() {
        assert_eq!(formate_resultat(&rationnel(1, 3)), "0.3333333333");
        assert_eq!(formate_resultat(&rationnel(2, 3)), "0.6666666667");
        assert_eq!(formate_resultat(&rationnel(-1, 2)), "-0.5");
        assert_eq!(formate_resultat(&rationnel(1, 1024)), "0.0009765625");
    }

    #[test]
    fn entier_a_la_precision_pres() {
        // 1 − 10^-24 s'affiche 1 : entier « exact à la précision de travail »
        let presque_un = BigRational::new(pow10(24) - BigInt::from(1), pow10(24));
        assert_eq!(formate_resultat(&presque_un), "1");

        // 1 + 10^-12 aussi : sous la résolution d'affichage
        let un_et_poussiere = BigRational::new(pow10(12) + BigInt::from(1), pow10(12));
        assert_eq!(formate_resultat(&un_et_poussiere), "1");
    }

    #[test]
    fn arrondi_demi_vers_l_infini() {
        // 0.00000000005 → 0.0000000001 (11e décimale = 5)
        assert_eq!(
            formate_resultat(&BigRational::new(BigInt::from(5), pow10(11))),
            "0.0000000001"
        );
        assert_eq!(
            formate_resultat(&BigRational::new(BigInt::from(-5), pow10(11))),
            "-0.0000000001"
        );
    }

    #[test]
    fn jamais_de_notation_scientifique() {
        let grand = BigRational::from_integer(pow10(20));
        assert_eq!(formate_resultat(&grand), "100000000000000000000");

        let petit = BigRational::new(BigInt::from(1), pow10(9));
        assert_eq!(formate_resultat(&petit), "0.000000001");

        // sous la 10e décimale, l'affichage rend 0
        let trop_petit = BigRational::new(BigInt::from(1), pow10(12));
        assert_eq!(formate_resultat(&trop_petit), "0");
    }
}
