//! Propriétés de bout en bout (campagne) : le moteur vu de l'extérieur.
//!
//! But : verrouiller le contrat observable — chaînes d'entrée → chaînes de
//! sortie — sans rien savoir des représentations internes.
//! - entrée vide, erreurs, formatage
//! - tolérance de syntaxe calculatrice (mult implicite, ^, alias ln)
//! - sémantique DEG/RAD, y compris la bascule sans effet mémoire

use super::mode::Mode;
use super::moteur::Moteur;

fn eval_rad(s: &str) -> String {
    Moteur::new().evalue(s)
}

fn eval_deg(s: &str) -> String {
    let mut moteur = Moteur::new();
    moteur.regle_mode(Mode::Deg);
    moteur.evalue(s)
}

fn assert_erreur(s: &str, attendu: &str, mode: Mode) {
    let mut moteur = Moteur::new();
    moteur.regle_mode(mode);
    assert_eq!(moteur.evalue(s), attendu, "entrée={s:?}");
}

/* ------------------------ Entrée vide & erreurs ------------------------ */

#[test]
fn prop_entree_vide() {
    assert_eq!(eval_rad(""), "");
    assert_eq!(eval_rad("   "), "");
}

#[test]
fn prop_erreurs_canoniques() {
    assert_erreur("1/0", "Error: Division by zero", Mode::Rad);
    assert_erreur("2+*3", "Error: Invalid syntax", Mode::Rad);
    assert_erreur("(2+3", "Error: Invalid syntax", Mode::Rad);
    assert_erreur("foo(2)", "Error: Invalid syntax", Mode::Rad);
    assert_erreur("2 $ 3", "Error: Invalid syntax", Mode::Rad);
}

#[test]
fn prop_domaines_invalides_en_clair() {
    // décision explicite (et non un accident de typage) : message de domaine
    assert_erreur(
        "sqrt(0-1)",
        "Error: square root of a negative number",
        Mode::Rad,
    );
    assert_erreur("asin(2)", "Error: asin argument outside [-1, 1]", Mode::Rad);
    assert_erreur(
        "log(0)",
        "Error: logarithm of a non-positive number",
        Mode::Rad,
    );
    assert_erreur("5%0", "Error: Division by zero", Mode::Rad);
}

/* ------------------------ Arithmétique & formatage ------------------------ */

#[test]
fn prop_arithmetique() {
    assert_eq!(eval_rad("2+2"), "4");
    assert_eq!(eval_rad("3(4+5)"), "27");
    assert_eq!(eval_rad("2^3^2"), "512");
    assert_eq!(eval_rad("10%3"), "1");
    assert_eq!(eval_rad("-7%3"), "2");
    assert_eq!(eval_rad("0.1+0.2"), "0.3");
    assert_eq!(eval_rad("2^-3"), "0.125");
    assert_eq!(eval_rad("-2^2"), "4");
}

#[test]
fn prop_entiers_sans_point() {
    assert_eq!(eval_rad("8/2"), "4");
    assert_eq!(eval_rad("(1/3)*3"), "1");
    assert_eq!(eval_rad("100/4"), "25");
}

#[test]
fn prop_decimales_bornees_sans_zeros() {
    let r = eval_rad("1/3");
    assert_eq!(r, "0.3333333333");
    assert_eq!(eval_rad("2/3"), "0.6666666667");
    assert_eq!(eval_rad("1/8"), "0.125");
    assert_eq!(eval_rad("2^-10"), "0.0009765625");
}

#[test]
fn prop_jamais_de_scientifique() {
    assert_eq!(eval_rad("10^20"), "100000000000000000000");
    assert_eq!(eval_rad("10^-9"), "0.000000001");
}

/* ------------------------ Tolérance de syntaxe ------------------------ */

#[test]
fn prop_mult_implicite() {
    assert_eq!(eval_deg("2sin(30)"), "1");
    assert_eq!(eval_rad("(2)(3)"), "6");
    // 2pi ≈ 6.283185307179586476…, juste à au moins 10 chiffres significatifs
    assert_eq!(eval_rad("2pi"), "6.2831853072");
    assert_eq!(eval_deg("2pi"), "6.2831853072"); // le mode n'y touche pas
}

#[test]
fn prop_alias_et_constantes() {
    assert_eq!(eval_rad("ln(e)"), "1");
    assert_eq!(eval_rad("log(exp(2))"), "2");
    assert_eq!(eval_rad("exp(1)"), "2.7182818285");
    assert_eq!(eval_rad("pi"), "3.1415926536");
    assert_eq!(eval_rad("abs(0-5)"), "5");
    assert_eq!(eval_rad("sqrt(2)"), "1.4142135624");
}

/* ------------------------ Sémantique DEG / RAD ------------------------ */

#[test]
fn prop_trig_en_degres() {
    assert_eq!(eval_deg("sin(90)"), "1");
    assert_eq!(eval_deg("cos(60)"), "0.5");
    assert_eq!(eval_deg("tan(45)"), "1");
    assert_eq!(eval_deg("sin(30)+cos(60)"), "1");
}

#[test]
fn prop_reciproques_en_degres() {
    assert_eq!(eval_deg("asin(1)"), "90");
    assert_eq!(eval_deg("acos(0)"), "90");
    assert_eq!(eval_deg("acos(0-1)"), "180");
    assert_eq!(eval_deg("atan(1)"), "45");
}

#[test]
fn prop_trig_en_radians() {
    assert_eq!(eval_rad("sin(pi/2)"), "1");
    assert_eq!(eval_rad("sin(pi)"), "0");
    assert_eq!(eval_rad("cos(0)"), "1");
    assert_eq!(eval_rad("asin(1)"), "1.5707963268");
}

#[test]
fn prop_composition_trig_en_degres() {
    // la conversion s'applique à chaque appel, même imbriqué
    assert_eq!(eval_deg("asin(cos(60))"), "30");
    assert_eq!(eval_deg("sin(cos(0))"), eval_deg("sin(1)"));
}

#[test]
fn prop_asymptote_tangente() {
    let r = eval_deg("tan(90)");
    assert!(r.starts_with("Error:"), "attendu une erreur, obtenu {r:?}");
}

#[test]
fn prop_bascule_de_mode_sans_memoire() {
    let mut moteur = Moteur::new();

    assert_eq!(moteur.evalue("sin(pi/2)"), "1");

    moteur.regle_mode(Mode::Deg);
    assert_eq!(moteur.evalue("sin(90)"), "1");
    // sin(90 rad) ≠ 1 : la même chaîne suit le nouveau mode, sans mélange
    moteur.regle_mode(Mode::Rad);
    assert_eq!(moteur.evalue("sin(90)"), "0.8939966636");

    // et retour
    moteur.regle_mode(Mode::Deg);
    assert_eq!(moteur.evalue("sin(90)"), "1");
}

#[test]
fn prop_resultats_stables_d_un_appel_a_l_autre() {
    let moteur = Moteur::new();
    let a = moteur.evalue("sqrt(2)+sin(1)");
    let b = moteur.evalue("sqrt(2)+sin(1)");
    assert_eq!(a, b);
}
