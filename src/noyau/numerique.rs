// src/noyau/numerique.rs
//
// Routines décimales en précision étendue, sans flottants binaires.
// Représentation de travail : entier “scalé” = valeur × 10^digits (BigInt),
// converti en rationnel exact aux frontières. Chaque routine travaille avec
// des chiffres de garde (extra) pour amortir les troncatures, puis les
// retire en sortie.
//
// Contenu :
// - π (Machin) + cache, ln 2 (série atanh) + cache, e (série) + cache
// - √ par Newton entier
// - exp (réduction par moitiés + série), ln (réduction 2^k + série atanh)
// - sin/cos (réduction modulo 2π à garde adaptative + série), tan
// - atan (série + réductions), asin/acos (via atan, cas ±1 exacts)
// - puissance (entière exacte, fractionnaire via exp∘ln), modulo euclidien

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use super::erreur::{ErreurNoyau, Resultat};

/// Chiffres fractionnaires de travail du moteur : bien au-delà des
/// 15 chiffres significatifs exigés, et des 10 décimales affichées.
pub const CHIFFRES_TRAVAIL: usize = 24;

/// Chiffres de garde internes des routines.
const EXTRA: usize = 10;

/// Borne de magnitude des exposants (entiers ou via exp) : garantit qu'une
/// évaluation rend la main vite, même sur des entrées absurdes.
const BORNE_EXPOSANT: i64 = 100_000;

/* ------------------------ Conversions d'échelle ------------------------ */

pub(crate) fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// r -> entier “scalé” = trunc(r × 10^digits)
pub(crate) fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    (r.numer() * pow10(digits)) / r.denom()
}

pub(crate) fn scaled_to_rational(s: BigInt, digits: usize) -> BigRational {
    BigRational::new(s, pow10(digits))
}

/* ------------------------ π (Machin) + cache ------------------------ */

/// arctan(1/q) en entier scalé (troncature) via série :
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_scaled(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut sign_pos = true;

    // q^(2k+1)
    let mut q_pow = q.clone();
    let mut somme = BigInt::zero();

    loop {
        let denom = BigInt::from((2 * k + 1) as i64);
        let d = &q_pow * &denom;

        let terme = scale / &d;
        if terme.is_zero() {
            break;
        }

        if sign_pos {
            somme += &terme;
        } else {
            somme -= &terme;
        }

        // q_pow *= q^2
        q_pow *= &q;
        q_pow *= &q;

        sign_pos = !sign_pos;
        k += 1;
    }

    somme
}

fn pi_scaled_compute(digits: usize) -> BigInt {
    // extra pour amortir les erreurs de troncature
    let extra = EXTRA;
    let scale = pow10(digits + extra);

    // Machin : π = 16·atan(1/5) − 4·atan(1/239)
    let a = arctan_inv_q_scaled(5, &scale);
    let b = arctan_inv_q_scaled(239, &scale);

    let mut pi = BigInt::from(16) * a - BigInt::from(4) * b;

    // retire les digits extra
    pi /= pow10(extra);
    pi
}

static PI_CACHE: OnceLock<Mutex<HashMap<usize, BigInt>>> = OnceLock::new();

pub(crate) fn pi_scaled_cached(digits: usize) -> BigInt {
    let m = PI_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = m.lock().expect("mutex π");

    if let Some(v) = guard.get(&digits) {
        return v.clone();
    }

    let v = pi_scaled_compute(digits);
    guard.insert(digits, v.clone());
    v
}

pub fn pi_rationnel(digits: usize) -> BigRational {
    scaled_to_rational(pi_scaled_cached(digits), digits)
}

/* ------------------------ ln 2 (série atanh) + cache ------------------------ */

/// argtanh(1/q) en entier scalé via série :
/// atanh(z) = z + z^3/3 + z^5/5 + ...
fn argtanh_inv_q_scaled(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut q_pow = q.clone();
    let mut somme = BigInt::zero();

    loop {
        let denom = BigInt::from((2 * k + 1) as i64);
        let d = &q_pow * &denom;

        let terme = scale / &d;
        if terme.is_zero() {
            break;
        }

        somme += &terme;

        q_pow *= &q;
        q_pow *= &q;
        k += 1;
    }

    somme
}

fn ln2_scaled_compute(digits: usize) -> BigInt {
    let extra = EXTRA;
    let scale = pow10(digits + extra);

    // ln 2 = 2·atanh(1/3)
    let v = BigInt::from(2) * argtanh_inv_q_scaled(3, &scale);
    v / pow10(extra)
}

static LN2_CACHE: OnceLock<Mutex<HashMap<usize, BigInt>>> = OnceLock::new();

fn ln2_scaled_cached(digits: usize) -> BigInt {
    let m = LN2_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = m.lock().expect("mutex ln2");

    if let Some(v) = guard.get(&digits) {
        return v.clone();
    }

    let v = ln2_scaled_compute(digits);
    guard.insert(digits, v.clone());
    v
}

/* ------------------------ e (série des inverses de factorielles) + cache ------------------------ */

fn e_scaled_compute(digits: usize) -> BigInt {
    let extra = EXTRA;
    let scale = pow10(digits + extra);

    // e = Σ 1/n!
    let mut somme = BigInt::zero();
    let mut terme = scale.clone();
    let mut n: u64 = 0;
    while !terme.is_zero() {
        somme += &terme;
        n += 1;
        terme /= BigInt::from(n);
    }

    somme / pow10(extra)
}

static E_CACHE: OnceLock<Mutex<HashMap<usize, BigInt>>> = OnceLock::new();

fn e_scaled_cached(digits: usize) -> BigInt {
    let m = E_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = m.lock().expect("mutex e");

    if let Some(v) = guard.get(&digits) {
        return v.clone();
    }

    let v = e_scaled_compute(digits);
    guard.insert(digits, v.clone());
    v
}

pub fn e_rationnel(digits: usize) -> BigRational {
    scaled_to_rational(e_scaled_cached(digits), digits)
}

/* ------------------------ √ (Newton entier) ------------------------ */

pub fn sqrt_rationnel(r: &BigRational, digits: usize) -> Resultat<BigRational> {
    if r.is_negative() {
        return Err(ErreurNoyau::evaluation("square root of a negative number"));
    }
    Ok(scaled_to_rational(rational_sqrt_scaled(r, digits), digits))
}

/// sqrt(r) en entier scalé : floor( sqrt(r) × 10^digits ), r = n/d ≥ 0.
fn rational_sqrt_scaled(r: &BigRational, digits: usize) -> BigInt {
    let n = r.numer().clone();
    let d = r.denom().clone();

    if n.is_zero() {
        return BigInt::zero();
    }

    // On veut y ≈ sqrt(n/d) × 10^digits
    // => y² ≈ (n × 10^(2·digits)) / d
    let scale2 = pow10(2 * digits);
    let cible = n * scale2;

    // point de départ
    let mut y = pow10(digits);
    if y.is_zero() {
        y = BigInt::one();
    }

    // Newton sur y pour sqrt(cible/d)
    loop {
        let denom = &d * &y;
        if denom.is_zero() {
            break;
        }

        let q = &cible / denom;
        let y_next = (&y + q) >> 1;

        if y_next == y || y_next == (&y - 1u32) {
            // ajustement final (floor)
            let mut y_adj = y_next;

            while (&y_adj + 1u32) * (&y_adj + 1u32) * &d <= cible {
                y_adj += 1u32;
            }
            while &y_adj * &y_adj * &d > cible {
                y_adj -= 1u32;
            }
            return y_adj;
        }

        y = y_next;
    }

    y
}

/* ------------------------ exp ------------------------ */

pub fn exp_rationnel(x: &BigRational, digits: usize) -> Resultat<BigRational> {
    if x.abs() > BigRational::from_integer(BigInt::from(BORNE_EXPOSANT)) {
        return Err(ErreurNoyau::evaluation("exponent magnitude too large"));
    }

    let extra = EXTRA;
    let dt = digits + extra;
    let scale = pow10(dt);

    let mut v = rational_scaled(x, dt);

    // réduction : e^x = (e^(x/2^m))^(2^m), avec |x/2^m| < 1
    let mut m: u32 = 0;
    while v.abs() >= scale {
        v >>= 1;
        m += 1;
    }

    // série e^v = Σ v^n / n!
    let mut somme = BigInt::zero();
    let mut terme = scale.clone();
    let mut n: u64 = 0;
    while !terme.is_zero() {
        somme += &terme;
        n += 1;
        terme = (&terme * &v) / &scale / BigInt::from(n);
    }

    // défait la réduction par élévations au carré
    for _ in 0..m {
        somme = (&somme * &somme) / &scale;
    }

    Ok(scaled_to_rational(somme / pow10(extra), digits))
}

/* ------------------------ ln ------------------------ */

pub fn ln_rationnel(x: &BigRational, digits: usize) -> Resultat<BigRational> {
    if !x.is_positive() {
        return Err(ErreurNoyau::evaluation(
            "logarithm of a non-positive number",
        ));
    }

    let dt = digits + EXTRA;
    let scale = pow10(dt);

    // ln(n/d) = ln n − ln d, n et d entiers ≥ 1
    let ln_num = ln_entier_scaled(x.numer(), &scale, dt);
    let ln_den = ln_entier_scaled(x.denom(), &scale, dt);

    Ok(scaled_to_rational((ln_num - ln_den) / pow10(EXTRA), digits))
}

/// ln(n) pour un entier n ≥ 1, en échelle : réduction n = 2^k·m avec
/// m ∈ [1, 2), puis ln(m) = 2·atanh((m−1)/(m+1)) (|z| ≤ 1/3).
fn ln_entier_scaled(n: &BigInt, scale: &BigInt, dt: usize) -> BigInt {
    let mut v = n * scale;
    let mut k: i64 = 0;

    // réduction grossière par décalage binaire (n peut être énorme)
    let bits_scale = scale.bits();
    if v.bits() > bits_scale + 1 {
        let shift = (v.bits() - bits_scale - 1) as usize;
        v >>= shift;
        k += shift as i64;
    }
    // ajustement fin dans [scale, 2·scale)
    let deux_scale = scale + scale;
    while v >= deux_scale {
        v >>= 1;
        k += 1;
    }
    while v < *scale {
        v <<= 1;
        k -= 1;
    }

    // z = (m−1)/(m+1) en échelle
    let zs = ((&v - scale) * scale) / (&v + scale);
    let zz = (&zs * &zs) / scale;

    let mut somme = zs.clone();
    let mut p = zs;
    let mut j: u64 = 1;
    loop {
        p = (&p * &zz) / scale;
        let terme = &p / BigInt::from(2 * j + 1);
        if terme.is_zero() {
            break;
        }
        somme += terme;
        j += 1;
    }

    BigInt::from(2) * somme + BigInt::from(k) * ln2_scaled_cached(dt)
}

/* ------------------------ sin / cos / tan ------------------------ */

/// La réduction modulo 2π coûte autant de chiffres de garde que l'argument
/// a de chiffres entiers : au-delà de cette borne on refuse net.
const CHIFFRES_ENTIERS_TRIG_MAX: usize = 100;

fn chiffres_entiers(x: &BigRational) -> usize {
    x.to_integer().abs().to_string().len()
}

fn verifie_amplitude_trig(x: &BigRational) -> Resultat<()> {
    if chiffres_entiers(x) > CHIFFRES_ENTIERS_TRIG_MAX {
        return Err(ErreurNoyau::evaluation("trigonometric argument too large"));
    }
    Ok(())
}

pub fn sin_rationnel(x: &BigRational, digits: usize) -> Resultat<BigRational> {
    verifie_amplitude_trig(x)?;
    Ok(scaled_to_rational(sin_cos_scaled(x, digits, false), digits))
}

pub fn cos_rationnel(x: &BigRational, digits: usize) -> Resultat<BigRational> {
    verifie_amplitude_trig(x)?;
    Ok(scaled_to_rational(sin_cos_scaled(x, digits, true), digits))
}

pub fn tan_rationnel(x: &BigRational, digits: usize) -> Resultat<BigRational> {
    verifie_amplitude_trig(x)?;
    let s = sin_cos_scaled(x, digits, false);
    let c = sin_cos_scaled(x, digits, true);
    if c.is_zero() {
        // le cosinus s'annule à la précision de travail : asymptote
        return Err(ErreurNoyau::evaluation("tangent undefined at this angle"));
    }
    Ok(BigRational::new(s, c))
}

/// sin ou cos en entier scalé. Garde adaptative : la réduction modulo 2π
/// perd autant de chiffres que l'argument a de chiffres entiers.
fn sin_cos_scaled(x: &BigRational, digits: usize, cosinus: bool) -> BigInt {
    let extra = EXTRA + chiffres_entiers(x);
    let dt = digits + extra;
    let scale = pow10(dt);

    let pi_s = pi_scaled_cached(dt);
    let tau = &pi_s + &pi_s;

    // réduction dans (−π, π]
    let mut r = rational_scaled(x, dt) % &tau;
    if r.is_negative() {
        r += &tau;
    }
    if r > pi_s {
        r -= &tau;
    }

    let rr = (&r * &r) / &scale;

    // sin : x − x³/3! + x⁵/5! − …   cos : 1 − x²/2! + x⁴/4! − …
    let mut terme = if cosinus { scale.clone() } else { r };
    let mut somme = terme.clone();
    let mut n: u64 = 0;
    loop {
        n += 1;
        let diviseur = if cosinus {
            (2 * n - 1) * (2 * n)
        } else {
            (2 * n) * (2 * n + 1)
        };
        terme = -((&terme * &rr) / &scale / BigInt::from(diviseur));
        if terme.is_zero() {
            break;
        }
        somme += &terme;
    }

    // |sin| ≤ 1 et |cos| ≤ 1 : la série tronquée peut déborder d'un ulp,
    // ce qui ferait sortir asin(sin(x)) du domaine
    let somme = somme.clamp(-scale.clone(), scale.clone());

    somme / pow10(extra)
}

/* ------------------------ atan / asin / acos ------------------------ */

pub fn atan_rationnel(x: &BigRational, digits: usize) -> BigRational {
    let dt = digits + EXTRA;
    scaled_to_rational(atan_scaled(x, dt) / pow10(EXTRA), digits)
}

/// atan en échelle, par réductions successives vers la série |v| ≤ 1/2.
fn atan_scaled(x: &BigRational, dt: usize) -> BigInt {
    let scale = pow10(dt);

    if x.is_negative() {
        return -atan_scaled(&-x.clone(), dt);
    }

    let un = BigRational::one();
    if *x > un {
        // atan(x) = π/2 − atan(1/x)
        let inv = un / x;
        return pi_scaled_cached(dt) / BigInt::from(2) - atan_scaled(&inv, dt);
    }

    let demi = BigRational::new(BigInt::one(), BigInt::from(2));
    if *x > demi {
        // atan(x) = π/4 + atan((x−1)/(x+1)) ; x=1 tombe exactement sur π/4
        let z = (x - &un) / (x + &un);
        return pi_scaled_cached(dt) / BigInt::from(4) + atan_scaled(&z, dt);
    }

    atan_series_scaled(&rational_scaled(x, dt), &scale)
}

/// atan(v) = v − v³/3 + v⁵/5 − … (appelé avec v ≥ 0, |v| ≤ scale/2).
fn atan_series_scaled(v: &BigInt, scale: &BigInt) -> BigInt {
    let vv = (v * v) / scale;

    let mut somme = v.clone();
    let mut p = v.clone();
    let mut j: u64 = 1;
    loop {
        p = (&p * &vv) / scale;
        let terme = &p / BigInt::from(2 * j + 1);
        if terme.is_zero() {
            break;
        }
        if j % 2 == 1 {
            somme -= terme;
        } else {
            somme += terme;
        }
        j += 1;
    }
    somme
}

pub fn asin_rationnel(x: &BigRational, digits: usize) -> Resultat<BigRational> {
    let un = BigRational::one();
    if x.abs() > un {
        return Err(ErreurNoyau::evaluation("asin argument outside [-1, 1]"));
    }

    let demi_pi = pi_rationnel(digits) / BigRational::from_integer(BigInt::from(2));
    if x.abs() == un {
        // ±1 : exactement ±π/2 (le rationnel π se simplifie ensuite sans reste)
        return Ok(if x.is_negative() { -demi_pi } else { demi_pi });
    }

    // asin(x) = atan(x / √(1−x²))
    let dt = digits + EXTRA;
    let t = &un - &(x * x);
    let racine = rational_sqrt_scaled(&t, dt);
    if racine.is_zero() {
        // 1−x² s'évanouit à cette précision : on est sur le bord
        return Ok(if x.is_negative() { -demi_pi } else { demi_pi });
    }

    let argument = x / scaled_to_rational(racine, dt);
    Ok(atan_rationnel(&argument, digits))
}

pub fn acos_rationnel(x: &BigRational, digits: usize) -> Resultat<BigRational> {
    if x.abs() > BigRational::one() {
        return Err(ErreurNoyau::evaluation("acos argument outside [-1, 1]"));
    }
    // acos(x) = π/2 − asin(x)
    let demi_pi = pi_rationnel(digits) / BigRational::from_integer(BigInt::from(2));
    Ok(demi_pi - asin_rationnel(x, digits)?)
}

/* ------------------------ puissance / modulo ------------------------ */

pub fn puissance(a: &BigRational, b: &BigRational, digits: usize) -> Resultat<BigRational> {
    // exposant entier : puissance rationnelle exacte
    if b.denom().is_one() {
        let n = b.numer();
        if n.abs() > BigInt::from(BORNE_EXPOSANT) {
            return Err(ErreurNoyau::evaluation("exponent magnitude too large"));
        }
        let n = n
            .to_i64()
            .ok_or_else(|| ErreurNoyau::evaluation("exponent magnitude too large"))?;

        if a.is_zero() {
            return match n {
                0 => Ok(BigRational::one()),
                n if n < 0 => Err(ErreurNoyau::DivisionParZero),
                _ => Ok(BigRational::zero()),
            };
        }
        return Ok(rational_pow_int(a.clone(), n));
    }

    // exposant non entier : a^b = e^(b·ln a)
    if a.is_zero() {
        if b.is_negative() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        return Ok(BigRational::zero());
    }
    if a.is_negative() {
        return Err(ErreurNoyau::evaluation(
            "fractional power of a negative number",
        ));
    }

    let ln_a = ln_rationnel(a, digits)?;
    exp_rationnel(&(b * &ln_a), digits)
}

fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base.clone(), -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/// a mod b = a − b·⌊a/b⌋ (convention euclidienne : le reste a le signe du
/// diviseur), exact sur les rationnels.
pub fn modulo(a: &BigRational, b: &BigRational) -> Resultat<BigRational> {
    if b.is_zero() {
        return Err(ErreurNoyau::DivisionParZero);
    }
    let q = (a / b).floor();
    Ok(a - &(b * &q))
}
