// src/noyau/lecture.rs
//
// Lecture décimale d'un rationnel exact (affichage seulement, jamais réinjectée
// dans le calcul) : arrondi à `digits` décimales puis nettoyage "0.3000" -> "0.3".

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::config::DECIMALES_DEFAUT;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits, positif) en texte décimal.
pub fn scaled_to_decimal(scaled: &BigInt, neg: bool, digits: usize) -> String {
    let scale = pow10(digits);
    let int_part = scaled / &scale;
    let frac_part = scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// |r| -> entier “scalé” = round(|r| * 10^digits), demi vers l'infini.
fn rational_scaled_arrondi(r: &BigRational, digits: usize) -> BigInt {
    let n = r.numer().abs() * pow10(digits);
    let d = r.denom();

    let q = &n / d;
    let reste = &n % d;
    if reste * 2 >= *d {
        q + 1
    } else {
        q
    }
}

/// Retire les zéros de fin puis le point final : "9.0000" -> "9", "0.3000" -> "0.3".
fn nettoie_zeros(mut s: String) -> String {
    if s.contains('.') {
        let garde = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(garde);
    }
    s
}

/// Décimal arrondi à `digits` chiffres, zéros inutiles retirés.
/// Un résultat arrondi à zéro s'affiche "0" (jamais "-0").
pub fn format_decimal(r: &BigRational, digits: usize) -> String {
    let scaled = rational_scaled_arrondi(r, digits);
    let neg = r.is_negative() && !scaled.is_zero();
    nettoie_zeros(scaled_to_decimal(&scaled, neg, digits))
}

/// Affichage standard du résultat (4 décimales).
pub fn format_resultat(r: &BigRational) -> String {
    format_decimal(r, DECIMALES_DEFAUT)
}
