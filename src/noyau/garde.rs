// src/noyau/garde.rs
//
// Garde-fous numériques : estimation du nombre de chiffres décimaux d'un résultat
// AVANT de le calculer (anti-gel : "99999!" doit être refusé en O(1)).

use std::f64::consts::{LN_10, LOG10_2};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

/// log10(|n|), approximé par le nombre de bits si n dépasse un f64.
pub fn log10_abs(n: &BigInt) -> f64 {
    match n.to_f64() {
        Some(f) if f.is_finite() => f.abs().log10(),
        _ => n.bits() as f64 * LOG10_2,
    }
}

/// Chiffres estimés de base^exp (exposant entier).
///
/// On prend le plus gros des deux côtés (numérateur / dénominateur) et |exp| :
/// pour une base entière et un exposant positif, c'est exactement log10(|base|) * exp.
/// Plus strict que log10(|base|) * exp : `10 ^ -4000` et `0.5 ^ 10000` sont refusés,
/// leur dénominateur aurait des milliers de chiffres.
pub fn chiffres_puissance(base: &BigRational, exp: &BigInt) -> f64 {
    let taille = log10_abs(base.numer()).max(log10_abs(base.denom()));
    let e = exp.abs().to_f64().unwrap_or(f64::INFINITY);
    taille * e
}

fn ln_factorielle(n: f64) -> f64 {
    libm::lgamma(n + 1.0)
}

/// Chiffres estimés de n!.
pub fn chiffres_factorielle(n: f64) -> f64 {
    ln_factorielle(n) / LN_10
}

// 2^53 : au-delà, n - r n'est plus exact en f64 et les différences de lgamma s'annulent
const ENTIER_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Chiffres estimés de nPr = n! / (n-r)!.
///
/// Deux minorants : r * log10(n - r + 1) (chaque facteur vaut au moins n - r + 1)
/// et r! (puisque n >= r). Relevés par la différence de lgamma tant que n est exact en f64.
pub fn chiffres_arrangement(n: f64, r: f64) -> f64 {
    let facteurs = if r > 0.0 { r * (n - r + 1.0).log10() } else { 0.0 };
    let minorant = facteurs.max(chiffres_factorielle(r));
    if n < ENTIER_EXACT_F64 {
        minorant.max((ln_factorielle(n) - ln_factorielle(n - r)) / LN_10)
    } else {
        minorant
    }
}

/// Chiffres estimés de nCr = n! / (r! (n-r)!).
///
/// `complement` vaut n - r, calculé exactement par l'appelant.
/// Minorant k * log10((n - k + 1) / k) avec k = min(r, n - r), même relève que nPr.
pub fn chiffres_combinaison(n: f64, r: f64, complement: f64) -> f64 {
    let k = r.min(complement);
    let minorant = if k > 0.0 { k * ((n - k + 1.0) / k).log10() } else { 0.0 };
    if n < ENTIER_EXACT_F64 {
        minorant.max((ln_factorielle(n) - ln_factorielle(r) - ln_factorielle(complement)) / LN_10)
    } else {
        minorant
    }
}

/// Vrai si l'estimation dépasse la limite. Une estimation NaN / infinie est refusée.
pub fn depasse(estimation: f64, limite: f64) -> bool {
    estimation.is_nan() || estimation > limite
}
