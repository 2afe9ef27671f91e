// src/noyau/format.rs

use num_rational::BigRational;
use num_traits::One;

/* ------------------------ Affichage EXACT ------------------------ */

/// Forme exacte : "n" si entier, sinon "n/d" (déjà réduit par BigRational).
pub fn format_rat_pretty(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}
