// src/noyau/arith.rs
//
// Sémantique exacte des opérateurs qui ne sont pas de simples +, -, *.
// Règle commune : les garde-fous (garde.rs) passent AVANT tout calcul big int.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::config::Limites;
use super::erreur::{CalcError, ErrorKind};
use super::garde::{
    chiffres_arrangement, chiffres_combinaison, chiffres_factorielle, chiffres_puissance, depasse,
};

fn trop_grand() -> CalcError {
    CalcError::new(ErrorKind::ResultTooBig, "résultat trop grand")
}

fn infini() -> CalcError {
    CalcError::new(ErrorKind::InfiniteResult, "résultat infini ou indéfini")
}

/// Rationnel -> f64 ; ce qui ne rentre pas compte comme infini.
fn vers_f64(r: &BigRational) -> f64 {
    r.to_f64().unwrap_or(f64::INFINITY)
}

/// Entier -> f64 fini, sinon "trop grand".
fn entier_f64(n: &BigInt) -> Result<f64, CalcError> {
    match n.to_f64() {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(trop_grand()),
    }
}

/* ------------------------ Division ------------------------ */

pub fn division(a: &BigRational, b: &BigRational) -> Result<BigRational, CalcError> {
    if b.is_zero() {
        return Err(CalcError::new(ErrorKind::DivisionByZero, "division par zéro"));
    }
    Ok(a / b)
}

/// a // b = floor((a_num·b_den) / (a_den·b_num)).
pub fn division_entiere(a: &BigRational, b: &BigRational) -> Result<BigRational, CalcError> {
    if b.is_zero() {
        return Err(CalcError::new(
            ErrorKind::DivisionByZero,
            "division entière par zéro",
        ));
    }
    Ok((a / b).floor())
}

/// a % b sur entiers, reste tronqué (signe du dividende).
pub fn modulo(a: &BigRational, b: &BigRational) -> Result<BigRational, CalcError> {
    if !a.is_integer() || !b.is_integer() {
        return Err(CalcError::new(
            ErrorKind::ModuloRequiresInt,
            "le modulo exige des entiers",
        ));
    }
    if b.is_zero() {
        return Err(CalcError::new(ErrorKind::ModByZero, "modulo par zéro"));
    }
    Ok(BigRational::from_integer(a.numer() % b.numer()))
}

/* ------------------------ Puissance ------------------------ */

/// base ^ exp.
///
/// - exposant entier : calcul exact (numérateur et dénominateur), exposant négatif => inverse
/// - exposant non entier, ou opérande infini en f64 : passage par f64::powf puis retour exact
pub fn puissance(
    base: &BigRational,
    exp: &BigRational,
    limites: &Limites,
) -> Result<BigRational, CalcError> {
    let base_f = vers_f64(base);
    let exp_f = vers_f64(exp);

    if !exp.is_integer() || base_f.is_infinite() || exp_f.is_infinite() {
        let r = base_f.powf(exp_f);
        if !r.is_finite() {
            return Err(infini());
        }
        return BigRational::from_float(r).ok_or_else(infini);
    }

    let e = exp.numer();

    // bases triviales : pas de garde-fou (0^n, 1^n, (-1)^n restent petits)
    if base.is_zero() {
        return if e.is_negative() {
            Err(CalcError::new(ErrorKind::DivisionByZero, "division par zéro (0 ^ négatif)"))
        } else if e.is_zero() {
            Ok(BigRational::one())
        } else {
            Ok(BigRational::zero())
        };
    }
    if base.denom().is_one() && base.numer().abs().is_one() {
        let pair = (e % 2u32).is_zero();
        return if base.is_positive() || pair {
            Ok(BigRational::one())
        } else {
            Ok(-BigRational::one())
        };
    }

    if depasse(chiffres_puissance(base, e), limites.chiffres_puissance) {
        return Err(trop_grand());
    }
    let n = e.abs().to_u32().ok_or_else(trop_grand)?;

    // numer/denom déjà premiers entre eux : leurs puissances aussi
    let p = BigRational::new_raw(base.numer().pow(n), base.denom().pow(n));
    if e.is_negative() {
        Ok(p.recip())
    } else {
        Ok(p)
    }
}

/* ------------------------ Factorielle / arrangements / combinaisons ------------------------ */

pub fn factorielle(v: &BigRational, limites: &Limites) -> Result<BigRational, CalcError> {
    if !v.is_integer() {
        return Err(CalcError::new(
            ErrorKind::FactorialRequiresInt,
            "la factorielle exige un entier",
        ));
    }
    let n = v.numer();
    if n.is_negative() {
        return Err(CalcError::new(
            ErrorKind::FactorialNegative,
            "factorielle d'un nombre négatif",
        ));
    }
    if depasse(chiffres_factorielle(entier_f64(n)?), limites.chiffres_combinatoire) {
        return Err(trop_grand());
    }
    let n = n.to_u64().ok_or_else(trop_grand)?;

    let mut acc = BigInt::one();
    for i in 2..=n {
        acc *= i;
    }
    Ok(BigRational::from_integer(acc))
}

/// Vérifie entiers + 0 <= r <= n. Renvoie (n, r).
fn operandes<'a>(
    n: &'a BigRational,
    r: &'a BigRational,
    requis: (ErrorKind, &str),
    invalide: (ErrorKind, &str),
) -> Result<(&'a BigInt, &'a BigInt), CalcError> {
    if !n.is_integer() || !r.is_integer() {
        return Err(CalcError::new(requis.0, requis.1));
    }
    let (n, r) = (n.numer(), r.numer());
    if n.is_negative() || r.is_negative() || r > n {
        return Err(CalcError::new(invalide.0, invalide.1));
    }
    Ok((n, r))
}

/// nPr = n·(n-1)·…·(n-r+1)
pub fn arrangement(
    n: &BigRational,
    r: &BigRational,
    limites: &Limites,
) -> Result<BigRational, CalcError> {
    let (n, r) = operandes(
        n,
        r,
        (ErrorKind::PermutationRequiresInt, "les arrangements exigent des entiers"),
        (ErrorKind::InvalidPermutation, "arrangement invalide (il faut 0 <= r <= n)"),
    )?;

    let estimation = chiffres_arrangement(entier_f64(n)?, entier_f64(r)?);
    if depasse(estimation, limites.chiffres_combinatoire) {
        return Err(trop_grand());
    }
    let r = r.to_u64().ok_or_else(trop_grand)?;

    let mut acc = BigInt::one();
    for i in 0..r {
        acc *= n - i;
    }
    Ok(BigRational::from_integer(acc))
}

/// nCr par la formule multiplicative, avec r = min(r, n-r).
pub fn combinaison(
    n: &BigRational,
    r: &BigRational,
    limites: &Limites,
) -> Result<BigRational, CalcError> {
    let (n, r) = operandes(
        n,
        r,
        (ErrorKind::CombinationRequiresInt, "les combinaisons exigent des entiers"),
        (ErrorKind::InvalidCombination, "combinaison invalide (il faut 0 <= r <= n)"),
    )?;

    let complement = n - r;
    let estimation = chiffres_combinaison(entier_f64(n)?, entier_f64(r)?, entier_f64(&complement)?);
    if depasse(estimation, limites.chiffres_combinatoire) {
        return Err(trop_grand());
    }

    let k = if &complement < r { &complement } else { r };
    let k = k.to_u64().ok_or_else(trop_grand)?;

    // acc reste entier à chaque pas : C(n-k+i, i)
    let base = n - k;
    let mut acc = BigInt::one();
    for i in 1..=k {
        acc *= &base + i;
        acc /= i;
    }
    Ok(BigRational::from_integer(acc))
}
