// src/noyau/machine.rs
//
// Machine à pile : exécute une RPN sur une pile de rationnels exacts.
// Une seule passe linéaire ; état final attendu : exactement une valeur.

use std::sync::OnceLock;

use num_rational::BigRational;

use super::arith::{
    arrangement, combinaison, division, division_entiere, factorielle, modulo, puissance,
};
use super::config::Limites;
use super::erreur::{CalcError, ErrorKind};
use super::jetons::{parse_litteral, Tok};

/* ------------------------ Constantes ------------------------ */

const PI_DECIMAL: &str =
    "3.141592653589793238462643383279502884197169399375105820974944592307816406286";
const E_DECIMAL: &str =
    "2.718281828459045235360287471352662497757247093699959574966967627724076630353";

static PI: OnceLock<Result<BigRational, CalcError>> = OnceLock::new();
static E: OnceLock<Result<BigRational, CalcError>> = OnceLock::new();

/// pi / π / e (insensible à la casse), sinon identifiant inconnu.
fn resout_ident(name: &str) -> Result<BigRational, CalcError> {
    let (cache, decimal) = if name.eq_ignore_ascii_case("pi") || name == "π" {
        (&PI, PI_DECIMAL)
    } else if name.eq_ignore_ascii_case("e") {
        (&E, E_DECIMAL)
    } else {
        return Err(CalcError::new(
            ErrorKind::UnknownIdentifier,
            format!("identifiant inconnu: {name}"),
        ));
    };
    cache.get_or_init(|| parse_litteral(decimal, 0)).clone()
}

/* ------------------------ Exécution ------------------------ */

fn pop(pile: &mut Vec<BigRational>) -> Result<BigRational, CalcError> {
    pile.pop()
        .ok_or_else(|| CalcError::new(ErrorKind::StackUnderflow, "pile vide (opérande manquant)"))
}

fn binaire(
    op: &Tok,
    a: BigRational,
    b: BigRational,
    limites: &Limites,
) -> Result<BigRational, CalcError> {
    match op {
        Tok::Plus => Ok(a + b),
        Tok::Minus => Ok(a - b),
        Tok::Star => Ok(a * b),
        Tok::Slash => division(&a, &b),
        Tok::Pow(_) => puissance(&a, &b, limites),
        Tok::FloorDiv => division_entiere(&a, &b),
        Tok::Percent => modulo(&a, &b),
        Tok::Perm(_) => arrangement(&a, &b, limites),
        Tok::Comb(_) => combinaison(&a, &b, limites),
        _ => Err(CalcError::new(
            ErrorKind::UnexpectedToken,
            format!("opérateur binaire inattendu: {op}"),
        )),
    }
}

/// Évalue une RPN et retourne la valeur exacte.
pub fn eval_rpn(rpn: &[Tok], limites: &Limites) -> Result<BigRational, CalcError> {
    let mut pile = Vec::with_capacity(rpn.len());
    eval_rpn_into(rpn.iter().cloned(), &mut pile, limites)
}

/// Variante sans clonage : consomme la RPN, pile fournie (pool).
pub(crate) fn eval_rpn_into<I>(
    rpn: I,
    pile: &mut Vec<BigRational>,
    limites: &Limites,
) -> Result<BigRational, CalcError>
where
    I: IntoIterator<Item = Tok>,
{
    for tok in rpn {
        match tok {
            Tok::Num(r) => pile.push(r),
            Tok::Ident(name) => pile.push(resout_ident(&name)?),

            Tok::Bang => {
                let v = pop(pile)?;
                pile.push(factorielle(&v, limites)?);
            }

            Tok::Plus
            | Tok::Minus
            | Tok::Star
            | Tok::Slash
            | Tok::Pow(_)
            | Tok::FloorDiv
            | Tok::Percent
            | Tok::Perm(_)
            | Tok::Comb(_) => {
                // droite d'abord, puis gauche
                let b = pop(pile)?;
                let a = pop(pile)?;
                pile.push(binaire(&tok, a, b, limites)?);
            }

            Tok::Eof => {}

            Tok::LPar | Tok::RPar | Tok::Signe(_) => {
                return Err(CalcError::new(
                    ErrorKind::UnexpectedToken,
                    format!("jeton inattendu en RPN: {tok}"),
                ))
            }
        }
    }

    if pile.len() != 1 {
        return Err(CalcError::new(
            ErrorKind::InvalidExpression,
            format!("expression invalide, la pile contient {} éléments", pile.len()),
        ));
    }
    pop(pile)
}
