// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok (infixe) en RPN (postfix)
//
// Règles:
// - précédences : + - < * / // % < signe unaire < ^ ** < ! P C
// - ^ / ** : seul opérateur associatif à droite
// - Signe unaire:
//    - si '+' ou '-' arrive quand on n’attend PAS une opération, on injecte 0 : "-x" => "0 x -"
//    - ce signe est empilé sans rien dépiler (opérateur préfixe)
//      (2*-3 => 2 0 3 - *, -2^2 => 0 2 2 ^ -, 2^-1*4 => 2 0 1 - ^ 4 *)

use num_rational::BigRational;
use num_traits::Zero;

use super::erreur::{CalcError, ErrorKind};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 10,
        Tok::Star | Tok::Slash | Tok::FloorDiv | Tok::Percent => 20,
        Tok::Signe(_) => 25,
        Tok::Pow(_) => 30,
        Tok::Bang | Tok::Perm(_) | Tok::Comb(_) => 40,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Pow(_))
}

/// Le signe unaire redevient une soustraction / addition avec le 0 injecté.
fn vers_sortie(op: Tok) -> Tok {
    match op {
        Tok::Signe('-') => Tok::Minus,
        Tok::Signe(_) => Tok::Plus,
        autre => autre,
    }
}

fn parentheses() -> CalcError {
    CalcError::new(ErrorKind::MismatchedParentheses, "parenthèses non appariées")
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(1), Plus, Num(2), Star, Num(3), Eof]
///   rpn:    [Num(1), Num(2), Num(3), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, CalcError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut ops = Vec::new();
    to_rpn_into(tokens.iter().cloned(), &mut out, &mut ops)?;
    Ok(out)
}

/// Variante sans clonage : consomme les jetons, écrit dans `out`,
/// `ops` sert de pile d'opérateurs (tampons fournis par les pools).
pub(crate) fn to_rpn_into<I>(tokens: I, out: &mut Vec<Tok>, ops: &mut Vec<Tok>) -> Result<(), CalcError>
where
    I: IntoIterator<Item = Tok>,
{
    // “valeur” = un atome, une expression fermée, ou un opérande suivi de '!'.
    // Sert à détecter le signe unaire.
    let mut prev_was_value = false;
    let mut fini = false;

    for tok in tokens {
        if fini {
            return Err(CalcError::new(
                ErrorKind::UnexpectedToken,
                format!("jeton inattendu après la fin: {tok}"),
            ));
        }

        match tok {
            Tok::Eof => fini = true,

            // réservé à la pile d'opérateurs, jamais accepté en entrée
            Tok::Signe(_) => {
                return Err(CalcError::new(
                    ErrorKind::UnexpectedToken,
                    format!("jeton inattendu: {tok}"),
                ))
            }

            Tok::Num(_) | Tok::Ident(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut trouve = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        trouve = true;
                        break;
                    }
                    out.push(vers_sortie(top));
                }
                if !trouve {
                    return Err(parentheses());
                }
                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                out.push(Tok::Num(BigRational::zero()));
                ops.push(Tok::Signe(if tok == Tok::Minus { '-' } else { '+' }));
                prev_was_value = false;
            }

            Tok::Plus
            | Tok::Minus
            | Tok::Star
            | Tok::Slash
            | Tok::Pow(_)
            | Tok::FloorDiv
            | Tok::Percent
            | Tok::Bang
            | Tok::Perm(_)
            | Tok::Comb(_) => {
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = p_top > p_tok || (p_top == p_tok && !is_right_associative(&tok));
                    if !doit_pop {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(vers_sortie(top));
                    }
                }

                prev_was_value = matches!(tok, Tok::Bang);
                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::RPar) {
            return Err(parentheses());
        }
        out.push(vers_sortie(op));
    }

    Ok(())
}
