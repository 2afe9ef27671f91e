// src/noyau/jetons.rs

use std::borrow::Cow;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::erreur::{CalcError, ErrorKind};
use super::format::format_rat_pretty;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Eof,
    Num(BigRational),

    // pi / e, résolus seulement à l'évaluation
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Pow(&'static str), // "^" ou "**"
    FloorDiv,          // //
    Percent,           // %
    Bang,              // ! (postfixe)
    Perm(char),        // lettre isolée a/A/p/P
    Comb(char),        // lettre isolée c/C

    // signe unaire, interne au shunting-yard (jamais produit par tokenize)
    Signe(char),

    LPar,
    RPar,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Eof => f.write_str("<fin>"),
            Tok::Num(r) => f.write_str(&format_rat_pretty(r)),
            Tok::Ident(name) => f.write_str(name),
            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::Pow(lex) => f.write_str(lex),
            Tok::FloorDiv => f.write_str("//"),
            Tok::Percent => f.write_str("%"),
            Tok::Bang => f.write_str("!"),
            Tok::Perm(c) | Tok::Comb(c) | Tok::Signe(c) => write!(f, "{c}"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

/* ------------------------ Pré-passe pleine largeur ------------------------ */

fn vers_ascii(c: char) -> Option<char> {
    let r = match c {
        '（' => '(',
        '）' => ')',
        '＋' => '+',
        '－' => '-',
        '×' | '＊' => '*',
        '÷' | '／' => '/',
        '！' => '!',
        'Ａ' => 'A',
        'ａ' => 'a',
        'Ｃ' => 'C',
        'ｃ' => 'c',
        'Ｐ' => 'P',
        'ｐ' => 'p',
        _ => return None,
    };
    Some(r)
}

/// Remplace les variantes pleine largeur / CJK par leur équivalent ASCII.
/// Chemin ASCII courant : aucune allocation.
///
/// Chaque remplacement est 1 caractère -> 1 caractère : les positions
/// (en caractères) restent valables pour l'entrée d'origine.
pub fn normalise(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| vers_ascii(c).is_some()) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().map(|c| vers_ascii(c).unwrap_or(c)).collect())
}

/* ------------------------ Littéraux numériques ------------------------ */

// voie rapide : au plus 18 chiffres entiers, 9 décimaux (tient dans un u128)
const CHIFFRES_ENTIERS_RAPIDES: usize = 18;
const CHIFFRES_DECIMAUX_RAPIDES: usize = 9;

fn parse_chiffres(s: &str) -> Option<BigInt> {
    if s.is_empty() {
        return Some(BigInt::zero());
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
}

/// Littéral décimal ("12", "1.08", ".5", "5.") -> rationnel exact.
/// `debut` sert uniquement à positionner l'erreur.
pub fn parse_litteral(raw: &str, debut: usize) -> Result<BigRational, CalcError> {
    let invalide = || CalcError::at(debut, ErrorKind::InvalidNumber, format!("nombre invalide: {raw}"));

    let (ent, frac) = raw.split_once('.').unwrap_or((raw, ""));
    if frac.contains('.') || (ent.is_empty() && frac.is_empty()) {
        return Err(invalide());
    }
    if !ent.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalide());
    }

    if ent.len() <= CHIFFRES_ENTIERS_RAPIDES && frac.len() <= CHIFFRES_DECIMAUX_RAPIDES {
        let mut n: u128 = 0;
        for b in ent.bytes().chain(frac.bytes()) {
            n = n * 10 + u128::from(b - b'0');
        }
        let d = 10u128.pow(frac.len() as u32);
        return Ok(BigRational::new(BigInt::from(n), BigInt::from(d)));
    }

    // voie générale (précision arbitraire)
    let e = parse_chiffres(ent).ok_or_else(invalide)?;
    let f = parse_chiffres(frac).ok_or_else(invalide)?;
    let d = BigInt::from(10).pow(frac.len() as u32);
    Ok(BigRational::new(e * &d + f, d))
}

/* ------------------------ Tokenisation ------------------------ */

/// Lettre isolée : a/p => arrangement, c => combinaison ; sinon identifiant.
fn classe_mot(mot: &str) -> Tok {
    let mut it = mot.chars();
    if let (Some(c), None) = (it.next(), it.next()) {
        if c.is_ascii_alphabetic() {
            match c.to_ascii_lowercase() {
                'a' | 'p' => return Tok::Perm(c),
                'c' => return Tok::Comb(c),
                _ => {}
            }
        }
    }
    Tok::Ident(mot.to_string())
}

/// Tokenize une chaîne en jetons (terminée par `Tok::Eof`).
/// Supporte:
/// - nombres décimaux exacts (ex: 12, 1.08, .5)
/// - opérateurs + - * / ^ ** // % !
/// - suffixes a/p (arrangements) et c (combinaisons) : 10P3, 10C3
/// - parenthèses ( )
/// - identifiants (lettres), résolus à l'évaluation (pi, e)
/// - variantes pleine largeur (（ ） ＋ × ÷ ！ Ａ ...)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, CalcError> {
    let mut out = Vec::new();
    tokenize_into(s, &mut out)?;
    Ok(out)
}

/// Même chose, dans un tampon fourni (réutilisé via le pool).
pub(crate) fn tokenize_into(s: &str, out: &mut Vec<Tok>) -> Result<(), CalcError> {
    let texte = normalise(s);
    let texte = texte.as_ref();

    let mut it = texte.char_indices().peekable();
    // position en caractères (pas en octets)
    let mut pos: usize = 0;

    while let Some((octet, c)) = it.next() {
        let debut = pos;
        pos += 1;

        if c.is_whitespace() {
            continue;
        }

        // Nombre : suite de chiffres et de '.'
        if c.is_ascii_digit() || c == '.' {
            let mut fin = octet + c.len_utf8();
            while let Some(&(o, d)) = it.peek() {
                if !(d.is_ascii_digit() || d == '.') {
                    break;
                }
                fin = o + d.len_utf8();
                it.next();
                pos += 1;
            }
            out.push(Tok::Num(parse_litteral(&texte[octet..fin], debut)?));
            continue;
        }

        // Mot : suite de lettres
        if c.is_alphabetic() {
            let mut fin = octet + c.len_utf8();
            while let Some(&(o, d)) = it.peek() {
                if !d.is_alphabetic() {
                    break;
                }
                fin = o + d.len_utf8();
                it.next();
                pos += 1;
            }
            out.push(classe_mot(&texte[octet..fin]));
            continue;
        }

        // Opérateurs à deux caractères d'abord
        if let Some(&(_, d)) = it.peek() {
            let double = match (c, d) {
                ('*', '*') => Some(Tok::Pow("**")),
                ('/', '/') => Some(Tok::FloorDiv),
                _ => None,
            };
            if let Some(t) = double {
                it.next();
                pos += 1;
                out.push(t);
                continue;
            }
        }

        let t = match c {
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '%' => Tok::Percent,
            '^' => Tok::Pow("^"),
            '!' => Tok::Bang,
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => {
                return Err(CalcError::at(
                    debut,
                    ErrorKind::UnknownCharacter,
                    format!("caractère inconnu: {c:?} à la position {debut}"),
                ))
            }
        };
        out.push(t);
    }

    out.push(Tok::Eof);
    Ok(())
}

/// Format utilitaire (journal / tests) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = String::new();
    for t in tokens {
        if matches!(t, Tok::Eof) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&t.to_string());
    }
    out
}

/// Raccourci tests : entier -> Num.
#[cfg(test)]
pub(crate) fn num(n: i64) -> Tok {
    Tok::Num(BigRational::from_integer(BigInt::from(n)))
}
