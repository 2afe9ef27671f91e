//! Tests scientifiques (campagne) : propriétés du pipeline complet.
//!
//! - exactitude rationnelle (pas d'arrondi flottant caché)
//! - associativité à droite de la puissance
//! - combinatoire + variantes pleine largeur
//! - garde-fous : refus RAPIDES (budget temps) des résultats démesurés
//! - erreurs typées (ErrorKind) pour chaque cas limite

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::{evaluate, fast_check, format_resultat, ErrorKind};

fn eval_ok(expr: &str) -> BigRational {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_txt(expr: &str) -> String {
    format_resultat(&eval_ok(expr))
}

fn assert_err(expr: &str, kind: ErrorKind) {
    match evaluate(expr) {
        Ok(v) => panic!("expr={expr:?} : attendu {kind}, obtenu {v}"),
        Err(e) => assert_eq!(e.kind(), kind, "expr={expr:?} msg={e}"),
    }
}

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

const DEUX_PUISSANCE_2049: &str = concat!(
    "6463401214262201460142975337733990392088820533943096806426069085504931",
    "0277735781786394402823045826927377435921843796038988239118300981842190176304772896566241261754734601992183500",
    "3955007793042135921152767681351365535844372852395123236761886769523409411632917040726100857751517830821316172",
    "1510479824786077104382866677933668484136994957312913898971235207065264411615561131866205238541692062830051718",
    "5728354233451887207436923714715196702304603291808807395226466574462454251369421640419450314203453862646939357",
    "085161313395870091994536705997276431050332778874671087204270866459209290636957209904296387111707222119192461312",
);

/* ------------------------ Exactitude ------------------------ */

#[test]
fn sci_exactitude_decimale() {
    assert_eq!(eval_ok("0.1 + 0.2"), rat(3, 10));
    assert_eq!(eval_txt("0.1 + 0.2"), "0.3");

    let somme = vec!["0.1"; 21].join("+");
    assert_eq!(eval_txt(&somme), "2.1");

    assert_eq!(eval_txt("1/3 *3"), "1");
    assert_eq!(eval_txt("(3/5)^3"), "0.216");
    assert_eq!(eval_ok("1.02 ** 2"), rat(10404, 10000));
}

#[test]
fn sci_affichage() {
    assert_eq!(eval_txt("1+2"), "3");
    assert_eq!(eval_txt("(1+2) *3"), "9");
    assert_eq!(eval_txt("1+2*3"), "7");
    assert_eq!(eval_txt("2^3"), "8");
    assert_eq!(eval_txt("2^0.5"), "1.4142");
    assert_eq!(eval_txt("(2^0.5)^2"), "2");
    assert_eq!(eval_txt("-7 / 2"), "-3.5");
}

#[test]
fn sci_grand_entier_exact() {
    let attendu: BigInt = DEUX_PUISSANCE_2049.parse().unwrap();
    assert_eq!(eval_ok("2 ** 2049"), BigRational::from_integer(attendu));
    assert_eq!(eval_txt("2 ** 2049").len(), 617);
}

#[test]
fn sci_constantes() {
    let v = eval_ok("pi * 3");
    assert!(rat(942_477, 100_000) < v);
    assert!(rat(942_480, 100_000) > v);
    assert_eq!(eval_ok("(1 + 2) * pi ** 2 // 1 % 2"), rat(1, 1));
    assert_eq!(eval_txt("e"), "2.7183");
}

#[test]
fn sci_puissance_flottante_reconvertie() {
    assert_eq!(eval_ok("4 ^ 0.5"), rat(2, 1));
    assert_eq!(eval_ok("0.25 ^ 0.5"), rat(1, 2));
    assert_err("(0-8) ^ 0.5", ErrorKind::InfiniteResult);
}

/* ------------------------ Associativité / précédence ------------------------ */

#[test]
fn sci_puissance_associative_a_droite() {
    // 2^(3^2) = 512, et non (2^3)^2 = 64
    assert_eq!(eval_ok("2 ^ 3 ^ 2"), rat(512, 1));
    assert_eq!(eval_ok("2 ** 3 ** 2"), rat(512, 1));
    assert_eq!(eval_ok("(2 ^ 3) ^ 2"), rat(64, 1));
}

#[test]
fn sci_signe_unaire() {
    assert_eq!(eval_ok("-3 + 5"), rat(2, 1));
    assert_eq!(eval_ok("2*-3"), rat(-6, 1));
    assert_eq!(eval_ok("-2^2"), rat(-4, 1));
    assert_eq!(eval_ok("2^-1"), rat(1, 2));
    assert_eq!(eval_ok("2^-1*4"), rat(2, 1));
    assert_eq!(eval_ok("2 - -3"), rat(5, 1));
    assert_eq!(eval_ok("+4"), rat(4, 1));
}

/* ------------------------ Combinatoire ------------------------ */

#[test]
fn sci_combinatoire() {
    assert_eq!(eval_ok("5!"), rat(120, 1));
    assert_eq!(eval_ok("10P3"), rat(720, 1));
    assert_eq!(eval_ok("10C3"), rat(120, 1));
    assert_eq!(eval_ok("10a3"), rat(720, 1));
    assert_eq!(eval_ok("5！"), rat(120, 1));
    assert_eq!(eval_ok("10Ａ3"), rat(720, 1));
    assert_eq!(eval_ok("10ｃ3"), rat(120, 1));
    assert_eq!(eval_ok("20! / (10! * 2)"), rat(335_221_286_400, 1));
    assert_eq!(eval_ok("3!!"), rat(720, 1));
}

/* ------------------------ Cas limites division / modulo ------------------------ */

#[test]
fn sci_division_et_modulo() {
    assert_err("1/0", ErrorKind::DivisionByZero);
    assert_err("5 // 0", ErrorKind::DivisionByZero);
    assert_err("3 % 0", ErrorKind::ModByZero);
    assert_err("1.1 % 2", ErrorKind::ModuloRequiresInt);
    assert_eq!(eval_ok("7 // 2"), rat(3, 1));
    assert_eq!(eval_ok("7.5 // 2"), rat(3, 1));
    assert_eq!(eval_ok("17 % 5"), rat(2, 1));
}

/* ------------------------ Garde-fous (rapides) ------------------------ */

#[test]
fn sci_garde_fous_rapides() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    assert_err("10 ^ 5000", ErrorKind::ResultTooBig);
    budget(t0, max);
    // dénominateur démesuré : refusé lui aussi
    assert_err("10 ^ -4000", ErrorKind::ResultTooBig);
    assert_err("0.5 ^ 10000", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("99999 ! ", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("99999999999999999999 !", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("100000P50000", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("100000C50000", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("2 ^ 2 ^ 2 ^ 2 ^ 2 ^ 2", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("100000000000000000000P3000", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("100000000000000000000C3000", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("1000000000000000000000000000000P30000", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("100000000000000000000C99999999999999997000", ErrorKind::ResultTooBig);
    budget(t0, max);
    assert_err("10000000000000000000P9999999999999997000", ErrorKind::ResultTooBig);
    budget(t0, max);
}

#[test]
fn sci_combinatoire_invalide() {
    assert_err("10P12", ErrorKind::InvalidPermutation);
    assert_err("10C11", ErrorKind::InvalidCombination);
    assert_err("1.5P1", ErrorKind::PermutationRequiresInt);
    assert_err("5C0.5", ErrorKind::CombinationRequiresInt);
    assert_err("2.5!", ErrorKind::FactorialRequiresInt);
    assert_err("(0-3)!", ErrorKind::FactorialNegative);
}

/* ------------------------ Erreurs de syntaxe ------------------------ */

#[test]
fn sci_erreurs_syntaxe() {
    assert_err("1+(2", ErrorKind::MismatchedParentheses);
    assert_err("foo", ErrorKind::UnknownIdentifier);
    assert_err("1.2.3", ErrorKind::InvalidNumber);
    assert_err("1 + ?", ErrorKind::UnknownCharacter);
    assert_err("1 +", ErrorKind::StackUnderflow);
    assert_err("1 2", ErrorKind::InvalidExpression);
    assert_err("", ErrorKind::InvalidExpression);
    assert_err("()", ErrorKind::InvalidExpression);
}

#[test]
fn sci_position_seulement_au_tokenize() {
    let e = evaluate("12 + 3 @").unwrap_err();
    assert_eq!(e.position(), Some(7));
    let e = evaluate("1/0").unwrap_err();
    assert_eq!(e.position(), None);
}

/* ------------------------ Filtre ------------------------ */

#[test]
fn sci_filtre_coherent_avec_evaluate() {
    assert!(!fast_check("1234567890"));
    assert!(fast_check("1 + 2 * 3"));
    assert!(!fast_check("hello=1+2"));
    assert!(fast_check("3.14 ×（2＋1）"));

    // tout ce qui passe le filtre ici doit aussi se calculer
    for expr in ["3.14 ×（2＋1）", "10Ａ3", "5！", "2 ** 10 % 7", "pi * e", "-1 + 2"] {
        assert!(fast_check(expr), "filtre: {expr:?}");
        assert!(evaluate(expr).is_ok(), "evaluate: {expr:?}");
    }
}
