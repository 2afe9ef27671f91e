//! Tests fuzz safe : robustesse + déterminisme + concurrence, limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs attendues (division par zéro, garde-fous, etc.)
//! - invariant clé : deux évaluations de la même chaîne donnent le même résultat

use std::time::{Duration, Instant};

use super::{evaluate, fast_check, format_resultat, ErrorKind, Evaluateur, Limites};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(kind: ErrorKind) -> bool {
    // Liste blanche : erreurs *normales* pour des expressions aléatoires bien formées.
    matches!(
        kind,
        ErrorKind::DivisionByZero
            | ErrorKind::ModByZero
            | ErrorKind::ModuloRequiresInt
            | ErrorKind::InfiniteResult
            | ErrorKind::ResultTooBig
            | ErrorKind::FactorialRequiresInt
            | ErrorKind::FactorialNegative
            | ErrorKind::PermutationRequiresInt
            | ErrorKind::InvalidPermutation
            | ErrorKind::CombinationRequiresInt
            | ErrorKind::InvalidCombination
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        5 => format!("{}", 10 + rng.pick(90)),
        _ => format!("{}", rng.pick(6)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(12) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a}//{})", gen_expr(rng, depth - 1)),
        6 => format!("({a}%{})", gen_expr(rng, depth - 1)),
        // exposant petit : on teste la puissance, pas le garde-fou
        7 => format!("({a}^{})", rng.pick(4)),
        8 => format!("({}!)", rng.pick(12)),
        9 => format!("({}P{})", rng.pick(12), rng.pick(6)),
        10 => format!("({}C{})", rng.pick(12), rng.pick(6)),
        _ => format!("-({a})"),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let ev = Evaluateur::default();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        // un nombre seul est refusé par le filtre, tout le reste doit passer
        assert!(
            fast_check(&expr) || expr.chars().all(char::is_numeric),
            "le filtre doit admettre {expr:?}"
        );

        let r1 = ev.evaluate(&expr);
        let r2 = evaluate(&expr);
        match (&r1, &r2) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a, b, "expr={expr:?}");
                assert_eq!(format_resultat(a), format_resultat(b));
                seen_ok += 1;
            }
            (Err(a), Err(b)) => {
                assert_eq!(a.kind(), b.kind(), "expr={expr:?}");
                assert!(
                    is_erreur_attendue(a.kind()),
                    "erreur non attendue: expr={expr:?} err={a} [{}]",
                    a.kind()
                );
                seen_err += 1;
            }
            _ => panic!("résultats divergents pour {expr:?}: {r1:?} / {r2:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_concurrence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let exprs: Vec<String> = (0..64).map(|_| gen_expr(&mut rng, 3)).collect();

    // référence séquentielle sur une instance isolée
    let reference: Vec<_> = {
        let ev = Evaluateur::new(Limites::default());
        exprs.iter().map(|e| ev.evaluate(e)).collect()
    };

    let partage = Evaluateur::default();
    std::thread::scope(|s| {
        for t in 0..8 {
            let (exprs, reference, partage) = (&exprs, &reference, &partage);
            s.spawn(move || {
                for k in 0..exprs.len() {
                    let i = (k + t * 7) % exprs.len();
                    assert_eq!(partage.evaluate(&exprs[i]), reference[i], "expr={:?}", exprs[i]);
                    assert_eq!(evaluate(&exprs[i]), reference[i], "expr={:?}", exprs[i]);
                }
            });
        }
    });
    budget(t0, max);

    // les pools ne gardent que des tampons bornés
    assert!(partage.pools().valeurs.libres() <= Limites::default().libres_max);
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let v = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(format_resultat(&v), "400");
}

#[test]
fn fuzz_safe_entrees_arbitraires() {
    // caractères quelconques : jamais de panique, toujours Ok ou Err typée
    let mut rng = Rng::new(42);
    let alphabet: Vec<char> = "0123456789.+-*/%^!()pPcCaAeEi xyz（）＋×÷！Ａ$".chars().collect();
    for _ in 0..500 {
        let n = rng.pick(16) as usize;
        let s: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();
        let _ = evaluate(&s);
    }
}
