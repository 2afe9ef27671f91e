// src/noyau/filtre.rs
//
// Pré-filtre bon marché : "ce message ressemble-t-il à un calcul ?"
// Heuristique, sans allocation : mieux vaut un faux positif (l'évaluation échouera)
// qu'un refus d'une expression calculable.

/// Caractères admis : chiffres, ponctuation arithmétique (ASCII et pleine largeur),
/// lettres de pi / e / a / c / p (toutes casses).
fn caractere_admis(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(
            c,
            '(' | ')'
                | '（'
                | '）'
                | '+'
                | '＋'
                | '-'
                | '－'
                | '*'
                | '＊'
                | '×'
                | '/'
                | '／'
                | '÷'
                | '.'
                | '!'
                | '！'
                | '^'
                | '%'
                | 'π'
                | 'Ａ'
                | 'ａ'
                | 'Ｃ'
                | 'ｃ'
                | 'Ｐ'
                | 'ｐ'
        )
        || matches!(c.to_ascii_lowercase(), 'e' | 'p' | 'i' | 'a' | 'c')
}

/// Vrai si `text` mérite une évaluation.
///
/// Un nombre seul ("1234567890") est refusé par convention : un nombre isolé
/// dans une discussion n'est pas une question de calcul.
pub fn fast_check(text: &str) -> bool {
    if text.chars().all(char::is_numeric) {
        return false;
    }
    text.chars().all(caractere_admis)
}
