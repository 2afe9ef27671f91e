//! Noyau exact : évaluateur d'expressions arithmétiques
//!
//! Organisation interne :
//! - erreur.rs   : ErrorKind + CalcError (position en caractères si connue)
//! - config.rs   : Limites (seuils anti-abus, pools, décimales)
//! - jetons.rs   : tokenisation (pleine largeur normalisée, littéraux exacts)
//! - rpn.rs      : shunting-yard
//! - garde.rs    : estimations de taille (lgamma / log10) avant calcul
//! - arith.rs    : puissance, //, %, !, P, C
//! - machine.rs  : machine à pile sur la RPN + constantes pi / e
//! - pools.rs    : tampons réutilisables, sûrs entre threads
//! - filtre.rs   : fast_check (pré-filtre heuristique)
//! - format.rs   : affichage EXACT (n/d)
//! - lecture.rs  : affichage décimal (4 décimales, zéros retirés)
//! - eval.rs     : pipeline complet + Evaluateur

pub mod arith;
pub mod config;
pub mod erreur;
pub mod eval;
pub mod filtre;
pub mod format;
pub mod garde;
pub mod jetons;
pub mod lecture;
pub mod machine;
pub mod pools;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

use num_rational::BigRational;

// API publique minimale
pub use config::Limites;
pub use erreur::{CalcError, ErrorKind};
pub use eval::Evaluateur;
pub use filtre::fast_check;
pub use lecture::format_resultat;

/// Évalue `text` avec l'évaluateur partagé du processus.
pub fn evaluate(text: &str) -> Result<BigRational, CalcError> {
    Evaluateur::global().evaluate(text)
}
