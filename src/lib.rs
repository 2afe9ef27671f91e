//! Calculatrice RPN : évaluateur d'expressions arithmétiques en rationnels exacts.
//!
//! - `noyau` : tokenisation, shunting-yard, machine à pile, garde-fous, pools
//! - `app`   : politique de réponse côté chat + options de la ligne de commande

pub mod app;
pub mod noyau;

pub use noyau::{evaluate, fast_check, format_resultat, CalcError, ErrorKind, Evaluateur, Limites};
