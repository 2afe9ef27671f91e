//! Noyau: évaluation (pipeline réel)
//!
//! tokenize -> RPN (shunting-yard) -> machine à pile -> rationnel EXACT
//!
//! Les trois tampons (jetons, RPN, pile de valeurs) sont empruntés aux pools
//! de l'évaluateur et rendus en fin d'appel, erreur ou pas.

use std::sync::OnceLock;

use log::{debug, log_enabled, trace, Level};
use num_rational::BigRational;

use super::config::Limites;
use super::erreur::CalcError;
use super::format::format_rat_pretty;
use super::jetons::{format_tokens, tokenize_into};
use super::lecture::format_decimal;
use super::machine::eval_rpn_into;
use super::pools::Pools;
use super::rpn::to_rpn_into;

/// Évaluateur autonome : ses limites + ses pools.
///
/// `Evaluateur::global()` est l'instance partagée du processus ; les tests
/// peuvent construire des instances isolées avec `Evaluateur::new`.
pub struct Evaluateur {
    limites: Limites,
    pools: Pools,
}

impl Default for Evaluateur {
    fn default() -> Self {
        Self::new(Limites::default())
    }
}

impl Evaluateur {
    pub fn new(limites: Limites) -> Self {
        let pools = Pools::new(&limites);
        Self { limites, pools }
    }

    pub fn global() -> &'static Evaluateur {
        static GLOBAL: OnceLock<Evaluateur> = OnceLock::new();
        GLOBAL.get_or_init(Evaluateur::default)
    }

    pub fn limites(&self) -> &Limites {
        &self.limites
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Évalue une expression : valeur exacte ou première erreur rencontrée.
    pub fn evaluate(&self, text: &str) -> Result<BigRational, CalcError> {
        let res = self.pipeline(text);
        match &res {
            Ok(v) => debug!("{text:?} = {}", format_rat_pretty(v)),
            Err(e) => debug!("{text:?} : {} [{}]", e, e.kind()),
        }
        res
    }

    fn pipeline(&self, text: &str) -> Result<BigRational, CalcError> {
        // 1) Jetons
        // réservation bornée : un long message fait grandir le Vec au besoin
        let reserve = (text.len() + 1).min(self.limites.plafond_pool);
        let mut jetons = self.pools.jetons.emprunte(reserve);
        tokenize_into(text, &mut jetons)?;
        if log_enabled!(Level::Trace) {
            trace!("jetons: {}", format_tokens(&jetons));
        }

        // 2) RPN
        let mut rpn = self.pools.rpn.emprunte(jetons.len());
        let mut ops = self.pools.rpn.emprunte(8);
        to_rpn_into(jetons.drain(..), &mut rpn, &mut ops)?;
        if log_enabled!(Level::Trace) {
            trace!("rpn: {}", format_tokens(&rpn));
        }

        // 3) Machine à pile
        let mut pile = self.pools.valeurs.emprunte(8);
        eval_rpn_into(rpn.drain(..), &mut pile, &self.limites)
    }

    /// Affichage décimal selon la précision configurée.
    pub fn format(&self, r: &BigRational) -> String {
        format_decimal(r, self.limites.decimales)
    }
}
