// src/app.rs
//
// Calculatrice: côté appelant
// ----------------------------
// Rôle:
// - Déclarer le sous-module etat.rs (compteurs de session)
// - Options de la ligne de commande + initialisation du journal
// - Politique de réponse "chat" : "<expr> = <résultat>", erreurs visibles seulement
//   si la demande est explicite (/commande ou --explicite)
//
// Important:
// - Aucune règle de calcul ici : tout passe par le noyau (Evaluateur).

pub mod etat;

pub use etat::Session;

use std::borrow::Cow;

use log::LevelFilter;

use crate::noyau::config::{DECIMALES_DEFAUT, DECIMALES_MAX};
use crate::noyau::{fast_check, Evaluateur};

pub const USAGE: &str = "\
Usage: calculatrice_rpn [OPTIONS] [EXPRESSION...]

Sans EXPRESSION, lit l'entrée standard ligne par ligne.

Options:
    --explicite              Affiche les erreurs et ignore le pré-filtre
    --decimales=N            Décimales affichées (défaut 4, max 40)
    --log-level=LEVEL        off/error/warn/info/debug/trace (sinon RUST_LOG)
    --help, -h               Affiche cette aide";

/* ------------------------ Options ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        let niveau = match s.to_ascii_lowercase().as_str() {
            "off" => LogLevel::Off,
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => return None,
        };
        Some(niveau)
    }

    pub fn filtre(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub explicite: bool,
    pub decimales: usize,
    pub log_level: Option<LogLevel>,
    pub aide: bool,
    /// Arguments restants, joints par des espaces.
    pub expression: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            explicite: false,
            decimales: DECIMALES_DEFAUT,
            log_level: None,
            aide: false,
            expression: None,
        }
    }
}

impl Options {
    pub fn depuis_args<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = Options::default();
        let mut mots: Vec<String> = Vec::new();

        for arg in args {
            if arg == "--explicite" {
                opts.explicite = true;
            } else if arg == "--help" || arg == "-h" {
                opts.aide = true;
            } else if let Some(v) = arg.strip_prefix("--decimales=") {
                let n: usize = v
                    .parse()
                    .map_err(|_| format!("--decimales attend un entier, reçu {v:?}"))?;
                if n > DECIMALES_MAX {
                    return Err(format!("--decimales: au plus {DECIMALES_MAX}"));
                }
                opts.decimales = n;
            } else if let Some(v) = arg.strip_prefix("--log-level=") {
                let niveau = LogLevel::parse(v).ok_or_else(|| format!("niveau de journal inconnu: {v:?}"))?;
                opts.log_level = Some(niveau);
            } else if arg.starts_with("--") {
                return Err(format!("option inconnue: {arg}"));
            } else {
                mots.push(arg);
            }
        }

        if !mots.is_empty() {
            opts.expression = Some(mots.join(" "));
        }
        Ok(opts)
    }
}

/// Initialise env_logger une seule fois. Sans niveau explicite, RUST_LOG fait foi.
pub fn init_logger(log_level: Option<LogLevel>) {
    use env_logger::Builder;
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let mut builder = Builder::from_default_env();
        if let Some(niveau) = log_level {
            builder.filter_level(niveau.filtre());
        }
        // un logger déjà installé (tests, intégration) n'est pas une erreur
        builder.try_init().ok();
    });
}

/* ------------------------ Politique de réponse ------------------------ */

/// Ponctuation de chat pleine largeur -> ASCII, appliquée avant l'évaluateur.
fn ponctuation_chat(c: char) -> Option<char> {
    let r = match c {
        '（' => '(',
        '）' => ')',
        '【' => '[',
        '】' => ']',
        '！' => '!',
        '￥' => '$',
        '，' => ',',
        '。' => '.',
        '？' => '?',
        '“' | '”' => '"',
        '‘' | '’' => '\'',
        '～' => '~',
        _ => return None,
    };
    Some(r)
}

pub fn normalise_chat(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| ponctuation_chat(c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(|c| ponctuation_chat(c).unwrap_or(c)).collect())
}

/// "/calc 1+2" -> (true, "1+2") ; "1+2" -> (false, "1+2").
pub fn separe_commande(text: &str) -> (bool, &str) {
    match text.strip_prefix('/') {
        Some(reste) => {
            let expr = reste.split_once(char::is_whitespace).map_or("", |(_, e)| e);
            (true, expr.trim())
        }
        None => (false, text.trim()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reponse {
    /// "<expr> = <résultat>"
    Resultat(String),
    /// Erreur montrée (demande explicite seulement).
    Erreur(String),
    /// Demande implicite qui échoue ou ne ressemble pas à un calcul : on se tait.
    Silence,
}

/// Traite un message comme le ferait le bot.
pub fn repondre(ev: &Evaluateur, text: &str, explicite: bool) -> Reponse {
    let texte = normalise_chat(text);
    let (commande, expr) = separe_commande(&texte);
    let force = explicite || commande;

    if !force && !fast_check(expr) {
        return Reponse::Silence;
    }

    match ev.evaluate(expr) {
        Ok(v) => Reponse::Resultat(format!("{expr} = {}", ev.format(&v))),
        Err(e) if force => Reponse::Erreur(format!("计算失败, error: {e}")),
        Err(_) => Reponse::Silence,
    }
}
