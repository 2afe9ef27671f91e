// src/main.rs
//
// Calculatrice RPN: point d'entrée en ligne de commande
// ------------------------------------------------------
// But:
// - Expression en arguments : une évaluation, code de sortie 1 si échec
// - Sans argument           : une réponse par ligne de l'entrée standard (mode bot)
//
// IMPORTANT (structure projet):
// - Politique de réponse dans src/app.rs, calcul dans src/noyau/
// - Ici: point d'entrée seulement

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use log::{error, info};

use calculatrice_rpn::app::{self, Options, Reponse, Session};
use calculatrice_rpn::{Evaluateur, Limites};

/// Titre unique (journal + aide).
const TITRE_APP: &str = "Calculatrice RPN";

fn main() -> ExitCode {
    let opts = match Options::depuis_args(std::env::args().skip(1)) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("{msg}\n\n{}", app::USAGE);
            return ExitCode::from(2);
        }
    };

    if opts.aide {
        println!("{TITRE_APP}\n\n{}", app::USAGE);
        return ExitCode::SUCCESS;
    }

    app::init_logger(opts.log_level);

    let ev = Evaluateur::new(Limites::default().with_decimales(opts.decimales));

    match &opts.expression {
        Some(expr) => une_expression(&ev, expr),
        None => boucle_stdin(&ev, Session::new(opts.explicite)),
    }
}

/* ------------------------ Une expression ------------------------ */

fn une_expression(ev: &Evaluateur, expr: &str) -> ExitCode {
    // en argument, la demande est toujours explicite
    match app::repondre(ev, expr, true) {
        Reponse::Resultat(txt) => {
            println!("{txt}");
            ExitCode::SUCCESS
        }
        Reponse::Erreur(txt) => {
            eprintln!("{txt}");
            ExitCode::FAILURE
        }
        Reponse::Silence => ExitCode::FAILURE,
    }
}

/* ------------------------ Mode bot (stdin) ------------------------ */

fn boucle_stdin(ev: &Evaluateur, mut session: Session) -> ExitCode {
    info!("{TITRE_APP} : lecture de l'entrée standard");

    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for ligne in stdin.lock().lines() {
        let ligne = match ligne {
            Ok(l) => l,
            Err(e) => {
                error!("lecture stdin: {e}");
                return ExitCode::FAILURE;
            }
        };
        if ligne.trim().is_empty() {
            continue;
        }

        let reponse = app::repondre(ev, &ligne, session.explicite);
        if let Reponse::Resultat(txt) | Reponse::Erreur(txt) = &reponse {
            if let Err(e) = writeln!(out, "{txt}") {
                error!("écriture stdout: {e}");
                return ExitCode::FAILURE;
            }
        }
        session.enregistre(&reponse);
    }

    info!("{}", session.bilan());
    ExitCode::SUCCESS
}
