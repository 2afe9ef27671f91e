//! src/app/etat.rs
//!
//! État de session (sans noyau).
//!
//! Rôle : retenir la dernière réponse et compter les issues, pour le bilan
//! affiché en fin de lecture.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.

use super::Reponse;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub explicite: bool,

    // --- compteurs ---
    pub resultats: usize,
    pub erreurs: usize,
    pub silences: usize,

    // --- dernière sortie visible ---
    pub derniere: Option<String>,
}

impl Session {
    pub fn new(explicite: bool) -> Self {
        Self {
            explicite,
            ..Self::default()
        }
    }

    /// Enregistre l'issue d'une ligne.
    pub fn enregistre(&mut self, reponse: &Reponse) {
        match reponse {
            Reponse::Resultat(txt) => {
                self.resultats += 1;
                self.derniere = Some(txt.clone());
            }
            Reponse::Erreur(txt) => {
                self.erreurs += 1;
                self.derniere = Some(txt.clone());
            }
            Reponse::Silence => self.silences += 1,
        }
    }

    /// Remise à zéro des compteurs (le mode est conservé).
    pub fn reset(&mut self) {
        *self = Self::new(self.explicite);
    }

    pub fn bilan(&self) -> String {
        format!(
            "{} résultat(s), {} erreur(s), {} ignorée(s)",
            self.resultats, self.erreurs, self.silences
        )
    }
}
