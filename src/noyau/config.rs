// src/noyau/config.rs
//
// Paramètres du noyau (seuils anti-abus + précision d'affichage).

/// Seuil (en chiffres décimaux estimés) au-delà duquel une puissance est refusée.
pub const CHIFFRES_PUISSANCE_DEFAUT: f64 = 3000.0;

/// Seuil pour n!, nPr et nCr.
pub const CHIFFRES_COMBINATOIRE_DEFAUT: f64 = 8000.0;

/// Capacité maximale d'un tampon rendu au pool (au-delà : on le laisse tomber).
pub const PLAFOND_POOL_DEFAUT: usize = 256;

/// Nombre de tampons libres conservés par pool.
pub const LIBRES_MAX_DEFAUT: usize = 64;

/// Décimales affichées par défaut (0.3000 -> 0.3 après nettoyage).
pub const DECIMALES_DEFAUT: usize = 4;

/// Garde-fou : on borne la précision d'affichage.
pub const DECIMALES_MAX: usize = 40;

#[derive(Clone, Debug, PartialEq)]
pub struct Limites {
    pub chiffres_puissance: f64,
    pub chiffres_combinatoire: f64,
    pub plafond_pool: usize,
    pub libres_max: usize,
    pub decimales: usize,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            chiffres_puissance: CHIFFRES_PUISSANCE_DEFAUT,
            chiffres_combinatoire: CHIFFRES_COMBINATOIRE_DEFAUT,
            plafond_pool: PLAFOND_POOL_DEFAUT,
            libres_max: LIBRES_MAX_DEFAUT,
            decimales: DECIMALES_DEFAUT,
        }
    }
}

impl Limites {
    /// Précision d'affichage, bornée.
    pub fn with_decimales(mut self, decimales: usize) -> Self {
        self.decimales = decimales.min(DECIMALES_MAX);
        self
    }
}
