// src/noyau/pools.rs
//
// Pools de tampons réutilisables (jetons, RPN, pile de valeurs).
//
// Contrats :
// - acquire(min) : un Vec vide de capacité >= min (recyclé si possible, sinon neuf)
// - release(buf) : vidé puis rendu, sauf si sa capacité dépasse le plafond
// - un tampon rendu est toujours vide : les valeurs big int d'une évaluation
//   précédente sont libérées, jamais partagées avec la suivante
// - sûr entre threads (Mutex) ; un emprunt n'est jamais partagé

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use num_rational::BigRational;

use super::config::Limites;
use super::jetons::Tok;

pub struct Pool<T> {
    libres: Mutex<Vec<Vec<T>>>,
    plafond: usize,
    libres_max: usize,
}

impl<T> Pool<T> {
    pub fn new(plafond: usize, libres_max: usize) -> Self {
        Self {
            libres: Mutex::new(Vec::new()),
            plafond,
            libres_max,
        }
    }

    // Un pool ne contient que des Vec vides : un verrou empoisonné reste utilisable.
    fn verrou(&self) -> MutexGuard<'_, Vec<Vec<T>>> {
        self.libres.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Premier tampon libre assez grand ; les trop petits restent au pool.
    pub fn acquire(&self, min: usize) -> Vec<T> {
        let mut libres = self.verrou();
        match libres.iter().rposition(|b| b.capacity() >= min) {
            Some(i) => libres.swap_remove(i),
            None => Vec::with_capacity(min),
        }
    }

    pub fn release(&self, mut buf: Vec<T>) {
        if buf.capacity() > self.plafond {
            return;
        }
        buf.clear();
        let mut libres = self.verrou();
        if libres.len() < self.libres_max {
            libres.push(buf);
        }
    }

    /// Emprunt à portée : rendu automatiquement au pool en fin de portée
    /// (y compris sur retour anticipé par `?`).
    pub fn emprunte(&self, min: usize) -> Emprunt<'_, T> {
        Emprunt {
            pool: self,
            buf: self.acquire(min),
        }
    }

    /// Nombre de tampons actuellement disponibles.
    pub fn libres(&self) -> usize {
        self.verrou().len()
    }
}

pub struct Emprunt<'a, T> {
    pool: &'a Pool<T>,
    buf: Vec<T>,
}

impl<T> Deref for Emprunt<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.buf
    }
}

impl<T> DerefMut for Emprunt<'_, T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }
}

impl<T> Drop for Emprunt<'_, T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

/// Les trois pools d'un évaluateur.
pub struct Pools {
    pub jetons: Pool<Tok>,
    pub rpn: Pool<Tok>,
    pub valeurs: Pool<BigRational>,
}

impl Pools {
    pub fn new(limites: &Limites) -> Self {
        Self {
            jetons: Pool::new(limites.plafond_pool, limites.libres_max),
            rpn: Pool::new(limites.plafond_pool, limites.libres_max),
            valeurs: Pool::new(limites.plafond_pool, limites.libres_max),
        }
    }
}
