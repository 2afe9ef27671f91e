// src/noyau/erreur.rs
//
// Erreurs du noyau : une seule structure, une catégorie (ErrorKind) + message
// + position optionnelle (offset en caractères, connue seulement au tokenize).

use std::fmt;

use thiserror::Error;

/// Catégories d'erreurs de la calculatrice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidNumber,
    UnknownCharacter,
    MismatchedParentheses,
    UnexpectedToken,
    StackUnderflow,
    UnknownIdentifier,
    DivisionByZero,
    InfiniteResult,
    ResultTooBig,
    InvalidExpression,
    ModuloRequiresInt,
    ModByZero,
    PermutationRequiresInt,
    InvalidPermutation,
    CombinationRequiresInt,
    InvalidCombination,
    FactorialRequiresInt,
    FactorialNegative,
}

impl ErrorKind {
    /// Nom stable (journalisation, diagnostics).
    pub fn as_str(self) -> &'static str {
        use ErrorKind::*;
        match self {
            InvalidNumber => "InvalidNumber",
            UnknownCharacter => "UnknownCharacter",
            MismatchedParentheses => "MismatchedParentheses",
            UnexpectedToken => "UnexpectedToken",
            StackUnderflow => "StackUnderflow",
            UnknownIdentifier => "UnknownIdentifier",
            DivisionByZero => "DivisionByZero",
            InfiniteResult => "InfiniteResult",
            ResultTooBig => "ResultTooBig",
            InvalidExpression => "InvalidExpression",
            ModuloRequiresInt => "ModuloRequiresInt",
            ModByZero => "ModByZero",
            PermutationRequiresInt => "PermutationRequiresInt",
            InvalidPermutation => "InvalidPermutation",
            CombinationRequiresInt => "CombinationRequiresInt",
            InvalidCombination => "InvalidCombination",
            FactorialRequiresInt => "FactorialRequiresInt",
            FactorialNegative => "FactorialNegative",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Erreur immuable, produite une fois et propagée par valeur de retour.
///
/// `position` = offset (en caractères) dans l'entrée normalisée.
/// `None` signifie "position inconnue" (erreurs nées après le tokenize),
/// et ne doit surtout pas être lu comme l'offset 0.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CalcError {
    kind: ErrorKind,
    message: String,
    position: Option<usize>,
}

impl CalcError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
        }
    }

    /// Variante positionnée (erreurs du tokenize).
    pub fn at(pos: usize, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: Some(pos),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }
}
