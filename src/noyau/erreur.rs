// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - Une seule famille (ErreurCalc), renvoyée au premier problème rencontré.
// - Aucune valeur par défaut : l’appelant décide quoi afficher.
// - `kind()` donne la catégorie “plate” (pratique pour les tests et l’UI).

use thiserror::Error;

/// Résultat du noyau.
pub type Result<T> = std::result::Result<T, ErreurCalc>;

/// Catégorie d’erreur, sans contexte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeErreur {
    EmptyInput,
    UnexpectedCharacter,
    MalformedLiteral,
    UnmatchedParen,
    TrailingInput,
    UnexpectedToken,
    TooDeep,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("entrée vide")]
    EntreeVide,

    #[error("caractère inattendu '{c}' (position {pos})")]
    CaractereInattendu { c: char, pos: usize },

    #[error("nombre mal formé \"{litteral}\" : {raison}")]
    LitteralMalforme {
        litteral: String,
        raison: &'static str,
    },

    #[error("parenthèse orpheline (position {pos})")]
    ParentheseOrpheline { pos: usize },

    #[error("reste non lu après l’expression (position {pos})")]
    ResteNonLu { pos: usize },

    #[error("jeton inattendu {jeton} (position {pos})")]
    JetonInattendu { jeton: String, pos: usize },

    #[error("expression trop imbriquée (max {max} niveaux de descente)")]
    TropImbrique { max: usize },
}

impl ErreurCalc {
    pub fn kind(&self) -> TypeErreur {
        match self {
            ErreurCalc::EntreeVide => TypeErreur::EmptyInput,
            ErreurCalc::CaractereInattendu { .. } => TypeErreur::UnexpectedCharacter,
            ErreurCalc::LitteralMalforme { .. } => TypeErreur::MalformedLiteral,
            ErreurCalc::ParentheseOrpheline { .. } => TypeErreur::UnmatchedParen,
            ErreurCalc::ResteNonLu { .. } => TypeErreur::TrailingInput,
            ErreurCalc::JetonInattendu { .. } => TypeErreur::UnexpectedToken,
            ErreurCalc::TropImbrique { .. } => TypeErreur::TooDeep,
        }
    }

    pub(crate) fn malforme(litteral: &str, raison: &'static str) -> Self {
        ErreurCalc::LitteralMalforme {
            litteral: litteral.to_string(),
            raison,
        }
    }
}
