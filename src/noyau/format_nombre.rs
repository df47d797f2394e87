// src/noyau/format_nombre.rs
//
// Format des nombres (séparateur décimal + séparateur de milliers).
//
// - FormatNombre : valeur copiable, lue par le noyau à CHAQUE évaluation.
// - FormatNomme  : catalogue des formats connus ("comma-dot", "dot-comma", ...).
// - SourceFormat : accès en lecture seule (injecté), jamais d’état global caché.
// - ReglageFormat : réglage partagé (UI), snapshot cohérent via RwLock.

use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use thiserror::Error;

/// Espaces acceptés quand le séparateur de milliers est l’espace.
const ESPACES_GROUPE: [char; 3] = [' ', '\u{a0}', '\u{202f}'];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurFormat {
    #[error("format inconnu \"{0}\"")]
    Inconnu(String),

    #[error("séparateur décimal invalide '{0}' (attendu '.' ou ',')")]
    Decimal(char),

    #[error("séparateur de milliers invalide '{0}'")]
    Groupe(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatNombre {
    decimal: char,
    groupe: Option<char>,
    /// Affichage seulement : l’évaluation l’ignore.
    pub masquer_decimales: bool,
}

impl Default for FormatNombre {
    fn default() -> Self {
        FormatNomme::CommaDot.format()
    }
}

impl FormatNombre {
    /// Format personnalisé.
    /// Décimal : '.' ou ','. Milliers : ',', '.', '\'', espace, ou aucun.
    pub fn new(decimal: char, groupe: Option<char>) -> Result<Self, ErreurFormat> {
        if decimal != '.' && decimal != ',' {
            return Err(ErreurFormat::Decimal(decimal));
        }

        let groupe = match groupe {
            None => None,
            Some(c) if ESPACES_GROUPE.contains(&c) => Some(' '),
            Some(c @ (',' | '.' | '\'')) => Some(c),
            Some(c) => return Err(ErreurFormat::Groupe(c)),
        };

        Ok(Self {
            decimal,
            groupe,
            masquer_decimales: false,
        })
    }

    const fn fixe(decimal: char, groupe: char) -> Self {
        Self {
            decimal,
            groupe: Some(groupe),
            masquer_decimales: false,
        }
    }

    pub fn avec_decimales_masquees(mut self, masquer: bool) -> Self {
        self.masquer_decimales = masquer;
        self
    }

    pub fn decimal(&self) -> char {
        self.decimal
    }

    /// Séparateur de milliers (' ' représente toute la famille des espaces).
    pub fn groupe(&self) -> Option<char> {
        self.groupe
    }

    pub fn est_decimal(&self, c: char) -> bool {
        c == self.decimal
    }

    pub fn est_groupe(&self, c: char) -> bool {
        match self.groupe {
            None => false,
            Some(' ') => ESPACES_GROUPE.contains(&c),
            Some(g) => c == g,
        }
    }

    /// Même caractère pour les deux rôles (ex: "dot-dot").
    pub fn est_ambigu(&self) -> bool {
        self.groupe == Some(self.decimal)
    }
}

/* ------------------------ Catalogue ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatNomme {
    CommaDot,
    DotComma,
    SpaceComma,
    SpaceDot,
    ApostropheDot,
    CommaDotIn,
    DotDot,
    CommaComma,
}

impl FormatNomme {
    pub const TOUS: [FormatNomme; 8] = [
        FormatNomme::CommaDot,
        FormatNomme::DotComma,
        FormatNomme::SpaceComma,
        FormatNomme::SpaceDot,
        FormatNomme::ApostropheDot,
        FormatNomme::CommaDotIn,
        FormatNomme::DotDot,
        FormatNomme::CommaComma,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FormatNomme::CommaDot => "comma-dot",
            FormatNomme::DotComma => "dot-comma",
            FormatNomme::SpaceComma => "space-comma",
            FormatNomme::SpaceDot => "space-dot",
            FormatNomme::ApostropheDot => "apostrophe-dot",
            FormatNomme::CommaDotIn => "comma-dot-in",
            FormatNomme::DotDot => "dot-dot",
            FormatNomme::CommaComma => "comma-comma",
        }
    }

    pub fn format(self) -> FormatNombre {
        match self {
            FormatNomme::CommaDot | FormatNomme::CommaDotIn => FormatNombre::fixe('.', ','),
            FormatNomme::DotComma => FormatNombre::fixe(',', '.'),
            FormatNomme::SpaceComma => FormatNombre::fixe(',', ' '),
            FormatNomme::SpaceDot => FormatNombre::fixe('.', ' '),
            FormatNomme::ApostropheDot => FormatNombre::fixe('.', '\''),
            FormatNomme::DotDot => FormatNombre::fixe('.', '.'),
            FormatNomme::CommaComma => FormatNombre::fixe(',', ','),
        }
    }
}

impl fmt::Display for FormatNomme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FormatNomme {
    type Err = ErreurFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FormatNomme::TOUS
            .into_iter()
            .find(|f| f.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ErreurFormat::Inconnu(s.to_string()))
    }
}

impl From<FormatNomme> for FormatNombre {
    fn from(f: FormatNomme) -> Self {
        f.format()
    }
}

/* ------------------------ Lecture (injectée) ------------------------ */

/// Fournit le format actif. Lu une fois par évaluation, jamais mis en cache.
pub trait SourceFormat {
    fn format_nombre(&self) -> FormatNombre;
}

impl SourceFormat for FormatNombre {
    fn format_nombre(&self) -> FormatNombre {
        *self
    }
}

impl SourceFormat for FormatNomme {
    fn format_nombre(&self) -> FormatNombre {
        self.format()
    }
}

impl<T: SourceFormat + ?Sized> SourceFormat for &T {
    fn format_nombre(&self) -> FormatNombre {
        (**self).format_nombre()
    }
}

/// Réglage partagé : l’UI écrit, le noyau lit un snapshot.
#[derive(Debug, Default)]
pub struct ReglageFormat {
    actif: RwLock<FormatNombre>,
}

impl ReglageFormat {
    pub fn new(format: FormatNombre) -> Self {
        Self {
            actif: RwLock::new(format),
        }
    }

    pub fn lire(&self) -> FormatNombre {
        // Un verrou empoisonné contient quand même un FormatNombre complet (Copy).
        *self.actif.read().unwrap_or_else(|p| p.into_inner())
    }

    pub fn definir(&self, format: FormatNombre) {
        let mut guard = self.actif.write().unwrap_or_else(|p| p.into_inner());
        *guard = format;
        tracing::debug!(decimal = %format.decimal, groupe = ?format.groupe, "format de nombre modifié");
    }
}

impl SourceFormat for ReglageFormat {
    fn format_nombre(&self) -> FormatNombre {
        self.lire()
    }
}
