//! Noyau arithmétique à formats régionaux
//!
//! Organisation interne :
//! - format_nombre.rs : séparateurs (décimal / milliers), catalogue, réglage partagé
//! - litteral.rs      : normalisation d’un littéral selon le format actif
//! - jetons.rs        : tokenisation paresseuse
//! - analyse.rs       : descente récursive -> Expr
//! - expr.rs          : AST flottant + évaluation
//! - erreur.rs        : taxonomie des erreurs
//! - eval.rs          : pipeline complet

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format_nombre;
pub mod jetons;
pub mod litteral;

#[cfg(test)]
mod tests_formats;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalc, Result, TypeErreur};
pub use eval::{eval_avec_demarche, eval_expression, evaluer, DemarcheNoyau};
pub use format_nombre::{ErreurFormat, FormatNombre, FormatNomme, ReglageFormat, SourceFormat};
