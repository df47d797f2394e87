//! Calculatrice à formats régionaux.
//!
//! Le noyau (`noyau`) est une fonction pure de (entrée, format de nombre actif) ;
//! l’interface egui (`app`) n’en est qu’un client.

pub mod app;
pub mod noyau;

pub use noyau::{evaluer, ErreurCalc, FormatNombre, FormatNomme, ReglageFormat};
