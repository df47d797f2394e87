//! Noyau — évaluation (pipeline réel)
//!
//! format actif (lu une fois) -> jetons (littéraux normalisés au vol)
//!        -> descente récursive -> Expr -> f64
//!
//! Fonction pure de (entrée, format) : rien n’est retenu d’un appel à l’autre.
//! Division par zéro : sémantique flottante (±inf / NaN), jamais une erreur.

use super::analyse::analyser;
use super::erreur::Result;
use super::format_nombre::{FormatNombre, SourceFormat};
use super::jetons::{format_tokens, tokenize};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub format: String,
    pub jetons: String,
    pub arbre: String,
}

/// API publique : lit le format actif auprès de `source`, puis évalue.
///
/// ```
/// use calculatrice_formats::noyau::{evaluer, FormatNomme, ReglageFormat};
///
/// let reglage = ReglageFormat::new(FormatNomme::DotComma.format());
/// assert_eq!(evaluer("1.234,5 * 2", &reglage), Ok(2469.0));
/// ```
pub fn evaluer<S: SourceFormat + ?Sized>(entree: &str, source: &S) -> Result<f64> {
    let format = source.format_nombre();
    eval_expression(entree, &format)
}

/// Évalue sous un format explicite.
pub fn eval_expression(entree: &str, format: &FormatNombre) -> Result<f64> {
    match analyser(entree, format) {
        Ok(expr) => {
            let v = expr.evaluer();
            tracing::debug!(entree, valeur = v, "évaluation réussie");
            Ok(v)
        }
        Err(e) => {
            tracing::debug!(entree, erreur = %e, "évaluation refusée");
            Err(e)
        }
    }
}

/// Variante pour l’UI : valeur + démarche (jetons, arbre).
pub fn eval_avec_demarche(entree: &str, format: &FormatNombre) -> Result<(f64, DemarcheNoyau)> {
    // analyse d'abord : la première erreur rencontrée est celle d'`eval_expression`
    let expr = analyser(entree, format)?;
    let jetons = tokenize(entree, format)?;
    let v = expr.evaluer();

    let d = DemarcheNoyau {
        format: format!(
            "décimal '{}', milliers {}",
            format.decimal(),
            match format.groupe() {
                Some(' ') => "espace".to_string(),
                Some(g) => format!("'{g}'"),
                None => "aucun".to_string(),
            }
        ),
        jetons: format_tokens(&jetons),
        arbre: expr.to_string(),
    };

    Ok((v, d))
}
