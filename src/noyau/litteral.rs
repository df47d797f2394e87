// src/noyau/litteral.rs
//
// Normalisation d’un littéral numérique selon le format actif.
//
// Entrée : une “course” capturée par le tokenizer (chiffres + séparateurs,
//          signe '-' éventuel en tête), ex: "1,234.56", "1.234.567", "1 234,5".
// Sortie : forme canonique "[-]chiffres[.chiffres]" lisible par str::parse::<f64>.
//
// Règles :
// - tout séparateur de milliers est supprimé ;
// - si milliers == décimal (format ambigu), seule la DERNIÈRE occurrence est décimale ;
// - sinon le séparateur décimal doit être unique ;
// - la partie fractionnaire ne contient que des chiffres ("1.234," => 1234) ;
// - aucun chiffre => littéral mal formé.

use super::erreur::{ErreurCalc, Result};
use super::format_nombre::FormatNombre;

/// Réécrit `brut` en forme canonique.
pub fn normaliser(brut: &str, format: &FormatNombre) -> Result<String> {
    let (negatif, corps) = match brut.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, brut),
    };

    if let Some(c) = corps
        .chars()
        .find(|&c| !c.is_ascii_digit() && !format.est_decimal(c) && !format.est_groupe(c))
    {
        tracing::trace!(litteral = brut, %c, "caractère hors format");
        return Err(ErreurCalc::malforme(brut, "caractère étranger au format actif"));
    }

    if !corps.chars().any(|c| c.is_ascii_digit()) {
        return Err(ErreurCalc::malforme(brut, "aucun chiffre"));
    }

    let virgule = position_decimale(brut, corps, format)?;

    let (entier_brut, fraction) = match virgule {
        Some(i) => (&corps[..i], &corps[i + format.decimal().len_utf8()..]),
        None => (corps, ""),
    };

    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(ErreurCalc::malforme(
            brut,
            "séparateur de milliers après le séparateur décimal",
        ));
    }

    let entier: String = entier_brut.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::with_capacity(entier.len() + fraction.len() + 3);
    if negatif {
        out.push('-');
    }
    if entier.is_empty() {
        out.push('0');
    } else {
        out.push_str(&entier);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }

    tracing::trace!(litteral = brut, canonique = %out, "littéral normalisé");
    Ok(out)
}

/// Normalise puis lit la valeur flottante.
pub fn valeur(brut: &str, format: &FormatNombre) -> Result<f64> {
    let canon = normaliser(brut, format)?;
    canon
        .parse::<f64>()
        .map_err(|_| ErreurCalc::malforme(brut, "forme canonique illisible"))
}

/// Indice (en octets, dans `corps`) du séparateur décimal retenu.
fn position_decimale(brut: &str, corps: &str, format: &FormatNombre) -> Result<Option<usize>> {
    let d = format.decimal();

    if format.est_ambigu() {
        return Ok(corps.rfind(d));
    }

    let mut occurrences = corps.match_indices(d).map(|(i, _)| i);
    let premiere = occurrences.next();
    if occurrences.next().is_some() {
        return Err(ErreurCalc::malforme(brut, "séparateur décimal répété"));
    }
    Ok(premiere)
}
