//! Tests formats : même valeur logique, écritures régionales différentes.
//!
//! - chaque format du catalogue relit ses propres littéraux à l’identique ;
//! - cas de référence par format (3, 2, 1, 0 décimales) ;
//! - un littéral écrit pour un autre format est refusé, pas réinterprété en silence.

use super::erreur::TypeErreur;
use super::eval::eval_expression;
use super::format_nombre::{FormatNombre, FormatNomme};

fn eval_sous(f: FormatNomme, s: &str) -> f64 {
    eval_expression(s, &f.format()).unwrap_or_else(|e| panic!("[{f}] expr={s:?} err={e}"))
}

/// Écrit `entier` (chiffres) + `fraction` selon le format.
/// Format ambigu sans fraction : décimal final pour que les milliers restent des milliers.
fn ecrire(format: &FormatNombre, entier: &str, fraction: Option<&str>) -> String {
    let groupe = format.groupe();
    let mut out = String::new();

    for (i, c) in entier.chars().enumerate() {
        let reste = entier.len() - i;
        if i > 0 && reste % 3 == 0 {
            if let Some(g) = groupe {
                out.push(g);
            }
        }
        out.push(c);
    }

    match fraction {
        Some(fr) => {
            out.push(format.decimal());
            out.push_str(fr);
        }
        None if format.est_ambigu() && out.contains(format.decimal()) => out.push(format.decimal()),
        None => {}
    }
    out
}

#[test]
fn chaque_format_relit_ses_litteraux() {
    let cas: [(&str, Option<&str>, f64); 6] = [
        ("1234567", None, 1234567.0),
        ("1234", Some("56"), 1234.56),
        ("1234", Some("5"), 1234.5),
        ("1234", Some(""), 1234.0),
        ("12", Some("75"), 12.75),
        ("0", Some("125"), 0.125),
    ];

    for f in FormatNomme::TOUS {
        let format = f.format();
        for (entier, fraction, attendu) in cas {
            let s = ecrire(&format, entier, fraction);
            assert_eq!(eval_sous(f, &s), attendu, "[{f}] littéral {s:?}");
        }
    }
}

#[test]
fn cas_de_reference_par_format() {
    let table: [(FormatNomme, [(&str, f64); 4]); 6] = [
        (
            FormatNomme::DotComma,
            [("1.234.567", 1234567.0), ("1.234,56", 1234.56), ("1.234,5", 1234.5), ("1.234,", 1234.0)],
        ),
        (
            FormatNomme::CommaDot,
            [("1,234,567", 1234567.0), ("1,234.56", 1234.56), ("1,234.5", 1234.5), ("1,234.", 1234.0)],
        ),
        (
            FormatNomme::SpaceComma,
            [("1 234 567", 1234567.0), ("1 234,56", 1234.56), ("1 234,5", 1234.5), ("1 234,", 1234.0)],
        ),
        (
            FormatNomme::SpaceDot,
            [("1 234 567", 1234567.0), ("1 234.56", 1234.56), ("1 234.5", 1234.5), ("1 234.", 1234.0)],
        ),
        (
            FormatNomme::DotDot,
            [("1.234.567.", 1234567.0), ("1.234.56", 1234.56), ("1.234.5", 1234.5), ("1.234.", 1234.0)],
        ),
        (
            FormatNomme::CommaComma,
            [("1,234,567,", 1234567.0), ("1,234,56", 1234.56), ("1,234,5", 1234.5), ("1,234,", 1234.0)],
        ),
    ];

    for (f, cas) in table {
        for (s, attendu) in cas {
            assert_eq!(eval_sous(f, s), attendu, "[{f}] {s:?}");
        }
    }
}

#[test]
fn format_ambigu_derniere_occurrence_decimale() {
    assert_eq!(eval_sous(FormatNomme::DotDot, "1.234.567"), 1234.567);
    assert_eq!(eval_sous(FormatNomme::CommaComma, "1,234,567"), 1234.567);
}

#[test]
fn espaces_insecables() {
    assert_eq!(eval_sous(FormatNomme::SpaceComma, "1\u{a0}234,5 + 1\u{202f}000"), 2234.5);
}

#[test]
fn apostrophe_et_indien() {
    assert_eq!(eval_sous(FormatNomme::ApostropheDot, "1'234'567.5"), 1234567.5);
    assert_eq!(eval_sous(FormatNomme::CommaDotIn, "12,34,567.5"), 1234567.5);
}

#[test]
fn litteral_d_un_autre_format_refuse() {
    let refuse = |f: FormatNomme, s: &str| {
        eval_expression(s, &f.format())
            .map_err(|e| e.kind())
            .expect_err(&format!("[{f}] {s:?} aurait dû échouer"))
    };

    assert_eq!(refuse(FormatNomme::CommaDot, "1.234,56"), TypeErreur::MalformedLiteral);
    assert_eq!(refuse(FormatNomme::DotComma, "1,234.56"), TypeErreur::MalformedLiteral);
    assert_eq!(refuse(FormatNomme::DotComma, "1'234"), TypeErreur::UnexpectedCharacter);
}

#[test]
fn expressions_completes_sous_format_europeen() {
    assert_eq!(eval_sous(FormatNomme::DotComma, "(1.000,5 + 999,5) * 2"), 4000.0);
    assert_eq!(eval_sous(FormatNomme::DotComma, "10 + -4,5"), 5.5);
    assert_eq!(eval_sous(FormatNomme::SpaceComma, "1 000 - 1 000"), 0.0);
}

#[test]
fn idempotence() {
    let format = FormatNomme::DotComma.format();
    let a = eval_expression("1.234,56 / 7 ^ 0,5", &format);
    let b = eval_expression("1.234,56 / 7 ^ 0,5", &format);
    assert_eq!(a.map(f64::to_bits), b.map(f64::to_bits));
}
