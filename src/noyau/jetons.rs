// src/noyau/jetons.rs
//
// Tokenisation paresseuse.
// - Jetons : itérateur fini, non redémarrable, terminé par Tok::Fin.
// - Les nombres sont capturés en “course” (chiffres + séparateurs du format actif)
//   puis normalisés par litteral.rs.
// - Espaces hors nombres : ignorés.
// - Premier caractère inconnu : erreur, puis l’itérateur s’arrête.

use std::fmt;

use super::erreur::{ErreurCalc, Result};
use super::format_nombre::FormatNombre;
use super::litteral;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
            Op::Caret => '^',
        }
    }

    fn depuis(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            '^' => Some(Op::Caret),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Op),
    LPar,
    RPar,
    Fin,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Op(op) => write!(f, "{op}"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Fin => f.write_str("fin"),
        }
    }
}

/// Itérateur de jetons : `(position en octets, jeton)`.
pub struct Jetons<'a> {
    src: &'a str,
    pos: usize,
    format: FormatNombre,
    // vrai au début, après un opérateur ou '(' : un '-' y est un signe.
    attend_valeur: bool,
    fini: bool,
}

impl<'a> Jetons<'a> {
    pub fn new(src: &'a str, format: FormatNombre) -> Self {
        Self {
            src,
            pos: 0,
            format,
            attend_valeur: true,
            fini: false,
        }
    }

    fn car(&self, i: usize) -> Option<char> {
        self.src.get(i..).and_then(|s| s.chars().next())
    }

    /// Caractère qui suit celui situé à l’octet `i`.
    fn car_apres(&self, i: usize) -> Option<char> {
        let c = self.car(i)?;
        self.car(i + c.len_utf8())
    }

    fn debut_litteral(&self, i: usize) -> bool {
        match self.car(i) {
            Some(c) if c.is_ascii_digit() => true,
            Some(c) if self.format.est_decimal(c) => {
                matches!(self.car_apres(i), Some(n) if n.is_ascii_digit())
            }
            _ => false,
        }
    }

    /// Capture la course maximale à partir de `self.pos` (signe éventuel compris).
    fn course(&mut self) -> &'a str {
        let debut = self.pos;
        if self.car(self.pos) == Some('-') {
            self.pos += 1;
        }

        while let Some(c) = self.car(self.pos) {
            let prend = if c.is_ascii_digit() || self.format.est_decimal(c) {
                true
            } else if self.format.est_groupe(c) {
                // un séparateur de milliers n’appartient au nombre que s’il précède un chiffre
                matches!(self.car_apres(self.pos), Some(n) if n.is_ascii_digit())
            } else {
                false
            };

            if !prend {
                break;
            }
            self.pos += c.len_utf8();
        }

        &self.src[debut..self.pos]
    }

    fn echec(&mut self, e: ErreurCalc) -> Option<Result<(usize, Tok)>> {
        self.fini = true;
        Some(Err(e))
    }
}

impl Iterator for Jetons<'_> {
    type Item = Result<(usize, Tok)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fini {
            return None;
        }

        while let Some(c) = self.car(self.pos) {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }

        let debut = self.pos;
        let Some(c) = self.car(debut) else {
            self.fini = true;
            return Some(Ok((debut, Tok::Fin)));
        };

        let signe = c == '-' && self.attend_valeur && self.debut_litteral(debut + 1);

        if signe || self.debut_litteral(debut) {
            let brut = self.course();
            return match litteral::valeur(brut, &self.format) {
                Ok(v) => {
                    self.attend_valeur = false;
                    Some(Ok((debut, Tok::Num(v))))
                }
                Err(e) => self.echec(e),
            };
        }

        let tok = match c {
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => match Op::depuis(c) {
                Some(op) => Tok::Op(op),
                None => return self.echec(ErreurCalc::CaractereInattendu { c, pos: debut }),
            },
        };

        self.pos += c.len_utf8();
        self.attend_valeur = !matches!(tok, Tok::RPar);
        Some(Ok((debut, tok)))
    }
}

/// Tokenise toute l’entrée (Tok::Fin inclus).
pub fn tokenize(s: &str, format: &FormatNombre) -> Result<Vec<Tok>> {
    Jetons::new(s, *format).map(|r| r.map(|(_, t)| t)).collect()
}

/// Format utilitaire (“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .filter(|t| !matches!(t, Tok::Fin))
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
