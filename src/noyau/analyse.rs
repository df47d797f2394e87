// src/noyau/analyse.rs
//
// Descente récursive (priorités, de la plus faible à la plus forte) :
//
//   expr    := term (('+' | '-') term)*
//   term    := power (('*' | '/') power)*
//   power   := unary ('^' power)?          // associatif à droite
//   unary   := '-' unary | primary
//   primary := Num | '(' expr ')'
//
// Les jetons sont tirés un par un de l’itérateur paresseux (un seul jeton d’avance).
// Première erreur => arrêt (pas de résultat partiel).

use super::erreur::{ErreurCalc, Result};
use super::expr::Expr;
use super::format_nombre::FormatNombre;
use super::jetons::{Jetons, Op, Tok};

/// Garde-fou : niveaux de descente. `power` et `unary` comptent chacun un niveau,
/// donc une parenthèse en coûte deux (127 parenthèses imbriquées au plus).
pub const PROFONDEUR_MAX: usize = 256;

/// Analyse une entrée complète en AST.
pub fn analyser(src: &str, format: &FormatNombre) -> Result<Expr> {
    let mut a = Analyseur::new(src, *format)?;

    if a.tok == Tok::Fin {
        return Err(ErreurCalc::EntreeVide);
    }

    let e = a.expr()?;

    match a.tok {
        Tok::Fin => Ok(e),
        Tok::RPar => Err(ErreurCalc::ParentheseOrpheline { pos: a.pos }),
        _ => Err(ErreurCalc::ResteNonLu { pos: a.pos }),
    }
}

struct Analyseur<'a> {
    jetons: Jetons<'a>,
    // jeton courant + sa position
    tok: Tok,
    pos: usize,
    profondeur: usize,
}

impl<'a> Analyseur<'a> {
    fn new(src: &'a str, format: FormatNombre) -> Result<Self> {
        let mut a = Self {
            jetons: Jetons::new(src, format),
            tok: Tok::Fin,
            pos: 0,
            profondeur: 0,
        };
        a.avancer()?;
        Ok(a)
    }

    fn avancer(&mut self) -> Result<()> {
        match self.jetons.next() {
            Some(r) => {
                let (pos, tok) = r?;
                self.pos = pos;
                self.tok = tok;
            }
            // l’itérateur est épuisé après Fin : on reste sur Fin
            None => self.tok = Tok::Fin,
        }
        Ok(())
    }

    fn op_courant(&self, admis: &[Op]) -> Option<Op> {
        match self.tok {
            Tok::Op(op) if admis.contains(&op) => Some(op),
            _ => None,
        }
    }

    fn imbrique<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.profondeur >= PROFONDEUR_MAX {
            return Err(ErreurCalc::TropImbrique {
                max: PROFONDEUR_MAX,
            });
        }
        self.profondeur += 1;
        let r = f(self);
        self.profondeur -= 1;
        r
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut gauche = self.term()?;
        while let Some(op) = self.op_courant(&[Op::Plus, Op::Minus]) {
            self.avancer()?;
            let droite = self.term()?;
            gauche = Expr::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut gauche = self.power()?;
        while let Some(op) = self.op_courant(&[Op::Star, Op::Slash]) {
            self.avancer()?;
            let droite = self.power()?;
            gauche = Expr::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn power(&mut self) -> Result<Expr> {
        self.imbrique(|a| {
            let base = a.unary()?;
            if a.op_courant(&[Op::Caret]).is_none() {
                return Ok(base);
            }
            a.avancer()?;
            let exposant = a.power()?;
            Ok(Expr::binaire(Op::Caret, base, exposant))
        })
    }

    fn unary(&mut self) -> Result<Expr> {
        self.imbrique(|a| {
            if a.op_courant(&[Op::Minus]).is_some() {
                a.avancer()?;
                return Ok(Expr::neg(a.unary()?));
            }
            a.primary()
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.tok {
            Tok::Num(v) => {
                self.avancer()?;
                Ok(Expr::Lit(v))
            }
            Tok::LPar => {
                let ouvrante = self.pos;
                self.avancer()?;
                let e = self.expr()?;
                match self.tok {
                    Tok::RPar => {
                        self.avancer()?;
                        Ok(e)
                    }
                    Tok::Fin => Err(ErreurCalc::ParentheseOrpheline { pos: ouvrante }),
                    _ => Err(ErreurCalc::ResteNonLu { pos: self.pos }),
                }
            }
            tok => Err(ErreurCalc::JetonInattendu {
                jeton: tok.to_string(),
                pos: self.pos,
            }),
        }
    }
}
