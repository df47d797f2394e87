// src/noyau/expr.rs
//
// AST flottant.
// - Lit : littéral déjà normalisé (f64)
// - Neg : moins unaire
// - Add/Sub/Mul/Div/Pow : binaires
//
// Chaque nœud possède ses enfants (Box), l’arbre est jeté après évaluation.
// Arithmétique IEEE-754 : x/0 => ±inf, 0/0 => NaN, aucune erreur levée ici.

use std::fmt;

use super::jetons::Op;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Lit(f64),
    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>), // a^b (flottant, exposants fractionnaires/négatifs permis)
}

impl Expr {
    /// Construit le nœud binaire correspondant à `op`.
    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        let (a, b) = (Box::new(a), Box::new(b));
        match op {
            Op::Plus => Expr::Add(a, b),
            Op::Minus => Expr::Sub(a, b),
            Op::Star => Expr::Mul(a, b),
            Op::Slash => Expr::Div(a, b),
            Op::Caret => Expr::Pow(a, b),
        }
    }

    pub fn neg(e: Expr) -> Expr {
        Expr::Neg(Box::new(e))
    }

    /// Évaluation directe. Aucun arrondi : l’affichage est l’affaire de l’appelant.
    pub fn evaluer(&self) -> f64 {
        use Expr::*;

        match self {
            Lit(v) => *v,
            Neg(x) => -x.evaluer(),
            Add(a, b) => a.evaluer() + b.evaluer(),
            Sub(a, b) => a.evaluer() - b.evaluer(),
            Mul(a, b) => a.evaluer() * b.evaluer(),
            Div(a, b) => a.evaluer() / b.evaluer(),
            Pow(a, b) => a.evaluer().powf(b.evaluer()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Lit(v) => write!(f, "{v}"),
            Neg(x) => write!(f, "-{x}"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
        }
    }
}
