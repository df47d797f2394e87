//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : une même expression écrite dans deux formats donne le MÊME f64 (bit à bit)

use std::time::{Duration, Instant};

use super::erreur::TypeErreur;
use super::eval::eval_expression;
use super::format_nombre::{FormatNombre, FormatNomme};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

/// Nombre logique : chiffres entiers + fraction éventuelle.
#[derive(Clone, Debug)]
struct Nombre {
    entier: String,
    fraction: Option<String>,
}

fn gen_nombre(rng: &mut Rng) -> Nombre {
    let n_chiffres = 1 + rng.pick(8) as usize;
    let mut entier = String::new();
    for i in 0..n_chiffres {
        let d = if i == 0 { 1 + rng.pick(9) } else { rng.pick(10) };
        entier.push(char::from(b'0' + d as u8));
    }

    let fraction = if rng.coin() {
        let n = 1 + rng.pick(3);
        Some((0..n).map(|_| char::from(b'0' + rng.pick(10) as u8)).collect::<String>())
    } else {
        None
    };

    Nombre { entier, fraction }
}

/// Écrit le nombre dans un format, avec milliers (toujours lisible sans ambiguïté).
fn ecrire(n: &Nombre, format: &FormatNombre) -> String {
    let mut out = String::new();
    for (i, c) in n.entier.chars().enumerate() {
        let reste = n.entier.len() - i;
        if i > 0 && reste % 3 == 0 {
            if let Some(g) = format.groupe() {
                out.push(g);
            }
        }
        out.push(c);
    }
    match &n.fraction {
        Some(fr) => {
            out.push(format.decimal());
            out.push_str(fr);
        }
        None if format.est_ambigu() => out.push(format.decimal()),
        None => {}
    }
    out
}

/// Arbre logique, rendu plus tard dans un format donné.
#[derive(Clone, Debug)]
enum Gen {
    Num(Nombre),
    Neg(Box<Gen>),
    Bin(char, Box<Gen>, Box<Gen>),
    Par(Box<Gen>),
}

fn gen_expr(rng: &mut Rng, depth: usize) -> Gen {
    if depth == 0 {
        return Gen::Num(gen_nombre(rng));
    }

    match rng.pick(8) {
        0 | 1 => Gen::Num(gen_nombre(rng)),
        2 => Gen::Neg(Box::new(gen_expr(rng, depth - 1))),
        3 => Gen::Par(Box::new(gen_expr(rng, depth - 1))),
        k => {
            let op = ['+', '-', '*', '/'][(k - 4) as usize];
            // '^' rare : évite les débordements massifs
            let op = if rng.pick(10) == 0 { '^' } else { op };
            Gen::Bin(
                op,
                Box::new(gen_expr(rng, depth - 1)),
                Box::new(gen_expr(rng, depth - 1)),
            )
        }
    }
}

fn rendre(g: &Gen, format: &FormatNombre) -> String {
    match g {
        Gen::Num(n) => ecrire(n, format),
        Gen::Neg(x) => format!("-({})", rendre(x, format)),
        Gen::Bin(op, a, b) => format!("({} {op} {})", rendre(a, format), rendre(b, format)),
        Gen::Par(x) => format!("({})", rendre(x, format)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_agnostique_au_format() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let reference = FormatNomme::CommaDot.format();

    for _ in 0..150 {
        budget(t0, max);

        let g = gen_expr(&mut rng, 5);
        let s_ref = rendre(&g, &reference);
        let v_ref = eval_expression(&s_ref, &reference)
            .unwrap_or_else(|e| panic!("expr={s_ref:?} err={e}"));

        for f in FormatNomme::TOUS {
            let format = f.format();
            let s = rendre(&g, &format);
            let v = eval_expression(&s, &format)
                .unwrap_or_else(|e| panic!("[{f}] expr={s:?} err={e}"));
            assert_eq!(
                v.to_bits(),
                v_ref.to_bits(),
                "[{f}] {s:?} = {v} mais {s_ref:?} = {v_ref}"
            );
        }
    }
}

#[test]
fn fuzz_safe_soupe_de_caracteres() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let alphabet: Vec<char> = "0123456789.,' +-*/^()x#\u{a0}".chars().collect();
    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let len = rng.pick(16) as usize;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        for f in FormatNomme::TOUS {
            let format = f.format();
            let a = eval_expression(&s, &format);
            // déterminisme : même entrée, même format => même sortie
            let b = eval_expression(&s, &format);
            assert_eq!(
                a.as_ref().map(|v| v.to_bits()),
                b.as_ref().map(|v| v.to_bits()),
                "[{f}] {s:?}"
            );

            match a {
                Ok(_) => seen_ok += 1,
                Err(e) => {
                    assert_ne!(e.kind(), TypeErreur::TooDeep, "[{f}] {s:?}");
                    seen_err += 1;
                }
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1,5", 800);
    let v = eval_expression(&expr, &FormatNomme::DotComma.format())
        .unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800 * 1,5 = 1200
    assert_eq!(v, 1200.0);
}
