//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, démarche,
//! format de nombre choisi) et offrir des opérations simples (C/CLR/AC).
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Le format choisi est écrit dans le réglage partagé ; le noyau le relit à chaque calcul.

use std::sync::Arc;

use crate::noyau::{FormatNombre, FormatNomme, ReglageFormat};

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Demarche {
    pub format: String,
    pub jetons: String,
    pub arbre: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // valeur affichée (séparateur décimal du format actif)
    pub erreur: String,   // message d’erreur (si parsing/éval échoue)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub format_choisi: FormatNomme,
    pub masquer_decimales: bool,
    pub reglage: Arc<ReglageFormat>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_reglage(Arc::new(ReglageFormat::default()))
    }
}

impl AppCalc {
    /// L’app part du format déjà présent dans le réglage (si un hôte l’a fixé).
    pub fn avec_reglage(reglage: Arc<ReglageFormat>) -> Self {
        let actif = reglage.lire();
        let format_choisi = FormatNomme::TOUS
            .into_iter()
            .find(|f| {
                let f = f.format();
                f.decimal() == actif.decimal() && f.groupe() == actif.groupe()
            })
            .unwrap_or(FormatNomme::CommaDot);

        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            format_choisi,
            masquer_decimales: actif.masquer_decimales,
            reglage,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats). Le format est conservé.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX : on CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran”
    /// sur une faute ; la démarche, elle, n’est plus fiable.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Format actif tel que le noyau le verra.
    pub fn format_actif(&self) -> FormatNombre {
        self.reglage.lire()
    }

    /// Change le format (et le publie dans le réglage partagé).
    pub fn choisir_format(&mut self, f: FormatNomme) {
        self.format_choisi = f;
        self.publier_format();
    }

    pub fn set_masquer_decimales(&mut self, masquer: bool) {
        self.masquer_decimales = masquer;
        self.publier_format();
    }

    fn publier_format(&mut self) {
        self.reglage.definir(
            FormatNombre::from(self.format_choisi).avec_decimales_masquees(self.masquer_decimales),
        );
        self.focus_entree = true;
    }
}
