#![forbid(unsafe_code)]
//! Rotaplan — bibliothèque de génération de rotas mensuels d'accueil (sans BD).
//!
//! - Énumération des jours ouvrés d'un mois cible.
//! - Attribution équitable par compteur de charge, égalités tirées au sort
//!   (générateur injecté, reproductible en test).
//! - Repli à deux politiques pour les créneaux front desk ; `UNASSIGNED`
//!   n'est jamais une erreur.
//! - Stockage fichiers (JSON/CSV) en périphérie, moteur pur au centre.

pub mod calendar;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;
pub mod summary;

pub use calendar::{all_dates_in_month, weekday_index, working_dates_in_month};
pub use model::{Role, Roster, Staff, StaffId};
pub use scheduler::{
    generate_rota, Assignment, FallbackPolicy, Rota, RotaOptions, RotaRow, SchedError, Scheduler,
    SlotKey,
};
pub use storage::{JsonStorage, Storage};
pub use summary::{render_summary, SummaryRenderer, TextSummary};
