use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use uuid::Uuid;

/// Nombre de jours ouvrés par semaine (lundi=0 .. vendredi=4).
pub const WEEKDAYS: u8 = 5;

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rôle d'un membre du personnel. Les deux rôles "front desk" sont
/// restreints aux jours de présence sur site ; `Other` couvre le personnel
/// hors site, disponible tous les jours ouvrés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    HealthSciencesFrontDesk,
    LifeSciencesFrontDesk,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HealthSciencesFrontDesk => "Health Sciences Front Desk",
            Role::LifeSciencesFrontDesk => "Life Sciences Front Desk",
            Role::Other => "Other",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "health sciences front desk" | "health_sciences_front_desk" | "hs" => {
                Ok(Role::HealthSciencesFrontDesk)
            }
            "life sciences front desk" | "life_sciences_front_desk" | "ls" => {
                Ok(Role::LifeSciencesFrontDesk)
            }
            "other" => Ok(Role::Other),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Membre du personnel (roster d'accueil)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: Role,
    /// Jours de présence sur site, indices lundi=0 .. vendredi=4.
    /// Ignoré pour `Role::Other` (disponibilité complète supposée).
    #[serde(default)]
    pub office_days: BTreeSet<u8>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub holidays: BTreeSet<NaiveDate>,
    /// Compteur d'équité : total de créneaux attribués sur le run courant.
    #[serde(default)]
    pub shift_count: u32,
    /// Dates déjà couvertes en front desk (passe primaire uniquement).
    /// État transitoire d'un run, jamais persisté.
    #[serde(skip)]
    pub front_assigned: BTreeSet<NaiveDate>,
}

impl Staff {
    pub fn new<N: Into<String>>(name: N, role: Role) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            role,
            office_days: BTreeSet::new(),
            holidays: BTreeSet::new(),
            shift_count: 0,
            front_assigned: BTreeSet::new(),
        }
    }

    /// Vrai si la personne n'est pas en congé ce jour-là.
    pub fn available_on(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date)
    }

    /// Vrai si la personne est sur site pour l'indice de jour donné.
    /// Le rôle `Other` est hors site et réputé toujours joignable.
    pub fn on_site(&self, weekday: u8) -> bool {
        matches!(self.role, Role::Other) || self.office_days.contains(&weekday)
    }
}

/// Roster complet : personnel + jours de fermeture de l'organisation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub closures: BTreeSet<NaiveDate>,
}

impl Roster {
    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.name == name)
    }
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_staff_mut_by_id(&mut self, id: &StaffId) -> Option<&mut Staff> {
        self.staff.iter_mut().find(|s| &s.id == id)
    }

    /// Remet à zéro les compteurs d'équité et l'état transitoire front desk.
    pub fn reset_counters(&mut self) {
        for s in &mut self.staff {
            s.shift_count = 0;
            s.front_assigned.clear();
        }
    }

    /// Rejette les entrées malformées avant toute génération.
    pub fn validate(&self) -> Result<()> {
        for s in &self.staff {
            if s.name.trim().is_empty() {
                bail!("staff entry with empty name");
            }
            if let Some(day) = s.office_days.iter().find(|d| **d >= WEEKDAYS) {
                bail!(
                    "invalid office day {} for staff {}: expected 0..={}",
                    day,
                    s.name,
                    WEEKDAYS - 1
                );
            }
        }
        Ok(())
    }
}
