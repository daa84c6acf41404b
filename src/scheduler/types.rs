use crate::model::{Role, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Clés de créneau d'une journée, déclarées dans l'ordre de résolution
/// du moteur (l'ordre `Ord` dérive de l'ordre de déclaration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotKey {
    #[serde(rename = "HS_Front_AM")]
    HsFrontAm,
    #[serde(rename = "HS_Front_PM")]
    HsFrontPm,
    #[serde(rename = "LS_Front_AM")]
    LsFrontAm,
    #[serde(rename = "LS_Front_PM")]
    LsFrontPm,
    #[serde(rename = "LibChat_AM")]
    LibChatAm,
    #[serde(rename = "LibChat_PM")]
    LibChatPm,
    #[serde(rename = "Phones_AM1")]
    PhonesAm1,
    #[serde(rename = "Phones_AM2")]
    PhonesAm2,
    #[serde(rename = "Phones_PM1")]
    PhonesPm1,
    #[serde(rename = "Phones_PM2")]
    PhonesPm2,
}

impl SlotKey {
    pub const ALL: [SlotKey; 10] = [
        SlotKey::HsFrontAm,
        SlotKey::HsFrontPm,
        SlotKey::LsFrontAm,
        SlotKey::LsFrontPm,
        SlotKey::LibChatAm,
        SlotKey::LibChatPm,
        SlotKey::PhonesAm1,
        SlotKey::PhonesAm2,
        SlotKey::PhonesPm1,
        SlotKey::PhonesPm2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKey::HsFrontAm => "HS_Front_AM",
            SlotKey::HsFrontPm => "HS_Front_PM",
            SlotKey::LsFrontAm => "LS_Front_AM",
            SlotKey::LsFrontPm => "LS_Front_PM",
            SlotKey::LibChatAm => "LibChat_AM",
            SlotKey::LibChatPm => "LibChat_PM",
            SlotKey::PhonesAm1 => "Phones_AM1",
            SlotKey::PhonesAm2 => "Phones_AM2",
            SlotKey::PhonesPm1 => "Phones_PM1",
            SlotKey::PhonesPm2 => "Phones_PM2",
        }
    }

    /// Rôle requis par la passe primaire, `None` pour les créneaux ouverts
    /// (chat et téléphone, sans restriction de site).
    pub fn required_role(self) -> Option<Role> {
        match self {
            SlotKey::HsFrontAm | SlotKey::HsFrontPm => Some(Role::HealthSciencesFrontDesk),
            SlotKey::LsFrontAm | SlotKey::LsFrontPm => Some(Role::LifeSciencesFrontDesk),
            _ => None,
        }
    }

    /// Créneau front desk d'après-midi, fermé le vendredi (demi-journée).
    pub fn front_pm(self) -> bool {
        matches!(self, SlotKey::HsFrontPm | SlotKey::LsFrontPm)
    }
}

/// Résultat résolu d'un créneau. La distinction primaire/repli est portée
/// par le flag structuré, jamais par un marqueur dans une chaîne.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assignment {
    Staffed { staff: StaffId, fallback: bool },
    Closed,
    Unassigned,
}

impl Assignment {
    pub fn staff_id(&self) -> Option<&StaffId> {
        match self {
            Assignment::Staffed { staff, .. } => Some(staff),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Assignment::Staffed { fallback: true, .. })
    }
}

/// Une journée ouvrée résolue : une valeur par clé de créneau.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotaRow {
    pub date: NaiveDate,
    pub slots: BTreeMap<SlotKey, Assignment>,
}

impl RotaRow {
    pub fn get(&self, key: SlotKey) -> &Assignment {
        &self.slots[&key]
    }
}

/// Rota complet d'un mois : lignes ordonnées + photo finale des compteurs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rota {
    pub rows: Vec<RotaRow>,
    pub totals: BTreeMap<StaffId, u32>,
}

impl Rota {
    /// Nombre de créneaux restés sans candidat (suivi manuel attendu).
    pub fn unassigned_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.slots.values())
            .filter(|a| matches!(a, Assignment::Unassigned))
            .count()
    }
}

/// Politique de repli quand la passe primaire front desk ne donne personne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Repli sur le personnel `Other` uniquement (couverture hors site).
    #[default]
    Generalist,
    /// Repli sur le même rôle, sans la règle d'exclusivité AM/PM.
    Dedicated,
}

/// Options de génération
#[derive(Debug, Clone, Copy, Default)]
pub struct RotaOptions {
    pub fallback: FallbackPolicy,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("not a working day: {0}")]
    NotAWorkingDay(NaiveDate),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
