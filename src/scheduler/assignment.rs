use super::types::{Assignment, FallbackPolicy, RotaOptions, SlotKey};
use super::util;
use crate::calendar::weekday_index;
use crate::model::{Role, Roster};
use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeMap;

const FRIDAY: u8 = 4;

/// Résout une journée ouvrée complète, clés dans l'ordre fixe de `SlotKey`.
/// Chaque résolution incrémente les compteurs partagés et influence donc
/// les choix suivants de la même journée.
pub(super) fn resolve_day<R: Rng>(
    roster: &mut Roster,
    date: NaiveDate,
    opts: RotaOptions,
    rng: &mut R,
) -> BTreeMap<SlotKey, Assignment> {
    let closed = roster.closures.contains(&date);
    let friday = weekday_index(date) == FRIDAY;

    let mut slots = BTreeMap::new();
    for key in SlotKey::ALL {
        let resolved = if closed || (friday && key.front_pm()) {
            Assignment::Closed
        } else if let Some(role) = key.required_role() {
            resolve_restricted(roster, date, role, opts.fallback, rng)
        } else {
            resolve_open(roster, date, rng)
        };
        slots.insert(key, resolved);
    }
    slots
}

/// Créneau front desk : passe primaire (rôle + jour de présence + congés +
/// exclusivité AM/PM), puis tier de repli selon la politique choisie.
fn resolve_restricted<R: Rng>(
    roster: &mut Roster,
    date: NaiveDate,
    role: Role,
    policy: FallbackPolicy,
    rng: &mut R,
) -> Assignment {
    let weekday = weekday_index(date);

    let primary: Vec<usize> = roster
        .staff
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            s.role == role
                && s.on_site(weekday)
                && s.available_on(date)
                && !s.front_assigned.contains(&date)
        })
        .map(|(i, _)| i)
        .collect();

    if let Some(idx) = util::pick_min_count(&roster.staff, &primary, rng) {
        let s = &mut roster.staff[idx];
        s.front_assigned.insert(date);
        s.shift_count += 1;
        return Assignment::Staffed {
            staff: s.id.clone(),
            fallback: false,
        };
    }

    let relaxed: Vec<usize> = match policy {
        // Couverture générale : personnel hors site, congés seuls filtrés.
        FallbackPolicy::Generalist => roster
            .staff
            .iter()
            .enumerate()
            .filter(|(_, s)| s.role == Role::Other && s.available_on(date))
            .map(|(i, _)| i)
            .collect(),
        // Même rôle, mêmes filtres, sans l'exclusivité AM/PM : une personne
        // déjà prise le matin peut reprendre l'après-midi.
        FallbackPolicy::Dedicated => roster
            .staff
            .iter()
            .enumerate()
            .filter(|(_, s)| s.role == role && s.on_site(weekday) && s.available_on(date))
            .map(|(i, _)| i)
            .collect(),
    };

    match util::pick_min_count(&roster.staff, &relaxed, rng) {
        Some(idx) => {
            // Un repli n'entre pas dans front_assigned : il ne bloque pas
            // l'autre demi-journée de la même date.
            let s = &mut roster.staff[idx];
            s.shift_count += 1;
            Assignment::Staffed {
                staff: s.id.clone(),
                fallback: true,
            }
        }
        None => Assignment::Unassigned,
    }
}

/// Créneau ouvert (chat, téléphone) : tout le roster hors congés, choix
/// glouton indépendant contre les compteurs déjà mis à jour.
fn resolve_open<R: Rng>(roster: &mut Roster, date: NaiveDate, rng: &mut R) -> Assignment {
    let candidates: Vec<usize> = roster
        .staff
        .iter()
        .enumerate()
        .filter(|(_, s)| s.available_on(date))
        .map(|(i, _)| i)
        .collect();

    match util::pick_min_count(&roster.staff, &candidates, rng) {
        Some(idx) => {
            let s = &mut roster.staff[idx];
            s.shift_count += 1;
            Assignment::Staffed {
                staff: s.id.clone(),
                fallback: false,
            }
        }
        None => Assignment::Unassigned,
    }
}
