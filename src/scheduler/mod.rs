mod assignment;
mod types;
mod util;

pub use types::{
    Assignment, FallbackPolicy, Rota, RotaOptions, RotaRow, SchedError, SlotKey,
};

use crate::calendar::weekday_index;
use crate::model::{Roster, Staff, WEEKDAYS};
use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeMap;

/// Scheduler : encapsule un Roster en cours de construction
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn add_staff(&mut self, staff: Vec<Staff>) {
        self.roster.staff.extend(staff);
    }

    pub fn set_closures<I: IntoIterator<Item = NaiveDate>>(&mut self, dates: I) {
        self.roster.closures = dates.into_iter().collect();
    }

    /// Génère le rota sur les jours ouvrés donnés. Les compteurs du roster
    /// avancent en place ; voir [`generate_rota`].
    pub fn generate<R: Rng>(
        &mut self,
        dates: &[NaiveDate],
        opts: RotaOptions,
        rng: &mut R,
    ) -> Result<Rota, SchedError> {
        generate_rota(&mut self.roster, dates, opts, rng)
    }
}

/// Génère un rota : une ligne résolue par jour ouvré, en ordre croissant,
/// plus la photo finale des compteurs d'équité.
///
/// Le roster est muté en place (`shift_count`, `front_assigned`) ; un
/// appelant qui veut repartir de zéro appelle `reset_counters` avant, un
/// appelant qui veut l'équité multi-mois garde les compteurs tels quels.
/// Un sous-effectif n'est jamais une erreur : les trous ressortent en
/// `Assignment::Unassigned`. Seules les entrées malformées font échouer
/// l'appel, sans rota partiel.
pub fn generate_rota<R: Rng>(
    roster: &mut Roster,
    dates: &[NaiveDate],
    opts: RotaOptions,
    rng: &mut R,
) -> Result<Rota, SchedError> {
    roster.validate()?;
    if let Some(bad) = dates.iter().find(|d| weekday_index(**d) >= WEEKDAYS) {
        return Err(SchedError::NotAWorkingDay(*bad));
    }

    let mut dates = dates.to_vec();
    dates.sort_unstable();

    let mut rows = Vec::with_capacity(dates.len());
    for date in dates {
        let slots = assignment::resolve_day(roster, date, opts, rng);
        rows.push(RotaRow { date, slots });
    }

    let totals: BTreeMap<_, _> = roster
        .staff
        .iter()
        .map(|s| (s.id.clone(), s.shift_count))
        .collect();

    Ok(Rota { rows, totals })
}
