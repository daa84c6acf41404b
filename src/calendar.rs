use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::model::WEEKDAYS;

/// Tous les jours calendaires du mois, en ordre croissant.
pub fn all_dates_in_month(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("invalid year/month: {year}-{month:02}"))?;
    let mut out = Vec::new();
    let mut current = first;
    while current.month() == month {
        out.push(current);
        current = current.succ_opt().context("date overflow")?;
    }
    Ok(out)
}

/// Sous-ensemble ouvré (lundi..vendredi) du mois, en ordre croissant.
pub fn working_dates_in_month(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    Ok(all_dates_in_month(year, month)?
        .into_iter()
        .filter(|d| weekday_index(*d) < WEEKDAYS)
        .collect())
}

/// Indice de jour utilisé partout dans la lib : lundi=0 .. dimanche=6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}
