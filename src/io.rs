use crate::model::{Role, Roster, Staff, WEEKDAYS};
use crate::scheduler::{Assignment, Rota, SlotKey};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV: header `name,role[,office_days][,holidays]`
///
/// `office_days` : jours séparés par `;` (noms ou indices 0..4) ;
/// `holidays` : dates `YYYY-MM-DD` séparées par `;`.
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Staff>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let role_raw = rec.get(1).context("missing role")?.trim();
        if name.is_empty() {
            bail!("invalid staff row (empty name)");
        }
        let role: Role = role_raw
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid role for staff {name}"))?;
        let mut staff = Staff::new(name.to_string(), role);
        if let Some(days) = rec.get(2) {
            let days = days.trim();
            if !days.is_empty() {
                staff.office_days = parse_office_days(days)
                    .with_context(|| format!("invalid office_days value for staff {name}"))?;
            }
        }
        if let Some(dates) = rec.get(3) {
            let dates = dates.trim();
            if !dates.is_empty() {
                staff.holidays = parse_dates(dates)
                    .with_context(|| format!("invalid holidays value for staff {name}"))?
                    .into_iter()
                    .collect();
            }
        }
        out.push(staff);
    }
    Ok(out)
}

/// Jours sur site séparés par `;` : noms (en ou fr) ou indices 0..4.
pub fn parse_office_days(raw: &str) -> anyhow::Result<BTreeSet<u8>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| parse_office_day(chunk.trim()))
        .collect()
}

fn parse_office_day(s: &str) -> anyhow::Result<u8> {
    if let Ok(idx) = s.parse::<u8>() {
        if idx >= WEEKDAYS {
            bail!("office day index out of range: {idx}");
        }
        return Ok(idx);
    }
    match s.to_ascii_lowercase().as_str() {
        "mon" | "monday" | "lundi" => Ok(0),
        "tue" | "tuesday" | "mardi" => Ok(1),
        "wed" | "wednesday" | "mercredi" => Ok(2),
        "thu" | "thursday" | "jeudi" => Ok(3),
        "fri" | "friday" | "vendredi" => Ok(4),
        _ => bail!("unknown day: {s}"),
    }
}

/// Liste de dates `YYYY-MM-DD` séparées par `;` ou `,`.
pub fn parse_dates(raw: &str) -> anyhow::Result<Vec<NaiveDate>> {
    raw.split([';', ','])
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            NaiveDate::parse_from_str(chunk.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid date: {}", chunk.trim()))
        })
        .collect()
}

/// Export JSON du rota (jolie mise en forme, modèle structuré)
pub fn export_rota_json<P: AsRef<Path>>(path: P, rota: &Rota) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(rota)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du rota à plat: header `date,day,<clés de créneau>`.
/// La couche de présentation reconstruit le libellé depuis le flag de
/// repli ; les identifiants ne fuient pas dans la feuille.
pub fn export_rota_csv<P: AsRef<Path>>(path: P, rota: &Rota, roster: &Roster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    let mut header = vec!["date".to_string(), "day".to_string()];
    header.extend(SlotKey::ALL.iter().map(|k| k.as_str().to_string()));
    w.write_record(&header)?;

    for row in &rota.rows {
        let mut rec = vec![
            row.date.format("%d/%m/%Y").to_string(),
            row.date.format("%A").to_string(),
        ];
        for key in SlotKey::ALL {
            rec.push(cell_text(row.get(key), roster));
        }
        w.write_record(&rec)?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des totaux par personne: header `name,shift_count`
pub fn export_totals_csv<P: AsRef<Path>>(
    path: P,
    rota: &Rota,
    roster: &Roster,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["name", "shift_count"])?;
    for (id, count) in &rota.totals {
        let name = roster
            .find_staff_by_id(id)
            .map(|s| s.name.as_str())
            .unwrap_or(id.as_str());
        let count = count.to_string();
        w.write_record([name, count.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

fn cell_text(assignment: &Assignment, roster: &Roster) -> String {
    match assignment {
        Assignment::Staffed { staff, fallback } => {
            let name = roster
                .find_staff_by_id(staff)
                .map(|s| s.name.as_str())
                .unwrap_or(staff.as_str());
            if *fallback {
                format!("{name} (fallback)")
            } else {
                name.to_string()
            }
        }
        Assignment::Closed => "CLOSED".to_string(),
        Assignment::Unassigned => "UNASSIGNED".to_string(),
    }
}
