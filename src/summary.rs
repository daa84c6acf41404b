use crate::model::Roster;
use crate::scheduler::Rota;
use std::fmt::Write;

/// Permet de customiser le rendu du récapitulatif (texte, mail, etc.).
pub trait SummaryRenderer {
    fn render(&self, rota: &Rota, roster: &Roster) -> String;
}

/// Gabarit texte simple : totaux par personne + trous restants.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl SummaryRenderer for TextSummary {
    fn render(&self, rota: &Rota, roster: &Roster) -> String {
        let mut out = String::from("Shift summary\n");
        for (id, count) in &rota.totals {
            let name = roster
                .find_staff_by_id(id)
                .map(|s| s.name.as_str())
                .unwrap_or(id.as_str());
            let _ = writeln!(out, "  {name}: {count}");
        }
        let gaps = rota.unassigned_count();
        if gaps > 0 {
            let _ = writeln!(out, "\n{gaps} slot(s) UNASSIGNED, follow up manually.");
        }
        out
    }
}

/// Prépare le récapitulatif d'un rota avec le renderer donné.
pub fn render_summary(rota: &Rota, roster: &Roster, renderer: &dyn SummaryRenderer) -> String {
    renderer.render(rota, roster)
}
