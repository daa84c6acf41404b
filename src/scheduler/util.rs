use crate::model::Staff;
use rand::prelude::IndexedRandom;
use rand::Rng;

/// Sélectionne parmi `candidates` (indices dans `staff`) l'entrée au
/// compteur minimal. Les égalités sont départagées par tirage uniforme,
/// retiré indépendamment à chaque appel.
pub(super) fn pick_min_count<R: Rng>(
    staff: &[Staff],
    candidates: &[usize],
    rng: &mut R,
) -> Option<usize> {
    let min = candidates.iter().map(|&i| staff[i].shift_count).min()?;
    let tied: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| staff[i].shift_count == min)
        .collect();
    tied.choose(rng).copied()
}
