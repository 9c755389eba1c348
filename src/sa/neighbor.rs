//! Neighbor generation: add a few random items, then repair the weight.

use rand::Rng;

use crate::error::KnapsackError;
use crate::instance::Instance;

use super::types::Candidate;

/// Derives a neighbor of `parent` by adding up to `bound` random items and
/// repairing any capacity overshoot.
///
/// The number of additions `k` is drawn uniformly from `[1, bound]`. Each
/// addition picks uniformly among the working copy's currently non-taken
/// indices; after each addition, while the copy is overweight, one taken
/// index picked uniformly is dropped. The parent is never modified.
///
/// If every item is already taken when a draw needs a non-taken index, the
/// remaining draws are skipped: repair only runs after an addition, so no
/// later draw could find an opening either.
///
/// Returns [`KnapsackError::Infeasible`] if repair empties the candidate
/// while it is still overweight. With non-negative weights the empty
/// candidate always weighs zero, so this guards the repair loop against
/// spinning rather than an expected state.
pub fn generate<R: Rng>(
    parent: &Candidate,
    instance: &Instance,
    bound: usize,
    rng: &mut R,
) -> Result<Candidate, KnapsackError> {
    let k = rng.random_range(1..=bound.max(1));
    let mut inclusion = parent.inclusion().to_vec();
    let mut weight = parent.total_weight();

    for _ in 0..k {
        let open: Vec<usize> = indices(&inclusion, false);
        if open.is_empty() {
            break;
        }
        let pick = open[rng.random_range(0..open.len())];
        inclusion[pick] = true;
        weight += u64::from(instance.items[pick].weight);

        while weight > instance.capacity {
            let taken: Vec<usize> = indices(&inclusion, true);
            let Some(&drop) = taken.get(rng.random_range(0..taken.len().max(1))) else {
                return Err(KnapsackError::Infeasible(
                    "candidate emptied by weight repair while still overweight".into(),
                ));
            };
            inclusion[drop] = false;
            weight -= u64::from(instance.items[drop].weight);
        }
    }

    Ok(Candidate::from_inclusion(inclusion, instance))
}

fn indices(inclusion: &[bool], taken: bool) -> Vec<usize> {
    inclusion
        .iter()
        .enumerate()
        .filter_map(|(i, &flag)| (flag == taken).then_some(i))
        .collect()
}
