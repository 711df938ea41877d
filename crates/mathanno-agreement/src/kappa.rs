//! Cohen's kappa.
//!
//! Chance-corrected agreement between two parallel label sequences drawn
//! from a finite category set. The coefficient is undefined when expected
//! agreement is 1 (no variance across either sequence) or when the label
//! sets are empty; both are modeled as `None`, never a float sentinel, so
//! downstream averages can exclude them explicitly.

use std::collections::HashMap;
use std::hash::Hash;

/// κ = (Po − Pe) / (1 − Pe) over two equal-length sequences.
///
/// Returns `None` when the sequences are empty, their lengths differ, or
/// Pe == 1.
pub fn cohen_kappa<T: Eq + Hash>(reference: &[T], target: &[T]) -> Option<f64> {
    if reference.is_empty() || reference.len() != target.len() {
        return None;
    }
    let n = reference.len() as f64;

    let observed = reference
        .iter()
        .zip(target)
        .filter(|(a, b)| a == b)
        .count() as f64;
    let po = observed / n;

    let mut ref_counts: HashMap<&T, usize> = HashMap::new();
    let mut tgt_counts: HashMap<&T, usize> = HashMap::new();
    for label in reference {
        *ref_counts.entry(label).or_default() += 1;
    }
    for label in target {
        *tgt_counts.entry(label).or_default() += 1;
    }

    let pe: f64 = ref_counts
        .iter()
        .map(|(label, &count)| {
            let tgt = tgt_counts.get(label).copied().unwrap_or(0) as f64;
            (count as f64 / n) * (tgt / n)
        })
        .sum();

    if (1.0 - pe).abs() < f64::EPSILON {
        return None;
    }
    Some((po - pe) / (1.0 - pe))
}

/// Count-weighted average of per-group coefficients: Σ(κ·n) / Σ(n) over
/// groups where κ is defined. `None` when no group has a defined κ.
pub fn weighted_average(groups: impl IntoIterator<Item = (Option<f64>, usize)>) -> Option<f64> {
    let (mut sum, mut count) = (0.0, 0usize);
    for (kappa, n) in groups {
        if let Some(kappa) = kappa {
            sum += kappa * n as f64;
            count += n;
        }
    }
    (count > 0).then(|| sum / count as f64)
}
