//! Daily pillar completion tracking.
//!
//! One boolean vector per calendar date, indexed by pillar position. Vectors
//! recorded under an older pillar configuration are never resized in place;
//! short vectors are padded on write and reads count whatever is stored.

use std::collections::HashMap;

use crate::error::AppError;

/// Toggle completion of pillar `index` for `date`.
///
/// Initializes a `pillar_count`-long vector of `false` for a date with no
/// record yet. A stored vector shorter than the current pillar count (written
/// before a pillar config change) is padded with `false` before toggling.
/// Toggling twice restores the original vector.
pub fn toggle_pillar(
    completions: &mut HashMap<String, Vec<bool>>,
    date: &str,
    index: usize,
    pillar_count: usize,
) -> Result<(), AppError> {
    if index >= pillar_count {
        return Err(AppError::IndexOutOfRange {
            index,
            count: pillar_count,
        });
    }

    let vector = completions
        .entry(date.to_string())
        .or_insert_with(|| vec![false; pillar_count]);
    if vector.len() < pillar_count {
        vector.resize(pillar_count, false);
    }
    vector[index] = !vector[index];
    Ok(())
}

/// Number of pillars completed on `date`; 0 when no vector exists.
pub fn completed_count(completions: &HashMap<String, Vec<bool>>, date: &str) -> usize {
    completions
        .get(date)
        .map(|v| v.iter().filter(|done| **done).count())
        .unwrap_or(0)
}

/// Completion vector for `date`, padded or truncated to `pillar_count` for
/// display. The stored vector is left untouched.
pub fn completions_for(
    completions: &HashMap<String, Vec<bool>>,
    date: &str,
    pillar_count: usize,
) -> Vec<bool> {
    let mut vector = completions.get(date).cloned().unwrap_or_default();
    vector.resize(pillar_count, false);
    vector
}
