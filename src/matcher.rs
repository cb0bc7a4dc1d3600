//! Recommendation matching: pure filters over the reference catalogs.
//!
//! Matching is read-only and re-derived on every request — the catalogs are
//! small and state changes are infrequent, so there is nothing to cache.
//! An empty result is a valid outcome; "catalog absent" is represented by
//! `Option` at the profile layer, not here.

use crate::types::{Archetype, HerbalProtocol, SoilState, SomaticPractice, Task};

/// Task filter: everything, or only tasks suited to one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseFilter {
    All,
    Phase(Archetype),
}

/// Somatic practices applicable to `phase`, catalog order preserved.
pub fn somatic_for(practices: &[SomaticPractice], phase: Archetype) -> Vec<&SomaticPractice> {
    practices
        .iter()
        .filter(|p| p.phases.contains(&phase))
        .collect()
}

/// Herbal protocols applicable to `soil_state`, catalog order preserved.
pub fn herbal_for(protocols: &[HerbalProtocol], soil_state: SoilState) -> Vec<&HerbalProtocol> {
    protocols
        .iter()
        .filter(|p| p.soil_states.contains(&soil_state))
        .collect()
}

/// Tasks matching the filter, list order preserved.
pub fn tasks_for(tasks: &[Task], filter: PhaseFilter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            PhaseFilter::All => true,
            PhaseFilter::Phase(phase) => t.phases.contains(&phase),
        })
        .collect()
}
