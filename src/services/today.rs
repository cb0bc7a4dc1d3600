// Today service — read-side assembly for the home view.
// Combines cycle position, latest soil state, pillar progress, and matched
// recommendations into one snapshot. No mutation, no caching.

use chrono::{DateTime, Utc};

use crate::cycle;
use crate::matcher::{self, PhaseFilter};
use crate::pillars;
use crate::presets;
use crate::soil;
use crate::types::{
    Archetype, BusinessMetrics, HerbalProtocol, Profile, SoilState, SomaticPractice, Task,
};
use crate::util::date_key;

/// One pillar's name and completion for today.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarStatus {
    pub name: String,
    pub completed: bool,
}

/// An actively tended wound with its affirmation.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WoundStatus {
    pub name: String,
    pub affirmation: String,
}

/// Snapshot of everything the home view shows for today.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayOverview {
    pub date: String,
    pub name: String,
    pub cycle_day: u32,
    pub cycle_length: u32,
    pub phase: Archetype,
    pub phase_label: String,
    pub season: String,
    pub phase_energy: String,
    pub superpower: String,
    pub focus: String,
    pub soil_state: SoilState,
    pub soil_guidance: String,
    pub energy_level: u8,
    pub checked_in_today: bool,
    pub pillars: Vec<PillarStatus>,
    pub pillars_completed: usize,
    pub recommended_practices: Vec<SomaticPractice>,
    pub recommended_protocols: Vec<HerbalProtocol>,
    pub phase_tasks: Vec<Task>,
    pub tending: Vec<WoundStatus>,
    pub business_metrics: Option<BusinessMetrics>,
}

/// Build the home snapshot for `now`.
///
/// Phase comes from the live cycle derivation, not the last check-in, so the
/// view stays current even when the user hasn't checked in across a phase
/// boundary. Soil state and energy come from the latest check-in.
pub fn build_today_overview(profile: &Profile, now: DateTime<Utc>) -> TodayOverview {
    let pos = cycle::cycle_position(
        profile.cycle_info.last_period_start,
        profile.cycle_info.cycle_length,
        now,
    );
    let today = date_key(now);
    let soil_state = soil::latest_soil_state(&profile.daily_check_ins);

    let completions = pillars::completions_for(&profile.pillar_completions, &today, profile.pillar_count());
    let pillar_status: Vec<PillarStatus> = profile
        .pillar_names
        .iter()
        .zip(completions.iter())
        .map(|(name, completed)| PillarStatus {
            name: name.clone(),
            completed: *completed,
        })
        .collect();
    let pillars_completed = pillars::completed_count(&profile.pillar_completions, &today);

    let recommended_practices = profile
        .somatic_practices()
        .map(|catalog| {
            matcher::somatic_for(catalog, pos.phase)
                .into_iter()
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    let recommended_protocols = profile
        .herbal_protocols()
        .map(|catalog| {
            matcher::herbal_for(catalog, soil_state)
                .into_iter()
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    let phase_tasks = matcher::tasks_for(&profile.tasks, PhaseFilter::Phase(pos.phase))
        .into_iter()
        .cloned()
        .collect();

    let tending = profile
        .active_root_wounds
        .iter()
        .filter_map(|id| presets::wound_by_id(id))
        .map(|wound| WoundStatus {
            name: wound.name,
            affirmation: wound.affirmation,
        })
        .collect();

    let checked_in_today = profile
        .daily_check_ins
        .first()
        .is_some_and(|c| date_key(c.date) == today);

    TodayOverview {
        date: today,
        name: profile.name.clone(),
        cycle_day: pos.cycle_day,
        cycle_length: profile.cycle_info.cycle_length,
        phase: pos.phase,
        phase_label: pos.phase.label().to_string(),
        season: pos.phase.season().to_string(),
        phase_energy: pos.phase.energy().to_string(),
        superpower: pos.phase.superpower().to_string(),
        focus: pos.phase.focus().to_string(),
        soil_state,
        soil_guidance: soil_state.guidance().to_string(),
        energy_level: soil::latest_energy_level(&profile.daily_check_ins),
        checked_in_today,
        pillars: pillar_status,
        pillars_completed,
        recommended_practices,
        recommended_protocols,
        phase_tasks,
        tending,
        business_metrics: profile.business_metrics.clone(),
    }
}
