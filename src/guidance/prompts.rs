//! Prompt construction for the text-generation collaborator.
//!
//! Prompts are assembled from the latest check-in (cycle day, phase, soil
//! state, energy) and the active root wounds. No network here — pure string
//! building, tested without a client.

use crate::presets;
use crate::soil;
use crate::types::Profile;

/// Build the daily guidance prompt from the profile's current state.
pub fn build_daily_guidance_prompt(profile: &Profile) -> String {
    let history = &profile.daily_check_ins;
    let cycle_day = soil::latest_cycle_day(history);
    let phase = soil::latest_phase(history);
    let soil_state = soil::latest_soil_state(history);
    let energy = soil::latest_energy_level(history);

    let wound_names: Vec<String> = profile
        .active_root_wounds
        .iter()
        .filter_map(|id| presets::wound_by_id(id).map(|w| w.name))
        .collect();

    format!(
        "Context: Womb OS - Cyclical Life Operating System for a female entrepreneur.\n\
         User current state:\n\
         - Cycle Day: {cycle_day}\n\
         - Phase: {phase}\n\
         - Soil State (Nervous system state): {soil_state}\n\
         - Energy Level (1-10): {energy}\n\
         - Active Root Wounds (Shadow traits): {wounds}\n\
         \n\
         Task: Generate a luxurious, mystical, yet business-strategic guidance message.\n\
         Guidelines:\n\
         - Max 100 words.\n\
         - Start with \"Beloved,\" or similar elegant address.\n\
         - Connect their biological energy (phase) with their business strategy.\n\
         - Address the root wound gently.\n\
         - End with a powerful reflective question.",
        cycle_day = cycle_day,
        phase = phase.label(),
        soil_state = soil_state.as_str(),
        energy = energy,
        wounds = wound_names.join(", "),
    )
}

/// Build the oracle prompt for a free-form question.
pub fn build_oracle_prompt(profile: &Profile, question: &str) -> String {
    let history = &profile.daily_check_ins;
    let phase = soil::latest_phase(history);
    let soil_state = soil::latest_soil_state(history);

    format!(
        "User Question: \"{question}\"\n\
         System: Womb OS - Cyclical Life Operating System.\n\
         User State: {phase}, Soil: {soil_state}.\n\
         Answer as a wise ancestral mentor who understands modern business.\n\
         Keep it poetic, luxurious, and highly strategic.",
        question = question,
        phase = phase.label(),
        soil_state = soil_state.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{reduce, signup, ProfileAction};
    use crate::types::SoilState;
    use chrono::Utc;

    #[test]
    fn test_daily_prompt_reflects_latest_check_in() {
        let mut profile = signup("Ada", "ada@example.com", Utc::now());
        profile = reduce(
            &profile,
            ProfileAction::AddRootWound {
                id: "unworthiness".into(),
            },
            Utc::now(),
        )
        .unwrap();
        profile = reduce(
            &profile,
            ProfileAction::CheckIn {
                soil_state: SoilState::Flooded,
                energy_level: 4,
                notes: None,
            },
            Utc::now(),
        )
        .unwrap();

        let prompt = build_daily_guidance_prompt(&profile);
        assert!(prompt.contains("Cycle Day: 1"));
        assert!(prompt.contains("FLOODED"));
        assert!(prompt.contains("Energy Level (1-10): 4"));
        assert!(prompt.contains("UNWORTHINESS"));
    }

    #[test]
    fn test_daily_prompt_defaults_without_check_ins() {
        let profile = signup("Ada", "ada@example.com", Utc::now());
        let prompt = build_daily_guidance_prompt(&profile);
        assert!(prompt.contains("NUTRIENT_DENSE"));
        assert!(prompt.contains("Maiden"));
    }

    #[test]
    fn test_oracle_prompt_embeds_question_and_state() {
        let profile = signup("Ada", "ada@example.com", Utc::now());
        let prompt = build_oracle_prompt(&profile, "Should I raise my prices?");
        assert!(prompt.contains("\"Should I raise my prices?\""));
        assert!(prompt.contains("Soil: NUTRIENT_DENSE"));
    }
}
