//! Check-in history: append-only, most-recent-first, capped.

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::types::{Archetype, CheckIn, SoilState, MAX_CHECKIN_HISTORY};

/// Record a nervous-system check-in at the front of the history.
///
/// The history is most-recent-first and truncated to `MAX_CHECKIN_HISTORY`
/// entries (oldest evicted). `energy_level` must be in 1–10; anything else is
/// rejected rather than clamped.
pub fn record_check_in(
    history: &mut Vec<CheckIn>,
    soil_state: SoilState,
    energy_level: u8,
    notes: Option<String>,
    cycle_day: u32,
    phase: Archetype,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if !(1..=10).contains(&energy_level) {
        return Err(AppError::InvalidInput(format!(
            "energy level must be 1-10, got {}",
            energy_level
        )));
    }

    history.insert(
        0,
        CheckIn {
            date: now,
            soil_state,
            energy_level,
            notes,
            cycle_day,
            phase,
        },
    );
    history.truncate(MAX_CHECKIN_HISTORY);
    Ok(())
}

/// Latest reported soil state, defaulting to the soft state when the history
/// is empty.
pub fn latest_soil_state(history: &[CheckIn]) -> SoilState {
    history
        .first()
        .map(|c| c.soil_state)
        .unwrap_or(SoilState::NutrientDense)
}

/// Latest reported energy level, defaulting to a neutral 5.
pub fn latest_energy_level(history: &[CheckIn]) -> u8 {
    history.first().map(|c| c.energy_level).unwrap_or(5)
}

/// Phase recorded with the latest check-in, defaulting to Maiden.
pub fn latest_phase(history: &[CheckIn]) -> Archetype {
    history.first().map(|c| c.phase).unwrap_or(Archetype::Maiden)
}

/// Cycle day recorded with the latest check-in, defaulting to 1.
pub fn latest_cycle_day(history: &[CheckIn]) -> u32 {
    history.first().map(|c| c.cycle_day).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(history: &mut Vec<CheckIn>, state: SoilState, energy: u8) {
        record_check_in(history, state, energy, None, 1, Archetype::Maiden, Utc::now()).unwrap();
    }

    #[test]
    fn test_insert_at_front() {
        let mut history = Vec::new();
        record(&mut history, SoilState::Parched, 3);
        record(&mut history, SoilState::Flooded, 4);
        assert_eq!(history[0].soil_state, SoilState::Flooded);
        assert_eq!(history[1].soil_state, SoilState::Parched);
    }

    #[test]
    fn test_history_capped_at_30() {
        let mut history = Vec::new();
        record(&mut history, SoilState::Frozen, 2);
        for _ in 0..30 {
            record(&mut history, SoilState::Flooded, 4);
        }
        assert_eq!(history.len(), 30);
        // the original Frozen entry was the oldest and got evicted
        assert!(history.iter().all(|c| c.soil_state == SoilState::Flooded));
        assert_eq!(history[0].soil_state, SoilState::Flooded);
    }

    #[test]
    fn test_energy_out_of_range_rejected() {
        let mut history = Vec::new();
        for bad in [0u8, 11, 200] {
            let result = record_check_in(
                &mut history,
                SoilState::Depleted,
                bad,
                None,
                1,
                Archetype::Maiden,
                Utc::now(),
            );
            assert!(matches!(result, Err(AppError::InvalidInput(_))), "energy {} accepted", bad);
        }
        assert!(history.is_empty(), "rejected check-ins must not be recorded");
    }

    #[test]
    fn test_energy_bounds_accepted() {
        let mut history = Vec::new();
        record(&mut history, SoilState::Parched, 1);
        record(&mut history, SoilState::Parched, 10);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_latest_readers_default_when_empty() {
        let history: Vec<CheckIn> = Vec::new();
        assert_eq!(latest_soil_state(&history), SoilState::NutrientDense);
        assert_eq!(latest_energy_level(&history), 5);
        assert_eq!(latest_phase(&history), Archetype::Maiden);
        assert_eq!(latest_cycle_day(&history), 1);
    }

    #[test]
    fn test_latest_readers_use_index_zero() {
        let mut history = Vec::new();
        record(&mut history, SoilState::Depleted, 2);
        record(&mut history, SoilState::Flooded, 7);
        assert_eq!(latest_soil_state(&history), SoilState::Flooded);
        assert_eq!(latest_energy_level(&history), 7);
    }
}
