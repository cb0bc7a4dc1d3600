//! Cycle day and archetype derivation (pure math, no IO).

use chrono::{DateTime, Utc};

use crate::types::Archetype;

/// Derived position in the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePosition {
    /// 1-indexed day within the configured cycle length.
    pub cycle_day: u32,
    pub phase: Archetype,
}

/// Derive the current cycle day and archetype from the last period start.
///
/// `cycle_day = days_since_start.rem_euclid(cycle_length) + 1`, so the day
/// wraps indefinitely for start dates far in the past and stays in
/// `[1, cycle_length]` even when `now` precedes the start (a future-dated
/// period start is user-editable in settings, not an error).
///
/// `cycle_length` is validated at the profile layer; a zero here is treated
/// as 1 to keep the derivation total.
pub fn cycle_position(
    last_period_start: DateTime<Utc>,
    cycle_length: u32,
    now: DateTime<Utc>,
) -> CyclePosition {
    let length = i64::from(cycle_length.max(1));
    let days_since_start = (now - last_period_start).num_days();
    let cycle_day = (days_since_start.rem_euclid(length) + 1) as u32;
    CyclePosition {
        cycle_day,
        phase: phase_for_day(cycle_day),
    }
}

/// Map a cycle day to its archetype.
///
/// The banding is fixed and independent of the configured cycle length:
/// for lengths under 29 the Wise Woman band is unreachable, and for lengths
/// over 28 the day can exceed 28 mid-cycle. Both are intentional.
pub fn phase_for_day(cycle_day: u32) -> Archetype {
    match cycle_day {
        0..=12 => Archetype::Maiden,
        13..=16 => Archetype::Mother,
        17..=28 => Archetype::WildWoman,
        _ => Archetype::WiseWoman,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_same_day_is_day_one() {
        let pos = cycle_position(day0(), 28, day0());
        assert_eq!(pos.cycle_day, 1);
        assert_eq!(pos.phase, Archetype::Maiden);
    }

    #[test]
    fn test_wraps_after_full_cycle() {
        let pos = cycle_position(day0(), 28, day0() + Duration::days(28));
        assert_eq!(pos.cycle_day, 1);
    }

    #[test]
    fn test_day_stays_in_range_for_all_lengths() {
        for length in 21..=35u32 {
            for elapsed in 0..120i64 {
                let pos = cycle_position(day0(), length, day0() + Duration::days(elapsed));
                assert!(
                    pos.cycle_day >= 1 && pos.cycle_day <= length,
                    "length {} elapsed {} gave day {}",
                    length,
                    elapsed,
                    pos.cycle_day
                );
            }
        }
    }

    #[test]
    fn test_future_start_date_normalizes() {
        // now precedes the recorded start: -3 days into a 28-day cycle
        let pos = cycle_position(day0(), 28, day0() - Duration::days(3));
        assert_eq!(pos.cycle_day, 26);
        // and a start several cycles ahead still lands in range
        let pos = cycle_position(day0(), 28, day0() - Duration::days(100));
        assert!(pos.cycle_day >= 1 && pos.cycle_day <= 28);
    }

    #[test]
    fn test_phase_band_boundaries() {
        assert_eq!(phase_for_day(1), Archetype::Maiden);
        assert_eq!(phase_for_day(12), Archetype::Maiden);
        assert_eq!(phase_for_day(13), Archetype::Mother);
        assert_eq!(phase_for_day(16), Archetype::Mother);
        assert_eq!(phase_for_day(17), Archetype::WildWoman);
        assert_eq!(phase_for_day(28), Archetype::WildWoman);
        assert_eq!(phase_for_day(29), Archetype::WiseWoman);
        assert_eq!(phase_for_day(35), Archetype::WiseWoman);
    }

    #[test]
    fn test_long_cycle_keeps_original_banding() {
        // 35-day cycle: days 29-35 read as Wise Woman, no renormalization
        let pos = cycle_position(day0(), 35, day0() + Duration::days(30));
        assert_eq!(pos.cycle_day, 31);
        assert_eq!(pos.phase, Archetype::WiseWoman);
    }

    #[test]
    fn test_zero_length_treated_as_one() {
        let pos = cycle_position(day0(), 0, day0() + Duration::days(10));
        assert_eq!(pos.cycle_day, 1);
    }
}
