//! Profile aggregate: signup defaults, action reducer, and merge rules.
//!
//! Every mutation is a pure `(profile, action) -> new profile` step; the
//! session container owns replace-and-persist. Sub-collections are replaced
//! wholesale — there is no deep patching below the field being set.

use chrono::{DateTime, Utc};

use crate::cycle;
use crate::error::AppError;
use crate::pillars;
use crate::presets;
use crate::soil;
use crate::types::{
    Archetype, BusinessMetrics, ContentItem, CycleInfo, EnergyRequired, GuidanceKind,
    HerbalProtocol, JournalEntry, NotificationPreferences, Product, Profile, SavedGuidance,
    Service, SoilState, SomaticPractice, Task, TaskCategory, MAX_ACTIVE_ROOT_WOUNDS,
    PROFILE_SCHEMA_VERSION,
};
use crate::util::{date_key, new_id};

/// Create a fresh profile at signup. Collections empty, pillars at their
/// default names, catalogs seeded from the embedded presets, cycle defaulted
/// to a 28-day cycle starting now (refined during onboarding).
pub fn signup(name: &str, email: &str, now: DateTime<Utc>) -> Profile {
    Profile {
        schema_version: PROFILE_SCHEMA_VERSION,
        id: new_id(),
        name: name.to_string(),
        email: email.to_string(),
        onboarded: false,
        created_date: now,
        cycle_info: CycleInfo {
            last_period_start: now,
            cycle_length: 28,
        },
        active_root_wounds: Vec::new(),
        pillar_names: presets::DEFAULT_PILLARS.iter().map(|p| p.to_string()).collect(),
        daily_check_ins: Vec::new(),
        pillar_completions: Default::default(),
        tasks: Vec::new(),
        journal_entries: Vec::new(),
        saved_guidance: Vec::new(),
        somatic_practices: Some(presets::default_somatic_practices()),
        herbal_protocols: Some(presets::default_herbal_protocols()),
        content_calendar: Some(Vec::new()),
        products: Some(Vec::new()),
        services: Some(Vec::new()),
        business_metrics: Some(BusinessMetrics {
            last_updated: now,
            ..BusinessMetrics::default()
        }),
        notification_preferences: Some(NotificationPreferences::default()),
    }
}

// =============================================================================
// Actions
// =============================================================================

/// One profile mutation. Applied by [`reduce`].
#[derive(Debug, Clone)]
pub enum ProfileAction {
    /// Record a nervous-system check-in; cycle day and phase are derived at
    /// application time.
    CheckIn {
        soil_state: SoilState,
        energy_level: u8,
        notes: Option<String>,
    },
    /// Toggle today's completion of one pillar.
    TogglePillar { index: usize },
    AddTask {
        name: String,
        phases: Vec<Archetype>,
        energy_required: EnergyRequired,
        category: TaskCategory,
    },
    /// Flip a task's completion flag, stamping or clearing the completion time.
    ToggleTask { id: String },
    AddJournalEntry { content: String },
    /// Keep a guidance snippet in the saved list.
    SaveGuidance { prompt: String, kind: GuidanceKind },
    /// Add one wound to the active set. A no-op once the cap is reached.
    AddRootWound { id: String },
    RemoveRootWound { id: String },
    UpdateMetrics {
        current_cycle_revenue: f64,
        active_projects: u32,
        notes: String,
    },
    CompleteOnboarding,
    /// Structural merge of a settings-style partial change.
    Update(ProfileUpdate),
}

/// Partial change applied by `ProfileAction::Update`. Every present field
/// replaces its profile counterpart wholesale.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cycle_info: Option<CycleInfo>,
    pub active_root_wounds: Option<Vec<String>>,
    pub pillar_names: Option<Vec<String>>,
    pub notification_preferences: Option<NotificationPreferences>,
    pub somatic_practices: Option<Vec<SomaticPractice>>,
    pub herbal_protocols: Option<Vec<HerbalProtocol>>,
    pub content_calendar: Option<Vec<ContentItem>>,
    pub products: Option<Vec<Product>>,
    pub services: Option<Vec<Service>>,
    pub business_metrics: Option<BusinessMetrics>,
}

/// Apply one action, returning the next profile state.
///
/// `now` is injected so derivations (cycle day, completion stamps, date keys)
/// stay deterministic under test.
pub fn reduce(profile: &Profile, action: ProfileAction, now: DateTime<Utc>) -> Result<Profile, AppError> {
    let mut next = profile.clone();

    match action {
        ProfileAction::CheckIn {
            soil_state,
            energy_level,
            notes,
        } => {
            let pos = cycle::cycle_position(
                next.cycle_info.last_period_start,
                next.cycle_info.cycle_length,
                now,
            );
            soil::record_check_in(
                &mut next.daily_check_ins,
                soil_state,
                energy_level,
                notes,
                pos.cycle_day,
                pos.phase,
                now,
            )?;
        }

        ProfileAction::TogglePillar { index } => {
            let count = next.pillar_count();
            pillars::toggle_pillar(&mut next.pillar_completions, &date_key(now), index, count)?;
        }

        ProfileAction::AddTask {
            name,
            phases,
            energy_required,
            category,
        } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::InvalidInput("task name cannot be empty".into()));
            }
            next.tasks.push(Task {
                id: new_id(),
                name,
                phases,
                energy_required,
                category,
                completed: false,
                completed_date: None,
                created_date: now,
            });
        }

        ProfileAction::ToggleTask { id } => {
            let task = next
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| AppError::InvalidInput(format!("no task with id {}", id)))?;
            task.completed = !task.completed;
            task.completed_date = task.completed.then_some(now);
        }

        ProfileAction::AddJournalEntry { content } => {
            let content = content.trim().to_string();
            if content.is_empty() {
                return Err(AppError::InvalidInput("journal entry cannot be empty".into()));
            }
            let entry = JournalEntry {
                id: new_id(),
                date: now,
                content,
                cycle_day: soil::latest_cycle_day(&next.daily_check_ins),
                phase: soil::latest_phase(&next.daily_check_ins),
                soil_state: soil::latest_soil_state(&next.daily_check_ins),
            };
            next.journal_entries.insert(0, entry);
        }

        ProfileAction::SaveGuidance { prompt, kind } => {
            let snippet = SavedGuidance {
                id: new_id(),
                date: now,
                prompt,
                kind,
                cycle_day: soil::latest_cycle_day(&next.daily_check_ins),
                phase: soil::latest_phase(&next.daily_check_ins),
            };
            next.saved_guidance.insert(0, snippet);
        }

        ProfileAction::AddRootWound { id } => {
            if presets::wound_by_id(&id).is_none() {
                return Err(AppError::InvalidInput(format!("unknown root wound: {}", id)));
            }
            // Cap reached or already active: silently keep the current set.
            if next.active_root_wounds.len() < MAX_ACTIVE_ROOT_WOUNDS
                && !next.active_root_wounds.contains(&id)
            {
                next.active_root_wounds.push(id);
            }
        }

        ProfileAction::RemoveRootWound { id } => {
            next.active_root_wounds.retain(|w| w != &id);
        }

        ProfileAction::UpdateMetrics {
            current_cycle_revenue,
            active_projects,
            notes,
        } => {
            next.business_metrics = Some(BusinessMetrics {
                current_cycle_revenue,
                active_projects,
                notes,
                last_updated: now,
            });
        }

        ProfileAction::CompleteOnboarding => {
            next.onboarded = true;
        }

        ProfileAction::Update(update) => {
            apply_update(&mut next, update)?;
        }
    }

    Ok(next)
}

/// Strict-mode root-wound add: errors with `LimitExceeded` at the cap instead
/// of no-opping.
pub fn try_add_root_wound(profile: &Profile, id: &str) -> Result<Profile, AppError> {
    if presets::wound_by_id(id).is_none() {
        return Err(AppError::InvalidInput(format!("unknown root wound: {}", id)));
    }
    let mut next = profile.clone();
    if next.active_root_wounds.contains(&id.to_string()) {
        return Ok(next);
    }
    if next.active_root_wounds.len() >= MAX_ACTIVE_ROOT_WOUNDS {
        return Err(AppError::LimitExceeded(format!(
            "you can tend at most {} wounds at a time",
            MAX_ACTIVE_ROOT_WOUNDS
        )));
    }
    next.active_root_wounds.push(id.to_string());
    Ok(next)
}

/// Structural merge: every present field replaces its counterpart wholesale.
fn apply_update(profile: &mut Profile, update: ProfileUpdate) -> Result<(), AppError> {
    if let Some(name) = update.name {
        profile.name = name;
    }
    if let Some(email) = update.email {
        profile.email = email;
    }

    if let Some(cycle_info) = update.cycle_info {
        if cycle_info.cycle_length == 0 {
            return Err(AppError::InvalidInput("cycle length must be at least 1 day".into()));
        }
        profile.cycle_info = cycle_info;
    }

    if let Some(mut wounds) = update.active_root_wounds {
        let mut seen = std::collections::HashSet::new();
        wounds.retain(|id| seen.insert(id.clone()));
        for id in &wounds {
            if presets::wound_by_id(id).is_none() {
                return Err(AppError::InvalidInput(format!("unknown root wound: {}", id)));
            }
        }
        // Wholesale sets over the cap keep the first three.
        wounds.truncate(MAX_ACTIVE_ROOT_WOUNDS);
        profile.active_root_wounds = wounds;
    }

    if let Some(names) = update.pillar_names {
        // Renames are free-form; resizing the pillar set is unsupported
        // because historical completion vectors are keyed by position.
        if names.len() != profile.pillar_names.len() {
            return Err(AppError::InvalidInput(format!(
                "pillar count is fixed at {}; renames only",
                profile.pillar_names.len()
            )));
        }
        profile.pillar_names = names;
    }

    if let Some(prefs) = update.notification_preferences {
        profile.notification_preferences = Some(prefs);
    }
    if let Some(practices) = update.somatic_practices {
        profile.somatic_practices = Some(practices);
    }
    if let Some(protocols) = update.herbal_protocols {
        profile.herbal_protocols = Some(protocols);
    }
    if let Some(items) = update.content_calendar {
        profile.content_calendar = Some(items);
    }
    if let Some(products) = update.products {
        profile.products = Some(products);
    }
    if let Some(services) = update.services {
        profile.services = Some(services);
    }
    if let Some(metrics) = update.business_metrics {
        profile.business_metrics = Some(metrics);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 23, 9, 0, 0).unwrap()
    }

    fn fresh() -> Profile {
        signup("Ada", "ada@example.com", now())
    }

    #[test]
    fn test_signup_defaults() {
        let profile = fresh();
        assert!(!profile.onboarded);
        assert_eq!(profile.pillar_count(), 8);
        assert_eq!(profile.cycle_info.cycle_length, 28);
        assert!(profile.daily_check_ins.is_empty());
        assert!(profile.somatic_practices().is_some_and(|p| !p.is_empty()));
        assert!(profile.herbal_protocols().is_some_and(|p| !p.is_empty()));
        assert_eq!(profile.schema_version, PROFILE_SCHEMA_VERSION);
    }

    #[test]
    fn test_check_in_derives_position() {
        let profile = fresh();
        let next = reduce(
            &profile,
            ProfileAction::CheckIn {
                soil_state: SoilState::Flooded,
                energy_level: 4,
                notes: None,
            },
            now(),
        )
        .unwrap();
        let latest = &next.daily_check_ins[0];
        assert_eq!(latest.cycle_day, 1);
        assert_eq!(latest.phase, Archetype::Maiden);
        assert_eq!(latest.soil_state, SoilState::Flooded);
        // source profile untouched
        assert!(profile.daily_check_ins.is_empty());
    }

    #[test]
    fn test_check_in_rejects_bad_energy() {
        let profile = fresh();
        let result = reduce(
            &profile,
            ProfileAction::CheckIn {
                soil_state: SoilState::Parched,
                energy_level: 0,
                notes: None,
            },
            now(),
        );
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_toggle_task_stamps_completion() {
        let profile = reduce(
            &fresh(),
            ProfileAction::AddTask {
                name: "Record launch video".into(),
                phases: vec![Archetype::Mother],
                energy_required: EnergyRequired::High,
                category: TaskCategory::Business,
            },
            now(),
        )
        .unwrap();
        let id = profile.tasks[0].id.clone();

        let done = reduce(&profile, ProfileAction::ToggleTask { id: id.clone() }, now()).unwrap();
        assert!(done.tasks[0].completed);
        assert_eq!(done.tasks[0].completed_date, Some(now()));

        let undone = reduce(&done, ProfileAction::ToggleTask { id }, now()).unwrap();
        assert!(!undone.tasks[0].completed);
        assert!(undone.tasks[0].completed_date.is_none());
    }

    #[test]
    fn test_unknown_task_toggle_errors() {
        let result = reduce(&fresh(), ProfileAction::ToggleTask { id: "missing".into() }, now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_journal_entry_stamped_with_latest_state() {
        let mut profile = fresh();
        profile = reduce(
            &profile,
            ProfileAction::CheckIn {
                soil_state: SoilState::Depleted,
                energy_level: 2,
                notes: None,
            },
            now(),
        )
        .unwrap();
        profile = reduce(
            &profile,
            ProfileAction::AddJournalEntry {
                content: "resting today".into(),
            },
            now(),
        )
        .unwrap();
        let entry = &profile.journal_entries[0];
        assert_eq!(entry.soil_state, SoilState::Depleted);
        assert_eq!(entry.cycle_day, 1);
    }

    #[test]
    fn test_root_wound_cap_is_permissive() {
        let mut profile = fresh();
        for id in ["abandonment", "unworthiness", "betrayal", "rejection", "shame"] {
            profile = reduce(
                &profile,
                ProfileAction::AddRootWound { id: id.into() },
                now(),
            )
            .unwrap();
        }
        assert_eq!(
            profile.active_root_wounds,
            vec!["abandonment", "unworthiness", "betrayal"]
        );
    }

    #[test]
    fn test_root_wound_strict_mode_errors() {
        let mut profile = fresh();
        for id in ["abandonment", "unworthiness", "betrayal"] {
            profile = try_add_root_wound(&profile, id).unwrap();
        }
        let result = try_add_root_wound(&profile, "shame");
        assert!(matches!(result, Err(AppError::LimitExceeded(_))));
        // re-adding an active wound stays fine
        assert!(try_add_root_wound(&profile, "betrayal").is_ok());
    }

    #[test]
    fn test_unknown_wound_rejected() {
        let result = reduce(
            &fresh(),
            ProfileAction::AddRootWound { id: "vengeance".into() },
            now(),
        );
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_update_rejects_pillar_resize() {
        let update = ProfileUpdate {
            pillar_names: Some(vec!["Just one".into()]),
            ..Default::default()
        };
        let result = reduce(&fresh(), ProfileAction::Update(update), now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_update_allows_pillar_rename() {
        let mut names: Vec<String> = presets::DEFAULT_PILLARS.iter().map(|p| p.to_string()).collect();
        names[0] = "Breathwork".into();
        let update = ProfileUpdate {
            pillar_names: Some(names),
            ..Default::default()
        };
        let next = reduce(&fresh(), ProfileAction::Update(update), now()).unwrap();
        assert_eq!(next.pillar_names[0], "Breathwork");
    }

    #[test]
    fn test_update_rejects_zero_cycle_length() {
        let update = ProfileUpdate {
            cycle_info: Some(CycleInfo {
                last_period_start: now(),
                cycle_length: 0,
            }),
            ..Default::default()
        };
        let result = reduce(&fresh(), ProfileAction::Update(update), now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_update_truncates_wound_set_to_cap() {
        let update = ProfileUpdate {
            active_root_wounds: Some(vec![
                "abandonment".into(),
                "unworthiness".into(),
                "betrayal".into(),
                "shame".into(),
            ]),
            ..Default::default()
        };
        let next = reduce(&fresh(), ProfileAction::Update(update), now()).unwrap();
        assert_eq!(next.active_root_wounds.len(), 3);
    }

    #[test]
    fn test_update_replaces_collections_wholesale() {
        let update = ProfileUpdate {
            somatic_practices: Some(Vec::new()),
            ..Default::default()
        };
        let next = reduce(&fresh(), ProfileAction::Update(update), now()).unwrap();
        // present but empty — distinct from absent
        assert_eq!(next.somatic_practices(), Some(&[][..]));
    }
}
