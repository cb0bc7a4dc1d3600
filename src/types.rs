use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current profile blob schema version. Bump when a migration is added.
pub const PROFILE_SCHEMA_VERSION: u32 = 2;

/// Check-in history is capped at the most recent N entries.
pub const MAX_CHECKIN_HISTORY: usize = 30;

/// At most this many root wounds can be actively tended at once.
pub const MAX_ACTIVE_ROOT_WOUNDS: usize = 3;

// =============================================================================
// Core enums
// =============================================================================

/// Self-reported nervous-system state, independent of cycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoilState {
    Parched,
    Flooded,
    Frozen,
    Depleted,
    NutrientDense,
}

impl SoilState {
    pub const ALL: [SoilState; 5] = [
        SoilState::Parched,
        SoilState::Flooded,
        SoilState::Frozen,
        SoilState::Depleted,
        SoilState::NutrientDense,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SoilState::Parched => "Parched (The Drought)",
            SoilState::Flooded => "Flooded (The Overwhelm)",
            SoilState::Frozen => "Frozen (The Shutdown)",
            SoilState::Depleted => "Depleted (The Exhaustion)",
            SoilState::NutrientDense => "Nutrient-Dense (The Soft State)",
        }
    }

    /// Short somatic guidance shown alongside the state.
    pub fn guidance(&self) -> &'static str {
        match self {
            SoilState::Parched => {
                "Numbness, apathy, dissociation. Hydrate with minerals, oil massage, grounding, rest."
            }
            SoilState::Flooded => {
                "Anxiety, racing heart, everything urgent. Boundaries. Choose only 3 tasks today. Cold water therapy."
            }
            SoilState::Frozen => "Paralysis, can't move. Somatic shaking, humming, one micro-movement.",
            SoilState::Depleted => {
                "Bone-deep weariness, compassion fatigue. Radical rest (72 hrs minimum). Ask for help."
            }
            SoilState::NutrientDense => {
                "Clarity, presence, flow, 'I have enough time'. Maintain through your daily pillars. You're in flow."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilState::Parched => "PARCHED",
            SoilState::Flooded => "FLOODED",
            SoilState::Frozen => "FROZEN",
            SoilState::Depleted => "DEPLETED",
            SoilState::NutrientDense => "NUTRIENT_DENSE",
        }
    }

    /// Parse a state keyword (case-insensitive). Used by the CLI.
    pub fn parse(value: &str) -> Option<SoilState> {
        match value.to_ascii_uppercase().replace('-', "_").as_str() {
            "PARCHED" => Some(SoilState::Parched),
            "FLOODED" => Some(SoilState::Flooded),
            "FROZEN" => Some(SoilState::Frozen),
            "DEPLETED" => Some(SoilState::Depleted),
            "NUTRIENT_DENSE" => Some(SoilState::NutrientDense),
            _ => None,
        }
    }
}

/// Cycle-derived archetype (phase), mapped from cycle day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    Maiden,
    Mother,
    WildWoman,
    WiseWoman,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Maiden,
        Archetype::Mother,
        Archetype::WildWoman,
        Archetype::WiseWoman,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Maiden => "Maiden / Follicular",
            Archetype::Mother => "Mother / Ovulation",
            Archetype::WildWoman => "Wild Woman / Luteal",
            Archetype::WiseWoman => "Wise Woman / Menstrual",
        }
    }

    pub fn season(&self) -> &'static str {
        match self {
            Archetype::Maiden => "Spring",
            Archetype::Mother => "Summer",
            Archetype::WildWoman => "Autumn",
            Archetype::WiseWoman => "Winter",
        }
    }

    pub fn energy(&self) -> &'static str {
        match self {
            Archetype::Maiden => "Rising, expansive, learning",
            Archetype::Mother => "Peak, magnetic, radiant",
            Archetype::WildWoman => "Descending, discerning, truth-telling",
            Archetype::WiseWoman => "Lowest, intuitive, psychic, rest",
        }
    }

    pub fn superpower(&self) -> &'static str {
        match self {
            Archetype::Maiden => "Mental clarity, can hold complex concepts",
            Archetype::Mother => "You're irresistible without trying",
            Archetype::WildWoman => "BS detector is HIGH, you see what's not working",
            Archetype::WiseWoman => "The veil is thin, your intuition is a GPS",
        }
    }

    /// Recommended focus for work planned in this phase.
    pub fn focus(&self) -> &'static str {
        match self {
            Archetype::Maiden => "Build, learn, create content, strategize",
            Archetype::Mother => "Launch, go live, record videos, network, sales",
            Archetype::WildWoman => "Edit, refine, organize, admin, set boundaries",
            Archetype::WiseWoman => "Vision, journal, receive, REST",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Maiden => "MAIDEN",
            Archetype::Mother => "MOTHER",
            Archetype::WildWoman => "WILD_WOMAN",
            Archetype::WiseWoman => "WISE_WOMAN",
        }
    }

    pub fn parse(value: &str) -> Option<Archetype> {
        match value.to_ascii_uppercase().replace('-', "_").as_str() {
            "MAIDEN" => Some(Archetype::Maiden),
            "MOTHER" => Some(Archetype::Mother),
            "WILD_WOMAN" => Some(Archetype::WildWoman),
            "WISE_WOMAN" => Some(Archetype::WiseWoman),
            _ => None,
        }
    }
}

/// How much energy a task demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyRequired {
    Low,
    Medium,
    High,
}

/// Task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    Business,
    Personal,
    Creative,
    Rest,
}

/// Why a guidance snippet was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidanceKind {
    Daily,
    Requested,
    Affirmation,
}

/// Content calendar item status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
}

// =============================================================================
// Records
// =============================================================================

/// A timestamped nervous-system check-in. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub date: DateTime<Utc>,
    pub soil_state: SoilState,
    /// 1–10, validated on record.
    pub energy_level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Cycle day derived at check-in time.
    pub cycle_day: u32,
    /// Phase derived at check-in time.
    pub phase: Archetype,
}

/// A user task tagged with the phases it suits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub phases: Vec<Archetype>,
    pub energy_required: EnergyRequired,
    pub category: TaskCategory,
    pub completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
}

/// A journal entry stamped with the state it was written in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub cycle_day: u32,
    pub phase: Archetype,
    pub soil_state: SoilState,
}

/// A guidance snippet the user chose to keep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGuidance {
    pub id: String,
    pub date: DateTime<Utc>,
    pub prompt: String,
    pub kind: GuidanceKind,
    pub cycle_day: u32,
    pub phase: Archetype,
}

/// Reference catalog row: a somatic practice tagged with applicable phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SomaticPractice {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Duration in minutes.
    pub duration: u32,
    pub phases: Vec<Archetype>,
}

/// Reference catalog row: an herbal protocol tagged with applicable soil states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HerbalProtocol {
    pub id: String,
    pub name: String,
    pub herb: String,
    pub purpose: String,
    pub soil_states: Vec<SoilState>,
}

/// A scheduled content calendar item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub phase: Archetype,
    pub status: ContentStatus,
    pub scheduled_date: DateTime<Utc>,
}

/// A product offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub status: String,
    pub price: f64,
}

/// A service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub delivery_time: String,
}

/// Aggregate business metrics, updated wholesale from the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    pub current_cycle_revenue: f64,
    pub active_projects: u32,
    #[serde(default)]
    pub notes: String,
    pub last_updated: DateTime<Utc>,
}

impl Default for BusinessMetrics {
    fn default() -> Self {
        Self {
            current_cycle_revenue: 0.0,
            active_projects: 0,
            notes: String::new(),
            last_updated: Utc::now(),
        }
    }
}

/// Notification toggles. All on by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    #[serde(default = "default_true")]
    pub daily_guidance: bool,
    #[serde(default = "default_true")]
    pub phase_shifts: bool,
    #[serde(default = "default_true")]
    pub pillar_reminders: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            daily_guidance: true,
            phase_shifts: true,
            pillar_reminders: true,
        }
    }
}

/// Cycle configuration set at onboarding and editable in settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleInfo {
    pub last_period_start: DateTime<Utc>,
    /// Days. Typical range 21–35; must be ≥ 1.
    pub cycle_length: u32,
}

// =============================================================================
// Profile aggregate
// =============================================================================

/// The root aggregate. One per session, mutated wholesale (replace-and-persist)
/// on every update.
///
/// The five catalog collections and the metrics/notification groups were added
/// after the first shipped blob format, so they deserialize as `Option` —
/// `None` means "persisted before the collection existed" and is backfilled by
/// the load-time migration (`migrations::migrate_profile`). `None` and
/// `Some(vec![])` are distinct: absent catalog vs present-but-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub id: String,
    pub name: String,
    pub email: String,
    pub onboarded: bool,
    pub created_date: DateTime<Utc>,
    pub cycle_info: CycleInfo,
    /// IDs into the root-wound catalog. At most `MAX_ACTIVE_ROOT_WOUNDS`.
    #[serde(default)]
    pub active_root_wounds: Vec<String>,
    pub pillar_names: Vec<String>,
    /// Most-recent-first, capped at `MAX_CHECKIN_HISTORY`.
    #[serde(default)]
    pub daily_check_ins: Vec<CheckIn>,
    /// Calendar-date key ("YYYY-MM-DD") to per-pillar completion vector.
    #[serde(default)]
    pub pillar_completions: HashMap<String, Vec<bool>>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Most-recent-first.
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
    /// Most-recent-first.
    #[serde(default)]
    pub saved_guidance: Vec<SavedGuidance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub somatic_practices: Option<Vec<SomaticPractice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub herbal_protocols: Option<Vec<HerbalProtocol>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_calendar: Option<Vec<ContentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_metrics: Option<BusinessMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_preferences: Option<NotificationPreferences>,
}

fn default_schema_version() -> u32 {
    1
}

impl Profile {
    /// Somatic practice catalog, `None` when the blob predates catalogs and the
    /// migration has not run yet.
    pub fn somatic_practices(&self) -> Option<&[SomaticPractice]> {
        self.somatic_practices.as_deref()
    }

    pub fn herbal_protocols(&self) -> Option<&[HerbalProtocol]> {
        self.herbal_protocols.as_deref()
    }

    pub fn pillar_count(&self) -> usize {
        self.pillar_names.len()
    }
}
