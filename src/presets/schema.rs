use serde::{Deserialize, Serialize};

use crate::types::{HerbalProtocol, SomaticPractice};

/// A psychological theme the user can actively tend (max 3 at a time).
/// Reference data only — profiles store wound IDs, never copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootWound {
    pub id: String,
    pub name: String,
    pub description: String,
    pub affirmation: String,
}

/// Wrapper for `presets/root_wounds.json`.
#[derive(Debug, Deserialize)]
pub struct RootWoundCatalog {
    pub wounds: Vec<RootWound>,
}

/// Wrapper for `presets/somatic_practices.json`.
#[derive(Debug, Deserialize)]
pub struct SomaticCatalog {
    pub practices: Vec<SomaticPractice>,
}

/// Wrapper for `presets/herbal_protocols.json`.
#[derive(Debug, Deserialize)]
pub struct HerbalCatalog {
    pub protocols: Vec<HerbalProtocol>,
}
