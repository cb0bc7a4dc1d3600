use super::schema::{HerbalCatalog, RootWound, RootWoundCatalog, SomaticCatalog};
use crate::types::{HerbalProtocol, SomaticPractice};

const ROOT_WOUNDS_JSON: &str = include_str!("../../presets/root_wounds.json");
const SOMATIC_JSON: &str = include_str!("../../presets/somatic_practices.json");
const HERBAL_JSON: &str = include_str!("../../presets/herbal_protocols.json");

/// The full root-wound catalog (15 entries).
pub fn root_wounds() -> Vec<RootWound> {
    match serde_json::from_str::<RootWoundCatalog>(ROOT_WOUNDS_JSON) {
        Ok(catalog) => catalog.wounds,
        Err(e) => {
            log::error!("Embedded root-wound catalog failed to parse: {}", e);
            Vec::new()
        }
    }
}

/// Look up one root wound by catalog ID.
pub fn wound_by_id(id: &str) -> Option<RootWound> {
    root_wounds().into_iter().find(|w| w.id == id)
}

/// Default somatic practice catalog, seeded into profiles that predate
/// the catalog collections.
pub fn default_somatic_practices() -> Vec<SomaticPractice> {
    match serde_json::from_str::<SomaticCatalog>(SOMATIC_JSON) {
        Ok(catalog) => catalog.practices,
        Err(e) => {
            log::error!("Embedded somatic catalog failed to parse: {}", e);
            Vec::new()
        }
    }
}

/// Default herbal protocol catalog, seeded into profiles that predate
/// the catalog collections.
pub fn default_herbal_protocols() -> Vec<HerbalProtocol> {
    match serde_json::from_str::<HerbalCatalog>(HERBAL_JSON) {
        Ok(catalog) => catalog.protocols,
        Err(e) => {
            log::error!("Embedded herbal catalog failed to parse: {}", e);
            Vec::new()
        }
    }
}
