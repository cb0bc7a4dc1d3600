//! Profile blob schema migrations.
//!
//! Numbered migrations run exactly once at load time, tracked by the
//! `schemaVersion` field in the blob. Each migration owns one group of
//! default-filling: a blob written by an older build deserializes with the
//! newer collections absent, and the migration maps it to the current shape.

use crate::types::{BusinessMetrics, NotificationPreferences, Profile};

#[cfg(test)]
use crate::types::PROFILE_SCHEMA_VERSION;

struct Migration {
    version: u32,
    apply: fn(&mut Profile),
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 2,
    apply: backfill_catalogs,
}];

/// Bring a loaded profile up to the current schema version.
///
/// Returns true if any migration ran (the caller should persist the result).
pub fn migrate_profile(profile: &mut Profile) -> bool {
    let mut migrated = false;
    for migration in MIGRATIONS {
        if profile.schema_version < migration.version {
            (migration.apply)(profile);
            profile.schema_version = migration.version;
            log::info!("Profile migrated to schema v{}", migration.version);
            migrated = true;
        }
    }
    migrated
}

/// v1 → v2: the catalog collections, business metrics, and notification
/// preferences did not exist in the first shipped blob format. Somatic and
/// herbal catalogs backfill from the embedded presets; the commerce and
/// content collections start empty; metrics and notifications take their
/// defaults.
fn backfill_catalogs(profile: &mut Profile) {
    if profile.somatic_practices.is_none() {
        profile.somatic_practices = Some(crate::presets::default_somatic_practices());
    }
    if profile.herbal_protocols.is_none() {
        profile.herbal_protocols = Some(crate::presets::default_herbal_protocols());
    }
    if profile.content_calendar.is_none() {
        profile.content_calendar = Some(Vec::new());
    }
    if profile.products.is_none() {
        profile.products = Some(Vec::new());
    }
    if profile.services.is_none() {
        profile.services = Some(Vec::new());
    }
    if profile.business_metrics.is_none() {
        profile.business_metrics = Some(BusinessMetrics::default());
    }
    if profile.notification_preferences.is_none() {
        profile.notification_preferences = Some(NotificationPreferences::default());
    }
}
