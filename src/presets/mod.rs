//! Embedded reference catalogs: root wounds, default somatic practices,
//! default herbal protocols, default pillar names.
//!
//! Catalog JSON is embedded at compile time via `include_str!` so a fresh
//! profile never depends on files being installed next to the binary.

pub mod embedded;
pub mod schema;

pub use embedded::*;
pub use schema::*;

/// Default names for the eight daily pillars, assigned at onboarding and
/// free-form renamed afterwards.
pub const DEFAULT_PILLARS: [&str; 8] = [
    "Nervous System Regulation",
    "Movement",
    "Journaling",
    "Boundaries",
    "Rest",
    "Nourishment",
    "Spiritual Connection",
    "Mindset & Abundance",
];
