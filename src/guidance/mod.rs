//! AI guidance: prompt building, the text-generation client, and the
//! stale-response guard for in-flight requests.
//!
//! Generation failures never surface to the user as errors — every caller
//! gets either generated text or a fixed fallback line.

pub mod client;
pub mod prompts;
pub mod session;

pub use client::*;
pub use prompts::*;
pub use session::*;

use crate::types::Profile;

/// Shown when the daily guidance call fails outright.
pub const DAILY_FALLBACK: &str = "The stars are silent right now. Trust your own internal rhythm.";

/// Shown when the daily guidance call succeeds but returns nothing.
pub const DAILY_EMPTY: &str = "May your cycle guide your soul today. Focus on inner alignment.";

/// Shown when an oracle call fails outright.
pub const ORACLE_FALLBACK: &str = "Oracle connection interrupted. Sit in silence for a moment.";

/// Shown when an oracle call succeeds but returns nothing.
pub const ORACLE_EMPTY: &str = "Your wisdom lies within.";

/// Generate the daily guidance message for the profile's current state.
pub async fn daily_guidance(generator: &dyn TextGenerator, profile: &Profile) -> String {
    let prompt = build_daily_guidance_prompt(profile);
    match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => DAILY_EMPTY.to_string(),
        Err(e) => {
            log::warn!("Daily guidance generation failed: {}", e);
            DAILY_FALLBACK.to_string()
        }
    }
}

/// Answer a free-form question in the context of the profile's current state.
pub async fn ask_oracle(
    generator: &dyn TextGenerator,
    profile: &Profile,
    question: &str,
) -> String {
    let prompt = build_oracle_prompt(profile, question);
    match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => ORACLE_EMPTY.to_string(),
        Err(e) => {
            log::warn!("Oracle generation failed: {}", e);
            ORACLE_FALLBACK.to_string()
        }
    }
}
