// ABOUTME: Maps parsed model output entries into canonical WellnessTip values
// ABOUTME: Assigns identity, resolves categories fuzzily, derives icons
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Domain Mapper
//!
//! The last stage of the pipeline: raw entries that survived parsing become
//! [`WellnessTip`] values with identity, a valid category, and the icon that
//! category implies. Category strings from the model are matched leniently
//! (`"Energy_Boost"` resolves to `energy-boost`); anything unresolvable
//! falls back to the caller's first goal so the invariant "category is a
//! valid enum value" always holds.

use chrono::Utc;
use serde::Deserialize;

use crate::models::{WellnessGoal, WellnessTip};

/// One entry of the model's recommendation array, pre-validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawTipEntry {
    /// Tip title
    pub title: Option<String>,
    /// One-sentence description
    pub description: Option<String>,
    /// Category string, matched fuzzily against the goal enum
    pub category: Option<String>,
}

impl RawTipEntry {
    /// Whether the entry carries all three required fields non-empty
    ///
    /// Entries truncated mid-array typically lose trailing fields; those are
    /// dropped rather than patched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let filled = |field: &Option<String>| {
            field.as_deref().is_some_and(|value| !value.trim().is_empty())
        };
        filled(&self.title) && filled(&self.description) && filled(&self.category)
    }
}

/// Generate a session-unique tip id from the creation instant and ordinal
///
/// Collisions require two ids with the same index within the same
/// millisecond; acceptable for a single-session client workload.
#[must_use]
pub fn tip_id(prefix: &str, index: usize) -> String {
    format!("{prefix}-{}-{index}", Utc::now().timestamp_millis())
}

/// Resolve a free-form category string to a goal
///
/// Exact match on the normalized form first, then substring containment in
/// either direction against the full goal list, then the caller's first
/// goal as last resort.
#[must_use]
pub fn resolve_category(raw: &str, goals: &[WellnessGoal]) -> WellnessGoal {
    let normalized = normalize_category(raw);

    if let Some(goal) = WellnessGoal::ALL
        .iter()
        .copied()
        .find(|goal| goal.as_str() == normalized)
    {
        return goal;
    }

    if !normalized.is_empty() {
        if let Some(goal) = WellnessGoal::ALL.iter().copied().find(|goal| {
            goal.as_str().contains(&normalized) || normalized.contains(goal.as_str())
        }) {
            return goal;
        }
    }

    goals.first().copied().unwrap_or(WellnessGoal::Mindfulness)
}

/// Lowercase and kebab-case a category string from the model
fn normalize_category(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace([' ', '_'], "-")
}

/// Map a surviving raw entry to a canonical tip
///
/// `index` is the entry's ordinal within the response, used for id
/// uniqueness. Missing fields get neutral defaults; `is_complete` filtering
/// upstream means that only happens for entries callers chose to keep
/// anyway.
#[must_use]
pub fn map_entry(entry: &RawTipEntry, index: usize, goals: &[WellnessGoal]) -> WellnessTip {
    let category = entry
        .category
        .as_deref()
        .map_or_else(
            || goals.first().copied().unwrap_or(WellnessGoal::Mindfulness),
            |raw| resolve_category(raw, goals),
        );

    WellnessTip {
        id: tip_id("tip", index),
        title: entry
            .title
            .clone()
            .unwrap_or_else(|| format!("Wellness Tip {}", index + 1)),
        short_description: entry
            .description
            .clone()
            .unwrap_or_else(|| "Improve your wellness with this tip".to_owned()),
        category,
        icon: category.icon().to_owned(),
        long_description: None,
        steps: Vec::new(),
        benefits: Vec::new(),
        time_required: None,
        difficulty: None,
        created_at: Utc::now(),
        is_saved: false,
        completed_steps: Vec::new(),
    }
}
