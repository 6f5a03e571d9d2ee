// ABOUTME: Deterministic fallback content used when generation or parsing fails
// ABOUTME: Static tip templates and default detail content, never touches the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Fallback Generator
//!
//! Static substitute content guaranteeing the engine always has something
//! usable to return. Templates are module-level constants; the only runtime
//! inputs are the caller's goals (for category remapping) and the clock
//! (for ids and timestamps). Nothing here can fail.

use chrono::Utc;

use crate::mapper::tip_id;
use crate::models::{Difficulty, TipDetails, WellnessGoal, WellnessTip};

/// Minimum number of tips a recommendation list must contain
pub const MIN_TIPS: usize = 5;

/// A static tip template with its natural category
struct TipTemplate {
    title: &'static str,
    description: &'static str,
    category: WellnessGoal,
}

/// Curated templates covering a spread of goal areas
const TEMPLATES: [TipTemplate; 5] = [
    TipTemplate {
        title: "Morning Hydration Ritual",
        description: "Start your day with 16oz of water",
        category: WellnessGoal::EnergyBoost,
    },
    TipTemplate {
        title: "5-Minute Mindful Breathing",
        description: "Practice deep breathing exercises",
        category: WellnessGoal::StressManagement,
    },
    TipTemplate {
        title: "Evening Walk Challenge",
        description: "Take a 20-minute walk after dinner",
        category: WellnessGoal::Cardiovascular,
    },
    TipTemplate {
        title: "Protein-Rich Breakfast",
        description: "Include 20g protein in your morning meal",
        category: WellnessGoal::HealthyEating,
    },
    TipTemplate {
        title: "Digital Sunset Routine",
        description: "No screens for 1 hour before bed",
        category: WellnessGoal::BetterSleep,
    },
];

/// Build a full fallback recommendation list for a goal set
///
/// Each template keeps its natural category when the caller's goal set
/// contains it, and is remapped to the first goal otherwise, preserving the
/// invariant that every returned category is relevant to the caller.
#[must_use]
pub fn fallback_tips(goals: &[WellnessGoal]) -> Vec<WellnessTip> {
    let default_goal = goals.first().copied().unwrap_or(WellnessGoal::Mindfulness);

    TEMPLATES
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let category = if goals.contains(&template.category) {
                template.category
            } else {
                default_goal
            };
            WellnessTip {
                id: tip_id("fallback", index),
                title: template.title.to_owned(),
                short_description: template.description.to_owned(),
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
        })
        .collect()
}

/// Build one padding tip, cycling categories over the caller's goals
///
/// Used when a parsed list survives with fewer than [`MIN_TIPS`] entries.
#[must_use]
pub fn generated_tip(index: usize, goals: &[WellnessGoal]) -> WellnessTip {
    let category = goals
        .get(index % goals.len().max(1))
        .copied()
        .unwrap_or(WellnessGoal::Mindfulness);

    WellnessTip {
        id: tip_id("generated", index),
        title: format!("Custom Wellness Tip {}", index + 1),
        short_description: "Personalized recommendation for your goals".to_owned(),
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

/// Default detail content used when detail augmentation fails entirely
#[must_use]
pub fn default_details() -> TipDetails {
    TipDetails {
        long_description: "This practice is an excellent way to improve your wellness. \
            It has been shown to benefit both physical and mental health, and by \
            incorporating it into your daily routine you can expect gradual, \
            sustainable improvements in your overall wellbeing."
            .to_owned(),
        steps: vec![
            "Begin with a clear intention and commitment".to_owned(),
            "Start small and build gradually".to_owned(),
            "Track your progress in a journal".to_owned(),
            "Find an accountability partner if possible".to_owned(),
            "Adjust the practice to fit your lifestyle".to_owned(),
            "Be patient and consistent with your efforts".to_owned(),
        ],
        benefits: vec![
            "Enhanced overall wellness and vitality".to_owned(),
            "Improved physical and mental resilience".to_owned(),
            "Better stress management capabilities".to_owned(),
            "Increased energy throughout the day".to_owned(),
        ],
        time_required: "15-30 minutes".to_owned(),
        difficulty: Difficulty::Easy,
    }
}
