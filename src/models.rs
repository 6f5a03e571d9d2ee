// ABOUTME: Core data models for the wellness engine
// ABOUTME: Defines UserProfile, WellnessGoal, WellnessTip and static lookup tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Core data structures shared by the generation pipeline and the storage
//! collaborator.
//!
//! ## Design Principles
//!
//! - **Serializable**: all models round-trip through JSON for storage
//! - **Type Safe**: goals and difficulty are closed enums, never raw strings
//! - **Derived fields**: a tip's icon is always a function of its category

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Minimum accepted profile age
pub const MIN_AGE: u8 = 13;
/// Maximum accepted profile age
pub const MAX_AGE: u8 = 120;
/// Maximum number of goals a profile may carry
pub const MAX_GOALS: usize = 3;

/// User gender selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    /// String form used in prompts and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::PreferNotToSay => "prefer-not-to-say",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Closed enumeration of the ten wellness focus areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WellnessGoal {
    WeightLoss,
    MuscleGain,
    BetterSleep,
    StressManagement,
    HealthyEating,
    MentalHealth,
    EnergyBoost,
    Flexibility,
    Cardiovascular,
    Mindfulness,
}

impl WellnessGoal {
    /// All goals, in canonical order
    pub const ALL: [Self; 10] = [
        Self::WeightLoss,
        Self::MuscleGain,
        Self::BetterSleep,
        Self::StressManagement,
        Self::HealthyEating,
        Self::MentalHealth,
        Self::EnergyBoost,
        Self::Flexibility,
        Self::Cardiovascular,
        Self::Mindfulness,
    ];

    /// Canonical kebab-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "weight-loss",
            Self::MuscleGain => "muscle-gain",
            Self::BetterSleep => "better-sleep",
            Self::StressManagement => "stress-management",
            Self::HealthyEating => "healthy-eating",
            Self::MentalHealth => "mental-health",
            Self::EnergyBoost => "energy-boost",
            Self::Flexibility => "flexibility",
            Self::Cardiovascular => "cardiovascular",
            Self::Mindfulness => "mindfulness",
        }
    }

    /// Display label for UI collaborators
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::MuscleGain => "Muscle Gain",
            Self::BetterSleep => "Better Sleep",
            Self::StressManagement => "Stress Management",
            Self::HealthyEating => "Healthy Eating",
            Self::MentalHealth => "Mental Health",
            Self::EnergyBoost => "Energy Boost",
            Self::Flexibility => "Flexibility",
            Self::Cardiovascular => "Cardiovascular Health",
            Self::Mindfulness => "Mindfulness",
        }
    }

    /// Display icon, derived 1:1 from the goal
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::WeightLoss => "⚖️",
            Self::MuscleGain => "💪",
            Self::BetterSleep => "😴",
            Self::StressManagement => "🧘",
            Self::HealthyEating => "🥗",
            Self::MentalHealth => "🧠",
            Self::EnergyBoost => "⚡",
            Self::Flexibility => "🤸",
            Self::Cardiovascular => "❤️",
            Self::Mindfulness => "🌸",
        }
    }

    /// Placeholder used in prompts when the profile carries no free-text
    /// description for this goal
    #[must_use]
    pub const fn prompt_hint(self) -> &'static str {
        match self {
            Self::WeightLoss => "general weight loss progress",
            Self::MuscleGain => "general muscle building progress",
            Self::BetterSleep => "improving sleep quality",
            Self::StressManagement => "managing day-to-day stress",
            Self::HealthyEating => "building healthier eating habits",
            Self::MentalHealth => "supporting mental wellbeing",
            Self::EnergyBoost => "increasing daily energy levels",
            Self::Flexibility => "improving overall flexibility",
            Self::Cardiovascular => "improving cardiovascular fitness",
            Self::Mindfulness => "developing a mindfulness practice",
        }
    }
}

impl Display for WellnessGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for WellnessGoal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("unknown wellness goal: {s}")))
    }
}

/// Difficulty rating for a detail-augmented tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// String form used in prompts and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse with the engine's lenient default: anything unrecognized is Easy
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Demographic and goal profile driving a recommendation request
///
/// Immutable once submitted for a request; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Optional display name
    pub name: Option<String>,
    /// Age in years, 13-120
    pub age: u8,
    /// Gender selection
    pub gender: Gender,
    /// Ordered goal set, 1-3 entries
    pub goals: Vec<WellnessGoal>,
    /// Optional free-text description per goal
    #[serde(default)]
    pub goal_descriptions: HashMap<WellnessGoal, String>,
}

impl UserProfile {
    /// Validate the profile against the accepted ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when age is out of range or the goal set is
    /// empty, oversized, or contains duplicates.
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(AppError::invalid_input(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}, got {}",
                self.age
            )));
        }
        if self.goals.is_empty() {
            return Err(AppError::invalid_input("at least one goal is required"));
        }
        if self.goals.len() > MAX_GOALS {
            return Err(AppError::invalid_input(format!(
                "at most {MAX_GOALS} goals are allowed, got {}",
                self.goals.len()
            )));
        }
        let mut seen = self.goals.clone();
        seen.sort_unstable_by_key(|goal| goal.as_str());
        seen.dedup();
        if seen.len() != self.goals.len() {
            return Err(AppError::invalid_input("goals must be distinct"));
        }
        Ok(())
    }

    /// Free-text description for a goal, or its generic placeholder
    #[must_use]
    pub fn goal_description(&self, goal: WellnessGoal) -> &str {
        self.goal_descriptions
            .get(&goal)
            .map_or_else(|| goal.prompt_hint(), String::as_str)
    }
}

/// A single actionable wellness recommendation
///
/// Summary fields (`id`, `title`, `short_description`, `category`, `icon`,
/// `created_at`) are set at creation and never change. Detail fields are
/// populated by detail augmentation. `is_saved` and `completed_steps` belong
/// to the storage layer, never to generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessTip {
    /// Opaque unique identifier (creation instant + ordinal index)
    pub id: String,
    /// Short title
    pub title: String,
    /// One-sentence summary
    pub short_description: String,
    /// Primary goal this tip addresses, always from the profile's goal set
    pub category: WellnessGoal,
    /// Display icon, always consistent with `category`
    pub icon: String,
    /// Detailed explanation, populated by detail augmentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Ordered implementation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Key benefits
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Free-text time estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_required: Option<String>,
    /// Difficulty rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Creation timestamp, never mutated
    pub created_at: DateTime<Utc>,
    /// Whether the user saved this tip (storage-owned)
    #[serde(default)]
    pub is_saved: bool,
    /// Indices of steps the user marked complete (storage-owned)
    #[serde(default)]
    pub completed_steps: Vec<usize>,
}

impl WellnessTip {
    /// Whether detail augmentation has populated the detail fields
    #[must_use]
    pub fn has_details(&self) -> bool {
        self.long_description.is_some()
            && !self.steps.is_empty()
            && !self.benefits.is_empty()
            && self.time_required.is_some()
            && self.difficulty.is_some()
    }
}

/// Detail fields produced by detail augmentation
///
/// All fields are concrete: the parser substitutes defaults rather than
/// leaving holes, so applying details always yields a detail-complete tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipDetails {
    /// Detailed multi-paragraph explanation
    pub long_description: String,
    /// Ordered implementation steps
    pub steps: Vec<String>,
    /// Key benefits
    pub benefits: Vec<String>,
    /// Free-text time estimate
    pub time_required: String,
    /// Difficulty rating
    pub difficulty: Difficulty,
}

impl TipDetails {
    /// Return a copy of `tip` with detail fields populated
    ///
    /// Identity and summary fields are untouched.
    #[must_use]
    pub fn apply_to(&self, tip: &WellnessTip) -> WellnessTip {
        let mut augmented = tip.clone();
        augmented.long_description = Some(self.long_description.clone());
        augmented.steps = self.steps.clone();
        augmented.benefits = self.benefits.clone();
        augmented.time_required = Some(self.time_required.clone());
        augmented.difficulty = Some(self.difficulty);
        augmented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(goals: Vec<WellnessGoal>) -> UserProfile {
        UserProfile {
            name: None,
            age: 30,
            gender: Gender::Other,
            goals,
            goal_descriptions: HashMap::new(),
        }
    }

    #[test]
    fn test_goal_round_trip() {
        for goal in WellnessGoal::ALL {
            assert_eq!(goal.as_str().parse::<WellnessGoal>().unwrap(), goal);
        }
    }

    #[test]
    fn test_goal_serde_kebab_case() {
        let json = serde_json::to_string(&WellnessGoal::EnergyBoost).unwrap();
        assert_eq!(json, "\"energy-boost\"");
        let parsed: WellnessGoal = serde_json::from_str("\"better-sleep\"").unwrap();
        assert_eq!(parsed, WellnessGoal::BetterSleep);
    }

    #[test]
    fn test_profile_validation_bounds() {
        assert!(profile(vec![WellnessGoal::Mindfulness]).validate().is_ok());

        let mut too_young = profile(vec![WellnessGoal::Mindfulness]);
        too_young.age = 12;
        assert!(too_young.validate().is_err());

        assert!(profile(vec![]).validate().is_err());

        let too_many = profile(vec![
            WellnessGoal::WeightLoss,
            WellnessGoal::MuscleGain,
            WellnessGoal::BetterSleep,
            WellnessGoal::Mindfulness,
        ]);
        assert!(too_many.validate().is_err());

        let duplicated = profile(vec![WellnessGoal::WeightLoss, WellnessGoal::WeightLoss]);
        assert!(duplicated.validate().is_err());
    }

    #[test]
    fn test_goal_description_falls_back_to_hint() {
        let mut with_text = profile(vec![WellnessGoal::BetterSleep]);
        with_text
            .goal_descriptions
            .insert(WellnessGoal::BetterSleep, "wake at 3am nightly".into());
        assert_eq!(
            with_text.goal_description(WellnessGoal::BetterSleep),
            "wake at 3am nightly"
        );
        assert_eq!(
            with_text.goal_description(WellnessGoal::EnergyBoost),
            WellnessGoal::EnergyBoost.prompt_hint()
        );
    }

    #[test]
    fn test_difficulty_lenient_parse() {
        assert_eq!(Difficulty::from_str_or_default("Hard"), Difficulty::Hard);
        assert_eq!(Difficulty::from_str_or_default(" medium "), Difficulty::Medium);
        assert_eq!(Difficulty::from_str_or_default("extreme"), Difficulty::Easy);
        assert_eq!(Difficulty::from_str_or_default(""), Difficulty::Easy);
    }
}
