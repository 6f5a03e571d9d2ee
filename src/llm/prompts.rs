// ABOUTME: Prompt builders for recommendation lists and tip detail requests
// ABOUTME: Pure functions rendering profile context plus strict JSON output instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Prompt Builders
//!
//! Two pure functions, no side effects. Both instruct the model to answer
//! with raw JSON so the defensive parser has the best chance of a clean
//! strict parse, and both constrain field counts to bound response size.

use std::fmt::Write as _;

use crate::models::{UserProfile, WellnessTip};

/// Number of implementation steps requested from the detail prompt
pub const DETAIL_STEP_COUNT: usize = 5;
/// Number of benefits requested from the detail prompt
pub const DETAIL_BENEFIT_COUNT: usize = 4;

/// Build the recommendation-list prompt for a profile
///
/// Requests a JSON array of exactly `count` objects with `title`,
/// `description`, and `category` fields, the category restricted to the
/// profile's own goal set.
#[must_use]
pub fn recommendation_prompt(profile: &UserProfile, count: usize) -> String {
    let goal_list = profile
        .goals
        .iter()
        .map(|goal| goal.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are a professional wellness coach. Generate {count} personalized, \
         actionable wellness tips for this person:"
    );
    let _ = writeln!(prompt, "- Age: {}", profile.age);
    let _ = writeln!(prompt, "- Gender: {}", profile.gender);
    if let Some(name) = &profile.name {
        let _ = writeln!(prompt, "- Name: {name}");
    }
    let _ = writeln!(prompt, "- Goals:");
    for goal in &profile.goals {
        let _ = writeln!(
            prompt,
            "  - {}: {}",
            goal.as_str(),
            profile.goal_description(*goal)
        );
    }
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Respond with a JSON array of exactly {count} objects. Each object must \
         have exactly these fields:"
    );
    let _ = writeln!(prompt, "  \"title\": short, catchy title (max 8 words)");
    let _ = writeln!(prompt, "  \"description\": one sentence, max 20 words");
    let _ = writeln!(
        prompt,
        "  \"category\": one of [{goal_list}] - the goal the tip addresses"
    );
    let _ = writeln!(prompt);
    let _ = write!(
        prompt,
        "Make tips specific and varied (physical, mental, dietary, lifestyle). \
         Respond with raw JSON only. Do not wrap the answer in markdown code \
         fences or add any text outside the array."
    );
    prompt
}

/// Build the detail-augmentation prompt for one tip
///
/// Requests a single JSON object with fixed-size `steps` and `benefits`
/// arrays to keep the response bounded.
#[must_use]
pub fn detail_prompt(tip: &WellnessTip, profile: &UserProfile) -> String {
    let goal_list = profile
        .goals
        .iter()
        .map(|goal| goal.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Based on this wellness tip: \"{}\" - {}",
        tip.title, tip.short_description
    );
    let _ = writeln!(
        prompt,
        "For a {}-year-old {} focused on: {goal_list}.",
        profile.age, profile.gender
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Respond with a single JSON object with exactly these fields:"
    );
    let _ = writeln!(
        prompt,
        "  \"longDescription\": detailed explanation, 2-3 paragraphs as one string"
    );
    let _ = writeln!(
        prompt,
        "  \"steps\": array of exactly {DETAIL_STEP_COUNT} step-by-step instructions"
    );
    let _ = writeln!(
        prompt,
        "  \"benefits\": array of exactly {DETAIL_BENEFIT_COUNT} key benefits"
    );
    let _ = writeln!(prompt, "  \"timeRequired\": e.g. \"15-30 minutes daily\"");
    let _ = writeln!(prompt, "  \"difficulty\": one of \"easy\", \"medium\", \"hard\"");
    let _ = writeln!(prompt);
    let _ = write!(
        prompt,
        "Respond with raw JSON only. Do not wrap the answer in markdown code \
         fences or add any text outside the object."
    );
    prompt
}
