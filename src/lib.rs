// ABOUTME: Main library entry point for the wellness recommendation engine
// ABOUTME: Wires prompt building, paced Gemini calls, defensive parsing, and fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Wellness Engine
//!
//! An AI-response integration layer: it turns a user's demographic and goal
//! profile into browsable wellness tips by prompting a remote
//! text-generation model, and it survives everything that model can throw
//! back - throttling, truncated JSON, markdown-wrapped answers, or nothing
//! at all. Callers always receive usable, typed tips.
//!
//! ## Architecture
//!
//! - **LLM layer**: Gemini client behind a provider trait, wrapped by a
//!   request pacer (one call start per interval) and a retry executor
//!   (exponential backoff on throttling)
//! - **Parser**: multi-stage defensive pipeline - strict JSON, relaxed
//!   repair, regex extraction, fallback
//! - **Fallback**: deterministic substitute content that never fails
//! - **Engine**: orchestrates the pipeline with explicit outcome tracking
//! - **Storage**: key-value collaborator for profiles and saved tips
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wellness_engine::engine::RecommendationEngine;
//! use wellness_engine::errors::AppResult;
//! use wellness_engine::models::{Gender, UserProfile, WellnessGoal};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let engine = RecommendationEngine::from_env()?;
//!     let profile = UserProfile {
//!         name: None,
//!         age: 34,
//!         gender: Gender::Other,
//!         goals: vec![WellnessGoal::BetterSleep],
//!         goal_descriptions: std::collections::HashMap::new(),
//!     };
//!     let result = engine.generate_recommendations(&profile).await?;
//!     for tip in &result.tips {
//!         println!("{} {}: {}", tip.icon, tip.title, tip.short_description);
//!     }
//!     Ok(())
//! }
//! ```

/// Environment-based engine configuration
pub mod config;

/// Recommendation engine orchestration
pub mod engine;

/// Unified error handling system
pub mod errors;

/// Deterministic fallback content
pub mod fallback;

/// LLM provider, pacing, retry, and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Raw-entry to domain-tip mapping
pub mod mapper;

/// Core data models
pub mod models;

/// Defensive response parsing
pub mod parser;

/// Profile and tip storage collaborator
pub mod storage;
