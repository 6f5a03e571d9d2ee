// ABOUTME: Recommendation engine orchestrating prompt, remote call, parse, and fallback
// ABOUTME: Guarantees callers always receive usable tips, with explicit outcome tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Recommendation Engine
//!
//! Ties the pipeline together: prompt building, paced-and-retried remote
//! calls, defensive parsing, and fallback. The external contract is simple:
//!
//! - [`RecommendationEngine::generate_recommendations`] errs only on
//!   invalid profiles; any remote or parse failure degrades to fallback
//!   tips.
//! - [`RecommendationEngine::generate_detailed_explanation`] never fails at
//!   all.
//!
//! Internally each result carries a [`GenerationOutcome`] so degradation
//! stays observable in logs without leaking errors to callers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::errors::AppResult;
use crate::fallback;
use crate::llm::{prompts, GeminiProvider, GenerationProvider, RequestPacer, RetryExecutor, RetryPolicy};
use crate::models::{UserProfile, WellnessTip};
use crate::parser;

/// How a recommendation list came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The remote response contributed at least one tip
    Generated,
    /// The call succeeded but nothing in the response survived parsing
    ParseFallback,
    /// The remote call itself failed; list is pure fallback
    NetworkFallback,
}

impl Display for GenerationOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Generated => "generated",
            Self::ParseFallback => "parse-fallback",
            Self::NetworkFallback => "network-fallback",
        };
        f.write_str(label)
    }
}

/// A recommendation list with its provenance
#[derive(Debug, Clone)]
pub struct Recommendations {
    /// At least five tips, categories drawn from the requesting profile
    pub tips: Vec<WellnessTip>,
    /// Whether and how fallback content was involved
    pub outcome: GenerationOutcome,
}

/// The engine service instance
///
/// Explicitly constructed and passed around; holds its own pacer state and
/// credential rather than relying on process-wide globals.
pub struct RecommendationEngine {
    executor: RetryExecutor,
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Create an engine around any generation provider
    #[must_use]
    pub fn new(provider: Arc<dyn GenerationProvider>, config: EngineConfig) -> Self {
        let pacer = RequestPacer::new(config.min_request_interval);
        let policy = RetryPolicy {
            max_attempts: config.max_attempts,
            throttle_base_delay: config.throttle_base_delay,
            retry_delay: config.retry_delay,
        };
        Self {
            executor: RetryExecutor::new(provider, pacer, policy),
            config,
        }
    }

    /// Create an engine backed by Gemini, configured from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the API credential is not set. Callers
    /// that only need fallback content can construct their own provider-free
    /// path via [`crate::fallback::fallback_tips`].
    pub fn from_env() -> AppResult<Self> {
        let config = EngineConfig::from_env();
        let provider = GeminiProvider::from_env(config.clone())?;
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Generate a fresh recommendation list for a profile
    ///
    /// The list is created from scratch on every call (no merging with prior
    /// lists) and always contains at least five tips with categories from
    /// the profile's goal set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an out-of-range profile. Remote and parse
    /// failures do not surface as errors.
    #[instrument(skip(self, profile), fields(request_id = %Uuid::new_v4(), goals = profile.goals.len()))]
    pub async fn generate_recommendations(
        &self,
        profile: &UserProfile,
    ) -> AppResult<Recommendations> {
        profile.validate()?;

        let prompt = prompts::recommendation_prompt(profile, self.config.tip_count);

        let (tips, outcome) = match self.executor.call(&prompt).await {
            Ok(raw) => {
                match parser::try_parse_recommendations(&raw, &profile.goals, self.config.tip_count)
                {
                    Some(tips) => (tips, GenerationOutcome::Generated),
                    None => (
                        fallback::fallback_tips(&profile.goals),
                        GenerationOutcome::ParseFallback,
                    ),
                }
            }
            Err(error) => {
                warn!(code = ?error.code, %error, "generation call failed, serving fallback tips");
                (
                    fallback::fallback_tips(&profile.goals),
                    GenerationOutcome::NetworkFallback,
                )
            }
        };

        info!(count = tips.len(), %outcome, "recommendation list ready");
        Ok(Recommendations { tips, outcome })
    }

    /// Augment one tip with detail fields
    ///
    /// Returns a new tip value with identity and summary fields unchanged
    /// and every detail field populated, substituting default content for
    /// whatever the remote call or parse could not supply. Never fails.
    #[instrument(skip(self, tip, profile), fields(tip_id = %tip.id))]
    pub async fn generate_detailed_explanation(
        &self,
        tip: &WellnessTip,
        profile: &UserProfile,
    ) -> WellnessTip {
        let prompt = prompts::detail_prompt(tip, profile);

        let details = match self.executor.call(&prompt).await {
            Ok(raw) => parser::parse_detail(&raw).into_details(),
            Err(error) => {
                warn!(code = ?error.code, %error, "detail call failed, using default details");
                fallback::default_details()
            }
        };

        let augmented = details.apply_to(tip);
        info!(has_details = augmented.has_details(), "tip detail augmentation complete");
        augmented
    }
}
