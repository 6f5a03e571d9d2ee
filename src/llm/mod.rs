// ABOUTME: LLM integration layer: provider seam, pacing, retry, and prompt building
// ABOUTME: Defines the GenerationProvider contract implemented by the Gemini client
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # LLM Integration Layer
//!
//! The remote side of the engine, split along the seams the retry and
//! pacing logic need:
//!
//! - [`GenerationProvider`]: one prompt in, one raw text response out, a
//!   single attempt with typed error classification
//! - [`RequestPacer`]: serializes request start times to a minimum interval
//! - [`RetryExecutor`]: attempt ceiling and backoff wrapped around a provider
//! - [`prompts`]: pure prompt builders
//!
//! Keeping the provider a trait lets tests substitute scripted transports
//! without touching the retry or pacing math.

mod gemini;
mod pacer;
mod retry;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use pacer::RequestPacer;
pub use retry::{RetryExecutor, RetryPolicy};

use async_trait::async_trait;

use crate::errors::AppResult;

/// A text-generation backend
///
/// Implementations perform exactly one attempt per call; retries and pacing
/// are layered on by [`RetryExecutor`]. Errors must carry an
/// [`crate::errors::ErrorCode`] that classifies retryability.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Unique provider identifier (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Generate raw text for a prompt, single attempt
    ///
    /// # Errors
    ///
    /// Returns a classified error: `ExternalRateLimited` for throttling,
    /// `ExternalRequestError` for payload rejection, `ExternalEmptyResponse`
    /// for a 2xx exchange with no usable text, `ExternalServiceError`
    /// otherwise.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
