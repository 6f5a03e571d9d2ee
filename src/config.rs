// ABOUTME: Environment-based configuration for the wellness engine
// ABOUTME: Parses generation parameters, pacing intervals, and retry settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-only configuration, parsed once at startup.
//!
//! Every knob has a production default; unset variables fall back silently,
//! malformed values fall back with a warning. The API credential itself is
//! read by the Gemini provider, not here, so that fallback-only operation
//! works without any configuration at all.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Lower bound for the request pacing interval
const MIN_INTERVAL_FLOOR_MS: u64 = 1000;
/// Upper bound for the request pacing interval
const MIN_INTERVAL_CEIL_MS: u64 = 2000;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Gemini model identifier
    pub model: String,
    /// Sampling temperature for the recommendation prompt
    pub temperature: f32,
    /// Maximum output tokens per generation
    pub max_output_tokens: u32,
    /// Nucleus sampling parameter
    pub top_p: f32,
    /// Top-k sampling parameter
    pub top_k: u32,
    /// Requested number of tips per recommendation list (5 or 6)
    pub tip_count: usize,
    /// Minimum interval between remote call starts
    pub min_request_interval: Duration,
    /// Total attempts per remote call (including the first)
    pub max_attempts: u32,
    /// Base delay for exponential backoff on throttling responses
    pub throttle_base_delay: Duration,
    /// Fixed delay before retrying non-throttling failures
    pub retry_delay: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// HTTP connect timeout
    pub connect_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_owned(),
            temperature: 0.7,
            max_output_tokens: 1024,
            top_p: 0.9,
            top_k: 40,
            tip_count: 6,
            min_request_interval: Duration::from_millis(1500),
            max_attempts: 3,
            throttle_base_delay: Duration::from_secs(2),
            retry_delay: Duration::from_millis(1500),
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let tip_count = env_parsed("WELLNESS_TIP_COUNT", defaults.tip_count).clamp(5, 6);
        let interval_ms = env_parsed(
            "WELLNESS_MIN_REQUEST_INTERVAL_MS",
            defaults.min_request_interval.as_millis() as u64,
        )
        .clamp(MIN_INTERVAL_FLOOR_MS, MIN_INTERVAL_CEIL_MS);

        Self {
            model: env::var("WELLNESS_GEMINI_MODEL").unwrap_or(defaults.model),
            temperature: env_parsed("WELLNESS_TEMPERATURE", defaults.temperature),
            max_output_tokens: env_parsed("WELLNESS_MAX_OUTPUT_TOKENS", defaults.max_output_tokens),
            top_p: env_parsed("WELLNESS_TOP_P", defaults.top_p),
            top_k: env_parsed("WELLNESS_TOP_K", defaults.top_k),
            tip_count,
            min_request_interval: Duration::from_millis(interval_ms),
            max_attempts: env_parsed("WELLNESS_MAX_ATTEMPTS", defaults.max_attempts).max(1),
            throttle_base_delay: Duration::from_millis(env_parsed(
                "WELLNESS_THROTTLE_BASE_DELAY_MS",
                defaults.throttle_base_delay.as_millis() as u64,
            )),
            retry_delay: Duration::from_millis(env_parsed(
                "WELLNESS_RETRY_DELAY_MS",
                defaults.retry_delay.as_millis() as u64,
            )),
            request_timeout: Duration::from_secs(env_parsed(
                "WELLNESS_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            connect_timeout: Duration::from_secs(env_parsed(
                "WELLNESS_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )),
        }
    }
}

/// Parse an environment variable, warning and falling back on bad values
fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparseable environment value");
            default
        }),
        Err(_) => default,
    }
}
