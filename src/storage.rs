// ABOUTME: Storage collaborator for profiles, saved tips, and cached recommendations
// ABOUTME: Key-value style trait with an in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Tip Store
//!
//! The engine treats persistence as a simple get/set collaborator with no
//! transactional semantics: the current profile, the saved-tip collection
//! (the one place `is_saved` and `completed_steps` are mutated), and the
//! cached recommendation list. [`MemoryStore`] is the bundled backend;
//! alternative backends implement [`TipStore`].
//!
//! The whole store round-trips through a single JSON document via
//! [`TipStore::export_data`] and [`TipStore::import_data`] so sessions can
//! be carried between backends.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{UserProfile, WellnessTip};

/// Pluggable storage backend for profiles, tips, and cached recommendations
#[async_trait]
pub trait TipStore: Send + Sync {
    /// Current user profile, if one was submitted
    async fn profile(&self) -> AppResult<Option<UserProfile>>;

    /// Replace the current user profile
    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()>;

    /// All saved tips, in save order
    async fn saved_tips(&self) -> AppResult<Vec<WellnessTip>>;

    /// Toggle a tip's saved state
    ///
    /// Inserting marks the stored copy `is_saved = true`. Returns whether
    /// the tip is saved after the call.
    async fn toggle_saved(&self, tip: &WellnessTip) -> AppResult<bool>;

    /// Whether a tip id is currently saved
    async fn is_saved(&self, tip_id: &str) -> AppResult<bool>;

    /// Toggle completion of one step on a saved tip
    ///
    /// Returns whether the step is marked complete after the call. Fails
    /// with a storage error when no saved tip carries `tip_id`.
    async fn toggle_completed_step(&self, tip_id: &str, step_index: usize) -> AppResult<bool>;

    /// Cached recommendation list from the last generation
    async fn recommendations(&self) -> AppResult<Vec<WellnessTip>>;

    /// Replace the cached recommendation list
    async fn save_recommendations(&self, tips: &[WellnessTip]) -> AppResult<()>;

    /// When any stored data last changed
    async fn last_updated(&self) -> AppResult<Option<DateTime<Utc>>>;

    /// Serialize the whole store to a JSON document
    async fn export_data(&self) -> AppResult<String>;

    /// Load data from an exported JSON document
    ///
    /// Sections absent from the document leave the corresponding store
    /// contents untouched. Returns `false` without modifying anything when
    /// the document is unparseable.
    async fn import_data(&self, json: &str) -> AppResult<bool>;

    /// Drop profile and cached recommendations, keeping saved tips
    async fn clear_session(&self) -> AppResult<()>;

    /// Drop everything
    async fn clear_all(&self) -> AppResult<()>;
}

/// Wire form of an exported store
///
/// All sections are optional on the way in so partial documents apply
/// cleanly; exports always write every section.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope {
    profile: Option<UserProfile>,
    saved_tips: Option<Vec<WellnessTip>>,
    recommendations: Option<Vec<WellnessTip>>,
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    profile: Option<UserProfile>,
    saved: Vec<WellnessTip>,
    recommendations: Vec<WellnessTip>,
    last_updated: Option<DateTime<Utc>>,
}

impl StoreInner {
    fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }
}

/// In-memory store, suitable for a single session
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TipStore for MemoryStore {
    async fn profile(&self) -> AppResult<Option<UserProfile>> {
        Ok(self.inner.read().await.profile.clone())
    }

    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.profile = Some(profile.clone());
        inner.touch();
        Ok(())
    }

    async fn saved_tips(&self) -> AppResult<Vec<WellnessTip>> {
        Ok(self.inner.read().await.saved.clone())
    }

    async fn toggle_saved(&self, tip: &WellnessTip) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let saved_now = if let Some(position) = inner.saved.iter().position(|t| t.id == tip.id) {
            inner.saved.remove(position);
            false
        } else {
            let mut copy = tip.clone();
            copy.is_saved = true;
            inner.saved.push(copy);
            true
        };
        inner.touch();
        Ok(saved_now)
    }

    async fn is_saved(&self, tip_id: &str) -> AppResult<bool> {
        Ok(self.inner.read().await.saved.iter().any(|t| t.id == tip_id))
    }

    async fn toggle_completed_step(&self, tip_id: &str, step_index: usize) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let tip = inner
            .saved
            .iter_mut()
            .find(|t| t.id == tip_id)
            .ok_or_else(|| AppError::storage(format!("tip {tip_id} is not saved")))?;

        let completed_now = if let Some(position) =
            tip.completed_steps.iter().position(|&i| i == step_index)
        {
            tip.completed_steps.remove(position);
            false
        } else {
            tip.completed_steps.push(step_index);
            tip.completed_steps.sort_unstable();
            true
        };
        inner.touch();
        Ok(completed_now)
    }

    async fn recommendations(&self) -> AppResult<Vec<WellnessTip>> {
        Ok(self.inner.read().await.recommendations.clone())
    }

    async fn save_recommendations(&self, tips: &[WellnessTip]) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.recommendations = tips.to_vec();
        inner.touch();
        Ok(())
    }

    async fn last_updated(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.inner.read().await.last_updated)
    }

    async fn export_data(&self) -> AppResult<String> {
        let inner = self.inner.read().await;
        let envelope = ExportEnvelope {
            profile: inner.profile.clone(),
            saved_tips: Some(inner.saved.clone()),
            recommendations: Some(inner.recommendations.clone()),
            last_updated: inner.last_updated,
        };
        serde_json::to_string_pretty(&envelope).map_err(|e| {
            AppError::new(ErrorCode::SerializationError, "export serialization failed")
                .with_source(e)
        })
    }

    async fn import_data(&self, json: &str) -> AppResult<bool> {
        let envelope = match serde_json::from_str::<ExportEnvelope>(json) {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!(%error, "rejecting unparseable import document");
                return Ok(false);
            }
        };

        let mut inner = self.inner.write().await;
        if let Some(profile) = envelope.profile {
            inner.profile = Some(profile);
        }
        if let Some(saved) = envelope.saved_tips {
            inner.saved = saved;
        }
        if let Some(recommendations) = envelope.recommendations {
            inner.recommendations = recommendations;
        }
        inner.touch();
        Ok(true)
    }

    async fn clear_session(&self) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.profile = None;
        inner.recommendations.clear();
        inner.touch();
        Ok(())
    }

    async fn clear_all(&self) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        *inner = StoreInner::default();
        Ok(())
    }
}
