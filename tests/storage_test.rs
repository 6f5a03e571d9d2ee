// ABOUTME: Integration tests for the in-memory tip store
// ABOUTME: Covers profile round-trips, saved-tip toggling, and session clearing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;

use wellness_engine::fallback::fallback_tips;
use wellness_engine::models::{Gender, UserProfile, WellnessGoal, WellnessTip};
use wellness_engine::storage::{MemoryStore, TipStore};

fn profile() -> UserProfile {
    UserProfile {
        name: Some("Robin".to_owned()),
        age: 29,
        gender: Gender::Female,
        goals: vec![WellnessGoal::BetterSleep],
        goal_descriptions: HashMap::new(),
    }
}

fn tips() -> Vec<WellnessTip> {
    fallback_tips(&[WellnessGoal::BetterSleep, WellnessGoal::Mindfulness])
}

#[tokio::test]
async fn test_profile_round_trip() {
    let store = MemoryStore::new();
    assert!(store.profile().await.unwrap().is_none());

    store.save_profile(&profile()).await.unwrap();

    let stored = store.profile().await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("Robin"));
    assert_eq!(stored.age, 29);
    assert_eq!(stored.goals, vec![WellnessGoal::BetterSleep]);
}

#[tokio::test]
async fn test_toggle_marks_stored_copy_saved() {
    let store = MemoryStore::new();
    let tip = tips().remove(0);
    assert!(!tip.is_saved);

    let saved_now = store.toggle_saved(&tip).await.unwrap();
    assert!(saved_now);
    assert!(store.is_saved(&tip.id).await.unwrap());

    let saved = store.saved_tips().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, tip.id);
    assert!(saved[0].is_saved);
}

#[tokio::test]
async fn test_second_toggle_removes_the_tip() {
    let store = MemoryStore::new();
    let tip = tips().remove(0);

    assert!(store.toggle_saved(&tip).await.unwrap());
    assert!(!store.toggle_saved(&tip).await.unwrap());

    assert!(!store.is_saved(&tip.id).await.unwrap());
    assert!(store.saved_tips().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_saved_tips_preserve_save_order() {
    let store = MemoryStore::new();
    let all = tips();

    for tip in &all {
        store.toggle_saved(tip).await.unwrap();
    }

    let saved = store.saved_tips().await.unwrap();
    let ids: Vec<&str> = saved.iter().map(|t| t.id.as_str()).collect();
    let expected: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_recommendation_cache_round_trip() {
    let store = MemoryStore::new();
    assert!(store.recommendations().await.unwrap().is_empty());

    let cached = tips();
    store.save_recommendations(&cached).await.unwrap();

    let loaded = store.recommendations().await.unwrap();
    assert_eq!(loaded.len(), cached.len());
    assert_eq!(loaded[0].title, cached[0].title);
}

#[tokio::test]
async fn test_writes_stamp_last_updated() {
    let store = MemoryStore::new();
    assert!(store.last_updated().await.unwrap().is_none());

    store.save_profile(&profile()).await.unwrap();
    assert!(store.last_updated().await.unwrap().is_some());
}

#[tokio::test]
async fn test_clear_session_keeps_saved_tips() {
    let store = MemoryStore::new();
    let tip = tips().remove(0);

    store.save_profile(&profile()).await.unwrap();
    store.save_recommendations(&tips()).await.unwrap();
    store.toggle_saved(&tip).await.unwrap();

    store.clear_session().await.unwrap();

    assert!(store.profile().await.unwrap().is_none());
    assert!(store.recommendations().await.unwrap().is_empty());
    assert!(store.is_saved(&tip.id).await.unwrap());
}

#[tokio::test]
async fn test_clear_all_drops_everything() {
    let store = MemoryStore::new();
    let tip = tips().remove(0);

    store.save_profile(&profile()).await.unwrap();
    store.save_recommendations(&tips()).await.unwrap();
    store.toggle_saved(&tip).await.unwrap();

    store.clear_all().await.unwrap();

    assert!(store.profile().await.unwrap().is_none());
    assert!(store.recommendations().await.unwrap().is_empty());
    assert!(store.saved_tips().await.unwrap().is_empty());
    assert!(store.last_updated().await.unwrap().is_none());
}

#[tokio::test]
async fn test_toggle_completed_step_round_trip() {
    let store = MemoryStore::new();
    let tip = tips().remove(0);
    store.toggle_saved(&tip).await.unwrap();

    assert!(store.toggle_completed_step(&tip.id, 2).await.unwrap());
    assert!(store.toggle_completed_step(&tip.id, 0).await.unwrap());

    let saved = store.saved_tips().await.unwrap();
    assert_eq!(saved[0].completed_steps, vec![0, 2]);

    // Toggling again clears the step
    assert!(!store.toggle_completed_step(&tip.id, 2).await.unwrap());
    let saved = store.saved_tips().await.unwrap();
    assert_eq!(saved[0].completed_steps, vec![0]);
}

#[tokio::test]
async fn test_toggle_completed_step_requires_saved_tip() {
    let store = MemoryStore::new();
    assert!(store.toggle_completed_step("missing", 0).await.is_err());
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let store = MemoryStore::new();
    let tip = tips().remove(0);
    store.save_profile(&profile()).await.unwrap();
    store.save_recommendations(&tips()).await.unwrap();
    store.toggle_saved(&tip).await.unwrap();
    store.toggle_completed_step(&tip.id, 1).await.unwrap();

    let exported = store.export_data().await.unwrap();

    let restored = MemoryStore::new();
    assert!(restored.import_data(&exported).await.unwrap());

    assert_eq!(restored.profile().await.unwrap().unwrap().age, 29);
    let saved = restored.saved_tips().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, tip.id);
    assert!(saved[0].is_saved);
    assert_eq!(saved[0].completed_steps, vec![1]);
    assert_eq!(restored.recommendations().await.unwrap().len(), tips().len());
    assert!(restored.last_updated().await.unwrap().is_some());
}

#[tokio::test]
async fn test_import_rejects_garbage_without_changes() {
    let store = MemoryStore::new();
    store.save_profile(&profile()).await.unwrap();

    assert!(!store.import_data("not a document").await.unwrap());
    assert!(store.profile().await.unwrap().is_some());
}

#[tokio::test]
async fn test_import_leaves_missing_sections_untouched() {
    let store = MemoryStore::new();
    store.save_profile(&profile()).await.unwrap();
    let tip = tips().remove(0);
    store.toggle_saved(&tip).await.unwrap();

    assert!(store.import_data(r#"{"recommendations":[]}"#).await.unwrap());

    assert!(store.profile().await.unwrap().is_some());
    assert_eq!(store.saved_tips().await.unwrap().len(), 1);
    assert!(store.recommendations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clones_share_state() {
    let store = MemoryStore::new();
    let handle = store.clone();

    store.save_profile(&profile()).await.unwrap();
    assert!(handle.profile().await.unwrap().is_some());
}
