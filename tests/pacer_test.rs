// ABOUTME: Integration tests for the request pacer
// ABOUTME: Verifies minimum spacing, cumulative queuing, and concurrent-caller serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use wellness_engine::llm::RequestPacer;

const INTERVAL: Duration = Duration::from_millis(1500);

#[tokio::test(start_paused = true)]
async fn test_two_acquires_are_separated_by_min_interval() {
    let pacer = RequestPacer::new(INTERVAL);
    let start = Instant::now();

    pacer.acquire().await;
    let first = start.elapsed();
    pacer.acquire().await;
    let second = start.elapsed();

    assert_eq!(first, Duration::ZERO);
    assert!(second >= INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn test_third_call_is_delayed_cumulatively() {
    let pacer = RequestPacer::new(INTERVAL);
    let start = Instant::now();

    pacer.acquire().await;
    pacer.acquire().await;
    pacer.acquire().await;

    // No burst bypass: the third slot sits a full two intervals out
    assert!(start.elapsed() >= INTERVAL * 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_queue_rather_than_burst() {
    let pacer = Arc::new(RequestPacer::new(INTERVAL));
    let mut handles = Vec::new();

    for _ in 0..3 {
        let pacer = Arc::clone(&pacer);
        handles.push(tokio::spawn(async move {
            pacer.acquire().await;
            Instant::now()
        }));
    }

    let mut starts = Vec::new();
    for handle in handles {
        starts.push(handle.await.unwrap());
    }
    starts.sort();

    for pair in starts.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= INTERVAL);
    }
}

#[tokio::test(start_paused = true)]
async fn test_idle_period_resets_to_immediate() {
    let pacer = RequestPacer::new(INTERVAL);
    pacer.acquire().await;

    tokio::time::sleep(INTERVAL * 3).await;

    let start = Instant::now();
    pacer.acquire().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}
