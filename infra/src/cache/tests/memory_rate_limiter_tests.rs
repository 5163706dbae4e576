//! Tests for the in-memory rate limiter

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use er_core::domain::entities::RateLimitDecision;
use er_core::errors::DomainError;
use er_core::services::clock::MockClock;
use er_core::services::rate_limit::RateLimiter;
use er_shared::RateLimitPolicy;

use crate::cache::InMemoryRateLimiter;

fn setup() -> (Arc<MockClock>, InMemoryRateLimiter) {
    let clock = Arc::new(MockClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
    let limiter = InMemoryRateLimiter::new(clock.clone());
    (clock, limiter)
}

#[tokio::test]
async fn test_max_calls_allowed_then_denied() {
    let (_clock, limiter) = setup();
    let policy = RateLimitPolicy::new(5, 60_000);

    for expected_left in (0..5).rev() {
        let decision = limiter.check_and_consume("k", policy, None).await.unwrap();
        assert_eq!(decision, RateLimitDecision::Allowed { attempts_left: expected_left });
    }
    let decision = limiter.check_and_consume("k", policy, None).await.unwrap();
    assert!(!decision.is_allowed());
}

#[tokio::test]
async fn test_four_rapid_sends_for_one_phone() {
    let (clock, limiter) = setup();
    let key = "sms_phone_+351912345678";
    let policy = RateLimitPolicy::new(3, 60_000);

    let mut results = Vec::new();
    for _ in 0..4 {
        results.push(limiter.check_and_consume(key, policy, Some("10.0.0.1")).await.unwrap());
        clock.advance(Duration::milliseconds(10));
    }

    let allowed: Vec<bool> = results.iter().map(|d| d.is_allowed()).collect();
    assert_eq!(allowed, vec![true, true, true, false]);

    let remaining = results[3].remaining_time_ms().unwrap();
    assert!(remaining > 0 && remaining <= 60_000);
    assert_eq!(remaining, 60_000 - 30);
}

#[tokio::test]
async fn test_window_reset_after_expiry() {
    let (clock, limiter) = setup();
    let policy = RateLimitPolicy::new(2, 60_000);

    for _ in 0..4 {
        limiter.check_and_consume("k", policy, None).await.unwrap();
    }

    clock.advance(Duration::milliseconds(60_001));
    let decision = limiter.check_and_consume("k", policy, None).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { attempts_left: 1 });
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (_clock, limiter) = setup();
    let policy = RateLimitPolicy::new(1, 60_000);

    assert!(limiter.check_and_consume("a", policy, None).await.unwrap().is_allowed());
    assert!(!limiter.check_and_consume("a", policy, None).await.unwrap().is_allowed());
    assert!(limiter.check_and_consume("b", policy, None).await.unwrap().is_allowed());
}

#[tokio::test]
async fn test_invalid_checks_rejected() {
    let (_clock, limiter) = setup();

    let err = limiter
        .check_and_consume("", RateLimitPolicy::new(3, 60_000), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = limiter
        .check_and_consume("k", RateLimitPolicy::new(0, 60_000), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert!(limiter.is_empty().await);
}

#[tokio::test]
async fn test_attempt_log_and_reset() {
    let (clock, limiter) = setup();
    let policy = RateLimitPolicy::new(2, 60_000);

    limiter.check_and_consume("k", policy, Some("10.0.0.1")).await.unwrap();
    clock.advance(Duration::seconds(1));
    limiter.check_and_consume("k", policy, Some("10.0.0.2")).await.unwrap();
    limiter.check_and_consume("k", policy, Some("10.0.0.3")).await.unwrap();

    let log = limiter.attempts("k").await.unwrap();
    let origins: Vec<&str> = log.iter().map(|r| r.origin.as_str()).collect();
    assert_eq!(origins, vec!["10.0.0.1", "10.0.0.2"]);

    limiter.reset("k").await.unwrap();
    assert!(limiter.attempts("k").await.unwrap().is_empty());
    assert!(limiter.check_and_consume("k", policy, None).await.unwrap().is_allowed());
}

#[tokio::test]
async fn test_purge_removes_only_expired_windows() {
    let (clock, limiter) = setup();

    limiter.check_and_consume("short", RateLimitPolicy::new(3, 1_000), None).await.unwrap();
    limiter.check_and_consume("long", RateLimitPolicy::new(3, 60_000), None).await.unwrap();

    clock.advance(Duration::milliseconds(1_001));
    assert_eq!(limiter.purge_expired().await.unwrap(), 1);
    assert_eq!(limiter.len().await, 1);
    assert_eq!(limiter.purge_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_checks_never_over_admit() {
    let (_clock, limiter) = setup();
    let limiter = Arc::new(limiter);
    let policy = RateLimitPolicy::new(10, 60_000);

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.check_and_consume("hot", policy, None).await.unwrap() })
        })
        .collect();

    let mut allowed = 0;
    for handle in handles {
        if handle.await.unwrap().is_allowed() {
            allowed += 1;
        }
    }
    assert_eq!(allowed, 10);
}

#[tokio::test]
async fn test_oversized_window_keeps_counting() {
    let (clock, limiter) = setup();
    let policy = RateLimitPolicy::new(3, u64::MAX);

    for expected_left in [2, 1, 0] {
        let decision = limiter.check_and_consume("k", policy, None).await.unwrap();
        assert_eq!(decision.attempts_left(), expected_left);
    }

    clock.advance(Duration::days(365));
    let decision = limiter.check_and_consume("k", policy, None).await.unwrap();
    assert!(!decision.is_allowed());
    assert_eq!(limiter.len().await, 1);
}
