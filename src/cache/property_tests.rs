//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to check the request decision against arbitrary timelines.

use proptest::prelude::*;
use std::time::Duration;
use tokio::time::Instant;

use crate::cache::{decide, Decision, RefreshState};
use crate::config::CachePolicy;

// == Strategies ==
/// Offsets in seconds from a common origin.
fn offset_strategy() -> impl Strategy<Value = u64> {
    0u64..20_000
}

fn policy_strategy() -> impl Strategy<Value = CachePolicy> {
    (1u64..10_000, 1u64..10_000).prop_map(|(ttl, backoff)| CachePolicy {
        ttl: Duration::from_secs(ttl),
        backoff: Duration::from_secs(backoff),
    })
}

/// Outcome of one refresh attempt at a given offset.
#[derive(Debug, Clone)]
enum Attempt {
    Success(u64),
    Failure(u64),
}

fn attempt_strategy() -> impl Strategy<Value = Attempt> {
    prop_oneof![
        offset_strategy().prop_map(Attempt::Success),
        offset_strategy().prop_map(Attempt::Failure),
    ]
}

fn replay(origin: Instant, attempts: &[Attempt]) -> RefreshState {
    let mut state = RefreshState::new();
    for attempt in attempts {
        match attempt {
            Attempt::Success(at) => state.record_success(origin + Duration::from_secs(*at)),
            Attempt::Failure(at) => state.record_failure(origin + Duration::from_secs(*at)),
        }
    }
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any request inside the backoff window of the latest failure is rejected,
    // whatever the cache holds.
    #[test]
    fn prop_backoff_always_wins(
        attempts in prop::collection::vec(attempt_strategy(), 1..20),
        policy in policy_strategy(),
        has_cached in any::<bool>(),
        fraction in 0.0f64..0.999,
    ) {
        let origin = Instant::now();
        let state = replay(origin, &attempts);
        prop_assume!(state.last_failure_at.is_some());

        let failed_at = state.last_failure_at.unwrap();
        let now = failed_at + policy.backoff.mul_f64(fraction);
        prop_assert_eq!(decide(&state, has_cached, now, &policy), Decision::RejectBackoff);
    }

    // Serving from cache requires a document and a success no older than the TTL.
    #[test]
    fn prop_serve_cached_implies_fresh(
        attempts in prop::collection::vec(attempt_strategy(), 0..20),
        policy in policy_strategy(),
        has_cached in any::<bool>(),
        now_offset in offset_strategy(),
    ) {
        let origin = Instant::now();
        let state = replay(origin, &attempts);
        let now = origin + Duration::from_secs(now_offset + 20_000);

        if decide(&state, has_cached, now, &policy) == Decision::ServeCached {
            prop_assert!(has_cached);
            let succeeded_at = state.last_success_at.unwrap();
            prop_assert!(now.saturating_duration_since(succeeded_at) <= policy.ttl);
        }
    }

    // Recording outcomes never moves a timestamp backwards.
    #[test]
    fn prop_timestamps_monotonic(attempts in prop::collection::vec(attempt_strategy(), 1..30)) {
        let origin = Instant::now();
        let mut state = RefreshState::new();
        let mut prev_success = None;
        let mut prev_failure = None;

        for attempt in &attempts {
            match attempt {
                Attempt::Success(at) => state.record_success(origin + Duration::from_secs(*at)),
                Attempt::Failure(at) => state.record_failure(origin + Duration::from_secs(*at)),
            }
            prop_assert!(state.last_success_at >= prev_success);
            prop_assert!(state.last_failure_at >= prev_failure);
            prev_success = state.last_success_at;
            prev_failure = state.last_failure_at;
        }
        prop_assert_eq!(state.generation, attempts.len() as u64);
    }

    // Deciding is read-only: the same inputs always give the same answer.
    #[test]
    fn prop_decide_is_pure(
        attempts in prop::collection::vec(attempt_strategy(), 0..20),
        policy in policy_strategy(),
        has_cached in any::<bool>(),
        now_offset in offset_strategy(),
    ) {
        let origin = Instant::now();
        let state = replay(origin, &attempts);
        let before = state.clone();
        let now = origin + Duration::from_secs(now_offset);

        let first = decide(&state, has_cached, now, &policy);
        let second = decide(&state, has_cached, now, &policy);

        prop_assert_eq!(first, second);
        prop_assert_eq!(state, before);
    }
}
