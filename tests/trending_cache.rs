// tests/trending_cache.rs
//
// Distance- and age-based cache invalidation for trending places.


use std::sync::Arc;
use std::sync::atomic::Ordering;

use test_helpers::{TEST_EMAIL, client_for, spawn_backend};
use wanderpal::trending::TrendingCache;

// 0.0449 degrees of latitude is ~5 km; 0.1349 is ~15 km
const BASE_LAT: f64 = 12.9716;
const BASE_LON: f64 = 77.5946;
const NEARBY_LAT: f64 = BASE_LAT + 0.0449;
const FAR_LAT: f64 = BASE_LAT + 0.1349;

#[tokio::test]
async fn nearby_fresh_query_returns_cache_without_a_network_call() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let cache = TrendingCache::new(tc.db.clone(), Arc::clone(&tc.api))
        .await
        .unwrap();

    let first = cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 1);

    // 5 km away, minutes old: served from cache
    let second = cache
        .get_or_fetch(Some(TEST_EMAIL), NEARBY_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].name, first[0].name);
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn query_beyond_the_radius_fetches_fresh_results() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let cache = TrendingCache::new(tc.db.clone(), Arc::clone(&tc.api))
        .await
        .unwrap();

    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 1);

    // 15 km away: cache bypassed
    cache
        .get_or_fetch(Some(TEST_EMAIL), FAR_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn entry_older_than_the_ttl_is_bypassed_at_zero_distance() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let cache = TrendingCache::new(tc.db.clone(), Arc::clone(&tc.api))
        .await
        .unwrap();

    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 1);

    // Age the entry past one hour
    sqlx::query("UPDATE trending_cache SET cached_at = cached_at - 4000")
        .execute(&tc.db)
        .await
        .unwrap();

    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 2);

    // The fresh write reset the clock
    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cache_entries_are_scoped_per_user() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let cache = TrendingCache::new(tc.db.clone(), Arc::clone(&tc.api))
        .await
        .unwrap();

    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 1);

    // Same spot, different identity: a separate entry
    cache.get_or_fetch(None, BASE_LAT, BASE_LON).await.unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 2);

    // Both entries now serve their own user
    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    cache.get_or_fetch(None, BASE_LAT, BASE_LON).await.unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn evict_forces_the_next_query_to_fetch() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let cache = TrendingCache::new(tc.db.clone(), Arc::clone(&tc.api))
        .await
        .unwrap();

    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    cache.evict(Some(TEST_EMAIL)).await.unwrap();

    cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn entries_preserve_backend_order() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let cache = TrendingCache::new(tc.db.clone(), Arc::clone(&tc.api))
        .await
        .unwrap();

    let places = cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(places[0].name, "Lalbagh Botanical Garden");
    assert_eq!(places[1].name, "Cubbon Park");

    // Cached read keeps the same order
    let cached = cache
        .get_or_fetch(Some(TEST_EMAIL), BASE_LAT, BASE_LON)
        .await
        .unwrap();
    assert_eq!(cached[0].name, "Lalbagh Botanical Garden");
    assert_eq!(cached[1].name, "Cubbon Park");
}
