// tests/auth_profile.rs
//
// Sign-in/sign-up flows, profile editing, trips, and sign-out cleanup.


use std::sync::Arc;
use std::sync::atomic::Ordering;

use test_helpers::{TEST_EMAIL, TEST_PASSWORD, TEST_TOKEN, client_for, spawn_backend};
use wanderpal::auth::{AuthClient, SignUpForm};
use wanderpal::error::ClientError;
use wanderpal::profile::ProfileClient;
use wanderpal::trending::TrendingCache;
use wanderpal::trips::TripsClient;

fn sign_up_form() -> SignUpForm {
    SignUpForm {
        first_name: "Asha".into(),
        last_name: "Rao".into(),
        phone: "+91 98450 00000".into(),
        email: "asha@example.com".into(),
        password: "wanderlust".into(),
        confirm_password: "wanderlust".into(),
    }
}

#[tokio::test]
async fn sign_in_persists_the_identity() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let auth = AuthClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));

    auth.sign_in(TEST_EMAIL, TEST_PASSWORD).await.unwrap();

    assert_eq!(tc.session.token().await.unwrap().as_deref(), Some(TEST_TOKEN));
    assert_eq!(tc.session.email().await.unwrap().as_deref(), Some(TEST_EMAIL));
}

#[tokio::test]
async fn wrong_password_surfaces_the_backend_detail() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let auth = AuthClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));

    let err = auth.sign_in(TEST_EMAIL, "nope").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert!(err.to_string().contains("Wrong password"));
    assert!(tc.session.token().await.unwrap().is_none());
}

#[tokio::test]
async fn short_password_fails_validation_before_any_request() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let auth = AuthClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));

    let mut form = sign_up_form();
    form.password = "short".into();
    form.confirm_password = "short".into();

    let err = auth.sign_up(form).await.unwrap_err();
    assert!(err.to_string().contains("at least 8 characters"));
    assert_eq!(backend.state.hits.signup.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_email_is_surfaced_inline() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let auth = AuthClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));

    let mut form = sign_up_form();
    form.email = "taken@example.com".into();

    let err = auth.sign_up(form).await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn sign_up_signs_the_user_in() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    let auth = AuthClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));

    auth.sign_up(sign_up_form()).await.unwrap();
    assert_eq!(tc.session.token().await.unwrap().as_deref(), Some(TEST_TOKEN));
    assert_eq!(
        tc.session.email().await.unwrap().as_deref(),
        Some("asha@example.com")
    );
}

#[tokio::test]
async fn profile_fetch_and_update_roundtrip() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    tc.session
        .set_identity(TEST_TOKEN, TEST_EMAIL)
        .await
        .unwrap();

    let profile = ProfileClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));

    let mut fetched = profile.fetch().await.unwrap();
    assert_eq!(fetched.email, TEST_EMAIL);
    assert_eq!(fetched.first_name, "John");

    fetched.phone = "+1 (555) 999-0000".into();
    let updated = profile.update(&fetched).await.unwrap();
    assert_eq!(updated.phone, "+1 (555) 999-0000");
}

#[tokio::test]
async fn profile_requires_a_session() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;

    let profile = ProfileClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));
    let err = profile.fetch().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
}

#[tokio::test]
async fn trips_are_listed_for_the_signed_in_user() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    tc.session
        .set_identity(TEST_TOKEN, TEST_EMAIL)
        .await
        .unwrap();

    let trips = TripsClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));
    let list = trips.list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].destination, "Paris");
    assert_eq!(list[0].hotel_name.as_deref(), Some("The Grand Plaza Hotel"));
}

#[tokio::test]
async fn trips_require_a_session() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;

    let trips = TripsClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));
    let err = trips.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
}

#[tokio::test]
async fn sign_out_clears_identity_conversation_and_trending_cache() {
    let backend = spawn_backend().await;
    let tc = client_for(&backend).await;
    tc.session
        .set_identity(TEST_TOKEN, TEST_EMAIL)
        .await
        .unwrap();
    tc.session.set_current_conversation("conv-1").await.unwrap();

    let cache = TrendingCache::new(tc.db.clone(), Arc::clone(&tc.api))
        .await
        .unwrap();
    cache
        .get_or_fetch(Some(TEST_EMAIL), 12.9716, 77.5946)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 1);

    let auth = AuthClient::new(Arc::clone(&tc.api), Arc::clone(&tc.session));
    auth.sign_out(&cache).await.unwrap();

    assert!(tc.session.token().await.unwrap().is_none());
    assert!(tc.session.email().await.unwrap().is_none());
    assert!(tc.session.current_conversation().await.unwrap().is_none());

    // The evicted entry no longer serves the old user
    cache
        .get_or_fetch(Some(TEST_EMAIL), 12.9716, 77.5946)
        .await
        .unwrap();
    assert_eq!(backend.state.hits.trending.load(Ordering::SeqCst), 2);
}
