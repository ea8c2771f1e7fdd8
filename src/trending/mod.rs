//! Trending places cache
//!
//! One cached entry per user, keyed by coordinates rounded to 4 decimals.
//! A query hits the cache when it lands within the configured radius of
//! the cached point and the entry is younger than the TTL; otherwise a
//! fresh lookup supersedes the entry under the same key. Stale entries are
//! bypassed, not deleted; `evict` exists for sign-out and user switches.

use std::sync::Arc;

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::api::types::PlaceRecord;
use crate::error::Result;

/// Radius within which a cached entry is still valid, in meters
pub const CACHE_RADIUS_METERS: f64 = 10_000.0;

/// Cache entry time-to-live, in seconds
pub const CACHE_TTL_SECS: i64 = 3600;

/// Mean earth radius, in meters
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Round a coordinate to 4 decimal places for cache stability
pub fn round_coord(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Great-circle distance between two points, in meters
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

fn cache_key(user: Option<&str>) -> String {
    match user {
        Some(email) => format!("trending_places_{}", email),
        None => "trending_places".to_string(),
    }
}

/// Durable, per-user cache in front of the trending lookup
pub struct TrendingCache {
    db: SqlitePool,
    api: Arc<ApiClient>,
}

impl TrendingCache {
    /// Create the cache, bootstrapping the schema if needed
    pub async fn new(db: SqlitePool, api: Arc<ApiClient>) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trending_cache (
                user_key TEXT PRIMARY KEY,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                entries TEXT NOT NULL,
                cached_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&db)
        .await?;

        Ok(Self { db, api })
    }

    /// Return cached places for this user and location, fetching fresh
    /// results only when the cache misses.
    ///
    /// A failed lookup is a soft failure: logged, returns empty, and does
    /// not overwrite the cached entry.
    pub async fn get_or_fetch(
        &self,
        user: Option<&str>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<PlaceRecord>> {
        let lat = round_coord(latitude);
        let lon = round_coord(longitude);
        let key = cache_key(user);

        if let Some(entries) = self.lookup(&key, lat, lon).await? {
            return Ok(entries);
        }

        let fresh = match self.api.trending(lat, lon).await {
            Ok(places) => places,
            Err(e) => {
                warn!("Trending lookup failed: {}", e);
                return Ok(Vec::new());
            }
        };

        self.store(&key, lat, lon, &fresh).await?;
        Ok(fresh)
    }

    async fn lookup(&self, key: &str, lat: f64, lon: f64) -> Result<Option<Vec<PlaceRecord>>> {
        let row: Option<(f64, f64, String, i64)> = sqlx::query_as(
            r#"
            SELECT latitude, longitude, entries, cached_at
            FROM trending_cache
            WHERE user_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;

        let Some((cached_lat, cached_lon, entries_json, cached_at)) = row else {
            debug!("No trending cache entry for {}", key);
            return Ok(None);
        };

        let entries: Vec<PlaceRecord> = match serde_json::from_str(&entries_json) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding unreadable trending cache entry for {}: {}", key, e);
                return Ok(None);
            }
        };

        let distance = haversine_meters(cached_lat, cached_lon, lat, lon);
        let age = Utc::now().timestamp() - cached_at;

        if distance < CACHE_RADIUS_METERS && age < CACHE_TTL_SECS {
            debug!(
                "Trending cache hit for {} ({:.0} m away, {} s old)",
                key, distance, age
            );
            Ok(Some(entries))
        } else {
            debug!(
                "Trending cache miss for {}: distance {:.0} m, age {} s",
                key, distance, age
            );
            Ok(None)
        }
    }

    async fn store(&self, key: &str, lat: f64, lon: f64, entries: &[PlaceRecord]) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trending_cache (user_key, latitude, longitude, entries, cached_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(user_key) DO UPDATE SET
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                entries = excluded.entries,
                cached_at = excluded.cached_at
            "#,
        )
        .bind(key)
        .bind(lat)
        .bind(lon)
        .bind(serde_json::to_string(entries)?)
        .bind(Utc::now().timestamp())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Drop this user's cached entry (sign-out, user switch)
    pub async fn evict(&self, user: Option<&str>) -> Result<()> {
        sqlx::query("DELETE FROM trending_cache WHERE user_key = $1")
            .bind(cache_key(user))
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
