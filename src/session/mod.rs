//! Durable session state
//!
//! Holds the auth token, the signed-in email, and the last-active
//! conversation id in the client SQLite database. Every other component
//! reads session state through this one store, so the in-memory view and
//! the durable mirror are the same row by construction.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use crate::error::Result;

const KEY_TOKEN: &str = "token";
const KEY_EMAIL: &str = "email";
const KEY_CONVERSATION: &str = "current_conversation";

/// Store for the session token and the current conversation id
pub struct SessionStore {
    db: SqlitePool,
}

impl SessionStore {
    /// Create the store, bootstrapping the schema if needed
    pub async fn new(db: SqlitePool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&db)
        .await?;

        Ok(Self { db })
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM session_state WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.db)
                .await?;

        Ok(row.map(|(v,)| v))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session_state (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().timestamp())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM session_state WHERE key = $1")
            .bind(key)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// The stored auth token, if signed in
    pub async fn token(&self) -> Result<Option<String>> {
        self.get(KEY_TOKEN).await
    }

    /// The signed-in email, if any
    pub async fn email(&self) -> Result<Option<String>> {
        self.get(KEY_EMAIL).await
    }

    /// Persist the identity returned by a successful sign-in/sign-up
    pub async fn set_identity(&self, token: &str, email: &str) -> Result<()> {
        self.set(KEY_TOKEN, token).await?;
        self.set(KEY_EMAIL, email).await?;
        debug!("Session identity stored for {}", email);
        Ok(())
    }

    /// Drop the stored identity (sign out)
    pub async fn clear_identity(&self) -> Result<()> {
        self.clear(KEY_TOKEN).await?;
        self.clear(KEY_EMAIL).await?;
        Ok(())
    }

    /// The last-active conversation id; `None` means no conversation has
    /// been assigned yet (never an empty string)
    pub async fn current_conversation(&self) -> Result<Option<String>> {
        Ok(self.get(KEY_CONVERSATION).await?.filter(|v| !v.is_empty()))
    }

    /// Persist the conversation id assigned by the backend
    pub async fn set_current_conversation(&self, id: &str) -> Result<()> {
        self.set(KEY_CONVERSATION, id).await
    }

    /// Forget the current conversation (start-new-chat)
    pub async fn clear_current_conversation(&self) -> Result<()> {
        self.clear(KEY_CONVERSATION).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> SessionStore {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SessionStore::new(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_identity_roundtrip() {
        let store = store().await;
        assert!(store.token().await.unwrap().is_none());

        store
            .set_identity("tok-1", "traveler@example.com")
            .await
            .unwrap();
        assert_eq!(store.token().await.unwrap().as_deref(), Some("tok-1"));
        assert_eq!(
            store.email().await.unwrap().as_deref(),
            Some("traveler@example.com")
        );

        store.clear_identity().await.unwrap();
        assert!(store.token().await.unwrap().is_none());
        assert!(store.email().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_conversation_id_none_until_set() {
        let store = store().await;
        assert!(store.current_conversation().await.unwrap().is_none());

        store.set_current_conversation("conv-42").await.unwrap();
        assert_eq!(
            store.current_conversation().await.unwrap().as_deref(),
            Some("conv-42")
        );

        store.clear_current_conversation().await.unwrap();
        assert!(store.current_conversation().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = store().await;
        store.set_current_conversation("a").await.unwrap();
        store.set_current_conversation("b").await.unwrap();
        assert_eq!(
            store.current_conversation().await.unwrap().as_deref(),
            Some("b")
        );
    }
}
