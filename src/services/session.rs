use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::session::Session,
};

fn session_key(session_id: Uuid) -> String {
    format!("session:{}", session_id)
}

/// Server-side storage for sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session; `None` if unknown.
    async fn load(&self, session_id: Uuid) -> Result<Option<Session>>;

    /// Stores a session for `ttl_secs` seconds.
    async fn save(&self, session_id: Uuid, session: &Session, ttl_secs: u64) -> Result<()>;

    /// Forgets a session. Unknown ids are ignored.
    async fn remove(&self, session_id: Uuid) -> Result<()>;
}

/// Sessions kept in Redis as JSON under `session:{id}`.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: ConnectionManager,
}

impl RedisSessionStore {
    /// Connects to the Redis server at `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;
        tracing::info!("✅ Redis Connection Manager initialized (pooled)");
        Ok(Self { redis })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: Uuid) -> Result<Option<Session>> {
        let mut redis = self.redis.clone();
        let session_json: Option<String> = redis.get(session_key(session_id)).await?;

        session_json
            .map(|json| {
                sonic_rs::from_str(&json)
                    .map_err(|e| AppError::Internal(format!("Invalid session JSON: {}", e)))
            })
            .transpose()
    }

    async fn save(&self, session_id: Uuid, session: &Session, ttl_secs: u64) -> Result<()> {
        let session_json = sonic_rs::to_string(session)
            .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

        let mut redis = self.redis.clone();
        let _: () = redis
            .set_ex(session_key(session_id), &session_json, ttl_secs)
            .await
            .map_err(|e| {
                tracing::error!("❌ Redis set_ex failed: {}", e);
                AppError::Redis(e)
            })?;

        tracing::debug!("Session saved to Redis: session:{}", session_id);
        Ok(())
    }

    async fn remove(&self, session_id: Uuid) -> Result<()> {
        let mut redis = self.redis.clone();
        let _: () = redis.del(session_key(session_id)).await?;
        Ok(())
    }
}

/// Sessions kept in process memory.
///
/// Expired entries are swept on every `save`, so abandoned sessions do not
/// accumulate. The session extractor still rejects expired sessions on load.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: Uuid) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn save(&self, session_id: Uuid, session: &Session, _ttl_secs: u64) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, stored| !stored.is_expired());
        sessions.insert(session_id, session.clone());
        Ok(())
    }

    async fn remove(&self, session_id: Uuid) -> Result<()> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }
}
