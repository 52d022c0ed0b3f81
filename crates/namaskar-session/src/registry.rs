//! Independent sessions keyed by id.

use std::collections::HashMap;
use tokio::sync::RwLock;

use namaskar_core::{Error, LandmarkFrame, Result, SessionId, Timestamp};

use crate::config::AppConfig;
use crate::session::{FrameReport, Session, SessionSnapshot};

/// Owns every live session; no state is shared between them
pub struct SessionRegistry {
    config: AppConfig,
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionRegistry {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Open a new session and return its id
    pub async fn start_session(&self, now: Timestamp) -> Result<SessionId> {
        let session = Session::from_config(&self.config, now)?;
        let id = session.id();

        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session);

        tracing::info!(session = %id, active = sessions.len(), "session started");
        Ok(id)
    }

    pub async fn process_frame(
        &self,
        id: SessionId,
        frame: &LandmarkFrame,
        now: Timestamp,
    ) -> Result<FrameReport> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(session.process_frame(frame, now))
    }

    pub async fn snapshot(&self, id: SessionId) -> Result<SessionSnapshot> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(Session::snapshot).ok_or_else(|| not_found(id))
    }

    pub async fn restart_session(&self, id: SessionId, now: Timestamp) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.restart(now);
        Ok(())
    }

    /// Close a session, returning its final snapshot
    pub async fn end_session(&self, id: SessionId) -> Result<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.remove(&id).ok_or_else(|| not_found(id))?;
        let snapshot = session.snapshot();

        tracing::info!(
            session = %id,
            repetitions = snapshot.repetitions,
            frames = snapshot.frames_processed,
            "session ended"
        );
        Ok(snapshot)
    }

    pub async fn active_sessions(&self) -> Vec<SessionId> {
        let sessions = self.sessions.read().await;
        sessions.keys().copied().collect()
    }
}

fn not_found(id: SessionId) -> Error {
    Error::SessionNotFound(id.to_string())
}
