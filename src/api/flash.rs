//! One-shot notices carried across a redirect in the session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

const FLASH_KEY: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queues a message for the next rendered page. Session failures are logged
/// and the message is dropped.
pub async fn push(session: &Session, level: FlashLevel, message: impl Into<String>) {
    let mut queued = match session.get::<Vec<Flash>>(FLASH_KEY).await {
        Ok(queued) => queued.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to read flash messages: {}", e);
            Vec::new()
        }
    };

    queued.push(Flash {
        level,
        message: message.into(),
    });

    if let Err(e) = session.insert(FLASH_KEY, queued).await {
        warn!("Failed to store flash message: {}", e);
    }
}

pub async fn success(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Success, message).await;
}

pub async fn error(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Error, message).await;
}

/// Drains queued messages.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASH_KEY).await {
        Ok(queued) => queued.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to take flash messages: {}", e);
            Vec::new()
        }
    }
}
