use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendStatus {
    Online,
    Focusing,
    Offline,
}

/// A friend record fetched from the team backend. Never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub status: FriendStatus,
}

/// A shared focus session visible to the team. Never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSession {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub started_at: DateTime<Utc>,
}
