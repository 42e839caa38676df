use crate::error::AppError;
use crate::models::{Friend, SharedSession};
use log::warn;
use std::sync::{Arc, Mutex};

/// Backend supplying friend and shared-session records. The realtime
/// subscription itself lives outside; this layer only sees change events.
pub trait TeamBackend: Send + Sync {
    fn fetch_friends(&self) -> Result<Vec<Friend>, AppError>;
    fn fetch_sessions(&self) -> Result<Vec<SharedSession>, AppError>;
}

/// A "rows changed" signal from the backend's event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Friends,
    Sessions,
}

/// Event-triggered refetch bridge over the team backend. No protocol of its
/// own: every change event re-fetches the affected collection whole. Fetch
/// failures keep the previous cache.
pub struct TeamBridge {
    backend: Arc<dyn TeamBackend>,
    friends: Mutex<Vec<Friend>>,
    sessions: Mutex<Vec<SharedSession>>,
}

impl TeamBridge {
    pub fn new(backend: Arc<dyn TeamBackend>) -> Self {
        Self {
            backend,
            friends: Mutex::new(Vec::new()),
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Fetch both collections.
    pub fn refresh(&self) {
        self.refresh_friends();
        self.refresh_sessions();
    }

    /// Re-fetch the collection named by `event`.
    pub fn handle_change(&self, event: ChangeEvent) {
        match event {
            ChangeEvent::Friends => self.refresh_friends(),
            ChangeEvent::Sessions => self.refresh_sessions(),
        }
    }

    pub fn friends(&self) -> Vec<Friend> {
        self.friends
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn sessions(&self) -> Vec<SharedSession> {
        self.sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn refresh_friends(&self) {
        match self.backend.fetch_friends() {
            Ok(list) => {
                *self
                    .friends
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) = list;
            }
            Err(e) => warn!("Failed to fetch friends, keeping cached list: {e}"),
        }
    }

    fn refresh_sessions(&self) {
        match self.backend.fetch_sessions() {
            Ok(list) => {
                *self
                    .sessions
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) = list;
            }
            Err(e) => warn!("Failed to fetch shared sessions, keeping cached list: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FriendStatus;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Backend double with adjustable data and a failure switch.
    struct FakeBackend {
        friends: Mutex<Vec<Friend>>,
        sessions: Mutex<Vec<SharedSession>>,
        failing: AtomicBool,
        fetches: AtomicUsize,
    }

    impl FakeBackend {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                friends: Mutex::new(Vec::new()),
                sessions: Mutex::new(Vec::new()),
                failing: AtomicBool::new(false),
                fetches: AtomicUsize::new(0),
            })
        }

        fn set_friends(&self, friends: Vec<Friend>) {
            *self.friends.lock().unwrap() = friends;
        }

        fn set_sessions(&self, sessions: Vec<SharedSession>) {
            *self.sessions.lock().unwrap() = sessions;
        }

        fn fail(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    impl TeamBackend for FakeBackend {
        fn fetch_friends(&self) -> Result<Vec<Friend>, AppError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::Backend("connection lost".to_string()));
            }
            Ok(self.friends.lock().unwrap().clone())
        }

        fn fetch_sessions(&self) -> Result<Vec<SharedSession>, AppError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::Backend("connection lost".to_string()));
            }
            Ok(self.sessions.lock().unwrap().clone())
        }
    }

    fn friend(id: &str, name: &str) -> Friend {
        Friend {
            id: id.to_string(),
            name: name.to_string(),
            status: FriendStatus::Online,
        }
    }

    fn session(id: &str, title: &str) -> SharedSession {
        SharedSession {
            id: id.to_string(),
            title: title.to_string(),
            owner_id: "owner".to_string(),
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_starts_empty_until_refreshed() {
        let backend = FakeBackend::new();
        backend.set_friends(vec![friend("1", "Ada")]);

        let bridge = TeamBridge::new(Arc::clone(&backend) as Arc<dyn TeamBackend>);
        assert!(bridge.friends().is_empty());

        bridge.refresh();
        assert_eq!(bridge.friends().len(), 1);
    }

    #[test]
    fn test_change_event_refetches_only_named_collection() {
        let backend = FakeBackend::new();
        let bridge = TeamBridge::new(Arc::clone(&backend) as Arc<dyn TeamBackend>);
        bridge.refresh();

        backend.set_friends(vec![friend("1", "Ada")]);
        backend.set_sessions(vec![session("s1", "Deep work")]);

        bridge.handle_change(ChangeEvent::Friends);
        assert_eq!(bridge.friends().len(), 1);
        // Sessions were not refetched by the friends event
        assert!(bridge.sessions().is_empty());

        bridge.handle_change(ChangeEvent::Sessions);
        assert_eq!(bridge.sessions().len(), 1);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_cache() {
        let backend = FakeBackend::new();
        backend.set_friends(vec![friend("1", "Ada"), friend("2", "Lin")]);

        let bridge = TeamBridge::new(Arc::clone(&backend) as Arc<dyn TeamBackend>);
        bridge.refresh();
        assert_eq!(bridge.friends().len(), 2);

        backend.fail(true);
        bridge.handle_change(ChangeEvent::Friends);
        assert_eq!(bridge.friends().len(), 2);

        backend.fail(false);
        backend.set_friends(vec![friend("1", "Ada")]);
        bridge.handle_change(ChangeEvent::Friends);
        assert_eq!(bridge.friends().len(), 1);
    }
}
