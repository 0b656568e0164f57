//! Per-session "to watch" / "watched" lists. Process memory only; nothing is
//! persisted and sessions never see each other's lists.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::util::env as env_util;

pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    ToWatch,
    Watched,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WatchLists {
    pub to_watch: Vec<String>,
    pub watched: Vec<String>,
}

impl WatchLists {
    /// Append `title` to the chosen list unless already present. Returns
    /// whether it was added.
    pub fn add(&mut self, kind: ListKind, title: &str) -> bool {
        match kind {
            ListKind::ToWatch => self.add_to_watch(title),
            ListKind::Watched => self.add_watched(title),
        }
    }

    pub fn add_to_watch(&mut self, title: &str) -> bool {
        push_unique(&mut self.to_watch, title)
    }

    pub fn add_watched(&mut self, title: &str) -> bool {
        push_unique(&mut self.watched, title)
    }
}

fn push_unique(list: &mut Vec<String>, title: &str) -> bool {
    if list.iter().any(|t| t == title) {
        return false;
    }
    list.push(title.to_string());
    true
}

#[derive(Debug)]
struct Session {
    lists: WatchLists,
    last_seen: Instant,
}

/// Session id -> lists. A session exists once something was added to it;
/// sessions idle longer than `idle` are dropped, and at `max_sessions` the
/// least recently seen one makes room for a new one.
#[derive(Debug)]
pub struct SessionLists {
    sessions: Mutex<HashMap<String, Session>>,
    idle: Duration,
    max_sessions: usize,
}

impl Default for SessionLists {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_IDLE, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Limits from `SESSION_IDLE_SECS` and `MAX_SESSIONS`.
    pub fn from_env() -> Self {
        let idle = env_util::env_parse("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE.as_secs());
        let max = env_util::env_parse("MAX_SESSIONS", DEFAULT_MAX_SESSIONS);
        Self::with_limits(Duration::from_secs(idle), max)
    }

    /// Current lists for a session; empty lists when the session is unknown.
    /// Never creates a session.
    pub async fn get(&self, session_id: &str) -> WatchLists {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();
        let Some(session) = sessions.get_mut(session_id) else {
            return WatchLists::default();
        };
        if now.duration_since(session.last_seen) < self.idle {
            session.last_seen = now;
            return session.lists.clone();
        }
        sessions.remove(session_id);
        WatchLists::default()
    }

    /// Add to one list and return the session's lists afterwards, plus whether
    /// anything changed.
    pub async fn add(&self, session_id: &str, kind: ListKind, title: &str) -> (WatchLists, bool) {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();
        self.evict(&mut sessions, now);
        if !sessions.contains_key(session_id) && sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_seen)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                debug!(session = %oldest, "session limit reached, dropping least recent");
                sessions.remove(&oldest);
            }
        }

        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                lists: WatchLists::default(),
                last_seen: now,
            });
        session.last_seen = now;
        let added = session.lists.add(kind, title);
        (session.lists.clone(), added)
    }

    /// Sessions still within their idle window.
    pub async fn session_count(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        self.evict(&mut sessions, Instant::now());
        sessions.len()
    }

    fn evict(&self, sessions: &mut HashMap<String, Session>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_seen) < self.idle);
        let expired = before - sessions.len();
        if expired > 0 {
            debug!(expired, "expired idle watch-list sessions");
        }
    }
}
