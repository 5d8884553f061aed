//! Per-browser form sessions.
//!
//! Each browser gets a UUID in the `textsum_session` cookie. Its
//! [`FormState`] is stored on the first event that changes it, refreshed on
//! every use, and dropped after sitting idle. The store never holds more
//! than its configured number of sessions; the least recently used one is
//! evicted to make room.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::ui::form::{FormIntent, FormReducer, FormState};
use crate::ui::mvi::Reducer;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "textsum_session";

/// A resolved session for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    /// The request carried no session cookie and one must be set.
    pub is_new: bool,
}

impl Session {
    /// Use the id from the request cookie, or mint a new one.
    ///
    /// Nothing is stored until the session is dispatched to.
    pub fn resolve(headers: &HeaderMap) -> Self {
        match session_id(headers) {
            Some(id) => Session { id, is_new: false },
            None => Session {
                id: Uuid::new_v4(),
                is_new: true,
            },
        }
    }

    /// `Set-Cookie` value for this session.
    pub fn cookie(&self) -> String {
        format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, self.id)
    }
}

/// Retention limits for stored sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions unused for longer than this are swept.
    pub idle_timeout: Duration,
    /// Upper bound on stored sessions.
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(60 * 60),
            max_sessions: 10_000,
        }
    }
}

impl SessionLimits {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            idle_timeout: Duration::from_secs(config.session_idle_seconds),
            max_sessions: config.max_sessions,
        }
    }

    /// How often the background sweep runs.
    fn sweep_interval(&self) -> Duration {
        (self.idle_timeout / 4).max(Duration::from_secs(1))
    }
}

struct Entry {
    state: FormState,
    last_seen: Instant,
}

/// Thread-safe map of session id to form state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            inner: Arc::default(),
            limits,
        }
    }

    /// Current state of a stored session.
    pub fn get(&self, id: &Uuid) -> Option<FormState> {
        let mut sessions = self.inner.write();
        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.state.clone())
    }

    /// Apply `intents` in order and return the resulting state.
    ///
    /// Stores the session if it is not stored yet, evicting the least
    /// recently used one when the store is full.
    pub fn dispatch(&self, id: Uuid, intents: impl IntoIterator<Item = FormIntent>) -> FormState {
        let mut sessions = self.inner.write();

        if !sessions.contains_key(&id) {
            if sessions.len() >= self.limits.max_sessions {
                evict_least_recent(&mut sessions);
            }
            tracing::debug!(session = %id, "Session created");
        }

        let entry = sessions.entry(id).or_insert_with(|| Entry {
            state: FormState::default(),
            last_seen: Instant::now(),
        });
        let mut state = std::mem::take(&mut entry.state);
        for intent in intents {
            state = FormReducer::reduce(state, intent);
        }
        entry.state = state.clone();
        entry.last_seen = Instant::now();
        state
    }

    /// Drop sessions idle for longer than the idle timeout. Returns how many
    /// were dropped.
    pub fn sweep_idle(&self) -> usize {
        let idle_timeout = self.limits.idle_timeout;
        let mut sessions = self.inner.write();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() <= idle_timeout);
        before - sessions.len()
    }

    /// Run [`sweep_idle`](Self::sweep_idle) periodically until aborted.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let store = self.clone();
        let period = self.limits.sweep_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = store.sweep_idle();
                if removed > 0 {
                    tracing::debug!(removed, remaining = store.len(), "Expired idle sessions");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }
}

fn evict_least_recent(sessions: &mut HashMap<Uuid, Entry>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, entry)| entry.last_seen)
        .map(|(id, _)| *id);
    if let Some(id) = oldest {
        sessions.remove(&id);
        tracing::debug!(session = %id, "Session evicted, store full");
    }
}

/// Extract the session id from the `Cookie` header(s).
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn parses_cookie_among_others() {
        let id = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("theme=dark; {}={}; other=1", SESSION_COOKIE, id));
        assert_eq!(session_id(&headers), Some(id));
    }

    #[test]
    fn ignores_malformed_cookie() {
        let headers = headers_with_cookie(&format!("{}=not-a-uuid", SESSION_COOKIE));
        assert_eq!(session_id(&headers), None);
    }

    #[test]
    fn resolve_keeps_cookie_id() {
        let id = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("{}={}", SESSION_COOKIE, id));
        assert_eq!(Session::resolve(&headers), Session { id, is_new: false });
        assert!(Session::resolve(&HeaderMap::new()).is_new);
    }

    #[test]
    fn get_does_not_create_sessions() {
        let store = SessionStore::new();
        assert!(store.get(&Uuid::new_v4()).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn dispatch_persists_state() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.dispatch(id, [FormIntent::ThemeToggled]);
        assert!(store.get(&id).unwrap().dark_mode);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn full_store_evicts_least_recently_used() {
        let store = SessionStore::with_limits(SessionLimits {
            max_sessions: 2,
            ..SessionLimits::default()
        });
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        store.dispatch(a, [FormIntent::ThemeToggled]);
        std::thread::sleep(Duration::from_millis(2));
        store.dispatch(b, [FormIntent::ThemeToggled]);
        std::thread::sleep(Duration::from_millis(2));
        // Touching `a` makes `b` the oldest.
        store.get(&a);
        std::thread::sleep(Duration::from_millis(2));
        store.dispatch(c, [FormIntent::ThemeToggled]);

        assert_eq!(store.len(), 2);
        assert!(store.get(&a).is_some());
        assert!(store.get(&b).is_none());
        assert!(store.get(&c).is_some());
    }

    #[test]
    fn sweep_drops_idle_sessions() {
        let store = SessionStore::with_limits(SessionLimits {
            idle_timeout: Duration::from_millis(10),
            ..SessionLimits::default()
        });
        store.dispatch(Uuid::new_v4(), [FormIntent::ThemeToggled]);
        std::thread::sleep(Duration::from_millis(20));
        let fresh = Uuid::new_v4();
        store.dispatch(fresh, [FormIntent::ThemeToggled]);

        assert_eq!(store.sweep_idle(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&fresh).is_some());
    }

    #[tokio::test]
    async fn sweeper_runs_in_background() {
        let store = SessionStore::with_limits(SessionLimits {
            idle_timeout: Duration::ZERO,
            ..SessionLimits::default()
        });
        store.dispatch(Uuid::new_v4(), [FormIntent::ThemeToggled]);
        std::thread::sleep(Duration::from_millis(2));

        // The first tick fires immediately.
        let sweeper = store.spawn_sweeper();
        tokio::time::sleep(Duration::from_millis(50)).await;
        sweeper.abort();

        assert_eq!(store.len(), 0);
    }
}
