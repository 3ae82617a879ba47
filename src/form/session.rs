use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::FORM_SESSION_TTL_SECS;
use crate::utils::random_session_id;

use super::models::SearchForm;

#[derive(Debug)]
struct Entry {
    form: SearchForm,
    last_touched: Instant,
}

#[derive(Debug)]
struct SessionsInner {
    entries: HashMap<String, Entry>,
    ttl: Duration,
}

impl SessionsInner {
    /// Drop every form idle for longer than the ttl as of `now`.
    fn sweep(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, e| now.saturating_duration_since(e.last_touched) <= ttl);
    }
}

/// Search forms keyed by the browser's session cookie. Forms idle for
/// longer than the cookie lifetime are dropped.
#[derive(Clone, Debug)]
pub struct FormSessions {
    inner: Arc<Mutex<SessionsInner>>,
}

impl Default for FormSessions {
    fn default() -> Self {
        Self::with_ttl(Duration::from_secs(FORM_SESSION_TTL_SECS))
    }
}

impl FormSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionsInner {
                entries: HashMap::new(),
                ttl,
            })),
        }
    }

    /// Resolve the session for a cookie value, creating a fresh form when the
    /// cookie is absent, unknown or expired. Returns the id and whether it is
    /// new.
    pub fn ensure(&self, existing: Option<&str>) -> (String, bool) {
        self.ensure_at(existing, Instant::now())
    }

    fn ensure_at(&self, existing: Option<&str>, now: Instant) -> (String, bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.sweep(now);
        if let Some(id) = existing {
            if let Some(entry) = inner.entries.get_mut(id) {
                entry.last_touched = now;
                return (id.to_string(), false);
            }
        }
        let id = random_session_id();
        inner.entries.insert(
            id.clone(),
            Entry {
                form: SearchForm::new(),
                last_touched: now,
            },
        );
        (id, true)
    }

    /// Run `f` against the session's form. The lock is held only for the
    /// duration of the closure.
    pub fn with_form<R>(&self, id: &str, f: impl FnOnce(&mut SearchForm) -> R) -> Option<R> {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.get_mut(id).map(|entry| {
            entry.last_touched = Instant::now();
            f(&mut entry.form)
        })
    }

    pub fn snapshot(&self, id: &str) -> Option<SearchForm> {
        self.inner.lock().unwrap().entries.get(id).map(|e| e.form.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
