//! In-memory signed-in sessions
//!
//! Signin hands out an opaque token; the registry maps it back to the email
//! until signout or until the TTL runs out. Nothing is persisted, so a backend
//! restart signs everyone out.

use crate::constants::SESSION_TOKEN_LEN;
use crate::utils::error_handling::safe_lock;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct SessionEntry {
    email: String,
    issued_at: Instant,
}

pub struct SessionRegistry {
    ttl: Duration,
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh token for `email`
    pub fn issue(&self, email: &str) -> String {
        let mut bytes = [0u8; SESSION_TOKEN_LEN];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        let mut sessions = safe_lock(&self.sessions, "Session");
        self.purge_expired(&mut sessions);
        sessions.insert(
            token.clone(),
            SessionEntry {
                email: email.to_string(),
                issued_at: Instant::now(),
            },
        );
        log::debug!("[Session] Issued session ({} active)", sessions.len());
        token
    }

    /// Email of a live session
    pub fn resolve(&self, token: &str) -> Option<String> {
        let mut sessions = safe_lock(&self.sessions, "Session");
        let live = match sessions.get(token) {
            None => return None,
            Some(entry) => (entry.issued_at.elapsed() < self.ttl).then(|| entry.email.clone()),
        };
        if live.is_none() {
            log::debug!("[Session] Dropping expired session");
            sessions.remove(token);
        }
        live
    }

    /// Remove a session; false when it was unknown or already expired
    pub fn revoke(&self, token: &str) -> bool {
        let mut sessions = safe_lock(&self.sessions, "Session");
        match sessions.remove(token) {
            Some(entry) => entry.issued_at.elapsed() < self.ttl,
            None => false,
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        let mut sessions = safe_lock(&self.sessions, "Session");
        self.purge_expired(&mut sessions);
        sessions.len()
    }

    fn purge_expired(&self, sessions: &mut HashMap<String, SessionEntry>) {
        let ttl = self.ttl;
        sessions.retain(|_, entry| entry.issued_at.elapsed() < ttl);
    }
}
