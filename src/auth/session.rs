use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::RngCore;
use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::users::repo::Role;

/// Token byte length before hex encoding (32 bytes = 64 hex chars).
const TOKEN_BYTES: usize = 32;

/// The signed-in user bound to a session, as exposed to clients.
/// The password hash never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub name: String,
}

struct StoredSession {
    identity: Identity,
    expires_at: OffsetDateTime,
}

/// In-memory session table keyed by opaque bearer token.
///
/// Expiry is absolute from issuance, no sliding renewal. Sessions are
/// lost on restart; clients simply log in again.
#[derive(Clone)]
pub struct SessionManager {
    ttl: Duration,
    inner: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint a fresh token bound to `identity`.
    pub fn issue(&self, identity: Identity) -> String {
        let token = generate_token();
        let session = StoredSession {
            identity,
            expires_at: OffsetDateTime::now_utc() + self.ttl,
        };
        self.inner.write().insert(token.clone(), session);
        token
    }

    /// Look up the identity behind `token`, evicting it when expired.
    pub fn resolve(&self, token: &str) -> Option<Identity> {
        let now = OffsetDateTime::now_utc();
        {
            let sessions = self.inner.read();
            match sessions.get(token) {
                Some(session) if session.expires_at > now => {
                    return Some(session.identity.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }
        self.inner.write().remove(token);
        None
    }

    /// Drop a session. Returns whether a live entry was removed.
    pub fn revoke(&self, token: &str) -> bool {
        self.inner.write().remove(token).is_some()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
