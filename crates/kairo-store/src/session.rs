//! # Session Gate
//!
//! The thin fixed-credential login in front of the screens. The open
//! session is persisted as the literal string `true` under the
//! `kairo_auth` key, matching the legacy storage layout the other
//! collections keep.

use tracing::info;

use crate::error::StoreResult;
use crate::store::{keys, Database};

/// The only accepted credentials.
const USERNAME: &str = "1234";
const PASSWORD: &str = "1234";

/// Login gate backed by the auth flag.
#[derive(Debug, Clone)]
pub struct Session {
    db: Database,
}

impl Session {
    /// Creates a new Session gate.
    pub fn new(db: Database) -> Self {
        Session { db }
    }

    /// Attempts a login. Returns whether the credentials matched; on a
    /// match the auth flag is persisted.
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<bool> {
        if username == USERNAME && password == PASSWORD {
            self.db.put_raw(keys::AUTH, "true").await?;
            info!("session opened");
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether a session is currently open.
    pub async fn is_authenticated(&self) -> StoreResult<bool> {
        Ok(self.db.get_raw(keys::AUTH).await?.as_deref() == Some("true"))
    }

    /// Closes the session, removing the auth flag.
    pub async fn logout(&self) -> StoreResult<()> {
        self.db.remove_raw(keys::AUTH).await?;
        info!("session closed");
        Ok(())
    }
}
