use crate::models::Credential;
use crate::utils::error_handling::safe_lock;
use crate::utils::errors::AuthError;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed store of user credentials (one row per email)
pub struct CredentialStore {
    conn: Mutex<Connection>,
}

impl CredentialStore {
    /// Open (or create) the store at `path`, creating parent folders as needed
    pub fn open(path: &Path) -> Result<Self, AuthError> {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("[CredentialStore] Could not create {}: {}", parent.display(), e);
            }
        }
        log::info!("[CredentialStore] Opening {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, AuthError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, AuthError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS credentials (
                email         TEXT PRIMARY KEY NOT NULL,
                password_hash TEXT NOT NULL,
                created_at    INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a new record; an existing email yields `DuplicateUser`
    pub fn insert(&self, credential: &Credential) -> Result<(), AuthError> {
        let conn = safe_lock(&self.conn, "CredentialStore");
        match conn.execute(
            "INSERT INTO credentials (email, password_hash) VALUES (?1, ?2)",
            params![credential.email, credential.password_hash],
        ) {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(AuthError::DuplicateUser)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn find(&self, email: &str) -> Result<Option<Credential>, AuthError> {
        let conn = safe_lock(&self.conn, "CredentialStore");
        let found = conn
            .query_row(
                "SELECT email, password_hash FROM credentials WHERE email = ?1",
                params![email],
                |row| {
                    Ok(Credential {
                        email: row.get(0)?,
                        password_hash: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    pub fn count(&self) -> Result<usize, AuthError> {
        let conn = safe_lock(&self.conn, "CredentialStore");
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM credentials", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
