use crate::models::Credential;
use crate::services::sessions::SessionRegistry;
use crate::storage::CredentialStore;
use crate::utils::errors::AuthError;
use crate::utils::password::{hash_password, verify_password};

/// Signup/signin against the credential store
pub struct AuthService {
    store: CredentialStore,
    sessions: SessionRegistry,
}

impl AuthService {
    pub fn new(store: CredentialStore, sessions: SessionRegistry) -> Self {
        Self { store, sessions }
    }

    /// Create a credential record for a fresh email
    pub fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = normalize_email(email);
        validate_email(&email)?;
        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        let credential = Credential {
            email: email.clone(),
            password_hash: hash_password(password)?,
        };
        match self.store.insert(&credential) {
            Ok(()) => {
                log::info!("[Auth] Registered {}", email);
                Ok(())
            }
            Err(AuthError::DuplicateUser) => {
                log::info!("[Auth] Signup rejected, {} already exists", email);
                Err(AuthError::DuplicateUser)
            }
            Err(e) => {
                log::error!("[Auth] Signup failed for {}: {}", email, e);
                Err(e)
            }
        }
    }

    /// Check credentials and hand back a session token
    pub fn signin(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        match self.store.find(&email)? {
            Some(credential) if verify_password(password, &credential.password_hash) => {
                log::info!("[Auth] {} signed in", email);
                Ok(self.sessions.issue(&email))
            }
            Some(_) => {
                log::info!("[Auth] Wrong password for {}", email);
                Err(AuthError::InvalidCredentials)
            }
            None => {
                log::info!("[Auth] Signin for unknown email {}", email);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub fn signout(&self, session: &str) -> Result<(), AuthError> {
        if self.sessions.revoke(session) {
            log::info!("[Auth] Session signed out");
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Email behind a live session token
    pub fn resolve(&self, session: &str) -> Option<String> {
        self.sessions.resolve(session)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Syntactic check equivalent to an HTML `type="email"` input
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let invalid = || AuthError::Validation("A valid email address is required".to_string());

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels_ok = domain.contains('.')
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'));
    if !labels_ok {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service() -> AuthService {
        AuthService::new(
            CredentialStore::open_in_memory().unwrap(),
            SessionRegistry::new(Duration::from_secs(60)),
        )
    }

    #[test]
    fn signup_succeeds_once_per_email() {
        let auth = service();
        auth.signup("fan@example.com", "secret").unwrap();

        let err = auth.signup("fan@example.com", "other").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
    }

    #[test]
    fn emails_are_compared_case_insensitively() {
        let auth = service();
        auth.signup("  Fan@Example.com ", "secret").unwrap();

        assert!(matches!(
            auth.signup("fan@example.com", "secret"),
            Err(AuthError::DuplicateUser)
        ));
        assert!(auth.signin("FAN@example.COM", "secret").is_ok());
    }

    #[test]
    fn signup_validates_input() {
        let auth = service();
        for (email, password) in [
            ("", "pw"),
            ("no-at-sign", "pw"),
            ("@example.com", "pw"),
            ("a@localhost", "pw"),
            ("a@b@example.com", "pw"),
            ("a b@example.com", "pw"),
            ("a@example..com", "pw"),
            ("a@example.com", ""),
        ] {
            assert!(
                matches!(auth.signup(email, password), Err(AuthError::Validation(_))),
                "{email:?}/{password:?} should be rejected"
            );
        }
    }

    #[test]
    fn signin_requires_matching_password() {
        let auth = service();
        auth.signup("fan@example.com", "secret").unwrap();

        let session = auth.signin("fan@example.com", "secret").unwrap();
        assert_eq!(auth.resolve(&session).as_deref(), Some("fan@example.com"));

        assert!(matches!(
            auth.signin("fan@example.com", "Secret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn signin_never_succeeds_for_unknown_email() {
        let auth = service();
        assert!(matches!(
            auth.signin("ghost@example.com", "anything"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn signout_revokes_the_session() {
        let auth = service();
        auth.signup("fan@example.com", "secret").unwrap();
        let session = auth.signin("fan@example.com", "secret").unwrap();

        auth.signout(&session).unwrap();
        assert_eq!(auth.resolve(&session), None);
        assert!(matches!(auth.signout(&session), Err(AuthError::InvalidCredentials)));
    }
}
