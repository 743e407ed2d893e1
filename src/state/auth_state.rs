/// Email/password form shared by the Sign up and Sign in screens
#[derive(Debug, Default, Clone)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl AuthForm {
    /// Both fields filled (the input-level "required" check)
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Mark the form as submitted and hand out its credentials
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        if !self.is_complete() {
            self.error = Some("Email and password are required".to_string());
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some((self.email.trim().to_string(), self.password.clone()))
    }

    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sign up / sign in forms plus the signed-in session, if any
#[derive(Debug, Default)]
pub struct AuthState {
    pub signup: AuthForm,
    pub signin: AuthForm,
    pub session: Option<String>,
    pub signed_in_email: Option<String>,
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.signup.submitting || self.signin.submitting
    }

    /// Clear user session (logout); returns the token to revoke remotely
    pub fn clear_session(&mut self) -> Option<String> {
        self.signed_in_email = None;
        self.session.take()
    }
}
