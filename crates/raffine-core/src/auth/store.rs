//! Session state store.

use std::sync::Arc;

use crate::auth::model::{Session, SessionState};
use crate::auth::service::AuthService;
use crate::error::{RaffineError, Result};
use crate::storage::{self, LocalStorage, keys};
use crate::validation::{LoginForm, RegisterForm};

/// Holds the signed-in session and mirrors it into local storage.
///
/// Transitions:
/// - `restore`: Anonymous, or Authenticated if a well-formed session was persisted
/// - `login` / `register`: only from Anonymous; Authenticated on success,
///   unchanged on failure
/// - `logout`: Anonymous from any state
pub struct SessionStore {
    state: SessionState,
    storage: Arc<dyn LocalStorage>,
}

impl SessionStore {
    /// Loads the persisted session. A corrupt record is purged and ignored.
    pub fn restore(storage: Arc<dyn LocalStorage>) -> Self {
        let state = match storage::load_json::<Session>(storage.as_ref(), keys::SESSION) {
            Some(session) => {
                tracing::debug!(user = %session.identity.email, "Restored persisted session");
                SessionState::Authenticated(session)
            }
            None => SessionState::Anonymous,
        };
        Self { state, storage }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Validates the form, then exchanges the credentials for a session.
    ///
    /// Validation failures never reach `auth`. Collaborator errors are
    /// returned unmodified and leave the state untouched.
    pub async fn login(&mut self, auth: &dyn AuthService, form: &LoginForm) -> Result<Session> {
        self.ensure_anonymous()?;
        form.validate()?;
        self.remember_email(form);

        let session = auth.login(&form.email, &form.password).await.map_err(|e| {
            tracing::info!(error = %e, "Login rejected");
            e
        })?;
        Ok(self.authenticate(session))
    }

    /// Validates the form, then registers a new account and signs it in.
    pub async fn register(
        &mut self,
        auth: &dyn AuthService,
        form: &RegisterForm,
    ) -> Result<Session> {
        self.ensure_anonymous()?;
        form.validate()?;

        let session = auth
            .register(form.name.trim(), &form.email, &form.password)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Registration rejected");
                e
            })?;
        Ok(self.authenticate(session))
    }

    /// Signs out and purges the persisted session. Safe to call repeatedly.
    ///
    /// Returns whether a session was actually ended.
    pub fn logout(&mut self) -> bool {
        let was_authenticated = self.state.is_authenticated();
        self.state = SessionState::Anonymous;
        if let Err(e) = self.storage.remove(keys::SESSION) {
            tracing::warn!(error = %e, "Failed to purge persisted session");
        }
        if was_authenticated {
            tracing::info!("Signed out");
        }
        was_authenticated
    }

    /// Email saved by a previous "remember me" login.
    pub fn remembered_email(&self) -> Option<String> {
        match self.storage.get(keys::REMEMBERED_EMAIL) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read remembered email");
                None
            }
        }
    }

    /// Switching accounts goes through `logout` so sign-in stays a single
    /// Anonymous to Authenticated transition.
    fn ensure_anonymous(&self) -> Result<()> {
        match self.state.session() {
            Some(session) => Err(RaffineError::AlreadyAuthenticated {
                email: session.identity.email.clone(),
            }),
            None => Ok(()),
        }
    }

    fn remember_email(&self, form: &LoginForm) {
        let result = if form.remember_me {
            self.storage.set(keys::REMEMBERED_EMAIL, &form.email)
        } else {
            self.storage.remove(keys::REMEMBERED_EMAIL)
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to update remembered email");
        }
    }

    fn authenticate(&mut self, session: Session) -> Session {
        if let Err(e) = storage::save_json(self.storage.as_ref(), keys::SESSION, &session) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
        tracing::info!(user = %session.identity.email, "Signed in");
        self.state = SessionState::Authenticated(session.clone());
        session
    }
}
