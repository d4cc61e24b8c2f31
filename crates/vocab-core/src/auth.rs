use std::sync::Arc;

use tokio::sync::watch;
use vocab_api::UserDirectory;
use vocab_types::{NewUser, SessionUser, User};

use crate::error::AuthError;
use crate::password::{self, PasswordError};
use crate::session::SessionContext;
use crate::validation::{self, RegistrationForm};

pub const REGISTER_FAILED: &str = "Registration failed!";
pub const LOGIN_FAILED: &str = "Login failed!";
pub const DEFAULT_ROLE: &str = "user";

/// Request status of the auth screens. Who is signed in lives in the
/// [`SessionContext`].
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub pending: usize,
    pub error: Option<String>,
    /// Bumped every time an error is set
    pub error_seq: u64,
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Key of the error currently set, if any
    pub fn error_key(&self) -> Option<u64> {
        self.error.as_ref().map(|_| self.error_seq)
    }
}

#[derive(Clone)]
pub struct AuthStore {
    users: Arc<dyn UserDirectory>,
    session: SessionContext,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthStore {
    pub fn new(users: Arc<dyn UserDirectory>, session: SessionContext) -> Self {
        Self {
            users,
            session,
            state: Arc::new(watch::Sender::new(AuthState::default())),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.session.current()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Validate the registration form and create the account.
    ///
    /// A form breaking any rule is refused before anything is sent.
    pub async fn submit_registration(
        &self,
        form: &RegistrationForm,
    ) -> Result<SessionUser, AuthError> {
        let errors = validation::validate_registration(form);
        if validation::has_errors(&errors) {
            tracing::debug!("Registration form rejected on {}", errors[0].field);
            return Err(AuthError::Invalid(errors));
        }
        self.register(&form.full_name, &form.email, &form.password)
            .await
    }

    /// Create an account. The new user still has to log in.
    ///
    /// The password is salted and hashed before it is sent.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        self.begin();

        let result = async {
            let hash = password::hash_password_blocking(password.to_string())
                .await
                .map_err(AuthError::from)?;
            let new_user = NewUser {
                full_name: full_name.trim().to_string(),
                email: email.trim().to_string(),
                password: hash,
                role: DEFAULT_ROLE.to_string(),
            };
            self.users
                .create_user(&new_user)
                .await
                .map_err(|source| AuthError::Remote {
                    message: source.display_message(REGISTER_FAILED),
                    source,
                })
        }
        .await;

        match &result {
            Ok(user) => tracing::info!("Registered {}", user.email),
            Err(e) => tracing::error!("Registration failed: {e}"),
        }
        self.finish(result, REGISTER_FAILED)
    }

    /// Find the account matching `email` and `password` and open a session.
    ///
    /// Unknown email and wrong password are reported the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        self.begin();

        let result = async {
            let users = self
                .users
                .list_users()
                .await
                .map_err(|source| AuthError::Remote {
                    message: source.display_message(LOGIN_FAILED),
                    source,
                })?;

            let user = find_account(users, email.trim(), password.to_string()).await?;
            let user = user.ok_or(AuthError::InvalidCredentials)?;

            let public = SessionUser::from(&user);
            self.session.sign_in(public.clone())?;
            Ok::<_, AuthError>(public)
        }
        .await;

        match &result {
            Ok(user) => tracing::info!("Logged in as {}", user.email),
            Err(e) => tracing::warn!("Login failed: {e}"),
        }
        self.finish(result, LOGIN_FAILED)
    }

    /// End the session. Nothing is sent to the server.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.sign_out()?;
        self.state.send_modify(|state| state.error = None);
        tracing::info!("Logged out");
        Ok(())
    }

    /// Pull the stored session back into memory
    pub fn restore(&self) -> Option<SessionUser> {
        self.session.rehydrate()
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.pending += 1;
            state.error = None;
        });
    }

    fn finish<T>(&self, result: Result<T, AuthError>, default: &str) -> Result<T, AuthError> {
        self.state.send_modify(|state| {
            state.pending = state.pending.saturating_sub(1);
            if let Err(e) = &result {
                let message = e.to_string();
                state.error = Some(if message.is_empty() {
                    default.to_string()
                } else {
                    message
                });
                state.error_seq = state.error_seq.wrapping_add(1);
            }
        });
        result
    }
}

/// Linear scan for the account with `email` whose stored hash accepts
/// `password`. Hash checks run on the blocking pool.
async fn find_account(
    users: Vec<User>,
    email: &str,
    password: String,
) -> Result<Option<User>, PasswordError> {
    let candidates: Vec<User> = users.into_iter().filter(|u| u.email == email).collect();
    if candidates.is_empty() {
        return Ok(None);
    }

    let found = tokio::task::spawn_blocking(move || {
        candidates
            .into_iter()
            .find(|u| password::verify_password(&password, &u.password))
    })
    .await?;

    Ok(found)
}
