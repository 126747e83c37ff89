//! Client-side session state.
//!
//! The session is an explicit state machine: `Loading` until the first
//! identity check resolves, then `Anonymous` or `Authenticated(user)`.
//! Transitions live in [`SessionState::apply`] so the headless
//! [`SessionStore`] and the TUI reducer share one definition.

use tokio::sync::watch;

use crate::api::{ApiClient, ApiResult, SignupRequest};
use crate::models::{Id, User};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Startup identity check has not resolved yet.
    #[default]
    Loading,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn identity(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Loading | SessionState::Anonymous => None,
        }
    }

    /// Id of the signed-in user; decides ownership everywhere in the UI.
    pub fn viewer_id(&self) -> Option<&Id> {
        self.identity().map(|user| &user.id)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Applies a session event. Returns `true` when the state changed.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        let next = match event {
            SessionEvent::IdentityChecked(Some(user)) | SessionEvent::SignedIn(user) => {
                SessionState::Authenticated(user)
            }
            SessionEvent::IdentityChecked(None) | SessionEvent::SignedOut => {
                SessionState::Anonymous
            }
        };
        if *self == next {
            return false;
        }
        *self = next;
        true
    }
}

/// Inputs to the session state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Result of `GET /auth/me`; `None` for any failure.
    IdentityChecked(Option<User>),
    /// Login or sign-up succeeded with this identity.
    SignedIn(User),
    /// The server acknowledged logout.
    SignedOut,
}

/// Runs the identity check and maps the outcome to a session event.
///
/// Any failure (no cookie, expired session, server down) means anonymous.
pub async fn check_identity(api: &ApiClient) -> SessionEvent {
    match api.me().await {
        Ok(user) => {
            tracing::debug!(user = %user.username, "identity check succeeded");
            SessionEvent::IdentityChecked(Some(user))
        }
        Err(err) => {
            tracing::debug!(error = %err, "identity check failed; treating as anonymous");
            SessionEvent::IdentityChecked(None)
        }
    }
}

/// Owns the API client and the current [`SessionState`].
///
/// Every change is published on a watch channel; subscribers see a new
/// value only when a transition actually changed the state.
#[derive(Debug)]
pub struct SessionStore {
    api: ApiClient,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self { api, state }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn apply(&self, event: SessionEvent) {
        self.state.send_if_modified(|state| state.apply(event));
    }

    /// Startup: enters `Loading`, then resolves the identity check.
    pub async fn start(&self) -> SessionState {
        self.state.send_if_modified(|state| {
            let changed = !state.is_loading();
            *state = SessionState::Loading;
            changed
        });
        self.refresh().await
    }

    /// Re-runs the identity check without entering `Loading` first.
    pub async fn refresh(&self) -> SessionState {
        let event = check_identity(&self.api).await;
        self.apply(event);
        self.current()
    }

    /// Signs in. On failure the error propagates and the state is untouched.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let user = self.api.login(username, password).await?;
        tracing::info!(user = %user.username, "signed in");
        self.apply(SessionEvent::SignedIn(user.clone()));
        Ok(user)
    }

    /// Creates an account and signs in as it.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> ApiResult<User> {
        let request = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let user = self.api.register(&request).await?;
        tracing::info!(user = %user.username, "account created");
        self.apply(SessionEvent::SignedIn(user.clone()));
        Ok(user)
    }

    /// Ends the session once the server acknowledges it.
    ///
    /// If the logout call fails the local identity is kept, since the
    /// server-side session may still be live.
    pub async fn logout(&self) -> ApiResult<()> {
        self.api.logout().await?;
        tracing::info!("signed out");
        self.apply(SessionEvent::SignedOut);
        Ok(())
    }
}
