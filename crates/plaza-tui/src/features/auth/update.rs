use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use plaza_core::api::{ApiError, SignupRequest};
use plaza_core::models::User;
use plaza_core::validate::{AuthField, AuthMode};

use super::AuthState;
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;

/// Handles a key on the auth screen.
pub fn handle_key(
    auth: &mut AuthState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('t') if ctrl => auth.toggle_mode(),
        KeyCode::Tab | KeyCode::Down => auth.focus_next(),
        KeyCode::BackTab | KeyCode::Up => auth.focus_prev(),
        KeyCode::Enter => return submit(auth, tasks, seq),
        _ => {
            if auth.focused_mut().handle_key(key) {
                let field = auth.focused_field();
                auth.errors.clear(field);
                auth.banner = None;
            }
        }
    }
    vec![]
}

/// Validates and submits the form for the current mode.
///
/// Nothing is sent while a submission is in flight or any field is invalid.
fn submit(auth: &mut AuthState, tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if tasks.is_running(TaskKind::Auth) {
        return vec![];
    }

    let form = auth.form();
    auth.errors = form.validate(auth.mode);
    auth.banner = None;
    if let Some(&first) = auth
        .mode
        .fields()
        .iter()
        .find(|field| auth.errors.get(**field).is_some())
    {
        auth.focus_field(first);
        return vec![];
    }

    let task = tasks.start(seq, TaskKind::Auth);
    match auth.mode {
        AuthMode::SignIn => vec![UiEffect::Login {
            task,
            username: form.username.trim().to_string(),
            password: form.password,
        }],
        AuthMode::SignUp => vec![UiEffect::Signup {
            task,
            request: SignupRequest {
                username: form.username.trim().to_string(),
                email: form.email.trim().to_string(),
                password: form.password,
                name: form.name.trim().to_string(),
            },
        }],
    }
}

/// Applies a login/sign-up outcome to the form.
///
/// Returns the identity on success; the caller moves the session forward.
pub fn handle_auth_result(auth: &mut AuthState, result: Result<User, ApiError>) -> Option<User> {
    match result {
        Ok(user) => {
            *auth = AuthState::default();
            Some(user)
        }
        Err(err) => {
            tracing::warn!(mode = ?auth.mode, error = %err, "authentication failed");
            auth.banner = Some(err.message);
            auth.field_mut(AuthField::Password).clear();
            None
        }
    }
}
