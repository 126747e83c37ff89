//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use plaza_core::api::ApiError;
use plaza_core::session::{SessionEvent, SessionState};

use crate::common::{TaskKind, TextField};
use crate::effects::{PostAction, PostOrigin, UiEffect};
use crate::events::UiEvent;
use crate::features::auth::{self, AuthState};
use crate::features::feed;
use crate::features::nav::Tab;
use crate::features::profile::{self, ProfileMode};
use crate::features::users::{self, UsersKeyOutcome};
use crate::overlays::{NoticeState, OverlayTransition};
use crate::state::{AppState, TuiState};

/// Effects to run once at startup: the identity check.
pub fn startup(app: &mut AppState) -> Vec<UiEffect> {
    let tui = &mut app.tui;
    tui.session = SessionState::Loading;
    let task = tui.tasks.start(&mut tui.task_seq, TaskKind::Identity);
    vec![UiEffect::CheckIdentity { task }]
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskCompleted { kind, id, result } => {
            if !app.tui.tasks.state_mut(kind).finish_if_active(id) {
                tracing::debug!(?kind, id = id.0, "dropping stale task result");
                return vec![];
            }
            update(app, *result)
        }

        UiEvent::Session(event) => apply_session(&mut app.tui, event),
        UiEvent::AuthResult(result) => {
            match auth::handle_auth_result(&mut app.tui.auth, result) {
                Some(user) => {
                    tracing::info!(user = %user.username, "signed in");
                    apply_session(&mut app.tui, SessionEvent::SignedIn(user))
                }
                None => vec![],
            }
        }
        UiEvent::LogoutResult(Ok(())) => {
            tracing::info!("signed out");
            apply_session(&mut app.tui, SessionEvent::SignedOut)
        }
        UiEvent::LogoutResult(Err(err)) => {
            tracing::warn!(error = %err, "logout failed; keeping session");
            app.notify(NoticeState::error("Sign out failed", err.message));
            vec![]
        }

        UiEvent::FeedLoaded(result) => {
            feed::handle_feed_loaded(&mut app.tui.feed, result);
            vec![]
        }
        UiEvent::PostCreated(result) => {
            let tui = &mut app.tui;
            let outcome =
                feed::handle_post_created(&mut tui.feed, &mut tui.tasks, &mut tui.task_seq, result);
            notify_on_error(app, "Could not publish post", outcome)
        }
        UiEvent::PostActionDone {
            origin,
            action,
            result,
        } => handle_post_action_done(app, origin, action, result),

        UiEvent::UsersLoaded(result) => {
            let tui = &mut app.tui;
            users::handle_users_loaded(&mut tui.users, tui.session.viewer_id(), result);
            vec![]
        }
        UiEvent::Followed { username, result } => {
            let tui = &mut app.tui;
            match users::handle_followed(&mut tui.tasks, &mut tui.task_seq, &username, result) {
                Ok(effects) => {
                    app.notify(NoticeState::info(
                        "Following",
                        format!("You are now following @{username}."),
                    ));
                    effects
                }
                Err(message) => {
                    app.notify(NoticeState::error(
                        format!("Could not follow @{username}"),
                        message,
                    ));
                    vec![]
                }
            }
        }

        UiEvent::ProfileLoaded(result) => {
            profile::handle_profile_loaded(&mut app.tui.profile, result);
            vec![]
        }
        UiEvent::ProfileUpdated(result) => {
            let tui = &mut app.tui;
            let outcome = profile::handle_profile_updated(
                &mut tui.profile,
                &mut tui.tasks,
                &mut tui.task_seq,
                tui.session.viewer_id(),
                result,
            );
            notify_on_error(app, "Could not save profile", outcome)
        }
        UiEvent::AvatarUploaded(result) => {
            let tui = &mut app.tui;
            let outcome = profile::handle_avatar_uploaded(
                &mut tui.profile,
                &mut tui.tasks,
                &mut tui.task_seq,
                tui.session.viewer_id(),
                result,
            );
            notify_on_error(app, "Could not upload avatar", outcome)
        }
    }
}

fn notify_on_error(
    app: &mut AppState,
    title: &str,
    outcome: Result<Vec<UiEffect>, String>,
) -> Vec<UiEffect> {
    match outcome {
        Ok(effects) => effects,
        Err(message) => {
            app.notify(NoticeState::error(title, message));
            vec![]
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Moves the session forward and mounts or tears down the signed-in views.
fn apply_session(tui: &mut TuiState, event: SessionEvent) -> Vec<UiEffect> {
    let previous = tui.session.viewer_id().cloned();
    if !tui.session.apply(event) {
        return vec![];
    }

    match tui.session.viewer_id().cloned() {
        // Same identity re-checked with fresh details (new name, avatar).
        Some(viewer) if previous.as_ref() == Some(&viewer) => vec![],
        Some(_) => {
            tui.reset_views();
            tui.auth = AuthState::default();
            switch_tab(tui, Tab::Feed)
        }
        None => {
            tui.tasks.clear_all();
            tui.reset_views();
            vec![]
        }
    }
}

fn logout(tui: &mut TuiState) -> Vec<UiEffect> {
    if tui.tasks.is_running(TaskKind::Logout) {
        return vec![];
    }
    let task = tui.tasks.start(&mut tui.task_seq, TaskKind::Logout);
    vec![UiEffect::Logout { task }]
}

// ============================================================================
// Navigation
// ============================================================================

/// Activates `tab` and fetches its data. The profile tab always opens on
/// the viewer's own profile.
fn switch_tab(tui: &mut TuiState, tab: Tab) -> Vec<UiEffect> {
    tui.nav.active = tab;
    match tab {
        Tab::Feed => feed::load(&mut tui.tasks, &mut tui.task_seq),
        Tab::Users => users::load(&mut tui.tasks, &mut tui.task_seq),
        Tab::Profile => profile::open(
            &mut tui.profile,
            &mut tui.tasks,
            &mut tui.task_seq,
            tui.session.viewer_id(),
            None,
        ),
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Re-fetches whichever list the post lives in, or reports the failure.
fn handle_post_action_done(
    app: &mut AppState,
    origin: PostOrigin,
    action: PostAction,
    result: Result<(), ApiError>,
) -> Vec<UiEffect> {
    let tui = &mut app.tui;
    match result {
        Ok(()) => {
            let list = match origin {
                PostOrigin::Feed => &mut tui.feed.list,
                PostOrigin::Profile => &mut tui.profile.list,
            };
            if action == PostAction::Comment {
                list.comment = None;
            }
            match origin {
                PostOrigin::Feed => feed::load(&mut tui.tasks, &mut tui.task_seq),
                PostOrigin::Profile => profile::load(
                    &tui.profile,
                    &mut tui.tasks,
                    &mut tui.task_seq,
                    tui.session.viewer_id(),
                ),
            }
        }
        Err(err) => {
            tracing::warn!(?action, error = %err, "post action failed");
            let title = match action {
                PostAction::Like => "Could not like post",
                PostAction::Unlike => "Could not unlike post",
                PostAction::Comment => "Could not add comment",
            };
            app.notify(NoticeState::error(title, err.message));
            vec![]
        }
    }
}

// ============================================================================
// Terminal input
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if app.overlay.is_none()
                && let Some(field) = focused_field_mut(&mut app.tui)
            {
                field.insert_str(&text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = &app.overlay {
        if overlay.handle_key(key).transition == OverlayTransition::Close {
            app.overlay = None;
        }
        return vec![];
    }

    let tui = &mut app.tui;
    if tui.session.is_loading() {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
            _ => vec![],
        };
    }
    if !tui.session.is_authenticated() {
        return auth::handle_key(&mut tui.auth, &mut tui.tasks, &mut tui.task_seq, key);
    }
    handle_main_key(tui, key)
}

fn handle_main_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    if !tui.is_editing() {
        match key.code {
            KeyCode::Char('q') => return vec![UiEffect::Quit],
            KeyCode::Char('L') => return logout(tui),
            KeyCode::Tab => {
                let next = tui.nav.active.next();
                return switch_tab(tui, next);
            }
            KeyCode::BackTab => {
                let prev = tui.nav.active.prev();
                return switch_tab(tui, prev);
            }
            KeyCode::Char(ch @ '1'..='3') => {
                if let Some(tab) = Tab::from_digit(ch) {
                    return switch_tab(tui, tab);
                }
            }
            _ => {}
        }
    }

    let viewer = tui.session.viewer_id().cloned();
    match tui.nav.active {
        Tab::Feed => feed::handle_key(
            &mut tui.feed,
            &mut tui.tasks,
            &mut tui.task_seq,
            viewer.as_ref(),
            key,
        ),
        Tab::Users => {
            match users::handle_key(&mut tui.users, &mut tui.tasks, &mut tui.task_seq, key) {
                UsersKeyOutcome::Effects(effects) => effects,
                UsersKeyOutcome::OpenProfile(id) => {
                    tui.nav.active = Tab::Profile;
                    profile::open(
                        &mut tui.profile,
                        &mut tui.tasks,
                        &mut tui.task_seq,
                        viewer.as_ref(),
                        Some(id),
                    )
                }
            }
        }
        Tab::Profile => profile::handle_key(
            &mut tui.profile,
            &mut tui.tasks,
            &mut tui.task_seq,
            viewer.as_ref(),
            &tui.base_url,
            key,
        ),
    }
}

/// The text field that receives pasted text, if any is focused.
fn focused_field_mut(tui: &mut TuiState) -> Option<&mut TextField> {
    if tui.session.is_loading() {
        return None;
    }
    if !tui.session.is_authenticated() {
        return Some(tui.auth.focused_mut());
    }
    match tui.nav.active {
        Tab::Feed if tui.feed.composing => Some(&mut tui.feed.composer),
        Tab::Feed => tui.feed.list.comment.as_mut(),
        Tab::Users => None,
        Tab::Profile => match &mut tui.profile.mode {
            ProfileMode::Edit(draft) => Some(draft.focused_mut()),
            ProfileMode::Avatar(path) => Some(path),
            ProfileMode::View => tui.profile.list.comment.as_mut(),
        },
    }
}
