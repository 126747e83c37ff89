use crossterm::event::{KeyCode, KeyEvent};
use plaza_core::api::ApiError;
use plaza_core::models::{Id, User};

use super::UsersState;
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;

pub fn load(tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
    let task = tasks.start(seq, TaskKind::Users);
    vec![UiEffect::LoadUsers { task }]
}

/// What a users-tab key asks of the parent.
#[derive(Debug, PartialEq)]
pub enum UsersKeyOutcome {
    Effects(Vec<UiEffect>),
    /// Open this user's profile in the profile tab.
    OpenProfile(Id),
}

pub fn handle_key(
    users: &mut UsersState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> UsersKeyOutcome {
    let effects = match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            if users.selected + 1 < users.users.len() {
                users.selected += 1;
            }
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            users.selected = users.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Char('f') | KeyCode::Enter => follow_selected(users, tasks, seq),
        KeyCode::Char('p') => {
            return match users.selected_user() {
                Some(user) => UsersKeyOutcome::OpenProfile(user.id.clone()),
                None => UsersKeyOutcome::Effects(vec![]),
            };
        }
        KeyCode::Char('r') => load(tasks, seq),
        _ => vec![],
    };
    UsersKeyOutcome::Effects(effects)
}

/// One follow request per press; presses while a follow is in flight are
/// ignored.
fn follow_selected(users: &UsersState, tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
    let Some(user) = users.selected_user() else {
        return vec![];
    };
    if tasks.is_running(TaskKind::Follow) {
        return vec![];
    }
    let task = tasks.start(seq, TaskKind::Follow);
    vec![UiEffect::Follow {
        task,
        user_id: user.id.clone(),
        username: user.username.clone(),
    }]
}

/// Stores the directory without the viewer's own entry.
pub fn handle_users_loaded(
    users: &mut UsersState,
    viewer: Option<&Id>,
    result: Result<Vec<User>, ApiError>,
) {
    users.loaded = true;
    match result {
        Ok(list) => {
            users.error = None;
            users.users = list
                .into_iter()
                .filter(|user| Some(&user.id) != viewer)
                .collect();
            users.selected = users.selected.min(users.users.len().saturating_sub(1));
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load users");
            users.error = Some(err.message);
        }
    }
}

/// After a confirmed follow the whole directory is re-fetched.
pub fn handle_followed(
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    username: &str,
    result: Result<(), ApiError>,
) -> Result<Vec<UiEffect>, String> {
    match result {
        Ok(()) => {
            tracing::info!(user = %username, "followed user");
            Ok(load(tasks, seq))
        }
        Err(err) => {
            tracing::warn!(user = %username, error = %err, "follow failed");
            Err(err.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn directory() -> Vec<User> {
        serde_json::from_value(json!([
            { "id": 1, "username": "alice" },
            { "id": 2, "username": "bob" },
            { "id": 3, "username": "carol" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_directory_excludes_viewer() {
        let mut users = UsersState::default();
        handle_users_loaded(&mut users, Some(&Id::new("1")), Ok(directory()));

        let names: Vec<_> = users.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["bob", "carol"]);
    }

    #[test]
    fn test_follow_emits_single_request() {
        let mut users = UsersState::default();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        handle_users_loaded(&mut users, Some(&Id::new("1")), Ok(directory()));
        handle_key(&mut users, &mut tasks, &mut seq, key(KeyCode::Down));

        let first = handle_key(&mut users, &mut tasks, &mut seq, key(KeyCode::Char('f')));
        let second = handle_key(&mut users, &mut tasks, &mut seq, key(KeyCode::Char('f')));

        match first {
            UsersKeyOutcome::Effects(effects) => assert!(matches!(
                effects.as_slice(),
                [UiEffect::Follow { user_id, username, .. }]
                    if *user_id == Id::new("3") && username == "carol"
            )),
            other @ UsersKeyOutcome::OpenProfile(_) => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(second, UsersKeyOutcome::Effects(vec![]));
    }

    #[test]
    fn test_followed_refetches_directory() {
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();

        let effects = handle_followed(&mut tasks, &mut seq, "bob", Ok(())).unwrap();
        assert!(matches!(effects.as_slice(), [UiEffect::LoadUsers { .. }]));

        let failure = Err(ApiError::new("Already following"));
        let err = handle_followed(&mut tasks, &mut seq, "bob", failure).unwrap_err();
        assert_eq!(err, "Already following");
    }

    #[test]
    fn test_open_profile_of_selected_user() {
        let mut users = UsersState::default();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        handle_users_loaded(&mut users, None, Ok(directory()));

        let outcome = handle_key(&mut users, &mut tasks, &mut seq, key(KeyCode::Char('p')));
        assert_eq!(outcome, UsersKeyOutcome::OpenProfile(Id::new("1")));
    }
}
