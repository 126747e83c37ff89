use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use plaza_core::api::{ApiError, ProfileUpdate};
use plaza_core::models::{Id, User};
use plaza_core::validate;

use super::{EditDraft, ProfileMode, ProfileState};
use crate::common::{TaskKind, TaskSeq, Tasks, TextField};
use crate::effects::{PostOrigin, UiEffect};
use crate::features::post;

/// Fetches the profile being shown. Nothing happens without a target.
pub fn load(
    profile: &ProfileState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
) -> Vec<UiEffect> {
    let Some(user_id) = profile.effective_target(viewer) else {
        return vec![];
    };
    let task = tasks.start(seq, TaskKind::Profile);
    vec![UiEffect::LoadProfile { task, user_id }]
}

/// Shows `target` (or the viewer when `None`) and fetches it.
pub fn open(
    profile: &mut ProfileState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
    target: Option<Id>,
) -> Vec<UiEffect> {
    let next = target.clone().or_else(|| viewer.cloned());
    if profile.user.as_ref().map(|user| &user.id) != next.as_ref() {
        profile.user = None;
        profile.list.clear();
    }
    profile.target = target;
    profile.mode = ProfileMode::View;
    profile.error = None;
    load(profile, tasks, seq, viewer)
}

/// Resolves a possibly relative asset path against the API base URL.
pub fn asset_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

pub fn handle_key(
    profile: &mut ProfileState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
    base_url: &str,
    key: KeyEvent,
) -> Vec<UiEffect> {
    if !matches!(profile.mode, ProfileMode::View) {
        if key.code == KeyCode::Esc {
            profile.mode = ProfileMode::View;
            return vec![];
        }
        return match &mut profile.mode {
            ProfileMode::Edit(draft) => handle_edit_key(draft, tasks, seq, key),
            ProfileMode::Avatar(path) => handle_avatar_key(path, tasks, seq, key),
            ProfileMode::View => vec![],
        };
    }

    if let Some(effects) =
        post::handle_key(&mut profile.list, tasks, seq, viewer, PostOrigin::Profile, key)
    {
        return effects;
    }

    let owner = profile.is_owner(viewer);
    match key.code {
        KeyCode::Char('e') if owner => {
            if let Some(user) = &profile.user {
                profile.mode = ProfileMode::Edit(EditDraft::from_user(user));
            }
            vec![]
        }
        KeyCode::Char('a') if owner => {
            profile.mode = ProfileMode::Avatar(TextField::default());
            vec![]
        }
        KeyCode::Char('o') => {
            let avatar = profile.user.as_ref().and_then(|user| user.avatar.as_deref());
            match avatar {
                Some(path) => vec![UiEffect::OpenBrowser {
                    url: asset_url(base_url, path),
                }],
                None => vec![],
            }
        }
        KeyCode::Char('r') => load(profile, tasks, seq, viewer),
        _ => vec![],
    }
}

fn handle_edit_key(
    draft: &mut EditDraft,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => draft.toggle_focus(),
        KeyCode::Enter => {
            draft.errors = validate::profile(draft.name.value(), draft.bio.value());
            if !draft.errors.is_empty() || tasks.is_running(TaskKind::ProfileUpdate) {
                return vec![];
            }
            let task = tasks.start(seq, TaskKind::ProfileUpdate);
            return vec![UiEffect::UpdateProfile {
                task,
                update: ProfileUpdate {
                    name: draft.name.value().trim().to_string(),
                    bio: draft.bio.value().trim().to_string(),
                },
            }];
        }
        _ => {
            if draft.focused_mut().handle_key(key) {
                let focus = draft.focus;
                draft.errors.clear(focus);
            }
        }
    }
    vec![]
}

fn handle_avatar_key(
    path: &mut TextField,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> Vec<UiEffect> {
    if key.code != KeyCode::Enter {
        path.handle_key(key);
        return vec![];
    }
    if path.is_blank() || tasks.is_running(TaskKind::AvatarUpload) {
        return vec![];
    }
    let task = tasks.start(seq, TaskKind::AvatarUpload);
    vec![UiEffect::UploadAvatar {
        task,
        path: PathBuf::from(path.value().trim()),
    }]
}

pub fn handle_profile_loaded(profile: &mut ProfileState, result: Result<User, ApiError>) {
    match result {
        Ok(user) => {
            profile.error = None;
            profile.list.set_posts(user.posts.clone().unwrap_or_default());
            profile.user = Some(user);
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load profile");
            profile.error = Some(err.message);
        }
    }
}

/// Re-fetches the profile and refreshes the session identity so the rest
/// of the UI sees the new name or avatar.
fn refresh_after_mutation(
    profile: &mut ProfileState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
) -> Vec<UiEffect> {
    profile.mode = ProfileMode::View;
    let mut effects = load(profile, tasks, seq, viewer);
    let task = tasks.start(seq, TaskKind::Identity);
    effects.push(UiEffect::CheckIdentity { task });
    effects
}

pub fn handle_profile_updated(
    profile: &mut ProfileState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
    result: Result<(), ApiError>,
) -> Result<Vec<UiEffect>, String> {
    match result {
        Ok(()) => {
            tracing::info!("profile updated");
            Ok(refresh_after_mutation(profile, tasks, seq, viewer))
        }
        Err(err) => {
            tracing::warn!(error = %err, "profile update failed");
            Err(err.message)
        }
    }
}

pub fn handle_avatar_uploaded(
    profile: &mut ProfileState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
    result: Result<(), ApiError>,
) -> Result<Vec<UiEffect>, String> {
    match result {
        Ok(()) => {
            tracing::info!("avatar uploaded");
            Ok(refresh_after_mutation(profile, tasks, seq, viewer))
        }
        Err(err) => {
            tracing::warn!(error = %err, "avatar upload failed");
            Err(err.message)
        }
    }
}
