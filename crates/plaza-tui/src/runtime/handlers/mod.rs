//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions over an owned [`ApiClient`] that return the
//! `UiEvent` describing the outcome. They never touch state; the runtime
//! spawns them and posts the result to the inbox wrapped in
//! `UiEvent::TaskCompleted`.

mod posts;
mod profile;
mod session;
mod users;

use std::future::Future;
use std::pin::Pin;

use plaza_core::api::ApiClient;

use crate::common::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;

/// A handler future ready to be spawned.
pub type Job = Pin<Box<dyn Future<Output = UiEvent> + Send + 'static>>;

/// How the runtime should carry out one effect.
pub enum Dispatch {
    Quit,
    OpenBrowser(String),
    Task {
        kind: TaskKind,
        id: TaskId,
        job: Job,
    },
}

fn task(
    kind: TaskKind,
    id: TaskId,
    job: impl Future<Output = UiEvent> + Send + 'static,
) -> Dispatch {
    Dispatch::Task {
        kind,
        id,
        job: Box::pin(job),
    }
}

/// Maps an effect to its handler.
pub fn dispatch(api: &ApiClient, effect: UiEffect) -> Dispatch {
    let api = api.clone();
    match effect {
        UiEffect::Quit => Dispatch::Quit,
        UiEffect::OpenBrowser { url } => Dispatch::OpenBrowser(url),

        UiEffect::CheckIdentity { task: id } => {
            task(TaskKind::Identity, id, session::check_identity(api))
        }
        UiEffect::Login {
            task: id,
            username,
            password,
        } => task(TaskKind::Auth, id, session::login(api, username, password)),
        UiEffect::Signup { task: id, request } => {
            task(TaskKind::Auth, id, session::signup(api, request))
        }
        UiEffect::Logout { task: id } => task(TaskKind::Logout, id, session::logout(api)),

        UiEffect::LoadFeed { task: id } => task(TaskKind::Feed, id, posts::load_feed(api)),
        UiEffect::CreatePost { task: id, content } => {
            task(TaskKind::CreatePost, id, posts::create_post(api, content))
        }
        UiEffect::PostAction {
            task: id,
            origin,
            action,
            post_id,
            content,
        } => task(
            TaskKind::PostAction,
            id,
            posts::post_action(api, origin, action, post_id, content),
        ),

        UiEffect::LoadUsers { task: id } => task(TaskKind::Users, id, users::load_users(api)),
        UiEffect::Follow {
            task: id,
            user_id,
            username,
        } => task(TaskKind::Follow, id, users::follow(api, user_id, username)),

        UiEffect::LoadProfile { task: id, user_id } => {
            task(TaskKind::Profile, id, profile::load_profile(api, user_id))
        }
        UiEffect::UpdateProfile { task: id, update } => {
            task(TaskKind::ProfileUpdate, id, profile::update_profile(api, update))
        }
        UiEffect::UploadAvatar { task: id, path } => {
            task(TaskKind::AvatarUpload, id, profile::upload_avatar(api, path))
        }
    }
}

#[cfg(test)]
mod tests;
