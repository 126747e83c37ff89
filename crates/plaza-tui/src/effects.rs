//! UI effects returned by the reducer.
//!
//! The reducer never performs I/O; it describes what should happen and the
//! runtime executes it. Every API-backed effect carries the [`TaskId`] the
//! reducer allocated, so only the latest completion of each kind is applied.

use std::path::PathBuf;

use plaza_core::api::{ProfileUpdate, SignupRequest};
use plaza_core::models::Id;

use crate::common::{TaskId, TaskKind};

/// Which list a post interaction came from; decides what gets re-fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrigin {
    Feed,
    Profile,
}

impl PostOrigin {
    /// Task that re-fetches the list a post from this origin lives in.
    pub fn refresh_task(self) -> TaskKind {
        match self {
            PostOrigin::Feed => TaskKind::Feed,
            PostOrigin::Profile => TaskKind::Profile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Like,
    Unlike,
    Comment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    Quit,
    /// Opens a URL in the system browser.
    OpenBrowser { url: String },

    // Session
    CheckIdentity { task: TaskId },
    Login {
        task: TaskId,
        username: String,
        password: String,
    },
    Signup {
        task: TaskId,
        request: SignupRequest,
    },
    Logout { task: TaskId },

    // Feed and posts
    LoadFeed { task: TaskId },
    CreatePost {
        task: TaskId,
        content: String,
    },
    PostAction {
        task: TaskId,
        origin: PostOrigin,
        action: PostAction,
        post_id: Id,
        content: Option<String>,
    },

    // Users
    LoadUsers { task: TaskId },
    Follow {
        task: TaskId,
        user_id: Id,
        username: String,
    },

    // Profile
    LoadProfile {
        task: TaskId,
        user_id: Id,
    },
    UpdateProfile {
        task: TaskId,
        update: ProfileUpdate,
    },
    UploadAvatar {
        task: TaskId,
        path: PathBuf,
    },
}
