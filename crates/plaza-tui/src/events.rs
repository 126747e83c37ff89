//! Events consumed by the reducer.

use crossterm::event::Event as CrosstermEvent;
use plaza_core::api::ApiError;
use plaza_core::models::{Post, User};
use plaza_core::session::SessionEvent;

use crate::common::{TaskId, TaskKind};
use crate::effects::{PostAction, PostOrigin};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, redraw cadence).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// An async task finished. `result` is dropped unless `id` is still the
    /// active task of `kind`.
    TaskCompleted {
        kind: TaskKind,
        id: TaskId,
        result: Box<UiEvent>,
    },

    /// Outcome of an identity check (startup or refresh).
    Session(SessionEvent),
    /// Login or sign-up finished.
    AuthResult(Result<User, ApiError>),
    LogoutResult(Result<(), ApiError>),

    FeedLoaded(Result<Vec<Post>, ApiError>),
    PostCreated(Result<(), ApiError>),
    PostActionDone {
        origin: PostOrigin,
        action: PostAction,
        result: Result<(), ApiError>,
    },

    UsersLoaded(Result<Vec<User>, ApiError>),
    Followed {
        username: String,
        result: Result<(), ApiError>,
    },

    ProfileLoaded(Result<User, ApiError>),
    ProfileUpdated(Result<(), ApiError>),
    AvatarUploaded(Result<(), ApiError>),
}
