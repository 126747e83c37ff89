//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: SessionState   (loading / anonymous / authenticated)
//! │   ├── task_seq, tasks         (async task ids and lifecycle)
//! │   ├── auth: AuthState         (sign-in / sign-up form)
//! │   ├── nav: NavState           (active tab)
//! │   ├── feed, users, profile    (per-tab view state)
//! └── overlay: Option<Overlay>    (blocking notices)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers and the rest of the reducer never fight over one borrow.

use plaza_core::session::SessionState;

use crate::common::{TaskSeq, Tasks};
use crate::features::auth::AuthState;
use crate::features::feed::FeedState;
use crate::features::nav::{NavState, Tab};
use crate::features::profile::ProfileState;
use crate::features::users::UsersState;
use crate::overlays::{NoticeState, Overlay};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            tui: TuiState::new(base_url.into()),
            overlay: None,
        }
    }

    /// Opens a blocking notice, replacing any notice already shown.
    pub fn notify(&mut self, notice: NoticeState) {
        self.overlay = Some(Overlay::Notice(notice));
    }
}

/// Everything except overlays.
pub struct TuiState {
    pub should_quit: bool,
    /// API base URL, for the status line and resolving asset paths.
    pub base_url: String,
    pub session: SessionState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub spinner_frame: usize,
    pub auth: AuthState,
    pub nav: NavState,
    pub feed: FeedState,
    pub users: UsersState,
    pub profile: ProfileState,
}

impl TuiState {
    pub fn new(base_url: String) -> Self {
        Self {
            should_quit: false,
            base_url,
            session: SessionState::Loading,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            auth: AuthState::default(),
            nav: NavState::default(),
            feed: FeedState::default(),
            users: UsersState::default(),
            profile: ProfileState::default(),
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Whether the active view has a text input focused; global shortcuts
    /// are disabled while typing.
    pub fn is_editing(&self) -> bool {
        match self.nav.active {
            Tab::Feed => self.feed.is_editing(),
            Tab::Users => false,
            Tab::Profile => self.profile.is_editing(),
        }
    }

    /// Drops all signed-in view state.
    pub fn reset_views(&mut self) {
        self.nav = NavState::default();
        self.feed = FeedState::default();
        self.users = UsersState::default();
        self.profile = ProfileState::default();
    }
}
