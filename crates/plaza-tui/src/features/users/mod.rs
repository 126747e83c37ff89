//! Users tab: everyone except the viewer, with follow.

mod render;
mod update;

use plaza_core::models::User;
pub use render::render_users;
pub use update::{UsersKeyOutcome, handle_followed, handle_key, handle_users_loaded, load};

#[derive(Debug, Default)]
pub struct UsersState {
    pub users: Vec<User>,
    pub selected: usize,
    pub error: Option<String>,
    pub loaded: bool,
}

impl UsersState {
    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected)
    }
}
