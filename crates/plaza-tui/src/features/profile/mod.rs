//! Profile tab.
//!
//! Shows one user's profile and posts. The viewer's own profile adds an
//! inline editor for name and bio and an avatar upload prompt; both are
//! gated on the viewer owning the profile.

mod render;
mod update;

use plaza_core::models::{Id, User};
use plaza_core::validate::{FieldErrors, ProfileField};
pub use render::render_profile;
pub use update::{
    asset_url, handle_avatar_uploaded, handle_key, handle_profile_loaded, handle_profile_updated,
    load, open,
};

use crate::common::TextField;
use crate::features::post::PostListState;

/// Inline editor for the viewer's own name and bio.
#[derive(Debug, Clone, Default)]
pub struct EditDraft {
    pub name: TextField,
    pub bio: TextField,
    pub focus: ProfileField,
    pub errors: FieldErrors<ProfileField>,
}

impl EditDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: TextField::with_value(user.name.clone()),
            bio: TextField::with_value(user.bio.clone().unwrap_or_default()),
            ..Self::default()
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            ProfileField::Name => &mut self.name,
            ProfileField::Bio => &mut self.bio,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ProfileField::Name => ProfileField::Bio,
            ProfileField::Bio => ProfileField::Name,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub enum ProfileMode {
    #[default]
    View,
    Edit(EditDraft),
    /// Prompt for a local image path to upload as the avatar.
    Avatar(TextField),
}

#[derive(Debug, Default)]
pub struct ProfileState {
    /// Whose profile to show; `None` means the viewer's own.
    pub target: Option<Id>,
    pub user: Option<User>,
    pub list: PostListState,
    pub mode: ProfileMode,
    pub error: Option<String>,
}

impl ProfileState {
    /// Id to fetch: the explicit target, else the viewer.
    pub fn effective_target(&self, viewer: Option<&Id>) -> Option<Id> {
        self.target.clone().or_else(|| viewer.cloned())
    }

    /// Edit and upload controls only exist on the viewer's own profile.
    pub fn is_owner(&self, viewer: Option<&Id>) -> bool {
        match (&self.user, viewer) {
            (Some(user), Some(viewer)) => &user.id == viewer,
            _ => false,
        }
    }

    pub fn is_editing(&self) -> bool {
        !matches!(self.mode, ProfileMode::View) || self.list.is_commenting()
    }
}
