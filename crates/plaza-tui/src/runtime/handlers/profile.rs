use std::path::PathBuf;

use plaza_core::api::{ApiClient, ProfileUpdate};
use plaza_core::models::Id;

use crate::events::UiEvent;

pub async fn load_profile(api: ApiClient, user_id: Id) -> UiEvent {
    UiEvent::ProfileLoaded(api.user(&user_id).await)
}

pub async fn update_profile(api: ApiClient, update: ProfileUpdate) -> UiEvent {
    UiEvent::ProfileUpdated(api.update_profile(&update).await)
}

pub async fn upload_avatar(api: ApiClient, path: PathBuf) -> UiEvent {
    UiEvent::AvatarUploaded(api.upload_avatar(&path).await)
}
