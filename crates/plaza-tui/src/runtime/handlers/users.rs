use plaza_core::api::ApiClient;
use plaza_core::models::Id;

use crate::events::UiEvent;

pub async fn load_users(api: ApiClient) -> UiEvent {
    UiEvent::UsersLoaded(api.users().await)
}

pub async fn follow(api: ApiClient, user_id: Id, username: String) -> UiEvent {
    let result = api.follow(&user_id).await;
    UiEvent::Followed { username, result }
}
