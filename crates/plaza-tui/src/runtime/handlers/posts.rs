use plaza_core::api::ApiClient;
use plaza_core::models::Id;

use crate::effects::{PostAction, PostOrigin};
use crate::events::UiEvent;

pub async fn load_feed(api: ApiClient) -> UiEvent {
    UiEvent::FeedLoaded(api.feed().await)
}

pub async fn create_post(api: ApiClient, content: String) -> UiEvent {
    UiEvent::PostCreated(api.create_post(&content).await)
}

/// Runs a like, unlike or comment against one post.
pub async fn post_action(
    api: ApiClient,
    origin: PostOrigin,
    action: PostAction,
    post_id: Id,
    content: Option<String>,
) -> UiEvent {
    let result = match action {
        PostAction::Like => api.like(&post_id).await,
        PostAction::Unlike => api.unlike(&post_id).await,
        PostAction::Comment => {
            api.comment(&post_id, content.as_deref().unwrap_or_default())
                .await
        }
    };
    UiEvent::PostActionDone {
        origin,
        action,
        result,
    }
}
