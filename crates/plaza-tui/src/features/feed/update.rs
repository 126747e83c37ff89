use crossterm::event::{KeyCode, KeyEvent};
use plaza_core::api::ApiError;
use plaza_core::models::{Id, Post};
use plaza_core::validate;

use super::FeedState;
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::{PostOrigin, UiEffect};
use crate::features::post;

/// Starts a feed fetch, superseding any fetch still in flight.
pub fn load(tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
    let task = tasks.start(seq, TaskKind::Feed);
    vec![UiEffect::LoadFeed { task }]
}

pub fn handle_key(
    feed: &mut FeedState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    viewer: Option<&Id>,
    key: KeyEvent,
) -> Vec<UiEffect> {
    if feed.composing {
        return match key.code {
            KeyCode::Esc => {
                feed.composing = false;
                vec![]
            }
            KeyCode::Enter => submit_post(feed, tasks, seq),
            _ => {
                feed.composer.handle_key(key);
                vec![]
            }
        };
    }

    if let Some(effects) =
        post::handle_key(&mut feed.list, tasks, seq, viewer, PostOrigin::Feed, key)
    {
        return effects;
    }

    match key.code {
        KeyCode::Char('n' | 'i') => {
            feed.composing = true;
            vec![]
        }
        KeyCode::Char('r') => load(tasks, seq),
        _ => vec![],
    }
}

/// Submits the composer. Blank drafts never reach the API.
fn submit_post(feed: &mut FeedState, tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if validate::content(feed.composer.value()).is_some()
        || tasks.is_running(TaskKind::CreatePost)
    {
        return vec![];
    }
    let task = tasks.start(seq, TaskKind::CreatePost);
    vec![UiEffect::CreatePost {
        task,
        content: feed.composer.value().trim().to_string(),
    }]
}

pub fn handle_feed_loaded(feed: &mut FeedState, result: Result<Vec<Post>, ApiError>) {
    feed.loaded = true;
    match result {
        Ok(posts) => {
            feed.error = None;
            feed.list.set_posts(posts);
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load feed");
            feed.error = Some(err.message);
        }
    }
}

/// On success the composer clears and the feed is re-fetched.
///
/// Returns the error message on failure so the caller can surface it.
pub fn handle_post_created(
    feed: &mut FeedState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    result: Result<(), ApiError>,
) -> Result<Vec<UiEffect>, String> {
    match result {
        Ok(()) => {
            feed.composer.clear();
            feed.composing = false;
            Ok(load(tasks, seq))
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to create post");
            Err(err.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_blank_post_sends_nothing() {
        let mut feed = FeedState::default();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();

        handle_key(&mut feed, &mut tasks, &mut seq, None, key(KeyCode::Char('n')));
        for ch in "   ".chars() {
            handle_key(&mut feed, &mut tasks, &mut seq, None, key(KeyCode::Char(ch)));
        }
        let effects = handle_key(&mut feed, &mut tasks, &mut seq, None, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert!(!tasks.is_any_running());
    }

    #[test]
    fn test_post_then_refetch() {
        let mut feed = FeedState::default();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();

        handle_key(&mut feed, &mut tasks, &mut seq, None, key(KeyCode::Char('n')));
        for ch in "hi there".chars() {
            handle_key(&mut feed, &mut tasks, &mut seq, None, key(KeyCode::Char(ch)));
        }
        let effects = handle_key(&mut feed, &mut tasks, &mut seq, None, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CreatePost { content, .. }] if content == "hi there"
        ));
        // Draft survives until the server confirms.
        assert_eq!(feed.composer.value(), "hi there");

        let effects = handle_post_created(&mut feed, &mut tasks, &mut seq, Ok(())).unwrap();
        assert!(matches!(effects.as_slice(), [UiEffect::LoadFeed { .. }]));
        assert!(feed.composer.value().is_empty());
        assert!(!feed.composing);
    }

    #[test]
    fn test_failed_post_keeps_draft() {
        let mut feed = FeedState::default();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        feed.composer.set("keep me");

        let err = handle_post_created(&mut feed, &mut tasks, &mut seq, Err(ApiError::new("boom")))
            .unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(feed.composer.value(), "keep me");
    }

    #[test]
    fn test_fetch_error_keeps_previous_posts() {
        let mut feed = FeedState::default();
        let posts: Vec<Post> =
            serde_json::from_value(serde_json::json!([{ "id": 1, "content": "x" }])).unwrap();
        handle_feed_loaded(&mut feed, Ok(posts));
        handle_feed_loaded(&mut feed, Err(ApiError::new("Request failed with status 500")));

        assert_eq!(feed.list.posts.len(), 1);
        assert_eq!(feed.error.as_deref(), Some("Request failed with status 500"));
    }
}
