//! Feed tab: a composer above the global post list.

mod render;
mod update;

pub use render::render_feed;
pub use update::{handle_feed_loaded, handle_key, handle_post_created, load};

use crate::common::TextField;
use crate::features::post::PostListState;

#[derive(Debug, Default)]
pub struct FeedState {
    pub composer: TextField,
    /// Keys go to the composer while set.
    pub composing: bool,
    pub list: PostListState,
    /// Inline fetch error; the previous list stays visible.
    pub error: Option<String>,
    pub loaded: bool,
}

impl FeedState {
    pub fn is_editing(&self) -> bool {
        self.composing || self.list.is_commenting()
    }
}
