//! Data model shared by the API client, the session store and the views.
//!
//! The server owns all of these records; the client only holds read-only
//! projections. Deserialization normalizes the payload variants the server
//! is known to send (numeric or string ids, two like shapes, several avatar
//! field names) into one canonical shape.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Opaque identifier for users, posts and comments.
///
/// The server may send ids as JSON strings or numbers; both become the same
/// string-backed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Id(text),
            RawId::Signed(n) => Id(n.to_string()),
            RawId::Unsigned(n) => Id(n.to_string()),
        })
    }
}

/// A user account as seen by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: Id,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(
        default,
        alias = "avatarUrl",
        alias = "avatar_url",
        alias = "photo",
        alias = "photoUrl"
    )]
    pub avatar: Option<String>,
    /// Only present on full profile responses.
    #[serde(default)]
    pub posts: Option<Vec<Post>>,
}

impl User {
    /// Name to show in lists: the display name, or the username when blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }

    /// Copy of this user without the nested posts collection.
    pub fn projection(&self) -> User {
        User {
            posts: None,
            ..self.clone()
        }
    }
}

/// A post in a feed or on a profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PostWire")]
pub struct Post {
    pub id: Id,
    pub content: String,
    pub image: Option<String>,
    /// Missing on posts nested inside a profile response until the API
    /// client fills it in with the profile owner.
    pub author: Option<User>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Whether `viewer` has liked this post.
    pub fn liked_by(&self, viewer: &Id) -> bool {
        self.likes.iter().any(|like| &like.user_id == viewer)
    }

    pub fn author_name(&self) -> &str {
        self.author.as_ref().map_or("unknown", User::display_name)
    }
}

/// One user's like on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub user_id: Id,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: Id,
    #[serde(default, alias = "text")]
    pub content: String,
    #[serde(default, alias = "user")]
    pub author: Option<User>,
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Deserialize)]
struct PostWire {
    id: Id,
    #[serde(default, alias = "text")]
    content: String,
    #[serde(default, alias = "imageUrl", alias = "image_url")]
    image: Option<String>,
    #[serde(default, alias = "user")]
    author: Option<User>,
    #[serde(default)]
    likes: Vec<LikeWire>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl From<PostWire> for Post {
    fn from(wire: PostWire) -> Self {
        Post {
            id: wire.id,
            content: wire.content,
            image: wire.image,
            author: wire.author,
            likes: wire.likes.into_iter().filter_map(LikeWire::normalize).collect(),
            comments: wire.comments,
        }
    }
}

/// A like as sent by the server: either `{ "user": { "id": .. } }` or
/// `{ "userId": .. }`.
#[derive(Deserialize)]
struct LikeWire {
    #[serde(default)]
    user: Option<UserRef>,
    #[serde(default, alias = "userId")]
    user_id: Option<Id>,
}

#[derive(Deserialize)]
struct UserRef {
    id: Id,
}

impl LikeWire {
    fn normalize(self) -> Option<Like> {
        self.user
            .map(|user| user.id)
            .or(self.user_id)
            .map(|user_id| Like { user_id })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_id_accepts_strings_and_numbers() {
        let text: Id = serde_json::from_value(json!("abc")).unwrap();
        let number: Id = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(text.as_str(), "abc");
        assert_eq!(number, Id::new("42"));
    }

    #[test]
    fn test_like_shapes_normalize_to_user_id() {
        let post: Post = serde_json::from_value(json!({
            "id": 1,
            "content": "hello",
            "author": { "id": 7, "username": "alice" },
            "likes": [
                { "user": { "id": 2, "username": "bob" } },
                { "userId": 3 },
                { "user_id": "4" },
                { "postId": 1 }
            ]
        }))
        .unwrap();

        let ids: Vec<&str> = post.likes.iter().map(|like| like.user_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
        assert!(post.liked_by(&Id::new("3")));
        assert!(!post.liked_by(&Id::new("7")));
    }

    #[test]
    fn test_post_defaults_missing_collections() {
        let post: Post = serde_json::from_value(json!({ "id": "p1", "content": "x" })).unwrap();
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
        assert_eq!(post.author_name(), "unknown");
    }

    #[test]
    fn test_user_avatar_aliases() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "alice",
            "avatarUrl": "https://img.example.com/a.png"
        }))
        .unwrap();
        assert_eq!(user.avatar.as_deref(), Some("https://img.example.com/a.png"));
        assert_eq!(user.display_name(), "alice");
    }

    #[test]
    fn test_comment_author_from_user_field() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 9,
            "content": "nice",
            "user": { "id": 2, "name": "Bob" }
        }))
        .unwrap();
        assert_eq!(comment.author.unwrap().display_name(), "Bob");
    }
}
