//! Request bodies and response envelopes for the Plaza API.

use serde::{Deserialize, Serialize};

use crate::models::{Post, User};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ContentRequest<'a> {
    pub content: &'a str,
}

/// Body for `PATCH /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: String,
}

/// Identity responses come either bare or wrapped in `{ "user": .. }`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl UserEnvelope {
    pub(crate) fn into_user(self) -> User {
        match self {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum PostList {
    Bare(Vec<Post>),
    Wrapped { posts: Vec<Post> },
}

impl PostList {
    pub(crate) fn into_posts(self) -> Vec<Post> {
        match self {
            PostList::Bare(posts) | PostList::Wrapped { posts } => posts,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum UserList {
    Bare(Vec<User>),
    Wrapped { users: Vec<User> },
}

impl UserList {
    pub(crate) fn into_users(self) -> Vec<User> {
        match self {
            UserList::Bare(users) | UserList::Wrapped { users } => users,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_envelope_accepts_both_shapes() {
        let wrapped: UserEnvelope =
            serde_json::from_value(json!({ "user": { "id": 1, "username": "a" } })).unwrap();
        let bare: UserEnvelope =
            serde_json::from_value(json!({ "id": 1, "username": "a" })).unwrap();
        assert_eq!(wrapped.into_user(), bare.into_user());
    }

    #[test]
    fn test_post_list_accepts_both_shapes() {
        let bare: PostList = serde_json::from_value(json!([{ "id": 1, "content": "x" }])).unwrap();
        let wrapped: PostList =
            serde_json::from_value(json!({ "posts": [{ "id": 1, "content": "x" }] })).unwrap();
        assert_eq!(bare.into_posts(), wrapped.into_posts());
    }

    #[test]
    fn test_user_list_accepts_both_shapes() {
        let wrapped: UserList =
            serde_json::from_value(json!({ "users": [{ "id": 1 }, { "id": 2 }] })).unwrap();
        assert_eq!(wrapped.into_users().len(), 2);
    }
}
