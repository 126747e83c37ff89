//! HTTP client for the Plaza API.
//!
//! Every request shares one cookie jar (the session credential) and sends a
//! JSON content type, except binary uploads where the multipart encoder
//! picks the content type. All failures come back as [`ApiError`].

mod error;
mod types;

use std::path::Path;

pub use error::{ApiError, ApiResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
pub use types::{ProfileUpdate, SignupRequest};
use types::{ContentRequest, LoginRequest, PostList, UserEnvelope, UserList};

use crate::models::{Id, Post, User};

/// Standard User-Agent header for Plaza API requests.
pub const USER_AGENT: &str = concat!("plaza/", env!("CARGO_PKG_VERSION"));

/// Multipart field name for avatar uploads.
const PHOTO_FIELD: &str = "photo";

/// Plaza API client.
///
/// Cloning is cheap and clones share the same cookie jar, so a session
/// established through one clone is visible to all of them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL with an empty cookie jar.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::new(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Sends a JSON request and returns the parsed JSON body.
    ///
    /// An empty success body parses as `null`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        tracing::debug!(%method, endpoint, "api request");
        let mut builder = self
            .http
            .request(method.clone(), self.url(endpoint))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, endpoint, error = %e, "api request failed");
            ApiError::network(&e)
        })?;
        parse_response(&method, endpoint, response).await
    }

    /// Sends a multipart form and returns the parsed JSON body.
    ///
    /// No content type is set here; the multipart encoder supplies it along
    /// with the boundary.
    pub async fn upload_binary(&self, endpoint: &str, form: Form) -> ApiResult<Value> {
        tracing::debug!(endpoint, "api upload");
        let response = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(endpoint, error = %e, "api upload failed");
                ApiError::network(&e)
            })?;
        parse_response(&Method::POST, endpoint, response).await
    }

    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> ApiResult<T> {
        let value = self.request(method, endpoint, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::unexpected(&e))
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// `GET /auth/me`: the identity bound to the current cookie.
    pub async fn me(&self) -> ApiResult<User> {
        self.request_as::<UserEnvelope>(Method::GET, "/auth/me", None)
            .await
            .map(UserEnvelope::into_user)
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let body = to_body(&LoginRequest { username, password })?;
        self.request_as::<UserEnvelope>(Method::POST, "/auth/login", Some(body))
            .await
            .map(UserEnvelope::into_user)
    }

    pub async fn register(&self, request: &SignupRequest) -> ApiResult<User> {
        let body = to_body(request)?;
        self.request_as::<UserEnvelope>(Method::POST, "/auth/register", Some(body))
            .await
            .map(UserEnvelope::into_user)
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.request(Method::POST, "/auth/logout", None).await?;
        Ok(())
    }

    // ========================================================================
    // Posts, likes, comments
    // ========================================================================

    /// `GET /posts/feed`, in the order the server returns.
    pub async fn feed(&self) -> ApiResult<Vec<Post>> {
        self.request_as::<PostList>(Method::GET, "/posts/feed", None)
            .await
            .map(PostList::into_posts)
    }

    pub async fn create_post(&self, content: &str) -> ApiResult<()> {
        let body = to_body(&ContentRequest { content })?;
        self.request(Method::POST, "/posts", Some(body)).await?;
        Ok(())
    }

    pub async fn like(&self, post_id: &Id) -> ApiResult<()> {
        self.request(Method::POST, &format!("/likes/{post_id}"), None)
            .await?;
        Ok(())
    }

    pub async fn unlike(&self, post_id: &Id) -> ApiResult<()> {
        self.request(Method::DELETE, &format!("/likes/{post_id}"), None)
            .await?;
        Ok(())
    }

    pub async fn comment(&self, post_id: &Id, content: &str) -> ApiResult<()> {
        let body = to_body(&ContentRequest { content })?;
        self.request(Method::POST, &format!("/comments/{post_id}"), Some(body))
            .await?;
        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn users(&self) -> ApiResult<Vec<User>> {
        self.request_as::<UserList>(Method::GET, "/users", None)
            .await
            .map(UserList::into_users)
    }

    /// `GET /users/{id}`: full profile.
    ///
    /// Posts nested in the profile without an author get the profile owner.
    pub async fn user(&self, id: &Id) -> ApiResult<User> {
        let mut user = self
            .request_as::<UserEnvelope>(Method::GET, &format!("/users/{id}"), None)
            .await
            .map(UserEnvelope::into_user)?;
        let owner = user.projection();
        if let Some(posts) = user.posts.as_mut() {
            for post in posts.iter_mut().filter(|post| post.author.is_none()) {
                post.author = Some(owner.clone());
            }
        }
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<()> {
        let body = to_body(update)?;
        self.request(Method::PATCH, "/users/me", Some(body)).await?;
        Ok(())
    }

    /// `POST /users/me/photo` with the file at `path` as the `photo` field.
    pub async fn upload_avatar(&self, path: &Path) -> ApiResult<()> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::new(format!("Failed to read {}: {e}", path.display())))?;
        if bytes.is_empty() {
            return Err(ApiError::new(format!("{} is empty", path.display())));
        }
        let mime = infer::get(&bytes).map_or("application/octet-stream", |kind| kind.mime_type());
        let file_name = path
            .file_name()
            .map_or_else(|| "avatar".to_string(), |name| name.to_string_lossy().into_owned());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ApiError::new(format!("Invalid file type {mime}: {e}")))?;
        let form = Form::new().part(PHOTO_FIELD, part);
        self.upload_binary("/users/me/photo", form).await?;
        Ok(())
    }

    pub async fn follow(&self, user_id: &Id) -> ApiResult<()> {
        self.request(Method::POST, &format!("/follows/{user_id}"), None)
            .await?;
        Ok(())
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::new(format!("Failed to encode request: {e}")))
}

async fn parse_response(method: &Method, endpoint: &str, response: Response) -> ApiResult<Value> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| ApiError::network(&e))?;

    if !status.is_success() {
        let err = ApiError::from_status(status.as_u16(), &bytes);
        tracing::warn!(
            %method,
            endpoint,
            status = status.as_u16(),
            error = %err,
            "api error response"
        );
        return Err(err);
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::unexpected(&e))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn user_json(id: u64, username: &str) -> Value {
        json!({
            "id": id,
            "username": username,
            "name": username,
            "email": format!("{username}@test.com")
        })
    }

    #[tokio::test]
    async fn test_request_sends_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "alice")))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).unwrap();
        let me = api.me().await.unwrap();
        assert_eq!(me.username, "alice");
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).unwrap();
        let err = api.login("alice", "wrong").await.unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_error_without_body_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/feed"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).unwrap();
        let err = api.feed().await.unwrap_err();
        assert_eq!(err.message, "Request failed with status 503");
    }

    #[tokio::test]
    async fn test_network_failure_is_an_api_error() {
        // Nothing listens on the discard port.
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = api.me().await.unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn test_login_cookie_is_sent_on_later_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "username": "alice", "password": "secret1" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sid=abc123; Path=/")
                    .set_body_json(json!({ "user": user_json(1, "alice") })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/feed"))
            .and(header("cookie", "sid=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).unwrap();
        let user = api.login("alice", "secret1").await.unwrap();
        assert_eq!(user.id, Id::new("1"));
        // Clones share the jar.
        let posts = api.clone().feed().await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_empty_success_body_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/follows/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).unwrap();
        api.follow(&Id::new("5")).await.unwrap();
    }

    #[tokio::test]
    async fn test_unlike_uses_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/likes/10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).unwrap();
        api.unlike(&Id::new("10")).await.unwrap();
    }

    #[tokio::test]
    async fn test_profile_posts_get_owner_as_author() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "username": "carol",
                "name": "Carol",
                "posts": [{ "id": 11, "content": "first" }]
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).unwrap();
        let profile = api.user(&Id::new("3")).await.unwrap();
        let posts = profile.posts.unwrap();
        assert_eq!(posts[0].author_name(), "Carol");
        assert!(posts[0].author.as_ref().unwrap().posts.is_none());
    }

    #[tokio::test]
    async fn test_upload_avatar_sends_multipart_photo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/me/photo"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("me.png");
        // PNG signature so `infer` detects the type.
        std::fs::write(&file, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0]).unwrap();

        let api = ApiClient::new(server.uri()).unwrap();
        api.upload_avatar(&file).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"photo\""));
        assert!(body.contains("filename=\"me.png\""));
        assert!(body.contains("image/png"));
    }

    #[tokio::test]
    async fn test_upload_avatar_missing_file_errors_without_request() {
        let server = MockServer::start().await;
        let api = ApiClient::new(server.uri()).unwrap();
        let err = api
            .upload_avatar(Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(err.message.starts_with("Failed to read"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
