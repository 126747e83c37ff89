use plaza_core::api::{ApiClient, SignupRequest};
use plaza_core::session;

use crate::events::UiEvent;

pub async fn check_identity(api: ApiClient) -> UiEvent {
    UiEvent::Session(session::check_identity(&api).await)
}

pub async fn login(api: ApiClient, username: String, password: String) -> UiEvent {
    UiEvent::AuthResult(api.login(&username, &password).await)
}

pub async fn signup(api: ApiClient, request: SignupRequest) -> UiEvent {
    UiEvent::AuthResult(api.register(&request).await)
}

pub async fn logout(api: ApiClient) -> UiEvent {
    UiEvent::LogoutResult(api.logout().await)
}
