//! HTTP client for the CircleShare backend.
//!
//! One method per endpoint, each performing a single request. The token
//! comes from the injected [`Session`]; authenticated calls short-circuit
//! with [`ApiError::Unauthenticated`] when no token is stored, before any
//! network I/O happens.

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::error::{ApiError, ErrorCode, Result};
use super::traits::CircleApi;
use super::types::{
    CircleMember, Comment, CommentId, Invitation, InvitationAction, InvitationId, LikeState,
    PhotoUpload, Post, PostId, Profile, TokenPair, UserId,
};
use crate::session::Session;

/// Shape of a backend error body.
///
/// Newer backends send `code`; all snapshots send `detail` or `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

/// REST client bound to a base URL and a session.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Creates a client for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: trim_trailing_slash(base_url.into()),
            session,
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attaches the stored bearer token, or refuses the call.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.session.token()?.ok_or(ApiError::Unauthenticated)?;
        Ok(request.bearer_auth(token.as_str()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Transport(format!("Cannot connect to {}", self.base_url))
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        Err(Self::backend_error(response).await)
    }

    /// Normalizes a non-success response into a typed backend error.
    ///
    /// Tries the structured body first, falls back to raw text, and as a
    /// last resort classifies by status code alone.
    async fn backend_error(response: Response) -> ApiError {
        let status = response.status();
        let raw = response.text().await.unwrap_or_default();

        let (code, message) = match serde_json::from_str::<ErrorBody>(&raw) {
            Ok(body) => {
                let message = body
                    .message
                    .or(body.detail)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| default_message(status, &raw));
                let code = body
                    .code
                    .as_deref()
                    .and_then(ErrorCode::parse)
                    .unwrap_or_else(|| ErrorCode::from_message(&message));
                (code, message)
            }
            Err(_) => {
                let message = default_message(status, &raw);
                (ErrorCode::from_status(status.as_u16()), message)
            }
        };

        warn!(status = status.as_u16(), code = %code, "backend rejected request");
        ApiError::Backend { code, message }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_authed<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let request = self.authorize(self.http.get(self.endpoint(path)))?;
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn delete_authed(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let request = self.authorize(self.http.delete(self.endpoint(path)))?;
        self.send(request).await?;
        Ok(())
    }

    async fn post_json_authed<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        debug!(path, "POST");
        let request = self.authorize(self.http.post(self.endpoint(path)))?.json(body);
        let response = self.send(request).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl CircleApi for ApiClient {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        debug!(path = "/register", "POST");
        let body = json!({ "name": name, "email": email, "password": password });
        let request = self.http.post(self.endpoint("/register")).json(&body);
        self.send(request).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        debug!(path = "/login", "POST");
        let body = json!({ "email": email, "password": password });
        let request = self.http.post(self.endpoint("/login")).json(&body);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn profile(&self) -> Result<Profile> {
        self.get_authed("/profile").await
    }

    async fn list_feed(&self) -> Result<Vec<Post>> {
        self.get_authed("/their-days").await
    }

    async fn list_my_posts(&self) -> Result<Vec<Post>> {
        self.get_authed("/my-circle/posts").await
    }

    async fn create_post(&self, content: &str, photo: Option<PhotoUpload>) -> Result<Post> {
        debug!(path = "/posts/", with_photo = photo.is_some(), "POST");
        let request = self.authorize(self.http.post(self.endpoint("/posts/")))?;

        let request = match photo {
            Some(photo) => {
                let part = multipart::Part::bytes(photo.bytes)
                    .file_name(photo.file_name)
                    .mime_str(&photo.content_type)
                    .map_err(|e| ApiError::Request(format!("invalid photo type: {e}")))?;
                let form = multipart::Form::new()
                    .text("content", content.to_string())
                    .part("photo", part);
                request.multipart(form)
            }
            None => request.json(&json!({ "content": content })),
        };

        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn delete_post(&self, post_id: PostId) -> Result<()> {
        self.delete_authed(&format!("/posts/{post_id}")).await
    }

    async fn list_members(&self) -> Result<Vec<CircleMember>> {
        self.get_authed("/my-circle/members").await
    }

    async fn invite_member(&self, email: &str) -> Result<Invitation> {
        self.post_json_authed("/my-circle/invite", &json!({ "email": email }))
            .await
    }

    async fn remove_member(&self, member_id: UserId) -> Result<()> {
        self.delete_authed(&format!("/my-circle/members/{member_id}"))
            .await
    }

    async fn list_invitations(&self) -> Result<Vec<Invitation>> {
        self.get_authed("/invitations/received").await
    }

    async fn respond_invitation(&self, id: InvitationId, action: InvitationAction) -> Result<()> {
        let path = format!("/invitations/{id}/respond");
        debug!(path = %path, action = action.as_str(), "POST");
        let request = self
            .authorize(self.http.post(self.endpoint(&path)))?
            .json(&json!({ "action": action.as_str() }));
        self.send(request).await?;
        Ok(())
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.get_authed(&format!("/posts/{post_id}/comments")).await
    }

    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment> {
        self.post_json_authed(
            &format!("/posts/{post_id}/comments"),
            &json!({ "content": content }),
        )
        .await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        self.delete_authed(&format!("/comments/{id}")).await
    }

    async fn toggle_like(&self, post_id: PostId) -> Result<LikeState> {
        self.post_json_authed(&format!("/posts/{post_id}/like"), &json!({}))
            .await
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn default_message(status: StatusCode, raw: &str) -> String {
    if raw.trim().is_empty() {
        format!("Request failed with status {status}")
    } else {
        raw.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorCode;

    fn client_without_token() -> ApiClient {
        ApiClient::new("http://127.0.0.1:8000", Session::in_memory()).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:8000/", Session::in_memory()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.endpoint("/login"), "http://127.0.0.1:8000/login");
    }

    #[test]
    fn authorize_refuses_without_token() {
        let client = client_without_token();
        let result = client.authorize(client.http.get(client.endpoint("/their-days")));
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn authenticated_calls_fail_before_network_without_token() {
        // The base URL points nowhere; reaching the network would fail with
        // a transport error instead of Unauthenticated.
        let client = ApiClient::new("http://invalid.localdomain:1", Session::in_memory()).unwrap();

        assert!(matches!(
            client.list_feed().await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.list_my_posts().await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.create_post("hi", None).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.delete_post(1).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.list_members().await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.invite_member("a@b.c").await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.remove_member(1).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.list_invitations().await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client
                .respond_invitation(1, InvitationAction::Accept)
                .await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.list_comments(1).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.create_comment(1, "hi").await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.delete_comment(1).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.toggle_like(1).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            client.profile().await,
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn default_message_prefers_raw_text() {
        assert_eq!(
            default_message(StatusCode::BAD_GATEWAY, "  upstream down  "),
            "upstream down"
        );
        assert_eq!(
            default_message(StatusCode::BAD_GATEWAY, ""),
            "Request failed with status 502 Bad Gateway"
        );
    }

    #[test]
    fn error_body_detail_fallback_chain() {
        // message wins over detail, detail over raw text
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "User not found"}"#).unwrap();
        assert_eq!(body.message, None);
        assert_eq!(body.detail.as_deref(), Some("User not found"));
        assert_eq!(
            ErrorCode::from_message(body.detail.as_deref().unwrap()),
            ErrorCode::NotFound
        );
    }
}
