//! HTTP client for the chat server REST API (v4, JSON, bearer token).

use super::types::{SearchRequest, ServerErrorBody, ViewChannelRequest};
use super::{ApiError, ChatApi, ClientConfig, ClientLicense, Post, PostList, Team, TeamMember};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

const API_PREFIX: &str = "/api/v4";
const POSTS_PER_PAGE: u32 = 60;

/// Client for the chat server HTTP API.
#[derive(Clone)]
pub struct ServerClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ServerClient {
    pub fn new(base_url: impl AsRef<str>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let res = self.authorize(self.client.get(&url)).send().await?;
        decode(check_status(res).await?).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let res = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await?;
        decode(check_status(res).await?).await
    }
}

/// Parse a successful response body. A body that is not the expected JSON is `ApiError::Decode`.
async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
    let url = res.url().clone();
    let body = res.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        log::debug!("decoding response from {}: {}", url, e);
        ApiError::Decode(e.to_string())
    })
}

/// Turn a non-2xx response into `ApiError::Api`, using the server's error message when it sent one.
async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServerErrorBody>(&body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or(body);
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ChatApi for ServerClient {
    async fn get_client_config(&self) -> Result<ClientConfig, ApiError> {
        self.get_json("/config/client?format=old").await
    }

    async fn get_license_config(&self) -> Result<ClientLicense, ApiError> {
        self.get_json("/license/client?format=old").await
    }

    async fn get_my_teams(&self) -> Result<Vec<Team>, ApiError> {
        self.get_json("/users/me/teams").await
    }

    async fn get_my_team_members(&self) -> Result<Vec<TeamMember>, ApiError> {
        self.get_json("/users/me/teams/members").await
    }

    async fn get_posts(&self, channel_id: &str) -> Result<PostList, ApiError> {
        self.get_json(&format!(
            "/channels/{}/posts?page=0&per_page={}",
            channel_id, POSTS_PER_PAGE
        ))
        .await
    }

    async fn create_post(&self, post: &Post) -> Result<Post, ApiError> {
        self.post_json("/posts", post).await
    }

    async fn search_posts(
        &self,
        team_id: &str,
        terms: &str,
        is_or_search: bool,
    ) -> Result<PostList, ApiError> {
        let body = SearchRequest {
            terms,
            is_or_search,
        };
        self.post_json(&format!("/teams/{}/posts/search", team_id), &body)
            .await
    }

    async fn get_post_thread(&self, post_id: &str) -> Result<PostList, ApiError> {
        self.get_json(&format!("/posts/{}/thread", post_id)).await
    }

    async fn view_channel(&self, channel_id: &str, prev_channel_id: &str) -> Result<(), ApiError> {
        let body = ViewChannelRequest {
            channel_id,
            prev_channel_id,
        };
        let _: serde_json::Value = self.post_json("/channels/members/me/view", &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let c = ServerClient::new("https://chat.example.com/", None);
        assert_eq!(c.base_url(), "https://chat.example.com");
        assert_eq!(
            c.url("/users/me/teams"),
            "https://chat.example.com/api/v4/users/me/teams"
        );
    }
}
