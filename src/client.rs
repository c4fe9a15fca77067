use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::pool::CandidateSource;

const USER_AGENT: &str = concat!("uidnav/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 5;

#[derive(Deserialize)]
struct SuggestionEntry {
    entity: EntityRef,
}

#[derive(Deserialize)]
struct EntityRef {
    uid: String,
}

/// REST client for the comparison suggestions API.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    fn suggestions_url(&self, poll: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(["users", "me", "suggestions", poll, "tocompare", ""]);
        Ok(url)
    }

    /// Fetch the UIDs the API suggests comparing next in `poll`.
    pub async fn suggestions_to_compare(&self, poll: &str) -> Result<Vec<String>> {
        let url = self.suggestions_url(poll)?;
        debug!(%url, "Fetching suggestions");

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch {}: {}", url, e))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), %url, "Suggestions request failed");
            return Err(anyhow!("HTTP error {}: {}", response.status(), url));
        }

        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body: {}", e))?;

        parse_suggestions(&body)
    }
}

fn parse_suggestions(body: &str) -> Result<Vec<String>> {
    let entries: Vec<SuggestionEntry> = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse suggestions as JSON: {}", e))?;

    Ok(entries.into_iter().map(|e| e.entity.uid).collect())
}

#[async_trait]
impl CandidateSource for ApiClient {
    async fn fetch_candidates(&self, poll: &str) -> Result<Vec<String>> {
        self.suggestions_to_compare(poll).await
    }
}
