//! GitHub REST API backend.
//!
//! Lists organization repositories page by page and downloads raw file
//! content through the contents endpoint.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT,
};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GitHubConfig;

use super::{HostError, Repository, RepositoryHost};

/// Fixed page size for repository listing.
pub const REPOS_PER_PAGE: u32 = 100;

const API_VERSION: &str = "2022-11-28";

const RAW_CONTENT_MEDIA_TYPE: &str = "application/vnd.github.raw";

static NEXT_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([^>]*)>\s*;\s*rel="next""#).expect("next link pattern is valid")
});

static PAGE_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]page=(\d+)").expect("page pattern is valid"));

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client authenticated with `token`.
    pub fn new(config: &GitHubConfig, token: &str) -> Result<Self, HostError> {
        let client = client_builder(config, token)?.build()?;
        Ok(Self::with_client(client, config))
    }

    fn with_client(client: Client, config: &GitHubConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    fn list_url(&self, org: &str, page: u32) -> String {
        format!(
            "{}/orgs/{}/repos?per_page={}&page={}",
            self.api_url,
            urlencoding::encode(org),
            REPOS_PER_PAGE,
            page
        )
    }

    fn contents_url(&self, org: &str, repo: &str, path: &str) -> String {
        let encoded_path = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            urlencoding::encode(org),
            urlencoding::encode(repo),
            encoded_path
        )
    }

    /// Fetch one page of the organization's repositories.
    ///
    /// Returns the repositories and the next page number, if any.
    async fn list_page(
        &self,
        org: &str,
        page: u32,
    ) -> Result<(Vec<Repository>, Option<u32>), HostError> {
        let url = self.list_url(org, page);

        debug!(org = %org, page, "Listing repositories");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HostError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_page);

        let body = response.bytes().await?;
        let results: Vec<RepoResult> = serde_json::from_slice(&body).map_err(|e| {
            HostError::Parse(format!("Failed to parse repository list: {}", e))
        })?;

        Ok((results.into_iter().map(|r| r.into()).collect(), next))
    }
}

/// HTTP client settings shared by every request: auth, API version, agent, timeout.
fn client_builder(config: &GitHubConfig, token: &str) -> Result<ClientBuilder, HostError> {
    if token.is_empty() {
        return Err(HostError::NotConfigured(
            "GitHub token is required".to_string(),
        ));
    }

    let mut headers = HeaderMap::new();
    let auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| HostError::NotConfigured(format!("Invalid token: {}", e)))?;
    headers.insert(AUTHORIZATION, auth);
    headers.insert(
        HeaderName::from_static("x-github-api-version"),
        HeaderValue::from_static(API_VERSION),
    );
    let agent = HeaderValue::from_str(&config.user_agent)
        .map_err(|e| HostError::NotConfigured(format!("Invalid user agent: {}", e)))?;
    headers.insert(USER_AGENT, agent);

    Ok(Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers))
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    fn name(&self) -> &str {
        "github"
    }

    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, HostError> {
        let all = collect_pages(|page| self.list_page(org, page)).await?;

        debug!(org = %org, count = all.len(), "Listed repositories");
        Ok(all)
    }

    async fn fetch_file(&self, org: &str, repo: &str, path: &str) -> Result<Vec<u8>, HostError> {
        let url = self.contents_url(org, repo, path);

        debug!(repo = %repo, path = %path, "Downloading file");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, RAW_CONTENT_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(HostError::NotFound(format!("{}/{}: {}", org, repo, path)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HostError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Fetch pages starting at 1 and concatenate them in server order.
///
/// Stops when a page has no next link, or when the next link does not move
/// forward.
async fn collect_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<Repository>, HostError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(Vec<Repository>, Option<u32>), HostError>>,
{
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        let (mut repos, next) = fetch_page(page).await?;
        all.append(&mut repos);
        match next {
            Some(n) if n > page => page = n,
            Some(n) => {
                warn!(page, next = n, "Next page link does not advance, stopping");
                break;
            }
            None => break,
        }
    }

    Ok(all)
}

/// Extract the next page number from a `Link` header.
fn next_page(link: &str) -> Option<u32> {
    link.split(',').find_map(|part| {
        let target = NEXT_LINK.captures(part)?.get(1)?.as_str();
        PAGE_PARAM.captures(target)?.get(1)?.as_str().parse().ok()
    })
}

// ============================================================================
// GitHub API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RepoResult {
    name: String,
}

impl From<RepoResult> for Repository {
    fn from(r: RepoResult) -> Self {
        Repository { name: r.name }
    }
}
