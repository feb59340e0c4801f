//! REST client for the tracker.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{RequestBuilder, Response};
use tracing::{debug, instrument};
use workitems::{
    Body, CreateItemError, CreatedItem, IssueKey, ItemCreator, ItemRequest, ProjectKey,
};

use crate::errors::TrackerError;
use crate::payload::{
    api_error_message, create_issue_body, CreateIssueResponse, FieldMapping, IssueResponse,
};

/// Everything needed to talk to one tracker project.
#[derive(Clone)]
pub struct TrackerSettings {
    /// Site root, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    pub project: ProjectKey,
    /// Account e-mail used for basic authentication.
    pub email: String,
    pub api_token: String,
    pub fields: FieldMapping,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// An issue's description as stored by the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedIssue {
    pub key: String,
    pub summary: String,
    pub description: Option<Body>,
}

/// Creates and reads issues over the tracker's REST API.
#[derive(Clone)]
pub struct TrackerClient {
    http: reqwest::Client,
    base_url: String,
    project: ProjectKey,
    email: String,
    api_token: String,
    fields: FieldMapping,
}

impl TrackerClient {
    pub fn new(settings: TrackerSettings) -> Result<Self, TrackerError> {
        let base_url = settings.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(TrackerError::Configuration(format!(
                "base URL must start with http:// or https://, got '{}'",
                settings.base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("ticketforge/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            project: settings.project,
            email: settings.email,
            api_token: settings.api_token,
            fields: settings.fields,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.email, Some(&self.api_token))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Creates one issue and returns the identity the tracker assigned.
    #[instrument(skip_all, fields(kind = %request.kind, project = %self.project))]
    pub async fn create_issue(&self, request: &ItemRequest) -> Result<CreatedItem, TrackerError> {
        let url = format!("{}/rest/api/3/issue", self.base_url);
        let body = create_issue_body(&self.project, request, &self.fields);
        debug!(%url, "Creating issue");

        let response = self
            .authorized(self.http.post(&url))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let created: CreateIssueResponse = response.json().await?;
        CreatedItem::try_from(created)
    }

    /// Fetches an issue's summary and description for redisplay.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn fetch_issue(&self, key: &IssueKey) -> Result<FetchedIssue, TrackerError> {
        let url = format!("{}/rest/api/3/issue/{}", self.base_url, key);
        debug!(%url, "Fetching issue");

        let response = self
            .authorized(self.http.get(&url))
            .query(&[("fields", "summary,description")])
            .send()
            .await?;
        let response = check_status(response).await?;
        let issue: IssueResponse = response.json().await?;
        Ok(FetchedIssue {
            key: issue.key,
            summary: issue.fields.summary,
            description: issue.fields.description,
        })
    }
}

/// Turns a non-success response into [`TrackerError::Api`].
async fn check_status(response: Response) -> Result<Response, TrackerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = response.text().await.unwrap_or_default();
    Err(TrackerError::Api {
        status: status.as_u16(),
        message: api_error_message(status.as_u16(), &body),
        retry_after,
    })
}

#[async_trait]
impl ItemCreator for TrackerClient {
    async fn create_item(&self, request: ItemRequest) -> Result<CreatedItem, CreateItemError> {
        self.create_issue(&request).await.map_err(CreateItemError::from)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
