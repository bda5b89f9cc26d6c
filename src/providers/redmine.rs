use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::Provider;
use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::model::issue::Issue;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RedmineProvider {
    source: SourceConfig,
    client: reqwest::Client,
    timeout: Duration,
}

impl RedmineProvider {
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
            timeout: FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{url}issues.json` with the key, query id and limit as escaped query parameters.
    pub fn issues_url(&self) -> String {
        format!(
            "{}issues.json?key={}&query_id={}&limit={}",
            self.source.url,
            urlencoding::encode(&self.source.api_key),
            urlencoding::encode(&self.source.query_id.to_string()),
            urlencoding::encode(&self.source.limit.to_string()),
        )
    }

    fn request_error(&self, error: reqwest::Error) -> FetchError {
        // reqwest puts the full URL in its message, and the URL carries the API key
        FetchError::Request {
            source_name: self.name().to_string(),
            error: error.without_url(),
        }
    }
}

#[derive(Deserialize)]
struct IssuesResponse {
    issues: Vec<RedmineIssue>,
}

#[derive(Deserialize)]
struct RedmineIssue {
    id: u64,
    project: Option<Named>,
    tracker: Option<Named>,
    status: Option<Named>,
    assigned_to: Option<Named>,
    subject: Option<String>,
}

#[derive(Deserialize)]
struct Named {
    #[serde(default)]
    name: String,
}

fn name_of(field: Option<Named>) -> String {
    field.map(|n| n.name).unwrap_or_default()
}

fn decode_issues(body: &[u8], source_link: &str) -> serde_json::Result<Vec<Issue>> {
    let response: IssuesResponse = serde_json::from_slice(body)?;

    Ok(response
        .issues
        .into_iter()
        .map(|issue| Issue {
            ticket_id: issue.id,
            project: name_of(issue.project),
            tracker: name_of(issue.tracker),
            status: name_of(issue.status),
            assignee: name_of(issue.assigned_to),
            subject: issue.subject.unwrap_or_default(),
            source_link: source_link.to_string(),
        })
        .collect())
}

#[async_trait]
impl Provider for RedmineProvider {
    fn name(&self) -> &str {
        &self.source.url
    }

    async fn fetch_items(&self) -> Result<Vec<Issue>, FetchError> {
        let resp = self
            .client
            .get(self.issues_url())
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                source_name: self.name().to_string(),
                status,
            });
        }

        let body = resp.bytes().await.map_err(|e| self.request_error(e))?;
        let issues = decode_issues(&body, &self.source.url).map_err(|e| FetchError::Decode {
            source_name: self.name().to_string(),
            message: e.to_string(),
        })?;

        debug!(source = %self.name(), count = issues.len(), "fetched issues");
        Ok(issues)
    }
}
