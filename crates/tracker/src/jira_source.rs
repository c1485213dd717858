//! Jira REST item source.
//!
//! Searches for issue keys page by page, then fetches each issue with its
//! expanded changelog. Pages are requested one at a time with a fixed pause
//! between them.

use std::time::Duration;

use async_trait::async_trait;
use burndown_core::{ReportConfig, WorkItem};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{ItemSource, Result, TrackerError};
use crate::wire::{IssueRecord, SearchPage};

/// Issues requested per search page.
pub const PAGE_SIZE: usize = 100;

/// Jira Cloud REST client.
#[derive(Clone)]
pub struct JiraSource {
    client: Client,
    base_url: String,
    username: String,
    api_token: String,
    jql: String,
    size_field: String,
    page_delay: Duration,
}

impl JiraSource {
    /// Create a source from report configuration.
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: config.tracker.url.trim_end_matches('/').to_string(),
            username: config.tracker.username.clone(),
            api_token: config.tracker.api_token.clone(),
            jql: config.jql.clone(),
            size_field: config.tracker.size_field.clone(),
            page_delay: Duration::from_secs(1),
        })
    }

    /// Override the pause between search pages.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Search endpoint URL.
    pub fn search_url(&self) -> String {
        format!("{}/rest/api/3/search/jql", self.base_url)
    }

    /// Issue endpoint URL for a key.
    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/rest/api/3/issue/{}", self.base_url, key)
    }

    /// Keys of one page of search results.
    async fn search_page(&self, start_at: usize) -> Result<Vec<String>> {
        info!(start_at, page_size = PAGE_SIZE, "Searching issues");
        let request = self.client.get(self.search_url()).query(&[
            ("jql", self.jql.clone()),
            ("startAt", start_at.to_string()),
            ("maxResults", PAGE_SIZE.to_string()),
            ("fields", "key".to_string()),
        ]);
        let page: SearchPage = self.send(request).await?;
        Ok(page.issues.into_iter().map(|issue| issue.key).collect())
    }

    /// One issue with its changelog.
    async fn fetch_issue(&self, key: &str) -> Result<IssueRecord> {
        debug!(key, "Fetching issue");
        let request = self
            .client
            .get(self.issue_url(key))
            .query(&[("expand", "changelog")]);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .basic_auth(&self.username, Some(&self.api_token))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ItemSource for JiraSource {
    async fn fetch_items(&self) -> Result<Vec<WorkItem>> {
        let mut items = Vec::new();
        let mut start_at = 0;

        loop {
            let keys = self.search_page(start_at).await?;
            let page_len = keys.len();

            for key in keys {
                let record = self.fetch_issue(&key).await?;
                items.push(record.into_work_item(&self.size_field));
            }

            // A short page is the last one
            if page_len < PAGE_SIZE {
                break;
            }
            start_at += PAGE_SIZE;
            tokio::time::sleep(self.page_delay).await;
        }

        info!(issues = items.len(), "Fetched issues");
        Ok(items)
    }
}
