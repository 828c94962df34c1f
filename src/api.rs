//! Read-only client for the remote view API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ViewError;
use crate::models::{AuthorDetails, AuthorTask, Comment, PersonId, PersonRow, Post, TaskRow};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid API base URL {:?}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL {} cannot carry a path", base_url);
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub async fn tasks(&self) -> Result<Vec<TaskRow>, ViewError> {
        self.get_json(&["tasks"], &[]).await
    }

    pub async fn subordinates(
        &self,
        name: &str,
        start_level: u32,
        end_level: u32,
    ) -> Result<Vec<PersonRow>, ViewError> {
        self.get_json(
            &["subordinates"],
            &[
                ("name", name.to_string()),
                ("start_level", start_level.to_string()),
                ("end_level", end_level.to_string()),
            ],
        )
        .await
    }

    /// Returns `None` when the API doesn't know the author.
    pub async fn author(&self, id: PersonId) -> Result<Option<AuthorDetails>, ViewError> {
        let url = self.url(&["author", &id.to_string()]);
        tracing::debug!(%url, "fetching");
        let res = self.http.get(url).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(res.error_for_status()?.json().await?))
    }

    pub async fn author_tasks(&self, id: PersonId) -> Result<Vec<AuthorTask>, ViewError> {
        self.get_json(&["author", &id.to_string(), "tasks"], &[]).await
    }

    pub async fn author_comments(&self, id: PersonId) -> Result<Vec<Comment>, ViewError> {
        self.get_json(&["author", &id.to_string(), "comments"], &[])
            .await
    }

    pub async fn posts(&self, name: &str) -> Result<Vec<Post>, ViewError> {
        self.get_json(&["post"], &[("name", name.to_string())]).await
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `new` rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ViewError> {
        let url = self.url(segments);
        tracing::debug!(%url, "fetching");

        let mut req = self.http.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let res = req.send().await?.error_for_status()?;

        Ok(res.json().await?)
    }
}
