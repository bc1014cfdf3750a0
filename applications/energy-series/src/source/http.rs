use super::ReadingSource;
use crate::config::SourceConfig;
use crate::error::{AppError, Result};
use crate::models::{Reading, SystemOverview};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Reading source backed by the monitoring REST API
#[derive(Clone)]
pub struct HttpReadingSource {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpReadingSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    pub fn overview_url(&self) -> String {
        format!("{}/monitoring/installations/overview", self.base_url)
    }

    pub fn readings_url(&self, installation_id: i64) -> String {
        format!("{}/monitoring/readings/recent/{}", self.base_url, installation_id)
    }

    async fn get<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let request = match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ReadingSource for HttpReadingSource {
    async fn system_overview(&self) -> Result<SystemOverview> {
        self.get(self.client.get(self.overview_url())).await
    }

    async fn recent_readings(&self, installation_id: i64, limit: usize) -> Result<Vec<Reading>> {
        let request = self
            .client
            .get(self.readings_url(installation_id))
            .query(&[("limit", limit)]);
        self.get(request).await
    }
}
