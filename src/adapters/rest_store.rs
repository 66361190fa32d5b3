use crate::core::{ConfigProvider, NewSubmission, Submission, SubmissionStore};
use crate::utils::error::{IntakeError, Result};
use chrono::{SecondsFormat, Utc};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TABLE: &str = "contact_submissions";

/// `SubmissionStore` backed by a PostgREST table (the REST surface of a
/// hosted Postgres such as Supabase).
#[derive(Debug, Clone)]
pub struct RestSubmissionStore {
    client: Client,
    table_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct InsertRow<'a> {
    name: &'a str,
    email: &'a str,
    company: Option<&'a str>,
    service: &'a str,
    budget: Option<&'a str>,
    message: &'a str,
    created_at: String,
}

#[derive(Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

impl RestSubmissionStore {
    pub fn new(endpoint: &str, api_key: impl Into<String>, table: &str) -> Self {
        Self {
            client: Client::new(),
            table_url: format!("{}/rest/v1/{}", endpoint.trim_end_matches('/'), table),
            api_key: api_key.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.store_endpoint(), config.api_key(), config.table())
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn remote_error(response: Response) -> IntakeError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestError>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);

        tracing::debug!("Store error response {}: {}", status, message);
        IntakeError::RemoteError { status, message }
    }
}

/// Total from a `Content-Range` header such as `0-24/342` or `*/0`.
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.split_once('/')?;
    total.trim().parse().ok()
}

#[async_trait::async_trait]
impl SubmissionStore for RestSubmissionStore {
    async fn insert(&self, record: &NewSubmission) -> Result<Submission> {
        let row = InsertRow {
            name: &record.name,
            email: &record.email,
            company: record.company.as_deref(),
            service: &record.service,
            budget: record.budget.as_deref(),
            message: &record.message,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        tracing::debug!("Inserting submission into {}", self.table_url);
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        tracing::debug!("Insert response status: {}", response.status());
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let mut inserted: Vec<Submission> = response.json().await?;
        if inserted.is_empty() {
            return Err(IntakeError::RemoteError {
                status: 200,
                message: "Insert returned no rows".to_string(),
            });
        }
        Ok(inserted.swap_remove(0))
    }

    async fn select_all(&self) -> Result<Vec<Submission>> {
        tracing::debug!("Selecting all submissions from {}", self.table_url);
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        tracing::debug!("Select response status: {}", response.status());
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn count(&self) -> Result<u64> {
        let response = self
            .request(Method::HEAD)
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let header = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        parse_content_range_total(&header).ok_or_else(|| IntakeError::RemoteError {
            status: response.status().as_u16(),
            message: format!("Missing or unreadable Content-Range header: '{}'", header),
        })
    }
}
