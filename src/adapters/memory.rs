use crate::core::{NewSubmission, StateStore, Submission, SubmissionStore};
use crate::utils::error::{IntakeError, Result};
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process `SubmissionStore` for tests and offline runs. Clones share
/// the same rows.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionStore {
    rows: Arc<Mutex<Vec<Submission>>>,
    failure: Arc<Mutex<Option<String>>>,
    next_id: Arc<AtomicUsize>,
    insert_calls: Arc<AtomicUsize>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every following call fails with a remote error carrying `message`.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    pub async fn recover(&self) {
        *self.failure.lock().await = None;
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    async fn check_failure(&self) -> Result<()> {
        match self.failure.lock().await.as_ref() {
            Some(message) => Err(IntakeError::RemoteError {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn insert(&self, record: &NewSubmission) -> Result<Submission> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Submission {
            id: Some(id.to_string()),
            name: record.name.clone(),
            email: record.email.clone(),
            company: record.company.clone(),
            service: record.service.clone(),
            budget: record.budget.clone(),
            message: record.message.clone(),
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        };

        self.rows.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn select_all(&self) -> Result<Vec<Submission>> {
        self.check_failure().await?;

        let mut rows = self.rows.lock().await.clone();
        // RFC 3339 UTC strings of equal precision sort chronologically.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn count(&self) -> Result<u64> {
        self.check_failure().await?;
        Ok(self.rows.lock().await.len() as u64)
    }
}

/// `StateStore` held in memory; lost with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
