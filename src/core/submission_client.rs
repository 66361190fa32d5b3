use crate::core::{NewSubmission, Submission, SubmissionStore};
use crate::utils::error::IntakeError;
use std::fmt;

/// Failure surfaced to the UI layer. Callers only branch on success or
/// failure and show `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    // Store-reported failures get the operation summary; transport and
    // decoding failures keep their own description.
    fn from_store_error(error: &IntakeError, summary: &str) -> Self {
        match error {
            IntakeError::RemoteError { .. } => Self::new(summary),
            other => Self::new(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorInfo {}

pub type ClientResult<T> = std::result::Result<T, ErrorInfo>;

#[derive(Debug, Clone)]
pub struct SubmissionClient<S: SubmissionStore> {
    store: S,
}

impl<S: SubmissionStore> SubmissionClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn submit(&self, record: &NewSubmission) -> ClientResult<Submission> {
        let record = NewSubmission {
            company: empty_to_none(&record.company),
            budget: empty_to_none(&record.budget),
            ..record.clone()
        };

        match self.store.insert(&record).await {
            Ok(stored) => {
                tracing::info!(
                    "Stored submission {} for service '{}'",
                    stored.id.as_deref().unwrap_or("<unassigned>"),
                    stored.service
                );
                Ok(stored)
            }
            Err(e) => {
                tracing::error!("Contact form submission error: {}", e);
                Err(ErrorInfo::from_store_error(&e, "Failed to submit form"))
            }
        }
    }

    pub async fn list_all(&self) -> ClientResult<Vec<Submission>> {
        match self.store.select_all().await {
            Ok(rows) => {
                tracing::debug!("Fetched {} submissions", rows.len());
                Ok(rows)
            }
            Err(e) => {
                tracing::error!("Fetch submissions error: {}", e);
                Err(ErrorInfo::from_store_error(&e, "Failed to fetch submissions"))
            }
        }
    }

    pub async fn count_all(&self) -> ClientResult<u64> {
        self.store.count().await.map_err(|e| {
            tracing::error!("Fetch stats error: {}", e);
            ErrorInfo::from_store_error(&e, "Failed to fetch stats")
        })
    }
}

// Only the empty string becomes null; whitespace is stored as typed.
fn empty_to_none(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}
