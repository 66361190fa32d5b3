use crate::domain::model::{NewSubmission, Submission};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The hosted table that persists submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, record: &NewSubmission) -> Result<Submission>;
    /// All records, newest `created_at` first.
    async fn select_all(&self) -> Result<Vec<Submission>>;
    async fn count(&self) -> Result<u64>;
}

/// Small persisted key-value storage for client-local state.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str)
        -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Decides whether an entered credential opens the admin view.
pub trait Authenticator: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn store_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn table(&self) -> &str;
    fn state_dir(&self) -> &str;
    fn admin_secret(&self) -> &str;
}
